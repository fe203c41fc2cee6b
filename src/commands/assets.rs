use anyhow::Result;
use std::process::ExitCode;

use super::exit_code;
use crate::config::Config;
use crate::connection;
use crate::flows;
use crate::notify::ConsoleNotifier;
use crate::types::AssetView;

pub async fn tokenize(cfg: &Config, name: &str, asset_type: &str, value: &str) -> Result<ExitCode> {
    // Validate before touching the node.
    let args = match flows::check_tokenize(&ConsoleNotifier, name, asset_type, value) {
        Ok(args) => args,
        Err(_) => return Ok(ExitCode::FAILURE),
    };
    let session = connection::connect(cfg).await?;
    let (done, code) = exit_code(flows::run_tokenize(session.registry.as_ref(), &ConsoleNotifier, args).await);
    if let Some(done) = done {
        println!("  tx: {:#x}", done.tx_hash);
    }
    Ok(code)
}

pub async fn query(cfg: &Config, id: &str, json: bool) -> Result<ExitCode> {
    let id = match flows::check_query(&ConsoleNotifier, id) {
        Ok(id) => id,
        Err(_) => return Ok(ExitCode::FAILURE),
    };
    let session = connection::connect(cfg).await?;
    let (asset, code) = exit_code(flows::run_query(session.registry.as_ref(), &ConsoleNotifier, id).await);
    if let Some(asset) = asset {
        let view = AssetView::from(&asset);
        if json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            print_card(&view);
        }
    }
    Ok(code)
}

pub async fn transfer(cfg: &Config, id: &str, to: &str) -> Result<ExitCode> {
    let args = match flows::check_transfer(&ConsoleNotifier, id, to) {
        Ok(args) => args,
        Err(_) => return Ok(ExitCode::FAILURE),
    };
    let session = connection::connect(cfg).await?;
    let (tx, code) = exit_code(flows::run_transfer(session.registry.as_ref(), &ConsoleNotifier, args).await);
    if let Some(tx) = tx {
        println!("  tx: {tx:#x}");
    }
    Ok(code)
}

fn print_card(view: &AssetView) {
    println!();
    println!("  {}", view.name);
    for (label, value) in view.rows() {
        println!("  {label:<10}{value}");
    }
}
