use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod app;
mod artifacts;
mod cli;
mod commands;
mod config;
mod connection;
mod contract;
mod defaults;
mod deploy;
mod error;
mod flows;
mod logging;
mod notify;
mod screens;
mod types;
mod ui;
mod util;
mod validate;

use crate::cli::{Cli, Command};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // A missing .env is fine.
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let cfg = Config::from_args(&cli.conn)?;

    match cli.cmd.unwrap_or(Command::Tui) {
        Command::Tui => {
            logging::init_file(&cfg.log_file)?;
            app::run(cfg).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Deploy { artifact } => {
            logging::init_stderr();
            deploy::run(&cfg, &artifact).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Status => {
            logging::init_stderr();
            commands::status::run(&cfg).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Tokenize { name, asset_type, value } => {
            logging::init_stderr();
            commands::assets::tokenize(&cfg, &name, &asset_type, &value).await
        }
        Command::Query { id, json } => {
            logging::init_stderr();
            commands::assets::query(&cfg, &id, json).await
        }
        Command::Transfer { id, to } => {
            logging::init_stderr();
            commands::assets::transfer(&cfg, &id, &to).await
        }
    }
}
