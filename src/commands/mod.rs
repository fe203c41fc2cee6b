//! One-shot subcommands. Each connects, runs one flow with console
//! notices, and maps flow failures to a failing exit code.

pub mod assets;
pub mod status;

use std::process::ExitCode;

use crate::error::FlowError;

/// Flow errors were already printed by the notifier.
fn exit_code<T>(result: Result<T, FlowError>) -> (Option<T>, ExitCode) {
    match result {
        Ok(v) => (Some(v), ExitCode::SUCCESS),
        Err(_) => (None, ExitCode::FAILURE),
    }
}
