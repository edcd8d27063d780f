//! # Despensa CLI Entry Point
//!
//! Parses arguments and hands over to [`despensa_cli::run`].

use std::process::ExitCode;

use clap::Parser;
use despensa_cli::cli::Cli;
use despensa_cli::output::print_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match despensa_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err, json);
            ExitCode::from(err.code.exit_code())
        }
    }
}
