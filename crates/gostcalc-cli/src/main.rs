//! Gostcalc - Cloud Firestore cost calculator.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gostcalc_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries results
    let default_filter = if cli.verbose {
        "info,gostcalc=debug,gostcalc_core=debug,gostcalc_cli=debug"
    } else {
        "warn,gostcalc=info,gostcalc_cli=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match gostcalc_cli::execute(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Cost calculation failed");
            ExitCode::FAILURE
        }
    }
}
