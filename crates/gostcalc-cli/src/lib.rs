//! Gostcalc command-line estimator.
//!
//! Turns a daily transaction count and a user population into monthly
//! Cloud Firestore cost estimates:
//!
//! ```text
//! gostcalc storage --count 10 --population 1000000
//! gostcalc write -c 5 -p 20000 --daily
//! gostcalc all --pricing prices.json --json
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod samples;

use anyhow::Context;

pub use cli::{Cli, Command, UsageArgs};
pub use error::ConfigError;
pub use estimate::{run, Estimate, Report};

/// Load pricing, run the command and render its output.
///
/// # Errors
///
/// Returns an error if pricing cannot be loaded or the calculation fails.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    let pricing = config::load_pricing(cli.pricing.as_deref())
        .context("unable to load pricing configuration")?;

    let report = run(&cli.command, &pricing).context("unable to calculate cost")?;

    report.render(cli.json).context("unable to render report")
}
