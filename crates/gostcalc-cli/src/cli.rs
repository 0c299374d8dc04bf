//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::ConfigError;

/// Google cloud cost calculator.
#[derive(Debug, Parser)]
#[command(name = "gostcalc")]
#[command(about = "Google cloud cost calculator.")]
#[command(long_about = "This tool will try to calculate the cost estimations based on input data.")]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Resource to estimate.
    #[command(subcommand)]
    pub command: Command,

    /// Pricing configuration file (JSON)
    #[arg(long, global = true, env = "GOSTCALC_PRICING")]
    pub pricing: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands, one per billable resource.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate network ingress costs.
    Network {
        /// Workload size.
        #[command(flatten)]
        usage: UsageArgs,

        /// File whose bytes are sent per transaction
        #[arg(long)]
        payload: Option<PathBuf>,
    },
    /// Calculate firestore storage costs.
    Storage {
        /// Workload size.
        #[command(flatten)]
        usage: UsageArgs,

        /// JSON document description to size instead of the sample record
        #[arg(long)]
        document: Option<PathBuf>,
    },
    /// Calculate firestore write costs.
    Write {
        /// Workload size.
        #[command(flatten)]
        usage: UsageArgs,
    },
    /// Calculate firestore read costs.
    Read {
        /// Workload size.
        #[command(flatten)]
        usage: UsageArgs,
    },
    /// Calculate firestore delete costs.
    Delete {
        /// Workload size.
        #[command(flatten)]
        usage: UsageArgs,
    },
    /// Calculate every resource and the monthly total.
    All {
        /// Workload size.
        #[command(flatten)]
        usage: UsageArgs,

        /// JSON document description to size instead of the sample record
        #[arg(long)]
        document: Option<PathBuf>,

        /// File whose bytes are sent per transaction
        #[arg(long)]
        payload: Option<PathBuf>,
    },
}

impl Command {
    /// Usage arguments shared by every subcommand.
    #[must_use]
    pub const fn usage(&self) -> &UsageArgs {
        match self {
            Self::Network { usage, .. }
            | Self::Storage { usage, .. }
            | Self::Write { usage }
            | Self::Read { usage }
            | Self::Delete { usage }
            | Self::All { usage, .. } => usage,
        }
    }
}

/// Workload size.
#[derive(Debug, Clone, Copy, Args)]
pub struct UsageArgs {
    /// Total number of daily transactions
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: u64,

    /// Total number of active users
    #[arg(short, long, default_value_t = 1_000_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub population: u64,

    /// Also print the daily figure
    #[arg(long)]
    pub daily: bool,
}

impl UsageArgs {
    /// Requests per day across the whole population.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CountOverflow`] if the product does not fit `u64`.
    pub fn daily_count(&self) -> Result<u64, ConfigError> {
        self.count
            .checked_mul(self.population)
            .ok_or(ConfigError::CountOverflow {
                count: self.count,
                population: self.population,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("gostcalc").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = parse(&["write"]).unwrap();
        let usage = cli.command.usage();
        assert_eq!(usage.count, 10);
        assert_eq!(usage.population, 1_000_000);
        assert_eq!(usage.daily_count().unwrap(), 10_000_000);
        assert!(!cli.json);
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["read", "-c", "4", "-p", "100000"]).unwrap();
        assert_eq!(cli.command.usage().daily_count().unwrap(), 400_000);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["storage", "--json", "--pricing", "prices.json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.pricing, Some(PathBuf::from("prices.json")));
    }

    #[test]
    fn rejects_non_positive_counts() {
        assert!(parse(&["write", "--count", "0"]).is_err());
        assert!(parse(&["write", "--population", "-5"]).is_err());
    }

    #[test]
    fn requires_subcommand() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn count_overflow() {
        let cli = parse(&["delete", "-c", "18446744073709551615", "-p", "2"]).unwrap();
        assert!(matches!(
            cli.command.usage().daily_count(),
            Err(ConfigError::CountOverflow { .. })
        ));
    }
}
