//! CLI argument definitions using clap
//!
//! Commands:
//! - orderstream list
//! - orderstream run --config <path> --report <name>
//! - orderstream discount --config <path> --category <name> --percent <p>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// orderstream - deterministic reports over customer, order and product snapshots
#[derive(Parser, Debug)]
#[command(name = "orderstream")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the report catalogue
    List,

    /// Run one report against the configured snapshot
    Run {
        /// Path to configuration file
        #[arg(long, default_value = "./orderstream.json")]
        config: PathBuf,

        /// Report name, as printed by `list`
        #[arg(long)]
        report: String,
    },

    /// Apply a percentage discount to one category and print the result.
    /// The snapshot file is not rewritten.
    Discount {
        /// Path to configuration file
        #[arg(long, default_value = "./orderstream.json")]
        config: PathBuf,

        #[arg(long)]
        category: String,

        /// Percentage in 0..=100
        #[arg(long)]
        percent: f64,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["orderstream", "run", "--report", "order-totals"]).unwrap();
        match cli.command {
            Command::Run { config, report } => {
                assert_eq!(config, PathBuf::from("./orderstream.json"));
                assert_eq!(report, "order-totals");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_discount() {
        let cli = Cli::try_parse_from([
            "orderstream",
            "discount",
            "--config",
            "cfg.json",
            "--category",
            "Toys",
            "--percent",
            "10",
        ])
        .unwrap();
        match cli.command {
            Command::Discount { category, percent, .. } => {
                assert_eq!(category, "Toys");
                assert_eq!(percent, 10.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_run_requires_report() {
        assert!(Cli::try_parse_from(["orderstream", "run"]).is_err());
    }
}
