//! CLI command implementations
//!
//! This module contains all CLI command handlers, organized by category:
//! - `quote`: Pricing commands (quote, fee, eval)
//! - `config`: Configuration and schema commands
//! - `util`: Shared utility functions

pub mod config;
pub mod quote;
pub mod util;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// Re-export all command functions for convenient access
pub use config::cmd_config;
pub use quote::{cmd_eval, cmd_fee, cmd_quote};

#[derive(Parser, Debug)]
#[command(
    name = "order-price",
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price a full order: fee, conversion, shipping and total
    Quote(QuoteArgs),

    /// Service fee for an order total and quantity
    Fee(FeeArgs),

    /// Evaluate an order-total expression such as "1000+500*2"
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Show, check or describe the pricing config
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Default)]
pub struct QuoteArgs {
    /// Pricing config file (default: ./order_price.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Exchange rate, VND per 1 JPY (default from config)
    #[arg(long)]
    pub rate: Option<String>,

    /// Order total in yen; arithmetic allowed, e.g. "1200+3400"
    #[arg(short, long, allow_hyphen_values = true)]
    pub total: String,

    /// Number of items
    #[arg(short, long)]
    pub qty: Option<String>,

    /// Estimated weight (kg)
    #[arg(long)]
    pub weight: Option<String>,

    /// Box length (cm)
    #[arg(long)]
    pub length: Option<String>,

    /// Box width (cm)
    #[arg(long)]
    pub width: Option<String>,

    /// Box height (cm)
    #[arg(long)]
    pub height: Option<String>,

    /// Seller shipping inside Japan (¥)
    #[arg(long)]
    pub seller_ship: Option<String>,

    /// Japan to Vietnam shipping (VND)
    #[arg(long)]
    pub ship_jp_vn: Option<String>,

    /// Delivery inside Vietnam (VND)
    #[arg(long)]
    pub ship_local: Option<String>,

    /// Surcharge (VND)
    #[arg(long)]
    pub surcharge: Option<String>,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FeeArgs {
    /// Order total in yen; arithmetic allowed
    #[arg(allow_hyphen_values = true)]
    pub total: String,

    /// Number of items
    #[arg(short, long, default_value_t = 1)]
    pub qty: u32,

    /// Pricing config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective config as YAML
    Show {
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a config file
    Check {
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a JSON schema: "config" or "result"
    Schema {
        #[arg(default_value = "config")]
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "order-price",
            "quote",
            "--total",
            "1000+500*2",
            "-q",
            "3",
            "--ship-jp-vn",
            "200000",
        ])
        .unwrap();
        match cli.command {
            Command::Quote(args) => {
                assert_eq!(args.total, "1000+500*2");
                assert_eq!(args.qty.as_deref(), Some("3"));
                assert_eq!(args.ship_jp_vn.as_deref(), Some("200000"));
                assert!(!args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_expression_may_start_with_minus() {
        let cli = Cli::try_parse_from(["order-price", "eval", "-5+10"]).unwrap();
        assert!(matches!(cli.command, Command::Eval { expression } if expression == "-5+10"));
    }
}
