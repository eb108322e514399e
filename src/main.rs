//! order-price CLI - Command-line interface
//!
//! Commands:
//!   quote    - Price a full order
//!   fee      - Service fee for a total and quantity
//!   eval     - Evaluate an order-total expression
//!   config   - Show, check or describe the pricing config

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use order_price::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    logging::init_cli_logger(args.verbose);
    tracing::debug!("order-price {}", order_price::VERSION);

    let result = match &args.command {
        Command::Quote(quote) => cli::cmd_quote(quote),
        Command::Fee(fee) => cli::cmd_fee(fee),
        Command::Eval { expression } => cli::cmd_eval(expression),
        Command::Config { action } => cli::cmd_config(action),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
