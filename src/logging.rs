//! Logging setup for the command-line tool
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. `RUST_LOG` takes precedence over the verbosity flag.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a verbosity level
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "order_price=debug,info"
    } else {
        "order_price=info"
    }
}

/// Install a compact stderr subscriber
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
