//! # bookstore-cli: Scenario Runner for bookstore-core
//!
//! Loads configuration, plays a storefront scenario through the core and
//! prints the resulting carts, orders and invoices.
//!
//! ## Modules
//!
//! - [`config`] - Store name and pricing rates (file + environment)
//! - [`scenario`] - Scenario files and the run itself
//! - [`report`] - Text and JSON summaries
//! - [`error`] - CLI error types

pub mod config;
pub mod error;
pub mod report;
pub mod scenario;

pub use config::AppConfig;
pub use error::{CliError, CliResult};
pub use scenario::{RunReport, Scenario};

use tracing_subscriber::EnvFilter;

/// Installs the global log subscriber.
///
/// Honors `RUST_LOG`; defaults to `info,bookstore=debug`. Logs go to stderr
/// so stdout carries only the report.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookstore=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
