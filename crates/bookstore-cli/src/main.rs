//! # Bookstore Scenario Runner
//!
//! ## Usage
//! ```bash
//! # Run the built-in storefront session
//! cargo run -p bookstore-cli
//!
//! # Run a scenario file, printing JSON
//! cargo run -p bookstore-cli -- --scenario ./session.json --json
//!
//! # Use a config file
//! cargo run -p bookstore-cli -- --config ./bookstore.toml
//! ```

use bookstore_cli::report::{write_json, write_text};
use bookstore_cli::{init_tracing, AppConfig, CliError, Scenario};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut scenario_path: Option<PathBuf> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| CliError::InvalidArgs("--config needs a path".into()))?;
                config_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--scenario" | "-s" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| CliError::InvalidArgs("--scenario needs a path".into()))?;
                scenario_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--json" | "-j" => json = true,
            "--help" | "-h" => {
                println!("Bookstore Scenario Runner");
                println!();
                println!("Usage: bookstore [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>     TOML config file (default: $BOOKSTORE_CONFIG)");
                println!("  -s, --scenario <PATH>   Scenario JSON file (default: built-in demo)");
                println!("  -j, --json              Print the report as JSON");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            other => {
                return Err(CliError::InvalidArgs(format!("unknown argument '{}'", other)).into());
            }
        }
        i += 1;
    }

    init_tracing();

    let config = AppConfig::load(config_path)?;
    info!(
        store = %config.store.name,
        vat = %config.pricing.vat_rate,
        "Configuration loaded"
    );

    let scenario = match scenario_path {
        Some(path) => Scenario::load(&path)?,
        None => Scenario::demo()?,
    };
    let report = scenario.run(config.engine())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, &report, &config.store.name)?;
    } else {
        write_text(&mut out, &report, &config.store.name)?;
    }
    out.flush()?;

    Ok(())
}
