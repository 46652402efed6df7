//! # wikigraph CLI
//!
//! Command-line utilities for normalizing and checking encoded document
//! graphs.

use anyhow::Result;
use std::env;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::Command;
use config::CliConfig;

fn main() -> Result<()> {
    let config = CliConfig::from_env()?;

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let command = match Command::parse(&args) {
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            print_help();
            std::process::exit(1);
        }
    };

    tracing::debug!(?command, "Running command");
    let output = commands::execute(&command, &config)?;

    if !output.text.is_empty() {
        println!("{}", output.text);
    }
    if output.exit_code != 0 {
        std::process::exit(output.exit_code);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"wikigraph CLI

USAGE:
    wikigraph <COMMAND> [OPTIONS]

COMMANDS:
    page <file>                    Decode a page and print its canonical JSON
    section <file>                 Decode a section and print its canonical JSON
    thing [type]                   Print an empty descriptor (default type: Thing)
    check <page> [section]...      Check hasPart/isPartOf agreement (exit 2 if not)
    help                           Show this help message

ENVIRONMENT:
    WIKIGRAPH_PRETTY=1             Pretty-print JSON output
    WIKIGRAPH_LOG=<filter>         Log filter when RUST_LOG is unset (default: warn)

EXAMPLES:
    wikigraph page earth.json
    wikigraph check earth.json sec-1.json sec-2.json
"#
    );
}
