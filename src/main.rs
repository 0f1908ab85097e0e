//! habityzer - command-line client for the Habityzer task management API
//!
//! Lists, shows, creates, updates, moves and deletes tasks of the configured
//! project, and lists the available statuses and projects.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

use colored::Colorize;

mod cli;
mod commands;

/// Main entry point for the habityzer CLI
#[tokio::main]
async fn main() {
    if let Err(err) = cli::run().await {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}
