use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sales-tracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sales tracker: editable sales table, totals and REST API",
    long_about = None
)]
pub struct Cli {
    /// Config file to load instead of SALES_TRACKER_CONFIG / sales_tracker.yaml
    #[arg(global = true, long = "config")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Print an Argon2 hash to paste into a staff account's password_hash
    HashPassword { password: String },
}
