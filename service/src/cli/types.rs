//! CLI type definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fieldsheets command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "fieldsheets",
    version,
    about = "Curate feature service field metadata through an editable lookup workbook"
)]
pub struct FieldSheetsCli {
    /// Configuration file path
    #[arg(short, long, default_value = "fieldsheets.yaml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: FieldSheetsCommand,
}

/// fieldsheets subcommands
#[derive(Subcommand, Debug)]
pub enum FieldSheetsCommand {
    /// Extract field metadata from the service into the lookup workbook
    Extract,

    /// Push the edited lookup workbook back to the service
    Update {
        /// Acknowledge that the workbook has been reviewed
        #[arg(long)]
        confirm: bool,
    },

    /// Extract, then update when --confirm is given
    Run {
        /// Proceed to the update pass after extraction
        #[arg(long)]
        confirm: bool,
    },
}
