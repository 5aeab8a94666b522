//! fieldsheets command-line interface
//!
//! This binary provides the `fieldsheets` command-line tool for staging
//! feature service field metadata in an editable lookup workbook and
//! pushing operator edits back to the service.

use fieldsheets::cli;
use fieldsheets_core::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
