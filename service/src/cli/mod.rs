//! Command-line interface for fieldsheets
//!
//! The two passes are separate subcommands rather than one interactive
//! session: `extract` stages the lookup workbook and stops, `update`
//! pushes the edited workbook back and is gated by an explicit
//! `--confirm` flag, and `run` chains both (updating only when
//! `--confirm` was given). This keeps automated invocations from
//! blocking on a prompt while preserving the extract-before-update
//! ordering.

mod app;
mod types;

pub use app::FieldSheetsApp;
pub use types::{FieldSheetsCli, FieldSheetsCommand};

/// Main entry point for the CLI
///
/// # Errors
/// Returns error if command execution fails or encounters invalid arguments.
pub async fn run() -> fieldsheets_core::error::Result<()> {
    let app = FieldSheetsApp::from_args();
    app.run().await
}
