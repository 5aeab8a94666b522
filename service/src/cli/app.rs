//! fieldsheets CLI application

use super::types::{FieldSheetsCli, FieldSheetsCommand};
use crate::extract::LookupGenerator;
use crate::portal::PortalClient;
use crate::update::{apply_workbook, load_workbook};
use clap::Parser;
use fieldsheets_core::config::FieldSheetsConfig;
use fieldsheets_core::error::{FieldSheetsError, Result};
use tracing::{error, info};

/// Main fieldsheets CLI application
pub struct FieldSheetsApp {
    cli: FieldSheetsCli,
}

impl FieldSheetsApp {
    /// Create a new application from command line arguments
    #[must_use]
    pub fn from_args() -> Self {
        Self {
            cli: FieldSheetsCli::parse(),
        }
    }

    /// Create a new application with custom CLI configuration
    #[must_use]
    pub fn new(cli: FieldSheetsCli) -> Self {
        Self { cli }
    }

    /// Run the application
    ///
    /// # Errors
    ///
    /// Returns error if command execution fails.
    pub async fn run(self) -> Result<()> {
        self.init_logging();
        info!("Starting fieldsheets");

        match self.execute_command().await {
            Ok(()) => {
                info!("Command completed successfully");
                Ok(())
            }
            Err(err) => {
                error!("Command failed: {}", err);
                if !self.cli.quiet {
                    eprintln!("Error: {err}");
                }
                Err(err)
            }
        }
    }

    /// Configure tracing subscriber based on CLI flags
    fn init_logging(&self) {
        if self.cli.quiet {
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::ERROR)
                .with_target(false)
                .init();
        } else if self.cli.verbose {
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::DEBUG)
                .with_target(false)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::INFO)
                .with_target(false)
                .init();
        }
    }

    async fn execute_command(&self) -> Result<()> {
        let config = FieldSheetsConfig::load(&self.cli.config)?;

        match &self.cli.command {
            FieldSheetsCommand::Extract => self.extract(&config).await,
            FieldSheetsCommand::Update { confirm } => {
                if !*confirm {
                    return Err(FieldSheetsError::config(
                        "refusing to update without --confirm; review the lookup workbook, then rerun with --confirm",
                    ));
                }
                self.update(&config).await
            }
            FieldSheetsCommand::Run { confirm } => {
                self.extract(&config).await?;
                if *confirm {
                    self.update(&config).await
                } else {
                    println!(
                        "Extraction complete. Review and edit {} then rerun with --confirm to push the changes.",
                        config.workbook_path().display()
                    );
                    Ok(())
                }
            }
        }
    }

    /// Authenticate and resolve the configured item's feature service URL
    async fn connect(&self, config: &FieldSheetsConfig) -> Result<(PortalClient, String)> {
        let password = config.resolve_password()?;
        let client =
            PortalClient::connect(&config.portal_url, &config.username, &password).await?;

        let item = client.item(&config.item_id).await?;
        let service_url = item.url.ok_or_else(|| {
            FieldSheetsError::service(format!(
                "item '{}' ({}) has no service URL; is it a hosted feature service?",
                item.title, config.item_id
            ))
        })?;

        info!(item = %item.title, service = %service_url, "resolved feature service");
        Ok((client, service_url))
    }

    /// Pass one: stage every layer's field metadata in the workbook
    async fn extract(&self, config: &FieldSheetsConfig) -> Result<()> {
        let (client, service_url) = self.connect(config).await?;

        let summaries = client.layers(&service_url).await?;
        let mut layers = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            info!(layer = %summary.name, id = summary.id, "fetching layer definition");
            layers.push(client.layer_definition(&service_url, summary.id).await?);
        }

        std::fs::create_dir_all(&config.output_folder)?;
        LookupGenerator::new().generate_file(&layers, &config.workbook_path())?;

        if !self.cli.quiet {
            println!(
                "Saved lookup workbook for {} layer(s) to {}",
                layers.len(),
                config.workbook_path().display()
            );
        }
        Ok(())
    }

    /// Pass two: push the edited workbook back, one update per layer
    async fn update(&self, config: &FieldSheetsConfig) -> Result<()> {
        let (client, service_url) = self.connect(config).await?;

        let sheets = load_workbook(&config.workbook_path())?;
        let outcomes = apply_workbook(&client, &service_url, &sheets).await?;

        let mut failed = 0;
        for outcome in &outcomes {
            if outcome.succeeded() {
                println!(
                    "layer {} '{}': updated {} field(s)",
                    outcome.layer_id, outcome.layer_name, outcome.fields_updated
                );
            } else {
                failed += 1;
                println!(
                    "layer {} '{}': FAILED - {}",
                    outcome.layer_id,
                    outcome.layer_name,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        if failed > 0 {
            Err(FieldSheetsError::service(format!(
                "{failed} of {} layer update(s) failed",
                outcomes.len()
            )))
        } else {
            println!("Finished updating all matched layers.");
            Ok(())
        }
    }
}
