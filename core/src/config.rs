//! Operator configuration
//!
//! Four operator-supplied parameters drive a run: portal credentials, the
//! item id of the feature service, and where the lookup workbook lives.
//! Loaded from a YAML file; the password may instead come from the
//! `FIELDSHEETS_PASSWORD` environment variable so it never has to be
//! written to disk.

use crate::error::{FieldSheetsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no password is configured
pub const PASSWORD_ENV_VAR: &str = "FIELDSHEETS_PASSWORD";

fn default_portal_url() -> String {
    "https://www.arcgis.com".to_string()
}

/// Operator configuration for one curation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSheetsConfig {
    /// Portal to authenticate against
    #[serde(default = "default_portal_url")]
    pub portal_url: String,

    /// Portal username
    pub username: String,

    /// Portal password. Prefer `FIELDSHEETS_PASSWORD` over storing it here.
    #[serde(default)]
    pub password: Option<String>,

    /// Item id of the hosted feature service
    pub item_id: String,

    /// Folder the lookup workbook is written to and read from
    pub output_folder: PathBuf,

    /// Workbook file name, e.g. `parcels_fields.xlsx`
    pub file_name: String,
}

impl FieldSheetsConfig {
    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| FieldSheetsError::config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), item = %config.item_id, "loaded configuration");
        Ok(config)
    }

    /// Check the parts of the configuration a run cannot proceed without
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(FieldSheetsError::config("username must not be empty"));
        }
        if self.item_id.trim().is_empty() {
            return Err(FieldSheetsError::config("item_id must not be empty"));
        }
        if self.file_name.trim().is_empty() {
            return Err(FieldSheetsError::config("file_name must not be empty"));
        }
        if !self.file_name.ends_with(".xlsx") {
            return Err(FieldSheetsError::config(format!(
                "file_name must end with .xlsx, got '{}'",
                self.file_name
            )));
        }
        Ok(())
    }

    /// Resolve the password from the configuration or the environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error when neither source provides one.
    pub fn resolve_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        std::env::var(PASSWORD_ENV_VAR).map_err(|_| {
            FieldSheetsError::config(format!(
                "no password configured and {PASSWORD_ENV_VAR} is not set"
            ))
        })
    }

    /// Full path of the lookup workbook
    #[must_use]
    pub fn workbook_path(&self) -> PathBuf {
        self.output_folder.join(&self.file_name)
    }
}
