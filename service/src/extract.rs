//! Lookup workbook generation (pass one)
//!
//! Projects every layer's field definitions into editable lookup rows and
//! writes them as one workbook, one sheet per layer. The target file is
//! overwritten whole on each run.
//!
//! Row building is pure: prior descriptions and value types stored on the
//! service are carried into the sheet, system/geometry fields never get a
//! value type, and everything else falls back to the classifier. A stored
//! description that fails to parse is treated as "no prior
//! classification" but logged, since it is indistinguishable from a blank
//! description in the sheet itself.

use crate::classifier::classify;
use fieldsheets_core::error::{FieldSheetsError, Result};
use fieldsheets_core::types::{
    is_system_field, sheet_name, FieldDefinition, LayerDefinition, LookupRow, StoredDescription,
    LOOKUP_HEADER,
};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;
use tracing::{info, warn};

fn workbook_error(e: XlsxError) -> FieldSheetsError {
    FieldSheetsError::other(format!("Failed to write Excel workbook: {e}"))
}

/// Generator for the lookup workbook
#[derive(Debug, Clone, Default)]
pub struct LookupGenerator;

impl LookupGenerator {
    /// Create a new generator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the lookup row for one field
    #[must_use]
    pub fn build_row(&self, field: &FieldDefinition) -> LookupRow {
        let stored = field.stored_description();
        if stored == StoredDescription::Malformed {
            warn!(
                field = %field.name,
                "stored description is not a parseable payload; treating as no prior classification"
            );
        }

        let description = match &stored {
            StoredDescription::Payload(payload) => payload.value.clone(),
            _ => String::new(),
        };

        let value_type = if is_system_field(&field.name) {
            String::new()
        } else {
            match &stored {
                StoredDescription::Payload(payload) => payload.field_value_type.clone(),
                _ => classify(&field.field_type).render(),
            }
        };

        LookupRow {
            field: field.name.clone(),
            alias: field.alias.clone().unwrap_or_default(),
            description,
            value_type,
        }
    }

    /// Build the lookup rows for one layer, in remote field order
    #[must_use]
    pub fn build_rows(&self, layer: &LayerDefinition) -> Vec<LookupRow> {
        layer.fields.iter().map(|f| self.build_row(f)).collect()
    }

    /// Write one sheet per layer to `output_path`, overwriting any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if a sheet cannot be written or the file cannot
    /// be saved.
    pub fn generate_file(&self, layers: &[LayerDefinition], output_path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for layer in layers {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name(sheet_name(&layer.name, layer.id))
                .map_err(workbook_error)?;

            for (col, header) in LOOKUP_HEADER.iter().enumerate() {
                sheet
                    .write_with_format(0, col as u16, *header, &header_format)
                    .map_err(workbook_error)?;
            }

            let rows = self.build_rows(layer);
            for (i, row) in rows.iter().enumerate() {
                let r = (i + 1) as u32;
                sheet.write(r, 0, &row.field).map_err(workbook_error)?;
                sheet.write(r, 1, &row.alias).map_err(workbook_error)?;
                sheet.write(r, 2, &row.description).map_err(workbook_error)?;
                sheet.write(r, 3, &row.value_type).map_err(workbook_error)?;
            }

            info!(
                layer = %layer.name,
                sheet = %sheet_name(&layer.name, layer.id),
                fields = rows.len(),
                "wrote lookup sheet"
            );
        }

        workbook.save(output_path).map_err(|e| FieldSheetsError::Other {
            message: format!("Failed to save Excel file: {e}"),
            source: None,
        })?;

        info!(path = %output_path.display(), "saved lookup workbook");
        Ok(())
    }
}
