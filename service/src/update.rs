//! Lookup workbook consumption and definition updates (pass two)
//!
//! Reads the operator-edited workbook back, matches each sheet to a layer
//! by the trailing digits of the sheet name, matches rows to remote
//! fields by name, and submits one definition update per layer. Remote
//! fields without a lookup row are left untouched. Each layer's
//! submission is individually guarded so one rejection cannot abort the
//! rest of the batch; the caller receives a per-layer outcome summary.

use crate::portal::{LayerSummary, PortalClient};
use calamine::{Data, Reader, Xlsx};
use fieldsheets_core::error::{FieldSheetsError, Result};
use fieldsheets_core::types::{
    layer_id_from_sheet_name, DescriptionPayload, FieldDefinition, LookupRow,
};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// One sheet of the lookup workbook
#[derive(Debug, Clone)]
pub struct LookupSheet {
    /// Sheet name as stored in the workbook
    pub name: String,
    /// Layer id recovered from the sheet name's trailing digits, if any
    pub layer_id: Option<u32>,
    /// Data rows, header excluded, in sheet order
    pub rows: Vec<LookupRow>,
}

/// Outcome of one layer's definition update
#[derive(Debug, Clone)]
pub struct LayerOutcome {
    /// Layer id
    pub layer_id: u32,
    /// Layer name
    pub layer_name: String,
    /// Number of field definitions carried in the update
    pub fields_updated: usize,
    /// Rejection message when the submission failed
    pub error: Option<String>,
}

impl LayerOutcome {
    /// Whether the layer's update was accepted
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Load every sheet of the lookup workbook
///
/// Sheets whose names carry no trailing layer id are still returned (with
/// `layer_id: None`) so the caller can report them; they are never
/// matched to a layer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid
/// workbook.
pub fn load_workbook(path: &Path) -> Result<Vec<LookupSheet>> {
    let file_bytes = std::fs::read(path)?;
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(file_bytes))
        .map_err(|e| FieldSheetsError::parse(format!("Excel file: {e}")))?;

    let mut sheets = Vec::new();
    for sheet_name in workbook.sheet_names().to_vec() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| FieldSheetsError::parse_at(format!("sheet: {e}"), sheet_name.clone()))?;

        let layer_id = layer_id_from_sheet_name(&sheet_name);
        if layer_id.is_none() {
            warn!(sheet = %sheet_name, "sheet name has no trailing layer id; it will be skipped");
        }

        let rows: Vec<LookupRow> = range
            .rows()
            .skip(1)
            .map(row_from_cells)
            .filter(|row| !row.field.is_empty())
            .collect();

        debug!(sheet = %sheet_name, rows = rows.len(), "loaded lookup sheet");
        sheets.push(LookupSheet {
            name: sheet_name,
            layer_id,
            rows,
        });
    }

    Ok(sheets)
}

fn row_from_cells(cells: &[Data]) -> LookupRow {
    LookupRow {
        field: cell_text(cells, 0),
        alias: cell_text(cells, 1),
        description: cell_text(cells, 2),
        value_type: cell_text(cells, 3),
    }
}

fn cell_text(cells: &[Data], index: usize) -> String {
    cells.get(index).map(data_to_string).unwrap_or_default()
}

fn data_to_string(data: &Data) -> String {
    match data {
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::String(s) => s.trim().to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{dt:?}"),
        Data::DateTimeIso(dt) => dt.to_string(),
        Data::DurationIso(d) => d.to_string(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

/// Build the update set for one layer: every remote field with a matching
/// lookup row (first match by field name wins), carrying the sheet's
/// alias verbatim and a re-encoded description payload. Remote fields
/// without a row are absent from the result.
///
/// # Errors
///
/// Returns an error if a description payload cannot be encoded.
pub fn plan_layer_update(
    rows: &[LookupRow],
    remote_fields: &[FieldDefinition],
) -> Result<Vec<FieldDefinition>> {
    let mut updates = Vec::with_capacity(remote_fields.len());

    for field in remote_fields {
        let Some(row) = rows.iter().find(|r| r.field == field.name) else {
            debug!(field = %field.name, "no lookup row; leaving untouched");
            continue;
        };

        let payload =
            DescriptionPayload::new(row.description.clone(), row.value_type.clone()).encode()?;

        let mut updated = field.clone();
        updated.alias = Some(row.alias.clone());
        updated.description = Some(payload);

        info!(
            field = %field.name,
            alias = %row.alias,
            description = %row.description,
            value_type = %row.value_type,
            "staged field update"
        );
        updates.push(updated);
    }

    Ok(updates)
}

/// Apply every sheet of a loaded workbook to the service, one guarded
/// definition update per matched layer.
///
/// Sheets without a layer id and sheets matching no layer are skipped.
/// A rejected submission is captured in that layer's outcome instead of
/// aborting the batch.
///
/// # Errors
///
/// Returns an error only when the service's layer list cannot be
/// fetched; per-layer failures are reported through the outcomes.
pub async fn apply_workbook(
    client: &PortalClient,
    service_url: &str,
    sheets: &[LookupSheet],
) -> Result<Vec<LayerOutcome>> {
    let layers = client.layers(service_url).await?;
    let mut outcomes = Vec::new();

    for sheet in sheets {
        let Some(layer_id) = sheet.layer_id else {
            warn!(sheet = %sheet.name, "skipping sheet without a trailing layer id");
            continue;
        };
        let Some(layer) = layers.iter().find(|l| l.id == layer_id) else {
            warn!(sheet = %sheet.name, layer_id, "no layer with this id on the service; skipping");
            continue;
        };

        info!(layer = %layer.name, layer_id, "updating layer");
        let outcome = match apply_sheet(client, service_url, layer, &sheet.rows).await {
            Ok(count) => LayerOutcome {
                layer_id,
                layer_name: layer.name.clone(),
                fields_updated: count,
                error: None,
            },
            Err(e) => {
                error!(layer = %layer.name, error = %e, "definition update failed");
                LayerOutcome {
                    layer_id,
                    layer_name: layer.name.clone(),
                    fields_updated: 0,
                    error: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

async fn apply_sheet(
    client: &PortalClient,
    service_url: &str,
    layer: &LayerSummary,
    rows: &[LookupRow],
) -> Result<usize> {
    let definition = client.layer_definition(service_url, layer.id).await?;
    let updates = plan_layer_update(rows, &definition.fields)?;

    if updates.is_empty() {
        info!(layer = %layer.name, "no lookup rows matched; nothing to submit");
        return Ok(0);
    }

    client
        .update_definition(service_url, layer.id, &updates)
        .await?;
    Ok(updates.len())
}
