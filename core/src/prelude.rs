//! Commonly used re-exports

pub use crate::config::FieldSheetsConfig;
pub use crate::error::{FieldSheetsError, Result};
pub use crate::types::{
    DescriptionPayload, FieldDefinition, LayerDefinition, LookupRow, StoredDescription,
    ValueTypeCategory, is_system_field, layer_id_from_sheet_name, sheet_name, LOOKUP_HEADER,
    SYSTEM_FIELDS,
};
