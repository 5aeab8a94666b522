//! Type definitions for feature service field metadata
//!
//! Models the remote side (layers and their field definitions, as returned
//! by the feature service REST API) and the staged side (lookup rows and
//! the sheet naming scheme of the editable workbook), plus the JSON
//! description payload that carries the human-readable description and the
//! semantic value type classification on each field.

use crate::error::{FieldSheetsError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic classification of what kind of real-world quantity a field
/// holds. The closed set understood by the portal's `fieldValueType` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueTypeCategory {
    NameOrTitle,
    Description,
    TypeOrCategory,
    LocationOrPlaceName,
    PhoneNumber,
    EmailAddress,
    UniqueIdentifier,
    DateAndTime,
    CountOrAmount,
    OrderedOrRanked,
    Binary,
    PercentageOrRatio,
    Measurement,
    Currency,
    Coordinate,
}

impl ValueTypeCategory {
    /// The portal-side spelling of this category
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameOrTitle => "nameOrTitle",
            Self::Description => "description",
            Self::TypeOrCategory => "typeOrCategory",
            Self::LocationOrPlaceName => "locationOrPlaceName",
            Self::PhoneNumber => "phoneNumber",
            Self::EmailAddress => "emailAddress",
            Self::UniqueIdentifier => "uniqueIdentifier",
            Self::DateAndTime => "dateAndTime",
            Self::CountOrAmount => "countOrAmount",
            Self::OrderedOrRanked => "orderedOrRanked",
            Self::Binary => "binary",
            Self::PercentageOrRatio => "percentageOrRatio",
            Self::Measurement => "measurement",
            Self::Currency => "currency",
            Self::Coordinate => "coordinate",
        }
    }
}

impl fmt::Display for ValueTypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured payload stored in a field's `description` property.
///
/// The portal stores this as a JSON string embedded inside the field
/// definition, e.g. `{"value":"Total residents","fieldValueType":"countOrAmount"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionPayload {
    /// Human-readable field description
    #[serde(default)]
    pub value: String,

    /// Semantic value type classification
    #[serde(rename = "fieldValueType", default)]
    pub field_value_type: String,
}

impl DescriptionPayload {
    /// Create a payload from the lookup sheet's description and type cells
    #[must_use]
    pub fn new(value: impl Into<String>, field_value_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            field_value_type: field_value_type.into(),
        }
    }

    /// Serialize the payload to the JSON string stored on the field.
    ///
    /// Quotes and other special characters in either component are escaped
    /// by the serializer, so operator-entered text cannot corrupt the
    /// payload.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if JSON encoding fails.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| FieldSheetsError::serialization(format!("description payload: {e}")))
    }
}

/// Outcome of inspecting a field's stored `description` property.
///
/// `Malformed` is deliberately distinct from `Absent`: both fall back to
/// "no prior classification" during extraction, but a malformed payload is
/// a data-quality signal the operator should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredDescription {
    /// The field has no description, or a blank one
    Absent,
    /// The description exists but is not a parseable payload
    Malformed,
    /// A parsed payload
    Payload(DescriptionPayload),
}

impl StoredDescription {
    /// Inspect a field's raw stored description
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Absent;
        };
        if raw.trim().is_empty() {
            return Self::Absent;
        }
        match serde_json::from_str::<DescriptionPayload>(raw) {
            Ok(payload) => Self::Payload(payload),
            Err(_) => Self::Malformed,
        }
    }
}

/// A field definition as returned by the feature service REST API.
///
/// Properties beyond the ones this tool touches are preserved verbatim in
/// `extra` so an update round-trips the full definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Internal field name, unique within a layer
    pub name: String,

    /// Esri field type tag, e.g. `esriFieldTypeString`
    #[serde(rename = "type", default)]
    pub field_type: String,

    /// Human-readable display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Stored description payload (a JSON string), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// All remaining field properties, carried through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FieldDefinition {
    /// Inspect this field's stored description
    #[must_use]
    pub fn stored_description(&self) -> StoredDescription {
        StoredDescription::parse(self.description.as_deref())
    }
}

/// A layer definition: name, numeric id and ordered field collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDefinition {
    /// Layer id, unique within the service
    pub id: u32,

    /// Layer name
    pub name: String,

    /// Field definitions in remote order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// Header row of every lookup sheet
pub const LOOKUP_HEADER: [&str; 4] = ["field", "alias", "description", "type"];

/// One editable row of the lookup workbook, a flattened projection of a
/// field plus its resolved or candidate value type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRow {
    /// Internal field name (the match key during update)
    pub field: String,
    /// Display alias, possibly empty
    pub alias: String,
    /// Human-readable description, possibly empty
    pub description: String,
    /// Resolved value type or suggestion text, possibly empty
    pub value_type: String,
}

/// System and geometry maintenance fields that never receive a value type
pub const SYSTEM_FIELDS: [&str; 6] = [
    "Shape__Area",
    "Shape__Length",
    "SHAPE__Area",
    "SHAPE__Length",
    "OBJECTID",
    "FID",
];

/// Whether a field name is one of the well-known system/geometry fields
#[must_use]
pub fn is_system_field(name: &str) -> bool {
    SYSTEM_FIELDS.contains(&name)
}

/// Longest layer-name prefix usable in a sheet name. Sheet names are
/// capped at 31 characters by the workbook format; the trailing `_<id>`
/// must always fit.
pub const SHEET_NAME_PREFIX_LEN: usize = 28;

static TRAILING_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)$").expect("trailing digits pattern is valid"));

/// Derive the lookup sheet name for a layer: the layer name truncated to
/// 28 characters, an underscore, then the layer id
#[must_use]
pub fn sheet_name(layer_name: &str, layer_id: u32) -> String {
    let prefix: String = layer_name.chars().take(SHEET_NAME_PREFIX_LEN).collect();
    format!("{prefix}_{layer_id}")
}

/// Recover the layer id from a sheet name's trailing digits.
///
/// Returns `None` when the name carries no trailing digits or the digits
/// overflow a `u32`; callers skip such sheets rather than fail.
#[must_use]
pub fn layer_id_from_sheet_name(name: &str) -> Option<u32> {
    TRAILING_DIGITS
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn payload_encodes_exact_wire_format() {
        let payload = DescriptionPayload::new("Total residents", "countOrAmount");
        assert_eq!(
            payload.encode().expect("encodes"),
            r#"{"value":"Total residents","fieldValueType":"countOrAmount"}"#
        );
    }

    #[test]
    fn payload_escapes_embedded_quotes() {
        let payload = DescriptionPayload::new(r#"height in "feet""#, "measurement");
        let encoded = payload.encode().expect("encodes");
        let decoded: DescriptionPayload = serde_json::from_str(&encoded).expect("round-trips");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn stored_description_distinguishes_absent_and_malformed() {
        assert_eq!(StoredDescription::parse(None), StoredDescription::Absent);
        assert_eq!(StoredDescription::parse(Some("  ")), StoredDescription::Absent);
        assert_eq!(
            StoredDescription::parse(Some("not a payload")),
            StoredDescription::Malformed
        );
        assert_eq!(
            StoredDescription::parse(Some(r#"{"value":"v","fieldValueType":"binary"}"#)),
            StoredDescription::Payload(DescriptionPayload::new("v", "binary"))
        );
    }

    #[test]
    fn stored_description_tolerates_missing_keys() {
        assert_eq!(
            StoredDescription::parse(Some(r#"{"value":"v"}"#)),
            StoredDescription::Payload(DescriptionPayload::new("v", ""))
        );
    }

    #[test]
    fn sheet_name_truncates_long_layer_names() {
        let name = sheet_name("A layer with a very long descriptive name", 12);
        assert_eq!(name, "A layer with a very long des_12");
        assert!(name.chars().count() <= 31);
    }

    #[test]
    fn sheet_name_keeps_short_names_whole() {
        assert_eq!(sheet_name("Parcels", 3), "Parcels_3");
    }

    #[test]
    fn layer_id_parses_trailing_digits() {
        assert_eq!(layer_id_from_sheet_name("Parcels_3"), Some(3));
        assert_eq!(layer_id_from_sheet_name("Roads 2024_10"), Some(10));
    }

    #[test]
    fn layer_id_absent_without_trailing_digits() {
        assert_eq!(layer_id_from_sheet_name("Notes"), None);
        assert_eq!(layer_id_from_sheet_name("Parcels_3x"), None);
    }

    #[test]
    fn system_fields_are_recognized() {
        for name in SYSTEM_FIELDS {
            assert!(is_system_field(name));
        }
        assert!(!is_system_field("Pop2020"));
    }

    #[test]
    fn field_definition_preserves_unknown_properties() {
        let raw = r#"{"name":"Pop2020","type":"esriFieldTypeInteger","alias":"Population","sqlType":"sqlTypeInteger","nullable":true}"#;
        let field: FieldDefinition = serde_json::from_str(raw).expect("parses");
        assert_eq!(field.name, "Pop2020");
        assert_eq!(field.extra.get("sqlType").and_then(|v| v.as_str()), Some("sqlTypeInteger"));
        let back = serde_json::to_value(&field).expect("serializes");
        assert_eq!(back.get("nullable"), Some(&serde_json::Value::Bool(true)));
    }
}
