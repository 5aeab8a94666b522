//! Esri field type to value type classification
//!
//! A static, stateless table. Identifier and date/time types resolve to a
//! single category; string, integer and floating-point types are
//! ambiguous and yield a suggestion list for the operator to pick from.
//! Unrecognized tags classify as unknown, which renders empty — a valid
//! terminal case, not an error.

use fieldsheets_core::types::ValueTypeCategory;

/// Candidate categories for string-like fields
const STRING_CANDIDATES: &[ValueTypeCategory] = &[
    ValueTypeCategory::NameOrTitle,
    ValueTypeCategory::Description,
    ValueTypeCategory::TypeOrCategory,
    ValueTypeCategory::LocationOrPlaceName,
    ValueTypeCategory::PhoneNumber,
    ValueTypeCategory::EmailAddress,
    ValueTypeCategory::UniqueIdentifier,
    ValueTypeCategory::DateAndTime,
];

/// Candidate categories for integer fields
const INTEGER_CANDIDATES: &[ValueTypeCategory] = &[
    ValueTypeCategory::CountOrAmount,
    ValueTypeCategory::OrderedOrRanked,
    ValueTypeCategory::Binary,
    ValueTypeCategory::UniqueIdentifier,
];

/// Candidate categories for floating-point fields
const FLOAT_CANDIDATES: &[ValueTypeCategory] = &[
    ValueTypeCategory::PercentageOrRatio,
    ValueTypeCategory::Measurement,
    ValueTypeCategory::Currency,
    ValueTypeCategory::Coordinate,
    ValueTypeCategory::CountOrAmount,
    ValueTypeCategory::UniqueIdentifier,
];

/// Every Esri field type tag the classifier recognizes
pub const SUPPORTED_TAGS: [&str; 14] = [
    "esriFieldTypeString",
    "esriFieldTypeXML",
    "esriFieldTypeBigInteger",
    "esriFieldTypeInteger",
    "esriFieldTypeSmallInteger",
    "esriFieldTypeDouble",
    "esriFieldTypeSingle",
    "esriFieldTypeGUID",
    "esriFieldTypeOID",
    "esriFieldTypeGlobalID",
    "esriFieldTypeDate",
    "esriFieldTypeDateOnly",
    "esriFieldTypeTimeOnly",
    "esriFieldTypeTimestampOffset",
];

/// Result of classifying an Esri field type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The type maps to exactly one category
    Resolved(ValueTypeCategory),
    /// The type is ambiguous; the operator picks from these candidates
    Suggestions(&'static [ValueTypeCategory]),
    /// Unrecognized or unsupported tag
    Unknown,
}

impl Classification {
    /// Render the classification as the lookup sheet's `type` cell:
    /// the category name, a suggestion prompt, or the empty string.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Resolved(category) => category.to_string(),
            Self::Suggestions(candidates) => {
                let list = candidates
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Choose a value type from this list: {list}")
            }
            Self::Unknown => String::new(),
        }
    }

    /// Whether the tag was unrecognized
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// Classify an Esri field type tag
#[must_use]
pub fn classify(esri_type: &str) -> Classification {
    match esri_type {
        "esriFieldTypeString" | "esriFieldTypeXML" => Classification::Suggestions(STRING_CANDIDATES),
        "esriFieldTypeBigInteger" | "esriFieldTypeInteger" | "esriFieldTypeSmallInteger" => {
            Classification::Suggestions(INTEGER_CANDIDATES)
        }
        "esriFieldTypeDouble" | "esriFieldTypeSingle" => {
            Classification::Suggestions(FLOAT_CANDIDATES)
        }
        "esriFieldTypeGUID" | "esriFieldTypeOID" | "esriFieldTypeGlobalID" => {
            Classification::Resolved(ValueTypeCategory::UniqueIdentifier)
        }
        "esriFieldTypeDate"
        | "esriFieldTypeDateOnly"
        | "esriFieldTypeTimeOnly"
        | "esriFieldTypeTimestampOffset" => Classification::Resolved(ValueTypeCategory::DateAndTime),
        _ => Classification::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_supported_tag_classifies_non_empty() {
        for tag in SUPPORTED_TAGS {
            let classification = classify(tag);
            assert!(!classification.is_unknown(), "{tag} should be recognized");
            assert!(!classification.render().is_empty(), "{tag} should render");
        }
    }

    #[test]
    fn unknown_tags_render_empty() {
        assert_eq!(classify("esriFieldTypeGeometry").render(), "");
        assert_eq!(classify("").render(), "");
    }

    #[test]
    fn identifier_types_resolve_uniquely() {
        for tag in ["esriFieldTypeGUID", "esriFieldTypeOID", "esriFieldTypeGlobalID"] {
            assert_eq!(classify(tag).render(), "uniqueIdentifier");
        }
    }

    #[test]
    fn date_types_resolve_uniquely() {
        for tag in [
            "esriFieldTypeDate",
            "esriFieldTypeDateOnly",
            "esriFieldTypeTimeOnly",
            "esriFieldTypeTimestampOffset",
        ] {
            assert_eq!(classify(tag).render(), "dateAndTime");
        }
    }

    #[test]
    fn double_renders_float_suggestion_list() {
        assert_eq!(
            classify("esriFieldTypeDouble").render(),
            "Choose a value type from this list: percentageOrRatio, measurement, currency, coordinate, countOrAmount, uniqueIdentifier"
        );
    }

    #[test]
    fn string_renders_string_suggestion_list() {
        assert_eq!(
            classify("esriFieldTypeString").render(),
            "Choose a value type from this list: nameOrTitle, description, typeOrCategory, locationOrPlaceName, phoneNumber, emailAddress, uniqueIdentifier, dateAndTime"
        );
    }

    #[test]
    fn small_integer_gets_integer_suggestions() {
        assert_eq!(
            classify("esriFieldTypeSmallInteger").render(),
            "Choose a value type from this list: countOrAmount, orderedOrRanked, binary, uniqueIdentifier"
        );
    }
}
