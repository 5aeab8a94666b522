//! Integration tests for the lookup workbook
//!
//! Exercises the full staging path: layer definitions written with the
//! generator, read back with the updater's loader, and planned into a
//! definition update set.

use fieldsheets::extract::LookupGenerator;
use fieldsheets::update::{load_workbook, plan_layer_update};
use fieldsheets_core::prelude::*;
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn field(name: &str, field_type: &str, alias: Option<&str>, description: Option<&str>) -> FieldDefinition {
    FieldDefinition {
        name: name.to_string(),
        field_type: field_type.to_string(),
        alias: alias.map(str::to_string),
        description: description.map(str::to_string),
        extra: serde_json::Map::new(),
    }
}

fn sample_layers() -> Vec<LayerDefinition> {
    vec![
        LayerDefinition {
            id: 0,
            name: "Parcels".to_string(),
            fields: vec![
                field("OBJECTID", "esriFieldTypeOID", None, None),
                field("ElevFld", "esriFieldTypeDouble", Some("Elevation"), None),
                field(
                    "Pop2020",
                    "esriFieldTypeInteger",
                    Some("Population (2020)"),
                    Some(r#"{"value":"Total residents","fieldValueType":"countOrAmount"}"#),
                ),
            ],
        },
        LayerDefinition {
            id: 3,
            name: "A layer with a very long descriptive name".to_string(),
            fields: vec![field("Name", "esriFieldTypeString", Some("Name"), None)],
        },
    ]
}

#[test]
fn generated_workbook_loads_back_sheet_per_layer() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("fields.xlsx");

    LookupGenerator::new()
        .generate_file(&sample_layers(), &path)
        .expect("generates");

    let sheets = load_workbook(&path).expect("loads");
    assert_eq!(sheets.len(), 2);

    assert_eq!(sheets[0].name, "Parcels_0");
    assert_eq!(sheets[0].layer_id, Some(0));
    assert_eq!(sheets[1].name, "A layer with a very long des_3");
    assert_eq!(sheets[1].layer_id, Some(3));

    assert_eq!(
        sheets[0].rows,
        vec![
            LookupRow {
                field: "OBJECTID".to_string(),
                alias: String::new(),
                description: String::new(),
                value_type: String::new(),
            },
            LookupRow {
                field: "ElevFld".to_string(),
                alias: "Elevation".to_string(),
                description: String::new(),
                value_type: "Choose a value type from this list: percentageOrRatio, measurement, currency, coordinate, countOrAmount, uniqueIdentifier".to_string(),
            },
            LookupRow {
                field: "Pop2020".to_string(),
                alias: "Population (2020)".to_string(),
                description: "Total residents".to_string(),
                value_type: "countOrAmount".to_string(),
            },
        ]
    );
}

#[test]
fn extraction_is_idempotent_against_an_unchanged_service() {
    let dir = TempDir::new().expect("tempdir");
    let first = dir.path().join("first.xlsx");
    let second = dir.path().join("second.xlsx");

    let generator = LookupGenerator::new();
    generator.generate_file(&sample_layers(), &first).expect("generates");
    generator.generate_file(&sample_layers(), &second).expect("generates");

    let first_sheets = load_workbook(&first).expect("loads");
    let second_sheets = load_workbook(&second).expect("loads");
    for (a, b) in first_sheets.iter().zip(&second_sheets) {
        assert_eq!(a.rows, b.rows);
    }
}

#[test]
fn sheet_without_trailing_digits_is_loadable_but_unmatched() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("odd.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Notes").expect("names");
    sheet.write(0, 0, "field").expect("writes");
    sheet.write(1, 0, "Pop2020").expect("writes");
    workbook.save(&path).expect("saves");

    let sheets = load_workbook(&path).expect("loads");
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].layer_id, None);
    assert_eq!(sheets[0].rows.len(), 1);
}

#[test]
fn edited_rows_plan_into_the_expected_update_set() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("fields.xlsx");

    LookupGenerator::new()
        .generate_file(&sample_layers(), &path)
        .expect("generates");
    let sheets = load_workbook(&path).expect("loads");

    let remote_fields = sample_layers()[0].fields.clone();
    let updates = plan_layer_update(&sheets[0].rows, &remote_fields).expect("plans");

    // Every remote field had a row, so every field is in the update set.
    assert_eq!(updates.len(), 3);
    assert_eq!(
        updates[2].description.as_deref(),
        Some(r#"{"value":"Total residents","fieldValueType":"countOrAmount"}"#)
    );
    // OBJECTID stays untyped and undescribed.
    assert_eq!(
        updates[0].description.as_deref(),
        Some(r#"{"value":"","fieldValueType":""}"#)
    );
}
