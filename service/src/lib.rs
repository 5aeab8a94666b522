//! # fieldsheets
//!
//! Two-pass curation of hosted feature service field metadata.
//!
//! The **extract** pass reads every layer's field definitions from a
//! feature service, classifies each field's semantic value type, and
//! stages the result as one editable Excel workbook (one sheet per
//! layer). After the operator edits aliases, descriptions and value
//! types in place, the **update** pass reads the workbook back and
//! submits a definition update per layer.
//!
//! Control flows one way: remote service → lookup workbook →
//! (manual edit) → remote service. The workbook is the sole
//! persistence layer between the two passes.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Esri field type to value type classification
pub mod classifier;

/// Command-line interface
pub mod cli;

/// Lookup workbook generation (pass one)
pub mod extract;

/// Portal REST client
pub mod portal;

/// Lookup workbook consumption and definition updates (pass two)
pub mod update;
