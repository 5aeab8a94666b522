//! # fieldsheets Core
//!
//! Core types for staging hosted feature service field metadata in an
//! editable lookup workbook and pushing edits back to the service.
//!
//! This crate provides the building blocks shared by the extraction and
//! update passes: the field/layer data model, the description payload
//! encoding, lookup sheet naming rules, configuration, and error handling.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types for fieldsheets operations
pub mod error;

/// Field, layer and lookup-row type definitions
pub mod types;

/// Operator configuration
pub mod config;

/// Commonly used re-exports
pub mod prelude;
