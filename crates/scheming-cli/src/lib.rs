//! # scheming-cli — Schema Matching from the Command Line
//!
//! Compiles a schema document (JSON or YAML) once and reports, for each
//! candidate document, whether it matches.
//!
//! ## Modules
//!
//! - `document` — loading JSON and YAML files as JSON values
//! - `check` — the check run and its report
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the check logic.
//! - Matching semantics live in `scheming-engine`; nothing here decides
//!   whether a value matches.

pub mod check;
pub mod document;
