//! # scheming-core — Foundational Types for Schema Matching
//!
//! This crate defines the building blocks that the matching engine in
//! `scheming-engine` compiles into matchers. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Schemas are plain trees.** A [`Schema`] is an explicit enum with no
//!    cycles. Schema documents authored as JSON convert losslessly through
//!    `From<serde_json::Value>`.
//!
//! 2. **Operators live in strings.** Wildcards, optional keys, and sibling
//!    references are encoded in key and value strings and recovered by the
//!    [`token`] recognizer. Nothing else in the schema is special.
//!
//! 3. **Predicates are values.** A capability is an `Arc<dyn Fn>` so that a
//!    compiled matcher owns everything it needs and is `Send + Sync`.
//!
//! 4. **Tagged composition.** Composer chains are a distinct type
//!    ([`ComposerChain`]), never a function carrying a marker flag.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `scheming-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests. The single `.expect()` is
//!   on compiling the operator regex table in [`token`], whose patterns are
//!   string literals; a failure there is a build defect, not a runtime
//!   condition, and is caught by the token tests.

pub mod compose;
pub mod error;
pub mod logic;
pub mod predicates;
pub mod schema;
pub mod token;

// Re-export primary types for ergonomic imports.
pub use compose::{compose, ComposerChain, Step};
pub use error::{ComposeError, SchemaError};
pub use logic::Glue;
pub use predicates::{deep_equal, is_subset, predicate, Predicate};
pub use schema::Schema;
pub use token::{recognize, Token, TokenKind};
