//! # scheming-engine — Schema Compilation & Matching
//!
//! Compiles a [`Schema`] once into a reusable [`Matcher`], then answers
//! "does this JSON value conform?" with a plain boolean.
//!
//! ```
//! use scheming_core::{predicates, Schema};
//! use scheming_engine::compile;
//! use serde_json::json;
//!
//! let schema = Schema::object([
//!     ("price", Schema::capability(predicates::is_number)),
//!     ("salePrice", Schema::from("$price$")),
//!     ("(note)", Schema::capability(predicates::is_string)),
//! ]);
//! let matcher = compile(&schema).unwrap();
//!
//! assert!(matcher.matches(&json!({"price": 10, "salePrice": 10})));
//! assert!(!matcher.matches(&json!({"price": 10, "salePrice": 9})));
//! ```
//!
//! ## Entry Points
//!
//! - [`compile`] — dispatch any schema to its matcher.
//! - [`compose`] — build ad-hoc short-circuiting predicate chains
//!   (re-exported from `scheming-core`).
//!
//! ## Failure Model
//!
//! A candidate that does not conform yields `false`; the reason is logged
//! at `debug` through `tracing` and never changes the verdict. A schema that
//! cannot be compiled (two `**` keys in one object, an empty composer chain)
//! is a [`SchemaError`] from [`compile`].
//!
//! ## Crate Policy
//!
//! - Depends only on `scheming-core` internally.
//! - Compiled matchers are immutable, `Send + Sync`, and share no state
//!   across `compile` calls.

pub mod array;
pub mod compile;
pub mod dof;
pub mod matcher;
pub mod object;
pub mod sibling;

pub use array::ArrayMatcher;
pub use compile::{compile, compose_all};
pub use dof::{Claimed, DofError};
pub use matcher::Matcher;
pub use object::{Freedom, KeyRule, ObjectMatcher, Scope, Test};
pub use sibling::SiblingRef;

pub use scheming_core::{compose, ComposerChain, Schema, SchemaError};
