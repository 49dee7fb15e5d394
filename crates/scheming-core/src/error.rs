//! # Error Types
//!
//! Errors raised while building matchers. A candidate value that simply does
//! not conform to a schema is never an error: matchers report that as
//! `false`. The types here describe schemas and composer chains that cannot
//! be turned into a matcher at all.

use thiserror::Error;

/// Error raised when a composer chain or predicate list is unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// A composer chain was built or evaluated before any step was registered.
    #[error("composer chain has no steps registered")]
    NotInitialized,

    /// A predicate list with no entries was handed to a glue fold.
    #[error("cannot compose an empty predicate list")]
    EmptyList,
}

/// Error raised when a schema cannot be compiled into a matcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// An object schema declared more than one `**` catch-all key.
    #[error("object schema declares {count} catch-all (`**`) keys; at most one is permitted")]
    MultipleCatchAll {
        /// Number of catch-all keys found in the object schema.
        count: usize,
    },

    /// A composer chain embedded in the schema could not be built.
    #[error("composer chain in schema is unusable: {0}")]
    Compose(#[from] ComposeError),
}
