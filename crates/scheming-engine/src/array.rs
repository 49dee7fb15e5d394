//! # Array Matcher
//!
//! An array schema `[S1, S2, ...]` means "every element satisfies S1 and
//! S2 and ...". It is a conjunction applied element-wise, not a positional
//! tuple: `[is_string, is_non_empty]` accepts `["a", "b"]`.
//!
//! An empty candidate array satisfies any array schema, since there is no
//! element to reject.

use scheming_core::{Glue, Schema, SchemaError};
use serde_json::Value;

use crate::compile::compose_all;
use crate::matcher::Matcher;

#[derive(Debug)]
pub struct ArrayMatcher {
    element: Matcher,
}

impl ArrayMatcher {
    /// Compile a non-empty list of element schemas.
    ///
    /// # Errors
    ///
    /// Propagates any error from compiling an element schema. An empty
    /// list is rejected; use the `[]` shorthand through `compile` instead.
    pub fn new(items: &[Schema]) -> Result<Self, SchemaError> {
        Ok(Self {
            element: compose_all(items, Glue::And)?,
        })
    }

    pub fn matches(&self, candidate: &Value) -> bool {
        // Shape first: never inspect the contents of a non-array.
        let Some(elements) = candidate.as_array() else {
            return false;
        };
        elements.iter().all(|element| self.element.matches(element))
    }
}
