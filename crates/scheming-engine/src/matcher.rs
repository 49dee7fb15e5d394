//! # Compiled Matchers
//!
//! [`Matcher`] is the compiled form of a schema. The variant records how a
//! node is evaluated: a sibling reference is its own variant and can only be
//! resolved when the enclosing object is supplied.

use std::fmt;
use std::sync::Arc;

use scheming_core::Predicate;
use serde_json::{Map, Value};

use crate::array::ArrayMatcher;
use crate::object::ObjectMatcher;
use crate::sibling::SiblingRef;

/// A compiled schema.
#[derive(Clone)]
pub enum Matcher {
    /// A self-contained predicate: literals, capabilities, shape tests,
    /// wildcards, and expanded composer chains.
    Plain(Predicate),
    /// A sibling reference. Needs the enclosing object to evaluate.
    Thunked(SiblingRef),
    /// A non-empty array schema.
    Array(Arc<ArrayMatcher>),
    /// A non-empty object schema.
    Object(Arc<ObjectMatcher>),
}

impl Matcher {
    /// Decide whether `candidate` conforms.
    ///
    /// A sibling reference evaluated here has no enclosing object and
    /// fails closed.
    pub fn matches(&self, candidate: &Value) -> bool {
        match self {
            Matcher::Plain(p) => p(candidate),
            Matcher::Thunked(sibling) => {
                tracing::trace!(
                    sibling = sibling.name(),
                    "sibling reference evaluated outside an object"
                );
                false
            }
            Matcher::Array(array) => array.matches(candidate),
            Matcher::Object(object) => object.matches(candidate),
        }
    }

    /// Decide whether `candidate`, found inside `parent`, conforms.
    ///
    /// Sibling references resolve against `parent`; every other variant
    /// ignores it.
    pub fn matches_in(&self, parent: &Map<String, Value>, candidate: &Value) -> bool {
        match self {
            Matcher::Thunked(sibling) => sibling.resolve(parent, candidate),
            other => other.matches(candidate),
        }
    }

    pub fn is_thunked(&self) -> bool {
        matches!(self, Matcher::Thunked(_))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Plain(_) => f.write_str("Plain(<fn>)"),
            Matcher::Thunked(sibling) => f.debug_tuple("Thunked").field(sibling).finish(),
            Matcher::Array(array) => f.debug_tuple("Array").field(array).finish(),
            Matcher::Object(object) => f.debug_tuple("Object").field(object).finish(),
        }
    }
}
