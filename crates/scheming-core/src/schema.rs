//! # Schema Data Model
//!
//! A [`Schema`] describes the expected structure of a JSON value:
//!
//! - a **literal** scalar, matched by deep equality;
//! - a **capability**, a caller-supplied predicate;
//! - a **composer chain**, expanded into a predicate at compile time;
//! - an **object schema**, mapping key patterns to nested schemas;
//! - an **array schema**, a list of schemas applied to every element;
//! - **undefined**, which no materialized value satisfies.
//!
//! `{}` and `[]` are shorthands for "any object" and "any array".
//!
//! Key patterns and string literals may carry operators (see
//! [`crate::token`]); the schema itself stores them verbatim.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::compose::ComposerChain;
use crate::error::ComposeError;
use crate::predicates::{self, deep_equal, Predicate};

/// A declarative description of expected JSON structure.
#[derive(Clone)]
pub enum Schema {
    /// A JSON value matched by deep equality. String literals may carry
    /// the `*` or `$name$` operators.
    Literal(Value),
    /// A caller-supplied predicate.
    Capability(Predicate),
    /// A composer chain, expanded into a predicate when compiled.
    Chain(ComposerChain),
    /// Key patterns paired with nested schemas. Empty means "any object".
    Object(Vec<(String, Schema)>),
    /// Schemas every element must satisfy. Empty means "any array".
    Array(Vec<Schema>),
    /// Matches no present value.
    Undefined,
}

impl Schema {
    pub fn literal(value: impl Into<Value>) -> Self {
        Schema::Literal(value.into())
    }

    pub fn capability<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Schema::Capability(Arc::new(f))
    }

    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Schema::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn array(items: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Array(items.into_iter().collect())
    }

    /// True for schemas that act as functions: capabilities and chains.
    pub fn is_function(&self) -> bool {
        matches!(self, Schema::Capability(_) | Schema::Chain(_))
    }

    /// True for leaves of the schema tree.
    ///
    /// Scalars, functions, and `Undefined` are leaves. So are the empty
    /// object and array shorthands, since their contents are never
    /// inspected.
    pub fn is_stop_value(&self) -> bool {
        match self {
            Schema::Object(entries) => entries.is_empty(),
            Schema::Array(items) => items.is_empty(),
            Schema::Literal(Value::Object(map)) => map.is_empty(),
            Schema::Literal(Value::Array(items)) => items.is_empty(),
            Schema::Literal(_) | Schema::Capability(_) | Schema::Chain(_) | Schema::Undefined => {
                true
            }
        }
    }

    /// The shallow literal-matching predicate for this schema.
    ///
    /// Compound schemas map to their shape test (`is_object`, `is_array`)
    /// without inspecting contents; functions are used as they are;
    /// scalars match by deep equality.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError`] if a composer chain cannot be built.
    pub fn value_predicate(&self) -> Result<Predicate, ComposeError> {
        let p: Predicate = match self {
            Schema::Object(_) | Schema::Literal(Value::Object(_)) => Arc::new(predicates::is_object),
            Schema::Array(_) | Schema::Literal(Value::Array(_)) => Arc::new(predicates::is_array),
            Schema::Undefined => Arc::new(|_: &Value| false),
            Schema::Capability(p) => Arc::clone(p),
            Schema::Chain(chain) => chain.build()?,
            Schema::Literal(expected) => {
                let expected = expected.clone();
                Arc::new(move |value: &Value| deep_equal(value, &expected))
            }
        };
        Ok(p)
    }

    /// True when both schemas denote the same predicate instance.
    ///
    /// Functions compare by identity: two independently created closures
    /// are distinct even if they behave alike. Everything else compares
    /// structurally.
    pub fn same_predicate(&self, other: &Schema) -> bool {
        match (self, other) {
            (Schema::Literal(a), Schema::Literal(b)) => deep_equal(a, b),
            (Schema::Capability(a), Schema::Capability(b)) => Arc::ptr_eq(a, b),
            (Schema::Chain(a), Schema::Chain(b)) => a.same_as(b),
            (Schema::Object(a), Schema::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, sa), (kb, sb))| ka == kb && sa.same_predicate(sb))
            }
            (Schema::Array(a), Schema::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(sa, sb)| sa.same_predicate(sb))
            }
            (Schema::Undefined, Schema::Undefined) => true,
            _ => false,
        }
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Schema::Object(map.into_iter().map(|(k, v)| (k, Schema::from(v))).collect())
            }
            Value::Array(items) => Schema::Array(items.into_iter().map(Schema::from).collect()),
            scalar => Schema::Literal(scalar),
        }
    }
}

impl From<Predicate> for Schema {
    fn from(p: Predicate) -> Self {
        Schema::Capability(p)
    }
}

impl From<ComposerChain> for Schema {
    fn from(chain: ComposerChain) -> Self {
        Schema::Chain(chain)
    }
}

impl From<&str> for Schema {
    fn from(s: &str) -> Self {
        Schema::Literal(Value::String(s.to_string()))
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Schema::Capability(_) => f.write_str("Capability(<fn>)"),
            Schema::Chain(chain) => f.debug_tuple("Chain").field(chain).finish(),
            Schema::Object(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
            Schema::Array(items) => f.debug_list().entries(items).finish(),
            Schema::Undefined => f.write_str("Undefined"),
        }
    }
}
