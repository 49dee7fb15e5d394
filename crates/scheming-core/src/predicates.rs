//! # Capability Predicates
//!
//! The fixed library of structural predicates over JSON values, deep
//! equality, and the set helpers used for key-set comparison.
//!
//! ## JSON Semantics
//!
//! Candidates are `serde_json::Value`, which has no `undefined` and no
//! function values. "Undefined" is therefore a property of a lookup
//! ([`is_undefined`] takes `Option<&Value>`), and "is a function" is a
//! property of a schema (`Schema::is_function`).

use std::sync::Arc;

use serde_json::Value;

/// A caller-supplied or built-in boolean test over a JSON value.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Wrap a function or closure as a [`Predicate`].
pub fn predicate<F>(f: F) -> Predicate
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

/// True for JSON objects. Arrays are not objects here.
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

/// True when a lookup found nothing.
pub fn is_undefined(value: Option<&Value>) -> bool {
    value.is_none()
}

/// Emptiness in the collection sense: empty strings, arrays, and objects
/// are empty, and so is every other scalar (`null`, booleans, numbers),
/// since none of them holds anything.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
    }
}

pub fn is_non_empty(value: &Value) -> bool {
    !is_empty(value)
}

/// Matches every value. Backs the `*` value operator.
pub fn is_anything(_value: &Value) -> bool {
    true
}

/// Structural equality over JSON values.
///
/// Numbers compare by numeric value, so `1` equals `1.0`. Object key order
/// is irrelevant.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x == y
                || matches!((x.as_f64(), y.as_f64()), (Some(p), Some(q)) if p == q)
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| deep_equal(x, y)))
        }
        _ => a == b,
    }
}

/// De-duplicate `items` under `eq`, keeping first occurrences in order.
pub fn unique_by<'a, T>(items: &'a [T], eq: impl Fn(&T, &T) -> bool) -> Vec<&'a T> {
    let mut unique: Vec<&T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.iter().any(|seen| eq(*seen, item)) {
            unique.push(item);
        }
    }
    unique
}

/// True when every distinct element of `a` occurs in `b`.
///
/// Improper subsets count: equal collections are subsets of each other.
pub fn is_subset<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    unique_by(a, |x, y| x == y).into_iter().all(|x| b.contains(x))
}
