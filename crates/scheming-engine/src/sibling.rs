//! # Sibling References
//!
//! A schema value of the form `$name$` constrains a field to equal the
//! field `name` of the same object. Evaluation is deferred: the compiled
//! reference needs both the enclosing object and the candidate value, which
//! only the object matcher can supply.

use scheming_core::deep_equal;
use scheming_core::token::{self, TokenKind};
use serde_json::{Map, Value};

/// A deferred equality check against another field of the enclosing object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingRef {
    name: String,
}

impl SiblingRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Parse a `$name$` string. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        token::leading(s)
            .filter(|t| t.kind == TokenKind::Sibling)
            .map(|t| Self::new(t.capture))
    }

    /// The referenced field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when `parent[name]` exists and deep-equals `candidate`.
    ///
    /// A missing field fails closed.
    pub fn resolve(&self, parent: &Map<String, Value>, candidate: &Value) -> bool {
        match parent.get(&self.name) {
            Some(target) => deep_equal(target, candidate),
            None => {
                tracing::debug!(sibling = %self.name, "referenced sibling is absent");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn parse_accepts_only_sibling_tokens() {
        assert_eq!(SiblingRef::parse("$price$"), Some(SiblingRef::new("price")));
        assert_eq!(SiblingRef::parse("price"), None);
        assert_eq!(SiblingRef::parse("*"), None);
        assert_eq!(SiblingRef::parse("$$"), None);
    }

    #[test]
    fn resolves_by_deep_equality() {
        let parent = object(json!({"price": {"amount": 10}, "other": 1}));
        let r = SiblingRef::new("price");
        assert!(r.resolve(&parent, &json!({"amount": 10.0})));
        assert!(!r.resolve(&parent, &json!({"amount": 9})));
    }

    #[test]
    fn missing_sibling_fails_closed() {
        let parent = object(json!({"a": null}));
        assert!(!SiblingRef::new("b").resolve(&parent, &json!(null)));
    }

    #[test]
    fn falsy_siblings_still_compare() {
        let parent = object(json!({"zero": 0, "empty": "", "off": false, "nothing": null}));
        assert!(SiblingRef::new("zero").resolve(&parent, &json!(0)));
        assert!(SiblingRef::new("empty").resolve(&parent, &json!("")));
        assert!(SiblingRef::new("off").resolve(&parent, &json!(false)));
        assert!(SiblingRef::new("nothing").resolve(&parent, &json!(null)));
    }
}
