//! Integration tests: the observable guarantees of compiled matchers.
//!
//! Each test states one property of `compile` in terms of public inputs and
//! boolean outputs only.

use proptest::prelude::*;
use scheming_core::predicates::{self, predicate};
use scheming_core::{compose, Schema};
use scheming_engine::compile;
use serde_json::{json, Value};

fn matcher(schema: Value) -> scheming_engine::Matcher {
    compile(&Schema::from(schema)).expect("schema should compile")
}

// ---------------------------------------------------------------------------
// Exact key sets
// ---------------------------------------------------------------------------

#[test]
fn extra_keys_fail_without_wildcards() {
    let m = compile(&Schema::object([("name", Schema::capability(predicates::is_string))])).unwrap();
    assert!(m.matches(&json!({"name": "x"})));
    assert!(!m.matches(&json!({"name": "x", "age": 3})));
}

#[test]
fn disjoint_keys_fail() {
    let m = matcher(json!({"a": "*", "b": "*"}));
    assert!(!m.matches(&json!({"c": 1, "d": 2})));
}

// ---------------------------------------------------------------------------
// Wildcard subset tolerance
// ---------------------------------------------------------------------------

#[test]
fn catch_all_absorbs_any_number_of_keys() {
    let m = compile(&Schema::object([
        ("name", Schema::capability(predicates::is_string)),
        ("**", Schema::capability(predicates::is_number)),
    ]))
    .unwrap();

    assert!(m.matches(&json!({"name": "n", "a": 1})));
    assert!(m.matches(&json!({"name": "n", "a": 1, "b": 2, "c": 3.5})));
    assert!(!m.matches(&json!({"name": "n", "a": 1, "b": "two"})));
    // A required catch-all needs at least one pair.
    assert!(!m.matches(&json!({"name": "n"})));
}

#[test]
fn optional_catch_all_accepts_none() {
    let m = compile(&Schema::object([
        ("name", Schema::capability(predicates::is_string)),
        ("(**)", Schema::capability(predicates::is_number)),
    ]))
    .unwrap();
    assert!(m.matches(&json!({"name": "n"})));
    assert!(m.matches(&json!({"name": "n", "x": 0})));
}

#[test]
fn star_with_catch_all_anything() {
    let m = compile(&Schema::object([
        ("*", Schema::capability(predicates::is_string)),
        ("**", Schema::from("*")),
    ]))
    .unwrap();
    assert!(m.matches(&json!({"a": "x", "b": "y"})));
    assert!(m.matches(&json!({"a": "x", "b": 1, "c": null})));
    assert!(!m.matches(&json!({"a": 1, "b": 2})));
}

#[test]
fn optional_single_wildcard() {
    let m = matcher(json!({"a": 1, "(*)": "*"}));
    assert!(m.matches(&json!({"a": 1})));
    assert!(m.matches(&json!({"a": 1, "x": 2})));
    assert!(!m.matches(&json!({"a": 1, "x": 2, "y": 3})));
}

#[test]
fn shared_predicate_with_optional_member() {
    let shared = predicate(predicates::is_string);
    let m = compile(&Schema::object([
        ("id", Schema::capability(predicates::is_number)),
        ("*a*", Schema::from(shared.clone())),
        ("(*b*)", Schema::from(shared)),
    ]))
    .unwrap();

    assert!(!m.matches(&json!({"id": 1})));
    assert!(m.matches(&json!({"id": 1, "x": "s"})));
    assert!(m.matches(&json!({"id": 1, "x": "s", "y": "t"})));
    assert!(!m.matches(&json!({"id": 1, "x": "s", "y": "t", "z": "u"})));
}

// ---------------------------------------------------------------------------
// Key order independence
// ---------------------------------------------------------------------------

fn overlapping_wildcards(reversed: bool) -> scheming_engine::Matcher {
    let mut entries = vec![
        ("*a*", Schema::capability(predicates::is_non_empty)),
        ("*b*", Schema::capability(predicates::is_string)),
    ];
    if reversed {
        entries.reverse();
    }
    compile(&Schema::object(entries)).unwrap()
}

#[test]
fn schema_key_order_does_not_change_verdicts() {
    let forward = overlapping_wildcards(false);
    let reverse = overlapping_wildcards(true);
    for candidate in [
        json!({"x": "s", "y": [1]}),
        json!({"y": "s", "x": [1]}),
        json!({"x": "", "y": [1]}),
        json!({"x": "s", "y": "t"}),
        json!({"x": 1, "y": 2}),
    ] {
        assert_eq!(forward.matches(&candidate), reverse.matches(&candidate), "{candidate}");
    }
    assert!(forward.matches(&json!({"x": "s", "y": [1]})));
}

#[test]
fn candidate_key_names_do_not_change_verdicts() {
    let m = compile(&Schema::object([
        ("*", Schema::from("*")),
        ("**", Schema::capability(predicates::is_number)),
    ]))
    .unwrap();
    assert!(m.matches(&json!({"a": 1, "b": "s"})));
    assert!(m.matches(&json!({"a": "s", "b": 1})));
    assert!(!m.matches(&json!({"a": "s", "b": "t"})));
}

// ---------------------------------------------------------------------------
// Optional fields
// ---------------------------------------------------------------------------

#[test]
fn optional_field_semantics() {
    let m = compile(&Schema::object([("(name)", Schema::capability(predicates::is_string))])).unwrap();
    assert!(m.matches(&json!({})));
    assert!(m.matches(&json!({"name": "x"})));
    assert!(!m.matches(&json!({"name": 1})));
    assert!(!m.matches(&json!({"other": "x"})));
}

// ---------------------------------------------------------------------------
// Sibling references
// ---------------------------------------------------------------------------

#[test]
fn sibling_cross_reference() {
    let m = compile(&Schema::object([
        ("price", Schema::capability(predicates::is_number)),
        ("salePrice", Schema::from("$price$")),
    ]))
    .unwrap();
    assert!(m.matches(&json!({"price": 10, "salePrice": 10})));
    assert!(!m.matches(&json!({"price": 10, "salePrice": 9})));
}

#[test]
fn sibling_to_missing_field_fails_closed() {
    let m = matcher(json!({"a": "$missing$", "(missing)": "*"}));
    assert!(!m.matches(&json!({"a": 1})));
    assert!(m.matches(&json!({"a": 1, "missing": 1})));
}

#[test]
fn sibling_inside_nested_array_of_objects() {
    let m = matcher(json!({"tags": [{"price": "*", "yen": "$price$"}]}));
    assert!(m.matches(&json!({"tags": [{"price": 1, "yen": 1}, {"price": 2, "yen": 2}]})));
    assert!(!m.matches(&json!({"tags": [{"price": 1, "yen": 1}, {"price": 2, "yen": 3}]})));
}

#[test]
fn sibling_under_wildcard_resolves_against_parent() {
    let m = matcher(json!({"base": "*", "*": "$base$"}));
    assert!(m.matches(&json!({"base": "x", "copy": "x"})));
    assert!(!m.matches(&json!({"base": "x", "copy": "y"})));
}

// ---------------------------------------------------------------------------
// Array conjunction
// ---------------------------------------------------------------------------

#[test]
fn array_conjunction() {
    let strings = compile(&Schema::array([
        Schema::capability(predicates::is_string),
        Schema::capability(predicates::is_non_empty),
    ]))
    .unwrap();
    assert!(strings.matches(&json!(["a", "b"])));

    let only_strings = compile(&Schema::array([Schema::capability(predicates::is_string)])).unwrap();
    assert!(!only_strings.matches(&json!([1])));
    assert!(only_strings.matches(&json!([])));
}

// ---------------------------------------------------------------------------
// Composer short-circuit
// ---------------------------------------------------------------------------

#[test]
fn composer_does_not_evaluate_dead_steps() {
    let chain = compose(predicate(|_| false)).and(predicate(|_| panic!("must not run")));
    assert_eq!(chain.evaluate(&json!("x")), Ok(false));

    // The same holds once the chain is embedded in a schema.
    let m = compile(&Schema::object([("k", Schema::from(chain))])).unwrap();
    assert!(!m.matches(&json!({"k": "x"})));
}

// ---------------------------------------------------------------------------
// Nested schemas
// ---------------------------------------------------------------------------

#[test]
fn nested_structures() {
    let m = compile(&Schema::object([
        ("id", Schema::capability(predicates::is_number)),
        (
            "owner",
            Schema::object([
                ("name", Schema::capability(predicates::is_string)),
                ("(email)", Schema::capability(predicates::is_string)),
            ]),
        ),
        ("tags", Schema::array([Schema::capability(predicates::is_string)])),
        ("meta", Schema::from(json!({}))),
    ]))
    .unwrap();

    assert!(m.matches(&json!({
        "id": 1,
        "owner": {"name": "ada"},
        "tags": ["x", "y"],
        "meta": {"anything": [1, 2]}
    })));
    assert!(!m.matches(&json!({
        "id": 1,
        "owner": {"name": "ada", "phone": "555"},
        "tags": ["x"],
        "meta": {}
    })));
    assert!(!m.matches(&json!({
        "id": 1,
        "owner": {"name": "ada"},
        "tags": "x",
        "meta": {}
    })));
}

#[test]
fn readme_style_examples() {
    // Any single key whose value is an object.
    let m = matcher(json!({"*": {}}));
    assert!(m.matches(&json!({"k": {"inner": 1}})));
    assert!(!m.matches(&json!({"k": [1]})));

    // Any single key whose value is an array.
    let m = matcher(json!({"*": []}));
    assert!(m.matches(&json!({"k": [1]})));
    assert!(!m.matches(&json!({"k": {}})));

    // A literal value.
    let m = matcher(json!({"name": "Literal"}));
    assert!(m.matches(&json!({"name": "Literal"})));
    assert!(!m.matches(&json!({"name": "Other"})));

    // One named key and anything else.
    let m = compile(&Schema::object([
        ("name", Schema::capability(predicates::is_string)),
        ("**", Schema::from("*")),
    ]))
    .unwrap();
    assert!(m.matches(&json!({"name": "n", "x": [], "y": null})));
}

#[test]
fn empty_object_fails_required_schema() {
    let m = matcher(json!({"a": "*"}));
    assert!(!m.matches(&json!({})));
}

// ---------------------------------------------------------------------------
// Generated properties
// ---------------------------------------------------------------------------

fn json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    json_scalar().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    /// A scalar schema matches exactly the values deep-equal to it.
    #[test]
    fn literal_equality(v in json_scalar(), w in json_scalar()) {
        let m = compile(&Schema::Literal(v.clone())).unwrap();
        prop_assert!(m.matches(&v));
        prop_assert_eq!(m.matches(&w), scheming_core::deep_equal(&v, &w));
    }

    /// `{}` and `[]` test shape only.
    #[test]
    fn empty_shorthands(x in json_value()) {
        prop_assert_eq!(matcher(json!({})).matches(&x), x.is_object());
        prop_assert_eq!(matcher(json!([])).matches(&x), x.is_array());
    }

    /// Compiling twice yields matchers that agree.
    #[test]
    fn compilation_is_deterministic(schema in json_value(), candidate in json_value()) {
        let s = Schema::from(schema);
        let a = compile(&s).unwrap();
        let b = compile(&s).unwrap();
        prop_assert_eq!(a.matches(&candidate), b.matches(&candidate));
        prop_assert_eq!(a.matches(&candidate), a.matches(&candidate));
    }

    /// Without wildcards, a strict superset of the schema's keys never matches.
    #[test]
    fn superset_keys_never_match(extra in "[A-Z]{1,4}", value in json_scalar()) {
        let m = matcher(json!({"a": "*", "b": "*"}));
        let mut candidate = serde_json::Map::new();
        candidate.insert("a".into(), json!(1));
        candidate.insert("b".into(), json!(2));
        candidate.insert(extra, value);
        prop_assert!(!m.matches(&Value::Object(candidate)));
    }

    /// Reversing the schema's entries never changes a verdict.
    #[test]
    fn wildcard_verdicts_ignore_schema_order(
        map in prop::collection::btree_map("[a-z]{1,3}", json_scalar(), 0..5)
    ) {
        let candidate = Value::Object(map.into_iter().collect());
        prop_assert_eq!(
            overlapping_wildcards(false).matches(&candidate),
            overlapping_wildcards(true).matches(&candidate)
        );
    }

    /// A catch-all with an always-true value accepts any non-empty object.
    #[test]
    fn catch_all_accepts_any_keys(
        map in prop::collection::btree_map("[a-z]{1,6}", json_scalar(), 1..8)
    ) {
        let m = matcher(json!({"**": "*"}));
        let candidate = Value::Object(map.into_iter().collect());
        prop_assert!(m.matches(&candidate));
    }
}
