//! # Value Matcher Dispatch
//!
//! [`compile`] turns any schema into a [`Matcher`]. Dispatch order:
//!
//! 1. non-empty array schema → [`ArrayMatcher`]
//! 2. empty array schema → `is_array`
//! 3. non-empty object schema → [`ObjectMatcher`]
//! 4. empty object schema → `is_object`
//! 5. string carrying a `*` operator → matches anything
//! 6. string carrying a `$name$` operator → deferred sibling reference
//! 7. anything else → literal or capability predicate
//!
//! Strings carrying any other operator (`**`, `(name)`) are not meaningful
//! as values and fall through to literal equality.

use std::sync::Arc;

use scheming_core::token::{self, TokenKind};
use scheming_core::{predicates, ComposeError, Glue, Schema, SchemaError};
use serde_json::Value;

use crate::array::ArrayMatcher;
use crate::matcher::Matcher;
use crate::object::ObjectMatcher;
use crate::sibling::SiblingRef;

/// Compile `schema` into a reusable matcher.
///
/// # Errors
///
/// Returns [`SchemaError::MultipleCatchAll`] if any object schema in the
/// tree declares more than one `**` key, and [`SchemaError::Compose`] if a
/// composer chain in the tree has no steps.
pub fn compile(schema: &Schema) -> Result<Matcher, SchemaError> {
    let matcher = match schema {
        Schema::Array(items) if !schema.is_stop_value() => {
            Matcher::Array(Arc::new(ArrayMatcher::new(items)?))
        }
        Schema::Object(entries) if !schema.is_stop_value() => {
            Matcher::Object(Arc::new(ObjectMatcher::new(entries)?))
        }
        Schema::Literal(Value::String(s)) => compile_string(s, schema)?,
        // Empty shorthands, scalars, and functions.
        leaf => Matcher::Plain(leaf.value_predicate()?),
    };
    Ok(matcher)
}

fn compile_string(s: &str, schema: &Schema) -> Result<Matcher, SchemaError> {
    if let Some(sibling) = SiblingRef::parse(s) {
        return Ok(Matcher::Thunked(sibling));
    }
    let matcher = match token::leading(s) {
        Some(t) if t.kind == TokenKind::Star => Matcher::Plain(Arc::new(predicates::is_anything)),
        _ => Matcher::Plain(schema.value_predicate()?),
    };
    Ok(matcher)
}

/// Compile every schema in `schemas` and fold the matchers left to right
/// with `glue`, short-circuiting.
///
/// A single schema yields its own matcher unchanged.
///
/// # Errors
///
/// Returns [`ComposeError::EmptyList`] (wrapped in [`SchemaError`]) for an
/// empty list, and any error from compiling an element.
pub fn compose_all(schemas: &[Schema], glue: Glue) -> Result<Matcher, SchemaError> {
    let mut matchers = schemas
        .iter()
        .map(compile)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();

    let first = matchers.next().ok_or(ComposeError::EmptyList)?;

    Ok(matchers.fold(first, |acc, next| {
        Matcher::Plain(Arc::new(move |value: &Value| {
            glue.apply(acc.matches(value), || next.matches(value))
        }))
    }))
}
