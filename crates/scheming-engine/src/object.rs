//! # Object Matcher
//!
//! An object schema is compiled into a set of [`Test`]s, one per key
//! pattern. A test either names the key it applies to (**bound**) or accepts
//! any key (**free**):
//!
//! | Key pattern | Scope | Degrees of freedom | Cost |
//! |-------------|-------|--------------------|------|
//! | `name` | bound | 1 | 1 |
//! | `(name)` | bound | 1 | 0 |
//! | `*`, `*label*` | free | 1 | 1 |
//! | `(*)` | free | 1 | 0 |
//! | `**` | free | unbounded | 1 |
//! | `(**)` | free | unbounded | 0 |
//!
//! The degrees of freedom bound how many key/value pairs a test may claim;
//! the cost is how many it must claim. Key patterns carrying any other
//! operator (`$name$` as a key) are bound to their literal text.
//!
//! Matching treats the candidate as its key/value pairs and reconciles them
//! against the tests (see [`crate::dof`]): every pair must be claimed by
//! exactly one test and every required test must claim its quota.
//!
//! ## Wildcard Accounting
//!
//! `*` tests are grouped by predicate identity. A group with `n` keys
//! claims exactly `n` satisfying pairs (fewer only where its keys are
//! optional). Two `*` keys whose schemas are distinct closures form two
//! groups even when the closures behave alike.

use scheming_core::predicates::{is_non_empty, is_object, is_subset};
use scheming_core::token::{recognize, TokenKind};
use scheming_core::{Schema, SchemaError};
use serde_json::{Map, Value};

use crate::compile::compile;
use crate::matcher::Matcher;

/// Whether a test applies to a named key or to any key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Bound,
    Free,
}

/// How many key/value pairs a test may claim.
///
/// Ordered so that finite quotas sort before the unbounded catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Freedom {
    Finite(usize),
    Unbounded,
}

/// The key half of a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRule {
    /// Applies to exactly this key.
    Exact(String),
    /// Applies to any key.
    Any,
}

impl KeyRule {
    pub fn accepts(&self, key: &str) -> bool {
        match self {
            KeyRule::Exact(name) => name == key,
            KeyRule::Any => true,
        }
    }

    /// The pair of `object` this rule selects: the named key for an exact
    /// rule, the first pair otherwise.
    pub fn lookup<'a>(&self, object: &'a Map<String, Value>) -> Option<(&'a String, &'a Value)> {
        match self {
            KeyRule::Exact(name) => object.get_key_value(name),
            KeyRule::Any => object.iter().next(),
        }
    }
}

/// One compiled rule of an object schema.
#[derive(Debug, Clone)]
pub struct Test {
    pub scope: Scope,
    pub key: KeyRule,
    pub value: Matcher,
    pub freedom: Freedom,
    /// 1 when the test must claim a pair, 0 when it may claim none.
    pub cost: usize,
    /// The key pattern as written in the schema.
    pub source: String,
}

impl Test {
    pub fn is_required(&self) -> bool {
        self.cost > 0
    }
}

/// `*` tests sharing one predicate, accounted for together.
#[derive(Debug, Clone)]
pub(crate) struct StarGroup {
    pub(crate) members: Vec<Test>,
}

impl StarGroup {
    pub(crate) fn value(&self) -> &Matcher {
        &self.members[0].value
    }

    pub(crate) fn required(&self) -> usize {
        self.members.iter().map(|t| t.cost).sum()
    }

    /// Total pairs the group may claim.
    pub(crate) fn quota(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn label(&self) -> String {
        self.members
            .iter()
            .map(|t| t.source.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// How a key pattern was classified.
enum KeyClass {
    Bound { name: String, optional: bool },
    Star { optional: bool },
    StarStar { optional: bool },
}

fn classify(key: &str) -> KeyClass {
    let tokens = recognize(key);
    let optional = tokens.first().is_some_and(|t| t.kind == TokenKind::Optional);
    let operator = if optional { tokens.get(1) } else { tokens.first() };

    match operator.map(|t| t.kind) {
        Some(TokenKind::Star) => KeyClass::Star { optional },
        Some(TokenKind::StarStar) => KeyClass::StarStar { optional },
        _ if optional => KeyClass::Bound {
            name: tokens[0].capture.clone(),
            optional,
        },
        _ => KeyClass::Bound {
            name: key.to_string(),
            optional,
        },
    }
}

/// Compiled matcher for a non-empty object schema.
#[derive(Debug)]
pub struct ObjectMatcher {
    pub(crate) bound: Vec<Test>,
    pub(crate) stars: Vec<StarGroup>,
    pub(crate) catch_all: Option<Test>,
    required_keys: Vec<String>,
    bound_keys: Vec<String>,
}

impl ObjectMatcher {
    /// Compile the entries of an object schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MultipleCatchAll`] if more than one key is a
    /// `**` pattern, and propagates errors from compiling nested schemas.
    pub fn new(entries: &[(String, Schema)]) -> Result<Self, SchemaError> {
        let mut bound = Vec::new();
        let mut free: Vec<(Test, &Schema)> = Vec::new();

        for (key, schema) in entries {
            let value = compile(schema)?;
            let cost_for = |optional: bool| usize::from(!optional);

            match classify(key) {
                KeyClass::Bound { name, optional } => bound.push(Test {
                    scope: Scope::Bound,
                    key: KeyRule::Exact(name),
                    value,
                    freedom: Freedom::Finite(1),
                    cost: cost_for(optional),
                    source: key.clone(),
                }),
                KeyClass::Star { optional } => free.push((
                    Test {
                        scope: Scope::Free,
                        key: KeyRule::Any,
                        value,
                        freedom: Freedom::Finite(1),
                        cost: cost_for(optional),
                        source: key.clone(),
                    },
                    schema,
                )),
                KeyClass::StarStar { optional } => free.push((
                    Test {
                        scope: Scope::Free,
                        key: KeyRule::Any,
                        value,
                        freedom: Freedom::Unbounded,
                        cost: cost_for(optional),
                        source: key.clone(),
                    },
                    schema,
                )),
            }
        }

        let catch_alls = free
            .iter()
            .filter(|(t, _)| t.freedom == Freedom::Unbounded)
            .count();
        if catch_alls > 1 {
            return Err(SchemaError::MultipleCatchAll { count: catch_alls });
        }

        // Finite quotas are claimed before the catch-all sweeps the rest.
        free.sort_by_key(|(t, _)| t.freedom);

        let mut stars: Vec<(StarGroup, &Schema)> = Vec::new();
        let mut catch_all = None;
        for (test, schema) in free {
            if test.freedom == Freedom::Unbounded {
                catch_all = Some(test);
                continue;
            }
            match stars.iter_mut().find(|(_, s)| s.same_predicate(schema)) {
                Some((group, _)) => group.members.push(test),
                None => stars.push((StarGroup { members: vec![test] }, schema)),
            }
        }

        let key_names = |required_only: bool| {
            bound
                .iter()
                .filter(|t| !required_only || t.is_required())
                .filter_map(|t| match &t.key {
                    KeyRule::Exact(name) => Some(name.clone()),
                    KeyRule::Any => None,
                })
                .collect::<Vec<_>>()
        };
        let required_keys = key_names(true);
        let bound_keys = key_names(false);

        Ok(Self {
            bound,
            stars: stars.into_iter().map(|(group, _)| group).collect(),
            catch_all,
            required_keys,
            bound_keys,
        })
    }

    /// All compiled tests: bound first, then free in claiming order.
    pub fn tests(&self) -> impl Iterator<Item = &Test> {
        self.bound
            .iter()
            .chain(self.stars.iter().flat_map(|g| g.members.iter()))
            .chain(self.catch_all.iter())
    }

    /// True when the schema has any `*` or `**` key.
    pub fn has_wildcards(&self) -> bool {
        !self.stars.is_empty() || self.catch_all.is_some()
    }

    fn has_required_rules(&self) -> bool {
        self.tests().any(Test::is_required)
    }

    /// Bound key names must line up with the candidate's keys.
    ///
    /// Without wildcards the candidate may hold only bound keys. With
    /// wildcards, extra keys are allowed. Required keys must always be
    /// present.
    fn key_sets_agree(&self, keys: &[&str]) -> bool {
        let required: Vec<&str> = self.required_keys.iter().map(String::as_str).collect();
        if !is_subset(&required, keys) {
            return false;
        }
        if self.has_wildcards() {
            return true;
        }
        let bound: Vec<&str> = self.bound_keys.iter().map(String::as_str).collect();
        is_subset(keys, &bound)
    }

    pub fn matches(&self, candidate: &Value) -> bool {
        let Some(object) = candidate.as_object() else {
            tracing::trace!("object schema applied to a non-object");
            return false;
        };

        match self.reconcile(object) {
            Ok(claimed) => {
                tracing::trace!(bound = claimed.bound, free = claimed.free, "pairs claimed");
            }
            Err(err) => {
                tracing::debug!(error = %err, "object schema rejected candidate");
                return false;
            }
        }

        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        let non_empty = !self.has_required_rules() || is_non_empty(candidate);

        self.key_sets_agree(&keys) && non_empty && is_object(candidate)
    }
}
