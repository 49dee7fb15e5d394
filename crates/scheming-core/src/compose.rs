//! # Boolean Composer
//!
//! Builds short-circuiting chains of predicates:
//!
//! ```
//! use scheming_core::{compose, predicate, predicates};
//! use serde_json::json;
//!
//! let short_label = compose(predicate(predicates::is_string))
//!     .and(predicate(|v| v.as_str().is_some_and(|s| s.len() <= 8)))
//!     .build()
//!     .unwrap();
//!
//! assert!(short_label(&json!("ok")));
//! assert!(!short_label(&json!("far too long")));
//! assert!(!short_label(&json!(3)));
//! ```
//!
//! A chain threads a boolean accumulator, seeded by the initial predicate,
//! through each step in registration order. A step whose predicate cannot
//! change the outcome is not evaluated. Chains nest: a chain registered as a
//! step of another chain is built into a plain predicate first.
//!
//! A chain with no steps is a usage error and refuses to build.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ComposeError;
use crate::logic::Glue;
use crate::predicates::Predicate;

/// One link of a composer chain.
#[derive(Clone)]
pub enum Step {
    /// A plain predicate, applied to the value as-is.
    Predicate(Predicate),
    /// A nested chain, built into a predicate when the outer chain is built.
    Chain(ComposerChain),
}

impl Step {
    fn force(&self) -> Result<Predicate, ComposeError> {
        match self {
            Step::Predicate(p) => Ok(Arc::clone(p)),
            Step::Chain(chain) => chain.build(),
        }
    }

    fn same_as(&self, other: &Step) -> bool {
        match (self, other) {
            (Step::Predicate(a), Step::Predicate(b)) => Arc::ptr_eq(a, b),
            (Step::Chain(a), Step::Chain(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl From<Predicate> for Step {
    fn from(p: Predicate) -> Self {
        Step::Predicate(p)
    }
}

impl From<ComposerChain> for Step {
    fn from(chain: ComposerChain) -> Self {
        Step::Chain(chain)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Predicate(_) => f.write_str("Predicate(<fn>)"),
            Step::Chain(chain) => f.debug_tuple("Chain").field(chain).finish(),
        }
    }
}

/// A chain of predicates joined by [`Glue`] operators.
#[derive(Clone, Debug)]
pub struct ComposerChain {
    initial: Box<Step>,
    steps: Vec<(Glue, Step)>,
}

/// Start a composer chain seeded by `initial`.
pub fn compose(initial: impl Into<Step>) -> ComposerChain {
    ComposerChain {
        initial: Box::new(initial.into()),
        steps: Vec::new(),
    }
}

impl ComposerChain {
    pub fn and(self, step: impl Into<Step>) -> Self {
        self.push(Glue::And, step.into())
    }

    pub fn or(self, step: impl Into<Step>) -> Self {
        self.push(Glue::Or, step.into())
    }

    pub fn nand(self, step: impl Into<Step>) -> Self {
        self.push(Glue::Nand, step.into())
    }

    pub fn nor(self, step: impl Into<Step>) -> Self {
        self.push(Glue::Nor, step.into())
    }

    fn push(mut self, glue: Glue, step: Step) -> Self {
        self.steps.push((glue, step));
        self
    }

    /// Number of registered steps, not counting the initial predicate.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Expand the chain, and every chain nested in it, into one predicate.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::NotInitialized`] if this chain or any nested
    /// chain has no registered steps.
    pub fn build(&self) -> Result<Predicate, ComposeError> {
        if self.steps.is_empty() {
            return Err(ComposeError::NotInitialized);
        }

        let initial = self.initial.force()?;
        let steps = self
            .steps
            .iter()
            .map(|(glue, step)| Ok((*glue, step.force()?)))
            .collect::<Result<Vec<(Glue, Predicate)>, ComposeError>>()?;

        Ok(Arc::new(move |value: &Value| {
            steps
                .iter()
                .fold(initial(value), |acc, (glue, p)| glue.apply(acc, || p(value)))
        }))
    }

    /// Build the chain and apply it to `value`.
    ///
    /// # Errors
    ///
    /// Same as [`ComposerChain::build`].
    pub fn evaluate(&self, value: &Value) -> Result<bool, ComposeError> {
        self.build().map(|p| p(value))
    }

    /// True when both chains were assembled from the same predicate
    /// instances with the same operators.
    pub fn same_as(&self, other: &ComposerChain) -> bool {
        self.initial.same_as(&other.initial)
            && self.steps.len() == other.steps.len()
            && self
                .steps
                .iter()
                .zip(&other.steps)
                .all(|((ga, sa), (gb, sb))| ga == gb && sa.same_as(sb))
    }
}
