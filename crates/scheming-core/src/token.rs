//! # Operator Token Recognition
//!
//! Schema keys and schema string values may embed an operator:
//!
//! | Form | Kind | Capture |
//! |------|------|---------|
//! | `*` | [`TokenKind::Star`] | `""` |
//! | `*name*` | [`TokenKind::Star`] | `name` |
//! | `**` | [`TokenKind::StarStar`] | `""` |
//! | `$name$` | [`TokenKind::Sibling`] | `name` |
//! | `(name)` | [`TokenKind::Optional`] | `name` |
//!
//! Recognition is repeated on each capture, so `(**)` yields an optional
//! wrapper followed by a catch-all, outer to inner. When several rules could
//! match the same string, the first rule in the table above wins.

use std::sync::OnceLock;

use regex::Regex;

/// The operator a [`Token`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Wildcard claiming exactly one key/value pair.
    Star,
    /// Catch-all claiming every remaining key/value pair.
    StarStar,
    /// Reference to another field of the enclosing object.
    Sibling,
    /// Wrapper making the inner key or operator optional.
    Optional,
}

/// One operator recognized in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Which operator matched.
    pub kind: TokenKind,
    /// The text captured inside the operator (empty for bare `*` and `**`).
    pub capture: String,
    /// The string the operator was recognized in.
    pub source: String,
}

struct Rule {
    kind: TokenKind,
    pattern: Regex,
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (TokenKind::Star, r"^\*$"),
            (TokenKind::Star, r"^\*([^*]+)\*$"),
            (TokenKind::StarStar, r"^\*{2}$"),
            (TokenKind::Sibling, r"^\$(.+)\$$"),
            (TokenKind::Optional, r"^\((.+)\)$"),
        ]
        .into_iter()
        .map(|(kind, pattern)| Rule {
            kind,
            pattern: Regex::new(pattern).expect("operator patterns are static and valid"),
        })
        .collect()
    })
}

/// Match `s` against the first applicable rule, returning the kind and the
/// last capture group (or `""` when the rule has no groups).
fn recognize_once(s: &str) -> Option<(TokenKind, String)> {
    rules().iter().find_map(|rule| {
        rule.pattern.captures(s).map(|caps| {
            let capture = caps
                .iter()
                .skip(1)
                .flatten()
                .last()
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (rule.kind, capture)
        })
    })
}

/// Recognize the chain of operators embedded in `s`, outer to inner.
///
/// Returns an empty vector when `s` is empty or carries no operator.
pub fn recognize(s: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = s.to_string();

    while !current.is_empty() {
        let Some((kind, capture)) = recognize_once(&current) else {
            break;
        };
        tokens.push(Token {
            kind,
            capture: capture.clone(),
            source: current,
        });
        current = capture;
    }

    tokens
}

/// Returns the first recognized token in `s`, if any.
pub fn leading(s: &str) -> Option<Token> {
    recognize(s).into_iter().next()
}
