//! # Logic Primitives
//!
//! Boolean operators as plain functions, so they can be passed where an
//! operator cannot, plus lazy forms whose right-hand side is a thunk.

/// Identity.
pub fn id(x: bool) -> bool {
    x
}

pub fn not(x: bool) -> bool {
    !x
}

pub fn and(a: bool, b: bool) -> bool {
    a && b
}

pub fn or(a: bool, b: bool) -> bool {
    a || b
}

pub fn nand(a: bool, b: bool) -> bool {
    !a || !b
}

pub fn nor(a: bool, b: bool) -> bool {
    !a && !b
}

/// `and` over thunks. `b` is not evaluated when `a` yields false.
pub fn and_lazy(a: impl FnOnce() -> bool, b: impl FnOnce() -> bool) -> bool {
    a() && b()
}

/// `or` over thunks. `b` is not evaluated when `a` yields true.
pub fn or_lazy(a: impl FnOnce() -> bool, b: impl FnOnce() -> bool) -> bool {
    a() || b()
}

/// The operator joining one step of a composer chain to the accumulated
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glue {
    And,
    Or,
    Nand,
    Nor,
}

impl Glue {
    /// Combine the accumulator with a lazily evaluated step.
    ///
    /// The step is skipped whenever the accumulator alone decides the
    /// outcome: a false accumulator for `And` and `Nand`, a true one for
    /// `Or` and `Nor`.
    pub fn apply(self, acc: bool, step: impl FnOnce() -> bool) -> bool {
        match self {
            Glue::And => and_lazy(|| acc, step),
            Glue::Or => or_lazy(|| acc, step),
            Glue::Nand => or_lazy(|| not(acc), || not(step())),
            Glue::Nor => and_lazy(|| not(acc), || not(step())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: [(bool, bool); 4] = [(true, true), (true, false), (false, true), (false, false)];

    #[test]
    fn id_and_not() {
        assert!(id(true));
        assert!(!id(false));
        assert!(not(false));
        assert!(!not(true));
    }

    #[test]
    fn truth_tables() {
        for (a, b) in PAIRS {
            assert_eq!(and(a, b), a && b);
            assert_eq!(or(a, b), a || b);
            assert_eq!(nand(a, b), !(a && b));
            assert_eq!(nor(a, b), !(a || b));
        }
    }

    #[test]
    fn lazy_forms_match_eager_forms() {
        for (a, b) in PAIRS {
            assert_eq!(and_lazy(|| a, || b), and(a, b));
            assert_eq!(or_lazy(|| a, || b), or(a, b));
        }
    }

    #[test]
    fn lazy_and_skips_rhs() {
        assert!(!and_lazy(|| false, || panic!("rhs evaluated")));
        assert!(or_lazy(|| true, || panic!("rhs evaluated")));
    }

    #[test]
    fn glue_matches_truth_tables() {
        for (a, b) in PAIRS {
            assert_eq!(Glue::And.apply(a, || b), and(a, b));
            assert_eq!(Glue::Or.apply(a, || b), or(a, b));
            assert_eq!(Glue::Nand.apply(a, || b), nand(a, b));
            assert_eq!(Glue::Nor.apply(a, || b), nor(a, b));
        }
    }

    #[test]
    fn glue_short_circuits() {
        assert!(!Glue::And.apply(false, || panic!("step evaluated")));
        assert!(Glue::Or.apply(true, || panic!("step evaluated")));
        assert!(Glue::Nand.apply(false, || panic!("step evaluated")));
        assert!(!Glue::Nor.apply(true, || panic!("step evaluated")));
    }
}
