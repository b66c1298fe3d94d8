//! Rules and ordered rule sets.
//!
//! A [`Rule`] is a compiled, pure check against a subject. A [`Rules`] set is
//! an ordered, mergeable collection of them; applying a set walks the rules
//! in declaration order and accumulates every violation. There is no
//! first-failure short-circuit; findings are cumulative.

use std::fmt;

use crate::core::violation::{Collector, Violation, Violations};

type Check<S> = Box<dyn Fn(&S, &mut Collector) + Send + Sync>;

// ============================================================================
// RULE
// ============================================================================

/// A pure check against a subject, contributing zero or more violations.
///
/// Rules are stateless: they close over whatever field path and predicate
/// they were built with and never mutate the subject.
pub struct Rule<S> {
    check: Check<S>,
}

impl<S: 'static> Rule<S> {
    /// Creates a rule from a single-contribution check.
    pub fn new(check: impl Fn(&S) -> Option<Violation> + Send + Sync + 'static) -> Self {
        Self {
            check: Box::new(move |subject, out| {
                if let Some(violation) = check(subject) {
                    out.push(violation);
                }
            }),
        }
    }

    /// Creates a rule that may contribute several violations per subject
    /// (nested groups, per-item collection checks).
    pub(crate) fn collecting(check: impl Fn(&S, &mut Collector) + Send + Sync + 'static) -> Self {
        Self {
            check: Box::new(check),
        }
    }

    pub(crate) fn eval(&self, subject: &S, out: &mut Collector) {
        (self.check)(subject, out);
    }
}

impl<S> fmt::Debug for Rule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("check", &"<fn>").finish()
    }
}

// ============================================================================
// RULES
// ============================================================================

/// An ordered, mergeable set of rules over one subject type.
///
/// `add` and `merge` consume the receiver: a set under construction is owned
/// linearly, so appending mutates the owned buffer without invalidating any
/// previously published set. A compiled set is immutable and `Send + Sync`:
/// applying it to different subjects from different threads is safe because
/// `apply` touches no shared mutable state.
pub struct Rules<S> {
    rules: Vec<Rule<S>>,
}

impl<S: 'static> Rules<S> {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule, preserving declaration order.
    #[must_use = "add consumes the set and returns the extended one"]
    pub fn add(mut self, rule: Rule<S>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Concatenates `other` onto this set, preserving order: applying the
    /// merged set yields exactly this set's violations followed by `other`'s.
    #[must_use = "merge consumes the set and returns the combined one"]
    pub fn merge(mut self, other: Rules<S>) -> Self {
        if other.rules.is_empty() {
            return self;
        }
        self.rules.extend(other.rules);
        self
    }

    /// Applies every rule to `subject` in declaration order.
    ///
    /// Deterministic and side-effect-free: the same subject always produces
    /// the same ordered violation list.
    #[must_use = "validation findings must be checked"]
    pub fn apply(&self, subject: &S) -> Violations {
        let mut out = Collector::default();
        for rule in &self.rules {
            rule.eval(subject, &mut out);
        }
        out.into_violations()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl<S: 'static> Default for Rules<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Rules<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules").field("len", &self.rules.len()).finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn failing(field: &'static str) -> Rule<i32> {
        Rule::new(move |_| Some(Violation::new(field, "always fails")))
    }

    fn passing() -> Rule<i32> {
        Rule::new(|_| None)
    }

    #[test]
    fn apply_preserves_declaration_order() {
        let rules = Rules::new()
            .add(failing("first"))
            .add(passing())
            .add(failing("second"));

        let violations = rules.apply(&0);
        let fields: Vec<&str> = violations.iter().map(Violation::field).collect();
        assert_eq!(fields, ["first", "second"]);
    }

    #[test]
    fn apply_runs_every_rule() {
        // No short-circuit: both failures are reported.
        let rules = Rules::new().add(failing("a")).add(failing("b"));
        assert_eq!(rules.apply(&0).len(), 2);
    }

    #[test]
    fn merge_concatenates_in_order() {
        let left = Rules::new().add(failing("a"));
        let right = Rules::new().add(failing("b")).add(failing("c"));

        let merged = left.merge(right);
        let violations = merged.apply(&0);
        let fields: Vec<&str> = violations.iter().map(Violation::field).collect();
        assert_eq!(fields, ["a", "b", "c"]);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let rules = Rules::new().add(failing("a")).merge(Rules::new());
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn apply_is_deterministic() {
        let rules = Rules::new()
            .add(Rule::new(|n: &i32| {
                if *n < 10 {
                    Some(Violation::new("n", "too small"))
                } else {
                    None
                }
            }))
            .add(failing("tail"));

        assert_eq!(rules.apply(&3), rules.apply(&3));
        assert_eq!(rules.apply(&3).len(), 2);
        assert_eq!(rules.apply(&12).len(), 1);
    }

    #[test]
    fn conditional_rule_contributes_nothing_on_pass() {
        let rules = Rules::new().add(passing());
        assert!(rules.apply(&0).is_empty());
    }

    #[test]
    fn compiled_rules_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}
        let rules: Rules<i32> = Rules::new().add(passing());
        assert_send_sync(&rules);
    }
}
