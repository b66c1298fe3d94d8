//! The compiled validation entry point.

use std::fmt;

use crate::core::rule::Rules;
use crate::core::valid::Valid;
use crate::core::violation::Violations;
use crate::spec::Spec;

/// A reusable, repeatable validation function compiled from a spec chain.
///
/// Building happens once; the compiled rule set is immutable and applying it
/// never mutates it, so one spec can validate any number of subjects, from
/// any number of threads (the set is `Send + Sync`).
///
/// # Examples
///
/// ```rust,ignore
/// use attest::prelude::*;
///
/// struct Rec { str_value: Option<String> }
///
/// let spec = ValidationSpec::build(|spec| {
///     spec.field("strValue")
///         .non_null()
///         .string(|r: &Rec| r.str_value.as_deref(), |s| s.assert_length(5))
/// });
///
/// assert!(spec.validate(Rec { str_value: Some("abcde".into()) }).is_valid());
/// ```
pub struct ValidationSpec<S> {
    rules: Rules<S>,
}

impl<S: 'static> ValidationSpec<S> {
    /// Builds a spec chain and compiles it into a validation function.
    pub fn build<F>(assemble: F) -> Self
    where
        F: FnOnce(Spec<S, S>) -> Spec<S, S>,
    {
        Self {
            rules: assemble(Spec::new()).into_rules(),
        }
    }

    /// Wraps a hand-assembled rule set.
    pub fn from_rules(rules: Rules<S>) -> Self {
        Self { rules }
    }

    /// The compiled rule set.
    #[must_use]
    pub fn rules(&self) -> &Rules<S> {
        &self.rules
    }

    /// Validates one subject, producing a fresh [`Valid`] outcome.
    #[must_use = "the validation outcome must be checked"]
    pub fn validate(&self, subject: S) -> Valid<S> {
        let violations = self.rules.apply(&subject);
        if violations.is_empty() {
            Valid::valid(subject)
        } else {
            Valid::invalid(violations)
        }
    }

    /// Converts the spec into a plain validation function.
    pub fn into_fn(self) -> impl Fn(S) -> Valid<S> {
        move |subject| self.validate(subject)
    }

    /// Converts the spec into a function that maps invalid outcomes through
    /// a caller-supplied error constructor.
    pub fn into_result_fn<E>(
        self,
        on_invalid: impl Fn(&Violations) -> E,
    ) -> impl Fn(S) -> Result<S, E> {
        move |subject| self.validate(subject).into_result(&on_invalid)
    }
}

impl<S> fmt::Debug for ValidationSpec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationSpec")
            .field("rules", &self.rules)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rule::Rule;
    use crate::core::violation::Violation;

    struct Rec {
        value: Option<i32>,
    }

    fn spec() -> ValidationSpec<Rec> {
        ValidationSpec::build(|spec| {
            spec.field("value")
                .non_null()
                .number(|r: &Rec| r.value.as_ref(), |n| n.assert_in_range(1, 10))
        })
    }

    #[test]
    fn validate_returns_valid_on_empty_violations() {
        let outcome = spec().validate(Rec { value: Some(5) });
        assert!(outcome.is_valid());
        assert!(outcome.violations().is_empty());
    }

    #[test]
    fn validate_returns_invalid_with_violations() {
        let outcome = spec().validate(Rec { value: Some(11) });
        assert!(outcome.is_invalid());
        assert_eq!(outcome.violations().len(), 1);
    }

    #[test]
    fn spec_is_reusable_across_subjects() {
        let spec = spec();
        assert!(spec.validate(Rec { value: Some(1) }).is_valid());
        assert!(spec.validate(Rec { value: Some(0) }).is_invalid());
        assert!(spec.validate(Rec { value: Some(10) }).is_valid());
    }

    #[test]
    fn into_fn_behaves_like_validate() {
        let validate = spec().into_fn();
        assert!(validate(Rec { value: Some(5) }).is_valid());
        assert!(validate(Rec { value: None }).is_invalid());
    }

    #[test]
    fn into_result_fn_maps_violations_through_constructor() {
        let validate = spec().into_result_fn(|violations| violations.len());
        assert!(validate(Rec { value: Some(5) }).is_ok());
        assert_eq!(validate(Rec { value: None }).err(), Some(1));
    }

    #[test]
    fn from_rules_wraps_hand_assembled_sets() {
        let rules = Rules::new().add(Rule::new(|r: &Rec| {
            if r.value.is_some() {
                None
            } else {
                Some(Violation::new("value", "missing"))
            }
        }));
        let spec = ValidationSpec::from_rules(rules);
        assert!(spec.validate(Rec { value: Some(1) }).is_valid());
        assert!(spec.validate(Rec { value: None }).is_invalid());
    }
}
