//! Number assertions.
//!
//! Generic over any ordered, displayable value type, which covers the
//! integer and float primitives as well as decimal types from other crates.

use std::fmt::Display;

use crate::core::violation::Violation;

pub(crate) type NumberCheck<T> = Box<dyn Fn(&T, &str) -> Option<Violation> + Send + Sync>;

/// Assertion builder for an extracted number value.
pub struct NumberAssertions<T> {
    checks: Vec<NumberCheck<T>>,
}

impl<T> NumberAssertions<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub(crate) fn into_checks(self) -> Vec<NumberCheck<T>> {
        self.checks
    }

    fn push(mut self, check: impl Fn(&T, &str) -> Option<Violation> + Send + Sync + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// The value must be greater than or equal to `target`.
    #[must_use]
    pub fn assert_gte(self, target: T) -> Self {
        self.push(move |value, path| {
            if *value >= target {
                None
            } else {
                Some(
                    Violation::new(
                        path,
                        format!("Field [{path}] must be greater than or equal to [{target}]"),
                    )
                    .with_context("min", &target),
                )
            }
        })
    }

    /// The value must be less than or equal to `target`.
    #[must_use]
    pub fn assert_lte(self, target: T) -> Self {
        self.push(move |value, path| {
            if *value <= target {
                None
            } else {
                Some(
                    Violation::new(
                        path,
                        format!("Field [{path}] must be less than or equal to [{target}]"),
                    )
                    .with_context("max", &target),
                )
            }
        })
    }

    /// The value must fall in `[min, max]`, boundaries included.
    ///
    /// # Panics
    ///
    /// Panics at declaration time if `min > max`.
    #[must_use]
    pub fn assert_in_range(self, min: T, max: T) -> Self {
        assert!(min <= max, "min bound must not be greater than max bound");
        self.push(move |value, path| {
            if *value >= min && *value <= max {
                None
            } else {
                Some(
                    Violation::new(
                        path,
                        format!("Field [{path}] must be in range [{min}, {max}]"),
                    )
                    .with_context("min", &min)
                    .with_context("max", &max),
                )
            }
        })
    }

    /// The value must satisfy a caller-supplied predicate.
    #[must_use]
    pub fn assert_custom(self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.push(move |value, path| {
            if predicate(value) {
                None
            } else {
                Some(Violation::new(
                    path,
                    format!("Field [{path}] does not satisfy custom assertion"),
                ))
            }
        })
    }
}

impl<T> std::fmt::Debug for NumberAssertions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberAssertions")
            .field("checks", &self.checks.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T>(assertions: NumberAssertions<T>, value: &T) -> Vec<Violation>
    where
        T: PartialOrd + Display + Send + Sync + 'static,
    {
        assertions
            .into_checks()
            .iter()
            .filter_map(|check| check(value, "field"))
            .collect()
    }

    #[test]
    fn gte_boundary_passes() {
        assert!(run(NumberAssertions::new().assert_gte(5), &5).is_empty());
        assert_eq!(run(NumberAssertions::new().assert_gte(5), &4).len(), 1);
    }

    #[test]
    fn lte_boundary_passes() {
        assert!(run(NumberAssertions::new().assert_lte(5), &5).is_empty());
        assert_eq!(run(NumberAssertions::new().assert_lte(5), &6).len(), 1);
    }

    #[test]
    fn range_includes_both_boundaries() {
        let assertions = || NumberAssertions::new().assert_in_range(1, 10);
        assert!(run(assertions(), &1).is_empty());
        assert!(run(assertions(), &10).is_empty());
        assert_eq!(run(assertions(), &0).len(), 1);
        assert_eq!(run(assertions(), &11).len(), 1);
    }

    #[test]
    fn range_violation_carries_bounds() {
        let violations = run(NumberAssertions::new().assert_in_range(1, 10), &0);
        assert_eq!(
            violations[0].message(),
            "Field [field] must be in range [1, 10]"
        );
        assert_eq!(violations[0].context("min"), Some("1"));
        assert_eq!(violations[0].context("max"), Some("10"));
    }

    #[test]
    fn works_for_floats() {
        let assertions = NumberAssertions::new().assert_in_range(1.0, 10.0);
        assert!(run(assertions, &5.5).is_empty());
    }

    #[test]
    #[should_panic(expected = "min bound must not be greater than max bound")]
    fn inverted_range_fails_fast() {
        let _ = NumberAssertions::new().assert_in_range(2, 1);
    }
}
