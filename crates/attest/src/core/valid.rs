//! The validation outcome type.
//!
//! [`Valid`] is a tagged union over a successfully validated value or a
//! non-empty list of violations. The valid value is held behind an explicit
//! compute-once cell so that `map` chains stay lazy: the mapper runs at most
//! once, on the first terminal read, and the computed value is cached.
//!
//! Invalid is terminal for the transform chain: `map`/`and_then` never run
//! their mapper and the violation list propagates unchanged into the
//! re-typed result.

use std::cell::{Cell, OnceCell};
use std::fmt;

use crate::core::error::ValidationFailure;
use crate::core::violation::Violations;

// ============================================================================
// ONCE VALUE
// ============================================================================

/// Compute-once, cache-thereafter wrapper around the valid value.
struct OnceValue<T> {
    cell: OnceCell<T>,
    init: Cell<Option<Box<dyn FnOnce() -> T>>>,
}

impl<T: 'static> OnceValue<T> {
    fn ready(value: T) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(value);
        Self {
            cell,
            init: Cell::new(None),
        }
    }

    fn lazy(init: impl FnOnce() -> T + 'static) -> Self {
        Self {
            cell: OnceCell::new(),
            init: Cell::new(Some(Box::new(init))),
        }
    }

    fn force(&self) -> &T {
        self.cell.get_or_init(|| {
            // Invariant: `init` is present exactly when `cell` is empty.
            let init = self
                .init
                .take()
                .expect("initializer missing for uncomputed value");
            init()
        })
    }

    fn peek(&self) -> Option<&T> {
        self.cell.get()
    }

    fn into_inner(self) -> T {
        match self.cell.into_inner() {
            Some(value) => value,
            None => {
                let init = self
                    .init
                    .into_inner()
                    .expect("initializer missing for uncomputed value");
                init()
            }
        }
    }
}

// ============================================================================
// VALID
// ============================================================================

enum Inner<S> {
    Valid(OnceValue<S>),
    Invalid(Violations),
}

/// The outcome of applying a rule set to a subject.
///
/// # Examples
///
/// ```rust,ignore
/// use attest::core::{Valid, Violation, Violations};
///
/// let ok = Valid::valid("value").map(str::to_uppercase);
/// assert!(ok.is_valid());
///
/// let bad: Valid<&str> = Valid::invalid(Violations::of([Violation::of("nope")]));
/// assert_eq!(bad.violations().len(), 1);
/// ```
pub struct Valid<S> {
    inner: Inner<S>,
}

impl<S: 'static> Valid<S> {
    /// Wraps an already-computed valid value.
    pub fn valid(value: S) -> Self {
        Self {
            inner: Inner::Valid(OnceValue::ready(value)),
        }
    }

    /// Wraps a valid value that is computed on first read and cached.
    pub fn valid_with(value: impl FnOnce() -> S + 'static) -> Self {
        Self {
            inner: Inner::Valid(OnceValue::lazy(value)),
        }
    }

    /// Wraps a non-empty violation list.
    ///
    /// # Panics
    ///
    /// Panics if `violations` is empty. An invalid result without findings
    /// is a programming error, caught at construction rather than deferred.
    pub fn invalid(violations: Violations) -> Self {
        assert!(!violations.is_empty(), "violations must not be empty");
        Self {
            inner: Inner::Invalid(violations),
        }
    }

    /// Transforms the valid value; lazy, runs at most once.
    ///
    /// On an invalid result the mapper is never invoked and the violations
    /// carry over into the re-typed result unchanged.
    pub fn map<T: 'static>(self, mapper: impl FnOnce(S) -> T + 'static) -> Valid<T> {
        match self.inner {
            Inner::Valid(value) => Valid {
                inner: Inner::Valid(OnceValue::lazy(move || mapper(value.into_inner()))),
            },
            Inner::Invalid(violations) => Valid {
                inner: Inner::Invalid(violations),
            },
        }
    }

    /// Transforms the valid value with a mapper that may itself fail.
    ///
    /// The mapper's invalid result propagates; an already-invalid receiver
    /// skips the mapper entirely.
    pub fn and_then<T: 'static>(self, mapper: impl FnOnce(S) -> Valid<T>) -> Valid<T> {
        match self.inner {
            Inner::Valid(value) => mapper(value.into_inner()),
            Inner::Invalid(violations) => Valid {
                inner: Inner::Invalid(violations),
            },
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.inner, Inner::Valid(_))
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// The valid value, forcing (and caching) any pending computation.
    #[must_use]
    pub fn value(&self) -> Option<&S> {
        match &self.inner {
            Inner::Valid(value) => Some(value.force()),
            Inner::Invalid(_) => None,
        }
    }

    /// The violations; empty for a valid result.
    #[must_use]
    pub fn violations(&self) -> Violations {
        match &self.inner {
            Inner::Valid(_) => Violations::new(),
            Inner::Invalid(violations) => violations.clone(),
        }
    }

    /// The valid value, or `None` for an invalid result.
    #[must_use]
    pub fn into_option(self) -> Option<S> {
        match self.inner {
            Inner::Valid(value) => Some(value.into_inner()),
            Inner::Invalid(_) => None,
        }
    }

    /// The valid value, or the caller-constructed error for an invalid one.
    ///
    /// Violation-to-error construction is entirely the caller's; the
    /// constructor runs only on the invalid path.
    pub fn into_result<E>(self, on_invalid: impl FnOnce(&Violations) -> E) -> Result<S, E> {
        match self.inner {
            Inner::Valid(value) => Ok(value.into_inner()),
            Inner::Invalid(violations) => Err(on_invalid(&violations)),
        }
    }

    /// [`into_result`](Valid::into_result) with the crate's own error type.
    pub fn ok_or_fail(self) -> Result<S, ValidationFailure> {
        self.into_result(|violations| ValidationFailure::new(violations.clone()))
    }
}

impl<S: fmt::Debug + 'static> fmt::Debug for Valid<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Valid(value) => match value.peek() {
                Some(value) => f.debug_tuple("Valid").field(value).finish(),
                None => f.write_str("Valid(<pending>)"),
            },
            Inner::Invalid(violations) => f.debug_tuple("Invalid").field(violations).finish(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::violation::Violation;
    use std::cell::Cell;
    use std::rc::Rc;

    fn one_violation() -> Violations {
        Violations::of([Violation::new("field", "message")])
    }

    #[test]
    #[should_panic(expected = "violations must not be empty")]
    fn invalid_rejects_empty_violations() {
        let _ = Valid::<String>::invalid(Violations::new());
    }

    #[test]
    fn valid_value_is_memoized() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let valid = Valid::valid_with(move || {
            counter.set(counter.get() + 1);
            "value"
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(valid.value(), Some(&"value"));
        assert_eq!(valid.value(), Some(&"value"));
        assert_eq!(valid.into_option(), Some("value"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn map_is_lazy_until_read() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mapped = Valid::valid(2).map(move |n| {
            counter.set(counter.get() + 1);
            n * 10
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(mapped.into_option(), Some(20));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn invalid_map_never_invokes_mapper() {
        let expected = one_violation();
        let invalid: Valid<i32> = Valid::invalid(expected.clone());

        let mapped: Valid<String> = invalid.map(|_| unreachable!("mapper must not run"));
        assert!(mapped.is_invalid());
        assert_eq!(mapped.violations(), expected);
    }

    #[test]
    fn and_then_propagates_invalid_mapper_result() {
        let expected = one_violation();
        let violations = expected.clone();
        let result = Valid::valid(1).and_then(move |_| Valid::<i32>::invalid(violations));

        assert!(result.is_invalid());
        assert_eq!(result.violations(), expected);
    }

    #[test]
    fn and_then_chains_valid_results() {
        let result = Valid::valid(2).and_then(|n| Valid::valid(n + 1));
        assert_eq!(result.into_option(), Some(3));
    }

    #[test]
    fn invalid_and_then_skips_mapper() {
        let invalid: Valid<i32> = Valid::invalid(one_violation());
        let result: Valid<i32> = invalid.and_then(|_| unreachable!("mapper must not run"));
        assert!(result.is_invalid());
    }

    #[test]
    fn into_result_invokes_constructor_only_when_invalid() {
        let ok: Result<i32, String> = Valid::valid(1).into_result(|_| unreachable!());
        assert_eq!(ok, Ok(1));

        let err: Result<i32, usize> =
            Valid::invalid(one_violation()).into_result(|violations| violations.len());
        assert_eq!(err, Err(1));
    }

    #[test]
    fn into_option_is_empty_for_invalid() {
        let invalid: Valid<i32> = Valid::invalid(one_violation());
        assert_eq!(invalid.into_option(), None);
    }

    #[test]
    fn ok_or_fail_carries_violations() {
        let failure = Valid::<i32>::invalid(one_violation())
            .ok_or_fail()
            .unwrap_err();
        assert_eq!(failure.violations().len(), 1);
    }

    #[test]
    fn violations_are_empty_for_valid() {
        assert!(Valid::valid(1).violations().is_empty());
    }

    #[test]
    fn debug_does_not_force_pending_values() {
        let valid = Valid::valid_with(|| 42);
        assert_eq!(format!("{valid:?}"), "Valid(<pending>)");
        assert_eq!(valid.value(), Some(&42));
        assert_eq!(format!("{valid:?}"), "Valid(42)");
    }
}
