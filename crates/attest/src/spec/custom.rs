//! Custom assertions with ancestor access.

use crate::core::violation::Violation;
use crate::spec::context::Context;

pub(crate) type CustomCheck<T, C, R> =
    Box<dyn for<'a> Fn(Context<'a, T, C, R>, &str) -> Option<Violation> + Send + Sync>;

/// Assertion builder for caller-supplied predicates.
///
/// Predicates see a [`Context`]: the extracted value, the node it came from,
/// and the root subject, so a check can compare the value against a sibling
/// or an ancestor field.
pub struct CustomAssertions<T: ?Sized, C, R> {
    checks: Vec<CustomCheck<T, C, R>>,
}

impl<T, C, R> CustomAssertions<T, C, R>
where
    T: ?Sized + 'static,
    C: 'static,
    R: 'static,
{
    pub(crate) fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub(crate) fn into_checks(self) -> Vec<CustomCheck<T, C, R>> {
        self.checks
    }

    /// The predicate must hold; failure contributes the default message.
    #[must_use]
    pub fn assert_true(
        mut self,
        predicate: impl for<'a> Fn(Context<'a, T, C, R>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.checks.push(Box::new(move |cx, path| {
            if predicate(cx) {
                None
            } else {
                Some(Violation::new(
                    path,
                    format!("Field [{path}] does not satisfy custom assertion"),
                ))
            }
        }));
        self
    }

    /// The predicate must hold; failure contributes the supplied message.
    #[must_use]
    pub fn assert_true_with(
        mut self,
        predicate: impl for<'a> Fn(Context<'a, T, C, R>) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        self.checks.push(Box::new(move |cx, path| {
            if predicate(cx) {
                None
            } else {
                Some(Violation::new(path, message.clone()))
            }
        }));
        self
    }
}

impl<T: ?Sized, C, R> std::fmt::Debug for CustomAssertions<T, C, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomAssertions")
            .field("checks", &self.checks.len())
            .finish()
    }
}
