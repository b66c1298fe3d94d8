//! The crate's `std::error::Error` surface.

use thiserror::Error;

use crate::core::violation::Violations;

/// A failed validation, usable anywhere a standard error is expected.
///
/// Produced by [`Valid::ok_or_fail`](crate::core::Valid::ok_or_fail); callers
/// that want their own error type supply a constructor to
/// [`Valid::into_result`](crate::core::Valid::into_result) instead.
#[derive(Debug, Clone, Error)]
#[error("validation failed with {} violation(s)", .violations.len())]
pub struct ValidationFailure {
    violations: Violations,
}

impl ValidationFailure {
    pub(crate) fn new(violations: Violations) -> Self {
        Self { violations }
    }

    /// The violations that caused the failure, in declaration order.
    #[must_use]
    pub fn violations(&self) -> &Violations {
        &self.violations
    }
}
