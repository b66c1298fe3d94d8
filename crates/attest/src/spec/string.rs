//! String assertions.
//!
//! Checks receive the value together with the field path they report under,
//! so the same assertion set serves both plain fields (`"strValue"`) and
//! collection items (`"tags[2]"`).

use regex::Regex;

use crate::core::violation::Violation;

pub(crate) type StringCheck = Box<dyn Fn(&str, &str) -> Option<Violation> + Send + Sync>;

/// Assertion builder for an extracted string value.
///
/// Each method appends one independent check; a failing check contributes
/// one violation, and every check runs regardless of earlier failures.
pub struct StringAssertions {
    checks: Vec<StringCheck>,
}

impl StringAssertions {
    pub(crate) fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub(crate) fn into_checks(self) -> Vec<StringCheck> {
        self.checks
    }

    fn push(mut self, check: impl Fn(&str, &str) -> Option<Violation> + Send + Sync + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// The value must be the empty string.
    #[must_use]
    pub fn assert_empty(self) -> Self {
        self.push(|value, path| {
            if value.is_empty() {
                None
            } else {
                Some(Violation::new(
                    path,
                    format!("Field [{path}] must be empty string"),
                ))
            }
        })
    }

    /// The value must contain at least one character.
    #[must_use]
    pub fn assert_not_empty(self) -> Self {
        self.push(|value, path| {
            if value.is_empty() {
                Some(Violation::new(
                    path,
                    format!("Field [{path}] must be non-empty string"),
                ))
            } else {
                None
            }
        })
    }

    /// The value must contain at least one non-whitespace character.
    #[must_use]
    pub fn assert_not_blank(self) -> Self {
        self.push(|value, path| {
            if value.trim().is_empty() {
                Some(Violation::new(
                    path,
                    format!("Field [{path}] must be non-blank string"),
                ))
            } else {
                None
            }
        })
    }

    /// The value must have exactly `length` characters.
    ///
    /// Length is measured in Unicode scalar values.
    ///
    /// # Panics
    ///
    /// Panics at declaration time if `length` is zero (use
    /// [`assert_empty`](Self::assert_empty) for that).
    #[must_use]
    pub fn assert_length(self, length: usize) -> Self {
        assert!(length > 0, "length must be greater than zero");
        self.push(move |value, path| {
            let actual = value.chars().count();
            if actual == length {
                None
            } else {
                Some(
                    Violation::new(path, format!("Field [{path}] must have length [{length}]"))
                        .with_context("expected", length)
                        .with_context("actual", actual),
                )
            }
        })
    }

    /// The value must have at least `min_length` characters.
    ///
    /// # Panics
    ///
    /// Panics at declaration time if `min_length` is zero.
    #[must_use]
    pub fn assert_min_length(self, min_length: usize) -> Self {
        assert!(min_length > 0, "min_length must be greater than zero");
        self.push(move |value, path| {
            let actual = value.chars().count();
            if actual >= min_length {
                None
            } else {
                Some(
                    Violation::new(
                        path,
                        format!("Field [{path}] must have min length [{min_length}]"),
                    )
                    .with_context("min", min_length)
                    .with_context("actual", actual),
                )
            }
        })
    }

    /// The value must have at most `max_length` characters.
    ///
    /// # Panics
    ///
    /// Panics at declaration time if `max_length` is zero.
    #[must_use]
    pub fn assert_max_length(self, max_length: usize) -> Self {
        assert!(max_length > 0, "max_length must be greater than zero");
        self.push(move |value, path| {
            let actual = value.chars().count();
            if actual <= max_length {
                None
            } else {
                Some(
                    Violation::new(
                        path,
                        format!("Field [{path}] must have max length [{max_length}]"),
                    )
                    .with_context("max", max_length)
                    .with_context("actual", actual),
                )
            }
        })
    }

    /// The value's character count must fall in `[min_length, max_length]`.
    ///
    /// # Panics
    ///
    /// Panics at declaration time if `min_length > max_length`.
    #[must_use]
    pub fn assert_length_range(self, min_length: usize, max_length: usize) -> Self {
        assert!(
            min_length <= max_length,
            "min_length must not be greater than max_length"
        );
        self.push(move |value, path| {
            let actual = value.chars().count();
            if actual >= min_length && actual <= max_length {
                None
            } else {
                Some(
                    Violation::new(
                        path,
                        format!(
                            "Field [{path}] must have length in range [{min_length}, {max_length}]"
                        ),
                    )
                    .with_context("min", min_length)
                    .with_context("max", max_length)
                    .with_context("actual", actual),
                )
            }
        })
    }

    /// The value must match `pattern`.
    #[must_use]
    pub fn assert_matches(self, pattern: Regex) -> Self {
        self.push(move |value, path| {
            if pattern.is_match(value) {
                None
            } else {
                Some(Violation::new(
                    path,
                    format!("Field [{path}] must match pattern [{pattern}]"),
                ))
            }
        })
    }

    /// The value must satisfy a caller-supplied predicate.
    #[must_use]
    pub fn assert_custom(self, predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
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

impl std::fmt::Debug for StringAssertions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringAssertions")
            .field("checks", &self.checks.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
