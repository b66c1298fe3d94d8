//! Field selection and null-policy states of the spec chain.
//!
//! Every terminal operation shares one gate: the field value is extracted
//! exactly once per validated subject. An absent value under a `non_null`
//! policy contributes exactly one "expected to be non-null" violation and
//! skips the declared assertions; an absent value under `nullable` skips
//! them silently; a present value runs every declared assertion
//! independently.

use crate::core::violation::Violation;
use crate::spec::context::Context;
use crate::spec::custom::CustomAssertions;
use crate::spec::iterable::IterableSpec;
use crate::spec::number::NumberAssertions;
use crate::spec::string::StringAssertions;
use crate::spec::{Spec, boxed_check};

pub(crate) fn non_null_message(name: &str) -> String {
    format!("Field [{name}] is expected to be non-null")
}

// ============================================================================
// FIELD SPEC
// ============================================================================

/// A selected field, waiting for a null policy or a bare null assertion.
pub struct FieldSpec<C, R> {
    spec: Spec<C, R>,
    name: String,
}

impl<C, R> FieldSpec<C, R>
where
    C: 'static,
    R: 'static,
{
    pub(crate) fn new(spec: Spec<C, R>, name: String) -> Self {
        Self { spec, name }
    }

    /// The declared field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asserts the field is present; terminal, returns to the parent spec.
    #[must_use]
    pub fn assert_not_null<T: ?Sized>(
        self,
        extract: impl for<'a> Fn(&'a C) -> Option<&'a T> + Send + Sync + 'static,
    ) -> Spec<C, R> {
        let Self { spec, name } = self;
        let message = non_null_message(&name);
        spec.push(boxed_check(move |current, _root, out| {
            if extract(current).is_none() {
                out.push(Violation::new(name.clone(), message.clone()));
            }
        }))
    }

    /// Asserts the field is absent; terminal, returns to the parent spec.
    #[must_use]
    pub fn assert_null<T: ?Sized>(
        self,
        extract: impl for<'a> Fn(&'a C) -> Option<&'a T> + Send + Sync + 'static,
    ) -> Spec<C, R> {
        let Self { spec, name } = self;
        let message = format!("Field [{name}] is expected to be null");
        spec.push(boxed_check(move |current, _root, out| {
            if extract(current).is_some() {
                out.push(Violation::new(name.clone(), message.clone()));
            }
        }))
    }

    /// An absent value is a violation; assertions run only when present.
    #[must_use]
    pub fn non_null(self) -> NullSpec<C, R> {
        NullSpec {
            spec: self.spec,
            name: self.name,
            allow_null: false,
        }
    }

    /// An absent value is acceptable; assertions run only when present.
    #[must_use]
    pub fn nullable(self) -> NullSpec<C, R> {
        NullSpec {
            spec: self.spec,
            name: self.name,
            allow_null: true,
        }
    }
}

// ============================================================================
// NULL SPEC
// ============================================================================

/// A field with a chosen null policy, waiting for the assertion kind.
pub struct NullSpec<C, R> {
    spec: Spec<C, R>,
    name: String,
    allow_null: bool,
}

impl<C, R> NullSpec<C, R>
where
    C: 'static,
    R: 'static,
{
    /// Whether an absent value is acceptable for this field.
    #[must_use]
    pub fn allow_null(&self) -> bool {
        self.allow_null
    }

    /// Declares string assertions on the extracted value.
    #[must_use]
    pub fn string<T, E, F>(self, extract: E, assertions: F) -> Spec<C, R>
    where
        T: AsRef<str> + ?Sized,
        E: for<'a> Fn(&'a C) -> Option<&'a T> + Send + Sync + 'static,
        F: FnOnce(StringAssertions) -> StringAssertions,
    {
        let checks = assertions(StringAssertions::new()).into_checks();
        let Self {
            spec,
            name,
            allow_null,
        } = self;
        let absent = non_null_message(&name);
        spec.push(boxed_check(move |current, _root, out| {
            match extract(current) {
                None => {
                    if !allow_null {
                        out.push(Violation::new(name.clone(), absent.clone()));
                    }
                }
                Some(value) => {
                    let value = value.as_ref();
                    for check in &checks {
                        if let Some(violation) = check(value, &name) {
                            out.push(violation);
                        }
                    }
                }
            }
        }))
    }

    /// Declares number assertions on the extracted value.
    #[must_use]
    pub fn number<T, E, F>(self, extract: E, assertions: F) -> Spec<C, R>
    where
        T: PartialOrd + std::fmt::Display + Send + Sync + 'static,
        E: for<'a> Fn(&'a C) -> Option<&'a T> + Send + Sync + 'static,
        F: FnOnce(NumberAssertions<T>) -> NumberAssertions<T>,
    {
        let checks = assertions(NumberAssertions::new()).into_checks();
        let Self {
            spec,
            name,
            allow_null,
        } = self;
        let absent = non_null_message(&name);
        spec.push(boxed_check(move |current, _root, out| {
            match extract(current) {
                None => {
                    if !allow_null {
                        out.push(Violation::new(name.clone(), absent.clone()));
                    }
                }
                Some(value) => {
                    for check in &checks {
                        if let Some(violation) = check(value, &name) {
                            out.push(violation);
                        }
                    }
                }
            }
        }))
    }

    /// Declares a nested sub-chain on the extracted value.
    ///
    /// The sub-chain is compiled once; at validation time the nested value
    /// is derived from the outer subject once and every violation the
    /// sub-chain produces is re-scoped under this field's name.
    #[must_use]
    pub fn nested<T, E, F>(self, extract: E, assertions: F) -> Spec<C, R>
    where
        T: 'static,
        E: for<'a> Fn(&'a C) -> Option<&'a T> + Send + Sync + 'static,
        F: FnOnce(Spec<T, R>) -> Spec<T, R>,
    {
        let checks = assertions(Spec::new()).into_checks();
        let Self {
            spec,
            name,
            allow_null,
        } = self;
        let absent = non_null_message(&name);
        spec.push(boxed_check(move |current, root, out| {
            match extract(current) {
                None => {
                    if !allow_null {
                        out.push(Violation::new(name.clone(), absent.clone()));
                    }
                }
                Some(value) => {
                    let mark = out.mark();
                    for check in &checks {
                        check(value, root, out);
                    }
                    out.prefix_from(mark, &name);
                }
            }
        }))
    }

    /// Declares custom assertions on the extracted value.
    ///
    /// Predicates receive a [`Context`] with the value, the node it was
    /// extracted from, and the root subject.
    #[must_use]
    pub fn custom<T, E, F>(self, extract: E, assertions: F) -> Spec<C, R>
    where
        T: ?Sized + 'static,
        E: for<'a> Fn(&'a C) -> Option<&'a T> + Send + Sync + 'static,
        F: FnOnce(CustomAssertions<T, C, R>) -> CustomAssertions<T, C, R>,
    {
        let checks = assertions(CustomAssertions::new()).into_checks();
        let Self {
            spec,
            name,
            allow_null,
        } = self;
        let absent = non_null_message(&name);
        spec.push(boxed_check(move |current, root, out| {
            match extract(current) {
                None => {
                    if !allow_null {
                        out.push(Violation::new(name.clone(), absent.clone()));
                    }
                }
                Some(value) => {
                    let cx = Context::new(value, current, root);
                    for check in &checks {
                        if let Some(violation) = check(cx, &name) {
                            out.push(violation);
                        }
                    }
                }
            }
        }))
    }

    /// Moves to the collection sub-picker (`strings` / `numbers` / `nested`).
    #[must_use]
    pub fn iterable(self) -> IterableSpec<C, R> {
        IterableSpec::new(self.spec, self.name, self.allow_null)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::spec::ValidationSpec;

    struct Rec {
        value: Option<String>,
    }

    #[test]
    fn non_null_absent_reports_one_violation_and_skips_assertions() {
        let spec = ValidationSpec::build(|spec| {
            spec.field("value")
                .non_null()
                .string(|r: &Rec| r.value.as_deref(), |s| s.assert_length(5))
        });

        let violations = spec.validate(Rec { value: None }).violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.list()[0].field(), "value");
        assert_eq!(
            violations.list()[0].message(),
            "Field [value] is expected to be non-null"
        );
    }

    #[test]
    fn nullable_absent_skips_assertions_silently() {
        let spec = ValidationSpec::build(|spec| {
            spec.field("value")
                .nullable()
                .string(|r: &Rec| r.value.as_deref(), |s| s.assert_length(5))
        });

        assert!(spec.validate(Rec { value: None }).is_valid());
    }

    #[test]
    fn present_value_runs_every_assertion() {
        let spec = ValidationSpec::build(|spec| {
            spec.field("value").non_null().string(
                |r: &Rec| r.value.as_deref(),
                |s| s.assert_length(5).assert_not_blank(),
            )
        });

        // Both declared assertions fail independently.
        let violations = spec
            .validate(Rec {
                value: Some("  ".into()),
            })
            .violations();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn assert_null_flags_present_values() {
        let spec = ValidationSpec::build(|spec| {
            spec.field("value").assert_null(|r: &Rec| r.value.as_deref())
        });

        assert!(spec.validate(Rec { value: None }).is_valid());
        let violations = spec
            .validate(Rec {
                value: Some("123".into()),
            })
            .violations();
        assert_eq!(
            violations.list()[0].message(),
            "Field [value] is expected to be null"
        );
    }

    #[test]
    fn assert_not_null_flags_absent_values() {
        let spec = ValidationSpec::build(|spec| {
            spec.field("value")
                .assert_not_null(|r: &Rec| r.value.as_deref())
        });

        assert!(
            spec.validate(Rec {
                value: Some(String::new())
            })
            .is_valid()
        );
        assert!(spec.validate(Rec { value: None }).is_invalid());
    }
}
