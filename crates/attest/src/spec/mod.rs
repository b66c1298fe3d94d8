//! The staged spec chain: a fluent state machine for declaring rules.
//!
//! A chain is built once, compiled into an immutable [`Rules`] set, and the
//! set is applied to any number of subjects. Each stage is its own type and
//! every transition consumes the previous stage, so only legal transitions
//! exist at compile time:
//!
//! ```text
//! Spec ── field(name) ──► FieldSpec ── non_null()/nullable() ──► NullSpec
//!   ▲                         │                                     │
//!   │                         │ assert_not_null / assert_null       │ string / number /
//!   └─────────────────────────┴─────────────────────────────────────┘ nested / iterable / custom
//! ```
//!
//! None of the builder stages survive to validation time; only the compiled
//! rule set does.
//!
//! # Examples
//!
//! ```rust,ignore
//! use attest::prelude::*;
//!
//! struct User { name: Option<String>, age: Option<u32> }
//!
//! let spec = ValidationSpec::build(|spec| {
//!     spec.field("name")
//!         .non_null()
//!         .string(|u: &User| u.name.as_deref(), |s| s.assert_not_blank().assert_max_length(20))
//!         .field("age")
//!         .non_null()
//!         .number(|u: &User| u.age.as_ref(), |n| n.assert_in_range(18, 65))
//! });
//!
//! assert!(spec.validate(User { name: Some("Alice".into()), age: Some(30) }).is_valid());
//! ```

pub mod context;
pub mod custom;
pub mod field;
pub mod iterable;
pub mod number;
pub mod string;
pub mod validation;

pub use context::Context;
pub use custom::CustomAssertions;
pub use field::{FieldSpec, NullSpec};
pub use iterable::{
    IterableSpec, NestedIterableAssertions, NumberIterableAssertions, StringIterableAssertions,
};
pub use number::NumberAssertions;
pub use string::StringAssertions;
pub use validation::ValidationSpec;

use crate::core::rule::{Rule, Rules};
use crate::core::violation::Collector;

/// A compiled check scoped to one chain level: current node plus the root
/// subject for ancestor-aware predicates.
pub(crate) type Check<C, R> = Box<dyn for<'a> Fn(&'a C, &'a R, &mut Collector) + Send + Sync>;

pub(crate) fn boxed_check<C, R>(
    check: impl for<'a> Fn(&'a C, &'a R, &mut Collector) + Send + Sync + 'static,
) -> Check<C, R>
where
    C: 'static,
    R: 'static,
{
    Box::new(check)
}

// ============================================================================
// SPEC (root / assertions state)
// ============================================================================

/// The root state of a chain level; the only operation is selecting a field.
///
/// `C` is the node the chain currently describes, `R` the root subject. At
/// the top of a chain `C == R`; nested and per-item sub-chains keep `R`
/// threaded through so custom predicates can reach the root.
pub struct Spec<C, R> {
    checks: Vec<Check<C, R>>,
}

impl<C, R> Spec<C, R>
where
    C: 'static,
    R: 'static,
{
    pub(crate) fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Selects a field of the current node by name.
    #[must_use]
    pub fn field(self, name: impl Into<String>) -> FieldSpec<C, R> {
        FieldSpec::new(self, name.into())
    }

    pub(crate) fn push(mut self, check: Check<C, R>) -> Self {
        self.checks.push(check);
        self
    }

    pub(crate) fn into_checks(self) -> Vec<Check<C, R>> {
        self.checks
    }
}

impl<S: 'static> Spec<S, S> {
    /// Compiles a completed top-level chain into the rule set it declared.
    pub(crate) fn into_rules(self) -> Rules<S> {
        let mut rules = Rules::new();
        for check in self.checks {
            rules = rules.add(Rule::collecting(move |subject, out| {
                check(subject, subject, out);
            }));
        }
        rules
    }
}

impl<C, R> std::fmt::Debug for Spec<C, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spec")
            .field("checks", &self.checks.len())
            .finish()
    }
}
