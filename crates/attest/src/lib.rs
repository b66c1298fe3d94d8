//! # attest
//!
//! Declarative validation rules over object graphs: describe constraints on
//! scalar fields, nested objects and collections with a staged fluent
//! builder, compile them once into an immutable rule set, and apply that set
//! to any number of subjects. Each application walks the subject once and
//! produces either the validated value or the full ordered list of
//! violations with dotted/indexed field paths (`"nested.list[2].value"`).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use attest::prelude::*;
//!
//! struct User { name: Option<String>, tags: Option<Vec<String>> }
//!
//! let spec = ValidationSpec::build(|spec| {
//!     spec.field("name")
//!         .non_null()
//!         .string(|u: &User| u.name.as_deref(), |s| s.assert_not_blank().assert_max_length(20))
//!         .field("tags")
//!         .nullable()
//!         .iterable()
//!         .strings(|u: &User| u.tags.as_ref(), |t| {
//!             t.assert_max_size(10).each_item(|s| s.assert_not_blank())
//!         })
//! });
//!
//! let user = User { name: Some("Alice".into()), tags: None };
//! assert!(spec.validate(user).is_valid());
//! ```
//!
//! ## Design
//!
//! - Violations are cumulative: every declared assertion runs, findings are
//!   reported together, one field's failure never suppresses another's.
//! - A required field that is absent reports exactly one "expected to be
//!   non-null" violation and skips the assertions nested under it.
//! - Malformed declarations (zero lengths, inverted ranges, an invalid
//!   outcome with no violations) panic at build time; validation findings
//!   are always plain data, never panics.

// Deep builder generics (Spec<C, R>, Context<'_, V, P, R>) produce involved
// signatures that are inherent to the staged-chain architecture.
#![allow(clippy::type_complexity)]

pub mod core;
pub mod prelude;
pub mod spec;
