//! Prelude module for convenient imports.
//!
//! A single `use attest::prelude::*;` brings in the result types, the rule
//! set primitives and the whole spec-chain surface.

pub use crate::core::{Rule, Rules, Valid, ValidationFailure, Violation, Violations};
pub use crate::spec::{
    Context, CustomAssertions, FieldSpec, IterableSpec, NestedIterableAssertions, NullSpec,
    NumberAssertions, NumberIterableAssertions, Spec, StringAssertions, StringIterableAssertions,
    ValidationSpec,
};
