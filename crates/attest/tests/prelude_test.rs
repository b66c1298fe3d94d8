//! Integration tests for the prelude module.
//!
//! Verifies that `use attest::prelude::*` brings in everything a consumer
//! needs for common validation scenarios.

use attest::prelude::*;

#[derive(Debug)]
struct User {
    name: Option<String>,
    age: Option<u32>,
}

// ============================================================================
// PRELUDE IMPORT SMOKE TEST
// ============================================================================

#[test]
fn prelude_provides_the_spec_chain() {
    let spec = ValidationSpec::build(|spec| {
        spec.field("name")
            .non_null()
            .string(|u: &User| u.name.as_deref(), |s| s.assert_not_blank())
            .field("age")
            .nullable()
            .number(|u: &User| u.age.as_ref(), |n| n.assert_gte(0))
    });

    let outcome = spec.validate(User {
        name: Some("Alice".into()),
        age: None,
    });
    assert!(outcome.is_valid());
}

#[test]
fn prelude_provides_the_rule_primitives() {
    let rules: Rules<u32> = Rules::new().add(Rule::new(|n: &u32| {
        if *n > 0 {
            None
        } else {
            Some(Violation::new("n", "must be positive"))
        }
    }));

    let spec = ValidationSpec::from_rules(rules);
    assert!(spec.validate(1).is_valid());
    assert!(spec.validate(0).is_invalid());
}

#[test]
fn prelude_provides_the_outcome_types() {
    let violations = Violations::of([Violation::of("root failure")]);
    let invalid: Valid<()> = Valid::invalid(violations);

    let failure: ValidationFailure = invalid.ok_or_fail().unwrap_err();
    assert_eq!(failure.violations().len(), 1);
}
