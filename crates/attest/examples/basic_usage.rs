//! Basic usage example for attest.

use attest::prelude::*;

#[derive(Debug)]
struct SignupForm {
    username: Option<String>,
    age: Option<u32>,
}

fn main() {
    // Build the spec once; validate as many subjects as needed.
    let spec = ValidationSpec::build(|spec| {
        spec.field("username")
            .non_null()
            .string(
                |f: &SignupForm| f.username.as_deref(),
                |s| s.assert_not_blank().assert_length_range(3, 20),
            )
            .field("age")
            .non_null()
            .number(|f: &SignupForm| f.age.as_ref(), |n| n.assert_in_range(18, 130))
    });

    let ok = SignupForm {
        username: Some("alice".into()),
        age: Some(30),
    };
    match spec.validate(ok).into_option() {
        Some(form) => println!("accepted: {form:?}"),
        None => println!("rejected"),
    }

    let bad = SignupForm {
        username: Some("  ".into()),
        age: None,
    };
    let outcome = spec.validate(bad);
    println!("valid: {}", outcome.is_valid());
    for violation in &outcome.violations() {
        println!("  {violation}");
    }
}
