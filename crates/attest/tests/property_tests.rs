//! Property-based tests for attest.

use attest::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Rec {
    str_value: Option<String>,
}

fn length_spec(length: usize) -> ValidationSpec<Rec> {
    ValidationSpec::build(move |spec| {
        spec.field("strValue")
            .non_null()
            .string(|r: &Rec| r.str_value.as_deref(), move |s| s.assert_length(length))
    })
}

// ============================================================================
// DETERMINISM: apply(x) == apply(x)
// ============================================================================

proptest! {
    #[test]
    fn validation_is_deterministic(value in proptest::option::of(".{0,12}")) {
        let spec = length_spec(5);
        let first = spec.validate(Rec { str_value: value.clone() }).violations();
        let second = spec.validate(Rec { str_value: value }).violations();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rules_apply_is_deterministic(n in any::<i64>()) {
        let rules = Rules::new()
            .add(Rule::new(|n: &i64| {
                if *n % 2 == 0 { None } else { Some(Violation::new("n", "must be even")) }
            }))
            .add(Rule::new(|n: &i64| {
                if *n >= 0 { None } else { Some(Violation::new("n", "must be non-negative")) }
            }));

        prop_assert_eq!(rules.apply(&n), rules.apply(&n));
    }
}

// ============================================================================
// NULL POLICY: required-absent is exactly one violation, nullable is silent
// ============================================================================

proptest! {
    #[test]
    fn required_absent_is_exactly_one_violation(length in 1usize..20) {
        let violations = length_spec(length)
            .validate(Rec { str_value: None })
            .violations();

        prop_assert_eq!(violations.len(), 1);
        prop_assert_eq!(violations.list()[0].field(), "strValue");
    }

    #[test]
    fn nullable_absent_is_silent(length in 1usize..20) {
        let spec = ValidationSpec::build(move |spec| {
            spec.field("strValue")
                .nullable()
                .string(|r: &Rec| r.str_value.as_deref(), move |s| s.assert_length(length))
        });

        let rec = Rec { str_value: None };
        prop_assert!(spec.validate(rec).is_valid());
    }
}

// ============================================================================
// MERGE LAW: apply over a.merge(b) == apply(a) ++ apply(b)
// ============================================================================

fn threshold_rule(field: &'static str, threshold: i64) -> Rule<i64> {
    Rule::new(move |n: &i64| {
        if *n >= threshold {
            None
        } else {
            Some(Violation::new(field, format!("must be >= {threshold}")))
        }
    })
}

proptest! {
    #[test]
    fn merge_concatenates_violations_in_order(n in any::<i64>(), a in -50i64..50, b in -50i64..50) {
        let left = Rules::new().add(threshold_rule("left", a));
        let right = Rules::new().add(threshold_rule("right", b));

        let separate: Vec<Violation> = Rules::new()
            .add(threshold_rule("left", a))
            .apply(&n)
            .iter()
            .chain(Rules::new().add(threshold_rule("right", b)).apply(&n).iter())
            .cloned()
            .collect();

        let merged: Vec<Violation> = left.merge(right).apply(&n).iter().cloned().collect();
        prop_assert_eq!(merged, separate);
    }
}

// ============================================================================
// INDEX PATHS: the i-th offending item reports at field[i]
// ============================================================================

proptest! {
    #[test]
    fn item_violations_round_trip_indices(tags in proptest::collection::vec(".{0,4}", 0..8)) {
        #[derive(Debug)]
        struct Tagged { tags: Option<Vec<String>> }

        let spec = ValidationSpec::build(|spec| {
            spec.field("tags").non_null().iterable().strings(
                |t: &Tagged| t.tags.as_ref(),
                |items| items.each_item(|s| s.assert_max_length(2)),
            )
        });

        let expected: Vec<String> = tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| tag.chars().count() > 2)
            .map(|(index, _)| format!("tags[{index}]"))
            .collect();

        let violations = spec.validate(Tagged { tags: Some(tags) }).violations();
        let actual: Vec<String> = violations
            .iter()
            .map(|v| v.field().to_owned())
            .collect();

        prop_assert_eq!(actual, expected);
    }
}

// ============================================================================
// OUTCOME LAWS: invalid transforms are no-ops, valid transforms compose
// ============================================================================

proptest! {
    #[test]
    fn invalid_map_preserves_violations(message in ".{1,20}") {
        let violations = Violations::of([Violation::new("field", message)]);
        let invalid: Valid<i64> = Valid::invalid(violations.clone());

        let mapped: Valid<String> = invalid.map(|n| n.to_string());
        prop_assert!(mapped.is_invalid());
        prop_assert_eq!(mapped.violations(), violations);
    }

    #[test]
    fn valid_map_composes(n in any::<i32>()) {
        let chained = Valid::valid(n).map(i64::from).map(|n| n + 1);
        prop_assert_eq!(chained.into_option(), Some(i64::from(n) + 1));
    }

    #[test]
    fn persistent_add_never_mutates_the_original(count in 0usize..6) {
        let original = Violations::of(
            (0..count).map(|i| Violation::new(format!("f{i}"), "m")),
        );
        let grown = original.add(Violation::new("extra", "m"));

        prop_assert_eq!(original.len(), count);
        prop_assert_eq!(grown.len(), count + 1);
    }
}
