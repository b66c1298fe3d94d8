//! Nested objects and collections: indexed paths and cross-level predicates.

use attest::prelude::*;

#[derive(Debug)]
struct LineItem {
    sku: Option<String>,
    quantity: Option<u32>,
}

#[derive(Debug)]
struct Order {
    max_per_line: u32,
    items: Option<Vec<LineItem>>,
}

fn main() {
    let spec = ValidationSpec::build(|spec| {
        spec.field("items").non_null().iterable().nested(
            |o: &Order| o.items.as_ref(),
            |items| {
                items
                    .assert_not_empty()
                    .assert_max_size(10)
                    .each_item(|item| {
                        item.field("sku")
                            .non_null()
                            .string(|i: &LineItem| i.sku.as_deref(), |s| s.assert_not_blank())
                            .field("quantity")
                            .non_null()
                            .custom(
                                |i: &LineItem| i.quantity.as_ref(),
                                |c| {
                                    c.assert_true_with(
                                        |cx: Context<'_, u32, LineItem, Order>| {
                                            *cx.value() <= cx.root().max_per_line
                                        },
                                        "quantity exceeds the per-line maximum",
                                    )
                                },
                            )
                    })
            },
        )
    });

    let order = Order {
        max_per_line: 5,
        items: Some(vec![
            LineItem {
                sku: Some("A-1".into()),
                quantity: Some(2),
            },
            LineItem {
                sku: Some("  ".into()),
                quantity: Some(9),
            },
        ]),
    };

    // The second item fails twice: blank sku, quantity over the root's limit.
    for violation in &spec.validate(order).violations() {
        println!("{violation}");
    }
}
