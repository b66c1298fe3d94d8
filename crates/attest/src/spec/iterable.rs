//! Collection assertions.
//!
//! An iterable field compiles into a single rule that extracts the source
//! sequence once per validated subject, materializes it once (the source may
//! be single-pass), and feeds the materialized list to every declared
//! segment (size assertions and per-item assertion groups) in declaration
//! order. A size failure does not suppress per-item checks; all segments run
//! independently.
//!
//! Per-item violations are re-scoped under `field[index]`, so the 3rd
//! element of `items` reports at `items[2]` and a nested field under it at
//! `items[2].value`.

use crate::core::violation::{Collector, Violation};
use crate::spec::context::Context;
use crate::spec::field::non_null_message;
use crate::spec::number::NumberAssertions;
use crate::spec::string::StringAssertions;
use crate::spec::{Spec, boxed_check};

/// One declared segment of a collection assertion group, fed the
/// materialized items plus the owning node and root for ancestor access.
pub(crate) type ItemSegment<T, C, R> =
    Box<dyn for<'a> Fn(&[&'a T], &'a C, &'a R, &mut Collector, &str) + Send + Sync>;

// ============================================================================
// ITERABLE SPEC (collection-kind picker)
// ============================================================================

/// Picks the item kind of a collection field.
pub struct IterableSpec<C, R> {
    spec: Spec<C, R>,
    name: String,
    allow_null: bool,
}

impl<C, R> IterableSpec<C, R>
where
    C: 'static,
    R: 'static,
{
    pub(crate) fn new(spec: Spec<C, R>, name: String, allow_null: bool) -> Self {
        Self {
            spec,
            name,
            allow_null,
        }
    }

    /// The items are strings.
    #[must_use]
    pub fn strings<T, I, E, F>(self, extract: E, assertions: F) -> Spec<C, R>
    where
        T: AsRef<str> + 'static,
        I: ?Sized,
        for<'a> &'a I: IntoIterator<Item = &'a T>,
        E: for<'a> Fn(&'a C) -> Option<&'a I> + Send + Sync + 'static,
        F: FnOnce(StringIterableAssertions<T, C, R>) -> StringIterableAssertions<T, C, R>,
    {
        let segments = assertions(StringIterableAssertions::new()).into_segments();
        self.compile(extract, segments)
    }

    /// The items are numbers.
    #[must_use]
    pub fn numbers<T, I, E, F>(self, extract: E, assertions: F) -> Spec<C, R>
    where
        T: PartialOrd + std::fmt::Display + Send + Sync + 'static,
        I: ?Sized,
        for<'a> &'a I: IntoIterator<Item = &'a T>,
        E: for<'a> Fn(&'a C) -> Option<&'a I> + Send + Sync + 'static,
        F: FnOnce(NumberIterableAssertions<T, C, R>) -> NumberIterableAssertions<T, C, R>,
    {
        let segments = assertions(NumberIterableAssertions::new()).into_segments();
        self.compile(extract, segments)
    }

    /// The items are nested objects with their own sub-chains.
    #[must_use]
    pub fn nested<T, I, E, F>(self, extract: E, assertions: F) -> Spec<C, R>
    where
        T: 'static,
        I: ?Sized,
        for<'a> &'a I: IntoIterator<Item = &'a T>,
        E: for<'a> Fn(&'a C) -> Option<&'a I> + Send + Sync + 'static,
        F: FnOnce(NestedIterableAssertions<T, C, R>) -> NestedIterableAssertions<T, C, R>,
    {
        let segments = assertions(NestedIterableAssertions::new()).into_segments();
        self.compile(extract, segments)
    }

    fn compile<T, I, E>(self, extract: E, segments: Vec<ItemSegment<T, C, R>>) -> Spec<C, R>
    where
        T: 'static,
        I: ?Sized,
        for<'a> &'a I: IntoIterator<Item = &'a T>,
        E: for<'a> Fn(&'a C) -> Option<&'a I> + Send + Sync + 'static,
    {
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
                Some(source) => {
                    // Materialize the possibly single-pass source exactly once;
                    // every segment below reuses this list.
                    let items: Vec<&T> = source.into_iter().collect();
                    for segment in &segments {
                        segment(&items, current, root, out, &name);
                    }
                }
            }
        }))
    }
}

// ============================================================================
// SHARED SEGMENT SURFACE
// ============================================================================

/// Size assertions and indexed custom predicates common to every item kind.
macro_rules! iterable_segments {
    ($name:ident) => {
        impl<T, C, R> $name<T, C, R>
        where
            T: 'static,
            C: 'static,
            R: 'static,
        {
            pub(crate) fn new() -> Self {
                Self {
                    segments: Vec::new(),
                }
            }

            pub(crate) fn into_segments(self) -> Vec<ItemSegment<T, C, R>> {
                self.segments
            }

            fn seg(
                mut self,
                segment: impl for<'a> Fn(&[&'a T], &'a C, &'a R, &mut Collector, &str)
                + Send
                + Sync
                + 'static,
            ) -> Self {
                self.segments.push(Box::new(segment));
                self
            }

            /// The collection must have exactly `size` items.
            #[must_use]
            pub fn assert_size(self, size: usize) -> Self {
                self.seg(move |items, _parent, _root, out, path| {
                    if items.len() != size {
                        out.push(
                            Violation::new(
                                path,
                                format!("Field [{path}] must have size [{size}]"),
                            )
                            .with_context("expected", size)
                            .with_context("actual", items.len()),
                        );
                    }
                })
            }

            /// The collection must have at least `min_size` items.
            ///
            /// # Panics
            ///
            /// Panics at declaration time if `min_size` is zero (use
            /// [`assert_not_empty`](Self::assert_not_empty) for presence).
            #[must_use]
            pub fn assert_min_size(self, min_size: usize) -> Self {
                assert!(min_size > 0, "min_size must be greater than zero");
                self.seg(move |items, _parent, _root, out, path| {
                    if items.len() < min_size {
                        out.push(
                            Violation::new(
                                path,
                                format!("Field [{path}] must have min size [{min_size}]"),
                            )
                            .with_context("min", min_size)
                            .with_context("actual", items.len()),
                        );
                    }
                })
            }

            /// The collection must have at most `max_size` items.
            #[must_use]
            pub fn assert_max_size(self, max_size: usize) -> Self {
                self.seg(move |items, _parent, _root, out, path| {
                    if items.len() > max_size {
                        out.push(
                            Violation::new(
                                path,
                                format!("Field [{path}] must have max size [{max_size}]"),
                            )
                            .with_context("max", max_size)
                            .with_context("actual", items.len()),
                        );
                    }
                })
            }

            /// The collection size must fall in `[min_size, max_size]`.
            ///
            /// # Panics
            ///
            /// Panics at declaration time if `min_size > max_size`.
            #[must_use]
            pub fn assert_size_range(self, min_size: usize, max_size: usize) -> Self {
                assert!(
                    min_size <= max_size,
                    "min_size must not be greater than max_size"
                );
                self.seg(move |items, _parent, _root, out, path| {
                    let actual = items.len();
                    if actual < min_size || actual > max_size {
                        out.push(
                            Violation::new(
                                path,
                                format!(
                                    "Field [{path}] must have size in range [{min_size}, {max_size}]"
                                ),
                            )
                            .with_context("min", min_size)
                            .with_context("max", max_size)
                            .with_context("actual", actual),
                        );
                    }
                })
            }

            /// The collection must have no items.
            #[must_use]
            pub fn assert_empty(self) -> Self {
                self.seg(move |items, _parent, _root, out, path| {
                    if !items.is_empty() {
                        out.push(Violation::new(
                            path,
                            format!("Field [{path}] must be empty"),
                        ));
                    }
                })
            }

            /// The collection must have at least one item.
            #[must_use]
            pub fn assert_not_empty(self) -> Self {
                self.seg(move |items, _parent, _root, out, path| {
                    if items.is_empty() {
                        out.push(Violation::new(
                            path,
                            format!("Field [{path}] must be non-empty"),
                        ));
                    }
                })
            }

            /// Every item must satisfy an index-aware predicate.
            ///
            /// The predicate sees the item's index and a [`Context`] whose
            /// parent is the node owning the collection, so an item can be
            /// judged against sibling fields or the root.
            #[must_use]
            pub fn assert_indexed(
                self,
                predicate: impl for<'a> Fn(usize, Context<'a, T, C, R>) -> bool
                + Send
                + Sync
                + 'static,
            ) -> Self {
                self.seg(move |items, parent, root, out, path| {
                    for (index, item) in items.iter().copied().enumerate() {
                        if !predicate(index, Context::new(item, parent, root)) {
                            let item_path = format!("{path}[{index}]");
                            out.push(Violation::new(
                                item_path.clone(),
                                format!("Field [{item_path}] does not satisfy custom assertion"),
                            ));
                        }
                    }
                })
            }

            /// [`assert_indexed`](Self::assert_indexed) with a caller message.
            #[must_use]
            pub fn assert_indexed_with(
                self,
                predicate: impl for<'a> Fn(usize, Context<'a, T, C, R>) -> bool
                + Send
                + Sync
                + 'static,
                message: impl Into<String>,
            ) -> Self {
                let message = message.into();
                self.seg(move |items, parent, root, out, path| {
                    for (index, item) in items.iter().copied().enumerate() {
                        if !predicate(index, Context::new(item, parent, root)) {
                            out.push(Violation::new(
                                format!("{path}[{index}]"),
                                message.clone(),
                            ));
                        }
                    }
                })
            }
        }

        impl<T, C, R> std::fmt::Debug for $name<T, C, R> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("segments", &self.segments.len())
                    .finish()
            }
        }
    };
}

// ============================================================================
// STRING ITEMS
// ============================================================================

/// Collection assertions for string items.
pub struct StringIterableAssertions<T, C, R> {
    segments: Vec<ItemSegment<T, C, R>>,
}

iterable_segments!(StringIterableAssertions);

impl<T, C, R> StringIterableAssertions<T, C, R>
where
    T: AsRef<str> + 'static,
    C: 'static,
    R: 'static,
{
    /// Runs a string assertion set against every item, reporting under
    /// `field[index]`.
    #[must_use]
    pub fn each_item<F>(self, assertions: F) -> Self
    where
        F: FnOnce(StringAssertions) -> StringAssertions,
    {
        let checks = assertions(StringAssertions::new()).into_checks();
        self.seg(move |items, _parent, _root, out, path| {
            for (index, item) in items.iter().copied().enumerate() {
                let item_path = format!("{path}[{index}]");
                for check in &checks {
                    if let Some(violation) = check(item.as_ref(), &item_path) {
                        out.push(violation);
                    }
                }
            }
        })
    }
}

// ============================================================================
// NUMBER ITEMS
// ============================================================================

/// Collection assertions for number items.
pub struct NumberIterableAssertions<T, C, R> {
    segments: Vec<ItemSegment<T, C, R>>,
}

iterable_segments!(NumberIterableAssertions);

impl<T, C, R> NumberIterableAssertions<T, C, R>
where
    T: PartialOrd + std::fmt::Display + Send + Sync + 'static,
    C: 'static,
    R: 'static,
{
    /// Runs a number assertion set against every item, reporting under
    /// `field[index]`.
    #[must_use]
    pub fn each_item<F>(self, assertions: F) -> Self
    where
        F: FnOnce(NumberAssertions<T>) -> NumberAssertions<T>,
    {
        let checks = assertions(NumberAssertions::new()).into_checks();
        self.seg(move |items, _parent, _root, out, path| {
            for (index, item) in items.iter().copied().enumerate() {
                let item_path = format!("{path}[{index}]");
                for check in &checks {
                    if let Some(violation) = check(item, &item_path) {
                        out.push(violation);
                    }
                }
            }
        })
    }
}

// ============================================================================
// NESTED ITEMS
// ============================================================================

/// Collection assertions for nested object items.
pub struct NestedIterableAssertions<T, C, R> {
    segments: Vec<ItemSegment<T, C, R>>,
}

iterable_segments!(NestedIterableAssertions);

impl<T, C, R> NestedIterableAssertions<T, C, R>
where
    T: 'static,
    C: 'static,
    R: 'static,
{
    /// Runs a full sub-chain against every item.
    ///
    /// The sub-chain is compiled once and applied per item; each item's
    /// violations are re-scoped under `field[index]`.
    #[must_use]
    pub fn each_item<F>(self, assertions: F) -> Self
    where
        F: FnOnce(Spec<T, R>) -> Spec<T, R>,
    {
        let checks = assertions(Spec::new()).into_checks();
        self.seg(move |items, _parent, root, out, path| {
            for (index, item) in items.iter().copied().enumerate() {
                let mark = out.mark();
                for check in &checks {
                    check(item, root, out);
                }
                out.prefix_from(mark, &format!("{path}[{index}]"));
            }
        })
    }
}
