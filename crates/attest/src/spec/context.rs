//! Read-only ancestor context for custom predicates.

use std::fmt;

/// A read-only lookup handle passed to custom predicates.
///
/// Carries the extracted value plus references up the ancestor chain (the
/// immediate parent node and the root subject), so cross-field and
/// cross-level checks (e.g. a list item judged against a sibling field on
/// the root) need no second traversal. The context never owns the ancestors;
/// it is built on the stack during rule evaluation and lives only for the
/// duration of one predicate call.
pub struct Context<'a, V: ?Sized, P: ?Sized, R: ?Sized> {
    value: &'a V,
    parent: &'a P,
    root: &'a R,
}

impl<'a, V: ?Sized, P: ?Sized, R: ?Sized> Context<'a, V, P, R> {
    pub(crate) fn new(value: &'a V, parent: &'a P, root: &'a R) -> Self {
        Self {
            value,
            parent,
            root,
        }
    }

    /// The extracted value under assertion.
    #[must_use]
    pub fn value(&self) -> &'a V {
        self.value
    }

    /// The node the value was extracted from.
    #[must_use]
    pub fn parent(&self) -> &'a P {
        self.parent
    }

    /// The root subject of the whole validation call.
    #[must_use]
    pub fn root(&self) -> &'a R {
        self.root
    }
}

impl<V: ?Sized, P: ?Sized, R: ?Sized> Clone for Context<'_, V, P, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized, P: ?Sized, R: ?Sized> Copy for Context<'_, V, P, R> {}

impl<V, P, R> fmt::Debug for Context<'_, V, P, R>
where
    V: fmt::Debug + ?Sized,
    P: fmt::Debug + ?Sized,
    R: fmt::Debug + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("value", &self.value)
            .field("parent", &self.parent)
            .field("root", &self.root)
            .finish()
    }
}
