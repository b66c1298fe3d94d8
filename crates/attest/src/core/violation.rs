//! Violations and the collectors that accumulate them.
//!
//! A [`Violation`] is a single reported validation failure: a dotted/indexed
//! field path, a human-readable message and an optional bag of context
//! parameters. Two collection types exist on purpose:
//!
//! - [`Violations`] is immutable and structurally shared. `add` returns a new
//!   logical list without touching the original, so a partially built list
//!   can be reused across branches and an `Invalid` result can hand out its
//!   list without defensive copies.
//! - [`Collector`] (crate-private) is the append-optimized mutable
//!   accumulator threaded through a single `Rules::apply` call. It is never
//!   shared outside that call and is not thread-safe.
//!
//! All string fields of a violation are plain `String`s; context parameter
//! keys use `Cow<'static, str>` so the common static-key case allocates
//! nothing.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

/// Context parameters attached to a violation (typically 0-2 entries).
type ContextParams = SmallVec<[(Cow<'static, str>, String); 2]>;

// ============================================================================
// VIOLATION
// ============================================================================

/// A single validation failure.
///
/// Equality and hashing consider only `(field, message)`; context parameters
/// are advisory metadata for message templating and diagnostics.
///
/// # Examples
///
/// ```rust,ignore
/// use attest::core::Violation;
///
/// let violation = Violation::new("user.name", "Field [user.name] must have length [5]")
///     .with_context("expected", 5)
///     .with_context("actual", 3);
/// assert_eq!(violation.field(), "user.name");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    field: String,
    message: String,
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    context: ContextParams,
}

impl Violation {
    /// Creates a violation attached to a field path.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            context: SmallVec::new(),
        }
    }

    /// Creates a violation attached to the root subject (empty field path).
    pub fn of(message: impl Into<String>) -> Self {
        Self::new("", message)
    }

    /// Adds a context parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, key: impl Into<Cow<'static, str>>, value: impl ToString) -> Self {
        self.context.push((key.into(), value.to_string()));
        self
    }

    /// The dotted/indexed field path, `""` for the root subject.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Looks up a context parameter by key.
    #[must_use]
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the violation as a JSON value; context params become a map.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let context: serde_json::Map<String, serde_json::Value> = self
            .context
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
            .collect();

        json!({
            "field": self.field,
            "message": self.message,
            "context": context,
        })
    }

    /// Re-scopes the field path under `prefix` (see [`join_path`]).
    pub(crate) fn prefix_field(&mut self, prefix: &str) {
        self.field = join_path(prefix, &self.field);
    }
}

impl PartialEq for Violation {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.message == other.message
    }
}

impl Eq for Violation {}

impl Hash for Violation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.field.hash(state);
        self.message.hash(state);
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Violation[field='{}', message='{}']",
            self.field, self.message
        )
    }
}

// ============================================================================
// FIELD PATHS
// ============================================================================

/// Joins a path prefix onto a locally scoped field path.
///
/// Rules: an empty child collapses to the prefix; a child starting with `[`
/// is an index suffix and concatenates directly (`tags` + `[2]` =>
/// `tags[2]`); anything else joins with a dot (`nested` + `value` =>
/// `nested.value`).
pub(crate) fn join_path(prefix: &str, field: &str) -> String {
    if field.is_empty() {
        prefix.to_owned()
    } else if prefix.is_empty() {
        field.to_owned()
    } else if field.starts_with('[') {
        format!("{prefix}{field}")
    } else {
        format!("{prefix}.{field}")
    }
}

// ============================================================================
// VIOLATIONS (immutable, structurally shared)
// ============================================================================

/// An immutable, cheaply clonable ordered list of violations.
///
/// `add` is persistent: it returns a new list and leaves the receiver
/// untouched, so a `Violations` handed out by a result or reused while
/// composing specs can never be mutated behind the holder's back.
#[derive(Debug, Clone)]
pub struct Violations {
    items: Arc<[Violation]>,
}

impl Violations {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list from any violation sequence.
    pub fn of(items: impl IntoIterator<Item = Violation>) -> Self {
        items.into_iter().collect()
    }

    /// Returns a new list with `violation` appended; `self` is unchanged.
    #[must_use = "add returns a new list and leaves the receiver untouched"]
    pub fn add(&self, violation: Violation) -> Self {
        let mut items = self.items.to_vec();
        items.push(violation);
        Self {
            items: Arc::from(items),
        }
    }

    /// The violations in the order they were produced.
    #[must_use]
    pub fn list(&self) -> &[Violation] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.items.iter()
    }
}

impl Default for Violations {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            items: Arc::from(iter.into_iter().collect::<Vec<_>>()),
        }
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PartialEq for Violations {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Violations {}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} violation(s):", self.items.len())?;
        for (i, violation) in self.items.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl Serialize for Violations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for violation in self.items.iter() {
            seq.serialize_element(violation)?;
        }
        seq.end()
    }
}

// ============================================================================
// COLLECTOR (mutable, confined to one apply call)
// ============================================================================

/// The mutable accumulator used during a single validation pass.
///
/// Amortized O(1) append. Nested and indexed rule groups use
/// [`mark`](Collector::mark) / [`prefix_from`](Collector::prefix_from) to
/// re-scope the paths of the violations they just produced, so path context
/// is threaded without a second walk over the subject.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    items: Vec<Violation>,
}

impl Collector {
    pub(crate) fn push(&mut self, violation: Violation) {
        self.items.push(violation);
    }

    /// Current length; pair with [`prefix_from`](Collector::prefix_from).
    pub(crate) fn mark(&self) -> usize {
        self.items.len()
    }

    /// Prefixes the field path of every violation appended since `mark`.
    pub(crate) fn prefix_from(&mut self, mark: usize, prefix: &str) {
        for violation in &mut self.items[mark..] {
            violation.prefix_field(prefix);
        }
    }

    pub(crate) fn into_violations(self) -> Violations {
        Violations {
            items: Arc::from(self.items),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
