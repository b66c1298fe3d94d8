//! Core value types of the validation engine.
//!
//! - [`Violation`] / [`Violations`]: a single finding and the immutable,
//!   structurally shared list of findings.
//! - [`Rule`] / [`Rules`]: a compiled check and the ordered, mergeable set
//!   a spec chain compiles into.
//! - [`Valid`]: the Valid/Invalid outcome with lazy, memoized transforms.
//! - [`ValidationFailure`]: the standard-error rendition of an invalid
//!   outcome.
//!
//! Everything here is plain data plus pure functions: a compiled [`Rules`]
//! set is immutable and can be applied concurrently to different subjects.

pub mod error;
pub mod rule;
pub mod valid;
pub mod violation;

pub use error::ValidationFailure;
pub use rule::{Rule, Rules};
pub use valid::Valid;
pub use violation::{Violation, Violations};
