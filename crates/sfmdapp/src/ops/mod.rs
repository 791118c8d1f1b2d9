//! The generic engine: filters, patches, collection operations and tidy.
//!
//! None of these modules know about a specific document kind. Kind-specific
//! behaviour lives in [`crate::kinds`] and in the schema tables.

pub mod collection;
pub mod filter;
pub mod patch;
pub mod tidy;

pub use collection::ZeroMatch;
pub use filter::{Condition, Filter, Predicate};
pub use patch::Patch;
pub use tidy::{tidy, Manifest};
