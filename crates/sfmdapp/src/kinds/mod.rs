//! Per-kind operations.
//!
//! Each module binds the generic engine to one document kind: it names the
//! collections, builds the filters and patches for that kind's options, and
//! supplies defaults for new records. Kinds that only need open, tidy and
//! write (connected apps, credentials, web links, list views and platform
//! event subscriber configs) have no module here; [`crate::store`] handles
//! them through the [`crate::registry::Registry`].

pub mod application;
pub mod custom_object;
pub mod custom_permission;
pub mod package;
pub mod permission_set;
pub mod permissions;
pub mod profile;
