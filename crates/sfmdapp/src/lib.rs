//! # sfmd Architecture
//!
//! sfmd is a **UI-agnostic metadata editing library**. It opens platform
//! metadata XML files, applies structural edits and writes them back in one
//! canonical form. The `sfmd` binary is just one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (sfmd crate)                                           │
//! │  - Parses arguments, renders tables, sets exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Batches over files, isolates per-file failures           │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Kind Layer (kinds/*.rs)                                    │
//! │  - Names collections, builds filters, patches and defaults  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (document.rs, ops/, schema/)                        │
//! │  - One generic add/update/delete/filter/clone/reset/tidy    │
//! │    driven by static per-kind schema tables                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Codec and Storage (xml/, store.rs)                         │
//! │  - Lenient decode, canonical encode, atomic writes          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Canonical Output
//!
//! Encoding is a pure function of the document and its schema. Whatever order
//! fields were read or edited in, they are written in schema order with a
//! fixed declaration, four-space indentation and a trailing newline. A file
//! that is already canonical round-trips byte for byte.
//!
//! ## Key Principle: Absent Is Not False
//!
//! Every scalar field is a [`leaf::Leaf`]: absent, present and empty, or
//! present with text. Edits only touch the fields they name, so a flag the
//! user never mentioned is never written as `false`.
//!
//! ## Module Overview
//!
//! - [`api`]: batch facade used by the CLI
//! - [`kinds`]: per-kind operations (permissions, profiles, packages, ...)
//! - [`document`]: a metadata document in memory
//! - [`ops`]: generic collection operations, filters, patches and tidy
//! - [`schema`]: schema types and the per-kind field tables
//! - [`registry`]: explicit table of known kinds
//! - [`store`]: open, write, tidy and check files on disk
//! - [`xml`]: element tree and codec
//! - [`config`]: layered configuration
//! - [`error`]: error types

pub mod api;
pub mod boolean;
pub mod config;
pub mod document;
pub mod error;
pub mod kinds;
pub mod leaf;
pub mod ops;
pub mod registry;
pub mod schema;
pub mod store;
pub mod xml;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
