//! # CLI Behavior
//!
//! This is **one possible UI client** for sfmd, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Files and Directories
//!
//! Every editing command takes one or more files. A directory argument is
//! walked recursively and contributes the files whose names match the kind
//! being edited (`*.profile-meta.xml` for `sfmd profile ...`, any known kind
//! for `sfmd tidy`). Files that fail are reported on stderr and the rest of
//! the batch still runs.
//!
//! ## Tri-State Flags
//!
//! Permission flags take an explicit value: `--edit true`, `--read false`.
//! A flag that is not given is not touched, and on `list` commands it does
//! not filter.
//!
//! ## Output
//!
//! - `list`/`table` commands print an aligned table, or JSON with `--json`
//! - `show` commands print the record as canonical XML
//! - edits print one line per written file
//! - `tidy --list` prints files that are not tidy and exits 1 if any
//!
//! ## Structure
//!
//! - `setup.rs`: clap argument definitions
//! - `commands.rs`: dispatch to the API facade
//! - `render.rs`: colored messages, tables and JSON

mod commands;
mod render;
mod setup;

pub use commands::run;
