//! # sfmd CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and turns its outcome into an exit code.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌───────────────────────────┐
//! │ cli::setup   │ -> │ cli::commands│ -> │ sfmdapp::api::MetadataApi │
//! │ (clap)       │    │ (dispatch)   │    │ (batches over files)      │
//! └──────────────┘    └──────────────┘    └───────────────────────────┘
//!                            │
//!                            ▼
//!                     ┌──────────────┐
//!                     │ cli::render  │
//!                     └──────────────┘
//! ```
//!
//! Everything from `MetadataApi` inward is UI agnostic and lives in the
//! `sfmdapp` crate. The CLI owns argument parsing, configuration and logging
//! setup, rendering and exit codes.
//!
//! ## Exit Codes
//!
//! - `0`: the command ran, even if some files in the batch were skipped
//! - `1`: `tidy --list` found files that are not tidy, or the command could
//!   not run at all (bad configuration, unreadable directory, nothing to change)
//! - `2`: invalid arguments (reported by clap)

mod cli;

fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
