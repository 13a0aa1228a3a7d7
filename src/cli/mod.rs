//! # CLI Module
//!
//! Command-line front end of the `svcgen` binary.
//!
//! ## Commands
//!
//! ### `docs`
//!
//! ```bash
//! protoc --include_source_info --include_imports \
//!     --descriptor_set_out=calc.pb calc.proto
//! svcgen docs --descriptor calc.pb --format markdown --out calc.md
//! ```
//!
//! ### `generate`
//!
//! ```bash
//! svcgen generate --descriptor calc.pb --service calc.Calculator --out calculator-service
//! ```
//!
//! Options:
//! - `--templates <DIR>` - Use a template directory instead of the built-in set
//! - `--force` - Overwrite files that differ from the generated output
//! - `--dry-run` - Report what would be written
//!
//! ### `routes`
//!
//! ```bash
//! svcgen routes --descriptor calc.pb
//! ```
//!
//! Every command accepts `--file <proto>` (repeatable), `--config <FILE>`
//! and `--strict`; see [`crate::config`] for how settings are layered.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{effective_config, route_lines, run_cli, Cli, Commands, InputArgs};
