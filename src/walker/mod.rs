//! # Walker Module
//!
//! Resolves a `SourceCodeInfo` location path to the declaration it names.
//!
//! A path such as `[4, 0, 2, 1]` reads as: field 4 of the file
//! (`message_type`), element 0, field 2 of that message (`field`), element 1.
//! The walker follows it through the static tables in
//! [`crate::descriptor::table`], one selector at a time:
//!
//! ```text
//! (path, node) ──empty path──────────────▶ node
//!      │
//!      └─selector─▶ slot ──last element───▶ node + slot label
//!                    ├─ singular child ───▶ (rest, child)
//!                    ├─ repeated children ▶ (rest[1..], children[rest[0]])
//!                    └─ scalar / opaque ──▶ node + slot label, or error
//! ```
//!
//! Strict and best-effort behaviour are selected with [`WalkPolicy`].

mod walk;
#[cfg(test)]
mod tests;

pub use walk::{walk, walk_with_policy, Resolved, WalkPolicy};
