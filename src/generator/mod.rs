//! # Generator Module
//!
//! Materialises a set of template assets against one service of the
//! correlated schema.
//!
//! ## Pipeline
//!
//! ```text
//! TemplateAsset ──render (minijinja, strict)──▶ text
//!       │                                        │
//!       └── stored path ──map_path──▶ output path ┴──Formatter──▶ GeneratedFile
//! ```
//!
//! 1. **Render** every asset against a [`GenerationContext`] in parallel
//! 2. **Map** each stored path to its output path ([`map_path`])
//! 3. **Format** the text for its output language ([`CanonicalFormatter`]);
//!    on failure the raw text is kept and a diagnostic recorded
//! 4. **Assemble** the files in stored-path order, rejecting collisions
//!
//! ## Template Layout
//!
//! Stored paths start with a version directory and use `NAME` for the
//! service name. Files under `NAME-service/` land at the output root:
//!
//! ```text
//! v1/
//! ├── NAME-service/
//! │   ├── Cargo.toml.tmpl         → Cargo.toml
//! │   └── src/
//! │       ├── lib.rs.tmpl         → src/lib.rs
//! │       ├── handlers.rs.tmpl    → src/handlers.rs
//! │       └── svc/
//! │           ├── mod.rs.tmpl     → src/svc/mod.rs
//! │           ├── routes.rs.tmpl  → src/svc/routes.rs
//! │           └── decode.rs.tmpl  → src/svc/decode.rs
//! └── docs/
//!     └── NAME.md.tmpl            → docs/<service>.md
//! ```
//!
//! The built-in set is returned by [`builtin`]; [`load_dir`] reads an
//! override directory with the same layout.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use svcgen::generator::{builtin, generate, CanonicalFormatter, GenerationContext};
//!
//! let ctx = GenerationContext::select(&schema, Some("Calculator"))?;
//! let generated = generate(&builtin(), &ctx, &CanonicalFormatter)?;
//! for file in &generated.files {
//!     println!("{}", file.path);
//! }
//! ```

mod assets;
mod context;
mod engine;
mod format;
mod path_map;
mod project;

pub use assets::{builtin, load_dir, TemplateAsset};
pub use context::{GenerationContext, DEFAULT_GENERATED_IMPORT, DEFAULT_HANDLER_IMPORT};
pub use engine::{environment, generate, Generated, GeneratedFile};
pub use format::{CanonicalFormatter, Formatter, IdentityFormatter};
pub use path_map::{map_path, HOIST_SUFFIX, NAME_TOKEN, TEMPLATE_SUFFIX};
pub use project::{write_files, WriteOptions, WriteSummary};
