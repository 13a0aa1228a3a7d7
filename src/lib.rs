//! # svcgen
//!
//! **svcgen** turns annotated protobuf service definitions into documentation
//! and templated Rust service scaffolding. It reads compiled descriptors
//! (a `FileDescriptorSet`, or a `CodeGeneratorRequest` when run as a protoc
//! plugin), attaches the source comments to the declarations they document,
//! derives REST bindings from `google.api.http` options, and renders the result.
//!
//! ## Architecture
//!
//! - **[`descriptor`]** - Decoded descriptor types and the per-node field tables
//! - **[`walker`]** - Resolves a `SourceCodeInfo` location path to its declaration
//! - **[`correlate`]** - Attaches comments and builds the [`ast::Schema`]
//! - **[`ast`]** - The correlated tree: files, messages, enums, services, bindings
//! - **[`binding`]** - URL template helpers, also called by generated code at request time
//! - **[`docs`]** - Markdown and JSON documentation
//! - **[`generator`]** - Template execution, path mapping and formatting
//! - **[`config`]** / **[`logging`]** / **[`cli`]** / **[`plugin`]** - Application surface
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as svcgen / protoc-gen-svcgen
//!     participant Walk as correlate + walker
//!     participant AST as ast::build_file
//!     participant Engine as generator::generate
//!     participant FS as File System
//!
//!     User->>CLI: svcgen generate --descriptor calc.pb --out svc
//!     CLI->>Walk: correlate(files, requested, policy)
//!     Walk->>Walk: walk each commented location path
//!     Walk-->>CLI: Associations (file:key -> comment)
//!     CLI->>AST: build_schema(files, associations)
//!     AST-->>CLI: Schema with descriptions and bindings
//!     CLI->>Engine: generate(assets, context, formatter)
//!     Engine->>Engine: render + format assets in parallel
//!     Engine-->>CLI: Generated (ordered by asset path)
//!     CLI->>FS: write_files(out, generated)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use svcgen::binding;
//!
//! let params = binding::extract_all("/v1/users/42", "/v1/users/{id}").unwrap();
//! assert_eq!(params["id"], "42");
//! assert_eq!(binding::base_path("/v1/users/{id}"), "/v1/users");
//! ```

pub mod ast;
pub mod binding;
pub mod cli;
pub mod config;
pub mod correlate;
pub mod descriptor;
pub mod diagnostics;
pub mod docs;
pub mod error;
pub mod generator;
pub mod logging;
pub mod pipeline;
pub mod plugin;
pub mod walker;

pub use error::{BindError, FormatError, GenerateError, WalkError};
