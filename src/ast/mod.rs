//! # AST Module
//!
//! The correlated, named tree consumed by the documentation renderer and the
//! generation engine. Nodes own their children and carry no back references;
//! lookups go through [`Schema::find_service`] and [`Schema::find_message`].
//!
//! Every node serialises with `serde`, and template contexts are built
//! directly from it.

mod build;
mod types;

pub use build::{build_file, rust_ident, TypeIndex};
pub use types::{
    BindingField, Cardinality, Conversion, Enum, EnumValue, Field, FieldLocation, FieldType, File,
    HttpBinding, Message, Method, ScalarKind, Schema, Service,
};
