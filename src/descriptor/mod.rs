//! # Descriptor Module
//!
//! The flat schema forest as protoc hands it over: file descriptors with their
//! messages, enums, services and `SourceCodeInfo` comment locations.
//!
//! - [`proto`] declares the descriptor messages decoded with `prost`
//! - [`table`] holds the static field-number tables the walker navigates
//! - `load` decodes descriptor sets and plugin requests
//!
//! Only the descriptor subset this crate reads is declared; see [`proto`].

mod load;
pub mod proto;
pub mod table;

pub use load::{decode_descriptor_set, decode_plugin_request, encode_plugin_response, load_descriptor_set};
pub use proto::{FileDescriptorProto, FileDescriptorSet, Location};
pub use table::{NodeKind, NodeRef, Slot};
