//! Static field-number tables for descriptor navigation.
//!
//! Every navigable descriptor kind owns one `static` table mapping a protobuf
//! field number to an accessor. The walker never inspects types at run time;
//! it only scans these tables.

use serde::Serialize;

use super::proto::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, MethodDescriptorProto, MethodOptions, OneofDescriptorProto,
    ServiceDescriptorProto,
};

/// Kind of a navigable descriptor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Message,
    Field,
    Oneof,
    Enum,
    EnumValue,
    Service,
    Method,
    MethodOptions,
}

/// Borrowed handle to one descriptor node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    File(&'a FileDescriptorProto),
    Message(&'a DescriptorProto),
    Field(&'a FieldDescriptorProto),
    Oneof(&'a OneofDescriptorProto),
    Enum(&'a EnumDescriptorProto),
    EnumValue(&'a EnumValueDescriptorProto),
    Service(&'a ServiceDescriptorProto),
    Method(&'a MethodDescriptorProto),
    MethodOptions(&'a MethodOptions),
}

/// A repeated message-typed field, borrowed without allocation.
#[derive(Debug, Clone, Copy)]
pub enum NodeList<'a> {
    Messages(&'a [DescriptorProto]),
    Fields(&'a [FieldDescriptorProto]),
    Oneofs(&'a [OneofDescriptorProto]),
    Enums(&'a [EnumDescriptorProto]),
    EnumValues(&'a [EnumValueDescriptorProto]),
    Services(&'a [ServiceDescriptorProto]),
    Methods(&'a [MethodDescriptorProto]),
}

impl<'a> NodeList<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            NodeList::Messages(s) => s.len(),
            NodeList::Fields(s) => s.len(),
            NodeList::Oneofs(s) => s.len(),
            NodeList::Enums(s) => s.len(),
            NodeList::EnumValues(s) => s.len(),
            NodeList::Services(s) => s.len(),
            NodeList::Methods(s) => s.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeRef<'a>> {
        match *self {
            NodeList::Messages(s) => s.get(index).map(NodeRef::Message),
            NodeList::Fields(s) => s.get(index).map(NodeRef::Field),
            NodeList::Oneofs(s) => s.get(index).map(NodeRef::Oneof),
            NodeList::Enums(s) => s.get(index).map(NodeRef::Enum),
            NodeList::EnumValues(s) => s.get(index).map(NodeRef::EnumValue),
            NodeList::Services(s) => s.get(index).map(NodeRef::Service),
            NodeList::Methods(s) => s.get(index).map(NodeRef::Method),
        }
    }
}

/// What a field number resolves to on a given node.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    /// Singular message child; `None` when unset.
    Node(Option<NodeRef<'a>>),
    /// Repeated message children.
    Nodes(NodeList<'a>),
    /// Singular scalar.
    Scalar,
    /// Repeated scalar with its length.
    Scalars(usize),
    /// Undecoded options or ranges.
    Opaque { present: bool },
}

/// One entry of a node kind's field table.
pub struct FieldSlot<T: 'static> {
    pub number: i32,
    pub name: &'static str,
    pub get: for<'a> fn(&'a T) -> Slot<'a>,
}

static FILE_FIELDS: &[FieldSlot<FileDescriptorProto>] = &[
    FieldSlot { number: 1, name: "name", get: |_| Slot::Scalar },
    FieldSlot { number: 2, name: "package", get: |_| Slot::Scalar },
    FieldSlot { number: 3, name: "dependency", get: |f| Slot::Scalars(f.dependency.len()) },
    FieldSlot { number: 4, name: "message_type", get: |f| Slot::Nodes(NodeList::Messages(&f.message_type)) },
    FieldSlot { number: 5, name: "enum_type", get: |f| Slot::Nodes(NodeList::Enums(&f.enum_type)) },
    FieldSlot { number: 6, name: "service", get: |f| Slot::Nodes(NodeList::Services(&f.service)) },
    FieldSlot { number: 7, name: "extension", get: |f| Slot::Nodes(NodeList::Fields(&f.extension)) },
    FieldSlot { number: 8, name: "options", get: |f| Slot::Opaque { present: f.options.is_some() } },
    FieldSlot { number: 10, name: "public_dependency", get: |f| Slot::Scalars(f.public_dependency.len()) },
    FieldSlot { number: 11, name: "weak_dependency", get: |f| Slot::Scalars(f.weak_dependency.len()) },
    FieldSlot { number: 12, name: "syntax", get: |_| Slot::Scalar },
];

static MESSAGE_FIELDS: &[FieldSlot<DescriptorProto>] = &[
    FieldSlot { number: 1, name: "name", get: |_| Slot::Scalar },
    FieldSlot { number: 2, name: "field", get: |m| Slot::Nodes(NodeList::Fields(&m.field)) },
    FieldSlot { number: 3, name: "nested_type", get: |m| Slot::Nodes(NodeList::Messages(&m.nested_type)) },
    FieldSlot { number: 4, name: "enum_type", get: |m| Slot::Nodes(NodeList::Enums(&m.enum_type)) },
    FieldSlot { number: 5, name: "extension_range", get: |m| Slot::Opaque { present: !m.extension_range.is_empty() } },
    FieldSlot { number: 6, name: "extension", get: |m| Slot::Nodes(NodeList::Fields(&m.extension)) },
    FieldSlot { number: 7, name: "options", get: |m| Slot::Opaque { present: m.options.is_some() } },
    FieldSlot { number: 8, name: "oneof_decl", get: |m| Slot::Nodes(NodeList::Oneofs(&m.oneof_decl)) },
    FieldSlot { number: 9, name: "reserved_range", get: |m| Slot::Opaque { present: !m.reserved_range.is_empty() } },
    FieldSlot { number: 10, name: "reserved_name", get: |m| Slot::Scalars(m.reserved_name.len()) },
];

static FIELD_FIELDS: &[FieldSlot<FieldDescriptorProto>] = &[
    FieldSlot { number: 1, name: "name", get: |_| Slot::Scalar },
    FieldSlot { number: 2, name: "extendee", get: |_| Slot::Scalar },
    FieldSlot { number: 3, name: "number", get: |_| Slot::Scalar },
    FieldSlot { number: 4, name: "label", get: |_| Slot::Scalar },
    FieldSlot { number: 5, name: "type", get: |_| Slot::Scalar },
    FieldSlot { number: 6, name: "type_name", get: |_| Slot::Scalar },
    FieldSlot { number: 7, name: "default_value", get: |_| Slot::Scalar },
    FieldSlot { number: 8, name: "options", get: |f| Slot::Opaque { present: f.options.is_some() } },
    FieldSlot { number: 9, name: "oneof_index", get: |_| Slot::Scalar },
    FieldSlot { number: 10, name: "json_name", get: |_| Slot::Scalar },
    FieldSlot { number: 17, name: "proto3_optional", get: |_| Slot::Scalar },
];

static ONEOF_FIELDS: &[FieldSlot<OneofDescriptorProto>] = &[
    FieldSlot { number: 1, name: "name", get: |_| Slot::Scalar },
    FieldSlot { number: 2, name: "options", get: |o| Slot::Opaque { present: o.options.is_some() } },
];

static ENUM_FIELDS: &[FieldSlot<EnumDescriptorProto>] = &[
    FieldSlot { number: 1, name: "name", get: |_| Slot::Scalar },
    FieldSlot { number: 2, name: "value", get: |e| Slot::Nodes(NodeList::EnumValues(&e.value)) },
    FieldSlot { number: 3, name: "options", get: |e| Slot::Opaque { present: e.options.is_some() } },
];

static ENUM_VALUE_FIELDS: &[FieldSlot<EnumValueDescriptorProto>] = &[
    FieldSlot { number: 1, name: "name", get: |_| Slot::Scalar },
    FieldSlot { number: 2, name: "number", get: |_| Slot::Scalar },
    FieldSlot { number: 3, name: "options", get: |v| Slot::Opaque { present: v.options.is_some() } },
];

static SERVICE_FIELDS: &[FieldSlot<ServiceDescriptorProto>] = &[
    FieldSlot { number: 1, name: "name", get: |_| Slot::Scalar },
    FieldSlot { number: 2, name: "method", get: |s| Slot::Nodes(NodeList::Methods(&s.method)) },
    FieldSlot { number: 3, name: "options", get: |s| Slot::Opaque { present: s.options.is_some() } },
];

static METHOD_FIELDS: &[FieldSlot<MethodDescriptorProto>] = &[
    FieldSlot { number: 1, name: "name", get: |_| Slot::Scalar },
    FieldSlot { number: 2, name: "input_type", get: |_| Slot::Scalar },
    FieldSlot { number: 3, name: "output_type", get: |_| Slot::Scalar },
    FieldSlot { number: 4, name: "options", get: |m| Slot::Node(m.options.as_ref().map(NodeRef::MethodOptions)) },
    FieldSlot { number: 5, name: "client_streaming", get: |_| Slot::Scalar },
    FieldSlot { number: 6, name: "server_streaming", get: |_| Slot::Scalar },
];

static METHOD_OPTION_FIELDS: &[FieldSlot<MethodOptions>] = &[
    FieldSlot { number: 72295728, name: "http", get: |o| Slot::Opaque { present: o.http.is_some() } },
];

fn lookup<'a, T>(
    table: &'static [FieldSlot<T>],
    node: &'a T,
    number: i32,
) -> Option<(&'static str, Slot<'a>)> {
    table
        .iter()
        .find(|slot| slot.number == number)
        .map(|slot| (slot.name, (slot.get)(node)))
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn kind(self) -> NodeKind {
        match self {
            NodeRef::File(_) => NodeKind::File,
            NodeRef::Message(_) => NodeKind::Message,
            NodeRef::Field(_) => NodeKind::Field,
            NodeRef::Oneof(_) => NodeKind::Oneof,
            NodeRef::Enum(_) => NodeKind::Enum,
            NodeRef::EnumValue(_) => NodeKind::EnumValue,
            NodeRef::Service(_) => NodeKind::Service,
            NodeRef::Method(_) => NodeKind::Method,
            NodeRef::MethodOptions(_) => NodeKind::MethodOptions,
        }
    }

    /// Declared name; empty when the descriptor omits it. Options nodes are
    /// named after the field that holds them.
    #[must_use]
    pub fn name(self) -> &'a str {
        let name = match self {
            NodeRef::MethodOptions(_) => return "options",
            NodeRef::File(n) => &n.name,
            NodeRef::Message(n) => &n.name,
            NodeRef::Field(n) => &n.name,
            NodeRef::Oneof(n) => &n.name,
            NodeRef::Enum(n) => &n.name,
            NodeRef::EnumValue(n) => &n.name,
            NodeRef::Service(n) => &n.name,
            NodeRef::Method(n) => &n.name,
        };
        name.as_deref().unwrap_or_default()
    }

    /// Resolve `number` against this node's field table.
    #[must_use]
    pub fn slot(self, number: i32) -> Option<(&'static str, Slot<'a>)> {
        match self {
            NodeRef::File(n) => lookup(FILE_FIELDS, n, number),
            NodeRef::Message(n) => lookup(MESSAGE_FIELDS, n, number),
            NodeRef::Field(n) => lookup(FIELD_FIELDS, n, number),
            NodeRef::Oneof(n) => lookup(ONEOF_FIELDS, n, number),
            NodeRef::Enum(n) => lookup(ENUM_FIELDS, n, number),
            NodeRef::EnumValue(n) => lookup(ENUM_VALUE_FIELDS, n, number),
            NodeRef::Service(n) => lookup(SERVICE_FIELDS, n, number),
            NodeRef::Method(n) => lookup(METHOD_FIELDS, n, number),
            NodeRef::MethodOptions(n) => lookup(METHOD_OPTION_FIELDS, n, number),
        }
    }
}
