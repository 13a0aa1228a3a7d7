use serde::{Serialize, Serializer};

/// The correlated tree for every requested file, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub files: Vec<File>,
}

impl Schema {
    /// Every service with the file that declares it.
    pub fn services(&self) -> impl Iterator<Item = (&File, &Service)> {
        self.files
            .iter()
            .flat_map(|file| file.services.iter().map(move |svc| (file, svc)))
    }

    /// Find a service by short or fully qualified name.
    #[must_use]
    pub fn find_service(&self, name: &str) -> Option<(&File, &Service)> {
        let name = name.trim_start_matches('.');
        self.services()
            .find(|(_, svc)| svc.name == name || svc.full_name == name)
    }

    /// Look up a message by its fully qualified name, searching nested messages.
    #[must_use]
    pub fn find_message(&self, full_name: &str) -> Option<&Message> {
        fn search<'a>(messages: &'a [Message], full_name: &str) -> Option<&'a Message> {
            messages.iter().find_map(|m| {
                if m.full_name == full_name {
                    Some(m)
                } else {
                    search(&m.nested_messages, full_name)
                }
            })
        }
        let full_name = full_name.trim_start_matches('.');
        self.files
            .iter()
            .find_map(|f| search(&f.messages, full_name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct File {
    pub name: String,
    pub package: String,
    pub description: String,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Message {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub fields: Vec<Field>,
    pub nested_messages: Vec<Message>,
    pub nested_enums: Vec<Enum>,
    /// Synthesised `map<K, V>` entry type.
    pub map_entry: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub number: i32,
    pub description: String,
    pub field_type: FieldType,
    /// Name of the enclosing oneof, synthetic proto3-optional oneofs excluded.
    pub oneof: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldType {
    pub kind: ScalarKind,
    pub cardinality: Cardinality,
    /// Fully qualified message or enum name, without the leading dot.
    pub type_name: Option<String>,
    /// Set when the field refers to an enum; names the `Enum` node.
    pub enum_ref: Option<String>,
    /// Set when the referenced message is a map entry.
    pub map_entry: bool,
}

/// Declared wire type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl ScalarKind {
    /// Element type used by generated request structs.
    #[must_use]
    pub fn rust_type(self) -> &'static str {
        match self {
            ScalarKind::Double => "f64",
            ScalarKind::Float => "f32",
            ScalarKind::Int64 | ScalarKind::Sfixed64 | ScalarKind::Sint64 => "i64",
            ScalarKind::Uint64 | ScalarKind::Fixed64 => "u64",
            ScalarKind::Int32 | ScalarKind::Sfixed32 | ScalarKind::Sint32 | ScalarKind::Enum => {
                "i32"
            }
            ScalarKind::Uint32 | ScalarKind::Fixed32 => "u32",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "String",
            ScalarKind::Bytes => "Vec<u8>",
            ScalarKind::Message | ScalarKind::Group => "serde_json::Value",
        }
    }

    /// How a raw string value is turned into [`Self::rust_type`].
    #[must_use]
    pub fn conversion(self) -> Conversion {
        match self {
            ScalarKind::String => Conversion::String,
            ScalarKind::Bytes => Conversion::Bytes,
            ScalarKind::Enum => Conversion::Enum,
            ScalarKind::Message | ScalarKind::Group => Conversion::Json,
            _ => Conversion::Parse,
        }
    }

    /// Everything except messages and groups.
    #[must_use]
    pub fn is_base_type(self) -> bool {
        !matches!(self, ScalarKind::Message | ScalarKind::Group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Single,
    Optional,
    Repeated,
}

impl Cardinality {
    /// Wrap an element type according to the cardinality.
    #[must_use]
    pub fn wrap(self, element: &str) -> String {
        match self {
            Cardinality::Single => element.to_string(),
            Cardinality::Optional => format!("Option<{element}>"),
            Cardinality::Repeated => format!("Vec<{element}>"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Conversion {
    /// Taken verbatim.
    String,
    /// `str::parse` into the scalar type.
    Parse,
    /// Raw UTF-8 bytes of the value.
    Bytes,
    /// Parsed as the enum's numeric value.
    Enum,
    /// Decoded as JSON.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enum {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub name: String,
    pub description: String,
    /// Fully qualified request message name.
    pub request_type: String,
    /// Last segment of `request_type`.
    pub request_name: String,
    pub response_type: String,
    pub response_name: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub bindings: Vec<HttpBinding>,
}

/// One REST route of a method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpBinding {
    #[serde(serialize_with = "serialize_method")]
    pub verb: http::Method,
    pub path_template: String,
    /// Longest placeholder-free leading run of `path_template`.
    pub base_path: String,
    /// Request field carried in the body: `*` for all non-path fields.
    pub body: Option<String>,
    pub fields: Vec<BindingField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingField {
    /// Source field name as declared.
    pub name: String,
    /// Rust identifier for the field, raw-escaped when it is a keyword.
    pub ident: String,
    pub location: FieldLocation,
    /// Element type tag, e.g. `i64` or `String`.
    pub scalar: String,
    pub cardinality: Cardinality,
    /// `scalar` wrapped for the cardinality, e.g. `Option<i64>`. Map fields
    /// are a single `serde_json::Value` object.
    pub rust_type: String,
    pub conversion: Conversion,
    pub is_base_type: bool,
}

/// Where a bound field's value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLocation {
    Path,
    Query,
    Body,
}

fn serialize_method<S: Serializer>(method: &http::Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}
