use std::collections::HashMap;

use heck::ToSnakeCase;
use tracing::debug;

use super::types::{
    BindingField, Cardinality, Enum, EnumValue, Field, FieldLocation, FieldType, File,
    HttpBinding, Message, Method, ScalarKind, Service,
};
use crate::binding::{base_path, PathIndex};
use crate::correlate::Associations;
use crate::descriptor::proto::{
    http_rule::Pattern, DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, HttpRule,
    Label, MethodDescriptorProto, ServiceDescriptorProto,
};
use crate::descriptor::FileDescriptorProto;
use crate::diagnostics::{Diagnostics, Stage};

/// Message and enum declarations of a whole descriptor set, by fully
/// qualified name with the leading dot (`.pkg.Outer.Inner`).
pub struct TypeIndex<'a> {
    messages: HashMap<String, &'a DescriptorProto>,
    enums: HashMap<String, &'a EnumDescriptorProto>,
}

impl<'a> TypeIndex<'a> {
    #[must_use]
    pub fn new(files: &'a [FileDescriptorProto]) -> Self {
        let mut index = TypeIndex {
            messages: HashMap::new(),
            enums: HashMap::new(),
        };
        for file in files {
            let prefix = match file.package.as_deref() {
                Some(pkg) if !pkg.is_empty() => format!(".{pkg}"),
                _ => String::new(),
            };
            for e in &file.enum_type {
                index.enums.insert(format!("{prefix}.{}", name_of(&e.name)), e);
            }
            for m in &file.message_type {
                index.add_message(&prefix, m);
            }
        }
        index
    }

    fn add_message(&mut self, prefix: &str, message: &'a DescriptorProto) {
        let full = format!("{prefix}.{}", name_of(&message.name));
        for e in &message.enum_type {
            self.enums.insert(format!("{full}.{}", name_of(&e.name)), e);
        }
        for nested in &message.nested_type {
            self.add_message(&full, nested);
        }
        self.messages.insert(full, message);
    }

    #[must_use]
    pub fn message(&self, type_name: &str) -> Option<&'a DescriptorProto> {
        self.messages.get(&dotted(type_name)).copied()
    }

    #[must_use]
    pub fn is_enum(&self, type_name: &str) -> bool {
        self.enums.contains_key(&dotted(type_name))
    }
}

fn dotted(type_name: &str) -> String {
    if type_name.starts_with('.') {
        type_name.to_string()
    } else {
        format!(".{type_name}")
    }
}

fn name_of(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or_default()
}

fn join(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

struct Ctx<'i, 'a> {
    file: &'a str,
    package: &'a str,
    proto2: bool,
    index: &'i TypeIndex<'a>,
    comments: &'i Associations,
}

impl Ctx<'_, '_> {
    fn describe(&self, key: &str) -> String {
        self.comments.description(self.file, key)
    }

    fn full_name(&self, scoped: &str) -> String {
        join(self.package, scoped)
    }
}

/// Build the AST node for one file.
pub fn build_file(
    file: &FileDescriptorProto,
    index: &TypeIndex<'_>,
    comments: &Associations,
    diagnostics: &mut Diagnostics,
) -> File {
    let name = name_of(&file.name);
    let package = file.package.as_deref().unwrap_or_default();
    let ctx = Ctx {
        file: name,
        package,
        proto2: matches!(file.syntax.as_deref(), None | Some("") | Some("proto2")),
        index,
        comments,
    };

    let description = comments
        .get(name, "#package")
        .or_else(|| comments.get(name, "#syntax"))
        .unwrap_or_default()
        .to_string();

    let messages = file
        .message_type
        .iter()
        .map(|m| build_message(&ctx, "", m))
        .collect();
    let enums = file
        .enum_type
        .iter()
        .map(|e| build_enum(&ctx, "", e))
        .collect();
    let services = file
        .service
        .iter()
        .map(|s| build_service(&ctx, s, diagnostics))
        .collect();

    File {
        name: name.to_string(),
        package: package.to_string(),
        description,
        messages,
        enums,
        services,
    }
}

fn build_message(ctx: &Ctx<'_, '_>, scope: &str, message: &DescriptorProto) -> Message {
    let scoped = join(scope, name_of(&message.name));
    let fields = message
        .field
        .iter()
        .map(|f| Field {
            name: name_of(&f.name).to_string(),
            number: f.number.unwrap_or_default(),
            description: ctx.describe(&join(&scoped, name_of(&f.name))),
            field_type: field_type(ctx, f),
            oneof: oneof_name(message, f),
        })
        .collect();

    Message {
        name: name_of(&message.name).to_string(),
        full_name: ctx.full_name(&scoped),
        description: ctx.describe(&scoped),
        fields,
        nested_messages: message
            .nested_type
            .iter()
            .map(|m| build_message(ctx, &scoped, m))
            .collect(),
        nested_enums: message
            .enum_type
            .iter()
            .map(|e| build_enum(ctx, &scoped, e))
            .collect(),
        map_entry: is_map_entry(message),
    }
}

fn is_map_entry(message: &DescriptorProto) -> bool {
    message
        .options
        .as_ref()
        .and_then(|o| o.map_entry)
        .unwrap_or(false)
}

fn oneof_name(message: &DescriptorProto, field: &FieldDescriptorProto) -> Option<String> {
    if field.proto3_optional.unwrap_or(false) {
        return None;
    }
    let index = usize::try_from(field.oneof_index?).ok()?;
    message
        .oneof_decl
        .get(index)
        .map(|o| name_of(&o.name).to_string())
}

fn scalar_kind(field: &FieldDescriptorProto, index: &TypeIndex<'_>) -> ScalarKind {
    use crate::descriptor::proto::FieldType as Wire;

    let wire = field.r#type.and_then(|t| Wire::try_from(t).ok());
    match wire {
        Some(Wire::Double) => ScalarKind::Double,
        Some(Wire::Float) => ScalarKind::Float,
        Some(Wire::Int64) => ScalarKind::Int64,
        Some(Wire::Uint64) => ScalarKind::Uint64,
        Some(Wire::Int32) => ScalarKind::Int32,
        Some(Wire::Fixed64) => ScalarKind::Fixed64,
        Some(Wire::Fixed32) => ScalarKind::Fixed32,
        Some(Wire::Bool) => ScalarKind::Bool,
        Some(Wire::String) => ScalarKind::String,
        Some(Wire::Group) => ScalarKind::Group,
        Some(Wire::Message) => ScalarKind::Message,
        Some(Wire::Bytes) => ScalarKind::Bytes,
        Some(Wire::Uint32) => ScalarKind::Uint32,
        Some(Wire::Enum) => ScalarKind::Enum,
        Some(Wire::Sfixed32) => ScalarKind::Sfixed32,
        Some(Wire::Sfixed64) => ScalarKind::Sfixed64,
        Some(Wire::Sint32) => ScalarKind::Sint32,
        Some(Wire::Sint64) => ScalarKind::Sint64,
        // Unresolved descriptors leave the type unset and name the target.
        None => match field.type_name.as_deref() {
            Some(t) if index.is_enum(t) => ScalarKind::Enum,
            Some(_) => ScalarKind::Message,
            None => ScalarKind::String,
        },
    }
}

fn cardinality(ctx: &Ctx<'_, '_>, field: &FieldDescriptorProto) -> Cardinality {
    let label = field.label.and_then(|l| Label::try_from(l).ok());
    match label {
        Some(Label::Repeated) => Cardinality::Repeated,
        _ if field.proto3_optional.unwrap_or(false) => Cardinality::Optional,
        Some(Label::Optional) if ctx.proto2 => Cardinality::Optional,
        _ => Cardinality::Single,
    }
}

fn field_type(ctx: &Ctx<'_, '_>, field: &FieldDescriptorProto) -> FieldType {
    let kind = scalar_kind(field, ctx.index);
    let type_name = field
        .type_name
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_start_matches('.').to_string());
    let enum_ref = match kind {
        ScalarKind::Enum => type_name.clone(),
        _ => None,
    };
    let map_entry = match kind {
        ScalarKind::Message => field
            .type_name
            .as_deref()
            .and_then(|t| ctx.index.message(t))
            .is_some_and(is_map_entry),
        _ => false,
    };
    FieldType {
        kind,
        cardinality: cardinality(ctx, field),
        type_name,
        enum_ref,
        map_entry,
    }
}

fn build_enum(ctx: &Ctx<'_, '_>, scope: &str, e: &EnumDescriptorProto) -> Enum {
    let scoped = join(scope, name_of(&e.name));
    Enum {
        name: name_of(&e.name).to_string(),
        full_name: ctx.full_name(&scoped),
        description: ctx.describe(&scoped),
        values: e
            .value
            .iter()
            .map(|v| EnumValue {
                name: name_of(&v.name).to_string(),
                number: v.number.unwrap_or_default(),
                description: ctx.describe(&join(&scoped, name_of(&v.name))),
            })
            .collect(),
    }
}

fn build_service(
    ctx: &Ctx<'_, '_>,
    service: &ServiceDescriptorProto,
    diagnostics: &mut Diagnostics,
) -> Service {
    let name = name_of(&service.name);
    Service {
        name: name.to_string(),
        full_name: ctx.full_name(name),
        description: ctx.describe(name),
        methods: service
            .method
            .iter()
            .map(|m| build_method(ctx, name, m, diagnostics))
            .collect(),
    }
}

fn last_segment(type_name: &str) -> String {
    type_name
        .rsplit('.')
        .next()
        .unwrap_or(type_name)
        .to_string()
}

fn build_method(
    ctx: &Ctx<'_, '_>,
    service: &str,
    method: &MethodDescriptorProto,
    diagnostics: &mut Diagnostics,
) -> Method {
    let name = name_of(&method.name);
    let scoped = join(service, name);
    let request = method.input_type.as_deref().unwrap_or_default();
    let response = method.output_type.as_deref().unwrap_or_default();

    let bindings = match method.options.as_ref().and_then(|o| o.http.as_ref()) {
        Some(rule) => {
            let request_message = ctx.index.message(request);
            if request_message.is_none() {
                diagnostics.warn(
                    Stage::Build,
                    Some(ctx.file),
                    &[],
                    format!("{scoped}: request type `{request}` not found; bindings carry no fields"),
                );
            }
            flatten_rules(rule)
                .into_iter()
                .filter_map(|r| build_binding(ctx, &scoped, r, request_message, diagnostics))
                .collect()
        }
        None => Vec::new(),
    };

    Method {
        name: name.to_string(),
        description: ctx.describe(&scoped),
        request_type: request.trim_start_matches('.').to_string(),
        request_name: last_segment(request),
        response_type: response.trim_start_matches('.').to_string(),
        response_name: last_segment(response),
        client_streaming: method.client_streaming.unwrap_or(false),
        server_streaming: method.server_streaming.unwrap_or(false),
        bindings,
    }
}

/// The primary rule followed by its additional bindings.
fn flatten_rules(rule: &HttpRule) -> Vec<&HttpRule> {
    let mut out = vec![rule];
    let mut i = 0;
    while i < out.len() {
        let next = out[i];
        out.extend(next.additional_bindings.iter());
        i += 1;
    }
    out
}

fn verb_and_template(rule: &HttpRule) -> Option<(Result<http::Method, String>, &str)> {
    let pair = match rule.pattern.as_ref()? {
        Pattern::Get(p) => (Ok(http::Method::GET), p.as_str()),
        Pattern::Put(p) => (Ok(http::Method::PUT), p.as_str()),
        Pattern::Post(p) => (Ok(http::Method::POST), p.as_str()),
        Pattern::Delete(p) => (Ok(http::Method::DELETE), p.as_str()),
        Pattern::Patch(p) => (Ok(http::Method::PATCH), p.as_str()),
        Pattern::Custom(c) => (
            http::Method::from_bytes(c.kind.to_ascii_uppercase().as_bytes())
                .map_err(|_| c.kind.clone()),
            c.path.as_str(),
        ),
    };
    Some(pair)
}

fn build_binding(
    ctx: &Ctx<'_, '_>,
    method: &str,
    rule: &HttpRule,
    request: Option<&DescriptorProto>,
    diagnostics: &mut Diagnostics,
) -> Option<HttpBinding> {
    let Some((verb, template)) = verb_and_template(rule) else {
        diagnostics.warn(
            Stage::Build,
            Some(ctx.file),
            &[],
            format!("{method}: http rule has no pattern; skipped"),
        );
        return None;
    };
    let verb = match verb {
        Ok(verb) => verb,
        Err(kind) => {
            diagnostics.warn(
                Stage::Build,
                Some(ctx.file),
                &[],
                format!("{method}: custom verb `{kind}` is not a valid HTTP method; skipped"),
            );
            return None;
        }
    };

    let placeholders = PathIndex::parse(template);
    let body = Some(rule.body.as_str()).filter(|b| !b.is_empty());
    let fields: Vec<BindingField> = request
        .map(|m| {
            m.field
                .iter()
                .map(|f| binding_field(ctx, f, &placeholders, body))
                .collect()
        })
        .unwrap_or_default();

    if request.is_some() {
        for (placeholder, _) in placeholders.iter() {
            if !fields.iter().any(|f| f.name == placeholder) {
                diagnostics.warn(
                    Stage::Build,
                    Some(ctx.file),
                    &[],
                    format!("{method}: placeholder `{placeholder}` in `{template}` is not a request field"),
                );
            }
        }
    }

    debug!(
        method,
        verb = %verb,
        template,
        fields = fields.len(),
        "HTTP binding built"
    );
    Some(HttpBinding {
        verb,
        path_template: template.to_string(),
        base_path: base_path(template),
        body: body.map(str::to_string),
        fields,
    })
}

fn binding_field(
    ctx: &Ctx<'_, '_>,
    field: &FieldDescriptorProto,
    placeholders: &PathIndex,
    body: Option<&str>,
) -> BindingField {
    let name = name_of(&field.name);
    let FieldType {
        kind,
        cardinality,
        map_entry,
        ..
    } = field_type(ctx, field);
    // A map decodes as one JSON object, not a list of entries.
    let cardinality = if map_entry { Cardinality::Single } else { cardinality };
    let location = if placeholders.contains(name) {
        FieldLocation::Path
    } else if body.is_some_and(|b| b == "*" || b == name) {
        FieldLocation::Body
    } else {
        FieldLocation::Query
    };
    BindingField {
        name: name.to_string(),
        ident: rust_ident(name),
        location,
        scalar: kind.rust_type().to_string(),
        cardinality,
        rust_type: cardinality.wrap(kind.rust_type()),
        conversion: kind.conversion(),
        is_base_type: kind.is_base_type(),
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Snake-case identifier for `name`, raw-escaped when it collides with a keyword.
#[must_use]
pub fn rust_ident(name: &str) -> String {
    let ident = name.to_snake_case();
    match ident.as_str() {
        // Not valid as raw identifiers.
        "self" | "super" | "crate" | "Self" => format!("{ident}_"),
        _ if RUST_KEYWORDS.contains(&ident.as_str()) => format!("r#{ident}"),
        "" => "_".to_string(),
        _ => ident,
    }
}
