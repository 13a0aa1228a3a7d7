//! # Docs Module
//!
//! Renders the correlated [`Schema`] as documentation. The renderer only
//! reads the tree; comments are already attached by [`crate::correlate`].
//!
//! - [`render_markdown`] uses the compile-time `askama` template in
//!   `templates/docs.md`
//! - [`render_json`] serialises the tree itself

use askama::Template;
use serde::{Deserialize, Serialize};

use crate::ast::{Cardinality, Enum, Field, File, Message, Schema};

/// Output format of the `docs` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DocsFormat {
    #[default]
    Markdown,
    Json,
}

/// Render `schema` in `format`.
pub fn render(schema: &Schema, format: DocsFormat) -> anyhow::Result<String> {
    Ok(match format {
        DocsFormat::Markdown => render_markdown(schema)?,
        DocsFormat::Json => render_json(schema)?,
    })
}

/// Markdown reference for every file, service, message and enum.
pub fn render_markdown(schema: &Schema) -> Result<String, askama::Error> {
    let template = DocsTemplate {
        files: schema.files.iter().map(FileView::from).collect(),
    };
    template.render()
}

/// The schema tree as pretty-printed JSON.
pub fn render_json(schema: &Schema) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(schema)
}

#[derive(Template)]
#[template(path = "docs.md", escape = "none")]
struct DocsTemplate {
    files: Vec<FileView>,
}

struct FileView {
    name: String,
    package: String,
    description: String,
    services: Vec<ServiceView>,
    messages: Vec<MessageView>,
    enums: Vec<EnumView>,
}

struct ServiceView {
    full_name: String,
    description: String,
    methods: Vec<MethodView>,
}

struct MethodView {
    name: String,
    description: String,
    signature: String,
    routes: Vec<RouteView>,
}

struct RouteView {
    verb: String,
    template: String,
    base_path: String,
    fields: Vec<Row>,
}

struct MessageView {
    full_name: String,
    description: String,
    fields: Vec<Row>,
}

struct EnumView {
    full_name: String,
    description: String,
    values: Vec<Row>,
}

/// One table row: name, a short detail column and a one-line description.
struct Row {
    name: String,
    detail: String,
    description: String,
}

/// Comment text as a single Markdown table cell.
fn table_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn type_label(field: &Field) -> String {
    let ty = &field.field_type;
    let base = ty
        .type_name
        .clone()
        .unwrap_or_else(|| format!("{:?}", ty.kind).to_lowercase());
    match ty.cardinality {
        Cardinality::Repeated if ty.map_entry => format!("map ({base})"),
        Cardinality::Repeated => format!("repeated {base}"),
        Cardinality::Optional => format!("optional {base}"),
        Cardinality::Single => base,
    }
}

fn flatten_messages<'a>(messages: &'a [Message], out: &mut Vec<&'a Message>) {
    for message in messages {
        if !message.map_entry {
            out.push(message);
        }
        flatten_messages(&message.nested_messages, out);
    }
}

fn enum_view(e: &Enum) -> EnumView {
    EnumView {
        full_name: e.full_name.clone(),
        description: e.description.clone(),
        values: e
            .values
            .iter()
            .map(|v| Row {
                name: v.name.clone(),
                detail: v.number.to_string(),
                description: table_cell(&v.description),
            })
            .collect(),
    }
}

impl From<&File> for FileView {
    fn from(file: &File) -> Self {
        let mut messages = Vec::new();
        flatten_messages(&file.messages, &mut messages);

        let mut enums: Vec<EnumView> = file.enums.iter().map(enum_view).collect();
        enums.extend(
            messages
                .iter()
                .flat_map(|m| m.nested_enums.iter())
                .map(enum_view),
        );

        FileView {
            name: file.name.clone(),
            package: file.package.clone(),
            description: file.description.clone(),
            services: file
                .services
                .iter()
                .map(|s| ServiceView {
                    full_name: s.full_name.clone(),
                    description: s.description.clone(),
                    methods: s
                        .methods
                        .iter()
                        .map(|m| MethodView {
                            name: m.name.clone(),
                            description: m.description.clone(),
                            signature: format!(
                                "{}({}{}) returns ({}{})",
                                m.name,
                                if m.client_streaming { "stream " } else { "" },
                                m.request_type,
                                if m.server_streaming { "stream " } else { "" },
                                m.response_type,
                            ),
                            routes: m
                                .bindings
                                .iter()
                                .map(|b| RouteView {
                                    verb: b.verb.to_string(),
                                    template: b.path_template.clone(),
                                    base_path: b.base_path.clone(),
                                    fields: b
                                        .fields
                                        .iter()
                                        .map(|f| Row {
                                            name: f.name.clone(),
                                            detail: format!("{:?}", f.location).to_lowercase(),
                                            description: f.rust_type.clone(),
                                        })
                                        .collect(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
            messages: messages
                .into_iter()
                .map(|m| MessageView {
                    full_name: m.full_name.clone(),
                    description: m.description.clone(),
                    fields: m
                        .fields
                        .iter()
                        .map(|f| Row {
                            name: f.name.clone(),
                            detail: format!("{} `{}`", f.number, type_label(f)),
                            description: table_cell(&f.description),
                        })
                        .collect(),
                })
                .collect(),
            enums,
        }
    }
}
