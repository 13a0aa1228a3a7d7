#![allow(dead_code, clippy::unwrap_used)]

pub mod fixtures {
    use prost::Message;
    use std::path::{Path, PathBuf};
    use svcgen::descriptor::proto::{
        http_rule::Pattern, CodeGeneratorRequest, CustomHttpPattern, DescriptorProto,
        EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto, FieldType,
        FileDescriptorProto, FileDescriptorSet, HttpRule, Label, Location, MethodDescriptorProto,
        MethodOptions, ServiceDescriptorProto, SourceCodeInfo,
    };

    pub fn field(name: &str, number: i32, label: Label, ty: FieldType) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some(name.into()),
            number: Some(number),
            label: Some(label as i32),
            r#type: Some(ty as i32),
            ..Default::default()
        }
    }

    pub fn rule(pattern: Pattern, body: &str) -> HttpRule {
        HttpRule {
            body: body.into(),
            pattern: Some(pattern),
            ..Default::default()
        }
    }

    pub fn rpc(name: &str, http: Option<HttpRule>) -> MethodDescriptorProto {
        MethodDescriptorProto {
            name: Some(name.into()),
            input_type: Some(".calc.Pair".into()),
            output_type: Some(".calc.Result".into()),
            options: http.map(|http| MethodOptions { http: Some(http) }),
            ..Default::default()
        }
    }

    pub fn commented(path: &[i32], text: &str) -> Location {
        Location {
            path: path.to_vec(),
            leading_comments: Some(format!(" {text}\n")),
            ..Default::default()
        }
    }

    /// Location paths in `calc.proto` that carry a comment.
    pub fn calc_locations() -> Vec<Location> {
        vec![
            commented(&[2], "Calculator API."),
            commented(&[4, 0], "Operands."),
            commented(&[4, 0, 2, 0], "Left operand."),
            commented(&[5, 0, 2, 1], "Exact arithmetic."),
            commented(&[6, 0], "Arithmetic service."),
            commented(&[6, 0, 2, 0], "Adds two numbers."),
            commented(&[6, 0, 2, 1], "Multiplies two numbers."),
            Location {
                path: vec![6, 0, 2, 2],
                leading_detached_comments: vec![" Cache control.\n".into()],
                leading_comments: Some(" Drops cached results.\n".into()),
                ..Default::default()
            },
        ]
    }

    /// `calc.proto`: two messages, an enum and a four-method service.
    pub fn calc_file() -> FileDescriptorProto {
        let mut sum = rule(Pattern::Get("/v1/sum/{a}/{b}".into()), "");
        sum.additional_bindings
            .push(rule(Pattern::Post("/v1/sum".into()), "*"));

        FileDescriptorProto {
            name: Some("calc.proto".into()),
            package: Some("calc".into()),
            message_type: vec![
                DescriptorProto {
                    name: Some("Pair".into()),
                    field: vec![
                        field("a", 1, Label::Optional, FieldType::Int64),
                        field("b", 2, Label::Optional, FieldType::Int64),
                        field("tags", 3, Label::Repeated, FieldType::String),
                    ],
                    ..Default::default()
                },
                DescriptorProto {
                    name: Some("Result".into()),
                    field: vec![field("value", 1, Label::Optional, FieldType::Int64)],
                    ..Default::default()
                },
            ],
            enum_type: vec![EnumDescriptorProto {
                name: Some("Mode".into()),
                value: vec![
                    EnumValueDescriptorProto {
                        name: Some("FAST".into()),
                        number: Some(0),
                        options: None,
                    },
                    EnumValueDescriptorProto {
                        name: Some("EXACT".into()),
                        number: Some(1),
                        options: None,
                    },
                ],
                options: None,
            }],
            service: vec![ServiceDescriptorProto {
                name: Some("Calculator".into()),
                method: vec![
                    rpc("Sum", Some(sum)),
                    rpc("Product", Some(rule(Pattern::Post("/v1/product".into()), "*"))),
                    rpc(
                        "Purge",
                        Some(rule(
                            Pattern::Custom(CustomHttpPattern {
                                kind: "purge".into(),
                                path: "/v1/cache/{a}".into(),
                            }),
                            "",
                        )),
                    ),
                    MethodDescriptorProto {
                        server_streaming: Some(true),
                        ..rpc("Watch", None)
                    },
                ],
                options: None,
            }],
            source_code_info: Some(SourceCodeInfo {
                location: calc_locations(),
            }),
            syntax: Some("proto3".into()),
            ..Default::default()
        }
    }

    /// `admin.proto`: a second service with no source info.
    pub fn admin_file() -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some("admin.proto".into()),
            package: Some("calc".into()),
            dependency: vec!["calc.proto".into()],
            service: vec![ServiceDescriptorProto {
                name: Some("Admin".into()),
                method: vec![rpc(
                    "Reset",
                    Some(rule(Pattern::Delete("/v1/admin/{a}".into()), "")),
                )],
                options: None,
            }],
            syntax: Some("proto3".into()),
            ..Default::default()
        }
    }

    pub fn files() -> Vec<FileDescriptorProto> {
        vec![calc_file(), admin_file()]
    }

    /// Encode and decode again, as protoc output would arrive.
    pub fn round_trip(files: Vec<FileDescriptorProto>) -> Vec<FileDescriptorProto> {
        let bytes = FileDescriptorSet { file: files }.encode_to_vec();
        svcgen::descriptor::decode_descriptor_set(&bytes)
            .unwrap()
            .file
    }

    pub fn write_descriptor_set(dir: &Path, files: Vec<FileDescriptorProto>) -> PathBuf {
        let path = dir.join("descriptors.pb");
        std::fs::write(&path, FileDescriptorSet { file: files }.encode_to_vec()).unwrap();
        path
    }

    pub fn plugin_request(to_generate: &[&str], parameter: &str) -> Vec<u8> {
        CodeGeneratorRequest {
            file_to_generate: to_generate.iter().map(|s| s.to_string()).collect(),
            parameter: (!parameter.is_empty()).then(|| parameter.to_string()),
            proto_file: files(),
        }
        .encode_to_vec()
    }
}
