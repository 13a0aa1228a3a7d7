mod common;

use common::fixtures;
use prost::Message;
use svcgen::config::GeneratorConfig;
use svcgen::descriptor::proto::CodeGeneratorResponse;
use svcgen::descriptor::{decode_plugin_request, encode_plugin_response};
use svcgen::plugin::respond_with;

fn run(to_generate: &[&str], parameter: &str) -> anyhow::Result<Vec<(String, String)>> {
    let request = decode_plugin_request(&fixtures::plugin_request(to_generate, parameter))?;
    respond_with(&request, GeneratorConfig::default())
}

#[test]
fn test_docs_mode_one_document_per_file() {
    let files = run(&["calc.proto", "admin.proto"], "mode=docs").unwrap();
    let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["calc.md", "admin.md"]);
    assert!(files[0].1.contains("## Service `calc.Calculator`"));
    assert!(files[0].1.contains("Arithmetic service."));
    assert!(!files[0].1.contains("calc.Admin"));
    assert!(files[1].1.contains("## Service `calc.Admin`"));
}

#[test]
fn test_docs_mode_json() {
    let files = run(&["calc.proto"], "mode=docs,docs_format=json").unwrap();
    assert_eq!(files[0].0, "calc.json");
    let tree: serde_json::Value = serde_json::from_str(&files[0].1).unwrap();
    assert_eq!(tree["files"][0]["description"], "Calculator API.");
}

#[test]
fn test_generate_mode_default() {
    let files = run(&["calc.proto"], "").unwrap();
    let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
    assert!(names.contains(&"Cargo.toml"));
    assert!(names.contains(&"src/svc/routes.rs"));
    assert!(names.contains(&"docs/calculator.md"));
}

#[test]
fn test_generate_mode_service_parameter() {
    let files = run(&["calc.proto", "admin.proto"], "mode=generate,service=Admin").unwrap();
    assert!(files.iter().any(|(n, _)| n == "docs/admin.md"));
}

#[test]
fn test_error_becomes_response_error() {
    let err = run(&["calc.proto"], "mode=generate,service=Missing").unwrap_err();
    let bytes = encode_plugin_response(Err(format!("{err:#}")));
    let response = CodeGeneratorResponse::decode(bytes.as_slice()).unwrap();
    assert!(response.file.is_empty());
    assert!(response.error.unwrap().contains("Missing"));
}

#[test]
fn test_success_response_carries_files() {
    let files = run(&["calc.proto"], "mode=docs").unwrap();
    let bytes = encode_plugin_response(Ok(files));
    let response = CodeGeneratorResponse::decode(bytes.as_slice()).unwrap();
    assert!(response.error.is_none());
    assert_eq!(response.file.len(), 1);
    assert_eq!(response.file[0].name.as_deref(), Some("calc.md"));
    assert_eq!(response.supported_features, Some(1));
}

#[test]
fn test_strict_parameter_fails_on_bad_location() {
    let mut calc = fixtures::calc_file();
    if let Some(info) = calc.source_code_info.as_mut() {
        info.location.push(fixtures::commented(&[6, 3], "No such service."));
    }
    let request = svcgen::descriptor::proto::CodeGeneratorRequest {
        file_to_generate: vec!["calc.proto".into()],
        parameter: Some("mode=docs,walk_policy=strict".into()),
        proto_file: vec![calc],
    };
    let err = respond_with(&request, GeneratorConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("out of range"));

    let mut lenient = request.clone();
    lenient.parameter = Some("mode=docs".into());
    assert!(respond_with(&lenient, GeneratorConfig::default()).is_ok());
}
