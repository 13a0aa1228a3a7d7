//! Unit tests for CLI commands
#![allow(clippy::unwrap_used, clippy::panic)]

use crate::cli::{effective_config, route_lines, Cli, Commands};
use crate::docs::DocsFormat;
use crate::walker::WalkPolicy;
use clap::Parser;

#[test]
fn test_docs_command() {
    let cli = Cli::try_parse_from([
        "svcgen",
        "docs",
        "--descriptor",
        "calc.pb",
        "--file",
        "calc.proto",
        "--file",
        "common.proto",
        "--format",
        "json",
    ])
    .unwrap();

    match cli.command {
        Commands::Docs { input, format, out } => {
            assert_eq!(input.descriptor.to_string_lossy(), "calc.pb");
            assert_eq!(input.files, vec!["calc.proto", "common.proto"]);
            assert_eq!(format, Some(DocsFormat::Json));
            assert!(out.is_none());
            assert!(!input.strict);
        }
        _ => panic!("Expected Docs command"),
    }
}

#[test]
fn test_generate_command_with_flags() {
    let cli = Cli::try_parse_from([
        "svcgen",
        "generate",
        "-d",
        "calc.pb",
        "--service",
        "calc.Calculator",
        "--out",
        "out",
        "--force",
        "--dry-run",
        "--strict",
        "-v",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Generate {
            input,
            service,
            out,
            force,
            dry_run,
            templates,
            ..
        } => {
            assert!(input.strict);
            assert_eq!(service.as_deref(), Some("calc.Calculator"));
            assert_eq!(out.to_string_lossy(), "out");
            assert!(force);
            assert!(dry_run);
            assert!(templates.is_none());
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_requires_out() {
    assert!(Cli::try_parse_from(["svcgen", "generate", "--descriptor", "calc.pb"]).is_err());
}

#[test]
fn test_routes_requires_descriptor() {
    assert!(Cli::try_parse_from(["svcgen", "routes"]).is_err());
    assert!(Cli::try_parse_from(["svcgen", "routes", "--descriptor", "calc.pb"]).is_ok());
}

#[test]
fn test_flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("svcgen.toml"),
        "service = \"FromFile\"\nhandler_import = \"file::handlers\"\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "svcgen",
        "generate",
        "--descriptor",
        "calc.pb",
        "--service",
        "FromFlag",
        "--out",
        "out",
        "--strict",
    ])
    .unwrap();
    let config = effective_config(&cli.command, dir.path()).unwrap();
    assert_eq!(config.service.as_deref(), Some("FromFlag"));
    assert_eq!(config.handler_import.as_deref(), Some("file::handlers"));
    assert_eq!(config.walk_policy, WalkPolicy::Strict);
}

#[test]
fn test_route_lines() {
    use crate::ast::{HttpBinding, Method, Schema, Service, File};

    let binding = HttpBinding {
        verb: http::Method::GET,
        path_template: "/v1/sum/{a}".into(),
        base_path: "/v1/sum".into(),
        body: None,
        fields: Vec::new(),
    };
    let schema = Schema {
        files: vec![File {
            name: "calc.proto".into(),
            services: vec![Service {
                name: "Calculator".into(),
                full_name: "calc.Calculator".into(),
                description: String::new(),
                methods: vec![Method {
                    name: "Sum".into(),
                    description: String::new(),
                    request_type: "calc.Pair".into(),
                    request_name: "Pair".into(),
                    response_type: "calc.Result".into(),
                    response_name: "Result".into(),
                    client_streaming: false,
                    server_streaming: false,
                    bindings: vec![binding],
                }],
            }],
            ..Default::default()
        }],
    };
    let lines = route_lines(&schema);
    assert_eq!(lines.len(), 1);
    let parts: Vec<&str> = lines[0].split_whitespace().collect();
    assert_eq!(parts, vec!["GET", "/v1/sum/{a}", "/v1/sum", "calc.Calculator.Sum"]);
}
