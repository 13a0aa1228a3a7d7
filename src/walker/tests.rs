#![allow(clippy::unwrap_used, clippy::panic)]

use super::*;
use crate::descriptor::proto::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, MethodDescriptorProto, MethodOptions, ServiceDescriptorProto,
};
use crate::descriptor::{NodeKind, NodeRef};
use crate::diagnostics::Diagnostics;
use crate::error::WalkError;

fn field(name: &str, number: i32) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.into()),
        number: Some(number),
        ..Default::default()
    }
}

fn method(name: &str) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(name.into()),
        input_type: Some(".calc.SumRequest".into()),
        output_type: Some(".calc.SumReply".into()),
        ..Default::default()
    }
}

fn calc_file() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("calc.proto".into()),
        package: Some("calc".into()),
        dependency: vec!["google/api/annotations.proto".into()],
        message_type: vec![DescriptorProto {
            name: Some("SumRequest".into()),
            field: vec![field("a", 1), field("b", 2)],
            nested_type: vec![DescriptorProto {
                name: Some("Inner".into()),
                field: vec![field("x", 1)],
                ..Default::default()
            }],
            ..Default::default()
        }],
        enum_type: vec![EnumDescriptorProto {
            name: Some("Mode".into()),
            value: vec![EnumValueDescriptorProto {
                name: Some("MODE_FAST".into()),
                number: Some(0),
                options: None,
            }],
            options: None,
        }],
        service: vec![ServiceDescriptorProto {
            name: Some("Calculator".into()),
            method: vec![
                method("Sum"),
                MethodDescriptorProto {
                    options: Some(MethodOptions { http: None }),
                    ..method("Product")
                },
            ],
            options: None,
        }],
        syntax: Some("proto3".into()),
        ..Default::default()
    }
}

#[test]
fn test_empty_path_returns_root() {
    let file = calc_file();
    let resolved = walk(&[], NodeRef::File(&file)).unwrap();
    assert_eq!(resolved.kind, NodeKind::File);
    assert_eq!(resolved.name, "calc.proto");
    assert!(resolved.scope.is_empty());
    assert_eq!(resolved.key(), "");
}

#[test]
fn test_message_field_path() {
    let file = calc_file();
    let resolved = walk(&[4, 0, 2, 1], NodeRef::File(&file)).unwrap();
    assert_eq!(resolved.kind, NodeKind::Field);
    assert_eq!(resolved.name, "b");
    assert_eq!(resolved.scope, vec!["SumRequest"]);
    assert_eq!(resolved.key(), "SumRequest.b");
}

#[test]
fn test_service_method_path_picks_exact_method() {
    let file = calc_file();
    let resolved = walk(&[6, 0, 2, 1], NodeRef::File(&file)).unwrap();
    assert_eq!(resolved.kind, NodeKind::Method);
    assert_eq!(resolved.name, "Product");
    assert_eq!(resolved.qualified(), "Calculator.Product");

    let first = walk(&[6, 0, 2, 0], NodeRef::File(&file)).unwrap();
    assert_eq!(first.name, "Sum");
    let service = walk(&[6, 0], NodeRef::File(&file)).unwrap();
    assert_eq!(service.kind, NodeKind::Service);
}

#[test]
fn test_nested_message_scope() {
    let file = calc_file();
    let resolved = walk(&[4, 0, 3, 0, 2, 0], NodeRef::File(&file)).unwrap();
    assert_eq!(resolved.key(), "SumRequest.Inner.x");
}

#[test]
fn test_enum_value_path() {
    let file = calc_file();
    let resolved = walk(&[5, 0, 2, 0], NodeRef::File(&file)).unwrap();
    assert_eq!(resolved.kind, NodeKind::EnumValue);
    assert_eq!(resolved.key(), "Mode.MODE_FAST");
}

#[test]
fn test_path_ending_on_slot() {
    let file = calc_file();
    let package = walk(&[2], NodeRef::File(&file)).unwrap();
    assert_eq!(package.kind, NodeKind::File);
    assert_eq!(package.slot.as_deref(), Some("package"));
    assert_eq!(package.key(), "#package");

    let name = walk(&[4, 0, 2, 1, 1], NodeRef::File(&file)).unwrap();
    assert_eq!(name.key(), "SumRequest.b#name");

    let dep = walk(&[3, 0], NodeRef::File(&file)).unwrap();
    assert_eq!(dep.slot.as_deref(), Some("dependency[0]"));
}

#[test]
fn test_unknown_selector_is_malformed() {
    let file = calc_file();
    let err = walk(&[99], NodeRef::File(&file)).unwrap_err();
    assert!(matches!(err, WalkError::MalformedPath { selector: 99, .. }));
}

#[test]
fn test_descending_into_scalar_is_malformed() {
    let file = calc_file();
    let err = walk(&[2, 0], NodeRef::File(&file)).unwrap_err();
    assert!(matches!(err, WalkError::MalformedPath { .. }));
}

#[test]
fn test_index_out_of_range() {
    let file = calc_file();
    let err = walk(&[6, 0, 2, 5], NodeRef::File(&file)).unwrap_err();
    assert_eq!(
        err,
        WalkError::IndexOutOfRange {
            path: vec![6, 0, 2, 5],
            field: "method",
            index: 5,
            len: 2,
        }
    );
    let negative = walk(&[4, -1], NodeRef::File(&file)).unwrap_err();
    assert!(matches!(negative, WalkError::IndexOutOfRange { index: -1, .. }));
}

#[test]
fn test_scalar_collection_index_checked() {
    let file = calc_file();
    let err = walk(&[3, 4], NodeRef::File(&file)).unwrap_err();
    assert!(matches!(err, WalkError::IndexOutOfRange { field: "dependency", len: 1, .. }));
}

#[test]
fn test_absent_options_is_broken_reference() {
    let file = calc_file();
    // Sum has no options; Product does.
    let err = walk(&[6, 0, 2, 0, 4, 72295728], NodeRef::File(&file)).unwrap_err();
    assert_eq!(
        err,
        WalkError::BrokenReference {
            path: vec![6, 0, 2, 0, 4, 72295728],
            node: "Sum".into(),
            field: "options",
        }
    );

    // Ending on the unset field itself names the slot.
    let slot = walk(&[6, 0, 2, 0, 4], NodeRef::File(&file)).unwrap();
    assert_eq!(slot.key(), "Calculator.Sum#options");
}

#[test]
fn test_descends_into_method_options() {
    let file = calc_file();
    let http = walk(&[6, 0, 2, 1, 4, 72295728], NodeRef::File(&file)).unwrap();
    assert_eq!(http.kind, NodeKind::MethodOptions);
    assert_eq!(http.scope, vec!["Calculator", "Product"]);
    assert_eq!(http.slot.as_deref(), Some("http"));
    assert_eq!(http.key(), "Calculator.Product.options#http");

    let options = walk(&[6, 0, 2, 1, 4], NodeRef::File(&file)).unwrap();
    assert_eq!(options.key(), "Calculator.Product#options");

    let unknown = walk(&[6, 0, 2, 1, 4, 3], NodeRef::File(&file)).unwrap_err();
    assert!(matches!(unknown, WalkError::MalformedPath { selector: 3, .. }));
}

#[test]
fn test_best_effort_records_and_skips() {
    let file = calc_file();
    let mut diags = Diagnostics::new();
    let skipped = walk_with_policy(
        &[4, 7],
        NodeRef::File(&file),
        WalkPolicy::BestEffort,
        "calc.proto",
        &mut diags,
    )
    .unwrap();
    assert!(skipped.is_none());
    assert_eq!(diags.warnings(), 1);
    assert_eq!(diags.records()[0].path, vec![4, 7]);
    assert_eq!(diags.records()[0].subject.as_deref(), Some("calc.proto"));

    let found = walk_with_policy(
        &[4, 0],
        NodeRef::File(&file),
        WalkPolicy::BestEffort,
        "calc.proto",
        &mut diags,
    )
    .unwrap();
    assert_eq!(found.unwrap().name, "SumRequest");
    assert_eq!(diags.len(), 1);
}

#[test]
fn test_strict_returns_error() {
    let file = calc_file();
    let mut diags = Diagnostics::new();
    let result = walk_with_policy(
        &[4, 7],
        NodeRef::File(&file),
        WalkPolicy::Strict,
        "calc.proto",
        &mut diags,
    );
    assert!(matches!(result, Err(WalkError::IndexOutOfRange { .. })));
    assert!(diags.is_empty());
}

#[test]
fn test_policy_from_str() {
    assert_eq!("strict".parse::<WalkPolicy>().unwrap(), WalkPolicy::Strict);
    assert_eq!("best-effort".parse::<WalkPolicy>().unwrap(), WalkPolicy::BestEffort);
    assert!("lenient".parse::<WalkPolicy>().is_err());
}
