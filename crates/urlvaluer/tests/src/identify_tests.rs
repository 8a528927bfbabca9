use super::*;
use crate::syntax::parse_file;

fn identify(source: &str) -> Vec<GeneratedType> {
    let file = parse_file(source).expect("parse failed");
    identify_file(&file).expect("identify failed")
}

#[test]
fn test_identify_marks_structs_with_handwritten_method() {
    let types = identify(
        "package geo\n\n\
         type Point struct {\n\tX int\n\tY int\n}\n\n\
         type Size struct {\n\tW int\n\tH int\n}\n\n\
         func (p Point) UrlValues() string { return \"\" }\n",
    );
    assert_eq!(types.len(), 2);
    assert_eq!(types[0].spec.name, "Point");
    assert!(types[0].has_url_values);
    assert_eq!(types[1].spec.name, "Size");
    assert!(!types[1].has_url_values);
}

#[test]
fn test_marker_method_shape_is_exact() {
    let source = "package p\n\n\
                  type A struct{}\n\
                  type B struct{}\n\
                  type C struct{}\n\
                  type D struct{}\n\
                  type E struct{}\n\
                  type F struct{}\n\n\
                  func (a A) Values() string { return \"\" }\n\
                  func (b B) UrlValues(x int) string { return \"\" }\n\
                  func (c C) UrlValues() (string, error) { return \"\", nil }\n\
                  func (d D) UrlValues() int { return 0 }\n\
                  func (e *E) UrlValues() string { return \"\" }\n\
                  func UrlValues() string { return \"\" }\n\
                  func (f F) UrlValues() string { return \"\" }\n";
    let types = identify(source);
    assert_eq!(types.len(), 6);
    for t in &types {
        if t.spec.name == "F" {
            assert!(t.has_url_values, "F has the exact shape");
        } else {
            assert!(!t.has_url_values, "{} must not match", t.spec.name);
        }
    }
}

#[test]
fn test_marker_order_is_irrelevant() {
    let types = identify(
        "package p\n\nfunc (t T) UrlValues() string { return \"\" }\n\ntype T struct{}\n",
    );
    assert_eq!(types.len(), 1);
    assert!(types[0].has_url_values);
}

#[test]
fn test_redeclared_struct_keeps_position_and_last_definition() {
    let types = identify(
        "package p\n\n\
         type A struct {\n\tOld int\n}\n\
         type B struct {\n\tX int\n}\n\
         type A struct {\n\tNew int\n}\n",
    );
    assert_eq!(types.len(), 2);
    assert_eq!(types[0].spec.name, "A");
    assert_eq!(types[0].spec.fields[0].name, "New");
    assert_eq!(types[1].spec.name, "B");
}

#[test]
fn test_generic_and_non_struct_types_are_skipped() {
    let types = identify(
        "package p\n\n\
         type Box[T any] struct {\n\tValue T\n}\n\
         type Alias = int\n\
         type Names []string\n\
         type Plain struct{}\n",
    );
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].spec.name, "Plain");
}

#[test]
fn test_zero_field_and_unexported_structs_are_included() {
    let types = identify("package p\n\ntype empty struct{}\n");
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].spec.name, "empty");
    assert!(types[0].spec.fields.is_empty());
}

#[test]
fn test_resolve_error_propagates() {
    let file = parse_file("package p\n\ntype Bad struct {\n\tP **bool\n}\n").expect("parse failed");
    let err = identify_file(&file).unwrap_err();
    assert_eq!(err.struct_name, "Bad");
    assert_eq!(err.field, "P");
    assert_eq!(err.type_desc, "**bool");
}
