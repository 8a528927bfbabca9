use super::*;
use crate::syntax::ast::Decl;
use crate::syntax::parse_file;

fn parse_struct(source: &str) -> StructBody {
    let file = parse_file(source).expect("parse failed");
    file.decls
        .into_iter()
        .find_map(|decl| match decl {
            Decl::Type(td) => match td.ty {
                TypeExpr::StructType(body) => Some(body),
                _ => None,
            },
            _ => None,
        })
        .expect("no struct in source")
}

fn named_field(ty: &str) -> FieldSpec {
    FieldSpec {
        name: "F".to_string(),
        snake_case_name: None,
        resolved: ResolvedType::Named(ty.to_string()),
        is_pointer: false,
    }
}

#[test]
fn test_kind_classification() {
    let cases = [
        ("string", FieldKind::Str),
        ("int", FieldKind::Int),
        ("int8", FieldKind::Int),
        ("int16", FieldKind::Int),
        ("int32", FieldKind::Int),
        ("int64", FieldKind::Int),
        ("float32", FieldKind::Float),
        ("float64", FieldKind::Float),
        // Unlisted names fall through, unsigned and bool included.
        ("uint", FieldKind::Nested),
        ("uint8", FieldKind::Nested),
        ("uint64", FieldKind::Nested),
        ("bool", FieldKind::Nested),
        ("byte", FieldKind::Nested),
        ("rune", FieldKind::Nested),
        ("Inner", FieldKind::Nested),
    ];
    for (name, expected) in cases {
        assert_eq!(named_field(name).kind(), expected, "{name}");
    }

    let mut seq = named_field("int");
    seq.resolved = ResolvedType::Array;
    assert_eq!(seq.kind(), FieldKind::Seq);

    let mut opaque = named_field("int");
    opaque.resolved = ResolvedType::Opaque("map[string]int".to_string());
    assert_eq!(opaque.kind(), FieldKind::Nested);
}

#[test]
fn test_resolve_fields_selects_and_classifies() {
    let body = parse_struct(
        "package p\n\ntype User struct {\n\
         \tBase\n\
         \tID int64\n\
         \tName, Alias string\n\
         \thidden string\n\
         \tXXX_unrecognized []byte\n\
         \tScore *float64\n\
         \tTags []string\n\
         \tMeta map[string]string\n\
         }\n",
    );
    let fields = resolve_fields("User", &body).expect("resolve failed");

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["ID", "Name", "Alias", "Score", "Tags", "Meta"]);

    assert_eq!(fields[0].resolved, ResolvedType::Named("int64".to_string()));
    assert!(!fields[0].is_pointer);

    let score = &fields[3];
    assert!(score.is_pointer);
    assert_eq!(score.resolved, ResolvedType::Named("float64".to_string()));

    assert_eq!(fields[4].resolved, ResolvedType::Array);
    assert_eq!(
        fields[5].resolved,
        ResolvedType::Opaque("map[string]string".to_string())
    );
    assert_eq!(fields[5].kind(), FieldKind::Nested);
}

#[test]
fn test_resolve_fields_reads_tag_override() {
    let body = parse_struct(
        "package p\n\ntype T struct {\n\
         \tUserID int `json:\"user,omitempty\"`\n\
         \tName string `xml:\"n\"`\n\
         }\n",
    );
    let fields = resolve_fields("T", &body).expect("resolve failed");
    assert_eq!(fields[0].snake_case_name.as_deref(), Some("user"));
    assert_eq!(fields[1].snake_case_name, None);
}

#[test]
fn test_double_pointer_is_an_error() {
    let body = parse_struct("package p\n\ntype Bad struct {\n\tP **int\n}\n");
    let err = resolve_fields("Bad", &body).unwrap_err();
    assert_eq!(err.struct_name, "Bad");
    assert_eq!(err.field, "P");
    assert_eq!(err.type_desc, "**int");
    assert_eq!(
        err.to_string(),
        "field Bad.P has unsupported multi-level pointer type **int"
    );
}

#[test]
fn test_resolve_type_unwraps_one_pointer() {
    let int = TypeExpr::Named("int".to_string());
    assert_eq!(
        resolve_type(&int),
        Some((false, ResolvedType::Named("int".to_string())))
    );

    let ptr_slice = TypeExpr::Pointer(Box::new(TypeExpr::Array(Box::new(int.clone()))));
    assert_eq!(resolve_type(&ptr_slice), Some((true, ResolvedType::Array)));

    let double = TypeExpr::Pointer(Box::new(TypeExpr::Pointer(Box::new(int))));
    assert_eq!(resolve_type(&double), None);

    let qualified = TypeExpr::Qualified {
        package: "time".to_string(),
        name: "Time".to_string(),
    };
    assert_eq!(
        resolve_type(&qualified),
        Some((false, ResolvedType::Opaque("time.Time".to_string())))
    );
}

#[test]
fn test_tag_name_override() {
    let cases = [
        (r#"`json:"alt_name,omitempty"`"#, Some("alt_name")),
        (r#"`json:"-"`"#, Some("-")),
        (r#"`json:",omitempty"`"#, None),
        (r#"`xml:"name" json:"jn"`"#, Some("jn")),
        (r#"`xml:"name"`"#, None),
        (r#"`json:""`"#, None),
        ("\"json:\\\"quoted\\\"\"", Some("quoted")),
        (r#"`json "no colon"`"#, None),
        ("bad", None),
        ("\"json:\\x\"", None),
    ];
    for (literal, expected) in cases {
        assert_eq!(tag_name_override(literal).as_deref(), expected, "{literal}");
    }
}

#[test]
fn test_unquote_tag_literal() {
    assert_eq!(
        unquote_tag_literal("`a:\"b\"`").as_deref(),
        Some("a:\"b\"")
    );
    assert_eq!(unquote_tag_literal("\"a\\tb\"").as_deref(), Some("a\tb"));
    assert_eq!(unquote_tag_literal("``").as_deref(), Some(""));
    assert_eq!(unquote_tag_literal("auto"), None);
    assert_eq!(unquote_tag_literal(""), None);
    assert_eq!(unquote_tag_literal("\"truncated"), None);
}

#[test]
fn test_is_exported() {
    assert!(is_exported("Name"));
    assert!(!is_exported("name"));
    assert!(!is_exported("_private"));
    assert!(!is_exported(""));
    assert!(is_exported("Ünicode"));
}
