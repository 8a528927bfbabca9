use super::*;
use expect_test::expect;

use crate::identify::identify_file;
use crate::specs::ResolvedType;
use crate::syntax::parse_file;

fn field(name: &str, resolved: ResolvedType, is_pointer: bool) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        snake_case_name: None,
        resolved,
        is_pointer,
    }
}

fn named(ty: &str) -> ResolvedType {
    ResolvedType::Named(ty.to_string())
}

#[test]
fn test_render_int_struct() {
    let types = vec![GeneratedType {
        spec: StructSpec {
            name: "Point".to_string(),
            fields: vec![field("X", named("int"), false), field("Y", named("int"), false)],
        },
        has_url_values: false,
    }];
    let output = render("geo", &types);
    expect![[r#"
        // Code generated by urlvaluer; DO NOT EDIT.

        package geo

        import (
        	"net/url"
        	"strconv"
        )

        // UrlValues returns the URL query encoding of p.
        func (p Point) UrlValues() string {
        	values := url.Values{}
        	if p.X != 0 {
        		values.Set("x", strconv.FormatInt(int64(p.X), 10))
        	}
        	if p.Y != 0 {
        		values.Set("y", strconv.FormatInt(int64(p.Y), 10))
        	}
        	return values.Encode()
        }
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_render_every_field_kind() {
    let mut user_id = field("UserID", named("int64"), false);
    user_id.snake_case_name = Some("user".to_string());
    let types = vec![GeneratedType {
        spec: StructSpec {
            name: "Request".to_string(),
            fields: vec![
                field("Name", named("string"), false),
                user_id,
                field("Ratio", named("float64"), true),
                field("Tags", ResolvedType::Array, false),
                field("Filter", named("Filter"), false),
                field("Parent", named("Node"), true),
            ],
        },
        has_url_values: false,
    }];
    let output = render("api", &types);
    expect![[r#"
        // Code generated by urlvaluer; DO NOT EDIT.

        package api

        import (
        	"fmt"
        	"net/url"
        	"strconv"
        )

        // UrlValues returns the URL query encoding of r.
        func (r Request) UrlValues() string {
        	values := url.Values{}
        	if r.Name != "" {
        		values.Set("name", r.Name)
        	}
        	if r.UserID != 0 {
        		values.Set("user", strconv.FormatInt(int64(r.UserID), 10))
        	}
        	if r.Ratio != nil {
        		values.Set("ratio", strconv.FormatFloat(float64(*r.Ratio), 'f', -1, 64))
        	}
        	for _, item := range r.Tags {
        		values.Add("tags", fmt.Sprint(item))
        	}
        	values.Set("filter", r.Filter.UrlValues())
        	if r.Parent != nil {
        		values.Set("parent", r.Parent.UrlValues())
        	}
        	return values.Encode()
        }
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_render_pointer_scalars_and_sequences() {
    let types = vec![GeneratedType {
        spec: StructSpec {
            name: "Opts".to_string(),
            fields: vec![
                field("Label", named("string"), true),
                field("Count", named("int"), true),
                field("Extra", ResolvedType::Array, true),
            ],
        },
        has_url_values: false,
    }];
    let output = render("opts", &types);
    expect![[r#"
        // Code generated by urlvaluer; DO NOT EDIT.

        package opts

        import (
        	"fmt"
        	"net/url"
        	"strconv"
        )

        // UrlValues returns the URL query encoding of o.
        func (o Opts) UrlValues() string {
        	values := url.Values{}
        	if o.Label != nil {
        		values.Set("label", *o.Label)
        	}
        	if o.Count != nil {
        		values.Set("count", strconv.FormatInt(int64(*o.Count), 10))
        	}
        	if o.Extra != nil {
        		for _, item := range *o.Extra {
        			values.Add("extra", fmt.Sprint(item))
        		}
        	}
        	return values.Encode()
        }
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_render_skips_flagged_structs_and_trims_imports() {
    let types = vec![
        GeneratedType {
            spec: StructSpec {
                name: "Raw".to_string(),
                fields: vec![field("Count", named("int"), false)],
            },
            has_url_values: true,
        },
        GeneratedType {
            spec: StructSpec {
                name: "User".to_string(),
                fields: vec![field("Name", named("string"), false)],
            },
            has_url_values: false,
        },
    ];
    let output = render("q", &types);
    expect![[r#"
        // Code generated by urlvaluer; DO NOT EDIT.

        package q

        import (
        	"net/url"
        )

        // UrlValues returns the URL query encoding of u.
        func (u User) UrlValues() string {
        	values := url.Values{}
        	if u.Name != "" {
        		values.Set("name", u.Name)
        	}
        	return values.Encode()
        }
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_render_without_methods_keeps_header_and_package() {
    let types = vec![GeneratedType {
        spec: StructSpec {
            name: "Done".to_string(),
            fields: Vec::new(),
        },
        has_url_values: true,
    }];
    let output = render("empty", &types);
    expect![[r#"
        // Code generated by urlvaluer; DO NOT EDIT.

        package empty
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_render_from_parsed_source() {
    let source = "package geo\n\n\
                  type Point struct {\n\
                  \tX int\n\
                  \tY int\n\
                  \tLabel string `json:\"label_text\"`\n\
                  }\n\n\
                  type Raw struct {\n\
                  \tBody string\n\
                  }\n\n\
                  func (r Raw) UrlValues() string { return \"\" }\n";
    let file = parse_file(source).expect("parse failed");
    let types = identify_file(&file).expect("identify failed");
    let output = render(&file.package, &types);
    expect![[r#"
        // Code generated by urlvaluer; DO NOT EDIT.

        package geo

        import (
        	"net/url"
        	"strconv"
        )

        // UrlValues returns the URL query encoding of p.
        func (p Point) UrlValues() string {
        	values := url.Values{}
        	if p.X != 0 {
        		values.Set("x", strconv.FormatInt(int64(p.X), 10))
        	}
        	if p.Y != 0 {
        		values.Set("y", strconv.FormatInt(int64(p.Y), 10))
        	}
        	if p.Label != "" {
        		values.Set("label_text", p.Label)
        	}
        	return values.Encode()
        }
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_snake_case() {
    let cases = [
        ("Name", "name"),
        ("X", "x"),
        ("UserID", "user_id"),
        ("HTTPStatus", "http_status"),
        ("APIKey", "api_key"),
        ("already_snake", "already_snake"),
        ("ID", "id"),
    ];
    for (input, expected) in cases {
        assert_eq!(snake_case(input), expected, "{input}");
    }
}

#[test]
fn test_receiver_name() {
    assert_eq!(receiver_name("Point"), "p");
    assert_eq!(receiver_name("URL"), "u");
    assert_eq!(receiver_name("_hidden"), "v");
    assert_eq!(receiver_name(""), "v");
}
