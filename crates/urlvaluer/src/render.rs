//! Emits the companion Go source file: one `UrlValues` method per
//! struct that does not already implement one, plus the package clause
//! and the minimal import block the method bodies need.

use tracing::debug;

use crate::specs::{FieldKind, FieldSpec, GeneratedType, StructSpec, MARKER_METHOD};

/// Marker line recognized by `go generate` tooling and code review
/// filters.
pub const GENERATED_HEADER: &str = "// Code generated by urlvaluer; DO NOT EDIT.";

/// Renders the full output file. With no methods to emit the file
/// still carries the header and package clause so reruns stay
/// idempotent.
pub fn render(package: &str, types: &[GeneratedType]) -> String {
    let mut imports = Imports::default();
    let mut methods = Vec::new();
    for generated in types {
        if generated.has_url_values {
            debug!(
                "skipping {}: {MARKER_METHOD} already implemented",
                generated.spec.name
            );
            continue;
        }
        methods.push(render_method(&generated.spec, &mut imports));
    }

    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str("\n\n");
    out.push_str(&format!("package {package}\n"));
    if !methods.is_empty() {
        out.push('\n');
        out.push_str(&imports.render());
    }
    for method in &methods {
        out.push('\n');
        out.push_str(method);
    }
    out
}

/// Import paths required by the emitted method bodies. `net/url` is
/// implied by any method; the others are switched on per field kind.
#[derive(Default)]
struct Imports {
    fmt: bool,
    strconv: bool,
}

impl Imports {
    fn render(&self) -> String {
        let mut paths = Vec::new();
        if self.fmt {
            paths.push("fmt");
        }
        paths.push("net/url");
        if self.strconv {
            paths.push("strconv");
        }
        let mut out = String::from("import (\n");
        for path in paths {
            out.push_str(&format!("\t\"{path}\"\n"));
        }
        out.push_str(")\n");
        out
    }
}

fn render_method(spec: &StructSpec, imports: &mut Imports) -> String {
    let recv = receiver_name(&spec.name);
    let mut out = String::new();
    out.push_str(&format!(
        "// {MARKER_METHOD} returns the URL query encoding of {recv}.\n"
    ));
    out.push_str(&format!(
        "func ({recv} {}) {MARKER_METHOD}() string {{\n",
        spec.name
    ));
    out.push_str("\tvalues := url.Values{}\n");
    for field in &spec.fields {
        render_field(&mut out, &recv, field, imports);
    }
    out.push_str("\treturn values.Encode()\n");
    out.push_str("}\n");
    out
}

/// Emits the statements for one field. Zero values are suppressed so
/// the encoding only carries parameters that were actually set: nil
/// for pointers, `""` for strings, `0` for numbers. Sequences and
/// nested structs by value always encode.
fn render_field(out: &mut String, recv: &str, field: &FieldSpec, imports: &mut Imports) {
    let key = field
        .snake_case_name
        .clone()
        .unwrap_or_else(|| snake_case(&field.name));
    let access = format!("{recv}.{}", field.name);
    let value = if field.is_pointer {
        format!("*{access}")
    } else {
        access.clone()
    };

    match field.kind() {
        FieldKind::Str => {
            let guard = if field.is_pointer {
                format!("{access} != nil")
            } else {
                format!("{access} != \"\"")
            };
            out.push_str(&format!("\tif {guard} {{\n"));
            out.push_str(&format!("\t\tvalues.Set(\"{key}\", {value})\n"));
            out.push_str("\t}\n");
        }
        FieldKind::Int => {
            imports.strconv = true;
            let guard = if field.is_pointer {
                format!("{access} != nil")
            } else {
                format!("{access} != 0")
            };
            out.push_str(&format!("\tif {guard} {{\n"));
            out.push_str(&format!(
                "\t\tvalues.Set(\"{key}\", strconv.FormatInt(int64({value}), 10))\n"
            ));
            out.push_str("\t}\n");
        }
        FieldKind::Float => {
            imports.strconv = true;
            let guard = if field.is_pointer {
                format!("{access} != nil")
            } else {
                format!("{access} != 0")
            };
            out.push_str(&format!("\tif {guard} {{\n"));
            out.push_str(&format!(
                "\t\tvalues.Set(\"{key}\", strconv.FormatFloat(float64({value}), 'f', -1, 64))\n"
            ));
            out.push_str("\t}\n");
        }
        FieldKind::Seq => {
            imports.fmt = true;
            if field.is_pointer {
                out.push_str(&format!("\tif {access} != nil {{\n"));
                out.push_str(&format!("\t\tfor _, item := range {value} {{\n"));
                out.push_str(&format!("\t\t\tvalues.Add(\"{key}\", fmt.Sprint(item))\n"));
                out.push_str("\t\t}\n");
                out.push_str("\t}\n");
            } else {
                out.push_str(&format!("\tfor _, item := range {access} {{\n"));
                out.push_str(&format!("\t\tvalues.Add(\"{key}\", fmt.Sprint(item))\n"));
                out.push_str("\t}\n");
            }
        }
        FieldKind::Nested => {
            // Method calls auto-dereference, so the pointer case only
            // needs the nil guard.
            if field.is_pointer {
                out.push_str(&format!("\tif {access} != nil {{\n"));
                out.push_str(&format!(
                    "\t\tvalues.Set(\"{key}\", {access}.{MARKER_METHOD}())\n"
                ));
                out.push_str("\t}\n");
            } else {
                out.push_str(&format!(
                    "\tvalues.Set(\"{key}\", {access}.{MARKER_METHOD}())\n"
                ));
            }
        }
    }
}

/// Receiver identifier: the first letter of the type name, lowercased.
/// Falls back to `v` when the name starts with a non-letter.
fn receiver_name(type_name: &str) -> String {
    match type_name.chars().next() {
        Some(first) if first.is_alphabetic() => first.to_lowercase().collect(),
        _ => "v".to_string(),
    }
}

/// Derives the output key for an untagged field. Runs of capitals stay
/// together so initialisms split the way a human would write them:
/// `UserID` becomes `user_id`, `HTTPStatus` becomes `http_status`.
fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let after_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_numeric());
            let before_lower = chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if i > 0 && (after_lower || (chars[i - 1].is_uppercase() && before_lower)) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/src/render_tests.rs"]
mod tests;
