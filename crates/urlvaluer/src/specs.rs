//! Struct and field metadata extracted from parsed source, plus the
//! rules that decide which fields participate in generation and how
//! their types are classified.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::syntax::ast::{StructBody, TypeExpr};

/// Name of the method whose presence marks a struct for generation,
/// and which the generated code defines.
pub const MARKER_METHOD: &str = "UrlValues";

/// Protobuf bookkeeping field that never participates in encoding.
pub const RESERVED_FIELD: &str = "XXX_unrecognized";

/// Struct tag key consulted for the output parameter name.
pub const TAG_KEY: &str = "json";

/// A struct eligible for generation.
#[derive(Debug, Clone, PartialEq)]
pub struct StructSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

/// One encodable field of a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    /// Output name taken from the field's `json` tag, if one was
    /// present and well formed.
    pub snake_case_name: Option<String>,
    pub resolved: ResolvedType,
    pub is_pointer: bool,
}

/// A struct paired with whether a hand-written marker method already
/// exists for it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedType {
    pub spec: StructSpec,
    pub has_url_values: bool,
}

/// A field type after unwrapping at most one pointer level.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedType {
    /// A bare identifier such as `int64` or `Point`.
    Named(String),
    /// Slice or array of anything.
    Array,
    /// Any other shape, carried as a description for logs.
    Opaque(String),
}

/// How the renderer encodes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Int,
    Float,
    Seq,
    Nested,
}

const INT_NAMES: &[&str] = &["int", "int8", "int16", "int32", "int64"];
const FLOAT_NAMES: &[&str] = &["float32", "float64"];

impl FieldSpec {
    /// Classifies the field by the exact spelling of its type name.
    /// Unlisted names, including the unsigned integer types, fall
    /// through to `Nested` and render as a `UrlValues()` call.
    pub fn kind(&self) -> FieldKind {
        match &self.resolved {
            ResolvedType::Named(name) if name == "string" => FieldKind::Str,
            ResolvedType::Named(name) if INT_NAMES.contains(&name.as_str()) => FieldKind::Int,
            ResolvedType::Named(name) if FLOAT_NAMES.contains(&name.as_str()) => FieldKind::Float,
            ResolvedType::Array => FieldKind::Seq,
            ResolvedType::Named(_) | ResolvedType::Opaque(_) => FieldKind::Nested,
        }
    }
}

/// A field whose type the generator cannot encode.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveError {
    pub struct_name: String,
    pub field: String,
    pub type_desc: String,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field {}.{} has unsupported multi-level pointer type {}",
            self.struct_name, self.field, self.type_desc
        )
    }
}

impl std::error::Error for ResolveError {}

/// Extracts the encodable fields of a struct body. Embedded fields,
/// unexported fields, and the reserved protobuf field are skipped; a
/// multi-level pointer aborts with an error instead of generating a
/// call that would not compile.
pub fn resolve_fields(
    struct_name: &str,
    body: &StructBody,
) -> Result<Vec<FieldSpec>, ResolveError> {
    let mut fields = Vec::new();
    for decl in &body.fields {
        if decl.is_embedded() {
            debug!(
                "skipping embedded field {} in {struct_name}",
                decl.ty.describe()
            );
            continue;
        }
        for name in &decl.names {
            if !is_exported(name) {
                debug!("skipping unexported field {struct_name}.{name}");
                continue;
            }
            if name == RESERVED_FIELD {
                debug!("skipping reserved field {struct_name}.{name}");
                continue;
            }
            let (is_pointer, resolved) =
                resolve_type(&decl.ty).ok_or_else(|| ResolveError {
                    struct_name: struct_name.to_string(),
                    field: name.clone(),
                    type_desc: decl.ty.describe(),
                })?;
            let snake_case_name = decl.tag.as_deref().and_then(tag_name_override);
            debug!("resolved {name:?} to {resolved:?} (pointer: {is_pointer})");
            fields.push(FieldSpec {
                name: name.clone(),
                snake_case_name,
                resolved,
                is_pointer,
            });
        }
    }
    Ok(fields)
}

/// Unwraps at most one pointer level and classifies what remains.
/// Returns `None` for a pointer to a pointer.
fn resolve_type(ty: &TypeExpr) -> Option<(bool, ResolvedType)> {
    let (is_pointer, base) = match ty {
        TypeExpr::Pointer(inner) => (true, inner.as_ref()),
        other => (false, other),
    };
    let resolved = match base {
        TypeExpr::Named(name) => ResolvedType::Named(name.clone()),
        TypeExpr::Array(_) => ResolvedType::Array,
        TypeExpr::Pointer(_) => return None,
        other @ (TypeExpr::Qualified { .. }
        | TypeExpr::Map { .. }
        | TypeExpr::Chan(_)
        | TypeExpr::FuncType
        | TypeExpr::InterfaceType
        | TypeExpr::StructType(_)
        | TypeExpr::Generic { .. }) => ResolvedType::Opaque(other.describe()),
    };
    Some((is_pointer, resolved))
}

/// Go exports a field when its first character is upper case.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// One `key:"value"` entry inside a struct tag.
static TAG_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z0-9_]+):"((?:[^"\\]|\\.)*)""#).unwrap());

/// Extracts the output name from a raw struct tag literal: the part of
/// the `json` value before the first comma. Absent keys, empty names,
/// and literals that fail to unquote all yield `None`; tag problems
/// never abort generation.
pub fn tag_name_override(tag_literal: &str) -> Option<String> {
    let tag = unquote_tag_literal(tag_literal)?;
    let value = tag_value(&tag, TAG_KEY)?;
    let name = value.split(',').next().unwrap_or_default();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn tag_value(tag: &str, key: &str) -> Option<String> {
    for caps in TAG_ENTRY.captures_iter(tag) {
        if &caps[1] == key {
            return Some(unescape(&caps[2]));
        }
    }
    None
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }
        out.push(ch);
    }
    out
}

/// Undoes Go string literal quoting for a tag. Raw literals keep their
/// contents verbatim; interpreted literals get the common escapes.
/// Unknown escapes make the whole literal unusable.
fn unquote_tag_literal(raw: &str) -> Option<String> {
    if raw.len() >= 2 && raw.starts_with('`') && raw.ends_with('`') {
        return Some(raw[1..raw.len() - 1].to_string());
    }
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        let inner = &raw[1..raw.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                '\'' => out.push('\''),
                _ => return None,
            }
        }
        return Some(out);
    }
    None
}

#[cfg(test)]
#[path = "../tests/src/specs_tests.rs"]
mod tests;
