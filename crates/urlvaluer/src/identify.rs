//! Walks a parsed file's declarations, pairing every struct type with
//! a flag recording whether a hand-written `UrlValues` method exists
//! for it.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::specs::{resolve_fields, GeneratedType, ResolveError, StructSpec, MARKER_METHOD};
use crate::syntax::ast::{Decl, FuncDecl, SourceFile, TypeDecl, TypeExpr};

/// Collects all struct declarations in source order along with their
/// marker flags. A name declared twice keeps its first position but
/// its last definition wins.
pub fn identify_file(file: &SourceFile) -> Result<Vec<GeneratedType>, ResolveError> {
    let mut specs: Vec<StructSpec> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut markers: HashSet<String> = HashSet::new();

    for decl in &file.decls {
        match decl {
            Decl::Type(type_decl) => {
                if let Some(spec) = identify_struct(type_decl)? {
                    match index.get(&spec.name) {
                        Some(&slot) => {
                            debug!("redeclared struct {}, keeping the later definition", spec.name);
                            specs[slot] = spec;
                        }
                        None => {
                            index.insert(spec.name.clone(), specs.len());
                            specs.push(spec);
                        }
                    }
                }
            }
            Decl::Func(func_decl) => {
                if let Some(type_name) = identify_marker(func_decl) {
                    debug!("found existing {MARKER_METHOD} method on {type_name}");
                    markers.insert(type_name.to_string());
                }
            }
            Decl::Import | Decl::Const | Decl::Var => {}
        }
    }

    Ok(specs
        .into_iter()
        .map(|spec| {
            let has_url_values = markers.contains(&spec.name);
            GeneratedType {
                spec,
                has_url_values,
            }
        })
        .collect())
}

/// A type declaration matches when its underlying type is a struct and
/// it carries no type parameters (a plain receiver cannot name a
/// generic type).
fn identify_struct(decl: &TypeDecl) -> Result<Option<StructSpec>, ResolveError> {
    match &decl.ty {
        TypeExpr::StructType(body) if !decl.has_type_params => {
            let fields = resolve_fields(&decl.name, body)?;
            Ok(Some(StructSpec {
                name: decl.name.clone(),
                fields,
            }))
        }
        _ => Ok(None),
    }
}

/// A function declaration marks its receiver type when it is exactly
/// `func (x T) UrlValues() string` with a bare identifier receiver.
fn identify_marker(decl: &FuncDecl) -> Option<&str> {
    if decl.name != MARKER_METHOD {
        return None;
    }
    if !decl.params.is_empty() {
        return None;
    }
    let [result] = decl.results.as_slice() else {
        return None;
    };
    if !matches!(result, TypeExpr::Named(name) if name == "string") {
        return None;
    }
    let receiver = decl.receiver.as_ref()?;
    match &receiver.ty {
        TypeExpr::Named(type_name) => Some(type_name),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/src/identify_tests.rs"]
mod tests;
