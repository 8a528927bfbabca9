//! Typed AST for the declaration-level subset of Go that code
//! generation needs. Function bodies, expressions, and import paths are
//! not represented; the parser consumes them without building nodes.

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub package: String,
    pub decls: Vec<Decl>,
}

/// A top-level declaration. Parenthesized `type (...)` groups are
/// flattened into one `Decl::Type` per grouped spec line.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Type(TypeDecl),
    Func(FuncDecl),
    Import,
    Const,
    Var,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub ty: TypeExpr,
    /// True when the declaration carries a type parameter list
    /// (`type Foo[T any] ...`). Generic types never receive generated
    /// methods because a plain receiver cannot name them.
    pub has_type_params: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub receiver: Option<Receiver>,
    pub params: Vec<Param>,
    pub results: Vec<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructBody {
    pub fields: Vec<FieldDecl>,
}

/// One field declaration line. `A, B int` keeps both names in `names`;
/// embedded fields have no names. `tag` holds the raw tag literal as it
/// appeared in source, quotes included.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
}

impl FieldDecl {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// A type expression. Every shape the parser can produce is a distinct
/// variant so downstream code matches exhaustively instead of probing.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A bare identifier: `int`, `string`, `Point`.
    Named(String),
    /// A package-qualified name: `time.Time`.
    Qualified { package: String, name: String },
    Pointer(Box<TypeExpr>),
    /// Slice or array; the element and any length expression are not
    /// retained because both render the same way.
    Array(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan(Box<TypeExpr>),
    FuncType,
    InterfaceType,
    StructType(StructBody),
    /// A generic instantiation such as `List[int]`; the arguments are
    /// not retained.
    Generic { name: String },
}

impl TypeExpr {
    /// A short rendering of the type's shape for logs and error
    /// messages.
    pub fn describe(&self) -> String {
        match self {
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::Qualified { package, name } => format!("{package}.{name}"),
            TypeExpr::Pointer(inner) => format!("*{}", inner.describe()),
            TypeExpr::Array(elem) => format!("[]{}", elem.describe()),
            TypeExpr::Map { key, value } => {
                format!("map[{}]{}", key.describe(), value.describe())
            }
            TypeExpr::Chan(elem) => format!("chan {}", elem.describe()),
            TypeExpr::FuncType => "func(...)".to_string(),
            TypeExpr::InterfaceType => "interface{...}".to_string(),
            TypeExpr::StructType(_) => "struct{...}".to_string(),
            TypeExpr::Generic { name } => format!("{name}[...]"),
        }
    }
}
