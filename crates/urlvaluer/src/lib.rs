pub mod generate;
pub mod identify;
pub mod render;
pub mod specs;
pub mod syntax;

pub use generate::{process_file, Error, GenerateReport, OUTPUT_SUFFIX};
pub use identify::identify_file;
pub use specs::{
    FieldKind, FieldSpec, GeneratedType, ResolveError, ResolvedType, StructSpec, MARKER_METHOD,
};
pub use syntax::{parse_file, ParseError};
