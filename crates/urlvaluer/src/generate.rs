//! File-level pipeline: read a Go source file, identify its structs,
//! and write the companion file with the generated methods. The output
//! is rendered fully in memory before the output file is opened, so a
//! failing input never leaves a truncated or partial companion behind.

use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::identify::identify_file;
use crate::render;
use crate::specs::ResolveError;
use crate::syntax::{parse_file, ParseError};

/// Suffix of generated companion files: `point.go` becomes
/// `point.urlvaluer.go`.
pub const OUTPUT_SUFFIX: &str = ".urlvaluer.go";

#[derive(Debug)]
pub enum Error {
    Parse { path: PathBuf, error: ParseError },
    MissingPackage { path: PathBuf },
    Resolve { path: PathBuf, error: ResolveError },
    OutputPath { path: PathBuf },
    Read { path: PathBuf, error: io::Error },
    Write { path: PathBuf, error: io::Error },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { path, error } => write!(f, "{}: {error}", path.display()),
            Self::MissingPackage { path } => {
                write!(f, "could not determine package name of {}", path.display())
            }
            Self::Resolve { path, error } => write!(f, "{}: {error}", path.display()),
            Self::OutputPath { path } => {
                write!(
                    f,
                    "could not derive output path for {}: missing .go extension",
                    path.display()
                )
            }
            Self::Read { path, error } => {
                write!(f, "could not read {}: {error}", path.display())
            }
            Self::Write { path, error } => {
                write!(f, "could not write {}: {error}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {}

/// What one successful run produced, for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    pub structs_found: usize,
    pub methods_emitted: usize,
}

/// Runs the whole pipeline for one input file.
pub fn process_file(path: &Path) -> Result<GenerateReport, Error> {
    info!("processing {}", path.display());

    let source = fs::read_to_string(path).map_err(|error| Error::Read {
        path: path.to_path_buf(),
        error,
    })?;

    let file = parse_file(&source).map_err(|error| match error {
        ParseError::MissingPackage => Error::MissingPackage {
            path: path.to_path_buf(),
        },
        error => Error::Parse {
            path: path.to_path_buf(),
            error,
        },
    })?;

    let types = identify_file(&file).map_err(|error| Error::Resolve {
        path: path.to_path_buf(),
        error,
    })?;
    debug!("found {} struct type(s) in {}", types.len(), path.display());

    let output_path = output_path(path)?;
    let contents = render::render(&file.package, &types);
    write_output(&output_path, &contents)?;
    info!("wrote {}", output_path.display());

    let methods_emitted = types.iter().filter(|t| !t.has_url_values).count();
    Ok(GenerateReport {
        output_path,
        structs_found: types.len(),
        methods_emitted,
    })
}

/// Swaps the `.go` extension for the generated-file suffix. Inputs
/// without a `.go` extension are rejected rather than guessed at.
pub fn output_path(input: &Path) -> Result<PathBuf, Error> {
    if !input.extension().is_some_and(|ext| ext == "go") {
        return Err(Error::OutputPath {
            path: input.to_path_buf(),
        });
    }
    Ok(input.with_extension(OUTPUT_SUFFIX.trim_start_matches('.')))
}

/// Creates or truncates the companion file with owner-only permissions
/// and writes the rendered source in one shot.
fn write_output(path: &Path, contents: &str) -> Result<(), Error> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(|error| Error::Write {
        path: path.to_path_buf(),
        error,
    })?;
    file.write_all(contents.as_bytes()).map_err(|error| Error::Write {
        path: path.to_path_buf(),
        error,
    })
}
