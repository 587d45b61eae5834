use std::fmt;

use crate::catalog::ParamKind;

/// Errors related to parameter name lookups
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    UnknownParameter(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnknownParameter(name) => {
                write!(f, "invalid parameter name: \"{name}\"")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Errors raised while converting a value to or from its fixed-width text
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// The value cannot be written as the parameter's declared kind
    KindMismatch {
        kind: ParamKind,
        value: String,
    },
    /// NaN or infinite numbers have no fixed-width representation
    NonFinite(f64),
    /// Field text could not be read back as the declared kind
    Unparseable {
        kind: ParamKind,
        text: String,
    },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::KindMismatch { kind, value } => {
                write!(f, "value {value} cannot be written as {kind}")
            }
            ValueError::NonFinite(v) => write!(f, "non-finite value {v}"),
            ValueError::Unparseable { kind, text } => {
                write!(f, "cannot read \"{text}\" as {kind}")
            }
        }
    }
}

impl std::error::Error for ValueError {}

/// Errors from reading the fixed-width input file layout
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The file ended before all field rows were read
    TooShort { lines: usize },
    /// A field row did not split into three `name = value` fields
    MalformedRow { line: usize, content: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooShort { lines } => {
                write!(f, "input file has only {lines} lines, expected at least 18")
            }
            ParseError::MalformedRow { line, content } => {
                write!(f, "line {line} is not three `name = value` fields: {content:?}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors from patching a parsed input file with new values
#[derive(Debug, Clone, PartialEq)]
pub enum InputFileError {
    Catalog(CatalogError),
    Value { name: String, source: ValueError },
    /// The parameter is in the catalog but the file has no field for it
    MissingField(String),
}

impl fmt::Display for InputFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFileError::Catalog(e) => write!(f, "{e}"),
            InputFileError::Value { name, source } => write!(f, "parameter {name}: {source}"),
            InputFileError::MissingField(name) => {
                write!(f, "input file has no field for parameter {name}")
            }
        }
    }
}

impl std::error::Error for InputFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputFileError::Catalog(e) => Some(e),
            InputFileError::Value { source, .. } => Some(source),
            InputFileError::MissingField(_) => None,
        }
    }
}

impl From<CatalogError> for InputFileError {
    fn from(err: CatalogError) -> Self {
        InputFileError::Catalog(err)
    }
}

/// Errors from building a sweep mesh
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    NoAxes,
    TooManyAxes(usize),
    DuplicateAxis(String),
    PairedLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// A range whose step is zero, not finite, or points away from `stop`
    InvalidRange {
        name: String,
        start: f64,
        stop: f64,
        step: f64,
    },
    Catalog(CatalogError),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::NoAxes => write!(f, "no iterable parameters specified"),
            MeshError::TooManyAxes(n) => {
                write!(f, "{n} iterable parameters given, at most 3 are supported")
            }
            MeshError::DuplicateAxis(name) => {
                write!(f, "parameter {name} is iterated more than once")
            }
            MeshError::PairedLengthMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "paired parameter {name} has {actual} values but the mesh has {expected} points"
            ),
            MeshError::InvalidRange {
                name,
                start,
                stop,
                step,
            } => write!(
                f,
                "range for {name} ({start} to {stop} by {step}) never reaches its end"
            ),
            MeshError::Catalog(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CatalogError> for MeshError {
    fn from(err: CatalogError) -> Self {
        MeshError::Catalog(err)
    }
}
