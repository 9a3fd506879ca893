//! Centralized error handling for ncinfo
//!
//! Every module returns [`Result`], so the CLI and the HTTP server report
//! failures the same way instead of aborting on a missing or malformed file.

use std::fmt;
use std::path::PathBuf;

/// Main error type for ncinfo operations
#[derive(Debug)]
pub enum NcInfoError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// libnetcdf refused to report the on-disk format
    FormatInquiry {
        path: PathBuf,
        code: i32,
        message: String,
    },

    /// Variable not found in NetCDF file
    VariableNotFound { var: String },

    /// Dimension not found in the file or in the queried variable
    DimensionNotFound { dim: String },

    /// A required query argument was not supplied
    MissingArgument { name: String },

    /// A query argument could not be parsed
    InvalidArgument { name: String, message: String },

    /// Index outside `0..length` of a dimension
    IndexOutOfRange {
        dim: String,
        index: usize,
        length: usize,
    },

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// JSON serialization errors
    JsonError(serde_json::Error),

    /// Generic error
    Generic(String),
}

impl NcInfoError {
    /// Errors caused by the caller's input rather than by the file or the host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NcInfoError::VariableNotFound { .. }
                | NcInfoError::DimensionNotFound { .. }
                | NcInfoError::MissingArgument { .. }
                | NcInfoError::InvalidArgument { .. }
                | NcInfoError::IndexOutOfRange { .. }
        )
    }
}

impl fmt::Display for NcInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NcInfoError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            NcInfoError::IoError(e) => write!(f, "I/O error: {}", e),
            NcInfoError::FormatInquiry {
                path,
                code,
                message,
            } => write!(
                f,
                "Could not determine the data model of '{}': {} (code {})",
                path.display(),
                message,
                code
            ),
            NcInfoError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            NcInfoError::DimensionNotFound { dim } => {
                write!(f, "Dimension '{}' not found", dim)
            }
            NcInfoError::MissingArgument { name } => {
                write!(f, "Missing required argument {}", name)
            }
            NcInfoError::InvalidArgument { name, message } => {
                write!(f, "Invalid argument {}: {}", name, message)
            }
            NcInfoError::IndexOutOfRange { dim, index, length } => write!(
                f,
                "Index {} is out of range for dimension '{}' (length {})",
                index, dim, length
            ),
            NcInfoError::ArrayError(e) => write!(f, "Array error: {}", e),
            NcInfoError::JsonError(e) => write!(f, "JSON error: {}", e),
            NcInfoError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for NcInfoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NcInfoError::NetCDFError(e) => Some(e),
            NcInfoError::IoError(e) => Some(e),
            NcInfoError::ArrayError(e) => Some(e),
            NcInfoError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for NcInfoError {
    fn from(error: netcdf::Error) -> Self {
        NcInfoError::NetCDFError(error)
    }
}

impl From<std::io::Error> for NcInfoError {
    fn from(error: std::io::Error) -> Self {
        NcInfoError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for NcInfoError {
    fn from(error: ndarray::ShapeError) -> Self {
        NcInfoError::ArrayError(error)
    }
}

impl From<serde_json::Error> for NcInfoError {
    fn from(error: serde_json::Error) -> Self {
        NcInfoError::JsonError(error)
    }
}

impl From<String> for NcInfoError {
    fn from(error: String) -> Self {
        NcInfoError::Generic(error)
    }
}

impl From<&str> for NcInfoError {
    fn from(error: &str) -> Self {
        NcInfoError::Generic(error.to_string())
    }
}

/// Result type alias for ncinfo operations
pub type Result<T> = std::result::Result<T, NcInfoError>;
