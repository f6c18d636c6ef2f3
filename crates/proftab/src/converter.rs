//! Converter declarations and traits.

use crate::properties::Properties;
use std::path::PathBuf;

/// Declaration of a converter's interface.
///
/// Describes which format a converter reads and which it writes, without
/// containing the actual conversion logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterDecl {
    /// Unique identifier for this converter.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Format name of the input (`csv`, `prof`, `xy`).
    pub from: String,
    /// Format name of the output.
    pub to: String,
}

impl ConverterDecl {
    /// Single input format, single output format.
    pub fn simple(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Set the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Check if this converter reads `from` and writes `to`.
    pub fn handles(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }
}

/// Result of a conversion operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOutput {
    /// Encoded output document.
    pub data: Vec<u8>,
    /// Properties of the output (format, rows, columns).
    pub props: Properties,
    /// Non-fatal problems found while reading the input.
    pub warnings: Vec<String>,
}

impl ConvertOutput {
    pub fn new(data: Vec<u8>, props: Properties) -> Self {
        Self {
            data,
            props,
            warnings: Vec::new(),
        }
    }

    /// Attach warnings collected during decoding.
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Trait for implementing converters.
///
/// Converters transform a whole document from one format to another.
pub trait Converter: Send + Sync {
    /// Get the declaration for this converter.
    fn decl(&self) -> &ConverterDecl;

    /// Convert a complete input document.
    fn convert(&self, input: &[u8], props: &Properties) -> Result<ConvertOutput, ConvertError>;
}

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input is structurally malformed.
    #[error("format error: {0}")]
    Format(String),

    /// The input or request violates a semantic contract.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn format(msg: impl Into<String>) -> Self {
        ConvertError::Format(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ConvertError::Validation(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, ConvertError::Format(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ConvertError::Validation(_))
    }
}
