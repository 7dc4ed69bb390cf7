//! Error types for risk analysis.
//!
//! The engine itself only fails on caller contract violations (an unknown
//! quasi-identifier column, a malformed dataset, invalid configuration).
//! Data-shape issues such as empty datasets or missing values are reported
//! through the result values instead. The I/O flavoured variants exist for
//! ingestion and reporting collaborators built on top of the core.
//!
//! Error messages name columns and counts but never echo cell values.

use thiserror::Error;

/// Main error type for riskscope operations.
#[derive(Debug, Error)]
pub enum RiskError {
    /// A quasi-identifier column is not present in the dataset headers
    #[error("Unknown quasi-identifier column '{column}': not present in dataset headers")]
    UnknownColumn { column: String },

    /// Dataset violates its structural invariants
    #[error("Invalid dataset: {message}")]
    InvalidDataset { message: String },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV ingestion failed
    #[error("CSV parsing failed: {context}")]
    Csv {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Report rendering failed
    #[error("Report rendering failed: {context}")]
    Render {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Convenience type alias for Results with RiskError
pub type Result<T> = std::result::Result<T, RiskError>;

impl RiskError {
    /// Creates an unknown column error
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    /// Creates an invalid dataset error
    pub fn invalid_dataset(message: impl Into<String>) -> Self {
        Self::InvalidDataset {
            message: message.into(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a CSV ingestion error with context
    ///
    /// The source is boxed so the core does not depend on any particular
    /// CSV parser.
    pub fn csv<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Csv {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a serialization error with context
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Creates a report rendering error with context
    pub fn render<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Render {
            context: context.into(),
            source: Box::new(error),
        }
    }
}

impl From<crate::risk::ConfigValidationError> for RiskError {
    fn from(error: crate::risk::ConfigValidationError) -> Self {
        Self::configuration(error.to_string())
    }
}
