//! Error types for scenemark operations.
//!
//! Every error here is node-local: the generator records it as a
//! [`Diagnostic`] and degrades the affected node instead of aborting.

use thiserror::Error;

/// A failure reported by the host scene-graph provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors that can degrade a single node during generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unsupported image format (leading bytes {0:02x?})")]
    UnsupportedImageFormat(Vec<u8>),

    #[error("Image unavailable: {0}")]
    ImageUnavailable(String),

    #[error("Vector export failed: {0}")]
    VectorExportFailed(String),

    #[error("Style unavailable: {0}")]
    StyleUnavailable(String),

    #[error("Font unavailable: {0}")]
    FontUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A node-local failure recorded during a generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Identity of the node whose output was degraded.
    pub node_id: String,
    /// Display name of the node, for humans.
    pub node_name: String,
    pub error: Error,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.node_name, self.node_id, self.error)
    }
}
