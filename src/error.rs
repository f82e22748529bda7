use crate::model::EdgeKey;
use thiserror::Error;

/// Structural edits the graph refuses. Nothing is mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("an edge {0} already exists")]
    DuplicateEdge(EdgeKey),
    #[error("node {0} does not exist")]
    MissingNode(u32),
}

impl GraphError {
    /// Stable machine-readable code used at the shell boundary.
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::DuplicateEdge(_) => "duplicate_edge",
            GraphError::MissingNode(_) => "missing_node",
        }
    }
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    pub fn code(&self) -> &'static str {
        match self {
            DocumentError::Malformed(_) => "malformed_document",
            DocumentError::Json(_) => "invalid_json",
            DocumentError::Io(_) => "io",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown interaction mode '{0}'")]
pub struct ParseModeError(pub String);
