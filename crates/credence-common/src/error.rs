//! Error types for the Credence system
//!
//! Provides a unified error type and domain-specific error variants.
//! Transient probe failures are deliberately *not* represented here:
//! citation reachability outcomes are classified values, never errors.

use thiserror::Error;

/// Result type alias using CredenceError
pub type Result<T> = std::result::Result<T, CredenceError>;

/// Unified error type for Credence operations
#[derive(Debug, Error)]
pub enum CredenceError {
    // Referenced entity absent
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    // Caller-supplied value rejected at a write boundary
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Kinds of referenceable entities, used in NotFound errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Source,
    ContentItem,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Source => write!(f, "Source"),
            EntityKind::ContentItem => write!(f, "Content item"),
        }
    }
}

/// Registry-write boundary errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Trust score out of range: {0} (must be within 0.0-1.0)")]
    TrustScoreOutOfRange(f64),

    #[error("Domain must not be empty")]
    EmptyDomain,

    #[error("Domain not present in block list: {0}")]
    NotBlocked(String),

    #[error("Block on {0} is permanent and cannot be lifted")]
    PermanentBlock(String),
}

// Implement From for common external error types
impl From<serde_json::Error> for CredenceError {
    fn from(err: serde_json::Error) -> Self {
        CredenceError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for CredenceError {
    fn from(err: std::io::Error) -> Self {
        CredenceError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for CredenceError {
    fn from(err: anyhow::Error) -> Self {
        CredenceError::Internal(err.to_string())
    }
}
