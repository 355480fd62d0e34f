//! Error types for ACL show operations.
//!
//! All errors carry enough context (entity name, instance id) to be
//! diagnosed from the message alone.

use std::io;
use thiserror::Error;

use crate::types::AclEntityKind;

/// Result type alias for ACL show operations.
pub type AclShowResult<T> = Result<T, AclShowError>;

/// Errors that can occur while fetching, reconciling or rendering ACL state.
#[derive(Debug, Error)]
pub enum AclShowError {
    /// The requested table or rule exists in no reachable instance.
    #[error("ACL {kind} '{name}' not found")]
    EntityNotFound {
        /// Whether a table or a rule was requested.
        kind: AclEntityKind,
        /// The requested name.
        name: String,
    },

    /// An instance's state store could not be queried.
    #[error("ASIC instance '{instance}' unreachable: {message}")]
    InstanceUnreachable {
        /// The instance id.
        instance: String,
        /// What went wrong.
        message: String,
    },

    /// A raw record is missing a required field or carries a bad value.
    #[error("Inconsistent ACL record '{entity}' in instance '{instance}': {field}: {message}")]
    InconsistentSchema {
        /// The table or rule key.
        entity: String,
        /// The instance that produced the record.
        instance: String,
        /// The offending field.
        field: String,
        /// Error message.
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// A config or dump file could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// The file being parsed.
        path: String,
        /// Parser error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AclShowError {
    /// Creates an entity not found error.
    pub fn not_found(kind: AclEntityKind, name: impl Into<String>) -> Self {
        Self::EntityNotFound {
            kind,
            name: name.into(),
        }
    }

    /// Creates an instance unreachable error.
    pub fn unreachable(instance: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InstanceUnreachable {
            instance: instance.into(),
            message: message.into(),
        }
    }

    /// Creates an inconsistent schema error.
    pub fn inconsistent(
        entity: impl Into<String>,
        instance: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InconsistentSchema {
            entity: entity.into(),
            instance: instance.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error means the requested entity does not exist,
    /// as opposed to a failure to read or interpret state.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AclShowError::EntityNotFound { .. })
    }
}
