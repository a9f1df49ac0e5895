//! Error types for gearplan operations.
//!
//! This module defines [`GearplanError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Malformed gearset data is rejected as [`GearplanError::InvalidInput`]
//!   before it reaches the requirement model
//! - The solver and the materia estimator are total and never return errors
//! - Catalog misses and empty inventory containers are degraded and logged,
//!   the variants below exist so callers can report them uniformly
//! - Use `anyhow::Error` (via `GearplanError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{GearpieceId, GearsetId};

/// Core error type for gearplan operations.
#[derive(Debug, Error)]
pub enum GearplanError {
    /// Malformed gearset data, rejected before entering the model.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Unexpected lookup miss (for example an item missing from the catalog).
    #[error("Internal error: {message}")]
    InternalError { message: String },

    /// An inventory container was momentarily unavailable.
    #[error("Inventory source '{source_name}' is temporarily unavailable")]
    TransientUnavailable { source_name: String },

    /// An import source could not produce gearsets from its input.
    #[error("Failed to import from {source_type}: {message}")]
    Import {
        source_type: String,
        message: String,
    },

    /// The import input was understood but contained no usable gearsets.
    #[error("No gearsets found in {source_type} input")]
    NoGearsets { source_type: String },

    /// Referenced gearset is not in the store.
    #[error("Unknown gearset: {id}")]
    UnknownGearset { id: GearsetId },

    /// Referenced gearpiece is not in the store.
    #[error("Unknown gearpiece: {id}")]
    UnknownGearpiece { id: GearpieceId },

    /// Referenced gearset name matched nothing.
    #[error("No gearset named '{name}'")]
    GearsetNotFound { name: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration or data file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GearplanError {
    /// Shorthand for an [`GearplanError::InvalidInput`] error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type alias for gearplan operations.
pub type Result<T> = std::result::Result<T, GearplanError>;
