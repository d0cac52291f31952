//! Core error types for attune-core.
//!
//! Errors are resolved locally wherever possible: unknown catalog ids are
//! reported as values the caller can branch on, and audio backend failures
//! are downgraded to a simulated playing state at the controller boundary.
//! Nothing in this crate propagates a panic to callers.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for attune-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Playback-related errors
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Playback-specific errors.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The audio backend could not open the requested source.
    #[error("Failed to open audio source '{source_ref}': {message}")]
    OpenFailed { source_ref: String, message: String },

    /// A transport operation on the live handle failed.
    #[error("Audio handle operation '{operation}' failed: {message}")]
    HandleFailed { operation: String, message: String },

    /// A play request arrived while another acquire was still outstanding.
    #[error("A playback acquisition is already in flight")]
    Busy,

    /// Nothing is playing.
    #[error("No active playback")]
    NotPlaying,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Missing or unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No config directory could be resolved for this platform
    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Catalog lookup failed
    #[error("Unknown {kind} id: '{id}'")]
    UnknownId { kind: &'static str, id: String },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
