//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A distance, duration, size or speed was below zero.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    /// A value fell outside its declared range.
    #[error("{field} must be within {min}..={max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// NaN or infinity.
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// The drawing surface had non-positive dimensions at construction.
    #[error("surface must have positive dimensions (got {width}x{height})")]
    InvalidSurface { width: f32, height: f32 },

    #[error("unknown reveal animation `{0}`")]
    UnknownAnimation(String),

    #[error("unknown easing `{0}`")]
    UnknownEasing(String),

    /// A reveal attribute on a page element could not be parsed.
    #[error("invalid value `{value}` for attribute {name}")]
    InvalidAttribute { name: String, value: String },

    /// A settings value could not be interpreted.
    #[error("invalid value `{value}` for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error("malformed particles document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed settings file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
