//! Error types for bdf-toy.
//!
//! Reconciliation itself never fails; these cover the edges where the core
//! touches the outside world: typed field access, the shader-definition
//! sink, config files, and screen captures.

use std::fmt;

use crate::registry::{Field, ValueKind};

/// Errors from typed field access through the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The value's type does not match the field's declared type.
    TypeMismatch {
        field: Field,
        expected: ValueKind,
        found: ValueKind,
    },
    /// No field has the given name.
    UnknownField(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::TypeMismatch { field, expected, found } => write!(
                f,
                "Field {} expects {:?}, got {:?}",
                field.name(),
                expected,
                found
            ),
            RegistryError::UnknownField(name) => write!(f, "Unknown field: {}", name),
        }
    }
}

impl std::error::Error for RegistryError {}

/// The rendering collaborator rejected a definition bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct DefineError {
    pub message: String,
}

impl DefineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for DefineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to apply shader defines: {}", self.message)
    }
}

impl std::error::Error for DefineError {}

/// Errors that can occur saving or loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the file.
    Io(std::io::Error),
    /// The file is not a valid configuration.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Json(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors that can occur when writing a screen capture.
#[derive(Debug)]
pub enum CaptureError {
    /// Failed to encode the image.
    Image(image::ImageError),
    /// Failed to create the capture directory.
    Io(std::io::Error),
    /// Pixel buffer length does not match `width * height * 4`.
    BadBuffer { expected: usize, found: usize },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Image(e) => write!(f, "Failed to encode capture: {}", e),
            CaptureError::Io(e) => write!(f, "Failed to write capture: {}", e),
            CaptureError::BadBuffer { expected, found } => write!(
                f,
                "Capture buffer has {} bytes, expected {}",
                found, expected
            ),
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Image(e) => Some(e),
            CaptureError::Io(e) => Some(e),
            CaptureError::BadBuffer { .. } => None,
        }
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(e: image::ImageError) -> Self {
        CaptureError::Image(e)
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(e: std::io::Error) -> Self {
        CaptureError::Io(e)
    }
}
