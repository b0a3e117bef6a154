//! Error types for Kreuzberg.
//!
//! This module defines all error types used throughout the library. All errors
//! inherit from `KreuzbergError` and follow Rust error handling best practices:
//!
//! - Use `thiserror` for automatic `Error` trait implementation
//! - Preserve error chains with `#[source]` attributes
//! - Include context in error messages (file paths, config values, etc.)
//!
//! # Error Handling Philosophy
//!
//! **System errors MUST always bubble up unchanged:**
//! - `KreuzbergError::Io` (from `std::io::Error`) - File system errors, permission errors
//! - These indicate real system problems that users need to know about
//! - Never wrap or suppress these - they must surface to enable bug reports
//!
//! **Application errors are wrapped with context:**
//! - `Parsing` - Document format errors, corrupt files
//! - `Validation` - Invalid configuration or parameters
//! - `Ocr` - OCR processing failures
//! - `MissingDependency` - Missing optional system dependencies
//!
//! # Example
//!
//! ```rust
//! use kreuzberg::{KreuzbergError, Result};
//!
//! fn process_file(path: &str) -> Result<String> {
//!     // IO errors bubble up automatically via ?
//!     let content = std::fs::read_to_string(path)?;
//!
//!     // Application errors include context
//!     if content.is_empty() {
//!         return Err(KreuzbergError::validation(
//!             format!("File is empty: {}", path)
//!         ));
//!     }
//!
//!     Ok(content)
//! }
//! ```
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias using `KreuzbergError`.
///
/// This is the standard return type for all fallible operations in Kreuzberg.
pub type Result<T> = std::result::Result<T, KreuzbergError>;

/// A structured value attached to an error's `context` map.
///
/// Keeps error context machine-readable (mappable to an HTTP status or a
/// structured log field) instead of forcing callers to parse it back out of
/// the `message` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Text(String),
    Int(i64),
    Map(BTreeMap<String, ContextValue>),
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::Text(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Int(value)
    }
}

/// Main error type for all Kreuzberg operations.
///
/// All errors in Kreuzberg use this enum, which preserves error chains
/// and provides context for debugging.
///
/// # Variants
///
/// - `Io` - File system and I/O errors (always bubble up)
/// - `Parsing` - Document parsing errors (corrupt files, unsupported features)
/// - `Ocr` - OCR processing errors
/// - `Validation` - Input validation errors (invalid paths, config, parameters)
/// - `Cache` - Cache operation errors (non-fatal, can be ignored)
/// - `ImageProcessing` - Image manipulation errors
/// - `Serialization` - JSON/MessagePack serialization errors
/// - `MissingDependency` - Missing optional dependencies (tesseract, etc.)
/// - `MemoryLimit` - A configured memory budget was exceeded
/// - `Device` - A hardware/OS device failed (camera, scanner, GPU, ...)
/// - `Plugin` - Plugin-specific errors
/// - `LockPoisoned` - Mutex/RwLock poisoning (should not happen in normal operation)
/// - `UnsupportedFormat` - Unsupported MIME type or file format
/// - `Other` - Catch-all for uncommon errors
///
/// The domain variants (`Parsing`, `Ocr`, `Validation`, `MissingDependency`,
/// `MemoryLimit`, `Device`) carry a `context` map alongside `message` so
/// that a caller can inspect structured fields (e.g. `"path"`, `"limit_mb"`)
/// without re-parsing the error text.
#[derive(Debug, Error)]
pub enum KreuzbergError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        context: BTreeMap<String, ContextValue>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        context: BTreeMap<String, ContextValue>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        context: BTreeMap<String, ContextValue>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Cache error: {message}")]
    Cache {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Image processing error: {message}")]
    ImageProcessing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {message}")]
    MissingDependency {
        message: String,
        context: BTreeMap<String, ContextValue>,
    },

    #[error("Memory limit exceeded: {message}")]
    MemoryLimit {
        message: String,
        context: BTreeMap<String, ContextValue>,
    },

    #[error("Device error: {message}")]
    Device {
        message: String,
        context: BTreeMap<String, ContextValue>,
    },

    #[error("Plugin error in '{plugin_name}': {message}")]
    Plugin { message: String, plugin_name: String },

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for KreuzbergError {
    fn from(err: serde_json::Error) -> Self {
        KreuzbergError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<rmp_serde::encode::Error> for KreuzbergError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        KreuzbergError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<rmp_serde::decode::Error> for KreuzbergError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        KreuzbergError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        paste::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

/// Same shape as [`error_constructor`], but for the variants carrying a
/// `context: BTreeMap<String, ContextValue>` field alongside `message`.
macro_rules! error_constructor_with_context {
    ($name:ident, $variant:ident) => {
        paste::paste! {
            #[doc = "Create a " $variant " error with empty context"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    context: BTreeMap::new(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    context: BTreeMap::new(),
                    source: Some(Box::new(source)),
                }
            }

            #[doc = "Create a " $variant " error carrying structured context"]
            pub fn [<$name _with_context>]<S: Into<String>>(
                message: S,
                context: BTreeMap<String, ContextValue>,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    context,
                    source: None,
                }
            }
        }
    };
}

impl KreuzbergError {
    error_constructor_with_context!(parsing, Parsing);
    error_constructor_with_context!(ocr, Ocr);
    error_constructor_with_context!(validation, Validation);
    error_constructor!(cache, Cache);
    error_constructor!(image_processing, ImageProcessing);
    error_constructor!(serialization, Serialization);

    /// Create a `MissingDependency` error with empty context.
    pub fn missing_dependency<S: Into<String>>(message: S) -> Self {
        Self::MissingDependency {
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Create a `MemoryLimit` error, e.g. when a configured byte budget is exceeded.
    pub fn memory_limit<S: Into<String>>(message: S) -> Self {
        Self::MemoryLimit {
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Create a `Device` error for a failing hardware/OS resource.
    pub fn device<S: Into<String>>(message: S) -> Self {
        Self::Device {
            message: message.into(),
            context: BTreeMap::new(),
        }
    }
}
