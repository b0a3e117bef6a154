//! Built-in document extractors.
//!
//! This module contains the default extractors that ship with the crate:
//! plain text, Markdown, and structured data (JSON/YAML/TOML) as reference
//! implementations, plus an OCR-backed image extractor when the `ocr`
//! feature is enabled. All extractors implement the `DocumentExtractor`
//! plugin trait and can be overridden or supplemented by registering
//! additional extractors at a higher priority.

use crate::Result;
use crate::plugins::registry::get_document_extractor_registry;
use once_cell::sync::Lazy;
use std::sync::Arc;

pub mod structured;
pub mod text;

#[cfg(feature = "ocr")]
pub mod image;

pub use structured::StructuredExtractor;
pub use text::{MarkdownExtractor, PlainTextExtractor};

#[cfg(feature = "ocr")]
pub use image::ImageExtractor;

/// Lazy-initialized flag that ensures extractors are registered exactly once.
static EXTRACTORS_INITIALIZED: Lazy<Result<()>> = Lazy::new(register_default_extractors);

/// Ensure built-in extractors are registered.
///
/// Called automatically on first extraction operation. Safe to call
/// multiple times - registration only happens once, unless the registry
/// was cleared, in which case extractors are re-registered.
pub fn ensure_initialized() -> Result<()> {
    EXTRACTORS_INITIALIZED
        .as_ref()
        .map(|_| ())
        .map_err(|e| crate::KreuzbergError::Plugin {
            message: format!("Failed to register default extractors: {}", e),
            plugin_name: "built-in-extractors".to_string(),
        })?;

    let registry = get_document_extractor_registry();
    let registry_guard = registry
        .read()
        .map_err(|e| crate::KreuzbergError::Other(format!("Document extractor registry lock poisoned: {}", e)))?;

    if registry_guard.list().is_empty() {
        drop(registry_guard);
        register_default_extractors()?;
    }

    Ok(())
}

/// Register all built-in extractors with the global registry.
///
/// This is called automatically on first extraction operation; explicit
/// calling is optional.
pub fn register_default_extractors() -> Result<()> {
    let registry = get_document_extractor_registry();
    let mut registry = registry
        .write()
        .map_err(|e| crate::KreuzbergError::Other(format!("Document extractor registry lock poisoned: {}", e)))?;

    registry.register(Arc::new(PlainTextExtractor::new()))?;
    registry.register(Arc::new(MarkdownExtractor::new()))?;
    registry.register(Arc::new(StructuredExtractor::new()))?;

    #[cfg(feature = "ocr")]
    registry.register(Arc::new(ImageExtractor::new()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_default_extractors() {
        let registry = get_document_extractor_registry();
        {
            let mut reg = registry
                .write()
                .expect("Failed to acquire write lock on registry in test");
            *reg = crate::plugins::registry::DocumentExtractorRegistry::new();
        }

        register_default_extractors().expect("Failed to register extractors");

        let reg = registry
            .read()
            .expect("Failed to acquire read lock on registry in test");
        let names = reg.list();
        assert!(names.contains(&"plain-text-extractor".to_string()));
        assert!(names.contains(&"markdown-extractor".to_string()));
        assert!(names.contains(&"structured-extractor".to_string()));
    }

    #[test]
    fn test_ensure_initialized_idempotent() {
        ensure_initialized().expect("first call should succeed");
        ensure_initialized().expect("second call should also succeed");
    }
}
