//! Kreuzberg Core - Document Intelligence Backbone
//!
//! Kreuzberg is a Rust-first extraction pipeline: given bytes or a file path
//! plus a MIME type, it runs caching, format dispatch, OCR, quality
//! normalization, optional feature plugins, validators, and hooks to produce
//! a structured [`ExtractionResult`]. Concrete format parsers beyond plain
//! text/Markdown and the Tesseract-shaped OCR backend are external
//! collaborators plugged in through the [`plugins`] registries.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kreuzberg::{extract_file_sync, ExtractionConfig};
//!
//! # fn main() -> kreuzberg::Result<()> {
//! let config = ExtractionConfig::default();
//! let result = extract_file_sync("document.txt", None, &config)?;
//! println!("Extracted: {}", result.content);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): extraction orchestration, MIME detection, config resolution
//! - **Plugin System** (`plugins`): `DocumentExtractor`/`OcrBackend`/`PostProcessor`/`Validator` registries
//! - **OCR** (`ocr`): Tesseract-shaped reference backend with table reconstruction
//! - **Preprocessing** (`preprocessing`): DPI-aware image rescaling ahead of OCR
//! - **Cache** (`cache`): namespaced, single-flight, content-addressed persistence

#![deny(unsafe_code)]

pub mod cache;
pub mod core;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod panic_context;
pub mod plugins;

#[cfg(feature = "ocr")]
pub mod preprocessing;

pub mod text;
pub mod types;

#[cfg(feature = "quality")]
pub mod utils;

#[cfg(feature = "chunking")]
pub mod chunking;

#[cfg(feature = "language-detection")]
pub mod language_detection;

#[cfg(feature = "stopwords")]
pub mod stopwords;

#[cfg(any(feature = "keywords-yake", feature = "keywords-rake"))]
pub mod keywords;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use error::{ContextValue, KreuzbergError, Result};
pub use types::*;

#[cfg(feature = "tokio-runtime")]
pub use core::extractor::{batch_extract_bytes, batch_extract_file};
pub use core::extractor::{extract_bytes, extract_file};

// Available in WASM (bytes-based)
pub use core::extractor::{batch_extract_bytes_sync, extract_bytes_sync};

// Only available with filesystem access
#[cfg(feature = "tokio-runtime")]
pub use core::extractor::{batch_extract_file_sync, extract_file_sync};

pub use core::config::{
    ChunkingConfig, ExtractionConfig, ImageExtractionConfig, LanguageDetectionConfig, OcrConfig, PdfConfig,
    PostProcessorConfig, TokenReductionConfig,
};

pub use core::mime::{
    DOCX_MIME_TYPE, EXCEL_MIME_TYPE, HTML_MIME_TYPE, JSON_MIME_TYPE, MARKDOWN_MIME_TYPE, PDF_MIME_TYPE,
    PLAIN_TEXT_MIME_TYPE, POWER_POINT_MIME_TYPE, XML_MIME_TYPE, detect_mime_type, detect_mime_type_from_bytes,
    detect_or_validate, get_extensions_for_mime, validate_mime_type,
};

pub use core::formats::{KNOWN_FORMATS, is_valid_format_field};

pub use plugins::registry::{
    get_document_extractor_registry, get_ocr_backend_registry, get_post_processor_registry, get_validator_registry,
};

#[cfg(feature = "ocr")]
pub use preprocessing::{ImagePreprocessingOutcome, preprocess_image};
