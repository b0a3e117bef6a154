//! Configuration loading and management.
//!
//! This module provides utilities for loading extraction configuration from various
//! sources (TOML, YAML, JSON) and discovering configuration files in the project hierarchy.

use crate::{KreuzbergError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main extraction configuration.
///
/// This struct contains all configuration options for the extraction process.
/// It can be loaded from TOML, YAML, or JSON files, or created programmatically.
///
/// # Example
///
/// ```rust
/// use kreuzberg::core::config::ExtractionConfig;
///
/// // Create with defaults
/// let config = ExtractionConfig::default();
///
/// // Load from TOML file
/// // let config = ExtractionConfig::from_toml_file("kreuzberg.toml")?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Enable caching of extraction results
    #[serde(default = "default_true")]
    pub use_cache: bool,

    /// Enable quality post-processing
    #[serde(default = "default_true")]
    pub enable_quality_processing: bool,

    /// OCR configuration (None = OCR disabled)
    #[serde(default)]
    pub ocr: Option<OcrConfig>,

    /// Force OCR even for searchable PDFs
    #[serde(default)]
    pub force_ocr: bool,

    /// Text chunking configuration (None = chunking disabled)
    #[serde(default)]
    pub chunking: Option<ChunkingConfig>,

    /// Image extraction configuration (None = no image extraction)
    #[serde(default)]
    pub images: Option<ImageExtractionConfig>,

    /// PDF-specific options (None = use defaults)
    #[serde(default)]
    pub pdf_options: Option<PdfConfig>,

    /// Token reduction configuration (None = no token reduction)
    #[serde(default)]
    pub token_reduction: Option<TokenReductionConfig>,

    /// Language detection configuration (None = no language detection)
    #[serde(default)]
    pub language_detection: Option<LanguageDetectionConfig>,

    /// Keyword extraction configuration (None = no keyword extraction)
    #[cfg(any(feature = "keywords-yake", feature = "keywords-rake"))]
    #[serde(default)]
    pub keywords: Option<crate::keywords::KeywordConfig>,

    /// Post-processor configuration (None = use defaults)
    #[serde(default)]
    pub postprocessor: Option<PostProcessorConfig>,

    /// HTML conversion options (None = use defaults)
    ///
    /// Note: This field cannot be deserialized from TOML/YAML/JSON files.
    /// Set it programmatically after loading config.
    #[cfg(feature = "html")]
    #[serde(skip)]
    pub html_options: Option<html_to_markdown_rs::ConversionOptions>,

    /// Maximum concurrent extractions in batch operations (None = num_cpus * 2).
    ///
    /// Limits parallelism to prevent resource exhaustion when processing
    /// large batches. Defaults to twice the number of CPU cores.
    #[serde(default)]
    pub max_concurrent_extractions: Option<usize>,
}

/// Post-processor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostProcessorConfig {
    /// Enable post-processors
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whitelist of processor names to run (None = all enabled)
    #[serde(default)]
    pub enabled_processors: Option<Vec<String>>,

    /// Blacklist of processor names to skip (None = none disabled)
    #[serde(default)]
    pub disabled_processors: Option<Vec<String>>,
}

/// OCR configuration: a tagged sum type over the supported backends.
///
/// Each variant carries its own backend-specific settings. `None` is the
/// absence of a variant (`ocr: Option<OcrConfig>` on `ExtractionConfig`) --
/// this enum itself only ever represents an *enabled* backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum OcrConfig {
    Tesseract(crate::types::TesseractConfig),
    EasyOcr(EasyOcrConfig),
    PaddleOcr(PaddleOcrConfig),
}

impl OcrConfig {
    /// Language code shared across all backend variants.
    pub fn language(&self) -> &str {
        match self {
            OcrConfig::Tesseract(cfg) => &cfg.language,
            OcrConfig::EasyOcr(cfg) => &cfg.language,
            OcrConfig::PaddleOcr(cfg) => &cfg.language,
        }
    }
}

/// Placeholder configuration for an EasyOCR-shaped backend plugin.
///
/// No EasyOCR backend ships in this crate; this carries the settings an
/// external `OcrBackend` plugin registered under the `easy_ocr` tag would
/// expect to receive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EasyOcrConfig {
    #[serde(default = "default_eng")]
    pub language: String,

    #[serde(default)]
    pub gpu: bool,
}

/// Placeholder configuration for a PaddleOCR-shaped backend plugin.
///
/// No PaddleOCR backend ships in this crate; this carries the settings an
/// external `OcrBackend` plugin registered under the `paddle_ocr` tag would
/// expect to receive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddleOcrConfig {
    #[serde(default = "default_eng")]
    pub language: String,

    #[serde(default)]
    pub use_angle_cls: bool,
}

/// Chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk
    #[serde(default = "default_chunk_size")]
    pub max_chars: usize,

    /// Overlap between chunks in characters
    #[serde(default = "default_chunk_overlap")]
    pub max_overlap: usize,

    /// Use a preset configuration (overrides individual settings if provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
}

/// Image extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageExtractionConfig {
    /// Extract images from documents
    #[serde(default = "default_true")]
    pub extract_images: bool,

    /// Target DPI for image normalization
    #[serde(default = "default_target_dpi")]
    pub target_dpi: i32,

    /// Maximum dimension for images (width or height)
    #[serde(default = "default_max_dimension")]
    pub max_image_dimension: i32,

    /// Automatically adjust DPI based on image content
    #[serde(default = "default_true")]
    pub auto_adjust_dpi: bool,

    /// Minimum DPI threshold
    #[serde(default = "default_min_dpi")]
    pub min_dpi: i32,

    /// Maximum DPI threshold
    #[serde(default = "default_max_dpi")]
    pub max_dpi: i32,
}

/// PDF-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Extract images from PDF
    #[serde(default)]
    pub extract_images: bool,

    /// List of passwords to try when opening encrypted PDFs
    #[serde(default)]
    pub passwords: Option<Vec<String>>,

    /// Extract PDF metadata
    #[serde(default = "default_true")]
    pub extract_metadata: bool,
}

/// Token reduction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenReductionConfig {
    /// Reduction mode: "off", "light", "moderate", "aggressive", "maximum"
    #[serde(default = "default_reduction_mode")]
    pub mode: String,

    /// Preserve important words (capitalized, technical terms)
    #[serde(default = "default_true")]
    pub preserve_important_words: bool,
}

/// Language detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageDetectionConfig {
    /// Enable language detection
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minimum confidence threshold (0.0-1.0)
    #[serde(default = "default_confidence")]
    pub min_confidence: f64,

    /// Detect multiple languages in the document
    #[serde(default)]
    pub detect_multiple: bool,
}

fn default_true() -> bool {
    true
}
fn default_eng() -> String {
    "eng".to_string()
}
fn default_chunk_size() -> usize {
    1000
}
fn default_chunk_overlap() -> usize {
    200
}
fn default_target_dpi() -> i32 {
    300
}
fn default_max_dimension() -> i32 {
    4096
}
fn default_min_dpi() -> i32 {
    72
}
fn default_max_dpi() -> i32 {
    600
}
fn default_reduction_mode() -> String {
    "off".to_string()
}
fn default_confidence() -> f64 {
    0.8
}

/// Reject the pre-sum-type `ocr` shape (a bare `backend`/`language` pair with
/// a nested `tesseract_config` table) instead of letting it silently fail to
/// match any `OcrConfig` variant with an opaque serde error.
fn reject_legacy_ocr_shape<T: Serialize>(ocr_section: Option<&T>, path: &Path) -> Result<()> {
    let Some(section) = ocr_section else {
        return Ok(());
    };

    let as_json = serde_json::to_value(section)
        .map_err(|e| KreuzbergError::validation(format!("Invalid [ocr] section in {}: {}", path.display(), e)))?;

    if as_json.get("tesseract_config").is_some() {
        return Err(KreuzbergError::validation(format!(
            "{} uses the legacy flat OCR config shape (`backend`/`language` with a nested \
             `tesseract_config` table). OCR config is now a tagged variant: flatten the \
             tesseract_config fields directly under [ocr] alongside `backend = \"tesseract\"`. \
             See https://kreuzberg.dev/docs/migration/ocr-config for the new shape.",
            path.display()
        )));
    }

    Ok(())
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            enable_quality_processing: true,
            ocr: None,
            force_ocr: false,
            chunking: None,
            images: None,
            pdf_options: None,
            token_reduction: None,
            language_detection: None,
            #[cfg(any(feature = "keywords-yake", feature = "keywords-rake"))]
            keywords: None,
            postprocessor: None,
            #[cfg(feature = "html")]
            html_options: None,
            max_concurrent_extractions: None,
        }
    }
}

impl Default for PostProcessorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            enabled_processors: None,
            disabled_processors: None,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file
    ///
    /// # Errors
    ///
    /// Returns `KreuzbergError::Validation` if file doesn't exist or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            KreuzbergError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        let raw: toml::Value = toml::from_str(&content)
            .map_err(|e| KreuzbergError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))?;
        reject_legacy_ocr_shape(raw.get("ocr"), path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| KreuzbergError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            KreuzbergError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        let raw: serde_yaml_ng::Value = serde_yaml_ng::from_str(&content)
            .map_err(|e| KreuzbergError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))?;
        reject_legacy_ocr_shape(raw.get("ocr"), path.as_ref())?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| KreuzbergError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            KreuzbergError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        let raw: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| KreuzbergError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))?;
        reject_legacy_ocr_shape(raw.get("ocr"), path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| KreuzbergError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a `[package.metadata.kreuzberg]` table inside a `Cargo.toml`.
    fn from_cargo_manifest(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            KreuzbergError::validation(format!("Failed to read manifest {}: {}", path.as_ref().display(), e))
        })?;

        let manifest: toml::Value = toml::from_str(&content)
            .map_err(|e| KreuzbergError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))?;

        let Some(table) = manifest
            .get("package")
            .and_then(|p| p.get("metadata"))
            .and_then(|m| m.get("kreuzberg"))
        else {
            return Ok(None);
        };

        reject_legacy_ocr_shape(table.get("ocr"), path.as_ref())?;

        let rendered = toml::to_string(table).map_err(|e| {
            KreuzbergError::validation(format!(
                "Invalid [package.metadata.kreuzberg] table in {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config = toml::from_str(&rendered).map_err(|e| {
            KreuzbergError::validation(format!(
                "Invalid [package.metadata.kreuzberg] table in {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(Some(config))
    }

    /// Discover configuration in the current directory or any ancestor.
    ///
    /// Prefers a dedicated `kreuzberg.toml` over a `[package.metadata.kreuzberg]`
    /// table embedded in that directory's `Cargo.toml`, and stops at the first
    /// directory that has either.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found anywhere up to the filesystem root
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(KreuzbergError::Io)?;

        loop {
            let kreuzberg_toml = current.join("kreuzberg.toml");
            if kreuzberg_toml.exists() {
                return Ok(Some(Self::from_toml_file(kreuzberg_toml)?));
            }

            let cargo_toml = current.join("Cargo.toml");
            if cargo_toml.exists()
                && let Some(config) = Self::from_cargo_manifest(&cargo_toml)?
            {
                return Ok(Some(config));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}
