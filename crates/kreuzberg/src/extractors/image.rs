//! Image extractor.
//!
//! Routes image bytes through the registered OCR backend that matches the
//! configured language, falling back to a Tesseract default when no OCR
//! configuration is supplied.

use crate::Result;
use crate::core::config::{ExtractionConfig, OcrConfig};
use crate::plugins::registry::get_ocr_backend_registry;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, TesseractConfig};
use async_trait::async_trait;

/// Extracts text from raster images (.png, .jpg, .tiff, ...) via OCR.
pub struct ImageExtractor;

impl ImageExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ImageExtractor {
    fn name(&self) -> &str {
        "image-extractor"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        "Extracts text from raster images via OCR"
    }

    fn author(&self) -> &str {
        "Kreuzberg Team"
    }
}

#[async_trait]
impl DocumentExtractor for ImageExtractor {
    #[tracing::instrument(skip(self, content, config), fields(extractor.name = self.name(), content.size_bytes = content.len()))]
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let default_ocr = OcrConfig::Tesseract(TesseractConfig::default());
        let ocr_config = config.ocr.as_ref().unwrap_or(&default_ocr);

        let registry = get_ocr_backend_registry();
        let backend = {
            let registry = registry
                .read()
                .map_err(|e| crate::KreuzbergError::Other(format!("OCR backend registry lock poisoned: {}", e)))?;
            registry.get_for_language(ocr_config.language())?
        };

        let mut result = backend.process_image(content, ocr_config).await?;
        result.mime_type = mime_type.to_string();
        Ok(result)
    }

    fn supported_mime_types(&self) -> &[&str] {
        &[
            "image/png",
            "image/jpeg",
            "image/tiff",
            "image/bmp",
            "image/gif",
            "image/webp",
        ]
    }

    fn priority(&self) -> i32 {
        50
    }
}
