//! Language detection post-processor.
//!
//! This module provides a PostProcessor plugin that detects languages in
//! extraction results and stores them in the result.

use crate::plugins::{Plugin, PostProcessor, ProcessingStage};
use crate::{ExtractionConfig, ExtractionResult, KreuzbergError, Result};
use async_trait::async_trait;

/// Post-processor that detects languages in document content.
///
/// This processor:
/// - Runs in the Early processing stage
/// - Only processes when `config.language_detection` is configured
/// - Stores detected languages in `result.detected_languages`
/// - Uses the whatlang library for detection
///
/// # Example
///
/// ```rust,no_run
/// use kreuzberg::plugins::{Plugin, PostProcessor};
/// use kreuzberg::language_detection::processor::LanguageDetector;
///
/// let processor = LanguageDetector;
/// assert_eq!(processor.name(), "language-detection");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LanguageDetector;

impl Plugin for LanguageDetector {
    fn name(&self) -> &str {
        "language-detection"
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
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PostProcessor for LanguageDetector {
    async fn process(&self, result: &mut ExtractionResult, config: &ExtractionConfig) -> Result<()> {
        let lang_config = match &config.language_detection {
            Some(cfg) => cfg,
            None => return Ok(()),
        };

        match super::detect_languages(&result.content, lang_config)
            .map_err(|e| KreuzbergError::Other(format!("Language detection failed: {}", e)))?
        {
            Some(languages) => {
                result.detected_languages = Some(languages);
            }
            None => {
                result.detected_languages = None;
            }
        }

        Ok(())
    }

    fn processing_stage(&self) -> ProcessingStage {
        ProcessingStage::Early
    }

    fn should_process(&self, _result: &ExtractionResult, config: &ExtractionConfig) -> bool {
        config.language_detection.is_some()
    }

    fn estimated_duration_ms(&self, result: &ExtractionResult) -> u64 {
        let text_length = result.content.len();
        // Language detection is relatively fast: ~1ms per 1KB
        (text_length / 1024).max(1) as u64
    }
}
