//! Post-processing pipeline orchestration.
//!
//! This module orchestrates the post-processing pipeline, executing validators,
//! quality processing, chunking, and custom hooks in the correct order.

use crate::Result;
use crate::core::config::ExtractionConfig;
use crate::plugins::ProcessingStage;
use crate::types::ExtractionResult;

/// Run the post-processing pipeline on an extraction result.
///
/// Executes post-processing in the following order:
/// 1. Post-Processors - Execute by stage (Early, Middle, Late) to modify/enhance the result
/// 2. Quality Processing - Text cleaning and quality scoring
/// 3. Chunking - Text splitting if enabled
/// 4. Validators - Run validation hooks on the processed result (can fail fast)
///
/// # Arguments
///
/// * `result` - The extraction result to process
/// * `config` - Extraction configuration
///
/// # Returns
///
/// The processed extraction result.
///
/// # Errors
///
/// - Validator errors bubble up immediately
/// - Post-processor errors are caught and recorded in metadata
/// - System errors (IO, RuntimeError equivalents) always bubble up
pub async fn run_pipeline(mut result: ExtractionResult, config: &ExtractionConfig) -> Result<ExtractionResult> {
    // Run post-processors FIRST so validators can check the processed result
    let pp_config = config.postprocessor.as_ref();
    let postprocessing_enabled = pp_config.is_none_or(|c| c.enabled);

    if postprocessing_enabled {
        #[cfg(any(feature = "keywords-yake", feature = "keywords-rake"))]
        {
            let _ = crate::keywords::ensure_initialized();
        }

        let processor_registry = crate::plugins::registry::get_post_processor_registry();

        for stage in [ProcessingStage::Early, ProcessingStage::Middle, ProcessingStage::Late] {
            let processors = {
                let registry = processor_registry.read().map_err(|e| {
                    crate::KreuzbergError::Other(format!("Post-processor registry lock poisoned: {}", e))
                })?;
                registry.get_for_stage(stage)
            };

            for processor in processors {
                let processor_name = processor.name();

                let should_run = if let Some(config) = pp_config {
                    if let Some(ref enabled) = config.enabled_processors {
                        enabled.iter().any(|name| name == processor_name)
                    } else if let Some(ref disabled) = config.disabled_processors {
                        !disabled.iter().any(|name| name == processor_name)
                    } else {
                        true
                    }
                } else {
                    true
                };

                if should_run
                    && processor.should_process(&result, config)
                    && let Err(e) = processor.process(&mut result, config).await
                {
                    let error_key = format!("processing_error_{}", processor_name);
                    result
                        .metadata
                        .additional
                        .insert(error_key, serde_json::Value::String(e.to_string()));
                }
            }
        }
    }

    #[cfg(feature = "quality")]
    if config.enable_quality_processing {
        result.content = crate::text::quality::clean_extracted_text(&result.content);

        let quality_score = crate::text::quality::calculate_quality_score(
            &result.content,
            Some(
                &result
                    .metadata
                    .additional
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_string()))
                    .collect(),
            ),
        );
        result.metadata.additional.insert(
            "quality_score".to_string(),
            serde_json::Value::Number(
                serde_json::Number::from_f64(quality_score).unwrap_or(serde_json::Number::from(0)),
            ),
        );
    }

    #[cfg(not(feature = "quality"))]
    if config.enable_quality_processing {
        result.metadata.additional.insert(
            "quality_processing_error".to_string(),
            serde_json::Value::String("Quality processing feature not enabled".to_string()),
        );
    }

    #[cfg(feature = "chunking")]
    if let Some(ref chunking_config) = config.chunking {
        let chunk_config = crate::chunking::ChunkingConfig {
            max_characters: chunking_config.max_chars,
            overlap: chunking_config.max_overlap,
            trim: true,
            chunker_type: crate::chunking::ChunkerType::Text,
        };

        match crate::chunking::chunk_text(&result.content, &chunk_config) {
            Ok(chunking_result) => {
                result.chunks = Some(chunking_result.chunks);

                if let Some(ref chunks) = result.chunks {
                    result.metadata.additional.insert(
                        "chunk_count".to_string(),
                        serde_json::Value::Number(serde_json::Number::from(chunks.len())),
                    );
                }
            }
            Err(e) => {
                result
                    .metadata
                    .additional
                    .insert("chunking_error".to_string(), serde_json::Value::String(e.to_string()));
            }
        }
    }

    #[cfg(not(feature = "chunking"))]
    if config.chunking.is_some() {
        result.metadata.additional.insert(
            "chunking_error".to_string(),
            serde_json::Value::String("Chunking feature not enabled".to_string()),
        );
    }

    #[cfg(feature = "language-detection")]
    if let Some(ref lang_config) = config.language_detection {
        match crate::language_detection::detect_languages(&result.content, lang_config) {
            Ok(detected) => {
                result.detected_languages = detected;
            }
            Err(e) => {
                result.metadata.additional.insert(
                    "language_detection_error".to_string(),
                    serde_json::Value::String(e.to_string()),
                );
            }
        }
    }

    #[cfg(not(feature = "language-detection"))]
    if config.language_detection.is_some() {
        result.metadata.additional.insert(
            "language_detection_error".to_string(),
            serde_json::Value::String("Language detection feature not enabled".to_string()),
        );
    }

    // Run validators LAST, after all processing is complete
    {
        let validator_registry = crate::plugins::registry::get_validator_registry();
        let validators = {
            let registry = validator_registry
                .read()
                .map_err(|e| crate::KreuzbergError::Other(format!("Validator registry lock poisoned: {}", e)))?;
            registry.get_all()
        };

        for validator in validators {
            if validator.should_validate(&result, config) {
                validator.validate(&result, config).await?;
            }
        }
    }

    Ok(result)
}
