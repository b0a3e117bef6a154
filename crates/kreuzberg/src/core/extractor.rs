//! Main extraction entry points.
//!
//! This module provides the primary API for extracting content from files and byte arrays.
//! It orchestrates the entire extraction pipeline: cache checking, MIME detection,
//! extractor selection, extraction, post-processing, and cache storage.
//!
//! # Functions
//!
//! - [`extract_file`] - Extract content from a file path
//! - [`extract_bytes`] - Extract content from a byte array
//! - [`batch_extract_file`] - Extract content from multiple files concurrently
//! - [`batch_extract_bytes`] - Extract content from multiple byte arrays concurrently

use crate::cache::GenericCache;
use crate::core::config::ExtractionConfig;
use crate::core::mime::{LEGACY_POWERPOINT_MIME_TYPE, LEGACY_WORD_MIME_TYPE};
#[cfg(feature = "tokio-runtime")]
use crate::extraction::libreoffice::{convert_doc_to_docx, convert_ppt_to_pptx};
use crate::plugins::DocumentExtractor;
use crate::types::ExtractionResult;
#[cfg(feature = "tokio-runtime")]
use crate::types::LibreOfficeConversionResult;
use crate::{KreuzbergError, Result};
use once_cell::sync::Lazy;
#[cfg(feature = "tokio-runtime")]
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

/// Global Tokio runtime for synchronous operations.
///
/// This runtime is lazily initialized on first use and shared across all sync wrappers.
/// Using a global runtime instead of creating one per call provides 100x+ performance improvement.
///
/// # Safety
///
/// The `.expect()` here is justified because:
/// 1. Runtime creation can only fail due to system resource exhaustion (OOM, thread limit)
/// 2. If runtime creation fails, the process is already in a critical state
/// 3. This is a one-time initialization - if it fails, nothing will work
/// 4. Better to fail fast than return errors from every sync operation
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// Get an extractor from the registry.
///
/// This function acquires the registry read lock and retrieves the appropriate
/// extractor for the given MIME type.
///
/// # Performance
///
/// RwLock read + HashMap lookup is ~100ns, fast enough without caching.
/// Removed thread-local cache to avoid Tokio work-stealing scheduler issues.
fn get_extractor(mime_type: &str) -> Result<Arc<dyn DocumentExtractor>> {
    let registry = crate::plugins::registry::get_document_extractor_registry();
    let registry_read = registry
        .read()
        .map_err(|e| KreuzbergError::Other(format!("Document extractor registry lock poisoned: {}", e)))?;
    registry_read.get(mime_type)
}

/// Namespaced, single-flight cache of full `ExtractionResult`s, keyed on
/// content + MIME type + the parts of `ExtractionConfig` that affect output.
static RESULT_CACHE: Lazy<Result<GenericCache>> =
    Lazy::new(|| GenericCache::new("document".to_string(), None, 30.0, 500.0, 1000.0));

/// The subset of `ExtractionConfig` that can change `ExtractionResult`'s
/// content. Fields like `use_cache`, `max_concurrent_extractions`, and
/// `postprocessor` only control *how* extraction runs, not what it produces,
/// so they are deliberately left out of the cache key.
#[derive(serde::Serialize)]
struct CacheKeyConfig<'a> {
    enable_quality_processing: bool,
    ocr: &'a Option<crate::core::config::OcrConfig>,
    force_ocr: bool,
    chunking: &'a Option<crate::core::config::ChunkingConfig>,
    images: &'a Option<crate::core::config::ImageExtractionConfig>,
    pdf_options: &'a Option<crate::core::config::PdfConfig>,
    token_reduction: &'a Option<crate::core::config::TokenReductionConfig>,
    language_detection: &'a Option<crate::core::config::LanguageDetectionConfig>,
    #[cfg(any(feature = "keywords-yake", feature = "keywords-rake"))]
    keywords: &'a Option<crate::keywords::KeywordConfig>,
}

/// Fingerprint content + MIME type + the content-affecting subset of the
/// caller's config into a 32-hex-char cache key.
///
/// Two hashes are concatenated (content+mime, then config) rather than mixed
/// into one so a config change invalidates the key even if it happens to
/// collide with the content hash.
fn result_cache_key(content: &[u8], mime_type: &str, config: &ExtractionConfig) -> String {
    let content_hash = crate::cache::fast_hash(&[content, mime_type.as_bytes()].concat());
    let key_config = CacheKeyConfig {
        enable_quality_processing: config.enable_quality_processing,
        ocr: &config.ocr,
        force_ocr: config.force_ocr,
        chunking: &config.chunking,
        images: &config.images,
        pdf_options: &config.pdf_options,
        token_reduction: &config.token_reduction,
        language_detection: &config.language_detection,
        #[cfg(any(feature = "keywords-yake", feature = "keywords-rake"))]
        keywords: &config.keywords,
    };
    let config_bytes = serde_json::to_vec(&key_config).unwrap_or_default();
    let config_hash = crate::cache::fast_hash(&config_bytes);
    format!("{:016x}{:016x}", content_hash, config_hash)
}

/// Look up a cached result, or run `build` and cache it, with single-flight
/// coordination so concurrent callers for the same key don't duplicate work.
#[cfg(feature = "tokio-runtime")]
async fn extract_with_cache<F, Fut>(content: &[u8], mime_type: &str, config: &ExtractionConfig, build: F) -> Result<ExtractionResult>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<ExtractionResult>>,
{
    if !config.use_cache {
        return build().await;
    }

    let cache = match RESULT_CACHE.as_ref() {
        Ok(cache) => cache,
        Err(_) => return build().await,
    };

    let cache_key = result_cache_key(content, mime_type, config);

    loop {
        if let Some(bytes) = cache.get(&cache_key, None)? {
            match rmp_serde::from_slice::<ExtractionResult>(&bytes) {
                Ok(result) => return Ok(result),
                Err(_) => break,
            }
        }

        if cache.is_processing(&cache_key)? {
            cache.wait_for_completion(&cache_key).await?;
            continue;
        }

        break;
    }

    cache.mark_processing(cache_key.clone())?;
    let result = build().await;
    let mark_result = cache.mark_complete(&cache_key);

    let result = result?;
    mark_result?;

    if let Ok(bytes) = rmp_serde::to_vec(&result) {
        cache.set(&cache_key, bytes, None)?;
    }

    Ok(result)
}

/// Extract content from a file.
///
/// This is the main entry point for file-based extraction. It performs the following steps:
/// 1. Check cache for existing result (if caching enabled)
/// 2. Detect or validate MIME type
/// 3. Select appropriate extractor from registry
/// 4. Extract content
/// 5. Run post-processing pipeline
/// 6. Store result in cache (if caching enabled)
///
/// # Arguments
///
/// * `path` - Path to the file to extract
/// * `mime_type` - Optional MIME type override. If None, will be auto-detected
/// * `config` - Extraction configuration
///
/// # Returns
///
/// An `ExtractionResult` containing the extracted content and metadata.
///
/// # Errors
///
/// Returns `KreuzbergError::Validation` if the file doesn't exist or path is invalid.
/// Returns `KreuzbergError::UnsupportedFormat` if MIME type is not supported.
/// Returns `KreuzbergError::Io` for file I/O errors (these always bubble up).
///
/// # Example
///
/// ```rust,no_run
/// use kreuzberg::core::extractor::extract_file;
/// use kreuzberg::core::config::ExtractionConfig;
///
/// # async fn example() -> kreuzberg::Result<()> {
/// let config = ExtractionConfig::default();
/// let result = extract_file("document.pdf", None, &config).await?;
/// println!("Content: {}", result.content);
/// # Ok(())
/// # }
/// ```
#[tracing::instrument(
    skip(config, path),
    fields(
        extraction.path = %path.as_ref().display(),
    )
)]
pub async fn extract_file(
    path: impl AsRef<Path>,
    mime_type: Option<&str>,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    use crate::core::{io, mime};

    let path = path.as_ref();

    io::validate_file_exists(path)?;

    let detected_mime = mime::detect_or_validate(Some(path), mime_type)?;

    match detected_mime.as_str() {
        #[cfg(feature = "tokio-runtime")]
        LEGACY_WORD_MIME_TYPE => {
            let original_bytes = tokio::fs::read(path).await?;
            let conversion = convert_doc_to_docx(&original_bytes).await?;
            let mut result =
                extract_bytes_with_extractor(&conversion.converted_bytes, &conversion.target_mime, config).await?;
            apply_libreoffice_metadata(&mut result, LEGACY_WORD_MIME_TYPE, &conversion);
            return Ok(result);
        }
        #[cfg(not(feature = "tokio-runtime"))]
        LEGACY_WORD_MIME_TYPE => {
            return Err(KreuzbergError::UnsupportedFormat(
                "Legacy Word conversion requires the `tokio-runtime` feature for LibreOffice conversion support".to_string(),
            ));
        }
        #[cfg(feature = "tokio-runtime")]
        LEGACY_POWERPOINT_MIME_TYPE => {
            let original_bytes = tokio::fs::read(path).await?;
            let conversion = convert_ppt_to_pptx(&original_bytes).await?;
            let mut result =
                extract_bytes_with_extractor(&conversion.converted_bytes, &conversion.target_mime, config).await?;
            apply_libreoffice_metadata(&mut result, LEGACY_POWERPOINT_MIME_TYPE, &conversion);
            return Ok(result);
        }
        #[cfg(not(feature = "tokio-runtime"))]
        LEGACY_POWERPOINT_MIME_TYPE => {
            return Err(KreuzbergError::UnsupportedFormat(
                "Legacy PowerPoint conversion requires the `tokio-runtime` feature for LibreOffice conversion support".to_string(),
            ));
        }
        _ => {}
    }

    extract_file_with_extractor(path, &detected_mime, config).await
}

/// Extract content from a byte array.
#[tracing::instrument(
    skip(config, content),
    fields(
        extraction.mime_type = mime_type,
        extraction.size_bytes = content.len(),
    )
)]
pub async fn extract_bytes(content: &[u8], mime_type: &str, config: &ExtractionConfig) -> Result<ExtractionResult> {
    use crate::core::mime;

    let validated_mime = mime::validate_mime_type(mime_type)?;

    match validated_mime.as_str() {
        #[cfg(feature = "tokio-runtime")]
        LEGACY_WORD_MIME_TYPE => {
            let conversion = convert_doc_to_docx(content).await?;
            let mut result =
                extract_bytes_with_extractor(&conversion.converted_bytes, &conversion.target_mime, config).await?;
            apply_libreoffice_metadata(&mut result, LEGACY_WORD_MIME_TYPE, &conversion);
            return Ok(result);
        }
        #[cfg(not(feature = "tokio-runtime"))]
        LEGACY_WORD_MIME_TYPE => {
            return Err(KreuzbergError::UnsupportedFormat(
                "Legacy Word conversion requires the `tokio-runtime` feature for LibreOffice conversion support".to_string(),
            ));
        }
        #[cfg(feature = "tokio-runtime")]
        LEGACY_POWERPOINT_MIME_TYPE => {
            let conversion = convert_ppt_to_pptx(content).await?;
            let mut result =
                extract_bytes_with_extractor(&conversion.converted_bytes, &conversion.target_mime, config).await?;
            apply_libreoffice_metadata(&mut result, LEGACY_POWERPOINT_MIME_TYPE, &conversion);
            return Ok(result);
        }
        #[cfg(not(feature = "tokio-runtime"))]
        LEGACY_POWERPOINT_MIME_TYPE => {
            return Err(KreuzbergError::UnsupportedFormat(
                "Legacy PowerPoint conversion requires the `tokio-runtime` feature for LibreOffice conversion support".to_string(),
            ));
        }
        _ => {}
    }

    extract_bytes_with_extractor(content, &validated_mime, config).await
}

/// Extract content from multiple files concurrently.
///
/// This function processes multiple files in parallel, automatically managing
/// concurrency to prevent resource exhaustion. The concurrency limit can be
/// configured via `ExtractionConfig::max_concurrent_extractions` or defaults
/// to `num_cpus * 2`.
///
/// # Arguments
///
/// * `paths` - Vector of file paths to extract
/// * `config` - Extraction configuration
///
/// # Returns
///
/// A vector of `ExtractionResult` in the same order as the input paths.
///
/// # Errors
///
/// Per-item failures (including I/O errors) never fail the batch as a whole;
/// they are captured as an error-carrying `ExtractionResult` at that item's
/// position. Only a panicked task returns `Err` here.
#[tracing::instrument(
    skip(config, paths),
    fields(
        extraction.batch_size = paths.len(),
    )
)]
pub async fn batch_extract_file(paths: Vec<impl AsRef<Path>>, config: &ExtractionConfig) -> Result<Vec<ExtractionResult>> {
    batch_extract_file_cancellable(paths, config, None).await
}

/// Like [`batch_extract_file`], but cooperatively cancellable.
///
/// `cancellation` is checked before each not-yet-started item is spawned.
/// Once observed set, remaining items are synthesized directly as
/// `metadata.error = "cancelled"` results rather than started; items already
/// spawned are left to run to completion.
pub async fn batch_extract_file_cancellable(
    paths: Vec<impl AsRef<Path>>,
    config: &ExtractionConfig,
    cancellation: Option<Arc<std::sync::atomic::AtomicBool>>,
) -> Result<Vec<ExtractionResult>> {
    use tokio::sync::Semaphore;
    use tokio::task::JoinSet;

    if paths.is_empty() {
        return Ok(vec![]);
    }

    let config = Arc::new(config.clone());

    let max_concurrent = config.max_concurrent_extractions.unwrap_or_else(|| num_cpus::get() * 2);
    let semaphore = Arc::new(Semaphore::new(max_concurrent));

    let mut tasks = JoinSet::new();
    let total = paths.len();
    let mut results: Vec<Option<ExtractionResult>> = vec![None; total];

    for (index, path) in paths.into_iter().enumerate() {
        if is_cancelled(&cancellation) {
            results[index] = Some(cancelled_result());
            continue;
        }

        let path_buf = path.as_ref().to_path_buf();
        let config_clone = Arc::clone(&config);
        let semaphore_clone = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore_clone.acquire().await.unwrap();
            let result =
                crate::core::batch_mode::with_batch_mode(async { extract_file(&path_buf, None, &config_clone).await })
                    .await;
            (index, result)
        });
    }

    while let Some(task_result) = tasks.join_next().await {
        match task_result {
            Ok((index, Ok(result))) => {
                results[index] = Some(result);
            }
            Ok((index, Err(e))) => {
                results[index] = Some(error_result(&e));
            }
            Err(join_err) => {
                return Err(KreuzbergError::Other(format!("Task panicked: {}", join_err)));
            }
        }
    }

    #[allow(clippy::unwrap_used)]
    Ok(results.into_iter().map(|r| r.unwrap()).collect())
}

/// Extract content from multiple byte arrays concurrently.
///
/// This function processes multiple byte arrays in parallel, automatically managing
/// concurrency to prevent resource exhaustion. The concurrency limit can be
/// configured via `ExtractionConfig::max_concurrent_extractions` or defaults
/// to `num_cpus * 2`.
///
/// # Arguments
///
/// * `contents` - Vector of (bytes, mime_type) tuples
/// * `config` - Extraction configuration
///
/// # Returns
///
/// A vector of `ExtractionResult` in the same order as the input. Per-item
/// failures (including I/O errors) never fail the batch as a whole.
#[tracing::instrument(
    skip(config, contents),
    fields(
        extraction.batch_size = contents.len(),
    )
)]
pub async fn batch_extract_bytes(contents: Vec<(&[u8], &str)>, config: &ExtractionConfig) -> Result<Vec<ExtractionResult>> {
    batch_extract_bytes_cancellable(contents, config, None).await
}

/// Like [`batch_extract_bytes`], but cooperatively cancellable. See
/// [`batch_extract_file_cancellable`] for cancellation semantics.
pub async fn batch_extract_bytes_cancellable(
    contents: Vec<(&[u8], &str)>,
    config: &ExtractionConfig,
    cancellation: Option<Arc<std::sync::atomic::AtomicBool>>,
) -> Result<Vec<ExtractionResult>> {
    use tokio::sync::Semaphore;
    use tokio::task::JoinSet;

    if contents.is_empty() {
        return Ok(vec![]);
    }

    let batch_config = config.clone();
    let config = Arc::new(batch_config);

    let max_concurrent = config.max_concurrent_extractions.unwrap_or_else(|| num_cpus::get() * 2);
    let semaphore = Arc::new(Semaphore::new(max_concurrent));

    let owned_contents: Vec<(Vec<u8>, String)> = contents
        .into_iter()
        .map(|(bytes, mime)| (bytes.to_vec(), mime.to_string()))
        .collect();

    let mut tasks = JoinSet::new();
    let total = owned_contents.len();
    let mut results: Vec<Option<ExtractionResult>> = vec![None; total];

    for (index, (bytes, mime_type)) in owned_contents.into_iter().enumerate() {
        if is_cancelled(&cancellation) {
            results[index] = Some(cancelled_result());
            continue;
        }

        let config_clone = Arc::clone(&config);
        let semaphore_clone = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore_clone.acquire().await.unwrap();
            let result = crate::core::batch_mode::with_batch_mode(async {
                extract_bytes(&bytes, &mime_type, &config_clone).await
            })
            .await;
            (index, result)
        });
    }

    while let Some(task_result) = tasks.join_next().await {
        match task_result {
            Ok((index, Ok(result))) => {
                results[index] = Some(result);
            }
            Ok((index, Err(e))) => {
                results[index] = Some(error_result(&e));
            }
            Err(join_err) => {
                return Err(KreuzbergError::Other(format!("Task panicked: {}", join_err)));
            }
        }
    }

    #[allow(clippy::unwrap_used)]
    Ok(results.into_iter().map(|r| r.unwrap()).collect())
}

fn is_cancelled(cancellation: &Option<Arc<std::sync::atomic::AtomicBool>>) -> bool {
    cancellation
        .as_ref()
        .is_some_and(|flag| flag.load(std::sync::atomic::Ordering::Acquire))
}

fn cancelled_result() -> ExtractionResult {
    use crate::types::{ErrorMetadata, Metadata};
    ExtractionResult {
        content: String::new(),
        mime_type: "text/plain".to_string(),
        metadata: Metadata {
            error: Some(ErrorMetadata {
                error_type: "Cancelled".to_string(),
                message: "cancelled".to_string(),
            }),
            ..Default::default()
        },
        tables: vec![],
        detected_languages: None,
        chunks: None,
        images: None,
        pages: None,
        image_ocr_results: Vec::new(),
    }
}

fn error_result(e: &KreuzbergError) -> ExtractionResult {
    use crate::types::{ErrorMetadata, Metadata};
    ExtractionResult {
        content: format!("Error: {}", e),
        mime_type: "text/plain".to_string(),
        metadata: Metadata {
            error: Some(ErrorMetadata {
                error_type: format!("{:?}", e),
                message: e.to_string(),
            }),
            ..Default::default()
        },
        tables: vec![],
        detected_languages: None,
        chunks: None,
        images: None,
        pages: None,
        image_ocr_results: Vec::new(),
    }
}

/// Synchronous wrapper for `extract_file`.
///
/// This is a convenience function that blocks the current thread until extraction completes.
/// For async code, use `extract_file` directly.
///
/// Uses the global Tokio runtime for 100x+ performance improvement over creating
/// a new runtime per call. Always uses the global runtime to avoid nested runtime issues.
pub fn extract_file_sync(
    path: impl AsRef<Path>,
    mime_type: Option<&str>,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    GLOBAL_RUNTIME.block_on(extract_file(path, mime_type, config))
}

/// Synchronous wrapper for `extract_bytes`.
///
/// Uses the global Tokio runtime for 100x+ performance improvement over creating
/// a new runtime per call.
pub fn extract_bytes_sync(content: &[u8], mime_type: &str, config: &ExtractionConfig) -> Result<ExtractionResult> {
    GLOBAL_RUNTIME.block_on(extract_bytes(content, mime_type, config))
}

/// Synchronous wrapper for `batch_extract_file`.
///
/// Uses the global Tokio runtime for 100x+ performance improvement over creating
/// a new runtime per call.
pub fn batch_extract_file_sync(
    paths: Vec<impl AsRef<Path>>,
    config: &ExtractionConfig,
) -> Result<Vec<ExtractionResult>> {
    GLOBAL_RUNTIME.block_on(batch_extract_file(paths, config))
}

/// Synchronous wrapper for `batch_extract_bytes`.
///
/// Uses the global Tokio runtime for 100x+ performance improvement over creating
/// a new runtime per call.
pub fn batch_extract_bytes_sync(
    contents: Vec<(&[u8], &str)>,
    config: &ExtractionConfig,
) -> Result<Vec<ExtractionResult>> {
    GLOBAL_RUNTIME.block_on(batch_extract_bytes(contents, config))
}

/// Synchronous wrapper for `batch_extract_file_cancellable`.
pub fn batch_extract_file_cancellable_sync(
    paths: Vec<impl AsRef<Path>>,
    config: &ExtractionConfig,
    cancellation: Option<Arc<std::sync::atomic::AtomicBool>>,
) -> Result<Vec<ExtractionResult>> {
    GLOBAL_RUNTIME.block_on(batch_extract_file_cancellable(paths, config, cancellation))
}

/// Synchronous wrapper for `batch_extract_bytes_cancellable`.
pub fn batch_extract_bytes_cancellable_sync(
    contents: Vec<(&[u8], &str)>,
    config: &ExtractionConfig,
    cancellation: Option<Arc<std::sync::atomic::AtomicBool>>,
) -> Result<Vec<ExtractionResult>> {
    GLOBAL_RUNTIME.block_on(batch_extract_bytes_cancellable(contents, config, cancellation))
}

/// Runs OCR over a handler's extracted images when `force_ocr` is set, or the
/// handler produced no extractable text and images are present, merging
/// results into `image_ocr_results`.
///
/// When the handler already produced text, OCR output *replaces* `content`
/// rather than being appended — the handler's text is typically extraction
/// noise (e.g. a scanned PDF's embedded OCR layer) that `force_ocr` exists to
/// override.
#[cfg(feature = "ocr")]
async fn maybe_force_ocr(result: &mut ExtractionResult, config: &ExtractionConfig) {
    use crate::core::config::OcrConfig;
    use crate::types::{ImageOCRResult, Metadata, TesseractConfig};

    let has_images = result.images.as_ref().is_some_and(|images| !images.is_empty());
    if !has_images {
        return;
    }

    let no_extractable_text = result.content.trim().is_empty();
    if !config.force_ocr && !no_extractable_text {
        return;
    }

    let default_ocr = OcrConfig::Tesseract(TesseractConfig::default());
    let ocr_config = config.ocr.as_ref().unwrap_or(&default_ocr);

    let registry = crate::plugins::registry::get_ocr_backend_registry();
    let backend = {
        let registry = match registry.read() {
            Ok(registry) => registry,
            Err(e) => {
                result.metadata.additional.insert(
                    "force_ocr_error".to_string(),
                    serde_json::Value::String(format!("OCR backend registry lock poisoned: {}", e)),
                );
                return;
            }
        };

        match registry.get_for_language(ocr_config.language()) {
            Ok(backend) => backend,
            Err(e) => {
                result
                    .metadata
                    .additional
                    .insert("force_ocr_error".to_string(), serde_json::Value::String(e.to_string()));
                return;
            }
        }
    };

    let images = result.images.clone().unwrap_or_default();
    let mut ocr_texts = Vec::with_capacity(images.len());

    for image in images {
        match backend.process_image(&image.data, ocr_config).await {
            Ok(ocr_result) => {
                ocr_texts.push(ocr_result.content.clone());
                result.image_ocr_results.push(ImageOCRResult {
                    image,
                    ocr_result,
                    confidence_score: None,
                    processing_time_ms: None,
                    skipped_reason: None,
                });
            }
            Err(e) => {
                result.image_ocr_results.push(ImageOCRResult {
                    image,
                    ocr_result: ExtractionResult {
                        content: String::new(),
                        mime_type: "text/plain".to_string(),
                        metadata: Metadata::default(),
                        tables: vec![],
                        detected_languages: None,
                        chunks: None,
                        images: None,
                        pages: None,
                        image_ocr_results: Vec::new(),
                    },
                    confidence_score: None,
                    processing_time_ms: None,
                    skipped_reason: Some(e.to_string()),
                });
            }
        }
    }

    if !ocr_texts.is_empty() {
        result.content = ocr_texts.join("\n\n");
    }
}

#[cfg(not(feature = "ocr"))]
async fn maybe_force_ocr(_result: &mut ExtractionResult, _config: &ExtractionConfig) {}

async fn extract_file_with_extractor(
    path: &Path,
    mime_type: &str,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    #[cfg(feature = "tokio-runtime")]
    {
        let content = tokio::fs::read(path).await?;
        extract_with_cache(&content, mime_type, config, || async {
            crate::extractors::ensure_initialized()?;
            let extractor = get_extractor(mime_type)?;
            let mut result = extractor.extract_file(path, mime_type, config).await?;
            maybe_force_ocr(&mut result, config).await;
            crate::core::pipeline::run_pipeline(result, config).await
        })
        .await
    }

    #[cfg(not(feature = "tokio-runtime"))]
    {
        crate::extractors::ensure_initialized()?;
        let extractor = get_extractor(mime_type)?;
        let mut result = extractor.extract_file(path, mime_type, config).await?;
        maybe_force_ocr(&mut result, config).await;
        crate::core::pipeline::run_pipeline(result, config).await
    }
}

async fn extract_bytes_with_extractor(
    content: &[u8],
    mime_type: &str,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    #[cfg(feature = "tokio-runtime")]
    {
        extract_with_cache(content, mime_type, config, || async {
            crate::extractors::ensure_initialized()?;
            let extractor = get_extractor(mime_type)?;
            let mut result = extractor.extract_bytes(content, mime_type, config).await?;
            maybe_force_ocr(&mut result, config).await;
            crate::core::pipeline::run_pipeline(result, config).await
        })
        .await
    }

    #[cfg(not(feature = "tokio-runtime"))]
    {
        crate::extractors::ensure_initialized()?;
        let extractor = get_extractor(mime_type)?;
        let mut result = extractor.extract_bytes(content, mime_type, config).await?;
        maybe_force_ocr(&mut result, config).await;
        crate::core::pipeline::run_pipeline(result, config).await
    }
}

#[cfg(feature = "tokio-runtime")]
fn apply_libreoffice_metadata(
    result: &mut ExtractionResult,
    legacy_mime: &str,
    conversion: &LibreOfficeConversionResult,
) {
    result.mime_type = legacy_mime.to_string();
    result.metadata.additional.insert(
        "libreoffice_conversion".to_string(),
        json!({
            "converter": "libreoffice",
            "original_format": conversion.original_format,
            "target_format": conversion.target_format,
            "target_mime": conversion.target_mime,
        }),
    );
}
