//! DPI-aware image preprocessing ahead of OCR.
//!
//! This is a pure function over an in-memory image buffer: no file I/O, no
//! network calls. It resolves a target DPI, decides whether resampling is
//! worthwhile, and enforces the configured memory and dimension budgets
//! before handing pixels to the OCR backend.

use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image as FirImage};
use image::{DynamicImage, ImageBuffer, Rgb};

use crate::core::config::ImageExtractionConfig;

/// Default DPI assumed for images that carry no resolution hint.
const DEFAULT_DPI: i32 = 72;

/// Below this relative scale change, resampling is skipped entirely.
const SCALE_NOOP_THRESHOLD: f64 = 0.05;

/// Outcome of running an image through [`preprocess_image`].
#[derive(Debug, Clone)]
pub struct ImagePreprocessingOutcome {
    /// The processed image, normalized to RGB. Identical to the input when
    /// resizing was skipped or failed the memory budget check.
    pub image: DynamicImage,

    /// DPI the image was resampled to. Equals `current_dpi` when resampling
    /// was skipped.
    pub target_dpi: i32,

    /// `true` when the computed target dimensions were clamped to
    /// `max_image_dimension` while preserving aspect ratio.
    pub dimension_clamped: bool,

    /// `true` when resampling was skipped because the requested dimensions
    /// would exceed the memory budget.
    pub skipped_resize: bool,

    /// Populated when `skipped_resize` is `true`, describing why.
    pub resize_error: Option<String>,
}

/// Resize and normalize an image ahead of OCR.
///
/// `current_dpi_hint` is the resolution reported by the source image (EXIF,
/// container metadata, etc); pass `None` to fall back to [`DEFAULT_DPI`].
pub fn preprocess_image(
    image: DynamicImage,
    config: &ImageExtractionConfig,
    current_dpi_hint: Option<i32>,
) -> ImagePreprocessingOutcome {
    let current_dpi = current_dpi_hint.unwrap_or(DEFAULT_DPI).max(1);

    let target_dpi = if config.auto_adjust_dpi {
        resolve_target_dpi(&image, config, current_dpi)
    } else {
        config.target_dpi
    };

    let scale = target_dpi as f64 / current_dpi as f64;

    if (scale - 1.0).abs() < SCALE_NOOP_THRESHOLD {
        return ImagePreprocessingOutcome {
            image: image.to_rgb8().into(),
            target_dpi: current_dpi,
            dimension_clamped: false,
            skipped_resize: true,
            resize_error: None,
        };
    }

    let (raw_width, raw_height) = scaled_dimensions(image.width(), image.height(), scale);
    let (new_width, new_height, dimension_clamped) = clamp_dimensions(raw_width, raw_height, config.max_image_dimension as u32);

    if let Err(resize_error) = check_memory_budget(new_width, new_height) {
        return ImagePreprocessingOutcome {
            image: image.to_rgb8().into(),
            target_dpi: current_dpi,
            dimension_clamped: false,
            skipped_resize: true,
            resize_error: Some(resize_error),
        };
    }

    match resize_image(&image, new_width, new_height, scale) {
        Ok(resized) => ImagePreprocessingOutcome {
            image: resized,
            target_dpi,
            dimension_clamped,
            skipped_resize: false,
            resize_error: None,
        },
        Err(e) => ImagePreprocessingOutcome {
            image: image.to_rgb8().into(),
            target_dpi: current_dpi,
            dimension_clamped: false,
            skipped_resize: true,
            resize_error: Some(e),
        },
    }
}

/// Choose a target DPI that keeps the resampled image within
/// `max_image_dimension` and `[min_dpi, max_dpi]`.
fn resolve_target_dpi(image: &DynamicImage, config: &ImageExtractionConfig, current_dpi: i32) -> i32 {
    let longest_edge = image.width().max(image.height()).max(1) as f64;
    let max_dimension = config.max_image_dimension.max(1) as f64;

    let dpi_ceiling_for_dimension = ((max_dimension / longest_edge) * current_dpi as f64).floor() as i32;

    config
        .target_dpi
        .min(dpi_ceiling_for_dimension)
        .clamp(config.min_dpi, config.max_dpi)
}

fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let new_width = ((width as f64) * scale).round().max(1.0) as u32;
    let new_height = ((height as f64) * scale).round().max(1.0) as u32;
    (new_width, new_height)
}

/// Clamp both axes uniformly so the longest edge never exceeds
/// `max_dimension`, preserving aspect ratio.
fn clamp_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32, bool) {
    let longest = width.max(height);
    if longest <= max_dimension || max_dimension == 0 {
        return (width, height, false);
    }

    let clamp_scale = max_dimension as f64 / longest as f64;
    let clamped_width = ((width as f64) * clamp_scale).round().max(1.0) as u32;
    let clamped_height = ((height as f64) * clamp_scale).round().max(1.0) as u32;
    (clamped_width, clamped_height, true)
}

/// Per-image memory budget: decoded RGB8 buffer size, capped at 256 MiB.
const MAX_DECODED_BYTES: u64 = 256 * 1024 * 1024;

fn check_memory_budget(width: u32, height: u32) -> Result<(), String> {
    let bytes = width as u64 * height as u64 * 3;
    if bytes > MAX_DECODED_BYTES {
        return Err(format!(
            "requested dimensions {width}x{height} would need {bytes} bytes, exceeding the {MAX_DECODED_BYTES} byte budget"
        ));
    }
    Ok(())
}

/// Resample via `fast_image_resize`, picking Lanczos3 for downscaling and
/// cubic (Catmull-Rom) for upscaling, and normalize to 3-channel RGB.
fn resize_image(image: &DynamicImage, new_width: u32, new_height: u32, scale: f64) -> Result<DynamicImage, String> {
    let rgb_image = image.to_rgb8();
    let (width, height) = rgb_image.dimensions();

    let src_image = FirImage::from_vec_u8(width, height, rgb_image.into_raw(), PixelType::U8x3)
        .map_err(|e| format!("failed to wrap source image: {e:?}"))?;

    let mut dst_image = FirImage::new(new_width, new_height, PixelType::U8x3);

    let algorithm = if scale < 1.0 {
        ResizeAlg::Convolution(FilterType::Lanczos3)
    } else {
        ResizeAlg::Convolution(FilterType::CatmullRom)
    };

    let mut resizer = Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, &ResizeOptions::new().resize_alg(algorithm))
        .map_err(|e| format!("resize failed: {e:?}"))?;

    let buffer = dst_image.into_vec();
    let img_buffer = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(new_width, new_height, buffer)
        .ok_or_else(|| "failed to reconstruct image buffer after resize".to_string())?;

    Ok(DynamicImage::ImageRgb8(img_buffer))
}
