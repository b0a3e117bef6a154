use super::error::OcrError;
use html_to_markdown_rs::{ConversionOptions, convert};

pub fn convert_hocr_to_markdown(hocr_html: &str, options: Option<ConversionOptions>) -> Result<String, OcrError> {
    let use_default = options.is_none();
    let mut opts = options.unwrap_or_default();

    if use_default {
        opts.hocr_spatial_tables = false;
        opts.extract_metadata = false;
    }

    convert(hocr_html, Some(opts)).map_err(|e| OcrError::ProcessingFailed(format!("hOCR conversion failed: {}", e)))
}
