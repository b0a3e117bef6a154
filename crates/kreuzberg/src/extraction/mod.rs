pub mod structured;
pub mod text;

#[cfg(feature = "ocr")]
pub mod image;

#[cfg(feature = "tokio-runtime")]
pub mod libreoffice;

pub use structured::{JsonExtractionConfig, StructuredDataResult, parse_json, parse_toml, parse_yaml};
pub use text::parse_text;

#[cfg(feature = "ocr")]
pub use image::{ImageMetadata, extract_image_metadata};

#[cfg(feature = "tokio-runtime")]
pub use libreoffice::{check_libreoffice_available, convert_doc_to_docx, convert_ppt_to_pptx};
