pub mod tsv_parser;

pub use html_to_markdown_rs::hocr::{HocrWord, reconstruct_table, table_to_markdown};
pub use tsv_parser::extract_words_from_tsv;
