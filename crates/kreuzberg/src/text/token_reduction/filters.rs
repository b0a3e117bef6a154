use crate::error::{KreuzbergError, Result};
use crate::stopwords::STOPWORDS;
use crate::text::token_reduction::config::TokenReductionConfig;
use ahash::{AHashMap, AHashSet};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static HTML_COMMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--.*?-->").expect("HTML comment regex pattern is valid and should compile"));
static EXCESSIVE_NEWLINES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("Excessive newlines regex pattern is valid and should compile"));
static MULTIPLE_SPACES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("Multiple spaces regex pattern is valid and should compile"));
static MARKDOWN_CODE_BLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[\s\S]*?```").expect("Markdown code block regex pattern is valid and should compile"));
static MARKDOWN_INLINE_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`[^`\n]+`").expect("Markdown inline code regex pattern is valid and should compile"));
static MARKDOWN_HEADERS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,6}\s+").expect("Markdown headers regex pattern is valid and should compile"));
static MARKDOWN_LISTS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*[-*+]\s+").expect("Markdown lists regex pattern is valid and should compile"));

pub struct FilterPipeline {
    config: Arc<TokenReductionConfig>,
    stopwords: AHashSet<String>,
    preserve_patterns: Vec<Regex>,
    language: String,
}

impl FilterPipeline {
    pub fn new(config: &Arc<TokenReductionConfig>, language: &str) -> Result<Self> {
        // Try requested language first, fall back to English (which is always available in the embedded stopwords).
        // If English stopwords are missing, it indicates a build/compilation issue that must be exposed.
        let mut stopwords = STOPWORDS.get(language).cloned().unwrap_or_else(|| {
            STOPWORDS
                .get("en")
                .cloned()
                .expect("English stopwords must be available - indicates build failure if missing")
        });

        if let Some(ref custom) = config.custom_stopwords
            && let Some(custom_for_lang) = custom.get(language)
        {
            for word in custom_for_lang {
                stopwords.insert(word.to_lowercase());
            }
        }

        let preserve_patterns: std::result::Result<Vec<Regex>, _> = config
            .preserve_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect();

        let preserve_patterns =
            preserve_patterns.map_err(|e| KreuzbergError::validation(format!("Invalid regex pattern: {}", e)))?;

        Ok(Self {
            config: Arc::clone(config),
            stopwords,
            preserve_patterns,
            language: language.to_string(),
        })
    }

    pub fn apply_light_filters(&self, text: &str) -> String {
        let mut result = text.to_string();

        let mut preserved_blocks = AHashMap::new();
        if self.config.preserve_markdown {
            result = self.extract_and_preserve_code(&result, &mut preserved_blocks);
        }

        result = HTML_COMMENT_REGEX.replace_all(&result, "").to_string();

        result = MULTIPLE_SPACES_REGEX.replace_all(&result, " ").to_string();

        result = EXCESSIVE_NEWLINES_REGEX.replace_all(&result, "\n\n").to_string();

        if self.config.preserve_markdown {
            result = self.preserve_markdown_structure(&result);
        }

        result = self.restore_preserved_blocks(&result, &preserved_blocks);

        result
    }

    pub fn apply_moderate_filters(&self, text: &str) -> String {
        let mut result = self.apply_light_filters(text);

        let mut preserved_blocks = AHashMap::new();
        if self.config.preserve_code {
            result = self.extract_and_preserve_code(&result, &mut preserved_blocks);
        }

        if self.config.preserve_markdown {
            result = self.remove_stopwords_preserving_markdown(&result);
        } else {
            result = self.remove_stopwords(&result);
        }

        result = self.restore_preserved_blocks(&result, &preserved_blocks);

        result
    }

    fn remove_stopwords_preserving_markdown(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();
        let mut processed_lines = Vec::new();

        for line in lines {
            if MARKDOWN_HEADERS_REGEX.is_match(line) {
                processed_lines.push(line.to_string());
                continue;
            }

            if MARKDOWN_LISTS_REGEX.is_match(line) {
                processed_lines.push(line.to_string());
                continue;
            }

            if line.trim().starts_with('|') && line.trim().ends_with('|') {
                processed_lines.push(line.to_string());
                continue;
            }

            let processed_line = self.remove_stopwords(line);
            processed_lines.push(processed_line);
        }

        processed_lines.join("\n")
    }

    fn remove_stopwords(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut filtered_words = Vec::with_capacity(words.len());

        for word in words {
            if word.is_empty() {
                continue;
            }

            // Check if word matches any preserve pattern
            if self.should_preserve_word(word) {
                filtered_words.push(word);
                continue;
            }

            if word.len() > 1 && word.bytes().all(|b| b.is_ascii_uppercase() || !b.is_ascii_alphabetic()) {
                filtered_words.push(word);
                continue;
            }

            if word.bytes().any(|b| b.is_ascii_digit()) {
                filtered_words.push(word);
                continue;
            }

            let clean_word = if word.is_ascii() {
                let clean_bytes: Vec<u8> = word
                    .bytes()
                    .filter(|&b| b.is_ascii_alphabetic())
                    .map(|b| b.to_ascii_lowercase())
                    .collect();
                String::from_utf8(clean_bytes).unwrap_or_else(|_| {
                    word.chars()
                        .filter(|c| c.is_alphabetic())
                        .collect::<String>()
                        .to_lowercase()
                })
            } else {
                word.chars()
                    .filter(|c| c.is_alphabetic())
                    .collect::<String>()
                    .to_lowercase()
            };

            if clean_word.is_empty() {
                filtered_words.push(word);
                continue;
            }

            if clean_word.len() <= 1 {
                filtered_words.push(word);
                continue;
            }

            if !self.stopwords.contains(&clean_word) {
                filtered_words.push(word);
            }
        }

        filtered_words.join(" ")
    }

    /// Get the language code for this filter pipeline.
    ///
    /// Primarily useful for testing and debugging to verify language configuration.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Check if a word should be preserved based on configured patterns.
    fn should_preserve_word(&self, word: &str) -> bool {
        self.preserve_patterns.iter().any(|pattern| pattern.is_match(word))
    }

    /// Split a word into prefix (non-alphanumeric), core (alphanumeric), and suffix (non-alphanumeric).
    ///
    /// This is useful for handling punctuation-wrapped words like "(hello)" or "world!".
    /// Currently used in tests; reserved for future word boundary-aware filtering.
    #[cfg_attr(not(test), allow(dead_code))]
    fn split_word_boundaries(&self, word: &str) -> (String, String, String) {
        let chars: Vec<char> = word.chars().collect();
        let mut start = 0;
        let mut end = chars.len();

        while start < chars.len() && !chars[start].is_alphanumeric() {
            start += 1;
        }

        while end > start && !chars[end - 1].is_alphanumeric() {
            end -= 1;
        }

        let prefix: String = chars[..start].iter().collect();
        let core: String = chars[start..end].iter().collect();
        let suffix: String = chars[end..].iter().collect();

        (prefix, core, suffix)
    }

    fn preserve_markdown_structure(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();
        let mut processed_lines = Vec::new();

        for line in lines {
            if MARKDOWN_HEADERS_REGEX.is_match(line) {
                processed_lines.push(line);
                continue;
            }

            if MARKDOWN_LISTS_REGEX.is_match(line) {
                processed_lines.push(line);
                continue;
            }

            processed_lines.push(line);
        }

        processed_lines.join("\n")
    }

    fn extract_and_preserve_code(&self, text: &str, preserved: &mut AHashMap<String, String>) -> String {
        let mut result = text.to_string();
        let mut code_block_id = 0;
        let mut inline_code_id = 0;

        // Extract code blocks and store in HashMap with unique placeholders
        result = MARKDOWN_CODE_BLOCK_REGEX
            .replace_all(&result, |caps: &regex::Captures| {
                let code_block = caps[0].to_string();
                let placeholder = format!("__CODEBLOCK_{}__", code_block_id);
                code_block_id += 1;
                preserved.insert(placeholder.clone(), code_block);
                placeholder
            })
            .to_string();

        // Extract inline code and store in HashMap with unique placeholders
        result = MARKDOWN_INLINE_CODE_REGEX
            .replace_all(&result, |caps: &regex::Captures| {
                let inline_code = caps[0].to_string();
                let placeholder = format!("__INLINECODE_{}__", inline_code_id);
                inline_code_id += 1;
                preserved.insert(placeholder.clone(), inline_code);
                placeholder
            })
            .to_string();

        result
    }

    fn restore_preserved_blocks(&self, text: &str, preserved: &AHashMap<String, String>) -> String {
        let mut result = text.to_string();

        // Replace all placeholders with their original content from HashMap
        for (placeholder, original_content) in preserved {
            result = result.replace(placeholder, original_content);
        }

        result
    }
}
