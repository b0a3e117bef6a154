//! Plain-text normalizer for the OCR `text` output format.
//!
//! Tesseract's raw `get_utf8_text()` output carries artifacts that are
//! specific to how glyphs get misread in isolation: stray bullet glyphs,
//! short runs of punctuation/digit "stub" lines left over from diagram
//! legends or rulers, and lines Tesseract emits twice when a scan line is
//! recognized on consecutive passes. This pass cleans those up without
//! touching numeric content that belongs to the sentence flow.

/// A line is a removable "stub" only when every character is non-alphabetic
/// and the line is short. A single stub surrounded by ordinary text is left
/// alone; only a run of two or more consecutive stub lines is dropped.
fn is_stub_line(trimmed: &str) -> bool {
    !trimmed.is_empty() && trimmed.chars().count() <= 3 && !trimmed.chars().any(|c| c.is_alphabetic())
}

fn convert_bullet(line: &str) -> String {
    let trimmed_start = line.trim_start();
    if let Some(rest) = trimmed_start.strip_prefix('\u{2022}') {
        let indent_len = line.len() - trimmed_start.len();
        format!("{}-{}", &line[..indent_len], rest)
    } else {
        line.to_string()
    }
}

/// Normalizes OCR plain-text output: converts bullet glyphs to `-`, drops
/// runs of short garbage lines while preserving isolated numeric/short
/// stubs that appear in normal sentence flow, and collapses immediate
/// case-insensitive duplicate lines.
pub fn normalize_plain_text(text: &str) -> String {
    let lines: Vec<String> = text.lines().map(convert_bullet).collect();

    let stub_flags: Vec<bool> = lines.iter().map(|l| is_stub_line(l.trim())).collect();

    let mut keep = vec![true; lines.len()];
    let mut i = 0;
    while i < stub_flags.len() {
        if stub_flags[i] {
            let start = i;
            while i < stub_flags.len() && stub_flags[i] {
                i += 1;
            }
            if i - start >= 2 {
                for flag in keep.iter_mut().take(i).skip(start) {
                    *flag = false;
                }
            }
        } else {
            i += 1;
        }
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut last_kept_lower: Option<String> = None;
    for (idx, line) in lines.iter().enumerate() {
        if !keep[idx] {
            continue;
        }
        let normalized = line.trim().to_lowercase();
        if let Some(prev) = &last_kept_lower {
            if *prev == normalized {
                continue;
            }
        }
        last_kept_lower = Some(normalized);
        result.push(line.clone());
    }

    result.join("\n")
}
