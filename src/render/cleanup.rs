//! Text cleanup pipeline for rendered output.
//!
//! Office and HWP text carries artifacts of its producer: decomposed
//! Hangul, private-use symbol glyphs, vertical-tab soft breaks and stray
//! replacement characters. The pipeline removes them line by line and
//! leaves Markdown table rows untouched so cell padding survives.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization only
    Minimal,
    /// Standard cleanup: NFC, control characters and blank-line limits
    #[default]
    Standard,
    /// Aggressive cleanup: also drops private-use glyphs and unifies bullets
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Standardize bullet characters (●, ○, ■ → •)
    pub standardize_bullets: bool,

    /// Remove Private Use Area (PUA) characters
    pub remove_pua: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Remove control characters other than newline and tab
    pub remove_control_chars: bool,

    /// Collapse runs of spaces inside text lines
    pub normalize_whitespace: bool,

    /// Strip trailing whitespace from every line
    pub trim_line_ends: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,

    /// Preserve YAML frontmatter during cleanup
    pub preserve_frontmatter: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            standardize_bullets: false,
            remove_pua: false,
            remove_replacement_char: false,
            remove_control_chars: false,
            normalize_whitespace: false,
            trim_line_ends: false,
            max_consecutive_newlines: 0,
            preserve_frontmatter: true,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            standardize_bullets: false,
            remove_pua: false,
            remove_replacement_char: true,
            remove_control_chars: true,
            normalize_whitespace: true,
            trim_line_ends: true,
            max_consecutive_newlines: 2,
            preserve_frontmatter: true,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            standardize_bullets: true,
            remove_pua: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

fn space_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ ]{3,}").expect("static pattern"))
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let frontmatter = if self.options.preserve_frontmatter {
            extract_frontmatter(text)
        } else {
            None
        };

        match frontmatter {
            Some((fm, content)) => format!("{}\n{}", fm, self.process_content(content)),
            None => self.process_content(text),
        }
    }

    fn process_content(&self, text: &str) -> String {
        let mut result: String = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        result = result
            .chars()
            .filter_map(|c| self.map_char(c))
            .collect();

        if self.options.normalize_whitespace || self.options.trim_line_ends {
            result = result
                .split('\n')
                .map(|line| self.clean_line(line))
                .collect::<Vec<_>>()
                .join("\n");
        }

        if self.options.max_consecutive_newlines > 0 {
            result = limit_newlines(&result, self.options.max_consecutive_newlines as usize);
        }

        result.trim().to_string()
    }

    fn map_char(&self, c: char) -> Option<char> {
        if self.options.remove_replacement_char && c == '\u{FFFD}' {
            return None;
        }
        if self.options.remove_pua && is_private_use(c) {
            return None;
        }
        if self.options.remove_control_chars && c.is_control() && c != '\n' && c != '\t' {
            // Word soft breaks and HWP line breaks arrive as VT / CR.
            return match c {
                '\u{000B}' | '\u{000C}' => Some('\n'),
                _ => None,
            };
        }
        if self.options.standardize_bullets
            && matches!(c, '●' | '○' | '■' | '□' | '◆' | '◇' | '▪' | '▫' | '►' | '▻')
        {
            return Some('•');
        }
        Some(c)
    }

    fn clean_line(&self, line: &str) -> String {
        let is_table_row = line.trim_start().starts_with('|');
        let mut line = line.to_string();

        if self.options.normalize_whitespace && !is_table_row {
            let body_start = line.len() - line.trim_start().len();
            let (indent, body) = line.split_at(body_start);
            line = format!("{}{}", indent, space_run_regex().replace_all(body, "  "));
        }
        if self.options.trim_line_ends {
            line.truncate(line.trim_end().len());
        }
        line
    }
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}

fn extract_frontmatter(text: &str) -> Option<(&str, &str)> {
    let stripped = text.strip_prefix("---\n")?;
    let end_pos = stripped.find("\n---\n")?;
    let fm_end = 4 + end_pos + 5;
    Some((&text[..fm_end], &text[fm_end..]))
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}

fn limit_newlines(text: &str, max: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut run = 0usize;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run > max {
                continue;
            }
        } else {
            run = 0;
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_normalization() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        let decomposed = "\u{1100}\u{1161}";
        assert_eq!(pipeline.process(decomposed), "\u{AC00}");
    }

    #[test]
    fn test_table_rows_untouched() {
        let pipeline = CleanupPipeline::default();
        let text = "| L |     C      |\n|:--- |:---: |\nwide     gap";
        let result = pipeline.process(text);
        assert!(result.contains("| L |     C      |"));
        assert!(result.ends_with("wide  gap"));
    }

    #[test]
    fn test_list_indentation_preserved() {
        let pipeline = CleanupPipeline::default();
        let text = "- a\n    1. nested   item";
        assert_eq!(pipeline.process(text), "- a\n    1. nested  item");
    }

    #[test]
    fn test_newline_limit() {
        let pipeline = CleanupPipeline::default();
        assert_eq!(pipeline.process("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_control_and_replacement_chars() {
        let pipeline = CleanupPipeline::default();
        assert_eq!(pipeline.process("Hello\u{FFFD}World\u{0007}"), "HelloWorld");
        assert_eq!(pipeline.process("line\u{000B}break"), "line\nbreak");
    }

    #[test]
    fn test_aggressive_bullets_and_pua() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Aggressive);
        let result = pipeline.process("● Item\u{F0A7} 1\n○ Item 2");
        assert_eq!(result, "• Item 1\n• Item 2");
    }

    #[test]
    fn test_frontmatter_preservation() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Aggressive);
        let text = "---\ntitle: Test\n---\n\nContent with   extra   spaces.";
        let result = pipeline.process(text);
        assert!(result.starts_with("---\ntitle: Test\n---\n"));
        assert!(result.ends_with("Content with  extra  spaces."));
    }
}
