//! Mapping of style attributes to Markdown decoration.
//!
//! Pure functions: each takes text plus attributes and returns decorated
//! text. Block-level decisions (heading, list, small print) and inline
//! emphasis are kept separate so callers can combine them.

use crate::model::{RichText, StyleAttributes, TextSpan};

/// Minimum font size (pt) inferred as H1.
pub const H1_MIN_PT: f32 = 24.0;
/// Minimum font size (pt) inferred as H2.
pub const H2_MIN_PT: f32 = 20.0;
/// Minimum font size (pt) inferred as H3.
pub const H3_MIN_PT: f32 = 16.0;
/// Minimum font size (pt) inferred as H4.
pub const H4_MIN_PT: f32 = 14.0;
/// Maximum font size (pt) rendered as small print.
pub const SMALL_MAX_PT: f32 = 10.0;

/// What a font size suggests about a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSizeHint {
    /// Render as a heading of this level
    Heading(u8),
    /// Render as body text
    Body,
    /// Wrap in `<small>`
    Small,
}

/// Infer a block role from a font size in points.
pub fn infer_from_font_size(size_pt: f32) -> FontSizeHint {
    if size_pt >= H1_MIN_PT {
        FontSizeHint::Heading(1)
    } else if size_pt >= H2_MIN_PT {
        FontSizeHint::Heading(2)
    } else if size_pt >= H3_MIN_PT {
        FontSizeHint::Heading(3)
    } else if size_pt >= H4_MIN_PT {
        FontSizeHint::Heading(4)
    } else if size_pt > 0.0 && size_pt <= SMALL_MAX_PT {
        FontSizeHint::Small
    } else {
        FontSizeHint::Body
    }
}

/// `#` repeated `level` times plus a space; level is clamped to 1-6.
pub fn heading_prefix(level: u8) -> String {
    format!("{} ", "#".repeat(level.clamp(1, 6) as usize))
}

/// Two spaces per nesting level, then `- ` or `1. `.
pub fn list_prefix(level: u8, ordered: bool) -> String {
    let marker = if ordered { "1. " } else { "- " };
    format!("{}{}", "  ".repeat(level as usize), marker)
}

/// Wrap text in `<small>` tags.
pub fn small(text: &str) -> String {
    format!("<small>{}</small>", text)
}

/// Apply bold then italic markers.
///
/// Surrounding whitespace stays outside the markers so `** x**` never
/// appears; blank text is returned unchanged.
pub fn emphasize(text: &str, bold: bool, italic: bool) -> String {
    if !bold && !italic {
        return text.to_string();
    }

    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }

    let start = text.len() - text.trim_start().len();
    let end = start + core.len();

    let mut result = core.to_string();
    if bold {
        result = format!("**{}**", result);
    }
    if italic {
        result = format!("*{}*", result);
    }

    format!("{}{}{}", &text[..start], result, &text[end..])
}

/// Escape characters with Markdown meaning inside running text.
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// Format a link destination.
///
/// Paths containing spaces, parentheses or angle brackets are wrapped in
/// `<...>` with inner angle brackets and backslashes escaped.
pub fn link_destination(path: &str) -> String {
    let needs_brackets = path
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>'));
    if !needs_brackets {
        return path.to_string();
    }

    let mut result = String::with_capacity(path.len() + 2);
    result.push('<');
    for c in path.chars() {
        match c {
            '<' | '>' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            '\n' | '\r' => result.push(' '),
            _ => result.push(c),
        }
    }
    result.push('>');
    result
}

/// Escape a leading marker that would otherwise start a heading or list.
pub fn escape_line_start(text: &str) -> String {
    let trimmed = text.trim_start();
    let needs_escape = trimmed.starts_with('#')
        || trimmed.starts_with("- ")
        || trimmed.starts_with("+ ")
        || trimmed.starts_with('>');
    if needs_escape {
        let indent = text.len() - trimmed.len();
        format!("{}\\{}", &text[..indent], trimmed)
    } else {
        text.to_string()
    }
}

/// Wrap text in a backtick code span, widening the fence when the text
/// itself contains backticks.
pub fn code_span(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if longest_run > 0 {
        format!("{} {} {}", fence, text, fence)
    } else {
        format!("{}{}{}", fence, text, fence)
    }
}

/// Render inline text span by span.
pub fn render_rich_text(text: &RichText, escape: bool) -> String {
    text.spans
        .iter()
        .map(|span| render_span(span, escape))
        .collect()
}

fn render_span(span: &TextSpan, escape: bool) -> String {
    if span.code {
        return code_span(&span.text);
    }
    let text = if escape {
        escape_markdown(&span.text)
    } else {
        span.text.clone()
    };
    emphasize(&text, span.bold, span.italic)
}

/// Decorate rendered paragraph text according to block-level style.
///
/// An explicit heading level wins. Otherwise, when `infer` is set, the
/// font size may turn the paragraph into a heading or small print.
pub fn decorate_paragraph(text: &str, style: &StyleAttributes, infer: bool, max_level: u8) -> String {
    let text = emphasize(text, style.bold, style.italic);

    let hint = match style.heading_level {
        Some(level) => FontSizeHint::Heading(level),
        None if infer => style
            .font_size_pt
            .map(infer_from_font_size)
            .unwrap_or(FontSizeHint::Body),
        None => FontSizeHint::Body,
    };

    match hint {
        FontSizeHint::Heading(level) => {
            format!("{}{}", heading_prefix(level.min(max_level)), text.trim())
        }
        FontSizeHint::Small => small(&text),
        FontSizeHint::Body => escape_line_start(&text),
    }
}
