//! Paragraph to block conversion shared by the word, slide and HWP builders.

use crate::model::{Block, RichText, StyleAttributes, TextSpan};
use crate::source::{SourceParagraph, SourceRun};

/// Deepest outline level that still maps to a heading (zero-based).
const MAX_OUTLINE_LEVEL: u8 = 8;

/// Heading level implied by a paragraph style name.
///
/// Recognizes "Heading N" / "HeadingN", "Title", "Subtitle" and the
/// Korean "제목 N" / "개요 N" styles. Levels beyond 6 are clamped.
pub fn heading_from_style(name: &str) -> Option<u8> {
    let lower = name.trim().to_lowercase();
    match lower.as_str() {
        "title" => return Some(1),
        "subtitle" => return Some(2),
        _ => {}
    }

    ["heading", "제목", "개요"].iter().find_map(|prefix| {
        let rest = lower.strip_prefix(prefix)?;
        let level: u8 = rest.trim_start_matches([' ', '_', '-']).trim().parse().ok()?;
        (1..=9).contains(&level).then(|| level.min(6))
    })
}

/// Convert a source paragraph to a block.
///
/// Returns `None` for paragraphs without visible text. An explicit heading
/// level wins; with `infer_headings` the outline level and then the style
/// name are consulted. List membership turns the paragraph into a list
/// item. Font size is kept on the style and interpreted at render time.
pub fn paragraph_block(para: &SourceParagraph, infer_headings: bool) -> Option<Block> {
    let runs = para.effective_runs();
    let text = rich_text(&runs);
    if text.plain_text().trim().is_empty() {
        return None;
    }

    if let Some(level) = heading_level(para, infer_headings) {
        log::trace!("paragraph promoted to H{}", level);
        return Some(Block::heading(level, text.plain_text().trim()));
    }

    let mut style = StyleAttributes::new().with_alignment(para.alignment);
    style.font_size_pt = dominant_font_size(&runs);

    if let Some(list) = para.list {
        style.list_level = Some(list.level);
        style.ordered = Some(list.ordered);
        return Some(Block::ListItem {
            text,
            level: list.level,
            ordered: list.ordered,
            style,
        });
    }

    Some(Block::styled_paragraph(text, style))
}

fn heading_level(para: &SourceParagraph, infer: bool) -> Option<u8> {
    if let Some(level) = para.heading_level {
        return Some(level.clamp(1, 6));
    }
    if !infer {
        return None;
    }
    para.outline_level
        .filter(|level| *level <= MAX_OUTLINE_LEVEL)
        .map(|level| (level + 1).min(6))
        .or_else(|| para.style_name.as_deref().and_then(heading_from_style))
}

fn rich_text(runs: &[SourceRun]) -> RichText {
    let mut text = RichText::new();
    for run in runs.iter().filter(|r| !r.text.is_empty()) {
        text.push(TextSpan::styled(run.text.clone(), run.bold, run.italic));
    }
    text
}

/// Font size weighted by the visible length of each run.
fn dominant_font_size(runs: &[SourceRun]) -> Option<f32> {
    let (weighted, total) = runs
        .iter()
        .filter_map(|run| {
            let size = run.font_size.filter(|s| *s > 0.0)?;
            let len = run.text.trim().chars().count();
            (len > 0).then_some((size, len))
        })
        .fold((0.0f32, 0usize), |(sum, count), (size, len)| {
            (sum + size * len as f32, count + len)
        });

    (total > 0).then(|| weighted / total as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_from_style() {
        assert_eq!(heading_from_style("Heading 2"), Some(2));
        assert_eq!(heading_from_style("heading3"), Some(3));
        assert_eq!(heading_from_style("Title"), Some(1));
        assert_eq!(heading_from_style("Subtitle"), Some(2));
        assert_eq!(heading_from_style("개요 1"), Some(1));
        assert_eq!(heading_from_style("제목 9"), Some(6));
        assert_eq!(heading_from_style("Normal"), None);
        assert_eq!(heading_from_style("Heading"), None);
    }

    #[test]
    fn test_blank_paragraph_skipped() {
        assert!(paragraph_block(&SourceParagraph::plain("   "), true).is_none());
        assert!(paragraph_block(&SourceParagraph::default(), true).is_none());
    }

    #[test]
    fn test_style_name_heading() {
        let para = SourceParagraph::plain(" Overview ").with_style("Heading 2");
        assert_eq!(paragraph_block(&para, true), Some(Block::heading(2, "Overview")));

        match paragraph_block(&para, false) {
            Some(Block::Paragraph { .. }) => {}
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_outline_level_heading() {
        let para = SourceParagraph {
            outline_level: Some(0),
            ..SourceParagraph::plain("1. 개요")
        };
        assert_eq!(paragraph_block(&para, true), Some(Block::heading(1, "1. 개요")));

        let body = SourceParagraph {
            outline_level: Some(9),
            ..SourceParagraph::plain("body")
        };
        assert!(matches!(paragraph_block(&body, true), Some(Block::Paragraph { .. })));
    }

    #[test]
    fn test_list_item() {
        let para = SourceParagraph::plain("step").with_list(1, true);
        match paragraph_block(&para, true) {
            Some(Block::ListItem { level, ordered, text, .. }) => {
                assert_eq!(level, 1);
                assert!(ordered);
                assert_eq!(text.plain_text(), "step");
            }
            other => panic!("expected list item, got {:?}", other),
        }
    }

    #[test]
    fn test_runs_keep_emphasis_and_size() {
        let para = SourceParagraph::from_runs(vec![
            SourceRun::new("Big ").sized(28.0),
            SourceRun::new("words").bold().sized(28.0),
            SourceRun::new("x").sized(10.0),
        ]);
        match paragraph_block(&para, true) {
            Some(Block::Paragraph { text, style }) => {
                assert_eq!(text.spans.len(), 3);
                assert!(text.spans[1].bold);
                let size = style.font_size_pt.unwrap();
                assert!(size > 24.0 && size < 28.0);
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_dominant_font_size_ignores_blank_runs() {
        let runs = vec![SourceRun::new("  ").sized(40.0), SourceRun::new("ab").sized(12.0)];
        assert_eq!(dominant_font_size(&runs), Some(12.0));
        assert_eq!(dominant_font_size(&[SourceRun::new("plain")]), None);
    }
}
