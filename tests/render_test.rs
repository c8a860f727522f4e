//! End-to-end tests: element streams rendered to Markdown.

use unoffice::render::{self, IMAGE_NOT_FOUND, NO_CONTENT};
use unoffice::{
    load_json, CleanupPreset, Error, JsonFormat, RenderOptions, SectionSelection, SourceDocument,
    TableOptions, Unoffice,
};

const REPORT: &str = r#"{
    "metadata": {"title": "Quarterly \"Report\"", "author": "Kim"},
    "body": {"format": "word", "elements": [
        {"element": "paragraph", "style_name": "Title", "runs": [{"text": "Quarterly Report"}]},
        {"element": "paragraph", "runs": [{"text": "Revenue grew."}]},
        {"element": "table", "rows": [
            {"cells": [{"text": "A"}, {"text": "B"}]},
            {"cells": [{"text": "1"}, {"text": "2"}]}
        ]},
        {"element": "chart", "chart": {
            "type": "pie", "title": "Share",
            "categories": ["Q1", "Q2"],
            "series": [{"name": "Sales", "values": [25, 75]}]
        }},
        {"element": "page_break"},
        {"element": "image", "id": "rId3", "alt": "Logo"},
        {"element": "image", "id": "rId7"}
    ]},
    "images": [{"id": "rId3", "path": "media/image1.png"}]
}"#;

const DECK: &str = r#"{
    "body": {"format": "presentation", "slides": [
        {"number": 1, "shapes": [
            {"position": {"x": 4000, "y": 1500}, "content": {"element": "text_box", "paragraphs": [{"runs": [{"text": "Right"}]}]}},
            {"position": {"x": 0, "y": 0}, "content": {"element": "title", "text": "Agenda"}},
            {"position": {"x": 100, "y": 1500}, "content": {"element": "text_box", "paragraphs": [{"runs": [{"text": "Left"}]}]}}
        ]},
        {"number": 2, "shapes": []},
        {"number": 3, "shapes": [
            {"position": {"x": 0, "y": 0}, "content": {"element": "chart", "chart": {
                "type": "bar", "categories": ["Mon"], "series": [{"name": "Visits", "values": [3]}]
            }}}
        ]}
    ]}
}"#;

#[test]
fn test_word_table_markdown() {
    let doc = load_json(REPORT).unwrap();
    let md = render::to_markdown(&doc, &RenderOptions::default()).unwrap();

    assert!(md.starts_with("# Quarterly Report\n\nRevenue grew.\n\n"));
    assert!(md.contains("| A | B |\n|:--- |:--- |\n| 1 | 2 |\n"));
}

#[test]
fn test_pie_chart_rows() {
    let doc = load_json(REPORT).unwrap();
    let md = render::to_markdown(&doc, &RenderOptions::default()).unwrap();

    assert!(md.contains("#### Chart 1: Share\n\n| Category | Value | Percentage |"));
    assert!(md.contains("| Q1 | 25 | 25.0% |"));
    assert!(md.contains("| Q2 | 75 | 75.0% |"));
}

#[test]
fn test_uneven_pie_percentages_sum_to_hundred() {
    let doc = load_json(
        r#"{"body": {"format": "word", "elements": [
            {"element": "chart", "chart": {
                "type": "pie", "title": "Mix",
                "categories": ["a", "b", "c", "d"],
                "series": [{"name": "n", "values": [1, 2, 3, 4.5]}]
            }}
        ]}}"#,
    )
    .unwrap();
    let md = render::to_markdown(&doc, &RenderOptions::default()).unwrap();

    let shares: Vec<f64> = md
        .lines()
        .filter_map(|line| line.trim_end_matches(" |").rsplit("| ").next())
        .filter_map(|cell| cell.strip_suffix('%'))
        .map(|cell| cell.parse().unwrap())
        .collect();
    assert_eq!(shares.len(), 4);
    let sum: f64 = shares.iter().sum();
    assert!((sum - 100.0).abs() <= 0.1, "shares {:?}", shares);
}

#[test]
fn test_images_resolved_and_missing() {
    let doc = load_json(REPORT).unwrap();
    let md = render::to_markdown(&doc, &RenderOptions::default()).unwrap();

    assert!(md.contains("![Logo](media/image1.png)"));
    assert!(md.ends_with(&format!("*[{}: rId7]*", IMAGE_NOT_FOUND)));
}

#[test]
fn test_image_prefix() {
    let source = SourceDocument::from_json(REPORT).unwrap();
    let md = Unoffice::new()
        .with_image_prefix("./out/")
        .build(&source)
        .unwrap()
        .to_markdown()
        .unwrap();

    assert!(md.contains("![Logo](./out/media/image1.png)"));
}

#[test]
fn test_frontmatter() {
    let doc = load_json(REPORT).unwrap();
    let options = RenderOptions::default().with_frontmatter(true);
    let md = render::to_markdown(&doc, &options).unwrap();

    assert!(md.starts_with("---\ntitle: \"Quarterly \\\"Report\\\"\"\nauthor: \"Kim\"\n"));
    assert!(md.contains("format: word\n"));
}

#[test]
fn test_slide_columns_and_empty_slide() {
    let doc = load_json(DECK).unwrap();
    let md = render::to_markdown(&doc, &RenderOptions::default()).unwrap();

    assert!(md.starts_with("## Slide 1\n\n### Agenda\n\n"));
    assert!(md.contains("| Column 1 | Column 2 |\n|:--- |:--- |\n| Left | Right |\n"));
    assert!(md.contains(&format!("## Slide 2\n\n{}\n\n## Slide 3", NO_CONTENT)));
    assert!(md.contains("#### Chart 1: Bar Chart"));
    assert!(md.contains("| Mon | 3 |"));
}

#[test]
fn test_section_selection() {
    let doc = load_json(DECK).unwrap();

    let options = RenderOptions::default().with_sections(SectionSelection::parse("3").unwrap());
    let md = render::to_markdown(&doc, &options).unwrap();
    assert!(md.starts_with("## Slide 3"));
    assert!(!md.contains("Agenda"));

    let options = RenderOptions::default().with_sections(SectionSelection::parse("9").unwrap());
    let err = render::to_markdown(&doc, &options).unwrap_err();
    assert!(matches!(err, Error::SectionOutOfRange(9, 3)));
}

#[test]
fn test_rendering_is_idempotent() {
    let source = SourceDocument::from_json(DECK).unwrap();
    let result = Unoffice::new()
        .with_cleanup(CleanupPreset::Aggressive)
        .build(&source)
        .unwrap();

    let first = result.to_markdown().unwrap();
    let second = result.to_markdown().unwrap();
    assert_eq!(first, second);

    let rebuilt = Unoffice::new()
        .with_cleanup(CleanupPreset::Aggressive)
        .sequential()
        .build(&source)
        .unwrap()
        .to_markdown()
        .unwrap();
    assert_eq!(first, rebuilt);
}

#[test]
fn test_borderless_tables() {
    let doc = load_json(REPORT).unwrap();
    let options = RenderOptions::default().with_table_options(TableOptions::new().with_borders(false));
    let md = render::to_markdown(&doc, &options).unwrap();

    assert!(md.contains("A | B\n:--- | :---\n1 | 2\n"));
}

#[test]
fn test_text_and_json_outputs() {
    let doc = load_json(REPORT).unwrap();

    let text = render::to_text(&doc, &RenderOptions::default()).unwrap();
    assert!(text.starts_with("Quarterly Report\n\nRevenue grew."));
    assert!(!text.contains('#'));

    let json = render::to_json(&doc, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["metadata"]["title"], "Quarterly \"Report\"");
    assert_eq!(value["sections"][0]["blocks"][0]["kind"], "heading");
}

#[test]
fn test_equation_renders_as_code() {
    let doc = load_json(
        r#"{"body": {"format": "hwp", "sections": [
            {"elements": [
                {"element": "paragraph", "text": "Area:"},
                {"element": "equation", "script": " a over b "}
            ]}
        ]}}"#,
    )
    .unwrap();
    let md = render::to_markdown(&doc, &RenderOptions::default()).unwrap();

    assert_eq!(md, "Area:\n\n`a over b`");
}
