//! Word-processing builder.

use super::image::image_block;
use super::paragraph::paragraph_block;
use super::table::table_model;
use super::BuildContext;
use crate::error::Result;
use crate::model::{Block, Section};
use crate::source::WordElement;

/// Build the single flowing section of a word-processing document.
pub(crate) fn build_word(elements: &[WordElement], ctx: &mut BuildContext<'_>) -> Result<Section> {
    let mut blocks = Vec::with_capacity(elements.len());

    for element in elements {
        match element {
            WordElement::Paragraph(para) => {
                blocks.extend(paragraph_block(para, ctx.options.infer_headings));
            }
            WordElement::Table { rows } => {
                let table = table_model(rows.as_deref())?;
                if !table.is_empty() {
                    blocks.push(Block::table(table));
                }
            }
            WordElement::Image(image) => blocks.push(image_block(image, ctx)),
            WordElement::Chart { chart } => blocks.push(Block::chart(chart.clone())),
            WordElement::Divider => blocks.push(Block::Divider),
            WordElement::PageBreak => log::trace!("page break ignored in flowing output"),
        }
    }

    Ok(Section::unlabeled(blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildOptions;
    use crate::model::{ChartModel, ChartType};
    use crate::source::{ImageTable, SourceImage, SourceParagraph, SourceRow};

    fn build(elements: Vec<WordElement>) -> Result<Section> {
        let options = BuildOptions::default();
        let media = ImageTable::new().with("rId3", "img/image1.png");
        let mut ctx = BuildContext::new(&options, &media);
        build_word(&elements, &mut ctx)
    }

    #[test]
    fn test_document_order_preserved() {
        let section = build(vec![
            WordElement::Paragraph(SourceParagraph::plain("Report").with_style("Title")),
            WordElement::Paragraph(SourceParagraph::plain("Intro")),
            WordElement::PageBreak,
            WordElement::Table {
                rows: Some(vec![SourceRow::from_strings(["A", "B"])]),
            },
            WordElement::Image(SourceImage::new("rId3")),
            WordElement::Chart {
                chart: ChartModel::new(ChartType::Bar, "Sales"),
            },
            WordElement::Divider,
        ])
        .unwrap();

        assert!(section.label.is_none());
        assert_eq!(section.blocks.len(), 6);
        assert_eq!(section.blocks[0], Block::heading(1, "Report"));
        assert!(section.blocks[2].is_table());
        assert_eq!(
            section.blocks[3],
            Block::image(Some("img/image1.png".to_string()), "rId3", "")
        );
        assert_eq!(section.blocks[5], Block::Divider);
    }

    #[test]
    fn test_table_without_rows_fails() {
        let result = build(vec![WordElement::Table { rows: None }]);
        assert!(matches!(result, Err(crate::Error::Structure(_))));
    }
}
