//! OWPML (HWPX) builder.

use super::image::image_block;
use super::paragraph::paragraph_block;
use super::table::table_model;
use super::BuildContext;
use crate::error::Result;
use crate::model::{Block, RichText, Section, TextSpan};
use crate::source::{HwpElement, HwpSection};

/// Build one unlabeled section per OWPML section part.
pub(crate) fn build_sections(sections: &[HwpSection], ctx: &mut BuildContext<'_>) -> Result<Vec<Section>> {
    sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            log::trace!("hwp section {}: {} element(s)", index, section.elements.len());
            build_section(section, ctx)
        })
        .collect()
}

fn build_section(section: &HwpSection, ctx: &mut BuildContext<'_>) -> Result<Section> {
    let mut blocks = Vec::with_capacity(section.elements.len());

    for element in &section.elements {
        match element {
            HwpElement::Paragraph(para) => {
                blocks.extend(paragraph_block(para, ctx.options.infer_headings));
            }
            HwpElement::Table { rows } => {
                let table = table_model(rows.as_deref())?;
                if !table.is_empty() {
                    blocks.push(Block::table(table));
                }
            }
            HwpElement::Picture(image) => blocks.push(image_block(image, ctx)),
            HwpElement::Equation { script } => {
                if !script.trim().is_empty() {
                    let mut text = RichText::new();
                    text.push(TextSpan::code(script.trim()));
                    blocks.push(Block::paragraph(text));
                }
            }
            HwpElement::Chart { chart } => blocks.push(Block::chart(chart.clone())),
        }
    }

    Ok(Section::unlabeled(blocks))
}
