//! Presentation builder.
//!
//! Slide shapes carry absolute positions but no reading order. Shapes are
//! converted to blocks first; a layout strategy chain then arranges them:
//! `clustered-layout` groups shapes into rows (multi-shape rows become
//! [`Block::Columns`]), `reading-order` falls back to a plain positional
//! sort. Strict builds run the clustered layout alone.

use super::image::image_block;
use super::paragraph::paragraph_block;
use super::table::table_model;
use super::BuildContext;
use crate::error::{Error, Result};
use crate::layout::{sort_by_position, PositionalClusterer};
use crate::model::{Block, Position, Section, SectionKind};
use crate::source::{ShapeContent, SlideShape, SlideSource};
use crate::strategy::StrategyChain;

/// Heading level of a slide title shape (the slide label is H2).
pub const TITLE_HEADING_LEVEL: u8 = 3;

type Placed = (Option<Position>, Vec<Block>);

/// Build one section per slide, in presentation order.
pub(crate) fn build_slides(slides: &[SlideSource], ctx: &mut BuildContext<'_>) -> Result<Vec<Section>> {
    slides
        .iter()
        .enumerate()
        .map(|(index, slide)| build_slide(slide, index, ctx))
        .collect()
}

fn build_slide(slide: &SlideSource, index: usize, ctx: &mut BuildContext<'_>) -> Result<Section> {
    let number = if slide.number > 0 {
        slide.number as usize
    } else {
        index + 1
    };

    let mut flat = Vec::new();
    flatten(&slide.shapes, None, &mut flat);

    let mut placed: Vec<Placed> = Vec::with_capacity(flat.len());
    for (position, content) in flat {
        let blocks = shape_blocks(content, ctx)?;
        if !blocks.is_empty() {
            placed.push((position, blocks));
        }
    }

    let blocks = arrange(&placed, number, ctx)?;
    Ok(Section::new(format!("Slide {}", number), SectionKind::Slide, blocks)
        .with_notes(slide.notes.clone()))
}

/// Flatten group shapes; children without a position inherit the group's.
fn flatten<'s>(
    shapes: &'s [SlideShape],
    inherited: Option<Position>,
    out: &mut Vec<(Option<Position>, &'s ShapeContent)>,
) {
    for shape in shapes {
        let position = shape.position.or(inherited);
        match &shape.content {
            ShapeContent::Group { shapes } => flatten(shapes, position, out),
            content => out.push((position, content)),
        }
    }
}

fn shape_blocks(content: &ShapeContent, ctx: &mut BuildContext<'_>) -> Result<Vec<Block>> {
    let blocks = match content {
        ShapeContent::Title { text } if text.trim().is_empty() => vec![],
        ShapeContent::Title { text } => vec![Block::heading(TITLE_HEADING_LEVEL, text.trim())],
        ShapeContent::TextBox { paragraphs } => paragraphs
            .iter()
            .filter_map(|p| paragraph_block(p, ctx.options.infer_headings))
            .collect(),
        ShapeContent::Table { rows } => {
            let table = table_model(rows.as_deref())?;
            if table.is_empty() {
                vec![]
            } else {
                vec![Block::table(table)]
            }
        }
        ShapeContent::Picture(image) => vec![image_block(image, ctx)],
        ShapeContent::Chart { chart } => vec![Block::chart(chart.clone())],
        ShapeContent::Group { .. } => vec![],
    };
    Ok(blocks)
}

fn arrange(placed: &[Placed], number: usize, ctx: &BuildContext<'_>) -> Result<Vec<Block>> {
    let clusterer = PositionalClusterer::new(ctx.options.layout);

    let mut chain = StrategyChain::<[Placed], Vec<Block>>::new(format!("slide {} layout", number))
        .with_fn("clustered-layout", |items: &[Placed]| clustered(&clusterer, items));
    if !ctx.options.strict {
        chain = chain.with_fn("reading-order", |items: &[Placed]| Ok(reading_order(items)));
    }

    Ok(chain.run(placed)?.value)
}

fn clustered(clusterer: &PositionalClusterer, items: &[Placed]) -> Result<Vec<Block>> {
    if items.is_empty() {
        return Ok(vec![]);
    }
    if !PositionalClusterer::has_positions(items) {
        return Err(Error::Other("no shape carries a position".to_string()));
    }

    let mut blocks = Vec::new();
    for row in clusterer.cluster(items.to_vec()) {
        if row.len() == 1 {
            blocks.extend(row.into_iter().flat_map(|(_, b)| b));
        } else {
            log::trace!("layout row with {} columns", row.len());
            blocks.push(Block::columns(row.into_iter().map(|(_, b)| b).collect()));
        }
    }
    Ok(blocks)
}

fn reading_order(items: &[Placed]) -> Vec<Block> {
    let mut items = items.to_vec();
    sort_by_position(&mut items);
    items.into_iter().flat_map(|(_, b)| b).collect()
}
