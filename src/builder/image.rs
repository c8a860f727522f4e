//! Image reference resolution.

use super::BuildContext;
use crate::error::{Error, Result};
use crate::model::Block;
use crate::source::{ImageResolver, SourceImage};
use crate::strategy::{Resolved, StrategyChain};

/// Resolve an image reference to an extracted file path.
///
/// Strategies run in order: `by-id` (in-document identifier),
/// `by-file-name` (file name of the target part) and `sequential` (the
/// `ordinal`-th extracted image, for readers that lose identifiers).
pub fn resolve_image(
    image: &SourceImage,
    resolver: &dyn ImageResolver,
    ordinal: usize,
) -> Result<Resolved<String>> {
    StrategyChain::<SourceImage, String>::new(format!("image '{}'", image.id))
        .with_fn("by-id", |img: &SourceImage| {
            if img.id.is_empty() {
                return Err(Error::Other("no identifier".to_string()));
            }
            resolver
                .resolve(&img.id)
                .ok_or_else(|| Error::Other("identifier not in media table".to_string()))
        })
        .with_fn("by-file-name", |img: &SourceImage| {
            let name = img
                .file_name()
                .ok_or_else(|| Error::Other("no target part".to_string()))?;
            resolver
                .resolve_file_name(name)
                .ok_or_else(|| Error::Other(format!("no media named {}", name)))
        })
        .with_fn("sequential", move |_: &SourceImage| {
            resolver
                .resolve_nth(ordinal)
                .ok_or_else(|| Error::Other(format!("no media at position {}", ordinal)))
        })
        .run(image)
}

/// Build an image block, degrading to an unresolved reference on failure.
pub(crate) fn image_block(image: &SourceImage, ctx: &mut BuildContext<'_>) -> Block {
    let ordinal = ctx.next_image_ordinal();
    let alt = image.alt.clone().unwrap_or_default();

    match resolve_image(image, ctx.images, ordinal) {
        Ok(resolved) => Block::image(Some(resolved.value), image.id.clone(), alt),
        Err(e) => {
            log::warn!("{}; rendering placeholder", e);
            Block::image(None, image.id.clone(), alt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildOptions;
    use crate::source::ImageTable;

    fn media() -> ImageTable {
        ImageTable::new()
            .with("rId2", "out/image1.png")
            .with("rId5", "out/image2.jpeg")
    }

    #[test]
    fn test_resolve_by_id() {
        let resolved = resolve_image(&SourceImage::new("rId5"), &media(), 0).unwrap();
        assert_eq!(resolved.value, "out/image2.jpeg");
        assert_eq!(resolved.strategy, "by-id");
    }

    #[test]
    fn test_resolve_by_file_name() {
        let image = SourceImage::new("rId99").with_target("media/IMAGE2.JPEG");
        let resolved = resolve_image(&image, &media(), 0).unwrap();
        assert_eq!(resolved.value, "out/image2.jpeg");
        assert_eq!(resolved.strategy, "by-file-name");
    }

    #[test]
    fn test_resolve_sequential() {
        let resolved = resolve_image(&SourceImage::new(""), &media(), 1).unwrap();
        assert_eq!(resolved.value, "out/image2.jpeg");
        assert_eq!(resolved.index, 2);
    }

    #[test]
    fn test_unresolved_reports_every_attempt() {
        let err = resolve_image(&SourceImage::new("rId7"), &ImageTable::new(), 0).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("by-id"));
        assert!(message.contains("by-file-name"));
        assert!(message.contains("sequential"));
    }

    #[test]
    fn test_image_block_placeholder() {
        let options = BuildOptions::default();
        let table = ImageTable::new();
        let mut ctx = BuildContext::new(&options, &table);
        let block = image_block(&SourceImage::new("rId7").with_alt("logo"), &mut ctx);
        assert_eq!(block, Block::image(None, "rId7", "logo"));
    }
}
