//! Rendering options and configuration.

use super::CleanupOptions;
use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Options for rendering a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Table rendering options
    pub table: TableOptions,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Emit `## Slide n` / `### Sheet` headings for labeled sections
    pub section_headers: bool,

    /// Infer headings and small print from font size
    pub infer_headings: bool,

    /// Escape special Markdown characters in paragraph text
    pub escape_special_chars: bool,

    /// Render speaker notes as a quote after the slide content
    pub include_notes: bool,

    /// Prefix for image paths in output (e.g., "./images/")
    pub image_path_prefix: String,

    /// Section selection
    pub sections: SectionSelection,

    /// Text cleanup options
    pub cleanup: Option<CleanupOptions>,

    /// Render sections on the rayon thread pool
    pub parallel: bool,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set table options.
    pub fn with_table_options(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable section headings.
    pub fn with_section_headers(mut self, enabled: bool) -> Self {
        self.section_headers = enabled;
        self
    }

    /// Enable or disable font-size heading inference.
    pub fn with_heading_inference(mut self, enabled: bool) -> Self {
        self.infer_headings = enabled;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, enabled: bool) -> Self {
        self.escape_special_chars = enabled;
        self
    }

    /// Enable or disable speaker notes.
    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }

    /// Set the image path prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_path_prefix = prefix.into();
        self
    }

    /// Set section selection.
    pub fn with_sections(mut self, selection: SectionSelection) -> Self {
        self.sections = selection;
        self
    }

    /// Set a specific section range.
    pub fn with_section_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.sections = SectionSelection::Range(range);
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: super::CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Enable or disable parallel section rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: false,
            table: TableOptions::default(),
            max_heading_level: 6,
            section_headers: true,
            infer_headings: true,
            escape_special_chars: true,
            include_notes: false,
            image_path_prefix: String::new(),
            sections: SectionSelection::All,
            cleanup: None,
            parallel: true,
            collect_stats: false,
        }
    }
}

/// Options for Markdown table output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Encode column alignment in the separator row and pad cells
    pub preserve_alignment: bool,

    /// Emit leading and trailing pipes
    pub show_borders: bool,

    /// Append cell background colors as HTML comments
    pub preserve_colors: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            preserve_alignment: true,
            show_borders: true,
            preserve_colors: false,
        }
    }
}

impl TableOptions {
    /// Create default table options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable alignment.
    pub fn with_alignment(mut self, preserve: bool) -> Self {
        self.preserve_alignment = preserve;
        self
    }

    /// Enable or disable outer pipes.
    pub fn with_borders(mut self, show: bool) -> Self {
        self.show_borders = show;
        self
    }

    /// Enable or disable background color comments.
    pub fn with_colors(mut self, preserve: bool) -> Self {
        self.preserve_colors = preserve;
        self
    }
}

/// Section selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SectionSelection {
    /// Render all sections
    #[default]
    All,
    /// Render a range of sections (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific sections (1-indexed)
    Sections(Vec<u32>),
}

impl SectionSelection {
    /// Check if a section number should be included.
    pub fn includes(&self, section: u32) -> bool {
        match self {
            SectionSelection::All => true,
            SectionSelection::Range(range) => range.contains(&section),
            SectionSelection::Sections(sections) => sections.contains(&section),
        }
    }

    /// Parse a selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(SectionSelection::All);
        }

        let invalid = || Error::InvalidSectionRange(s.to_string());

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| invalid())?;
                let end: u32 = end.trim().parse().map_err(|_| invalid())?;
                if start == 0 || start > end {
                    return Err(invalid());
                }
                return Ok(SectionSelection::Range(start..=end));
            }
        }

        let mut sections = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| invalid())?;
                let end: u32 = end.trim().parse().map_err(|_| invalid())?;
                if start == 0 || start > end {
                    return Err(invalid());
                }
                for n in start..=end {
                    if !sections.contains(&n) {
                        sections.push(n);
                    }
                }
            } else {
                let n: u32 = part.parse().map_err(|_| invalid())?;
                if n == 0 {
                    return Err(invalid());
                }
                if !sections.contains(&n) {
                    sections.push(n);
                }
            }
        }

        sections.sort_unstable();
        Ok(SectionSelection::Sections(sections))
    }

    /// Check that every explicitly requested section exists.
    pub fn validate(&self, section_count: u32) -> Result<()> {
        let highest = match self {
            SectionSelection::All => return Ok(()),
            SectionSelection::Range(range) => *range.start(),
            SectionSelection::Sections(sections) => sections.iter().copied().max().unwrap_or(0),
        };
        if highest > section_count {
            return Err(Error::SectionOutOfRange(highest, section_count));
        }
        Ok(())
    }
}
