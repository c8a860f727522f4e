//! Per-render counters.

/// Mutable state of one rendering pass.
///
/// Start a fresh session per document, or with a chart offset when a
/// section is rendered on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSession {
    charts: u32,
    tables: u32,
    images: u32,
}

impl RenderSession {
    /// Create a session with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session whose first chart is numbered `offset + 1`.
    pub fn with_chart_offset(offset: u32) -> Self {
        Self {
            charts: offset,
            ..Self::default()
        }
    }

    /// Advance the chart counter and return the new ordinal (1-based).
    pub fn next_chart(&mut self) -> u32 {
        self.charts += 1;
        self.charts
    }

    /// Advance the table counter and return the new ordinal (1-based).
    pub fn next_table(&mut self) -> u32 {
        self.tables += 1;
        self.tables
    }

    /// Advance the image counter and return the new ordinal (1-based).
    pub fn next_image(&mut self) -> u32 {
        self.images += 1;
        self.images
    }

    /// Charts numbered so far, including the offset.
    pub fn charts(&self) -> u32 {
        self.charts
    }

    /// Tables rendered so far.
    pub fn tables(&self) -> u32 {
        self.tables
    }

    /// Images rendered so far.
    pub fn images(&self) -> u32 {
        self.images
    }

    /// Reset every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_numbering() {
        let mut session = RenderSession::new();
        assert_eq!(session.next_chart(), 1);
        assert_eq!(session.next_chart(), 2);
        assert_eq!(session.charts(), 2);

        session.reset();
        assert_eq!(session.next_chart(), 1);
    }

    #[test]
    fn test_offset_session() {
        let mut session = RenderSession::with_chart_offset(4);
        assert_eq!(session.next_chart(), 5);
        assert_eq!(session.next_table(), 1);
        assert_eq!(session.images(), 0);
    }
}
