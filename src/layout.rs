//! Positional clustering of free-floating elements.
//!
//! Slide shapes and sheet drawings carry absolute coordinates but no
//! reading order. The clusterer sorts them top-to-bottom, left-to-right and
//! groups elements sharing roughly the same vertical offset into rows, so a
//! row with several members can be rendered as side-by-side columns.

use crate::model::Position;
use serde::{Deserialize, Serialize};

/// Default vertical tolerance for row grouping.
///
/// The value is applied to raw coordinates. In EMU (914400 per inch) it is
/// far below visual resolution, so slide shapes only share a row when their
/// offsets are practically identical; tune [`LayoutOptions::row_tolerance`]
/// for looser grouping.
pub const ROW_TOLERANCE: i64 = 50;

/// Options for positional clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Maximum vertical distance between consecutive elements of one row
    pub row_tolerance: i64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            row_tolerance: ROW_TOLERANCE,
        }
    }
}

impl LayoutOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row tolerance.
    pub fn with_row_tolerance(mut self, tolerance: i64) -> Self {
        self.row_tolerance = tolerance.max(0);
        self
    }
}

/// Anything with an optional position.
///
/// Elements without a position sort as if placed at `(0, 0)`.
pub trait Positioned {
    /// Position of the element, if known.
    fn position(&self) -> Option<Position>;

    /// Sort key: `(y, x)`, defaulting to the origin.
    fn reading_key(&self) -> (i64, i64) {
        self.position().unwrap_or_default().reading_key()
    }
}

impl Positioned for Position {
    fn position(&self) -> Option<Position> {
        Some(*self)
    }
}

impl<T> Positioned for (Option<Position>, T) {
    fn position(&self) -> Option<Position> {
        self.0
    }
}

/// Sort elements top-to-bottom, then left-to-right.
///
/// The sort is stable: elements at the same coordinates keep source order.
pub fn sort_by_position<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(|item| item.reading_key());
}

/// Groups positioned elements into rows.
#[derive(Debug, Clone, Default)]
pub struct PositionalClusterer {
    options: LayoutOptions,
}

impl PositionalClusterer {
    /// Create a clusterer.
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Sort `items` and split them into rows.
    ///
    /// A new row starts whenever an element's `y` differs from the previous
    /// element's `y` by more than the tolerance. Each row is ordered left to
    /// right. Every input element appears in exactly one row.
    pub fn cluster<T: Positioned>(&self, mut items: Vec<T>) -> Vec<Vec<T>> {
        if items.is_empty() {
            return vec![];
        }

        sort_by_position(&mut items);

        let mut rows: Vec<Vec<T>> = Vec::new();
        let mut current_row: Vec<T> = Vec::new();
        let mut previous_y: Option<i64> = None;

        for item in items {
            let (y, _) = item.reading_key();

            match previous_y {
                Some(prev) if (y - prev).abs() <= self.options.row_tolerance => {
                    current_row.push(item);
                }
                _ => {
                    if !current_row.is_empty() {
                        rows.push(std::mem::take(&mut current_row));
                    }
                    current_row.push(item);
                }
            }
            previous_y = Some(y);
        }

        if !current_row.is_empty() {
            rows.push(current_row);
        }

        for row in &mut rows {
            row.sort_by_key(|item| item.reading_key().1);
        }

        log::trace!(
            "clustered into {} row(s) with tolerance {}",
            rows.len(),
            self.options.row_tolerance
        );
        rows
    }

    /// Check whether any element carries a position.
    pub fn has_positions<T: Positioned>(items: &[T]) -> bool {
        items.iter().any(|item| item.position().is_some())
    }
}
