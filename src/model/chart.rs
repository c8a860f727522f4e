//! Chart types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart family, as named by the chart-definition part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Bar chart
    Bar,
    /// Line chart
    Line,
    /// Pie or doughnut chart
    Pie,
    /// Scatter chart
    Scatter,
    /// Area chart
    Area,
    /// Column chart
    Column,
    /// Anything else
    #[default]
    #[serde(other)]
    Unknown,
}

impl ChartType {
    /// Map a chart-definition element name (e.g. `barChart`, `pie3DChart`).
    pub fn from_element_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        let lower = lower.strip_prefix("c:").unwrap_or(&lower);
        if lower.starts_with("bar") {
            ChartType::Bar
        } else if lower.starts_with("line") {
            ChartType::Line
        } else if lower.starts_with("pie") || lower.starts_with("doughnut") {
            ChartType::Pie
        } else if lower.starts_with("scatter") {
            ChartType::Scatter
        } else if lower.starts_with("area") {
            ChartType::Area
        } else if lower.starts_with("col") {
            ChartType::Column
        } else {
            ChartType::Unknown
        }
    }

    /// Display label used when a chart has no title.
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar",
            ChartType::Line => "Line",
            ChartType::Pie => "Pie",
            ChartType::Scatter => "Scatter",
            ChartType::Area => "Area",
            ChartType::Column => "Column",
            ChartType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One data series of a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series name
    #[serde(default)]
    pub name: String,

    /// Numeric values
    #[serde(default)]
    pub values: Vec<f64>,

    /// Per-series category labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl ChartSeries {
    /// Create a series from a name and values.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            categories: None,
        }
    }

    /// Set per-series categories and return self.
    pub fn with_categories<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Value at an index, `0` when absent.
    pub fn value_at(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }
}

/// A parsed chart, already extracted from its definition part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    /// Chart family
    #[serde(rename = "type", default)]
    pub chart_type: ChartType,

    /// Chart title (may be empty)
    #[serde(default)]
    pub title: String,

    /// Data series
    #[serde(default)]
    pub series: Vec<ChartSeries>,

    /// Shared category labels
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ChartModel {
    /// Create an empty chart of the given type.
    pub fn new(chart_type: ChartType, title: impl Into<String>) -> Self {
        Self {
            chart_type,
            title: title.into(),
            series: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Add a series and return self.
    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Set shared categories and return self.
    pub fn with_categories<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Title, or `<Type> Chart` when the title is blank.
    pub fn display_title(&self) -> String {
        let title = self.title.trim();
        if title.is_empty() {
            format!("{} Chart", self.chart_type.label())
        } else {
            title.to_string()
        }
    }

    /// Number of data points along the category axis.
    pub fn point_count(&self) -> usize {
        let longest_series = self.series.iter().map(|s| s.values.len()).max().unwrap_or(0);
        longest_series.max(self.categories.len())
    }

    /// Category label for an index.
    ///
    /// Shared categories win, then the first series that carries its own
    /// categories, then `Item <n>`.
    pub fn category_at(&self, index: usize) -> String {
        if let Some(label) = self.categories.get(index) {
            return label.clone();
        }
        self.series
            .iter()
            .filter_map(|s| s.categories.as_ref())
            .find_map(|cats| cats.get(index).cloned())
            .unwrap_or_else(|| format!("Item {}", index + 1))
    }

    /// Check if the chart carries no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
