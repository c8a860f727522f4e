//! Chart-to-Markdown rendering.
//!
//! Bar and line charts become a category-by-series table, pie charts a
//! category/value/percentage table, and every other family a plain list of
//! series values.

use super::table::render_table;
use super::TableOptions;
use crate::model::{CellData, ChartModel, ChartType, TableModel};

/// Placeholder body for charts without series.
pub const NO_CHART_DATA: &str = "*No chart data available*";

/// Render a chart with its `#### Chart <ordinal>: <title>` heading.
///
/// The ordinal comes from the caller's render session so numbering stays
/// stable across the whole document.
pub fn render_chart(chart: &ChartModel, ordinal: u32) -> String {
    let mut output = format!("#### Chart {}: {}\n\n", ordinal, chart.display_title());

    if chart.is_empty() {
        output.push_str(NO_CHART_DATA);
        output.push('\n');
        return output;
    }

    let body = match chart.chart_type {
        ChartType::Bar | ChartType::Line => render_table(&series_table(chart), &TableOptions::default()),
        ChartType::Pie => render_table(&pie_table(chart), &TableOptions::default()),
        _ => render_series_list(chart),
    };
    output.push_str(&body);
    output
}

/// Category column followed by one column per series.
pub fn series_table(chart: &ChartModel) -> TableModel {
    let mut table = TableModel::new();

    let mut header = vec![CellData::text("Category")];
    header.extend(
        chart
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| CellData::text(series_name(&s.name, i))),
    );
    table.add_row(header);

    for index in 0..chart.point_count() {
        let mut row = vec![CellData::text(chart.category_at(index))];
        row.extend(
            chart
                .series
                .iter()
                .map(|s| CellData::text(format_number(s.value_at(index)))),
        );
        table.add_row(row);
    }
    table
}

/// Category, value and share of the first series.
pub fn pie_table(chart: &ChartModel) -> TableModel {
    let mut table = TableModel::from_strings([["Category", "Value", "Percentage"]]);

    let Some(series) = chart.series.first() else {
        return table;
    };

    let shares = pie_shares(&series.values);
    for (index, (value, share)) in series.values.iter().zip(shares).enumerate() {
        table.add_row(vec![
            CellData::text(chart.category_at(index)),
            CellData::text(format_number(*value)),
            CellData::text(format!("{}.{}%", share / 10, share % 10)),
        ]);
    }
    table
}

/// Shares in tenths of a percent, rounded by largest remainder so they sum
/// to exactly 1000 whenever some value is positive.
///
/// Negative and non-finite values get no share.
fn pie_shares(values: &[f64]) -> Vec<u64> {
    let weights: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect();
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return vec![0; values.len()];
    }

    let exact: Vec<f64> = weights.iter().map(|w| w / total * 1000.0).collect();
    let mut shares: Vec<u64> = exact.iter().map(|e| e.floor() as u64).collect();
    let remainder = |i: usize| exact[i] - exact[i].floor();

    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| remainder(b).total_cmp(&remainder(a)));

    let left = 1000u64.saturating_sub(shares.iter().sum());
    for &i in order.iter().take(left as usize) {
        shares[i] += 1;
    }
    shares
}

fn render_series_list(chart: &ChartModel) -> String {
    chart
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let values = series
                .values
                .iter()
                .map(|v| format_number(*v))
                .collect::<Vec<_>>()
                .join(", ");
            let mut block = format!("**{}**\nValues: {}\n", series_name(&series.name, i), values);

            let categories = series
                .categories
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(&chart.categories);
            if !categories.is_empty() {
                block.push_str(&format!("Categories: {}\n", categories.join(", ")));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn series_name(name: &str, index: usize) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("Series {}", index + 1)
    } else {
        name.to_string()
    }
}

/// Format a value without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChartSeries;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_bar_chart_table() {
        let chart = ChartModel::new(ChartType::Bar, "Sales")
            .with_categories(["Q1", "Q2"])
            .with_series(ChartSeries::new("2023", vec![10.0, 20.0]))
            .with_series(ChartSeries::new("", vec![5.5]));

        let md = render_chart(&chart, 1);
        assert_eq!(
            md,
            "#### Chart 1: Sales\n\n\
             | Category | 2023 | Series 2 |\n\
             |:--- |:--- |:--- |\n\
             | Q1 | 10 | 5.5 |\n\
             | Q2 | 20 | 0 |\n"
        );
    }

    #[test]
    fn test_pie_chart_percentages() {
        let chart = ChartModel::new(ChartType::Pie, "")
            .with_categories(["Q1", "Q2", "Q3", "Q4"])
            .with_series(ChartSeries::new("Share", vec![25.0, 25.0, 25.0, 25.0]));

        let md = render_chart(&chart, 3);
        assert!(md.starts_with("#### Chart 3: Pie Chart\n\n"));
        assert!(md.contains("| Category | Value | Percentage |"));
        assert!(md.contains("| Q1 | 25 | 25.0% |"));
        assert_eq!(md.matches("25.0%").count(), 4);
    }

    fn percentages(chart: &ChartModel) -> Vec<f64> {
        pie_table(chart)
            .rows
            .iter()
            .skip(1)
            .map(|row| row[2].text.trim_end_matches('%').parse().unwrap())
            .collect()
    }

    #[test]
    fn test_pie_uneven_shares_sum_to_hundred() {
        for values in [vec![1.0, 1.0, 1.0], vec![1.0, 2.0, 3.0, 4.0], vec![1.0; 6], vec![2.0, 3.0, 7.0]] {
            let chart = ChartModel::new(ChartType::Pie, "")
                .with_series(ChartSeries::new("s", values.clone()));
            let shares = percentages(&chart);
            assert_eq!(shares.len(), values.len());

            let sum: f64 = shares.iter().sum();
            assert!((sum - 100.0).abs() <= 0.1, "{:?} sums to {}", values, sum);
        }

        let chart = ChartModel::new(ChartType::Pie, "")
            .with_series(ChartSeries::new("s", vec![1.0, 1.0, 1.0]));
        let md = render_chart(&chart, 1);
        assert_eq!(md.matches("33.3%").count(), 2);
        assert_eq!(md.matches("33.4%").count(), 1);
    }

    #[test]
    fn test_pie_negative_values_get_no_share() {
        let chart = ChartModel::new(ChartType::Pie, "")
            .with_categories(["Gain", "Loss", "Other"])
            .with_series(ChartSeries::new("s", vec![30.0, -10.0, 10.0]));
        let md = render_chart(&chart, 1);

        assert!(md.contains("| Gain | 30 | 75.0% |"));
        assert!(md.contains("| Loss | -10 | 0.0% |"));
        assert!(md.contains("| Other | 10 | 25.0% |"));
        assert!(!md.contains("NaN") && !md.contains("-0.0%"));

        let all_negative = ChartModel::new(ChartType::Pie, "")
            .with_series(ChartSeries::new("s", vec![-1.0, -3.0, f64::NAN]));
        let md = render_chart(&all_negative, 1);
        assert_eq!(md.matches("| 0.0% |").count(), 3);
        assert!(!md.contains("-0.0%"));
    }

    #[test]
    fn test_pie_zero_total() {
        let chart = ChartModel::new(ChartType::Pie, "Empty")
            .with_series(ChartSeries::new("s", vec![0.0, 0.0]));
        let md = render_chart(&chart, 1);
        assert!(md.contains("| Item 1 | 0 | 0.0% |"));
        assert!(md.contains("| Item 2 | 0 | 0.0% |"));
    }

    #[test]
    fn test_generic_chart_list() {
        let chart = ChartModel::new(ChartType::Scatter, "Spread")
            .with_series(ChartSeries::new("Points", vec![1.0, 2.5]).with_categories(["a", "b"]));
        let md = render_chart(&chart, 2);
        assert_eq!(
            md,
            "#### Chart 2: Spread\n\n**Points**\nValues: 1, 2.5\nCategories: a, b\n"
        );
    }

    #[test]
    fn test_chart_without_series() {
        let chart = ChartModel::new(ChartType::Line, "");
        assert_eq!(
            render_chart(&chart, 4),
            "#### Chart 4: Line Chart\n\n*No chart data available*\n"
        );
    }
}
