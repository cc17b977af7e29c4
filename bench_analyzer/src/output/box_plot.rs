//!
//! The box-plot comparison workbook.
//!

use crate::metric::Metric;
use crate::stats::FiveNumberSummary;
use crate::trials::TrialSet;
use crate::variant::Variant;

use super::style;

/// The name of the data worksheet referenced by the chart series.
const DATA_SHEET_NAME: &str = "Data";

/// The per-variant box fill colors: the lower and the upper segment.
const VARIANT_COLORS: [(&str, &str); 3] = [
    ("#4C6EF5", "#91A7FF"),
    ("#2F9E44", "#8CE99A"),
    ("#E03131", "#FFA8A8"),
];

/// The chart dimensions in pixels.
const CHART_WIDTH: u32 = 1280;
const CHART_HEIGHT: u32 = 720;

///
/// One (artifact, variant) box summary row.
///
#[derive(Debug)]
struct SummaryRow {
    /// The category label of the box.
    label: String,
    /// The measured variant, selecting the box color.
    variant: Variant,
    /// The five-number summary of the per-trial samples.
    summary: FiveNumberSummary,
}

///
/// Renders the box-plot workbook for one metric from the per-trial data.
///
/// The chart set has no native box-and-whisker type, so the boxes are the
/// classic stacked-column emulation: an invisible base up to the lower
/// quartile and two visible segments up to the median and the upper
/// quartile. Each variant carries its own segment columns, blank in the
/// rows of the other variants, so its boxes stack from its own series and
/// take its own fill color. The whisker extremes stay in the data table.
///
pub fn render(trials: &TrialSet, metric: Metric) -> anyhow::Result<rust_xlsxwriter::Workbook> {
    let mut rows = Vec::new();
    for artifact in trials.artifact_names() {
        for variant in Variant::ALL {
            let samples = trials.samples(artifact.as_str(), variant, metric);
            if let Some(summary) = FiveNumberSummary::from_samples(samples.as_slice()) {
                rows.push(SummaryRow {
                    label: format!("{artifact} ({variant})"),
                    variant,
                    summary,
                });
            }
        }
    }

    let mut worksheet = rust_xlsxwriter::Worksheet::new();
    worksheet.set_name(DATA_SHEET_NAME)?;

    let mut headers = vec![
        "Benchmark".to_owned(),
        "Min".to_owned(),
        "Q1".to_owned(),
        "Median".to_owned(),
        "Q3".to_owned(),
        "Max".to_owned(),
        "Box Base".to_owned(),
    ];
    for variant in Variant::ALL {
        headers.push(format!("Lower Box {variant}"));
        headers.push(format!("Upper Box {variant}"));
    }
    for (column, header) in headers.iter().enumerate() {
        worksheet.write_with_format(
            0,
            column as u16,
            header.as_str(),
            &style::column_header_format(),
        )?;
    }
    worksheet.set_column_width(0, 32)?;

    for (index, row) in rows.iter().enumerate() {
        let row_index = 1 + index as u32;
        let summary = &row.summary;
        worksheet.write_with_format(
            row_index,
            0,
            row.label.as_str(),
            &style::row_header_format(),
        )?;
        let cells = [
            summary.minimum,
            summary.lower_quartile,
            summary.median,
            summary.upper_quartile,
            summary.maximum,
            summary.lower_quartile,
        ];
        for (column, value) in cells.iter().enumerate() {
            worksheet.write_with_format(
                row_index,
                1 + column as u16,
                *value,
                &style::value_format(),
            )?;
        }

        let variant_index = Variant::ALL
            .iter()
            .position(|variant| *variant == row.variant)
            .unwrap_or_default();
        let lower_column = 7 + 2 * variant_index as u16;
        worksheet.write_with_format(
            row_index,
            lower_column,
            summary.median - summary.lower_quartile,
            &style::value_format(),
        )?;
        worksheet.write_with_format(
            row_index,
            lower_column + 1,
            summary.upper_quartile - summary.median,
            &style::value_format(),
        )?;
    }

    if !rows.is_empty() {
        let mut chart = rust_xlsxwriter::Chart::new(rust_xlsxwriter::ChartType::ColumnStacked);
        let last_row = rows.len() as u32;

        let base = chart.add_series();
        base.set_name("Base")
            .set_categories((DATA_SHEET_NAME, 1, 0, last_row, 0))
            .set_values((DATA_SHEET_NAME, 1, 6, last_row, 6))
            .set_format(rust_xlsxwriter::ChartFormat::new().set_no_fill());

        for (index, variant) in Variant::ALL.into_iter().enumerate() {
            let (lower_color, upper_color) = VARIANT_COLORS[index];
            let lower_column = 7 + 2 * index as u16;

            let lower = chart.add_series();
            lower
                .set_name(variant.to_string().as_str())
                .set_categories((DATA_SHEET_NAME, 1, 0, last_row, 0))
                .set_values((DATA_SHEET_NAME, 1, lower_column, last_row, lower_column))
                .set_format(
                    rust_xlsxwriter::ChartFormat::new().set_solid_fill(
                        rust_xlsxwriter::ChartSolidFill::new().set_color(lower_color),
                    ),
                );

            let upper = chart.add_series();
            upper
                .set_name(format!("{variant} (upper)").as_str())
                .set_categories((DATA_SHEET_NAME, 1, 0, last_row, 0))
                .set_values((
                    DATA_SHEET_NAME,
                    1,
                    lower_column + 1,
                    last_row,
                    lower_column + 1,
                ))
                .set_format(
                    rust_xlsxwriter::ChartFormat::new().set_solid_fill(
                        rust_xlsxwriter::ChartSolidFill::new().set_color(upper_color),
                    ),
                );
        }

        // The legend keeps one entry per variant: the invisible base and
        // the upper half-boxes are dropped.
        let hidden_entries: Vec<usize> = std::iter::once(0)
            .chain((0..Variant::ALL.len()).map(|index| 2 + 2 * index))
            .collect();
        chart.legend().delete_entries(hidden_entries.as_slice());

        chart
            .title()
            .set_name(format!("Box Diagram of {metric}").as_str());
        chart.x_axis().set_name("Benchmark");
        chart
            .y_axis()
            .set_name(metric.to_string().as_str())
            .set_log_base(10);
        chart.set_width(CHART_WIDTH).set_height(CHART_HEIGHT);

        worksheet.insert_chart(1, 2 + headers.len() as u16, &chart)?;
    }

    let mut workbook = rust_xlsxwriter::Workbook::new();
    workbook.push_worksheet(worksheet);
    Ok(workbook)
}
