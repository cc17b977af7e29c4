//!
//! The comparison bar chart workbook.
//!

use crate::comparison::Comparison;
use crate::variant::Variant;

use super::style;

/// The name of the data worksheet referenced by the chart series.
const DATA_SHEET_NAME: &str = "Data";

/// The chart dimensions in pixels.
const CHART_WIDTH: u32 = 1280;
const CHART_HEIGHT: u32 = 720;

///
/// Renders the grouped bar chart workbook for one metric: one row per
/// artifact, one column per variant, degradation percentages against the
/// reference variant both as table columns and as bar annotations.
///
/// Raw counters span orders of magnitude across artifacts, so the value
/// axis is logarithmic.
///
pub fn render(comparison: &Comparison) -> anyhow::Result<rust_xlsxwriter::Workbook> {
    let mut worksheet = rust_xlsxwriter::Worksheet::new();
    worksheet.set_name(DATA_SHEET_NAME)?;

    worksheet.write_with_format(0, 0, "File Name", &style::column_header_format())?;
    worksheet.set_column_width(0, 24)?;
    for (index, variant) in Variant::ALL.into_iter().enumerate() {
        let column = 1 + index as u16;
        worksheet.write_with_format(
            0,
            column,
            variant.to_string(),
            &style::column_header_format(),
        )?;
        worksheet.set_column_width(column, 16)?;
    }
    let mut degradation_column = 1 + Variant::ALL.len() as u16;
    for variant in Variant::ALL {
        if variant == Variant::reference() {
            continue;
        }
        worksheet.write_with_format(
            0,
            degradation_column,
            format!("Degradation (%) {} vs {variant}", Variant::reference()),
            &style::column_header_format(),
        )?;
        worksheet.set_column_width(degradation_column, 30)?;
        degradation_column += 1;
    }

    for (row_index, row) in comparison.rows.iter().enumerate() {
        let row_index = 1 + row_index as u32;
        worksheet.write_with_format(
            row_index,
            0,
            row.artifact.as_str(),
            &style::row_header_format(),
        )?;
        for (index, variant) in Variant::ALL.into_iter().enumerate() {
            // A missing combination leaves the cell empty, never zero.
            if let Some(value) = row.values.get(&variant).copied().flatten() {
                worksheet.write_with_format(
                    row_index,
                    1 + index as u16,
                    value,
                    &style::value_format(),
                )?;
            }
        }
        let mut degradation_column = 1 + Variant::ALL.len() as u16;
        for variant in Variant::ALL {
            if variant == Variant::reference() {
                continue;
            }
            if let Some(value) = row.degradations.get(&variant).copied().flatten() {
                worksheet.write_with_format(
                    row_index,
                    degradation_column,
                    value,
                    &style::percent_format(),
                )?;
            }
            degradation_column += 1;
        }
    }

    if !comparison.rows.is_empty() {
        let mut chart = rust_xlsxwriter::Chart::new(rust_xlsxwriter::ChartType::Column);
        let last_row = comparison.rows.len() as u32;
        for (index, variant) in Variant::ALL.into_iter().enumerate() {
            let column = 1 + index as u16;
            let series = chart.add_series();
            series
                .set_name(variant.to_string().as_str())
                .set_categories((DATA_SHEET_NAME, 1, 0, last_row, 0))
                .set_values((DATA_SHEET_NAME, 1, column, last_row, column));

            if variant != Variant::reference() {
                let labels: Vec<rust_xlsxwriter::ChartDataLabel> = comparison
                    .rows
                    .iter()
                    .map(|row| {
                        match row.degradations.get(&variant).copied().flatten() {
                            Some(value) => rust_xlsxwriter::ChartDataLabel::new()
                                .set_value(format!("{value:+.2}%").as_str())
                                .to_custom(),
                            None => rust_xlsxwriter::ChartDataLabel::new()
                                .set_hidden()
                                .to_custom(),
                        }
                    })
                    .collect();
                series
                    .set_data_label(rust_xlsxwriter::ChartDataLabel::new().show_value())
                    .set_custom_data_labels(labels.as_slice());
            }
        }
        chart
            .title()
            .set_name(format!("Analysis of {}", comparison.metric).as_str());
        chart.x_axis().set_name("File Name");
        chart
            .y_axis()
            .set_name(comparison.metric.to_string().as_str())
            .set_log_base(10);
        chart.set_width(CHART_WIDTH).set_height(CHART_HEIGHT);

        worksheet.insert_chart(1, 2 + degradation_column, &chart)?;
    }

    let mut workbook = rust_xlsxwriter::Workbook::new();
    workbook.push_worksheet(worksheet);
    Ok(workbook)
}
