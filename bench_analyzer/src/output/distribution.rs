//!
//! The loss-distribution workbook.
//!

use std::collections::BTreeMap;

use crate::comparison::degradation;
use crate::metric::Metric;
use crate::stats;
use crate::stats::Bin;
use crate::trials::TrialSet;
use crate::variant::Variant;

use super::style;

/// The name of the data worksheet referenced by the chart series.
const DATA_SHEET_NAME: &str = "Data";

/// The number of histogram bins across the observed loss range.
const BIN_COUNT: usize = 10;

/// The chart dimensions in pixels.
const CHART_WIDTH: u32 = 960;
const CHART_HEIGHT: u32 = 540;

///
/// Renders the loss-distribution workbook for one metric.
///
/// For every artifact, the loss is the percentage difference between the
/// per-trial median of a non-reference variant and the per-trial median of
/// the reference variant. Artifacts without a reference median contribute
/// no loss. The losses of all artifacts form one distribution per variant,
/// rendered as a histogram with a smoothed density series and annotated
/// with the distribution median.
///
pub fn render(trials: &TrialSet, metric: Metric) -> anyhow::Result<rust_xlsxwriter::Workbook> {
    let artifacts = trials.artifact_names();

    let mut losses: BTreeMap<Variant, Vec<(String, f64)>> = BTreeMap::new();
    for artifact in artifacts.iter() {
        let reference = stats::median(
            trials
                .samples(artifact.as_str(), Variant::reference(), metric)
                .as_slice(),
        );
        for variant in Variant::ALL {
            if variant == Variant::reference() {
                continue;
            }
            let candidate = stats::median(
                trials
                    .samples(artifact.as_str(), variant, metric)
                    .as_slice(),
            );
            if let Some(loss) = degradation(reference, candidate) {
                losses.entry(variant).or_default().push((artifact.clone(), loss));
            }
        }
    }

    let mut worksheet = rust_xlsxwriter::Worksheet::new();
    worksheet.set_name(DATA_SHEET_NAME)?;

    // Per-artifact losses.
    worksheet.write_with_format(0, 0, "File Name", &style::column_header_format())?;
    worksheet.set_column_width(0, 24)?;
    for (index, variant) in losses.keys().enumerate() {
        worksheet.write_with_format(
            0,
            1 + index as u16,
            format!("Loss (%) {variant}"),
            &style::column_header_format(),
        )?;
        worksheet.set_column_width(1 + index as u16, 20)?;
    }
    for (row_index, artifact) in artifacts.iter().enumerate() {
        worksheet.write_with_format(
            1 + row_index as u32,
            0,
            artifact.as_str(),
            &style::row_header_format(),
        )?;
        for (column, variant_losses) in losses.values().enumerate() {
            if let Some((_, loss)) = variant_losses.iter().find(|(name, _)| name == artifact) {
                worksheet.write_with_format(
                    1 + row_index as u32,
                    1 + column as u16,
                    *loss,
                    &style::percent_format(),
                )?;
            }
        }
    }

    // Shared histogram bins over the union of all losses.
    let union: Vec<f64> = losses
        .values()
        .flat_map(|variant_losses| variant_losses.iter().map(|(_, loss)| *loss))
        .collect();
    let bins = stats::histogram(union.as_slice(), BIN_COUNT);

    let histogram_row = 2 + artifacts.len() as u32;
    worksheet.write_with_format(histogram_row, 0, "Bin", &style::column_header_format())?;
    let mut column = 1u16;
    for variant in losses.keys() {
        worksheet.write_with_format(
            histogram_row,
            column,
            format!("Count {variant}"),
            &style::column_header_format(),
        )?;
        worksheet.write_with_format(
            histogram_row,
            column + 1,
            format!("Density {variant}"),
            &style::column_header_format(),
        )?;
        column += 2;
    }

    for (bin_index, bin) in bins.iter().enumerate() {
        worksheet.write_with_format(
            histogram_row + 1 + bin_index as u32,
            0,
            format!("{:.2} to {:.2}", bin.lower, bin.upper),
            &style::row_header_format(),
        )?;
    }
    let mut column = 1u16;
    for variant_losses in losses.values() {
        let samples: Vec<f64> = variant_losses.iter().map(|(_, loss)| *loss).collect();
        let counts = counts_in_bins(bins.as_slice(), samples.as_slice());
        let count_bins: Vec<Bin> = bins
            .iter()
            .zip(counts.iter())
            .map(|(bin, count)| Bin {
                lower: bin.lower,
                upper: bin.upper,
                count: *count,
            })
            .collect();
        let densities = stats::smoothed_counts(count_bins.as_slice());

        for (bin_index, (count, density)) in counts.iter().zip(densities.iter()).enumerate() {
            let row = histogram_row + 1 + bin_index as u32;
            worksheet.write_with_format(row, column, *count as f64, &style::value_format())?;
            worksheet.write_with_format(row, column + 1, *density, &style::value_format())?;
        }
        column += 2;
    }

    // Distribution medians.
    let median_row = histogram_row + 2 + bins.len() as u32;
    for (index, (variant, variant_losses)) in losses.iter().enumerate() {
        let samples: Vec<f64> = variant_losses.iter().map(|(_, loss)| *loss).collect();
        if let Some(median) = stats::median(samples.as_slice()) {
            worksheet.write_with_format(
                median_row + index as u32,
                0,
                format!("Median loss {variant} (%)"),
                &style::row_header_format(),
            )?;
            worksheet.write_with_format(
                median_row + index as u32,
                1,
                median,
                &style::percent_format(),
            )?;
        }
    }

    if bins.is_empty() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        workbook.push_worksheet(worksheet);
        return Ok(workbook);
    }

    // Histogram chart.
    let mut histogram_chart = rust_xlsxwriter::Chart::new(rust_xlsxwriter::ChartType::Column);
    let first_bin_row = histogram_row + 1;
    let last_bin_row = histogram_row + bins.len() as u32;
    for (index, variant) in losses.keys().enumerate() {
        let values_column = 1 + (index as u16) * 2;
        histogram_chart
            .add_series()
            .set_name(variant.to_string().as_str())
            .set_categories((DATA_SHEET_NAME, first_bin_row, 0, last_bin_row, 0))
            .set_values((
                DATA_SHEET_NAME,
                first_bin_row,
                values_column,
                last_bin_row,
                values_column,
            ));
    }
    histogram_chart
        .title()
        .set_name(format!("Distribution Visualization of {metric}").as_str());
    histogram_chart.x_axis().set_name("Loss (%)");
    histogram_chart.y_axis().set_name("Benchmarks");
    histogram_chart
        .set_width(CHART_WIDTH)
        .set_height(CHART_HEIGHT);

    // Density chart.
    let mut density_chart = rust_xlsxwriter::Chart::new(rust_xlsxwriter::ChartType::Line);
    for (index, variant) in losses.keys().enumerate() {
        let values_column = 2 + (index as u16) * 2;
        density_chart
            .add_series()
            .set_name(variant.to_string().as_str())
            .set_categories((DATA_SHEET_NAME, first_bin_row, 0, last_bin_row, 0))
            .set_values((
                DATA_SHEET_NAME,
                first_bin_row,
                values_column,
                last_bin_row,
                values_column,
            ));
    }
    density_chart
        .title()
        .set_name(format!("Loss density of {metric}").as_str());
    density_chart.x_axis().set_name("Loss (%)");
    density_chart.y_axis().set_name("Density");
    density_chart
        .set_width(CHART_WIDTH)
        .set_height(CHART_HEIGHT);

    let chart_column = (2 + losses.len() * 2) as u16;
    worksheet.insert_chart(1, chart_column, &histogram_chart)?;
    worksheet.insert_chart(30, chart_column, &density_chart)?;

    let mut workbook = rust_xlsxwriter::Workbook::new();
    workbook.push_worksheet(worksheet);
    Ok(workbook)
}

///
/// Counts the samples falling into each shared bin.
///
fn counts_in_bins(bins: &[Bin], samples: &[f64]) -> Vec<usize> {
    let mut counts = vec![0usize; bins.len()];
    for sample in samples.iter() {
        for (index, bin) in bins.iter().enumerate() {
            let is_last = index == bins.len() - 1;
            if *sample >= bin.lower && (*sample < bin.upper || (is_last && *sample <= bin.upper)) {
                counts[index] += 1;
                break;
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use crate::stats;

    use super::counts_in_bins;

    #[test]
    fn shared_bin_counting() {
        let bins = stats::histogram(&[0.0, 10.0], 2);
        let counts = counts_in_bins(bins.as_slice(), &[1.0, 6.0, 10.0]);
        assert_eq!(counts, vec![1, 2]);
    }
}
