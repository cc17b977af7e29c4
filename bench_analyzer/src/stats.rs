//!
//! Statistics helpers for report construction.
//!

///
/// The five-number summary of one sample set.
///
#[derive(Debug, Clone, PartialEq)]
pub struct FiveNumberSummary {
    /// The smallest sample.
    pub minimum: f64,
    /// The 25th percentile.
    pub lower_quartile: f64,
    /// The 50th percentile.
    pub median: f64,
    /// The 75th percentile.
    pub upper_quartile: f64,
    /// The largest sample.
    pub maximum: f64,
}

impl FiveNumberSummary {
    ///
    /// Computes the summary, returning `None` for an empty sample set.
    ///
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        Some(Self {
            minimum: percentile(samples, 0.0),
            lower_quartile: percentile(samples, 25.0),
            median: percentile(samples, 50.0),
            upper_quartile: percentile(samples, 75.0),
            maximum: percentile(samples, 100.0),
        })
    }
}

///
/// The arithmetic mean, `None` for an empty sample set.
///
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

///
/// The 50th percentile, `None` for an empty sample set.
///
pub fn median(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(percentile(samples, 50.0))
}

///
/// A percentile with linear interpolation between nearest ranks.
///
/// Must not be called with an empty sample set.
///
pub fn percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.len() == 1 {
        return samples[0];
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (percentile / 100.0) * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = (lower_index + 1).min(sorted.len() - 1);
    let fraction = rank - lower_index as f64;

    sorted[lower_index] + fraction * (sorted[upper_index] - sorted[lower_index])
}

///
/// One histogram bin.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    /// The inclusive lower edge.
    pub lower: f64,
    /// The exclusive upper edge. The last bin includes it.
    pub upper: f64,
    /// The number of samples falling into the bin.
    pub count: usize,
}

///
/// Splits the sample range into `bin_count` equal-width bins.
///
/// A degenerate range (all samples equal) yields a single bin holding
/// every sample.
///
pub fn histogram(samples: &[f64], bin_count: usize) -> Vec<Bin> {
    if samples.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let minimum = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let maximum = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if maximum <= minimum {
        return vec![Bin {
            lower: minimum,
            upper: maximum,
            count: samples.len(),
        }];
    }

    let width = (maximum - minimum) / bin_count as f64;
    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|index| Bin {
            lower: minimum + width * index as f64,
            upper: minimum + width * (index + 1) as f64,
            count: 0,
        })
        .collect();

    for sample in samples.iter() {
        let index = (((sample - minimum) / width) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}

///
/// A moving-average smoothing of histogram counts, used as a density series.
///
pub fn smoothed_counts(bins: &[Bin]) -> Vec<f64> {
    bins.iter()
        .enumerate()
        .map(|(index, _)| {
            let lower = index.saturating_sub(1);
            let upper = (index + 1).min(bins.len().saturating_sub(1));
            let window = &bins[lower..=upper];
            window.iter().map(|bin| bin.count as f64).sum::<f64>() / window.len() as f64
        })
        .collect()
}
