//!
//! One persisted row of averaged performance metrics.
//!

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::metric::Metric;
use crate::variant::Variant;

///
/// One persisted row of averaged performance metrics.
///
/// A missing value means the metric was unavailable in every successful
/// trial of the artifact. It is persisted as `N/A`, never as zero.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The artifact name, or the `Average` sentinel.
    pub artifact: String,
    /// The build variant the artifact was measured under.
    pub variant: Variant,
    /// The per-metric averaged values.
    pub values: BTreeMap<Metric, Option<f64>>,
}

impl Record {
    /// The artifact name of the per-variant average pseudo-record.
    pub const AVERAGE_NAME: &'static str = "Average";

    /// The CSV cell written for an unavailable value.
    pub const UNAVAILABLE_CELL: &'static str = "N/A";

    ///
    /// A shortcut constructor.
    ///
    pub fn new(artifact: String, variant: Variant, values: BTreeMap<Metric, Option<f64>>) -> Self {
        Self {
            artifact,
            variant,
            values,
        }
    }

    ///
    /// Whether the record is a per-variant average pseudo-record.
    ///
    pub fn is_average(&self) -> bool {
        self.artifact == Self::AVERAGE_NAME
    }

    ///
    /// Returns the value of a metric, if it was available.
    ///
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied().flatten()
    }

    ///
    /// Serializes the record into one CSV line without a trailing newline.
    ///
    pub fn to_csv(&self) -> String {
        let mut fields = Vec::with_capacity(2 + Metric::ALL.len());
        fields.push(self.artifact.clone());
        fields.push(self.variant.to_string());
        for metric in Metric::ALL {
            fields.push(match self.value(metric) {
                Some(value) => value.to_string(),
                None => Self::UNAVAILABLE_CELL.to_owned(),
            });
        }
        fields.join(",")
    }

    ///
    /// Parses a record from one CSV line in the persisted column order.
    ///
    pub fn from_csv(line: &str) -> anyhow::Result<Self> {
        let fields: Vec<&str> = line.split(',').map(|field| field.trim()).collect();
        if fields.len() != 2 + Metric::ALL.len() {
            anyhow::bail!(
                "Table row parsing: expected {} fields, found {} in `{line}`",
                2 + Metric::ALL.len(),
                fields.len(),
            );
        }

        let artifact = fields[0].to_owned();
        let variant = Variant::from_str(fields[1])
            .map_err(|error| anyhow::anyhow!("Table row `{line}` parsing: {error}"))?;

        let mut values = BTreeMap::new();
        for (metric, field) in Metric::ALL.into_iter().zip(fields[2..].iter()) {
            let value = if *field == Self::UNAVAILABLE_CELL || field.is_empty() {
                None
            } else {
                Some(f64::from_str(field).map_err(|error| {
                    anyhow::anyhow!("Table cell `{field}` parsing for {metric}: {error}")
                })?)
            };
            values.insert(metric, value);
        }

        Ok(Self::new(artifact, variant, values))
    }
}
