//!
//! The persisted performance summary table.
//!

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::metric::Metric;
use crate::record::Record;
use crate::stats;
use crate::variant::Variant;

///
/// The persisted performance summary table.
///
/// One row per (artifact, variant), plus at most one `Average`
/// pseudo-record per variant. The measurement stage truncates and
/// reheaders the table at the start of every pass, so back-to-back
/// passes never accumulate duplicate rows.
///
/// The table has no concurrent-writer guard: the measurement and
/// analysis stages must not run against the same file at the same time.
///
#[derive(Debug)]
pub struct Table {
    /// The path of the backing CSV file.
    pub path: PathBuf,
    /// The loaded records.
    pub records: Vec<Record>,
}

impl Table {
    ///
    /// Returns the fixed CSV header line.
    ///
    pub fn header() -> String {
        let mut fields = vec!["File Name".to_owned(), "File Type".to_owned()];
        fields.extend(Metric::ALL.into_iter().map(|metric| metric.to_string()));
        fields.join(",")
    }

    ///
    /// Truncates the backing file, writes the header, and returns an empty table.
    ///
    pub fn reset(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|error| anyhow::anyhow!("Data directory {parent:?} creating: {error}"))?;
        }
        std::fs::write(path, format!("{}\n", Self::header()))
            .map_err(|error| anyhow::anyhow!("Table file {path:?} writing: {error}"))?;
        Ok(Self {
            path: path.to_path_buf(),
            records: Vec::new(),
        })
    }

    ///
    /// Loads the table from the backing file.
    ///
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Table file {path:?} reading: {error}"))?;

        let mut lines = text.lines();
        match lines.next() {
            Some(header) if header.trim() == Self::header() => {}
            Some(header) => anyhow::bail!(
                "Table file {path:?} parsing: unexpected header `{header}`"
            ),
            None => anyhow::bail!("Table file {path:?} parsing: the file is empty"),
        }

        let mut records = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            records.push(
                Record::from_csv(line)
                    .map_err(|error| anyhow::anyhow!("Table file {path:?} parsing: {error}"))?,
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    ///
    /// Appends one record to the backing file and to memory.
    ///
    pub fn append(&mut self, record: Record) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(self.path.as_path())
            .map_err(|error| anyhow::anyhow!("Table file {:?} opening: {error}", self.path))?;
        writeln!(file, "{}", record.to_csv())
            .map_err(|error| anyhow::anyhow!("Table file {:?} appending: {error}", self.path))?;
        self.records.push(record);
        Ok(())
    }

    ///
    /// Rewrites the backing file from the in-memory records.
    ///
    pub fn save(&self) -> anyhow::Result<()> {
        let mut contents = String::with_capacity((self.records.len() + 1) * 128);
        contents.push_str(Self::header().as_str());
        contents.push('\n');
        for record in self.records.iter() {
            contents.push_str(record.to_csv().as_str());
            contents.push('\n');
        }
        std::fs::write(self.path.as_path(), contents)
            .map_err(|error| anyhow::anyhow!("Table file {:?} writing: {error}", self.path))
    }

    ///
    /// Recomputes the `Average` pseudo-record of a variant.
    ///
    /// Any prior `Average` record of the variant is removed and the
    /// filtered table is persisted before the new averages are computed,
    /// so repeated recomputation is idempotent. The table is reloaded
    /// from disk afterwards so subsequent operations see committed state.
    ///
    pub fn recalculate_average(&mut self, variant: Variant) -> anyhow::Result<()> {
        self.records
            .retain(|record| !(record.is_average() && record.variant == variant));
        self.save()?;

        let mut values: BTreeMap<Metric, Option<f64>> = BTreeMap::new();
        for metric in Metric::ALL {
            let samples: Vec<f64> = self
                .records
                .iter()
                .filter(|record| record.variant == variant)
                .filter_map(|record| record.value(metric))
                .collect();
            values.insert(metric, stats::mean(samples.as_slice()));
        }

        self.append(Record::new(
            Record::AVERAGE_NAME.to_owned(),
            variant,
            values,
        ))?;

        *self = Self::load(self.path.as_path())?;
        Ok(())
    }

    ///
    /// Returns the sorted distinct artifact names, excluding the `Average` sentinel.
    ///
    pub fn artifact_names(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .records
            .iter()
            .filter(|record| !record.is_average())
            .map(|record| record.artifact.clone())
            .collect();
        names.into_iter().collect()
    }

    ///
    /// Returns the non-average value of a metric for an (artifact, variant) pair.
    ///
    pub fn value(&self, artifact: &str, variant: Variant, metric: Metric) -> Option<f64> {
        self.records
            .iter()
            .find(|record| {
                !record.is_average() && record.artifact == artifact && record.variant == variant
            })
            .and_then(|record| record.value(metric))
    }
}
