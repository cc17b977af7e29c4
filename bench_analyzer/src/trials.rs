//!
//! The raw per-trial data set.
//!

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use crate::metric::Metric;
use crate::record::Record;
use crate::variant::Variant;

///
/// The raw per-trial data set.
///
/// Unlike the summary table, per-trial data is split across one CSV file
/// per (artifact, variant), named `{artifact}-{variant}.csv`. The variant
/// is the suffix after the last `-` of the file stem, so artifact names
/// may themselves contain separators. Loading tags every row and
/// concatenates the files into one unified set.
///
#[derive(Debug, Default)]
pub struct TrialSet {
    /// The tagged per-trial rows.
    pub rows: Vec<Record>,
}

impl TrialSet {
    ///
    /// Returns the fixed per-trial CSV header line.
    ///
    pub fn header() -> String {
        Metric::ALL
            .into_iter()
            .map(|metric| metric.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }

    ///
    /// Loads and concatenates every per-trial file in a directory.
    ///
    pub fn load_directory(directory: &Path) -> anyhow::Result<Self> {
        let pattern = directory.join("*.csv");
        let pattern = pattern
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Trial directory {directory:?} is not valid UTF-8"))?;

        let mut rows = Vec::new();
        for entry in glob::glob(pattern)
            .map_err(|error| anyhow::anyhow!("Trial directory {directory:?} listing: {error}"))?
        {
            let path = entry
                .map_err(|error| anyhow::anyhow!("Trial directory {directory:?} listing: {error}"))?;
            let (artifact, variant) = Self::parse_file_name(path.as_path())?;
            rows.extend(Self::load_file(path.as_path(), artifact, variant)?);
        }

        Ok(Self { rows })
    }

    ///
    /// Splits a per-trial file stem into the artifact name and the variant.
    ///
    pub fn parse_file_name(path: &Path) -> anyhow::Result<(String, Variant)> {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| anyhow::anyhow!("Trial file {path:?} has no UTF-8 stem"))?;
        let (artifact, variant) = stem.rsplit_once('-').ok_or_else(|| {
            anyhow::anyhow!("Trial file {path:?} stem has no `-` variant separator")
        })?;
        let variant = Variant::from_str(variant)
            .map_err(|error| anyhow::anyhow!("Trial file {path:?} name parsing: {error}"))?;
        Ok((artifact.to_owned(), variant))
    }

    ///
    /// Serializes one trial's metric values into a per-trial CSV line.
    ///
    pub fn row_to_csv(values: &BTreeMap<Metric, Option<f64>>) -> String {
        Metric::ALL
            .into_iter()
            .map(|metric| match values.get(&metric).copied().flatten() {
                Some(value) => value.to_string(),
                None => Record::UNAVAILABLE_CELL.to_owned(),
            })
            .collect::<Vec<String>>()
            .join(",")
    }

    ///
    /// Returns the samples of a metric for an (artifact, variant) pair.
    ///
    pub fn samples(&self, artifact: &str, variant: Variant, metric: Metric) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|row| row.artifact == artifact && row.variant == variant)
            .filter_map(|row| row.value(metric))
            .collect()
    }

    ///
    /// Returns the sorted distinct artifact names.
    ///
    pub fn artifact_names(&self) -> Vec<String> {
        let names: BTreeSet<String> =
            self.rows.iter().map(|row| row.artifact.clone()).collect();
        names.into_iter().collect()
    }

    fn load_file(path: &Path, artifact: String, variant: Variant) -> anyhow::Result<Vec<Record>> {
        let text = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Trial file {path:?} reading: {error}"))?;

        let mut lines = text.lines();
        match lines.next() {
            Some(header) if header.trim() == Self::header() => {}
            Some(header) => {
                anyhow::bail!("Trial file {path:?} parsing: unexpected header `{header}`")
            }
            None => anyhow::bail!("Trial file {path:?} parsing: the file is empty"),
        }

        let mut rows = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(|field| field.trim()).collect();
            if fields.len() != Metric::ALL.len() {
                anyhow::bail!(
                    "Trial file {path:?} parsing: expected {} fields, found {} in `{line}`",
                    Metric::ALL.len(),
                    fields.len(),
                );
            }

            let mut values = BTreeMap::new();
            for (metric, field) in Metric::ALL.into_iter().zip(fields.iter()) {
                let value = if *field == Record::UNAVAILABLE_CELL || field.is_empty() {
                    None
                } else {
                    Some(f64::from_str(field).map_err(|error| {
                        anyhow::anyhow!(
                            "Trial file {path:?} cell `{field}` parsing for {metric}: {error}"
                        )
                    })?)
                };
                values.insert(metric, value);
            }
            rows.push(Record::new(artifact.clone(), variant, values));
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::path::PathBuf;

    use crate::metric::Metric;
    use crate::variant::Variant;

    use super::TrialSet;

    fn temporary_directory(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "bench-analyzer-trials-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(path.as_path()).expect("Temporary directory creating");
        path
    }

    fn write_trial_file(directory: &Path, name: &str, cycles: &[f64]) {
        let mut contents = format!("{}\n", TrialSet::header());
        for value in cycles {
            let mut values: BTreeMap<Metric, Option<f64>> = Metric::ALL
                .into_iter()
                .map(|metric| (metric, Some(1.0)))
                .collect();
            values.insert(Metric::Cycles, Some(*value));
            contents.push_str(TrialSet::row_to_csv(&values).as_str());
            contents.push('\n');
        }
        std::fs::write(directory.join(name), contents).expect("Trial file writing");
    }

    #[test]
    fn file_name_parsing() {
        let (artifact, variant) =
            TrialSet::parse_file_name(Path::new("data/trials/qsort_int32-protected.csv"))
                .expect("Always parseable");
        assert_eq!(artifact, "qsort_int32");
        assert_eq!(variant, Variant::Protected);
    }

    #[test]
    fn file_name_with_inner_separator() {
        let (artifact, variant) =
            TrialSet::parse_file_name(Path::new("obscure-string-no_extension.csv"))
                .expect("Always parseable");
        assert_eq!(artifact, "obscure-string");
        assert_eq!(variant, Variant::NoExtension);
    }

    #[test]
    fn directory_ingestion() {
        let directory = temporary_directory("ingestion");
        write_trial_file(
            directory.as_path(),
            "coulomb_double-original.csv",
            &[1000.0, 1200.0],
        );
        write_trial_file(
            directory.as_path(),
            "coulomb_double-protected.csv",
            &[2000.0],
        );

        let set = TrialSet::load_directory(directory.as_path()).expect("Trial set loading");
        assert_eq!(set.rows.len(), 3);
        assert_eq!(
            set.samples("coulomb_double", Variant::Original, Metric::Cycles),
            vec![1000.0, 1200.0]
        );
        assert_eq!(
            set.samples("coulomb_double", Variant::Protected, Metric::Cycles),
            vec![2000.0]
        );
        assert_eq!(set.artifact_names(), vec!["coulomb_double".to_owned()]);

        std::fs::remove_dir_all(directory).expect("Temporary directory removing");
    }
}
