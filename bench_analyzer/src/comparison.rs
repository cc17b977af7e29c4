//!
//! The per-metric variant comparison.
//!

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::metric::Metric;
use crate::table::Table;
use crate::variant::Variant;

///
/// One artifact's values and degradations across the variants.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The artifact name.
    pub artifact: String,
    /// The per-variant metric values. A missing combination stays absent,
    /// never zero.
    pub values: BTreeMap<Variant, Option<f64>>,
    /// The per-variant degradation percentages against the reference
    /// variant. Missing when either side is missing.
    pub degradations: BTreeMap<Variant, Option<f64>>,
}

///
/// The per-metric variant comparison: one row per distinct artifact name,
/// one column per variant.
///
#[derive(Debug)]
pub struct Comparison {
    /// The compared metric.
    pub metric: Metric,
    /// The comparison rows, sorted by artifact name.
    pub rows: Vec<Row>,
}

impl Comparison {
    ///
    /// Builds the comparison for one metric from the summary table.
    ///
    /// The `Average` pseudo-records participate like any other row, so the
    /// per-variant averages appear in the charts alongside the artifacts.
    ///
    pub fn from_table(table: &Table, metric: Metric) -> Self {
        let names: BTreeSet<String> = table
            .records
            .iter()
            .map(|record| record.artifact.clone())
            .collect();

        let rows = names
            .into_iter()
            .map(|artifact| {
                let mut values = BTreeMap::new();
                for variant in Variant::ALL {
                    let value = table
                        .records
                        .iter()
                        .find(|record| record.artifact == artifact && record.variant == variant)
                        .and_then(|record| record.value(metric));
                    values.insert(variant, value);
                }

                let reference = values
                    .get(&Variant::reference())
                    .copied()
                    .flatten();
                let mut degradations = BTreeMap::new();
                for variant in Variant::ALL {
                    if variant == Variant::reference() {
                        continue;
                    }
                    degradations.insert(
                        variant,
                        degradation(reference, values.get(&variant).copied().flatten()),
                    );
                }

                Row {
                    artifact,
                    values,
                    degradations,
                }
            })
            .collect();

        Self { metric, rows }
    }
}

///
/// The degradation percentage of `value` against `reference`:
/// `(value - reference) / reference * 100`.
///
/// Missing when either side is missing; a missing reference never turns
/// into a division error or a zero.
///
pub fn degradation(reference: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (reference, value) {
        (Some(reference), Some(value)) => Some((value - reference) / reference * 100.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use crate::metric::Metric;
    use crate::record::Record;
    use crate::table::Table;
    use crate::variant::Variant;

    use super::degradation;
    use super::Comparison;

    fn record(artifact: &str, variant: Variant, cycles: f64) -> Record {
        let mut values: BTreeMap<Metric, Option<f64>> =
            Metric::ALL.into_iter().map(|metric| (metric, None)).collect();
        values.insert(Metric::Cycles, Some(cycles));
        Record::new(artifact.to_owned(), variant, values)
    }

    fn table(records: Vec<Record>) -> Table {
        Table {
            path: PathBuf::from("unused.csv"),
            records,
        }
    }

    #[test]
    fn degradation_formula() {
        assert_eq!(degradation(Some(100.0), Some(150.0)), Some(50.0));
        assert_eq!(degradation(Some(200.0), Some(100.0)), Some(-50.0));
    }

    #[test]
    fn degradation_with_missing_reference() {
        assert_eq!(degradation(None, Some(100.0)), None);
        assert_eq!(degradation(Some(100.0), None), None);
        assert_eq!(degradation(None, None), None);
    }

    #[test]
    fn missing_variant_stays_absent() {
        let table = table(vec![record("dijkstra_int32", Variant::Protected, 5000.0)]);
        let comparison = Comparison::from_table(&table, Metric::Cycles);

        assert_eq!(comparison.rows.len(), 1);
        let row = &comparison.rows[0];
        assert_eq!(row.values[&Variant::Protected], Some(5000.0));
        assert_eq!(row.values[&Variant::Original], None);
        assert_eq!(row.values[&Variant::NoExtension], None);
        assert_eq!(row.degradations[&Variant::Protected], None);
    }

    #[test]
    fn degradations_against_reference() {
        let table = table(vec![
            record("matmult_double", Variant::NoExtension, 1000.0),
            record("matmult_double", Variant::Original, 1100.0),
            record("matmult_double", Variant::Protected, 1500.0),
        ]);
        let comparison = Comparison::from_table(&table, Metric::Cycles);

        let row = &comparison.rows[0];
        let original = row.degradations[&Variant::Original].expect("Always exists");
        assert!((original - 10.0).abs() < 1e-9);
        assert_eq!(row.degradations[&Variant::Protected], Some(50.0));
        assert!(!row.degradations.contains_key(&Variant::NoExtension));
    }
}
