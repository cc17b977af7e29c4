//!
//! End-to-end tests for the analyzer data path.
//!

use std::collections::BTreeMap;
use std::path::PathBuf;

use bench_analyzer::Comparison;
use bench_analyzer::Metric;
use bench_analyzer::Record;
use bench_analyzer::Table;
use bench_analyzer::TrialSet;
use bench_analyzer::Variant;

fn temporary_directory(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "bench-analyzer-integration-{name}-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(path.as_path()).expect("Temporary directory creating");
    path
}

fn record(artifact: &str, variant: Variant, cycles: f64) -> Record {
    let mut values: BTreeMap<Metric, Option<f64>> = Metric::ALL
        .into_iter()
        .map(|metric| (metric, Some(cycles / 100.0)))
        .collect();
    values.insert(Metric::Cycles, Some(cycles));
    Record::new(artifact.to_owned(), variant, values)
}

#[test]
fn measurement_to_reports() {
    let root = temporary_directory("reports");
    let data_path = root.join("performance_data.csv");
    let reports_path = root.join("reports");

    let mut table = Table::reset(data_path.as_path()).expect("Table resetting");
    for (artifact, base) in [("coulomb_double", 4_000_000.0), ("qsort_int32", 90_000.0)] {
        table
            .append(record(artifact, Variant::NoExtension, base))
            .expect("Table appending");
        table
            .append(record(artifact, Variant::Original, base * 1.1))
            .expect("Table appending");
        table
            .append(record(artifact, Variant::Protected, base * 1.6))
            .expect("Table appending");
    }
    // Present under `protected` only: the chart row must keep the other
    // variants absent and compute no degradation for it.
    table
        .append(record("obscure_string", Variant::Protected, 300_000.0))
        .expect("Table appending");

    for variant in Variant::ALL {
        table
            .recalculate_average(variant)
            .expect("Average recalculating");
    }

    let comparison = Comparison::from_table(&table, Metric::Cycles);
    let lonely = comparison
        .rows
        .iter()
        .find(|row| row.artifact == "obscure_string")
        .expect("Always exists");
    assert_eq!(lonely.values[&Variant::NoExtension], None);
    assert_eq!(lonely.degradations[&Variant::Protected], None);

    let workbook =
        bench_analyzer::output::comparison::render(&comparison).expect("Report rendering");
    bench_analyzer::output::save(workbook, reports_path.as_path(), "Analysis of Cycles")
        .expect("Report saving");
    assert!(reports_path.join("Analysis of Cycles.xlsx").is_file());

    std::fs::remove_dir_all(root).expect("Temporary directory removing");
}

#[test]
fn trials_to_reports() {
    let root = temporary_directory("trials");
    let trials_path = root.join("trials");
    std::fs::create_dir_all(trials_path.as_path()).expect("Temporary directory creating");
    let reports_path = root.join("reports");

    for (name, cycles) in [
        ("matmult_double-no_extension.csv", [1000.0, 1020.0, 980.0]),
        ("matmult_double-original.csv", [1100.0, 1130.0, 1070.0]),
        ("matmult_double-protected.csv", [1600.0, 1580.0, 1620.0]),
    ] {
        let mut contents = format!("{}\n", TrialSet::header());
        for value in cycles {
            let mut values: BTreeMap<Metric, Option<f64>> = Metric::ALL
                .into_iter()
                .map(|metric| (metric, Some(1.0)))
                .collect();
            values.insert(Metric::Cycles, Some(value));
            contents.push_str(TrialSet::row_to_csv(&values).as_str());
            contents.push('\n');
        }
        std::fs::write(trials_path.join(name), contents).expect("Trial file writing");
    }

    let trials = TrialSet::load_directory(trials_path.as_path()).expect("Trial set loading");
    assert_eq!(trials.rows.len(), 9);

    let workbook =
        bench_analyzer::output::box_plot::render(&trials, Metric::Cycles).expect("Report rendering");
    bench_analyzer::output::save(workbook, reports_path.as_path(), "Box Diagram of Cycles")
        .expect("Report saving");
    assert!(reports_path.join("Box Diagram of Cycles.xlsx").is_file());

    let workbook = bench_analyzer::output::distribution::render(&trials, Metric::Cycles)
        .expect("Report rendering");
    bench_analyzer::output::save(
        workbook,
        reports_path.as_path(),
        "Distribution Visualization of Cycles",
    )
    .expect("Report saving");
    assert!(reports_path
        .join("Distribution Visualization of Cycles.xlsx")
        .is_file());

    std::fs::remove_dir_all(root).expect("Temporary directory removing");
}
