//!
//! The benchmark measurement driver.
//!

pub mod parser;
pub mod trial;

use std::path::Path;

use colored::Colorize;

use bench_analyzer::Record;
use bench_analyzer::Table;
use bench_analyzer::TrialSet;
use bench_analyzer::Variant;

use crate::builder::sorted_entries;
use crate::configuration::Configuration;
use crate::report::Report;

use self::trial::Trial;

///
/// The benchmark measurement driver.
///
/// Executes every built artifact of a variant under the instrumented
/// emulator for a fixed number of trials, averages the extracted metrics,
/// and appends one summary record per artifact to the persisted table.
///
#[derive(Debug)]
pub struct Tester {
    /// The runner configuration.
    configuration: Configuration,
    /// The number of measured trials per artifact.
    iterations: usize,
}

impl Tester {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(configuration: Configuration, iterations: usize) -> Self {
        Self {
            configuration,
            iterations,
        }
    }

    ///
    /// Measures every artifact of a variant and returns the pass report.
    ///
    /// One summary record per successfully measured artifact is appended
    /// to the table, and the raw per-trial rows are written to
    /// `{trials}/{artifact}-{variant}.csv`. An artifact whose trials fail
    /// produces no record at all and is therefore absent from downstream
    /// reports.
    ///
    pub fn measure_all(&self, variant: Variant, table: &mut Table) -> anyhow::Result<Report> {
        let artifact_directory = self.configuration.artifact_directory(variant);
        if !artifact_directory.is_dir() {
            anyhow::bail!("Build directory {artifact_directory:?} not found");
        }

        self.warm_up(variant)?;

        println!("Start test...");
        let mut report = Report::default();
        for artifact_path in sorted_entries(artifact_directory.as_path())? {
            if !artifact_path.is_file() {
                continue;
            }
            let name = match artifact_path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_owned(),
                None => continue,
            };

            match self.measure(artifact_path.as_path(), variant) {
                Ok(Some(trials)) => {
                    let averages = Trial::average(trials.as_slice());
                    table.append(Record::new(name.clone(), variant, averages))?;
                    self.write_trials(name.as_str(), variant, trials.as_slice())?;
                    println!("[{}] {name}", "Success".green());
                    report.passed.push(name);
                }
                Ok(None) => {
                    println!("* [{}] {name}", "Failed".bright_red());
                    report.failed.push(name);
                }
                Err(error) => {
                    eprintln!("{error:?}");
                    println!("* [{}] {name}", "Failed".bright_red());
                    report.failed.push(name);
                }
            }
        }

        print!("{report}");
        Ok(report)
    }

    ///
    /// Runs the designated warm-up artifact a few times to stabilize
    /// system caches, discarding all results.
    ///
    /// A missing warm-up artifact is not an error: the pass proceeds with
    /// cold caches.
    ///
    pub fn warm_up(&self, variant: Variant) -> anyhow::Result<()> {
        let artifact_path = self
            .configuration
            .artifact_directory(variant)
            .join(self.configuration.warm_up_artifact.as_str());
        if !artifact_path.is_file() {
            println!(
                "     {} warm-up artifact {artifact_path:?} not found, skipping warm-up",
                "Warning".bright_yellow().bold(),
            );
            return Ok(());
        }

        println!(
            "Starting warm-up for {} ({} iterations)...",
            self.configuration.warm_up_artifact, self.configuration.warm_up_iterations,
        );
        for _ in 0..self.configuration.warm_up_iterations {
            let _ = self
                .command(artifact_path.as_path(), variant)
                .output()
                .map_err(|error| {
                    anyhow::anyhow!(
                        "{:?} subprocess spawning error: {error:?}",
                        self.configuration.time_executable,
                    )
                })?;
        }
        println!("Warm-up completed.");
        Ok(())
    }

    ///
    /// Measures one artifact for the configured number of trials.
    ///
    /// Returns `None` if any trial exits with a nonzero status: the
    /// artifact is failed as a whole and no partial average is recorded.
    /// A metric missing from an otherwise successful trial only drops
    /// that metric from that trial. A record is only ever produced from
    /// at least one successful trial, so a zero trial count fails the
    /// artifact as well.
    ///
    fn measure(&self, artifact_path: &Path, variant: Variant) -> anyhow::Result<Option<Vec<Trial>>> {
        let mut trials = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let output = self
                .command(artifact_path, variant)
                .output()
                .map_err(|error| {
                    anyhow::anyhow!(
                        "{:?} subprocess spawning error: {error:?}",
                        self.configuration.time_executable,
                    )
                })?;

            if !output.status.success() {
                return Ok(None);
            }

            let diagnostics = String::from_utf8_lossy(output.stderr.as_slice());
            trials.push(parser::parse_diagnostics(diagnostics.as_ref()));
        }

        if trials.is_empty() {
            return Ok(None);
        }
        Ok(Some(trials))
    }

    ///
    /// Assembles the instrumented execution command for an artifact.
    ///
    fn command(&self, artifact_path: &Path, variant: Variant) -> std::process::Command {
        let mut command =
            std::process::Command::new(self.configuration.time_executable.as_path());
        command
            .arg("-v")
            .arg("perf")
            .arg("stat")
            .arg("-e")
            .arg(self.configuration.perf_events.as_str())
            .arg("-r")
            .arg(self.configuration.perf_repeats.to_string())
            .arg(self.configuration.emulator(variant))
            .arg(artifact_path);
        command
    }

    ///
    /// Writes the raw per-trial rows of one artifact.
    ///
    fn write_trials(
        &self,
        artifact: &str,
        variant: Variant,
        trials: &[Trial],
    ) -> anyhow::Result<()> {
        let directory = self.configuration.trials_directory.as_path();
        std::fs::create_dir_all(directory)
            .map_err(|error| anyhow::anyhow!("Trial directory {directory:?} creating: {error}"))?;

        let mut contents = String::with_capacity((trials.len() + 1) * 128);
        contents.push_str(TrialSet::header().as_str());
        contents.push('\n');
        for trial in trials.iter() {
            contents.push_str(TrialSet::row_to_csv(&trial.values).as_str());
            contents.push('\n');
        }

        let path = directory.join(format!("{artifact}-{variant}.csv"));
        std::fs::write(path.as_path(), contents)
            .map_err(|error| anyhow::anyhow!("Trial file {path:?} writing: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::path::PathBuf;

    use bench_analyzer::Table;
    use bench_analyzer::Variant;

    use crate::configuration::Configuration;

    use super::Tester;

    fn temporary_directory(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "bench-runner-measurement-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(path.as_path()).expect("Temporary directory creating");
        path
    }

    fn configuration_in(root: &Path) -> Configuration {
        let mut configuration = Configuration::default();
        configuration.build_directory = root.join("build");
        configuration.data_path = root.join("performance_data.csv");
        configuration.trials_directory = root.join("trials");
        configuration
    }

    fn write_artifact(configuration: &Configuration, variant: Variant, name: &str) {
        let directory = configuration.artifact_directory(variant);
        std::fs::create_dir_all(directory.as_path()).expect("Temporary directory creating");
        std::fs::write(directory.join(name), "").expect("Artifact file writing");
    }

    #[test]
    fn zero_trials_write_no_record() {
        let root = temporary_directory("zero-trials");
        let configuration = configuration_in(root.as_path());
        write_artifact(&configuration, Variant::Original, "qsort_int32");
        let trial_path = configuration
            .trials_directory
            .join("qsort_int32-original.csv");

        let mut table =
            Table::reset(configuration.data_path.as_path()).expect("Table resetting");
        let tester = Tester::new(configuration, 0);
        let report = tester
            .measure_all(Variant::Original, &mut table)
            .expect("Measurement pass");

        assert!(table.records.is_empty());
        assert_eq!(report.failed, vec!["qsort_int32".to_owned()]);
        assert!(!trial_path.exists());

        std::fs::remove_dir_all(root).expect("Temporary directory removing");
    }

    #[test]
    fn failing_trials_write_no_record() {
        let root = temporary_directory("failing-trials");
        let mut configuration = configuration_in(root.as_path());
        configuration.time_executable = PathBuf::from("/bin/false");
        write_artifact(&configuration, Variant::Protected, "dijkstra_int32");
        let trial_path = configuration
            .trials_directory
            .join("dijkstra_int32-protected.csv");

        let mut table =
            Table::reset(configuration.data_path.as_path()).expect("Table resetting");
        let tester = Tester::new(configuration, 3);
        let report = tester
            .measure_all(Variant::Protected, &mut table)
            .expect("Measurement pass");

        assert!(table.records.is_empty());
        assert_eq!(report.failed, vec!["dijkstra_int32".to_owned()]);
        assert!(!report.is_successful());
        assert!(!trial_path.exists());

        std::fs::remove_dir_all(root).expect("Temporary directory removing");
    }
}
