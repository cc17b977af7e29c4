//!
//! The diagnostic output parser.
//!

use lazy_static::lazy_static;
use regex::Regex;

use bench_analyzer::Metric;

use crate::measurement::trial::Trial;

lazy_static! {
    /// The metric extraction patterns, matched against the combined
    /// `time -v` and `perf stat` diagnostic stream.
    static ref METRIC_PATTERNS: Vec<(Metric, Regex)> = vec![
        (
            Metric::Cycles,
            Regex::new(r"(\d+(?:,\d+)*)\s+cycles").expect("Always valid"),
        ),
        (
            Metric::Instructions,
            Regex::new(r"(\d+(?:,\d+)*)\s+instructions").expect("Always valid"),
        ),
        (
            Metric::CacheMisses,
            Regex::new(r"(\d+(?:,\d+)*)\s+cache-misses").expect("Always valid"),
        ),
        (
            Metric::CacheReferences,
            Regex::new(r"(\d+(?:,\d+)*)\s+cache-references").expect("Always valid"),
        ),
        (
            Metric::ElapsedTime,
            Regex::new(r"([\d.]+) seconds time elapsed").expect("Always valid"),
        ),
        (
            Metric::UserTime,
            Regex::new(r"([\d.]+) seconds user").expect("Always valid"),
        ),
        (
            Metric::SystemTime,
            Regex::new(r"([\d.]+) seconds sys").expect("Always valid"),
        ),
        (
            Metric::CpuPercentage,
            Regex::new(r"Percent of CPU this job got: (\d+)%").expect("Always valid"),
        ),
        (
            Metric::MaxResidentSet,
            Regex::new(r"Maximum resident set size \(kbytes\): (\d+)").expect("Always valid"),
        ),
    ];
}

///
/// Extracts the tracked metrics from one trial's diagnostic text.
///
/// A metric whose pattern does not match is unavailable for the trial,
/// not zero. Counter values use thousands separators, which are stripped
/// before parsing.
///
pub fn parse_diagnostics(diagnostics: &str) -> Trial {
    let mut trial = Trial::default();
    for (metric, pattern) in METRIC_PATTERNS.iter() {
        let value = pattern
            .captures(diagnostics)
            .and_then(|captures| captures.get(1))
            .and_then(|group| group.as_str().replace(',', "").parse::<f64>().ok());
        trial.values.insert(*metric, value);
    }
    trial
}

#[cfg(test)]
mod tests {
    use bench_analyzer::Metric;

    use super::parse_diagnostics;

    /// A realistic combined `time -v` + `perf stat` diagnostic stream.
    const DIAGNOSTICS: &str = r#"
	Command being timed: "perf stat -e cycles,instructions,cache-misses,cache-references qemu-riscv64 build/protected/coulomb_double"
	User time (seconds): 1.52
	System time (seconds): 0.08
	Percent of CPU this job got: 98%
	Maximum resident set size (kbytes): 131072

 Performance counter stats for 'qemu-riscv64 build/protected/coulomb_double':

     4,392,154,822      cycles
     8,113,992,154      instructions
         1,204,211      cache-misses
        44,091,583      cache-references

       1.523481972 seconds time elapsed

       1.422103000 seconds user
       0.081201000 seconds sys
"#;

    #[test]
    fn full_extraction() {
        let trial = parse_diagnostics(DIAGNOSTICS);
        assert_eq!(trial.value(Metric::Cycles), Some(4392154822.0));
        assert_eq!(trial.value(Metric::Instructions), Some(8113992154.0));
        assert_eq!(trial.value(Metric::CacheMisses), Some(1204211.0));
        assert_eq!(trial.value(Metric::CacheReferences), Some(44091583.0));
        assert_eq!(trial.value(Metric::ElapsedTime), Some(1.523481972));
        assert_eq!(trial.value(Metric::UserTime), Some(1.422103));
        assert_eq!(trial.value(Metric::SystemTime), Some(0.081201));
        assert_eq!(trial.value(Metric::CpuPercentage), Some(98.0));
        assert_eq!(trial.value(Metric::MaxResidentSet), Some(131072.0));
    }

    #[test]
    fn missing_counter_is_unavailable() {
        let diagnostics = r#"
	Percent of CPU this job got: 97%
	Maximum resident set size (kbytes): 65536

     1,000,000      cycles

       0.5 seconds time elapsed
"#;
        let trial = parse_diagnostics(diagnostics);
        assert_eq!(trial.value(Metric::Cycles), Some(1000000.0));
        assert_eq!(trial.value(Metric::Instructions), None);
        assert_eq!(trial.value(Metric::CacheMisses), None);
        assert_eq!(trial.value(Metric::ElapsedTime), Some(0.5));
    }

    #[test]
    fn empty_diagnostics() {
        let trial = parse_diagnostics("");
        for metric in Metric::ALL {
            assert_eq!(trial.value(metric), None);
        }
    }
}
