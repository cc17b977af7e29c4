//!
//! One trial's parsed metrics.
//!

use std::collections::BTreeMap;

use bench_analyzer::stats;
use bench_analyzer::Metric;

///
/// One trial's parsed metrics.
///
/// `None` marks a metric whose pattern was absent from the trial's
/// diagnostic output; such values are excluded from averaging instead of
/// being treated as zero.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trial {
    /// The per-metric extracted values.
    pub values: BTreeMap<Metric, Option<f64>>,
}

impl Trial {
    ///
    /// Returns the value of a metric, if it was extracted.
    ///
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied().flatten()
    }

    ///
    /// Averages each metric over the trials in which it was present.
    ///
    /// A metric absent from every trial stays absent in the result.
    ///
    pub fn average(trials: &[Self]) -> BTreeMap<Metric, Option<f64>> {
        let mut averages = BTreeMap::new();
        for metric in Metric::ALL {
            let samples: Vec<f64> = trials
                .iter()
                .filter_map(|trial| trial.value(metric))
                .collect();
            averages.insert(metric, stats::mean(samples.as_slice()));
        }
        averages
    }
}

#[cfg(test)]
mod tests {
    use bench_analyzer::Metric;

    use super::Trial;

    fn trial_with_cycles(cycles: Option<f64>) -> Trial {
        let mut trial = Trial::default();
        for metric in Metric::ALL {
            trial.values.insert(metric, Some(10.0));
        }
        trial.values.insert(Metric::Cycles, cycles);
        trial
    }

    #[test]
    fn average_skips_unavailable_values() {
        // 20 trials, 18 report cycle counts around one million, 2 do not.
        let mut trials = Vec::with_capacity(20);
        for index in 0..18 {
            trials.push(trial_with_cycles(Some(1_000_000.0 + index as f64)));
        }
        trials.push(trial_with_cycles(None));
        trials.push(trial_with_cycles(None));

        let averages = Trial::average(trials.as_slice());
        let expected = (0..18).map(|index| 1_000_000.0 + index as f64).sum::<f64>() / 18.0;
        assert_eq!(averages[&Metric::Cycles], Some(expected));
        assert_eq!(averages[&Metric::Instructions], Some(10.0));
    }

    #[test]
    fn metric_absent_everywhere_stays_absent() {
        let trials = vec![trial_with_cycles(None), trial_with_cycles(None)];
        let averages = Trial::average(trials.as_slice());
        assert_eq!(averages[&Metric::Cycles], None);
    }

    #[test]
    fn no_trials_yield_no_averages() {
        let averages = Trial::average(&[]);
        for metric in Metric::ALL {
            assert_eq!(averages[&metric], None);
        }
    }
}
