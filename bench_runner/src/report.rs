//!
//! The per-pass success/failure report.
//!

use colored::Colorize;

///
/// The per-pass success/failure report.
///
/// Returned by value from each stage instead of being accumulated on the
/// driver, so a driver instance can be reused across passes.
///
#[derive(Debug, Default)]
pub struct Report {
    /// The names of the items that passed.
    pub passed: Vec<String>,
    /// The names of the items that failed.
    pub failed: Vec<String>,
}

impl Report {
    ///
    /// Whether every item of the pass succeeded.
    ///
    pub fn is_successful(&self) -> bool {
        self.failed.is_empty()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.passed.is_empty() {
            writeln!(f, "no success")?;
        } else {
            writeln!(f, "{}", "success:".green())?;
            for item in self.passed.iter() {
                writeln!(f, "- {item}")?;
            }
        }
        writeln!(f)?;

        if self.failed.is_empty() {
            writeln!(f, "no failed")?;
        } else {
            writeln!(f, "{}", "failed:".bright_red())?;
            for item in self.failed.iter() {
                writeln!(f, "- {item}")?;
            }
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::Report;

    #[test]
    fn success_flag() {
        let mut report = Report::default();
        assert!(report.is_successful());
        report.passed.push("qsort_int32".to_owned());
        assert!(report.is_successful());
        report.failed.push("dijkstra_int32".to_owned());
        assert!(!report.is_successful());
    }

    #[test]
    fn empty_report_display() {
        let report = Report::default();
        let text = format!("{report}");
        assert!(text.contains("no success"));
        assert!(text.contains("no failed"));
    }
}
