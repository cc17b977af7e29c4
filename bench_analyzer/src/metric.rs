//!
//! The tracked performance metric.
//!

use std::str::FromStr;

///
/// The tracked performance metric.
///
/// The discriminant order is the column order of the persisted table.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Metric {
    /// CPU cycles reported by `perf stat`.
    Cycles,
    /// Retired instructions reported by `perf stat`.
    Instructions,
    /// Cache misses reported by `perf stat`.
    CacheMisses,
    /// Cache references reported by `perf stat`.
    CacheReferences,
    /// Wall-clock seconds reported by `perf stat`.
    ElapsedTime,
    /// User CPU seconds reported by `time -v`.
    UserTime,
    /// System CPU seconds reported by `time -v`.
    SystemTime,
    /// CPU utilization percentage reported by `time -v`.
    CpuPercentage,
    /// Peak resident set size in kbytes reported by `time -v`.
    MaxResidentSet,
}

impl Metric {
    /// All metrics in persisted column order.
    pub const ALL: [Self; 9] = [
        Self::Cycles,
        Self::Instructions,
        Self::CacheMisses,
        Self::CacheReferences,
        Self::ElapsedTime,
        Self::UserTime,
        Self::SystemTime,
        Self::CpuPercentage,
        Self::MaxResidentSet,
    ];
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "Cycles" => Ok(Self::Cycles),
            "Instructions" => Ok(Self::Instructions),
            "Cache Misses" => Ok(Self::CacheMisses),
            "Cache References" => Ok(Self::CacheReferences),
            "Elapsed Time" => Ok(Self::ElapsedTime),
            "User Time" => Ok(Self::UserTime),
            "System Time" => Ok(Self::SystemTime),
            "CPU Percentage" => Ok(Self::CpuPercentage),
            "Maximum resident set size (kbytes)" => Ok(Self::MaxResidentSet),
            _ => Err(anyhow::anyhow!(
                "Unknown metric `{}`. Supported metrics: {}",
                string,
                Self::ALL
                    .into_iter()
                    .map(|metric| metric.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            )),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cycles => write!(f, "Cycles"),
            Self::Instructions => write!(f, "Instructions"),
            Self::CacheMisses => write!(f, "Cache Misses"),
            Self::CacheReferences => write!(f, "Cache References"),
            Self::ElapsedTime => write!(f, "Elapsed Time"),
            Self::UserTime => write!(f, "User Time"),
            Self::SystemTime => write!(f, "System Time"),
            Self::CpuPercentage => write!(f, "CPU Percentage"),
            Self::MaxResidentSet => write!(f, "Maximum resident set size (kbytes)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Metric;

    #[test]
    fn string_round_trip() {
        for metric in Metric::ALL {
            let parsed = Metric::from_str(metric.to_string().as_str()).expect("Always parseable");
            assert_eq!(metric, parsed);
        }
    }

    #[test]
    fn column_order_is_stable() {
        assert_eq!(Metric::ALL[0], Metric::Cycles);
        assert_eq!(Metric::ALL[8], Metric::MaxResidentSet);
    }
}
