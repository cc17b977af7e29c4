//!
//! The benchmark performance analyzer library.
//!

pub mod comparison;
pub mod metric;
pub mod output;
pub mod record;
pub mod stats;
pub mod table;
pub mod trials;
pub mod variant;

pub use crate::comparison::degradation;
pub use crate::comparison::Comparison;
pub use crate::metric::Metric;
pub use crate::record::Record;
pub use crate::stats::FiveNumberSummary;
pub use crate::table::Table;
pub use crate::trials::TrialSet;
pub use crate::variant::Variant;

/// The process exit code of a successful run.
pub const EXIT_CODE_SUCCESS: i32 = 0;

/// The process exit code of a failed run.
pub const EXIT_CODE_FAILURE: i32 = 1;
