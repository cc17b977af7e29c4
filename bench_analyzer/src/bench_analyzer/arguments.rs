//!
//! The benchmark analyzer arguments.
//!

use std::path::PathBuf;

use clap::Parser;

///
/// The benchmark analyzer arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// The performance summary table produced by the measurement stage.
    #[arg(long = "data", default_value = "data/performance_data.csv")]
    pub data_path: PathBuf,

    /// The directory of per-trial CSV files, named `{artifact}-{variant}.csv`.
    /// Box and distribution reports are skipped if it does not exist.
    #[arg(long = "trials", default_value = "data/trials")]
    pub trials_path: PathBuf,

    /// The directory the report workbooks are written to.
    #[arg(long = "reports", default_value = "reports")]
    pub reports_path: PathBuf,

    /// The metrics to render reports for. All tracked metrics if unset.
    #[arg(long = "metric")]
    pub metrics: Vec<String>,

    /// Skip recomputing the per-variant `Average` rows.
    #[arg(long = "no-averages")]
    pub no_averages: bool,
}
