//!
//! The benchmark runner arguments.
//!

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use bench_analyzer::Variant;

///
/// The benchmark runner arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// The configuration file overriding the default tool locations and
    /// directory conventions.
    #[arg(long = "config")]
    pub config_path: Option<PathBuf>,

    /// The pipeline stage to run.
    #[command(subcommand)]
    pub command: Command,
}

///
/// The pipeline stage to run.
///
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cross-compiles the benchmark corpus of the selected variants.
    Build {
        /// The variants to build. All variants if unset.
        #[arg(long = "variant")]
        variants: Vec<Variant>,
    },
    /// Measures the built artifacts of the selected variants.
    Measure {
        /// The variants to measure. All variants if unset.
        #[arg(long = "variant")]
        variants: Vec<Variant>,

        /// The number of measured trials per artifact.
        #[arg(long = "iterations", default_value_t = 20)]
        iterations: usize,
    },
}

impl Command {
    ///
    /// Returns the selected variants, defaulting to all of them.
    ///
    pub fn variants(&self) -> Vec<Variant> {
        let variants = match self {
            Self::Build { variants } => variants,
            Self::Measure { variants, .. } => variants,
        };
        if variants.is_empty() {
            Variant::ALL.to_vec()
        } else {
            variants.clone()
        }
    }
}
