//!
//! The benchmark runner executable.
//!

pub(crate) mod arguments;

use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use self::arguments::Arguments;
use self::arguments::Command;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(|error| anyhow::anyhow!(error))
        .and_then(main_inner)
    {
        Ok(()) => bench_analyzer::EXIT_CODE_SUCCESS,
        Err(error) => {
            eprintln!("{error:?}");
            bench_analyzer::EXIT_CODE_FAILURE
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    println!(
        "    {} {} v{}",
        "Starting".bright_green().bold(),
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    let configuration = match arguments.config_path {
        Some(path) => bench_runner::Configuration::try_from_path(path.as_path())?,
        None => bench_runner::Configuration::default(),
    };

    let start_time = Instant::now();
    let variants = arguments.command.variants();
    match arguments.command {
        Command::Build { .. } => {
            let builder = bench_runner::Builder::new(configuration)?;
            for variant in variants {
                println!(
                    "   {} `{variant}` benchmarks",
                    "Compiling".bright_green().bold(),
                );
                builder.build_all(variant)?;
            }
        }
        Command::Measure { iterations, .. } => {
            // A fresh pass starts from an empty, reheadered table so
            // back-to-back passes never accumulate duplicate rows.
            let mut table =
                bench_analyzer::Table::reset(configuration.data_path.as_path())?;

            let tester = bench_runner::Tester::new(configuration, iterations);
            for variant in variants {
                println!(
                    "   {} `{variant}` artifacts with {iterations} trials each",
                    "Measuring".bright_green().bold(),
                );
                tester.measure_all(variant, &mut table)?;
            }
        }
    }

    println!(
        "    {} in {}m{:02}s",
        "Finished".bright_green().bold(),
        start_time.elapsed().as_secs() / 60,
        start_time.elapsed().as_secs() % 60,
    );

    Ok(())
}
