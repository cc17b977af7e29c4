//!
//! The benchmark analyzer binary.
//!

pub(crate) mod arguments;

use std::str::FromStr;

use clap::Parser;
use colored::Colorize;

use self::arguments::Arguments;

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

    let metrics = if arguments.metrics.is_empty() {
        bench_analyzer::Metric::ALL.to_vec()
    } else {
        arguments
            .metrics
            .iter()
            .map(|name| bench_analyzer::Metric::from_str(name.as_str()))
            .collect::<anyhow::Result<Vec<bench_analyzer::Metric>>>()?
    };

    let mut table = bench_analyzer::Table::load(arguments.data_path.as_path())?;

    if !arguments.no_averages {
        for variant in bench_analyzer::Variant::ALL {
            table.recalculate_average(variant)?;
            println!(
                "   {} `{variant}` averages",
                "Recomputed".bright_green().bold(),
            );
        }
    }

    for metric in metrics.iter() {
        let comparison = bench_analyzer::Comparison::from_table(&table, *metric);
        let workbook = bench_analyzer::output::comparison::render(&comparison)?;
        bench_analyzer::output::save(
            workbook,
            arguments.reports_path.as_path(),
            format!("Analysis of {metric}").as_str(),
        )?;
        println!("    {} `Analysis of {metric}`", "Rendered".bright_green().bold());
    }

    if arguments.trials_path.is_dir() {
        let trials = bench_analyzer::TrialSet::load_directory(arguments.trials_path.as_path())?;
        for metric in metrics.iter() {
            let workbook = bench_analyzer::output::box_plot::render(&trials, *metric)?;
            bench_analyzer::output::save(
                workbook,
                arguments.reports_path.as_path(),
                format!("Box Diagram of {metric}").as_str(),
            )?;
            println!(
                "    {} `Box Diagram of {metric}`",
                "Rendered".bright_green().bold(),
            );

            let workbook = bench_analyzer::output::distribution::render(&trials, *metric)?;
            bench_analyzer::output::save(
                workbook,
                arguments.reports_path.as_path(),
                format!("Distribution Visualization of {metric}").as_str(),
            )?;
            println!(
                "    {} `Distribution Visualization of {metric}`",
                "Rendered".bright_green().bold(),
            );
        }
    } else {
        println!(
            "     {} per-trial data {:?} not found, skipping box and distribution reports",
            "Warning".bright_yellow().bold(),
            arguments.trials_path,
        );
    }

    println!("    {} rendering reports", "Finished".bright_green().bold());
    Ok(())
}
