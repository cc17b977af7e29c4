//!
//! The benchmark build driver.
//!

use std::path::Path;
use std::path::PathBuf;

use colored::Colorize;

use bench_analyzer::Variant;

use crate::configuration::Configuration;
use crate::report::Report;

///
/// The benchmark build driver.
///
/// Cross-compiles every benchmark source of a variant with the external
/// toolchain. A failing compilation is recorded and reported but never
/// aborts the pass.
///
#[derive(Debug)]
pub struct Builder {
    /// The runner configuration.
    configuration: Configuration,
}

impl Builder {
    ///
    /// A shortcut constructor.
    ///
    /// Verifies the compiler executable is reachable before any source is
    /// processed.
    ///
    pub fn new(configuration: Configuration) -> anyhow::Result<Self> {
        if let Err(error) = which::which(configuration.clang_executable.as_str()) {
            anyhow::bail!(
                "The `{}` executable not found in ${{PATH}}: {error}",
                configuration.clang_executable,
            );
        }
        Ok(Self { configuration })
    }

    ///
    /// Compiles every source of a variant and returns the pass report.
    ///
    /// Sources are expected one benchmark folder deep:
    /// `benchmarks/{variant}/{folder}/{file}.c`.
    ///
    pub fn build_all(&self, variant: Variant) -> anyhow::Result<Report> {
        let source_directory = self.configuration.source_directory(variant);
        if !source_directory.is_dir() {
            anyhow::bail!("Benchmark directory {source_directory:?} not found");
        }

        let artifact_directory = self.configuration.artifact_directory(variant);
        std::fs::create_dir_all(artifact_directory.as_path()).map_err(|error| {
            anyhow::anyhow!("Build directory {artifact_directory:?} creating: {error}")
        })?;

        println!("Start compile...");
        let mut report = Report::default();
        for source_path in Self::enumerate_sources(source_directory.as_path())? {
            let name = source_path
                .strip_prefix(source_directory.as_path())
                .unwrap_or(source_path.as_path())
                .display()
                .to_string();

            match self.compile(source_path.as_path(), artifact_directory.as_path()) {
                Ok(()) => {
                    println!("[{}] {name} compiled", "Success".green());
                    report.passed.push(name);
                }
                Err(error) => {
                    eprintln!("{error:?}");
                    println!("* [{}] {name} compilation failed", "Failed".bright_red());
                    report.failed.push(name);
                }
            }
        }

        print!("{report}");
        Ok(report)
    }

    ///
    /// Compiles one source file into the artifact directory.
    ///
    fn compile(&self, source_path: &Path, artifact_directory: &Path) -> anyhow::Result<()> {
        let stem = source_path
            .file_stem()
            .ok_or_else(|| anyhow::anyhow!("Source file {source_path:?} has no stem"))?;
        let output_path = artifact_directory.join(stem);

        let output = std::process::Command::new(self.configuration.clang_executable.as_str())
            .arg(format!(
                "--gcc-toolchain={}",
                self.configuration.gcc_toolchain.display()
            ))
            .arg("-target")
            .arg(self.configuration.target_triple.as_str())
            .arg(format!("-march={}", self.configuration.march))
            .arg(format!("-mabi={}", self.configuration.mabi))
            .arg(source_path)
            .arg("-o")
            .arg(output_path.as_path())
            .arg("-lm")
            .output()
            .map_err(|error| {
                anyhow::anyhow!(
                    "{} subprocess spawning error: {error:?}",
                    self.configuration.clang_executable,
                )
            })?;

        if !output.status.success() {
            anyhow::bail!(
                "{} error: {}",
                self.configuration.clang_executable,
                String::from_utf8_lossy(output.stderr.as_slice()),
            );
        }

        Ok(())
    }

    ///
    /// Enumerates the `.c` sources one benchmark folder below the root.
    ///
    fn enumerate_sources(source_directory: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut sources = Vec::new();
        for folder in sorted_entries(source_directory)? {
            if !folder.is_dir() {
                continue;
            }
            for file in sorted_entries(folder.as_path())? {
                if file.extension().map(|extension| extension == "c").unwrap_or(false) {
                    sources.push(file);
                }
            }
        }
        Ok(sources)
    }
}

///
/// Returns the directory entries sorted by path for deterministic passes.
///
pub(crate) fn sorted_entries(directory: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(directory)
        .map_err(|error| anyhow::anyhow!("Directory {directory:?} reading: {error}"))?
    {
        let entry = entry
            .map_err(|error| anyhow::anyhow!("Directory {directory:?} reading: {error}"))?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}
