//!
//! The benchmark runner configuration.
//!

use std::path::Path;
use std::path::PathBuf;

use bench_analyzer::Variant;

///
/// The benchmark runner configuration.
///
/// Holds every external-tool location, command-line fragment, and
/// directory convention. All variant routing goes through this table,
/// so a variant can never be mapped onto a misspelled path.
///
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// The cross-compiler executable.
    pub clang_executable: String,
    /// The GCC toolchain root passed to clang.
    pub gcc_toolchain: PathBuf,
    /// The compilation target triple.
    pub target_triple: String,
    /// The target architecture string, including the extension letters.
    pub march: String,
    /// The target ABI.
    pub mabi: String,

    /// The benchmark source root, holding one subdirectory per variant.
    pub benchmarks_directory: PathBuf,
    /// The build output root, holding one subdirectory per variant.
    pub build_directory: PathBuf,
    /// The persisted performance summary table.
    pub data_path: PathBuf,
    /// The directory the per-trial CSV files are written to.
    pub trials_directory: PathBuf,

    /// The `time` executable wrapping the measured command.
    pub time_executable: PathBuf,
    /// The performance counters passed to `perf stat -e`.
    pub perf_events: String,
    /// The `perf stat -r` repetition count within one trial.
    pub perf_repeats: u32,
    /// The emulator built with the security extension.
    pub extended_emulator: PathBuf,
    /// The vanilla emulator used for the `no_extension` variant.
    pub vanilla_emulator: PathBuf,

    /// The artifact executed during warm-up.
    pub warm_up_artifact: String,
    /// The number of discarded warm-up executions.
    pub warm_up_iterations: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        let home = home_directory();
        Self {
            clang_executable: "clang".to_owned(),
            gcc_toolchain: home.join("tools/riscv"),
            target_triple: "riscv64-unknown-elf".to_owned(),
            march: "rv64gc_xs".to_owned(),
            mabi: "lp64d".to_owned(),

            benchmarks_directory: PathBuf::from("benchmarks"),
            build_directory: PathBuf::from("build"),
            data_path: PathBuf::from("data/performance_data.csv"),
            trials_directory: PathBuf::from("data/trials"),

            time_executable: PathBuf::from("/usr/bin/time"),
            perf_events: "cycles,instructions,cache-misses,cache-references".to_owned(),
            perf_repeats: 100,
            extended_emulator: PathBuf::from("qemu-riscv64"),
            vanilla_emulator: home.join("tools/evaluation/qemu/build/qemu-riscv64"),

            warm_up_artifact: "coulomb_double".to_owned(),
            warm_up_iterations: 5,
        }
    }
}

impl Configuration {
    ///
    /// Loads the configuration from a JSON file.
    ///
    pub fn try_from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Configuration file {path:?} reading: {error}"))?;
        let configuration: Self = serde_json::from_str(text.as_str())
            .map_err(|error| anyhow::anyhow!("Configuration file {path:?} parsing: {error}"))?;
        Ok(configuration)
    }

    ///
    /// Returns the source directory of a variant.
    ///
    pub fn source_directory(&self, variant: Variant) -> PathBuf {
        self.benchmarks_directory.join(variant.to_string())
    }

    ///
    /// Returns the build output directory of a variant.
    ///
    pub fn artifact_directory(&self, variant: Variant) -> PathBuf {
        self.build_directory.join(variant.to_string())
    }

    ///
    /// Returns the emulator executing a variant's artifacts.
    ///
    /// The `no_extension` variant runs on the vanilla emulator; the other
    /// variants require the security-extension build.
    ///
    pub fn emulator(&self, variant: Variant) -> &Path {
        match variant {
            Variant::NoExtension => self.vanilla_emulator.as_path(),
            Variant::Original | Variant::Protected => self.extended_emulator.as_path(),
        }
    }
}

///
/// Returns the home directory, falling back to the current directory.
///
fn home_directory() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use bench_analyzer::Variant;

    use super::Configuration;

    #[test]
    fn variant_routing() {
        let configuration = Configuration::default();
        assert_eq!(
            configuration.emulator(Variant::NoExtension),
            configuration.vanilla_emulator.as_path()
        );
        assert_eq!(
            configuration.emulator(Variant::Original),
            configuration.extended_emulator.as_path()
        );
        assert_eq!(
            configuration.emulator(Variant::Protected),
            configuration.extended_emulator.as_path()
        );
    }

    #[test]
    fn variant_directories() {
        let configuration = Configuration::default();
        assert_eq!(
            configuration.source_directory(Variant::Protected),
            std::path::PathBuf::from("benchmarks/protected")
        );
        assert_eq!(
            configuration.artifact_directory(Variant::NoExtension),
            std::path::PathBuf::from("build/no_extension")
        );
    }

    #[test]
    fn json_overrides() {
        let configuration: Configuration =
            serde_json::from_str(r#"{ "perf_repeats": 10, "march": "rv64gc" }"#)
                .expect("Always valid");
        assert_eq!(configuration.perf_repeats, 10);
        assert_eq!(configuration.march, "rv64gc");
        assert_eq!(configuration.mabi, "lp64d");
    }
}
