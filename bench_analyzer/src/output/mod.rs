//!
//! Report workbooks for the performance data.
//!

pub mod box_plot;
pub mod comparison;
pub mod distribution;
pub mod style;

use std::path::Path;

///
/// Saves a rendered workbook to `{directory}/{title}.xlsx`.
///
pub fn save(
    mut workbook: rust_xlsxwriter::Workbook,
    directory: &Path,
    title: &str,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(directory)
        .map_err(|error| anyhow::anyhow!("Report directory {directory:?} creating: {error}"))?;
    let path = directory.join(format!("{title}.xlsx"));
    workbook
        .save(path.as_path())
        .map_err(|error| anyhow::anyhow!("Report file {path:?} writing: {error}"))?;
    Ok(())
}
