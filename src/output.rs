//! The module responsible for writing summary tables to disk.
use crate::input::CSV_DELIMITER;
use crate::table::{Platform, SummaryRow};
use anyhow::{Context, Result};
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The UTF-8 byte-order mark, written first so spreadsheet tools detect the
/// encoding
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// The base name of exported summary files
const SUMMARY_FILE_STEM: &str = "tableau_tarifs";

/// The file name of the summary CSV exported for the given platform.
pub fn summary_file_name(platform: Option<Platform>) -> String {
    match platform {
        Some(platform) => format!("{SUMMARY_FILE_STEM}_{platform}.csv"),
        None => format!("{SUMMARY_FILE_STEM}.csv"),
    }
}

/// Create the results directory if it does not exist yet.
pub fn create_results_directory(results_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(results_dir)
        .with_context(|| format!("Could not create {}", results_dir.display()))?;

    Ok(results_dir.to_path_buf())
}

/// Write summary rows as a semicolon-delimited CSV file with a UTF-8 BOM.
///
/// Columns are `debut;fin;periode;prix_semaine_unit;prix_weekend_unit;
/// prix_semaine_7j`, with dates rendered `DD-MM-YYYY`.
pub fn write_summary_csv(file_path: &Path, rows: &[SummaryRow]) -> Result<()> {
    let error_context = || format!("Error writing {}", file_path.display());

    let mut file = File::create(file_path).with_context(error_context)?;
    file.write_all(UTF8_BOM).with_context(error_context)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_writer(file);
    for row in rows {
        writer.serialize(row).with_context(error_context)?;
    }
    writer.flush().with_context(error_context)?;

    Ok(())
}
