//! Common routines for reading input data.
//!
//! All input files are semicolon-delimited CSV, encoded as UTF-8 (a leading
//! byte-order mark is tolerated).
use anyhow::{Context, Result, ensure};
use serde::de::DeserializeOwned;
use std::path::Path;

/// The delimiter used by all input and output CSV files
pub const CSV_DELIMITER: u8 = b';';

/// Read a series of rows of type `T` from a semicolon-delimited CSV file.
///
/// Fields are trimmed of surrounding whitespace. Fails if the file is missing,
/// malformed or empty.
pub fn read_csv_rows<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let error_context = || format!("Error reading {}", file_path.display());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .trim(csv::Trim::All)
        .from_path(file_path)
        .with_context(error_context)?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.with_context(error_context)?);
    }
    ensure!(!rows.is_empty(), "{}: CSV file cannot be empty", file_path.display());

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[derive(Deserialize, PartialEq, Debug)]
    struct Row {
        id: String,
        value: u32,
    }

    #[test]
    fn test_read_csv_rows() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("rows.csv");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "id;value\na; 1\nb;2").unwrap();

        assert_eq!(
            read_csv_rows::<Row>(&file_path).unwrap(),
            vec![
                Row {
                    id: "a".to_string(),
                    value: 1
                },
                Row {
                    id: "b".to_string(),
                    value: 2
                }
            ]
        );
    }

    #[test]
    fn test_read_csv_rows_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("rows.csv");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "id;value").unwrap();

        assert!(read_csv_rows::<Row>(&file_path).is_err());
    }

    #[test]
    fn test_read_csv_rows_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_csv_rows::<Row>(&dir.path().join("nope.csv")).is_err());
    }
}
