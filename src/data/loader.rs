use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use super::model::{BenchPoint, Dataset, derive_label};

/// Column holding the input size.
pub const SIZE_COLUMN: &str = "Size";
/// Column holding the amortized time per operation.
pub const TIME_COLUMN: &str = "Time";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one benchmark CSV file. The dataset is labelled after the file name.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let dataset = load_csv(file, derive_label(path))
        .with_context(|| format!("loading {}", path.display()))?;

    if dataset.is_empty() {
        log::warn!("{} has no data rows", path.display());
    }
    log::info!(
        "Loaded {} rows from {} as '{}'",
        dataset.len(),
        path.display(),
        dataset.label
    );
    Ok(dataset)
}

/// Load every path in order; the first failure aborts the whole run.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Dataset>> {
    paths.iter().map(|p| load_file(p.as_ref())).collect()
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Expected layout, as written by the benchmark harness:
///
/// ```text
/// Size,Time
/// 10, 0.0213
/// 15, 0.0198
/// ```
///
/// Whitespace around fields is ignored, other columns are ignored, and an
/// empty cell reads as NaN.
#[derive(Debug, Deserialize)]
struct BenchRecord {
    #[serde(rename = "Size")]
    size: Option<f64>,
    #[serde(rename = "Time")]
    time: Option<f64>,
}

pub fn load_csv<R: Read>(reader: R, label: impl Into<String>) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("reading CSV header")?;
    for column in [SIZE_COLUMN, TIME_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            bail!("CSV missing '{column}' column");
        }
    }

    let mut points = Vec::new();
    for (row_no, result) in reader.deserialize::<BenchRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        points.push(BenchPoint {
            size: record.size.unwrap_or(f64::NAN),
            time: record.time.unwrap_or(f64::NAN),
        });
    }

    Ok(Dataset::new(label, points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_size_and_time_columns() {
        let text = "Size,Time\n1,0.5\n2,0.3\n4,0.2\n";
        let ds = load_csv(text.as_bytes(), "run").unwrap();

        assert_eq!(ds.label, "run");
        assert_eq!(ds.sizes().collect::<Vec<_>>(), vec![1.0, 2.0, 4.0]);
        assert_eq!(ds.times().collect::<Vec<_>>(), vec![0.5, 0.3, 0.2]);
    }

    #[test]
    fn tolerates_space_after_comma() {
        let text = "Size,Time\n10, 0.0213\n15, 0.0198\n";
        let ds = load_csv(text.as_bytes(), "harness").unwrap();
        assert_eq!(
            ds.points,
            vec![
                BenchPoint { size: 10.0, time: 0.0213 },
                BenchPoint { size: 15.0, time: 0.0198 },
            ]
        );
    }

    #[test]
    fn ignores_extra_columns_and_order() {
        let text = "Time,Hasher,Size\n0.5,md5,8\n";
        let ds = load_csv(text.as_bytes(), "x").unwrap();
        assert_eq!(ds.points, vec![BenchPoint { size: 8.0, time: 0.5 }]);
    }

    #[test]
    fn empty_cell_reads_as_nan() {
        let text = "Size,Time\n8,\n";
        let ds = load_csv(text.as_bytes(), "x").unwrap();
        assert_eq!(ds.points[0].size, 8.0);
        assert!(ds.points[0].time.is_nan());
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let ds = load_csv("Size,Time\n".as_bytes(), "x").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = load_csv("Size,Duration\n1,2\n".as_bytes(), "x").unwrap_err();
        assert!(err.to_string().contains("'Time'"), "{err}");
    }

    #[test]
    fn column_names_are_case_sensitive() {
        assert!(load_csv("size,time\n1,2\n".as_bytes(), "x").is_err());
    }

    #[test]
    fn non_numeric_value_is_an_error() {
        let err = load_csv("Size,Time\n1,fast\n".as_bytes(), "x").unwrap_err();
        assert!(err.to_string().contains("CSV row 0"), "{err}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("here.csv"), "{err}");
    }

    #[test]
    fn load_all_stops_at_first_failure() {
        let paths = ["definitely/not/here.csv"];
        assert!(load_all(&paths).is_err());
    }
}
