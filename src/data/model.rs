use std::path::Path;

// ---------------------------------------------------------------------------
// BenchPoint – one row of a benchmark CSV
// ---------------------------------------------------------------------------

/// A single measurement: input size and amortized time per operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchPoint {
    pub size: f64,
    pub time: f64,
}

// ---------------------------------------------------------------------------
// Dataset – one loaded input file
// ---------------------------------------------------------------------------

/// All measurements of one input file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Legend label, see [`derive_label`].
    pub label: String,
    pub points: Vec<BenchPoint>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, points: Vec<BenchPoint>) -> Self {
        Dataset {
            label: label.into(),
            points,
        }
    }

    /// The `Size` column.
    pub fn sizes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.size)
    }

    /// The `Time` column.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.time)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the file had no data rows.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Legend label for a file path: the last path segment cut at its first dot.
///
/// `dir/sub/run1.v2.csv` gives `run1`, not `run1.v2`.
pub fn derive_label(path: &Path) -> String {
    let text = path.to_string_lossy();
    let file_name = text
        .rsplit(|c| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or("");
    file_name.split('.').next().unwrap_or("").to_string()
}
