/// Data layer: benchmark datasets and CSV loading.
///
/// Architecture:
/// ```text
///  run1.csv  run2.csv  ...
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Dataset (Size, Time)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<BenchPoint>, label from file name
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
