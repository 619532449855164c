/// Plot layer: a backend-free chart description and its PNG rendering.
///
/// ```text
///   Vec<Dataset> ──chart──▶ Chart ──render──▶ plot.png
/// ```

pub mod chart;
pub mod render;
