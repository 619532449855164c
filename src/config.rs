use std::path::PathBuf;

/// Fixed output settings. Nothing here is read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Written in the current directory, overwritten without warning.
    pub output: PathBuf,
    /// Canvas size in pixels (width, height).
    pub size: (u32, u32),
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("plot.png"),
            size: (640, 480),
            title: "Hash table performance".to_string(),
            x_label: "Input size, bytes x 8".to_string(),
            y_label: "Amortized operation time, seconds x 1e-6".to_string(),
        }
    }
}
