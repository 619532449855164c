use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use thiserror::Error;

use super::chart::{Chart, LegendPosition, Marker};
use crate::color::generate_palette;
use crate::config::RenderConfig;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing chart: {0}")]
    Draw(String),
    #[error("pixel buffer does not fit a {0}x{1} canvas")]
    BufferSize(u32, u32),
    #[error("writing {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn draw_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

/// Downward triangle, in pixels around the data point.
const TRIANGLE_DOWN: [(i32, i32); 3] = [(-5, -4), (5, -4), (0, 5)];

fn marker_shape(marker: Marker) -> Vec<(i32, i32)> {
    match marker {
        Marker::TriangleDown => TRIANGLE_DOWN.to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Size ticks in exponent form, `1e7` rather than `10000000.0`.
fn tick_label(value: f64) -> String {
    format!("{value:e}")
}

fn label_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::Best | LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        LegendPosition::CenterRight => SeriesLabelPosition::MiddleRight,
        LegendPosition::CenterLeft => SeriesLabelPosition::MiddleLeft,
        LegendPosition::LowerCenter => SeriesLabelPosition::LowerMiddle,
        LegendPosition::UpperCenter => SeriesLabelPosition::UpperMiddle,
        LegendPosition::Center => SeriesLabelPosition::MiddleMiddle,
    }
}

/// Draw the chart into a packed RGB buffer of `width * height * 3` bytes.
pub fn draw(chart: &Chart, (width, height): (u32, u32)) -> Result<Vec<u8>, RenderError> {
    let hidden = chart.hidden_point_count();
    if hidden > 0 {
        log::warn!("{hidden} point(s) cannot be shown on the axes and were skipped");
    }

    let x_range = chart.x_range();
    let y_range = chart.y_range();
    log::debug!("Axis ranges: x {x_range:?}, y {y_range:?}");

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        // The x axis is always logarithmic; `Chart::x_log` only governs which
        // points are masked and how the legend space is measured.
        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title.as_str(), ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.log_scale(), y_range)
            .map_err(draw_error)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&|v: &f64| tick_label(*v))
            .draw()
            .map_err(draw_error)?;

        let colors = generate_palette(chart.series.len());
        for (series, color) in chart.series.iter().zip(colors) {
            let style = color.filled();
            let shape = marker_shape(series.marker);
            let legend_shape = shape.clone();
            ctx.draw_series(series.visible_points(chart.x_log).map(move |(x, y)| {
                EmptyElement::at((x, y)) + Polygon::new(shape.clone(), style)
            }))
            .map_err(draw_error)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                EmptyElement::at((x + 10, y)) + Polygon::new(legend_shape.clone(), style)
            });
        }

        ctx.configure_series_labels()
            .position(label_position(chart.resolved_legend()))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }
    Ok(buffer)
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Encode a packed RGB buffer as PNG, replacing any existing file.
pub fn encode_png(buffer: Vec<u8>, (width, height): (u32, u32), path: &Path) -> Result<(), RenderError> {
    let img = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::BufferSize(width, height))?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Draw the chart and write it to the configured output file.
pub fn render(chart: &Chart, config: &RenderConfig) -> Result<(), RenderError> {
    let buffer = draw(chart, config.size)?;
    encode_png(buffer, config.size, &config.output)?;
    log::info!(
        "Wrote {} series to {}",
        chart.series.len(),
        config.output.display()
    );
    Ok(())
}
