use std::ops::Range;

use crate::config::RenderConfig;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

/// Marker shape of a scatter series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    TriangleDown,
}

/// Where the legend box goes inside the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    /// Resolved against the data at render time, see [`Chart::resolved_legend`].
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    CenterRight,
    CenterLeft,
    LowerCenter,
    UpperCenter,
    Center,
}

/// Order in which `Best` tries the fixed positions; ties keep the earlier one.
const BEST_CANDIDATES: [LegendPosition; 9] = [
    LegendPosition::UpperRight,
    LegendPosition::UpperLeft,
    LegendPosition::LowerLeft,
    LegendPosition::LowerRight,
    LegendPosition::CenterRight,
    LegendPosition::CenterLeft,
    LegendPosition::LowerCenter,
    LegendPosition::UpperCenter,
    LegendPosition::Center,
];

/// One scatter series, one per input file.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// (Size, Time) pairs in file order.
    pub points: Vec<(f64, f64)>,
    pub marker: Marker,
}

/// Everything needed to draw the plot, independent of any backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_log: bool,
    pub legend: LegendPosition,
    pub series: Vec<Series>,
}

/// Build the chart: log x-axis, fixed texts, one series per dataset in input order.
pub fn build_chart(config: &RenderConfig, datasets: Vec<Dataset>) -> Chart {
    let series = datasets
        .into_iter()
        .map(|ds| Series {
            points: ds.sizes().zip(ds.times()).collect(),
            label: ds.label,
            marker: Marker::TriangleDown,
        })
        .collect();

    Chart {
        title: config.title.clone(),
        x_label: config.x_label.clone(),
        y_label: config.y_label.clone(),
        x_log: true,
        legend: LegendPosition::Best,
        series,
    }
}

impl Series {
    /// Points that can be placed on the axes. A log axis masks x <= 0.
    pub fn visible_points(&self, x_log: bool) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .copied()
            .filter(move |&(x, y)| x.is_finite() && y.is_finite() && (!x_log || x > 0.0))
    }
}

impl Chart {
    fn visible_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.series.iter().flat_map(|s| s.visible_points(self.x_log))
    }

    /// Total number of points that will not be drawn.
    pub fn hidden_point_count(&self) -> usize {
        let total: usize = self.series.iter().map(|s| s.points.len()).sum();
        total - self.visible_points().count()
    }

    /// X-axis range with a margin; multiplicative on a log axis.
    pub fn x_range(&self) -> Range<f64> {
        let Some((lo, hi)) = min_max(self.visible_points().map(|(x, _)| x)) else {
            return if self.x_log { 1.0..10.0 } else { 0.0..1.0 };
        };

        if self.x_log {
            let span = (hi / lo).log10();
            let margin = if span > 0.0 { span * 0.05 } else { 0.5 };
            let factor = 10f64.powf(margin);
            lo / factor..hi * factor
        } else {
            padded(lo, hi)
        }
    }

    /// Y-axis range with a 5% margin.
    pub fn y_range(&self) -> Range<f64> {
        match min_max(self.visible_points().map(|(_, y)| y)) {
            Some((lo, hi)) => padded(lo, hi),
            None => 0.0..1.0,
        }
    }

    /// Concrete legend position; `Best` picks the candidate covering the
    /// fewest data points.
    pub fn resolved_legend(&self) -> LegendPosition {
        if self.legend != LegendPosition::Best {
            return self.legend;
        }

        let (w, h) = self.legend_extent();
        let x_range = self.x_range();
        let y_range = self.y_range();
        let normalized: Vec<(f64, f64)> = self
            .visible_points()
            .map(|(x, y)| {
                let nx = if self.x_log {
                    (x.log10() - x_range.start.log10())
                        / (x_range.end.log10() - x_range.start.log10())
                } else {
                    (x - x_range.start) / (x_range.end - x_range.start)
                };
                let ny = (y - y_range.start) / (y_range.end - y_range.start);
                (nx, ny)
            })
            .collect();

        let mut best = BEST_CANDIDATES[0];
        let mut best_count = usize::MAX;
        for candidate in BEST_CANDIDATES {
            let (x0, y0) = candidate.origin(w, h);
            let count = normalized
                .iter()
                .filter(|&&(x, y)| x >= x0 && x <= x0 + w && y >= y0 && y <= y0 + h)
                .count();
            if count < best_count {
                best = candidate;
                best_count = count;
            }
        }

        log::debug!("Legend placed {best:?} covering {best_count} point(s)");
        best
    }

    /// Approximate legend box size as a fraction of the plotting area.
    fn legend_extent(&self) -> (f64, f64) {
        let longest = self
            .series
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);
        let w = (0.08 + longest as f64 * 0.016).min(0.6);
        let h = (0.04 + self.series.len() as f64 * 0.06).min(1.0);
        (w, h)
    }
}

impl LegendPosition {
    /// Lower-left corner of a `w` x `h` box in axis-normalised coordinates.
    fn origin(self, w: f64, h: f64) -> (f64, f64) {
        let left = 0.0;
        let center_x = 0.5 - w / 2.0;
        let right = 1.0 - w;
        let bottom = 0.0;
        let center_y = 0.5 - h / 2.0;
        let top = 1.0 - h;
        match self {
            LegendPosition::UpperRight | LegendPosition::Best => (right, top),
            LegendPosition::UpperLeft => (left, top),
            LegendPosition::LowerLeft => (left, bottom),
            LegendPosition::LowerRight => (right, bottom),
            LegendPosition::CenterRight => (right, center_y),
            LegendPosition::CenterLeft => (left, center_y),
            LegendPosition::LowerCenter => (center_x, bottom),
            LegendPosition::UpperCenter => (center_x, top),
            LegendPosition::Center => (center_x, center_y),
        }
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    let margin = if span > 0.0 {
        span * 0.05
    } else if lo == 0.0 {
        1.0
    } else {
        lo.abs() * 0.05
    };
    lo - margin..hi + margin
}
