//! Evolution aggregation: summary statistics and bar-chart layout.
//!
//! Turns a raw measurement history plus a metric selector into the data
//! the progress chart renders: a filtered, time-ordered series, summary
//! statistics, and normalized bar heights.  Pure functions of their
//! inputs, re-run whenever the history or the selected metric changes.

use chrono::{DateTime, Utc};

use crate::history::MeasurementRecord;
use crate::metric::Metric;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Height assigned to the minimum value of a non-flat series.  The floor
/// keeps every bar visibly nonzero.
pub const MIN_BAR_HEIGHT_PCT: f64 = 20.0;
/// Height assigned to the maximum value, and to every bar of a flat series.
pub const MAX_BAR_HEIGHT_PCT: f64 = 100.0;
/// Maximum number of timestamp labels shown under the bars.
pub const MAX_VISIBLE_LABELS: usize = 10;

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// One (timestamp, value) point of a metric series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// The filtered, time-ordered projection of a measurement history for one
/// selected metric.
///
/// Built with [`build_metric_series`]; may be empty when no record carries
/// the selected metric, in which case callers render a "no data" state
/// instead of calling [`summarize`](Self::summarize) or
/// [`layout_bars`](Self::layout_bars).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    points: Vec<MetricPoint>,
}

/// Summary statistics over a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Value of the latest point.
    pub current: f64,
    /// Plain arithmetic mean (no correction for uneven time spacing).
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Latest value minus the first value of the filtered series.
    pub delta: f64,
}

/// One rendered bar of the chart layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    /// Normalized height in `[MIN_BAR_HEIGHT_PCT, MAX_BAR_HEIGHT_PCT]`.
    pub height_pct: f64,
    /// Whether this bar's timestamp label is shown (labels are thinned on
    /// dense series; bars never are).
    pub label_visible: bool,
}

/// Filter `records` down to those carrying `metric`, sorted ascending by
/// record timestamp, and project them to (timestamp, value) points.
pub fn build_metric_series(records: &[MeasurementRecord], metric: Metric) -> MetricSeries {
    let mut points: Vec<MetricPoint> = records
        .iter()
        .filter_map(|record| {
            metric.value_of(record).map(|value| MetricPoint {
                timestamp: record.data_registro,
                value,
            })
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);
    MetricSeries { points }
}

impl MetricSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[MetricPoint] {
        &self.points
    }

    /// Summary statistics, or `None` for an empty series.
    pub fn summarize(&self) -> Option<Summary> {
        let first = self.points.first()?;
        let last = self.points.last()?;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for point in &self.points {
            min = min.min(point.value);
            max = max.max(point.value);
            sum += point.value;
        }

        Some(Summary {
            current: last.value,
            mean: sum / self.points.len() as f64,
            min,
            max,
            delta: last.value - first.value,
        })
    }

    /// Normalized bar layout, or `None` for an empty series.
    ///
    /// A flat series (all values identical) renders every bar at full
    /// height rather than dividing by a zero range.
    pub fn layout_bars(&self) -> Option<Vec<Bar>> {
        let summary = self.summarize()?;
        let range = summary.max - summary.min;

        let count = self.points.len();
        let label_step = if count <= MAX_VISIBLE_LABELS {
            1
        } else {
            count.div_ceil(MAX_VISIBLE_LABELS)
        };

        let bars = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let height_pct = if range == 0.0 {
                    MAX_BAR_HEIGHT_PCT
                } else {
                    ((point.value - summary.min) / range)
                        * (MAX_BAR_HEIGHT_PCT - MIN_BAR_HEIGHT_PCT)
                        + MIN_BAR_HEIGHT_PCT
                };
                Bar {
                    timestamp: point.timestamp,
                    value: point.value,
                    height_pct,
                    label_visible: index % label_step == 0,
                }
            })
            .collect();

        Some(bars)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
