//! Per-metric analyses of a station's sessions.
//!
//! Every analysis works on its own copy of the rows: it drops the rows
//! carrying the metric's "no data" sentinel, takes the median of what is
//! left and draws the metric against time.

use crate::chart::colors::{BLACK, RED};
use crate::chart::{Marker, RenderedChart, Series, TimeSeriesChart};
use crate::models::{Band, Coord, Metric, SessionRecord};
use crate::utils::fmt_value;
use crate::utils::stats::median;
use chrono::NaiveDateTime;
use tracing::debug;

/// Half height of the position charts around the median, in mm.
pub const POSITION_SPAN_MM: f64 = 250.0;

/// Outcome of one analysis: an optional summary line and its chart.
#[derive(Clone)]
pub struct AnalysisResult {
    pub metric: Metric,
    pub median: Option<f64>,
    /// Rows left after dropping sentinels.
    pub samples: usize,
    /// Median of the overlaid series (session W.RMS), if the chart has one.
    pub overlay_median: Option<f64>,
    pub text: Option<String>,
    pub chart: RenderedChart,
}

/// (date, value) for every row whose metric holds real data.
pub fn metric_points(records: &[SessionRecord], metric: Metric) -> Vec<(NaiveDateTime, f64)> {
    records
        .iter()
        .filter_map(|r| r.valid_metric(metric).map(|v| (r.date, v)))
        .collect()
}

fn values(points: &[(NaiveDateTime, f64)]) -> Vec<f64> {
    points.iter().map(|(_, v)| *v).collect()
}

/// Station W.RMS delay, with the session W.RMS overlaid.
pub fn wrms_analysis(records: &[SessionRecord]) -> AnalysisResult {
    let kept: Vec<SessionRecord> = records
        .iter()
        .filter(|r| r.valid_metric(Metric::WRms).is_some())
        .cloned()
        .collect();

    let station = metric_points(&kept, Metric::WRms);
    let session = metric_points(&kept, Metric::SessionFit);
    let station_median = median(&values(&station));
    let session_median = median(&values(&session));

    let text = match station_median {
        Some(m) => format!("Median station W.RMS over period: {} ps", fmt_value(m)),
        None => "No W.RMS data present...".to_string(),
    };
    debug!(samples = station.len(), median = ?station_median, "W.RMS analysis");

    let mut chart = TimeSeriesChart::new("Station W.RMS vs. Time")
        .y_label("W.RMS (ps)")
        .push(Series::scatter(station.clone(), BLACK, Marker::Disk, 3).labelled("Station W.RMS delay"))
        .push(Series::scatter(session, RED, Marker::Disk, 3).labelled("Session W.RMS delay"));
    if let Some(m) = station_median {
        chart = chart.push(Series::median_line(m, BLACK).labelled("Median Station W.RMS delay"));
    }
    if let Some(m) = session_median {
        chart = chart.push(Series::median_line(m, RED).labelled("Median Session W.RMS delay"));
    }

    AnalysisResult {
        metric: Metric::WRms,
        median: station_median,
        samples: station.len(),
        overlay_median: session_median,
        text: Some(text),
        chart: chart.render(),
    }
}

/// Used over scheduled observations per session.
pub fn performance_analysis(records: &[SessionRecord]) -> AnalysisResult {
    let points = metric_points(records, Metric::Performance);
    let m = median(&values(&points));

    let text = match m {
        Some(m) => format!(
            "Median station 'Performance' (used/scheduled) over period: {}",
            fmt_value(m)
        ),
        None => "No performance data present...".to_string(),
    };
    debug!(samples = points.len(), median = ?m, "performance analysis");

    let chart = TimeSeriesChart::new("Performance (used/scheduled) vs. Time")
        .y_range(0.0, 1.0)
        .push(Series::fill(points.clone()))
        .push(Series::scatter(points.clone(), BLACK, Marker::Square, 2));

    AnalysisResult {
        metric: Metric::Performance,
        median: m,
        samples: points.len(),
        overlay_median: None,
        text: Some(text),
        chart: chart.render(),
    }
}

/// Used over recovered observations per session.
pub fn used_vs_recovered_analysis(records: &[SessionRecord]) -> AnalysisResult {
    let points = metric_points(records, Metric::UsedVsRecovered);
    let m = median(&values(&points));

    let text = match m {
        Some(m) => format!(
            "Median used/recovered observation fraction over period: {}",
            fmt_value(m)
        ),
        None => "No used/recovered data present...".to_string(),
    };

    let chart = TimeSeriesChart::new("Fractional Used/Recovered Observations vs. Time")
        .y_range(0.0, 1.0)
        .grid(false)
        .push(Series::fill(points.clone()))
        .push(Series::scatter(points.clone(), BLACK, Marker::Disk, 2));

    AnalysisResult {
        metric: Metric::UsedVsRecovered,
        median: m,
        samples: points.len(),
        overlay_median: None,
        text: Some(text),
        chart: chart.render(),
    }
}

/// Fraction of correlated observations usable in one band.
pub fn detect_rate_analysis(records: &[SessionRecord], band: Band) -> AnalysisResult {
    let metric = Metric::DetectRate(band);
    let points = metric_points(records, metric);
    let m = median(&values(&points));
    let b = band.as_str();

    let text = match m {
        Some(m) => format!("Median {b}-band detection rate: {}", fmt_value(m)),
        None => format!("No {b}-band data present..."),
    };
    debug!(band = b, samples = points.len(), median = ?m, "detection rate analysis");

    let chart = TimeSeriesChart::new(&format!("Session {b}-band Detection ratio"))
        .y_label("Fraction of usable obs. vs. correlated obs.")
        .y_range(0.0, 1.0)
        .grid(false)
        .push(Series::fill(points.clone()))
        .push(Series::scatter(points.clone(), BLACK, Marker::Disk, 2));

    AnalysisResult {
        metric,
        median: m,
        samples: points.len(),
        overlay_median: None,
        text: Some(text),
        chart: chart.render(),
    }
}

/// Position offset series, centred on its median.
pub fn position_analysis(records: &[SessionRecord], coord: Coord) -> AnalysisResult {
    let metric = Metric::Position(coord);
    let points = metric_points(records, metric);
    let m = median(&values(&points));
    let c = coord.as_str();

    let mut chart = TimeSeriesChart::new(&format!("{c}_pos vs. Time"))
        .y_label(&format!("{c} (mm)"))
        .size(640, 360)
        .push(Series::scatter(points.clone(), BLACK, Marker::Disk, 3));
    if let Some(m) = m {
        chart = chart.y_range(m - POSITION_SPAN_MM, m + POSITION_SPAN_MM);
    }

    AnalysisResult {
        metric,
        median: m,
        samples: points.len(),
        overlay_median: None,
        text: None,
        chart: chart.render(),
    }
}
