// src/export/charts.rs

use crate::chart::RenderedChart;
use crate::core::summary::StationSummary;
use crate::errors::AppResult;
use crate::export::notify_export_success;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `chart` as PNG into `dir` and return the file path.
pub fn save_chart(dir: &Path, file_name: &str, chart: &RenderedChart) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    chart.save_png(&path)?;
    notify_export_success("Chart", &path);
    Ok(path)
}

/// Every chart of a station report, under its conventional file name.
pub fn summary_charts(summary: &StationSummary) -> Vec<(String, &RenderedChart)> {
    let mut charts = vec![
        ("wRMS.png".to_string(), &summary.wrms.chart),
        ("performance.png".to_string(), &summary.performance.chart),
        ("used_vs_recov.png".to_string(), &summary.used_vs_recovered.chart),
        ("X_detect_rate.png".to_string(), &summary.detect_x.chart),
        ("S_detect_rate.png".to_string(), &summary.detect_s.chart),
    ];
    for (coord, a) in &summary.positions {
        charts.push((format!("{}_pos.png", coord.as_str()), &a.chart));
    }
    charts
}

pub fn save_summary_charts(dir: &Path, summary: &StationSummary) -> AppResult<Vec<PathBuf>> {
    summary_charts(summary)
        .into_iter()
        .map(|(name, chart)| save_chart(dir, &name, chart))
        .collect()
}
