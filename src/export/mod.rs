// src/export/mod.rs

pub mod charts;
mod fs_utils;
pub mod html;
mod json_csv;
pub mod pdf;
pub mod pdf_report;

pub use fs_utils::ensure_writable;
pub use html::{render_html, write_report_html};
pub use json_csv::{export_sessions_csv, export_sessions_json};
pub use pdf_report::write_report_pdf;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every written artifact.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} written: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Pdf,
    Html,
    Both,
}

impl ReportFormat {
    pub fn wants_pdf(&self) -> bool {
        matches!(self, ReportFormat::Pdf | ReportFormat::Both)
    }

    pub fn wants_html(&self) -> bool {
        matches!(self, ReportFormat::Html | ReportFormat::Both)
    }
}

/// Session-data dump format, picked from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DataFormat::Json,
            _ => DataFormat::Csv,
        }
    }
}
