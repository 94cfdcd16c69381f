//! Fixed A4 layout of the station report.
//!
//! Page 1: title, summary lines and the seven charts.
//! Page 2+: reported issues in a small font, as many pages as needed.
//! Optional trailing pages: the session table.

use crate::core::summary::StationSummary;
use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::models::Coord;
use std::path::Path;
use tracing::debug;

const LEFT: f32 = 50.0;
const TITLE_Y: f32 = 780.0;
const BODY_TOP: f32 = 750.0;
const BOTTOM: f32 = 40.0;

const TITLE_SIZE: f32 = 20.0;
const SUMMARY_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 12.0;
const PROBLEM_SIZE: f32 = 5.0;

pub const PROBLEMS_HEADING: &str = "Reported issues (as extracted from correlation reports)";

pub fn write_report_pdf(summary: &StationSummary, path: &Path, with_table: bool) -> AppResult<()> {
    let mut pdf = PdfManager::new();

    first_page(&mut pdf, summary)?;
    problem_pages(&mut pdf, &summary.problem_lines());

    if with_table {
        pdf.write_table(
            &format!("{} sessions", summary.station),
            &summary.table.headers,
            &summary.table.rows,
        );
    }

    debug!(pages = pdf.page_count(), path = %path.display(), "writing PDF");
    pdf.save(path)?;

    notify_export_success("PDF report", path);
    Ok(())
}

fn first_page(pdf: &mut PdfManager, summary: &StationSummary) -> AppResult<()> {
    let wrms = pdf.add_image(&summary.wrms.chart)?;
    let perf = pdf.add_image(&summary.performance.chart)?;

    let mut positions = Vec::new();
    for coord in [Coord::U, Coord::E, Coord::N] {
        if let Some(a) = summary.position(coord) {
            positions.push(pdf.add_image(&a.chart)?);
        }
    }

    let mut content = pdf.new_page();

    pdf.draw_text(&mut content, LEFT, TITLE_Y, TITLE_SIZE, &summary.title(), true);

    // Blank line between title and summary block.
    let mut lines = vec![String::new()];
    lines.extend(summary.summary_lines());
    pdf.draw_lines(&mut content, LEFT, BODY_TOP, SUMMARY_SIZE, 12.0, &lines, true);

    pdf.draw_image(&mut content, &wrms, 20.0, 320.0, 280.0);
    pdf.draw_image(&mut content, &perf, 300.0, 320.0, 280.0);

    for (img, x) in positions.iter().zip([20.0, 200.0, 380.0]) {
        pdf.draw_image(&mut content, img, x, 100.0, 180.0);
    }

    pdf.finalize_page(content);
    Ok(())
}

fn problem_pages(pdf: &mut PdfManager, lines: &[String]) {
    let leading = PROBLEM_SIZE + 1.5;
    let per_page = (((BODY_TOP - BOTTOM) / leading) as usize).max(1);

    if lines.is_empty() {
        let mut content = pdf.new_page();
        pdf.draw_text(&mut content, LEFT, TITLE_Y, HEADING_SIZE, PROBLEMS_HEADING, true);
        pdf.draw_text(
            &mut content,
            LEFT,
            BODY_TOP,
            SUMMARY_SIZE,
            "No issues reported for this period.",
            false,
        );
        pdf.finalize_page(content);
        return;
    }

    for (i, chunk) in lines.chunks(per_page).enumerate() {
        let mut content = pdf.new_page();
        let heading = if i == 0 {
            PROBLEMS_HEADING.to_string()
        } else {
            format!("{PROBLEMS_HEADING} (continued)")
        };
        pdf.draw_text(&mut content, LEFT, TITLE_Y, HEADING_SIZE, &heading, true);
        pdf.draw_lines(&mut content, LEFT, BODY_TOP, PROBLEM_SIZE, leading, chunk, false);
        pdf.finalize_page(content);
    }
}
