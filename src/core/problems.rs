//! Scan the correlation-report notes for reported station problems.

use crate::models::SessionRecord;

/// Boilerplate the correlator adds to most notes; it is not a problem.
pub const MANUAL_PCAL_NOTE: &str = "Applied manual phase calibration";

/// Whether `text` mentions any problem keyword (case-insensitive).
pub fn is_problem(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .any(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
}

/// `EXPID: note` for every session whose note reports a problem, each
/// wrapped to `width` columns.
pub fn extract_problems(records: &[SessionRecord], keywords: &[String], width: usize) -> Vec<Vec<String>> {
    records
        .iter()
        .filter_map(|r| {
            let note = r.note()?;
            let problem = format!("{}: {}", r.exp_id.to_uppercase(), note).replace(MANUAL_PCAL_NOTE, "");
            is_problem(&problem, keywords).then(|| {
                textwrap::wrap(&problem, width.max(1))
                    .into_iter()
                    .map(|line| line.into_owned())
                    .collect()
            })
        })
        .collect()
}
