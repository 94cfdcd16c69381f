use chrono::NaiveDateTime;
use clap::ValueEnum;

/// Session row from the scheduling API, optionally joined with the
/// per-session statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledSession {
    pub session_id: String,
    pub program: String,
    pub time_start: NaiveDateTime,
    pub scans: Option<f64>,
    pub observations: Option<f64>,
}

/// Quantity a schedule pie chart breaks down by program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum StatKind {
    Sessions,
    Scans,
    Observations,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Sessions, StatKind::Scans, StatKind::Observations];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Sessions => "sessions",
            StatKind::Scans => "scans",
            StatKind::Observations => "observations",
        }
    }

    /// Title word: `Session`, `Scans`, `Observations`.
    pub fn title(&self) -> &'static str {
        match self {
            StatKind::Sessions => "Session",
            StatKind::Scans => "Scans",
            StatKind::Observations => "Observations",
        }
    }

    /// Whether the per-session statistics endpoint is needed.
    pub fn needs_statistics(&self) -> bool {
        !matches!(self, StatKind::Sessions)
    }
}
