//! Formatting utilities used for console and report outputs.

/// Render a metric value the way the station reports always have:
/// whole numbers keep one decimal (`24.0`), everything else uses the
/// shortest representation (`23.5`, `0.8125`).
pub fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// `nn` -> `Nn`, `HB` -> `Hb`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
