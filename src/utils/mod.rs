pub mod date;
pub mod formatting;
pub mod path;
pub mod stats;

pub use formatting::{capitalize, fmt_value};
