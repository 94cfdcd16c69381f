//! Access to the GLOVDH scheduling API (https://glovdh.ethz.ch/).
//!
//! Both endpoints answer with a column/row table; the station endpoint
//! nests its session table under `sessions`.

mod file;
mod glovdh;
mod table;

pub use file::FileApi;
pub use glovdh::GlovdhClient;
pub use table::{ApiTable, StationResponse};

use crate::errors::AppResult;

/// Source of scheduled-session data for one station.
pub trait StationApi {
    /// Station information, including the scheduled sessions.
    fn station(&self, code: &str) -> AppResult<StationResponse>;

    /// Per-session scan and observation counts.
    fn station_stats(&self, code: &str) -> AppResult<ApiTable>;
}
