use crate::api::{ApiTable, StationApi, StationResponse};
use crate::errors::AppResult;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Blocking HTTP client for the GLOVDH API. No authentication.
pub struct GlovdhClient {
    client: Client,
    base_url: String,
}

impl GlovdhClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("vlbisummary/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn station_url(&self, code: &str) -> String {
        format!("{}/station/{}", self.base_url, code)
    }

    pub fn stats_url(&self, code: &str) -> String {
        format!("{}/station-stats/{}", self.base_url, code)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        debug!(%url, "GET");
        let resp = self.client.get(url).send()?.error_for_status()?;
        Ok(resp.json::<T>()?)
    }
}

impl StationApi for GlovdhClient {
    fn station(&self, code: &str) -> AppResult<StationResponse> {
        self.get_json(&self.station_url(code))
    }

    fn station_stats(&self, code: &str) -> AppResult<ApiTable> {
        self.get_json(&self.stats_url(code))
    }
}
