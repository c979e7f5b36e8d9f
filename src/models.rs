use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full activity catalog as served by `GET /activities`: a JSON object keyed
/// by activity name. BTreeMap keeps the board and the signup dropdown in a
/// stable order across renders.
pub type Catalog = BTreeMap<String, Activity>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity. Negative when the server handed us a roster
    /// larger than `max_participants`; rendered as-is rather than clamped.
    pub fn spots_left(&self) -> i64 {
        self.max_participants as i64 - self.participants.len() as i64
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct WebConfig {
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3009".to_string(),
        }
    }
}
