use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/v1";

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub search_debounce: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(30),
            search_debounce: Duration::from_millis(300),
        }
    }
}
