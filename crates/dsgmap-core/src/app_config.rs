use crate::stores::Coordinates;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Sent verbatim in the `x-api-key` header.
    pub api_key: String,
    /// Origin of the store-search API, e.g. `https://api.example.com`.
    pub api_base_url: String,
    /// Line-of-business tag (`lob` query parameter).
    pub lob: String,
    /// Search radius (`radius` query parameter).
    pub search_radius: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Stand-in for a device location fix. `None` when not configured.
    pub device_location: Option<Coordinates>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("api_key", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("lob", &self.lob)
            .field("search_radius", &self.search_radius)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("device_location", &self.device_location)
            .finish()
    }
}
