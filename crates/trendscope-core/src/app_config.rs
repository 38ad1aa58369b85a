use std::path::PathBuf;

/// Process-wide settings, read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub apify_token: String,
    pub apify_base_url: String,
    pub clients_dir: PathBuf,
    pub output_root: PathBuf,
    pub log_level: String,
    pub wait_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("apify_token", &"[redacted]")
            .field("apify_base_url", &self.apify_base_url)
            .field("clients_dir", &self.clients_dir)
            .field("output_root", &self.output_root)
            .field("log_level", &self.log_level)
            .field("wait_timeout_secs", &self.wait_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .finish()
    }
}
