use serde::Deserialize;

/// How `/stream/{video_id}` hands audio to the caller
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StreamMode {
    /// Return the resolved, time-limited media URL as JSON
    Direct,
    /// Relay the media bytes through this service
    #[default]
    Proxy,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// YouTube Music base URL, used for InnerTube calls and watch URLs
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,

    /// Interface language sent in the InnerTube client context
    #[serde(default = "default_catalog_language")]
    pub catalog_language: String,

    /// Path to the yt-dlp executable
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    #[serde(default)]
    pub stream_mode: StreamMode,

    /// Whole-request timeout for catalog calls
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Upper bound on a single yt-dlp run
    #[serde(default = "default_extractor_timeout_secs")]
    pub extractor_timeout_secs: u64,

    /// User-Agent presented to YouTube for catalog calls and the relay
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_catalog_base_url() -> String {
    "https://music.youtube.com".to_string()
}

fn default_catalog_language() -> String {
    "en".to_string()
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

fn default_extractor_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    concat!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
        "(KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
    )
    .to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
