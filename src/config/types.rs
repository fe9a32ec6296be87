use serde::Deserialize;

/// Main configuration structure for the catechism reader
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub cache: CacheConfig,
    pub http: HttpConfig,
    pub position: PositionConfig,
}

/// Where the catechism pages live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Scheme and host of the publishing site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Archive path under which relative page links are resolved
    #[serde(rename = "archive-root")]
    pub archive_root: String,

    /// First page of the "Next" chain, relative to the archive root
    #[serde(rename = "first-page")]
    pub first_page: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.vatican.va".to_string(),
            archive_root: "/archive/ENG0015".to_string(),
            first_page: "__P2.HTM".to_string(),
        }
    }
}

/// Page cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one raw response file per page
    pub directory: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: "cache".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a transport error (0 disables retrying)
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("catechism/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            max_retries: 0,
            retry_delay_ms: 1000,
        }
    }
}

/// Reading position configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    /// Overrides the default `~/.catechism/position.toml`
    pub file: Option<String>,
}
