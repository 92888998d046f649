use serde::Deserialize;

/// Default index page listing every chapter
pub const DEFAULT_INDEX_URL: &str = "https://tefsir.ba/sure";

/// Main configuration structure for Tafsir-Harvest
///
/// Every section is optional; an empty file (or no file at all) yields the
/// stock configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Upstream site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL of the page listing all chapters
    #[serde(rename = "index-url", default = "default_index_url")]
    pub index_url: String,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of chapter links taken from the index
    #[serde(rename = "max-chapters", default = "default_max_chapters")]
    pub max_chapters: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            user_agent: default_user_agent(),
            max_chapters: default_max_chapters(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Retry behaviour for chapter processing
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts for one chapter, including the first
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed pause between attempts (milliseconds)
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON file; `None` places `tafsir.json` next to the executable
    #[serde(default)]
    pub path: Option<String>,

    /// Dump the JSON to stdout before writing it
    #[serde(default = "default_echo")]
    pub echo: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            echo: default_echo(),
        }
    }
}

fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("tafsir-harvest/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_max_chapters() -> usize {
    crate::model::MAX_CHAPTERS
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_echo() -> bool {
    true
}
