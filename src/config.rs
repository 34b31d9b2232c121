//! Environment-variable configuration
//!
//! All settings are optional; unset or unparseable values fall back to the
//! defaults, so configuration can never make construction fail. The library
//! itself only emits `log` records and stays silent unless the consumer
//! installs a logger; [`setup_logging`] is the binary's convenience installer.

use std::env;

use log::LevelFilter;

/// Configuration read from `FILE_FINDER_*` environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level name (FILE_FINDER_LOG_LEVEL, default "info")
    pub log_level: String,

    /// Default symlink policy for new finders (FILE_FINDER_FOLLOW_SYMLINKS)
    pub default_follow_symlinks: bool,

    /// Default max depth for new finders (FILE_FINDER_MAX_DEPTH)
    pub default_max_depth: Option<usize>,

    /// Default result limit for new searches (FILE_FINDER_MAX_RESULTS)
    pub default_max_results: Option<usize>,

    /// Result caching switch (FILE_FINDER_ENABLE_CACHING)
    ///
    /// 注意：当前版本解析但不使用这两个缓存设置，搜索引擎没有结果缓存。
    pub enable_caching: bool,

    /// Result cache size (FILE_FINDER_CACHE_SIZE, default 1000)
    pub cache_size: usize,
}

impl Config {
    /// Read configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("FILE_FINDER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            default_follow_symlinks: parse_bool(
                env::var("FILE_FINDER_FOLLOW_SYMLINKS").ok(),
                false,
            ),
            default_max_depth: parse_usize(env::var("FILE_FINDER_MAX_DEPTH").ok()),
            default_max_results: parse_usize(env::var("FILE_FINDER_MAX_RESULTS").ok()),
            enable_caching: parse_bool(env::var("FILE_FINDER_ENABLE_CACHING").ok(), false),
            cache_size: parse_usize(env::var("FILE_FINDER_CACHE_SIZE").ok()).unwrap_or(1000),
        }
    }

    /// The configured log level as a `log` filter
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Install an env_logger at the configured level.
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_logging(config: &Config) {
    let _ = env_logger::Builder::new()
        .filter_level(config.level_filter())
        .try_init();
}

fn parse_usize(value: Option<String>) -> Option<usize> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value {
        Some(v) => v.trim().to_lowercase() == "true",
        None => default,
    }
}
