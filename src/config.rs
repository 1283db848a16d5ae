// Configuration for the storefront
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/loga/config.toml)
// 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Products per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Simulated fetch latency when nothing else is configured
pub const DEFAULT_FETCH_DELAY_MS: u64 = 500;

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily, // Default to daily for unknown values
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to TUI buffer or stderr)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Rotation policy for log files
    pub file_rotation: LogRotation,
    /// Prefix for log file names (e.g., "loga" -> "loga.2024-01-15")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false, // Opt-in feature
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "loga".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Theme name: "Loga", "Loga Light", "auto"
    pub theme: String,

    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,

    /// Products fetched per page (never zero)
    pub page_size: usize,

    /// Simulated latency of every page fetch
    pub fetch_delay: Duration,

    /// JSON catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_tui: true,
            theme: "Loga".to_string(),
            use_theme_background: true,
            page_size: DEFAULT_PAGE_SIZE,
            fetch_delay: Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
            catalog_path: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_rotation: Option<String>,
    file_prefix: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    theme: Option<String>,
    use_theme_background: Option<bool>,
    page_size: Option<usize>,
    fetch_delay_ms: Option<u64>,
    catalog_path: Option<String>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/loga/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("loga").join("config.toml"))
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with an environment lookup
    pub(crate) fn from_sources<F>(file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("LOGA_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Theme: env > file > default
        let theme = env("LOGA_THEME").or(file.theme).unwrap_or(defaults.theme);

        // Use theme background: file > default
        let use_theme_background = file
            .use_theme_background
            .unwrap_or(defaults.use_theme_background);

        // Page size: env > file > default, zero is clamped to one
        let page_size = env("LOGA_PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .or(file.page_size)
            .unwrap_or(defaults.page_size)
            .max(1);

        // Fetch delay: env > file > default (0 disables the simulated latency)
        let fetch_delay = env("LOGA_FETCH_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .or(file.fetch_delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.fetch_delay);

        // Catalog: env > file > built-in
        let catalog_path = env("LOGA_CATALOG")
            .or(file.catalog_path)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        // Logging settings: file config only (RUST_LOG env var handled in main.rs)
        let file_logging = file.logging.unwrap_or_default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(defaults.logging.level),
            file_enabled: file_logging
                .file_enabled
                .unwrap_or(defaults.logging.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.logging.file_dir),
            file_rotation: file_logging
                .file_rotation
                .map(|s| LogRotation::parse(&s))
                .unwrap_or(defaults.logging.file_rotation),
            file_prefix: file_logging
                .file_prefix
                .unwrap_or(defaults.logging.file_prefix),
        };

        Self {
            enable_tui,
            theme,
            use_theme_background,
            page_size,
            fetch_delay,
            catalog_path,
            logging,
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let catalog_line = match &self.catalog_path {
            Some(path) => format!("catalog_path = {:?}", path.display().to_string()),
            None => "# catalog_path = \"./catalog.json\"".to_string(),
        };

        format!(
            r#"# loga configuration

# Theme: Loga, Loga Light, auto
theme = "{theme}"

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Products per page
page_size = {page_size}

# Simulated fetch latency in milliseconds (0 = instant)
fetch_delay_ms = {delay}

# JSON product catalog (built-in demo catalog when unset)
{catalog_line}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = {file_dir:?}
file_rotation = "{rotation}"
file_prefix = "{prefix}"
"#,
            theme = self.theme,
            use_bg = self.use_theme_background,
            page_size = self.page_size,
            delay = self.fetch_delay.as_millis(),
            catalog_line = catalog_line,
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
            rotation = self.logging.file_rotation.as_str(),
            prefix = self.logging.file_prefix,
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("Could not determine config path")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        std::fs::write(&path, self.to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn parse(toml_str: &str) -> FileConfig {
        toml::from_str(toml_str).expect("valid config TOML")
    }

    /// Verify that serialized config can be parsed back.
    #[test]
    fn test_config_roundtrip_default() {
        let config = Config::default();
        let parsed = Config::from_sources(parse(&config.to_toml()), no_env);
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_roundtrip_with_catalog_and_logging() {
        let mut config = Config::default();
        config.catalog_path = Some(PathBuf::from("/srv/loga/catalog.json"));
        config.page_size = 12;
        config.fetch_delay = Duration::ZERO;
        config.logging.file_enabled = true;
        config.logging.file_rotation = LogRotation::Hourly;

        let parsed = Config::from_sources(parse(&config.to_toml()), no_env);
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = parse("page_size = 4\nfetch_delay_ms = 100\ntheme = \"auto\"\n");
        let env: HashMap<&str, &str> = [
            ("LOGA_PAGE_SIZE", "6"),
            ("LOGA_FETCH_DELAY_MS", "0"),
            ("LOGA_NO_TUI", "1"),
            ("LOGA_CATALOG", "items.json"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_sources(file, |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.page_size, 6);
        assert_eq!(config.fetch_delay, Duration::ZERO);
        assert!(!config.enable_tui);
        assert_eq!(config.theme, "auto");
        assert_eq!(config.catalog_path, Some(PathBuf::from("items.json")));
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let config = Config::from_sources(parse("page_size = 0\n"), no_env);
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn test_unparseable_env_falls_back_to_file() {
        let config = Config::from_sources(parse("page_size = 5\n"), |k| {
            (k == "LOGA_PAGE_SIZE").then(|| "lots".to_string())
        });
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_log_rotation_parse() {
        assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
        assert_eq!(LogRotation::parse("never"), LogRotation::Never);
        assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    }
}
