//! Centralized configuration for web-server.
//!
//! All environment variables are loaded and validated at startup to fail fast
//! on misconfiguration rather than at request time.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use domain::CompanyInfo;

/// Where the home page listings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// SQLite database with versioned migrations
    Sqlite,
    /// Compiled-in demo content (no database)
    Static,
}

impl ContentSource {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("sqlite") {
            Some(Self::Sqlite)
        } else if s.eq_ignore_ascii_case("static") {
            Some(Self::Static)
        } else {
            None
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error for {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Server configuration loaded from environment variables.
///
/// All fields are validated at construction time.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 3002)
    pub port: u16,
    /// Content source for features and testimonials
    pub content_source: ContentSource,
    /// SQLite database path (when using sqlite content)
    pub db_path: PathBuf,
    /// Max wait for a database lock per query
    pub db_busy_timeout: Duration,
    /// Template directory
    pub views_dir: PathBuf,
    /// Static asset root
    pub static_dir: PathBuf,
    /// Re-read templates on every render
    pub template_reload: bool,
    /// Run the CSS build and watcher
    pub asset_pipeline: bool,
    /// Program the asset pipeline invokes
    pub npm_bin: String,
    /// Log format
    pub log_format: LogFormat,
    /// Company details shown on every page
    pub company: CompanyInfo,
}

fn default_npm_bin() -> &'static str {
    if cfg!(windows) {
        "npm.cmd"
    } else {
        "npm"
    }
}

fn parse_flag(field: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            field,
            message: format!("expected a boolean, got '{}'", raw),
        }),
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// Fails fast on invalid configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Port
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|e| ConfigError {
                field: "PORT",
                message: format!("invalid port '{}': {}", raw, e),
            })?,
            None => 3002,
        };

        // Content source
        let source_raw = lookup("CONTENT_SOURCE").unwrap_or_else(|| "sqlite".into());
        let content_source = ContentSource::parse(&source_raw).ok_or_else(|| ConfigError {
            field: "CONTENT_SOURCE",
            message: format!("expected 'sqlite' or 'static', got '{}'", source_raw),
        })?;

        // DB path
        let db_path = lookup("DB_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/company_profile.db"));

        // DB busy timeout
        let db_busy_timeout = match lookup("DB_BUSY_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(raw.parse().map_err(|e| ConfigError {
                field: "DB_BUSY_TIMEOUT_MS",
                message: format!("invalid milliseconds '{}': {}", raw, e),
            })?),
            None => Duration::from_millis(5000),
        };

        // Directories
        let views_dir = lookup("VIEWS_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./views"));
        let static_dir = lookup("STATIC_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./static"));

        // Development switches
        let template_reload = parse_flag("TEMPLATE_RELOAD", lookup("TEMPLATE_RELOAD"), true)?;
        let asset_pipeline = parse_flag("ASSET_PIPELINE", lookup("ASSET_PIPELINE"), true)?;
        let npm_bin = lookup("NPM_BIN")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_npm_bin().into());

        // Log format
        let log_format =
            LogFormat::from_str(&lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".into()));

        // Company info, each field overridable
        let defaults = CompanyInfo::default();
        let pick = |key: &str, fallback: String| {
            lookup(key).filter(|s| !s.is_empty()).unwrap_or(fallback)
        };
        let company = CompanyInfo {
            name: pick("COMPANY_NAME", defaults.name),
            tagline: pick("COMPANY_TAGLINE", defaults.tagline),
            address: pick("COMPANY_ADDRESS", defaults.address),
            phone: pick("COMPANY_PHONE", defaults.phone),
            email: pick("COMPANY_EMAIL", defaults.email),
        };

        Ok(Self {
            port,
            content_source,
            db_path,
            db_busy_timeout,
            views_dir,
            static_dir,
            template_reload,
            asset_pipeline,
            npm_bin,
            log_format,
            company,
        })
    }

    /// Log warnings about development-only settings.
    pub fn warn_if_dev_mode(&self) {
        if self.template_reload {
            tracing::warn!(
                "TEMPLATE_RELOAD is on: templates are re-read from disk on every request. \
                 Turn it off in production."
            );
        }
        if self.asset_pipeline {
            tracing::warn!(
                npm = %self.npm_bin,
                "ASSET_PIPELINE is on: the CSS build and watcher will run. \
                 Turn it off in production."
            );
        }
        if self.content_source == ContentSource::Static {
            tracing::warn!("CONTENT_SOURCE=static: serving compiled-in demo content, no database.");
        }
    }
}
