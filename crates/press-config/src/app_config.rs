//! Application configuration structures.

use press_core::telemetry::{LogFormat, TracingConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Content store connection.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Media URL resolution.
    #[serde(default)]
    pub media: MediaConfig,

    /// Logging configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "press".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Connection parameters for the content store.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database (schema) name.
    pub name: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Prefix of every content table name.
    pub wp_prefix: String,
    /// Minimum connection pool size.
    pub min_connections: u32,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection acquire timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds.
    pub idle_timeout_secs: u64,
    /// Log every statement at debug level.
    pub log_queries: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: "wordpress".to_string(),
            username: "wordpress".to_string(),
            password: String::new(),
            host: "localhost".to_string(),
            port: 3306,
            wp_prefix: "wp_".to_string(),
            min_connections: 1,
            max_connections: 10,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            log_queries: false,
        }
    }
}

impl DatabaseConfig {
    /// Returns `user@host:port/name`, safe for logging.
    #[must_use]
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.username, self.host, self.port, self.name)
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout as a Duration.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("wp_prefix", &self.wp_prefix)
            .field("min_connections", &self.min_connections)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

/// Media URL resolution settings.
///
/// Keys keep their historical camel-case spelling; snake-case and lowercase
/// aliases let environment variables reach them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Uploads are served from an S3 bucket rather than the site's upload directory.
    #[serde(default, rename = "amazonS3", alias = "amazon_s3", alias = "amazons3")]
    pub amazon_s3: bool,

    /// Site root URL, or the bucket URL when `amazon_s3` is set.
    #[serde(
        default,
        rename = "uploadDirectory",
        alias = "upload_directory",
        alias = "uploaddirectory"
    )]
    pub upload_directory: String,
}

impl MediaConfig {
    /// Suffix appended to `upload_directory` when files are served by the site itself.
    pub const UPLOADS_SUFFIX: &'static str = "wp-content/uploads/";

    /// Returns the base every attached-file path is appended to.
    #[must_use]
    pub fn base_path(&self) -> String {
        if self.amazon_s3 {
            self.upload_directory.clone()
        } else {
            format!("{}{}", self.upload_directory, Self::UPLOADS_SUFFIX)
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ObservabilityConfig {
    /// Builds the subscriber settings for [`press_core::telemetry::init_tracing`].
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            filter: format!("{},sqlx=warn", self.log_level.to_lowercase()),
            format: self.log_format,
        }
    }
}
