//! Startup checks for [`AppConfig`].
//!
//! Every problem is collected so one run reports all of them, before any
//! connection is attempted.

use crate::{AppConfig, DatabaseConfig, MediaConfig, ObservabilityConfig};
use press_core::rules;
use thiserror::Error;
use url::Url;

/// Largest pool the validator accepts.
const MAX_POOL_SIZE: u32 = 1000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// One configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("Database parameter '{name}' is required")]
    MissingDatabaseParameter { name: &'static str },

    #[error("Invalid table prefix '{value}' (letters, digits and '_' only, at most 32 characters)")]
    InvalidTablePrefix { value: String },

    #[error("Invalid database port: {value}")]
    InvalidPort { value: u16 },

    /// `min_connections` above `max_connections`, or a zero maximum.
    #[error("Invalid pool size: min ({min}) must not exceed max ({max}) and max must be positive")]
    InvalidPoolSize { min: u32, max: u32 },

    #[error("Pool size {value} exceeds maximum allowed ({maximum})")]
    PoolSizeTooLarge { value: u32, maximum: u32 },

    #[error("Timeout '{name}' must be positive")]
    NonPositiveTimeout { name: &'static str },

    #[error("Invalid {url_type} URL: {message}")]
    InvalidUrl { url_type: String, message: String },

    /// File paths are appended to the directory verbatim.
    #[error("Upload directory '{value}' must end with '/'")]
    UploadDirectoryMissingSlash { value: String },

    #[error("Invalid log level: '{value}' (valid: trace, debug, info, warn, error)")]
    InvalidLogLevel { value: String },
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Checks the whole configuration, returning every problem found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();
        Self::check_database(&config.database, &mut errors);
        Self::check_media(&config.media, &mut errors);
        Self::check_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_database(db: &DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        let required = [("name", &db.name), ("username", &db.username), ("host", &db.host)];
        errors.extend(
            required
                .into_iter()
                .filter(|(_, value)| value.trim().is_empty())
                .map(|(name, _)| ConfigValidationError::MissingDatabaseParameter { name }),
        );

        if rules::table_prefix(&db.wp_prefix).is_err() {
            errors.push(ConfigValidationError::InvalidTablePrefix {
                value: db.wp_prefix.clone(),
            });
        }
        if db.port == 0 {
            errors.push(ConfigValidationError::InvalidPort { value: db.port });
        }

        if db.max_connections == 0 || db.min_connections > db.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: db.min_connections,
                max: db.max_connections,
            });
        } else if db.max_connections > MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeTooLarge {
                value: db.max_connections,
                maximum: MAX_POOL_SIZE,
            });
        }

        for (name, secs) in [
            ("database.connect_timeout_secs", db.connect_timeout_secs),
            ("database.idle_timeout_secs", db.idle_timeout_secs),
        ] {
            if secs == 0 {
                errors.push(ConfigValidationError::NonPositiveTimeout { name });
            }
        }
    }

    fn check_media(media: &MediaConfig, errors: &mut Vec<ConfigValidationError>) {
        let dir = &media.upload_directory;

        // Empty means site-relative URLs, which only work without S3.
        if dir.is_empty() {
            if media.amazon_s3 {
                errors.push(ConfigValidationError::InvalidUrl {
                    url_type: "media.uploadDirectory".to_string(),
                    message: "a bucket URL is required when amazonS3 is set".to_string(),
                });
            }
            return;
        }

        if media.amazon_s3 {
            if let Err(e) = Url::parse(dir) {
                errors.push(ConfigValidationError::InvalidUrl {
                    url_type: "media.uploadDirectory".to_string(),
                    message: format!("{}: {}", dir, e),
                });
            }
        }
        if !dir.ends_with('/') {
            errors.push(ConfigValidationError::UploadDirectoryMissingSlash { value: dir.clone() });
        }
    }

    fn check_observability(observability: &ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        if !LOG_LEVELS.contains(&observability.log_level.to_lowercase().as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: observability.log_level.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .fold(String::from("Configuration validation failed:\n"), |mut output, (i, error)| {
            output.push_str(&format!("  {}. {}\n", i + 1, error));
            output
        })
}
