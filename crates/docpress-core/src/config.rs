//! Configuration module
//!
//! This module provides the configuration structures for the API server,
//! the scratch directory, upload limits and the optional record database.

use std::env;

use crate::constants::{DEFAULT_MAX_UPLOAD_MB, DOCX_CONTENT_TYPE, DOC_CONTENT_TYPE};

// Common constants
const SERVER_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const SCRATCH_DIR: &str = "uploads";
const SCRATCH_CLEANUP_DELAY_SECS: u64 = 10;
const SCRATCH_MAX_AGE_SECS: u64 = 3600;
const IMAGE_CONTENT_TYPES: &str = "image/jpeg,image/png,image/gif,image/webp";

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
        }
    }
}

/// Converter service configuration
#[derive(Clone, Debug)]
pub struct ConverterConfig {
    pub base: BaseConfig,
    /// Postgres URL for conversion records; the in-memory store is used when unset.
    pub database_url: Option<String>,
    // Scratch directory configuration
    pub scratch_dir: String,
    pub cleanup_delay_secs: u64,
    pub scratch_max_age_secs: u64,
    // Upload limits
    pub max_document_size_bytes: usize,
    pub document_allowed_content_types: Vec<String>,
    pub max_image_size_bytes: usize,
    pub image_allowed_content_types: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig::default(),
            database_url: None,
            scratch_dir: SCRATCH_DIR.to_string(),
            cleanup_delay_secs: SCRATCH_CLEANUP_DELAY_SECS,
            scratch_max_age_secs: SCRATCH_MAX_AGE_SECS,
            max_document_size_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            document_allowed_content_types: vec![
                DOCX_CONTENT_TYPE.to_string(),
                DOC_CONTENT_TYPE.to_string(),
            ],
            max_image_size_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            image_allowed_content_types: split_list(IMAGE_CONTENT_TYPES),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ConverterConfig>);

impl Config {
    fn inner(&self) -> &ConverterConfig {
        &self.0
    }

    pub fn new(config: ConverterConfig) -> Self {
        Config(Box::new(config))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.inner().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ConverterConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> Option<&str> {
        self.inner().database_url.as_deref()
    }

    pub fn scratch_dir(&self) -> &str {
        &self.inner().scratch_dir
    }

    pub fn cleanup_delay_secs(&self) -> u64 {
        self.inner().cleanup_delay_secs
    }

    pub fn scratch_max_age_secs(&self) -> u64 {
        self.inner().scratch_max_age_secs
    }

    pub fn max_document_size_bytes(&self) -> usize {
        self.inner().max_document_size_bytes
    }

    pub fn document_allowed_content_types(&self) -> &[String] {
        &self.inner().document_allowed_content_types
    }

    pub fn max_image_size_bytes(&self) -> usize {
        self.inner().max_image_size_bytes
    }

    pub fn image_allowed_content_types(&self) -> &[String] {
        &self.inner().image_allowed_content_types
    }

    /// Largest body any upload route accepts; used for the request body limit layer.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_document_size_bytes()
            .max(self.max_image_size_bytes())
    }
}

impl ConverterConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = ConverterConfig::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| defaults.base.environment.clone());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins: split_list(&cors_origins_str),
            environment,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
        };

        let config = ConverterConfig {
            base,
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            scratch_dir: env::var("SCRATCH_DIR").unwrap_or(defaults.scratch_dir),
            cleanup_delay_secs: env::var("SCRATCH_CLEANUP_DELAY_SECS")
                .unwrap_or_else(|_| SCRATCH_CLEANUP_DELAY_SECS.to_string())
                .parse()
                .unwrap_or(SCRATCH_CLEANUP_DELAY_SECS),
            scratch_max_age_secs: env::var("SCRATCH_MAX_AGE_SECS")
                .unwrap_or_else(|_| SCRATCH_MAX_AGE_SECS.to_string())
                .parse()
                .unwrap_or(SCRATCH_MAX_AGE_SECS),
            max_document_size_bytes: env::var("MAX_DOCUMENT_SIZE_MB")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_MB.to_string())
                .parse::<usize>()
                .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
                * 1024
                * 1024,
            document_allowed_content_types: env::var("DOCUMENT_ALLOWED_CONTENT_TYPES")
                .map(|s| split_list(&s.to_lowercase()))
                .unwrap_or(defaults.document_allowed_content_types),
            max_image_size_bytes: env::var("MAX_IMAGE_SIZE_MB")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_MB.to_string())
                .parse::<usize>()
                .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
                * 1024
                * 1024,
            image_allowed_content_types: env::var("IMAGE_ALLOWED_CONTENT_TYPES")
                .map(|s| split_list(&s.to_lowercase()))
                .unwrap_or(defaults.image_allowed_content_types),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.scratch_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("SCRATCH_DIR must not be empty"));
        }

        if self.max_document_size_bytes == 0 || self.max_image_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_DOCUMENT_SIZE_MB and MAX_IMAGE_SIZE_MB must be greater than zero"
            ));
        }

        if self.document_allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "DOCUMENT_ALLOWED_CONTENT_TYPES must list at least one type"
            ));
        }

        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        Ok(())
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_only_word_types() {
        let config = ConverterConfig::default();
        assert_eq!(config.max_document_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.cleanup_delay_secs, 10);
        assert_eq!(
            config.document_allowed_content_types,
            vec![DOCX_CONTENT_TYPE.to_string(), DOC_CONTENT_TYPE.to_string()]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_postgres_url() {
        let config = ConverterConfig {
            database_url: Some("mysql://localhost/db".to_string()),
            ..ConverterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_size_limit() {
        let config = ConverterConfig {
            max_image_size_bytes: 0,
            ..ConverterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_detection_is_case_insensitive() {
        let mut inner = ConverterConfig::default();
        inner.base.environment = "PROD".to_string();
        assert!(Config::new(inner).is_production());
        assert!(!Config::new(ConverterConfig::default()).is_production());
    }

    #[test]
    fn split_list_trims_and_drops_empty_entries() {
        assert_eq!(
            split_list(" image/png, ,image/jpeg "),
            vec!["image/png".to_string(), "image/jpeg".to_string()]
        );
    }
}
