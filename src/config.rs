use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, time::Duration};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_ttl_secs")]
    pub access_ttl_secs: u64,
    #[serde(default = "default_refresh_ttl_secs")]
    pub refresh_ttl_secs: u64,
    #[serde(default = "default_reset_ttl_secs")]
    pub reset_ttl_secs: u64,
}

impl JwtConfig {
    pub fn tokens(&self) -> yummio_user::token::Tokens {
        yummio_user::token::Tokens::new(
            &self.secret,
            Duration::from_secs(self.access_ttl_secs),
            Duration::from_secs(self.refresh_ttl_secs),
            Duration::from_secs(self.reset_ttl_secs),
        )
    }
}

fn default_access_ttl_secs() -> u64 {
    86_400
}

fn default_refresh_ttl_secs() -> u64 {
    604_800
}

fn default_reset_ttl_secs() -> u64 {
    3_600
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_memory_kib() -> u32 {
    65_536
}

fn default_iterations() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    4
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_requests")]
    pub requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_idle_secs")]
    pub idle_secs: u64,
    #[serde(default = "default_sweep_secs")]
    pub sweep_secs: u64,
    /// Key clients by the first `X-Forwarded-For` hop. Only enable behind a
    /// proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            requests: default_requests(),
            window_secs: default_window_secs(),
            idle_secs: default_idle_secs(),
            sweep_secs: default_sweep_secs(),
            trust_forwarded_for: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_requests() -> u32 {
    100
}

fn default_window_secs() -> u64 {
    3_600
}

fn default_idle_secs() -> u64 {
    180
}

fn default_sweep_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_upload_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            base_url: default_upload_base_url(),
            max_bytes: default_max_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_upload_base_url() -> String {
    "http://localhost:3000/uploads".to_string()
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "webp"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_reset_url")]
    pub reset_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            reset_url: default_reset_url(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "noreply@yummio.app".to_string()
}

fn default_from_name() -> String {
    "yummio".to_string()
}

fn default_reset_url() -> String {
    "http://localhost:3000/reset-password".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (YUMMIO__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite:yummio.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("YUMMIO")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("upload.allowed_extensions")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("jwt.secret", jwt_secret)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }
        if self.jwt.access_ttl_secs == 0
            || self.jwt.refresh_ttl_secs == 0
            || self.jwt.reset_ttl_secs == 0
        {
            return Err("JWT token lifetimes must be greater than 0".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.rate_limit.requests < 1 {
            return Err("Rate limit requests must be at least 1".to_string());
        }
        if self.rate_limit.window_secs == 0 {
            return Err("Rate limit window must be greater than 0".to_string());
        }
        if self.upload.max_bytes == 0 {
            return Err("Upload max_bytes must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: "test_secret_key_minimum_32_characters_long".to_string(),
                access_ttl_secs: default_access_ttl_secs(),
                refresh_ttl_secs: default_refresh_ttl_secs(),
                reset_ttl_secs: default_reset_ttl_secs(),
            },
            password: PasswordConfig::default(),
            rate_limit: RateLimitConfig::default(),
            upload: UploadConfig::default(),
            email: EmailConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_short_secret() {
        let mut config = config();
        config.jwt.secret = "short".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_ttl() {
        let mut config = config();
        config.jwt.reset_ttl_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rate_limit_and_upload() {
        let mut config = config();
        config.rate_limit.requests = 0;
        assert!(config.validate().is_err());

        let mut config = self::config();
        config.upload.max_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = config();

        assert_eq!(config.jwt.access_ttl_secs, 86_400);
        assert_eq!(config.jwt.refresh_ttl_secs, 604_800);
        assert_eq!(config.jwt.reset_ttl_secs, 3_600);
        assert_eq!(config.password.memory_kib, 65_536);
        assert_eq!(config.rate_limit.requests, 100);
        assert_eq!(config.upload.max_bytes, 10_485_760);
        assert_eq!(
            config.upload.allowed_extensions,
            vec!["jpg", "jpeg", "png", "webp"]
        );
        assert!(!config.email.enabled);
    }
}
