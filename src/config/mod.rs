use std::env;
use std::path::PathBuf;
use anyhow::{Result, Context};
use tracing::{info, warn};

pub const DEFAULT_SKILLS_FILE: &str = "Technology Skills.xlsx";
pub const DEFAULT_SKILLS_COLUMN: &str = "Example";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_file_size_mb: usize,
    pub skills_file: PathBuf,
    pub skills_sheet: Option<String>,
    pub skills_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            max_file_size_mb: 10,
            skills_file: PathBuf::from(DEFAULT_SKILLS_FILE),
            skills_sheet: None,
            skills_column: DEFAULT_SKILLS_COLUMN.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let defaults = Config::default();

        let server_port = match env::var("PORT") {
            Ok(_) => Self::parse_env_var("PORT", defaults.server_port)
                .context("Failed to parse PORT")?,
            Err(_) => Self::parse_env_var("SERVER_PORT", defaults.server_port)
                .context("Failed to parse SERVER_PORT")?,
        };

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: {}", defaults.server_host);
                defaults.server_host.clone()
            }),
            server_port,
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", defaults.max_file_size_mb)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            skills_file: env::var("SKILLS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    info!("SKILLS_FILE not set, using default: {}", DEFAULT_SKILLS_FILE);
                    defaults.skills_file.clone()
                }),
            skills_sheet: env::var("SKILLS_SHEET")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            skills_column: env::var("SKILLS_COLUMN")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.skills_column),
        };

        config.validate()?;

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.trim().parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.skills_column.is_empty() {
            return Err(anyhow::anyhow!("SKILLS_COLUMN must not be empty"));
        }
        Ok(())
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
