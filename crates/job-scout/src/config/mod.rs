use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::assessment::{ExperienceLevel, JobKind, UnknownPreference, UserPreferences};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    /// Stored preferences applied when a request or command does not bring its own.
    pub preferences: UserPreferences,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            preferences: load_preferences()?,
        })
    }
}

fn load_preferences() -> Result<UserPreferences, ConfigError> {
    let experience_level = optional_var("SCOUT_EXPERIENCE_LEVEL")
        .map(|value| value.parse::<ExperienceLevel>())
        .transpose()
        .map_err(ConfigError::InvalidPreference)?;
    let job_type = optional_var("SCOUT_JOB_TYPE")
        .map(|value| value.parse::<JobKind>())
        .transpose()
        .map_err(ConfigError::InvalidPreference)?;

    Ok(UserPreferences {
        experience_level,
        job_type,
        min_hourly_rate: amount_var("SCOUT_MIN_HOURLY_RATE")?,
        min_fixed_price: amount_var("SCOUT_MIN_FIXED_PRICE")?,
    })
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Unset means "no minimum".
fn amount_var(key: &'static str) -> Result<f64, ConfigError> {
    let Some(raw) = optional_var(key) else {
        return Ok(0.0);
    };

    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(ConfigError::InvalidAmount { key, value: raw }),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAmount { key: &'static str, value: String },
    InvalidPreference(UnknownPreference),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAmount { key, value } => {
                write!(f, "{key} must be a non-negative number, got '{value}'")
            }
            ConfigError::InvalidPreference(err) => write!(f, "invalid preference: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidAmount { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPreference(err) => Some(err),
        }
    }
}
