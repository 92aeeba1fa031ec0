use portal_core::config as core_config;
use portal_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub identity: IdentityConfig,
    pub security: SecurityConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Verification material for the external identity provider's sessions.
/// The provider signs HS256; this service only holds the shared secret.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub cache_ttl_seconds: i64,
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        let config = PortalConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("portal-service"), is_prod)?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", Some("postgres://localhost/portal"), is_prod)?,
                max_connections: get_env("DATABASE_MAX_CONNECTIONS", Some("10"), is_prod)?
                    .parse()
                    .unwrap_or(10),
                min_connections: get_env("DATABASE_MIN_CONNECTIONS", Some("1"), is_prod)?
                    .parse()
                    .unwrap_or(1),
            },
            identity: IdentityConfig {
                jwt_secret: get_env(
                    "IDENTITY_JWT_SECRET",
                    Some("dev-session-secret-change-me"),
                    is_prod,
                )?,
            },
            security: SecurityConfig {
                allowed_origins: get_env(
                    "ALLOWED_ORIGINS",
                    Some("http://localhost:3000"),
                    is_prod,
                )?
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            },
            dashboard: DashboardConfig {
                cache_ttl_seconds: get_env("DASHBOARD_CACHE_TTL_SECONDS", Some("30"), is_prod)?
                    .parse()
                    .unwrap_or(30),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.common.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "PORT must be greater than 0"
            )));
        }

        if self.dashboard.cache_ttl_seconds < 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "DASHBOARD_CACHE_TTL_SECONDS must not be negative"
            )));
        }

        if self.environment == Environment::Prod {
            if self.security.allowed_origins.iter().any(|o| o == "*") {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Wildcard CORS origin not allowed in production"
                )));
            }

            if self.identity.jwt_secret.len() < 32 {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "IDENTITY_JWT_SECRET must be at least 32 bytes in production"
                )));
            }
        }

        Ok(())
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PortalConfig {
        PortalConfig {
            common: core_config::Config {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            environment: Environment::Prod,
            service_name: "portal-service".to_string(),
            service_version: "0.1.0".to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
            database: DatabaseConfig {
                url: "postgres://localhost/portal".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            identity: IdentityConfig {
                jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            },
            security: SecurityConfig {
                allowed_origins: vec!["https://portal.campus.edu".to_string()],
            },
            dashboard: DashboardConfig {
                cache_ttl_seconds: 30,
            },
        }
    }

    #[test]
    fn prod_rejects_wildcard_cors_origin() {
        let mut config = test_config();
        config.security.allowed_origins = vec!["*".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn prod_rejects_short_session_secret() {
        let mut config = test_config();
        config.identity.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_cache_ttl_is_rejected() {
        let mut config = test_config();
        config.dashboard.cache_ttl_seconds = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }
}
