use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub github: GithubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub db_name: String,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub jwt_secret: String,
    pub jwt_expiry_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    pub api_base: String,
    pub token: Option<String>,
    pub repos_per_page: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("MONGODB_URI") {
            self.database.uri = v;
        }
        if let Ok(v) = env::var("DATABASE_NAME") {
            self.database.db_name = v;
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_SECS") {
            self.security.jwt_expiry_secs = v.parse().unwrap_or(self.security.jwt_expiry_secs);
        }

        // Github proxy overrides
        if let Ok(v) = env::var("GITHUB_API_BASE") {
            self.github.api_base = v;
        }
        if let Ok(v) = env::var("GITHUB_TOKEN") {
            if !v.is_empty() {
                self.github.token = Some(v);
            }
        }
        if let Ok(v) = env::var("GITHUB_REPOS_PER_PAGE") {
            self.github.repos_per_page = v.parse().unwrap_or(self.github.repos_per_page);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                db_name: "devlink".to_string(),
                connect_timeout_secs: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                // Development fallback only; real deployments set JWT_SECRET
                jwt_secret: "devlink-dev-secret".to_string(),
                jwt_expiry_secs: 360_000,
            },
            github: GithubConfig {
                api_base: "https://api.github.com".to_string(),
                token: None,
                repos_per_page: 5,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                db_name: "devlink_staging".to_string(),
                connect_timeout_secs: 10,
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: String::new(),
                jwt_expiry_secs: 360_000,
            },
            github: GithubConfig {
                api_base: "https://api.github.com".to_string(),
                token: None,
                repos_per_page: 5,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                db_name: "devlink".to_string(),
                connect_timeout_secs: 5,
            },
            api: ApiConfig {
                enable_request_logging: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                // Must come from JWT_SECRET; token operations fail otherwise
                jwt_secret: String::new(),
                jwt_expiry_secs: 360_000,
            },
            github: GithubConfig {
                api_base: "https://api.github.com".to_string(),
                token: None,
                repos_per_page: 5,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

// Helper macros for common checks
#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database.db_name, "devlink");
        assert_eq!(config.security.jwt_expiry_secs, 360_000);
        assert!(!config.security.jwt_secret.is_empty());
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.github.repos_per_page, 5);
        assert!(!config.api.enable_request_logging);
    }
}
