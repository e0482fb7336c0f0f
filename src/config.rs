use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub business: BusinessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Access tokens are issued by the identity provider; only verification happens here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default)]
    pub audience: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    #[serde(default = "default_history_page_size")]
    pub history_page_size: u32,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u64,
}

fn default_history_page_size() -> u32 {
    10
}

fn default_recent_limit() -> u64 {
    5
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            history_page_size: default_history_page_size(),
            recent_limit: default_recent_limit(),
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // no file: everything comes from the environment
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL").ok_or(
                    "DATABASE_URL is not set and no config.toml was found",
                )?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                        allowed_origins: Vec::new(),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        audience: get_env("JWT_AUDIENCE"),
                    },
                    business: BusinessConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Cannot read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Config =
            toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}"))?;
        Ok(config)
    }

    /// Environment variables win over the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            self.server.allowed_origins = parse_origins(&v);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_AUDIENCE") {
            self.jwt.audience = Some(v);
        }
        if let Ok(v) = env::var("HISTORY_PAGE_SIZE")
            && let Ok(n) = v.parse()
        {
            self.business.history_page_size = n;
        }
        if let Ok(v) = env::var("RECENT_LIMIT")
            && let Ok(n) = v.parse()
        {
            self.business.recent_limit = n;
        }
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.business.history_page_size == 0 {
            return Err("business.history_page_size must be greater than zero".into());
        }
        if self.jwt.secret.is_empty() {
            return Err("jwt.secret must not be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
url = "postgres://localhost/consciencia"
max_connections = 4

[jwt]
secret = "s3cret"
audience = "authenticated"
"#;

    #[test]
    fn test_parse_with_business_defaults() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.jwt.audience.as_deref(), Some("authenticated"));
        assert_eq!(config.business.history_page_size, 10);
        assert_eq!(config.business.recent_limit, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_origins_list_parsing() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,,"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(parse_origins("").is_empty());
        assert!(Config::parse(SAMPLE).unwrap().server.allowed_origins.is_empty());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let mut config = Config::parse(SAMPLE).unwrap();
        config.business.history_page_size = 0;
        assert!(config.validate().is_err());
    }
}
