use actix_cors::Cors;
use log::{info, warn};

pub struct ServerConfig {
    pub bind_host: String,
    pub http_port: u16,
    pub upstream_api_url: String,
    pub upstream_timeout_secs: u64,
    pub frontend_dir: String,
    pub index_file: String,
    pub log_level: String,
    pub cors: CorsConfig,
}

/// Cross-origin policy. The all-defaults configuration is the wide-open
/// development policy; deployments tighten it through environment variables
/// without code changes.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["*".to_string()],
            allowed_headers: vec!["*".to_string()],
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    fn is_any(values: &[String]) -> bool {
        values.iter().any(|v| v == "*")
    }

    /// Build the actix-cors middleware for this policy. With any-origin
    /// configured the middleware echoes the request origin rather than
    /// sending a literal wildcard, so the credentials flag stays valid.
    pub fn middleware(&self) -> Cors {
        let mut cors = Cors::default();

        if Self::is_any(&self.allowed_origins) {
            cors = cors.allow_any_origin();
        } else {
            for origin in &self.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        if Self::is_any(&self.allowed_methods) {
            cors = cors.allow_any_method();
        } else {
            cors = cors.allowed_methods(self.allowed_methods.iter().map(String::as_str));
        }

        if Self::is_any(&self.allowed_headers) {
            cors = cors.allow_any_header();
        } else {
            cors = cors.allowed_headers(self.allowed_headers.iter().map(String::as_str));
        }

        if self.allow_credentials {
            cors = cors.supports_credentials();
        }

        cors
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self, String> {
        // Logging is not up yet, so .env feedback goes to stdout
        match dotenv::dotenv() {
            Ok(path) => println!("Loaded environment from {}", path.display()),
            Err(_) => println!("No .env file found, using process environment"),
        }

        let bind_host = std::env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let http_port = std::env::var("HTTP_PORT")
            .and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
            .unwrap_or_else(|_| {
                warn!("HTTP_PORT not set, using default (8000)");
                8000
            });

        let upstream_api_url = std::env::var("UPSTREAM_API_URL")
            .unwrap_or_else(|_| "https://api.coingecko.com/api/v3".to_string());

        let upstream_timeout_secs = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
            .unwrap_or_else(|_| {
                warn!("UPSTREAM_TIMEOUT_SECS not set, using default (10 seconds)");
                10
            });

        let frontend_dir =
            std::env::var("FRONTEND_DIR").unwrap_or_else(|_| "frontend".to_string());

        let index_file = std::env::var("INDEX_FILE").unwrap_or_else(|_| "index.html".to_string());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());

        let cors = CorsConfig {
            allowed_origins: env_list("CORS_ALLOWED_ORIGINS", "*"),
            allowed_methods: env_list("CORS_ALLOWED_METHODS", "*"),
            allowed_headers: env_list("CORS_ALLOWED_HEADERS", "*"),
            allow_credentials: std::env::var("CORS_ALLOW_CREDENTIALS")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
        };

        Ok(ServerConfig {
            bind_host,
            http_port,
            upstream_api_url,
            upstream_timeout_secs,
            frontend_dir,
            index_file,
            log_level,
            cors,
        })
    }

    pub fn setup_logging(&self) {
        env_logger::Builder::from_default_env()
            .filter_level(Self::level_filter(&self.log_level))
            .init();

        info!("Logging initialized with level: {}", self.log_level);
    }

    fn level_filter(level: &str) -> log::LevelFilter {
        match level.to_uppercase().as_str() {
            "OFF" => log::LevelFilter::Off,
            "ERROR" => log::LevelFilter::Error,
            "WARN" => log::LevelFilter::Warn,
            "INFO" => log::LevelFilter::Info,
            "DEBUG" => log::LevelFilter::Debug,
            "TRACE" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

fn env_list(name: &str, default: &str) -> Vec<String> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_creation() {
        let config = ServerConfig {
            bind_host: "127.0.0.1".to_string(),
            http_port: 8000,
            upstream_api_url: "https://api.coingecko.com/api/v3".to_string(),
            upstream_timeout_secs: 10,
            frontend_dir: "frontend".to_string(),
            index_file: "index.html".to_string(),
            log_level: "DEBUG".to_string(),
            cors: CorsConfig::default(),
        };

        assert_eq!(config.bind_host, "127.0.0.1");
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.upstream_timeout_secs, 10);
        assert_eq!(config.frontend_dir, "frontend");
        assert_eq!(config.index_file, "index.html");
    }

    #[test]
    fn test_log_level_mapping() {
        let test_cases = vec![
            ("OFF", log::LevelFilter::Off),
            ("ERROR", log::LevelFilter::Error),
            ("WARN", log::LevelFilter::Warn),
            ("INFO", log::LevelFilter::Info),
            ("DEBUG", log::LevelFilter::Debug),
            ("TRACE", log::LevelFilter::Trace),
            ("debug", log::LevelFilter::Debug),
            ("invalid", log::LevelFilter::Info), // Default case
        ];

        for (input, expected) in test_cases {
            assert_eq!(ServerConfig::level_filter(input), expected);
        }
    }

    #[test]
    fn test_cors_default_is_wide_open() {
        let cors = CorsConfig::default();
        assert_eq!(cors.allowed_origins, vec!["*"]);
        assert_eq!(cors.allowed_methods, vec!["*"]);
        assert_eq!(cors.allowed_headers, vec!["*"]);
        assert!(cors.allow_credentials);
    }

    #[test]
    fn test_cors_any_detection() {
        assert!(CorsConfig::is_any(&["*".to_string()]));
        assert!(CorsConfig::is_any(&[
            "http://localhost:3000".to_string(),
            "*".to_string()
        ]));
        assert!(!CorsConfig::is_any(&["http://localhost:3000".to_string()]));
        assert!(!CorsConfig::is_any(&[]));
    }

    #[test]
    fn test_explicit_cors_config() {
        let cors = CorsConfig {
            allowed_origins: vec!["https://example.com".to_string()],
            allowed_methods: vec!["GET".to_string()],
            allowed_headers: vec!["content-type".to_string()],
            allow_credentials: false,
        };

        // Middleware construction must not panic for an explicit policy
        let _ = cors.middleware();
        assert!(!CorsConfig::is_any(&cors.allowed_origins));
    }
}
