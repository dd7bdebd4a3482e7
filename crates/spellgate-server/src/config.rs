// ABOUTME: Configuration loading and validation for the spellgate server.
// ABOUTME: Reads process environment once at startup into an immutable ServerConfig.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Origins allowed to call the server from a browser when CORS_ORIGINS is unset.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = [
    "http://localhost:5173",
    "https://spellcheck-client.onrender.com",
];

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NODE_ENV must be one of development, test, production (got {0:?})")]
    InvalidNodeEnv(String),

    #[error("{var} must be a non-negative integer (got {value:?})")]
    InvalidNumber { var: &'static str, value: String },

    #[error("HOST/PORT do not form a valid socket address: {0}")]
    InvalidBind(String),

    #[error("{0} must be set outside the test environment")]
    Missing(&'static str),
}

/// Deployment environment, read from NODE_ENV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEnv {
    Development,
    Test,
    Production,
}

impl FromStr for NodeEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidNodeEnv(other.to_string())),
        }
    }
}

impl fmt::Display for NodeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        })
    }
}

/// Properties of the signed session cookie issued elsewhere and consumed here.
#[derive(Debug, Clone)]
pub struct CookieProps {
    pub name: String,
    pub secret: String,
    pub path: String,
    pub expires: Duration,
    pub domain: String,
    pub secure: bool,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub node_env: NodeEnv,
    pub bind: SocketAddr,
    pub cookie: CookieProps,
    pub jwt_secret: String,
    pub textgears_api_key: String,
    pub textgears_base_url: String,
    pub dictionary: Option<PathBuf>,
    pub upstream_timeout: Duration,
    pub views_dir: PathBuf,
    pub static_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - NODE_ENV: development | test | production (default: development)
    /// - HOST / PORT: bind address (default: 0.0.0.0:3000)
    /// - COOKIE_SECRET, COOKIE_NAME, COOKIE_PATH, COOKIE_EXP (ms), COOKIE_DOMAIN, SECURE_COOKIE
    /// - JWT_SECRET: token-signing secret, carried for co-hosted issuers
    /// - TEXTGEARS_API_KEY / TEXTGEARS_BASE_URL: grammar API access
    /// - SPELLCHECK_DICTIONARY: JSON word list used to train the corrector (optional)
    /// - UPSTREAM_TIMEOUT_MS: per-call timeout for gateways (default: 10000)
    /// - VIEWS_DIR / STATIC_DIR: html views and static assets (default: views, public)
    /// - CORS_ORIGINS: comma-separated allow-list
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let node_env = match var("NODE_ENV") {
            Some(v) => v.trim().parse()?,
            None => NodeEnv::Development,
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = parse_number("PORT", var("PORT"), 3000)?;
        let bind_str = format!("{}:{}", host, port);
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let required = |key: &'static str| match var(key) {
            Some(v) => Ok(v),
            None if node_env == NodeEnv::Test => Ok(String::new()),
            None => Err(ConfigError::Missing(key)),
        };

        let cookie = CookieProps {
            name: var("COOKIE_NAME").unwrap_or_else(|| "ExpressGeneratorTs".to_string()),
            secret: required("COOKIE_SECRET")?,
            path: var("COOKIE_PATH").unwrap_or_else(|| "/".to_string()),
            expires: Duration::from_millis(parse_number(
                "COOKIE_EXP",
                var("COOKIE_EXP"),
                259_200_000,
            )?),
            domain: var("COOKIE_DOMAIN").unwrap_or_else(|| "localhost".to_string()),
            secure: var("SECURE_COOKIE")
                .map(|v| v == "true" || v == "1" || v == "yes")
                .unwrap_or(false),
        };

        let textgears_api_key = required("TEXTGEARS_API_KEY")?;
        let textgears_base_url =
            var("TEXTGEARS_BASE_URL").unwrap_or_else(|| "https://api.textgears.com".to_string());

        let upstream_timeout = Duration::from_millis(parse_number(
            "UPSTREAM_TIMEOUT_MS",
            var("UPSTREAM_TIMEOUT_MS"),
            10_000,
        )?);

        let cors_origins = match var("CORS_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            node_env,
            bind,
            cookie,
            jwt_secret: var("JWT_SECRET").unwrap_or_default(),
            textgears_api_key,
            textgears_base_url,
            dictionary: var("SPELLCHECK_DICTIONARY").map(PathBuf::from),
            upstream_timeout,
            views_dir: var("VIEWS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("views")),
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            cors_origins,
        })
    }

    pub fn is_test(&self) -> bool {
        self.node_env == NodeEnv::Test
    }
}

fn parse_number<T: FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: v }),
        None => Ok(default),
    }
}
