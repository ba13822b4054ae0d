use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Runtime configuration. Defaults are overridden by `BLOG_*` environment variables,
/// e.g. `BLOG_DATABASE_URL`, `BLOG_API_SECRET`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// HMAC secret used to sign access tokens.
    pub api_secret: String,
    pub token_ttl_secs: u64,
    /// Drop, re-create and seed the tables on startup.
    pub seed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:blog.db".to_string(),
            loglevel: "info".to_string(),
            api_secret: "change-me".to_string(),
            token_ttl_secs: 3600,
            seed: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("BLOG_"))
            .extract()
            .map_err(Box::new)
    }
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::from_env().expect("invalid BLOG_* configuration"));
