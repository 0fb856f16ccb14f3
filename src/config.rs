//! Runtime configuration.
//!
//! Values come from built-in defaults, overridden by `HOPESPROUTS_*`
//! environment variables (a `.env` file is loaded by `main` beforehand).

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "HOPESPROUTS_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// sqlx connection URL of the relational store.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Fallback filter when `RUST_LOG` is unset.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Apply the bundled `CREATE TABLE IF NOT EXISTS` DDL at startup.
    #[serde(default = "default_init_schema")]
    pub init_schema: bool,
}

fn default_listen_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_database_url() -> String {
    "sqlite://hopesprouts.sqlite".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_init_schema() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            database_url: default_database_url(),
            loglevel: default_loglevel(),
            init_schema: default_init_schema(),
        }
    }
}

impl Config {
    /// Build the configuration from defaults and the process environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
