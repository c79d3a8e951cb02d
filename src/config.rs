use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Environment prefix for every config key, e.g. `BOWLING_DATABASE_URL`.
pub const ENV_PREFIX: &str = "BOWLING_";

/// Number of teams or players shown per listing page.
pub const ITEMS_PER_PAGE: usize = 3;

pub const SIGNIN_PATH: &str = "/users/signin";
pub const LEAGUE_PATH: &str = "/teams/page/1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Master secret for the encrypted session cookie. Needs at least 64 bytes.
    pub session_secret: String,
    /// Skip the `Secure` attribute on the session cookie (plain-http development).
    pub insecure_cookie: bool,
    pub session_ttl_hours: i64,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:bowling.db".to_string(),
            loglevel: "info".to_string(),
            session_secret: String::new(),
            insecure_cookie: false,
            session_ttl_hours: 24,
            admin_username: None,
            admin_password: None,
        }
    }
}

impl Config {
    /// Defaults overlaid with `BOWLING_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Admin credentials to provision at startup, if both halves are configured.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (self.admin_username.as_deref(), self.admin_password.as_deref()) {
            (Some(user), Some(pass)) if !user.trim().is_empty() && !pass.is_empty() => {
                Some((user.trim(), pass))
            }
            _ => None,
        }
    }
}
