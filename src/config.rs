use actix_web::cookie::Key;
use std::env;
use std::time::Duration;

/// Minimum SESSION_KEY length accepted by `Key::from`.
const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the expense backend. `None` runs against the in-memory demo client.
    pub api_base_url: Option<String>,
    pub api_timeout_secs: u64,
    pub default_user_id: Option<String>,
    pub app_name: String,
    pub session_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_base_url: None,
            api_timeout_secs: 10,
            default_user_id: None,
            app_name: "Expense Desk".to_string(),
            session_key: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenvy::dotenv().ok();
        Self::from_env_only()
    }

    /// Read configuration from the process environment without loading `.env`.
    pub fn from_env_only() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            api_base_url: non_empty_var("API_BASE_URL"),
            api_timeout_secs: env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.api_timeout_secs),
            default_user_id: non_empty_var("DEFAULT_USER_ID"),
            app_name: non_empty_var("APP_NAME").unwrap_or(defaults.app_name),
            session_key: non_empty_var("SESSION_KEY"),
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    /// Cookie signing key. Falls back to a random key (sessions lost on restart).
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
