use super::logging::LogLevel;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const LOGIN_PATH: &str = "/login";

/// Client settings, resolved once at startup and passed down explicitly
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST root without a trailing slash
    pub api_base_url: String,
    /// Local storage key holding the auth token
    pub token_key: String,
    /// Where an unauthorized response sends the user
    pub login_path: String,
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Reads `HABIT_GRID_API_URL` as captured at build time
    pub fn from_env() -> Self {
        Self::from_values(option_env!("HABIT_GRID_API_URL"))
    }

    fn from_values(api_url: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        Self {
            api_base_url,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_path: LOGIN_PATH.to_string(),
            log_level: LogLevel::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None)
    }
}
