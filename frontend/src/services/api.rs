use std::rc::Rc;

use chrono::NaiveDate;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    Activity, ActivityCategory, ActivityId, ActivityPayload, AuthResponse, CompletionRate, CreateGridRequest,
    DailyGrid, GridId, GridRange, HealthStatus, LogActivityRequest, LogActivityResponse, LoginRequest,
    PatternInsight, ProfileUpdate, RegisterRequest, StreakAnalytics, ToggleActiveResponse, User, UserAnalytics,
    WeeklyReport,
};
use web_sys::RequestCredentials;
use yew::Callback;

use super::config::AppConfig;
use super::credentials::{CredentialStore, LocalStorageCredentials};
use super::logging::Logger;
use crate::routes::{BrowserNavigator, Navigator};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            _ => ApiError::Status {
                status,
                message: error_message(body),
            },
        }
    }
}

/// Pulls a readable message out of an error body. Understands
/// `{"error": ..}`, `{"detail": ..}` and field-keyed validation errors.
fn error_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "Unknown error".to_string();
    }

    let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    for key in ["error", "detail", "message"] {
        if let Some(serde_json::Value::String(message)) = fields.get(key) {
            return message.clone();
        }
    }

    for (field, value) in &fields {
        let message = match value {
            serde_json::Value::String(message) => Some(message.as_str()),
            serde_json::Value::Array(items) => items.iter().find_map(|item| item.as_str()),
            _ => None,
        };
        if let Some(message) = message {
            return format!("{}: {}", field, message);
        }
    }

    body.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Every REST call the client makes
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Login,
    Register,
    Logout,
    ListActivities,
    CreateActivity,
    UpdateActivity(ActivityId),
    DeleteActivity(ActivityId),
    ToggleActive(ActivityId),
    Categories,
    GridByDate(NaiveDate),
    CreateGrid,
    LogActivity(GridId),
    GridRange(NaiveDate, NaiveDate),
    Overview,
    Streaks,
    CompletionRates,
    Patterns,
    WeeklyReport,
    Profile,
    UpdateProfile,
    Health,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login
            | Endpoint::Register
            | Endpoint::Logout
            | Endpoint::CreateActivity
            | Endpoint::ToggleActive(_)
            | Endpoint::CreateGrid
            | Endpoint::LogActivity(_) => Method::Post,
            Endpoint::UpdateActivity(_) | Endpoint::UpdateProfile => Method::Put,
            Endpoint::DeleteActivity(_) => Method::Delete,
            _ => Method::Get,
        }
    }

    /// Path relative to the API root, always with a trailing slash
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/auth/login/".to_string(),
            Endpoint::Register => "/auth/register/".to_string(),
            Endpoint::Logout => "/auth/logout/".to_string(),
            Endpoint::ListActivities | Endpoint::CreateActivity => "/activities/".to_string(),
            Endpoint::UpdateActivity(id) | Endpoint::DeleteActivity(id) => format!("/activities/{}/", id),
            Endpoint::ToggleActive(id) => format!("/activities/{}/toggle_active/", id),
            Endpoint::Categories => "/activities/categories/".to_string(),
            Endpoint::GridByDate(date) => format!("/grids/{}/", date.format("%Y-%m-%d")),
            Endpoint::CreateGrid => "/grids/".to_string(),
            Endpoint::LogActivity(id) => format!("/grids/{}/log_activity/", id),
            Endpoint::GridRange(start, end) => {
                format!("/grids/range/{}/{}/", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
            }
            Endpoint::Overview => "/analytics/overview/".to_string(),
            Endpoint::Streaks => "/analytics/streaks/".to_string(),
            Endpoint::CompletionRates => "/analytics/completion_rates/".to_string(),
            Endpoint::Patterns => "/analytics/patterns/".to_string(),
            Endpoint::WeeklyReport => "/analytics/weekly_report/".to_string(),
            Endpoint::Profile | Endpoint::UpdateProfile => "/profile/".to_string(),
            Endpoint::Health => "/health/".to_string(),
        }
    }
}

/// API client for communicating with the backend server.
///
/// Attaches the stored token to every request. Any 401 clears the token,
/// notifies `on_unauthorized` and sends the browser to the login page.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    login_path: String,
    credentials: Rc<dyn CredentialStore>,
    navigator: Rc<dyn Navigator>,
    on_unauthorized: Option<Callback<()>>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_parts(
            config,
            Rc::new(LocalStorageCredentials::new(&config.token_key)),
            Rc::new(BrowserNavigator),
        )
    }

    pub fn with_parts(
        config: &AppConfig,
        credentials: Rc<dyn CredentialStore>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            login_path: config.login_path.clone(),
            credentials,
            navigator,
            on_unauthorized: None,
        }
    }

    pub fn on_unauthorized(mut self, callback: Callback<()>) -> Self {
        self.on_unauthorized = Some(callback);
        self
    }

    pub fn has_token(&self) -> bool {
        self.credentials.token().is_some()
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn builder(&self, endpoint: &Endpoint) -> RequestBuilder {
        let url = self.url(endpoint);
        let builder = match endpoint.method() {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        let builder = builder
            .header("Content-Type", "application/json")
            .credentials(RequestCredentials::Include);

        match self.credentials.token() {
            Some(token) => builder.header("Authorization", &format!("Token {}", token)),
            None => builder,
        }
    }

    async fn send<B: Serialize>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<Response, ApiError> {
        Logger::debug_with_component("api", &format!("{:?} {}", endpoint.method(), endpoint.path()));

        let builder = self.builder(&endpoint);
        let sent = match body {
            Some(body) => {
                let request = builder.json(body).map_err(|e| ApiError::Serialize(e.to_string()))?;
                request.send().await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if (200..300).contains(&status) {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(self.reject(&endpoint, status, &body))
    }

    fn reject(&self, endpoint: &Endpoint, status: u16, body: &str) -> ApiError {
        let error = ApiError::from_status(status, body);
        if error == ApiError::Unauthorized {
            Logger::warn_with_component("api", &format!("{} returned 401, clearing credentials", endpoint.path()));
            self.credentials.clear();
            if let Some(callback) = &self.on_unauthorized {
                callback.emit(());
            }
            self.navigator.redirect(&self.login_path);
        }
        error
    }

    async fn call<T: DeserializeOwned, B: Serialize>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<T, ApiError> {
        let response = self.send(endpoint, body).await?;
        response.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        self.call::<T, ()>(endpoint, None).await
    }

    async fn call_empty<B: Serialize>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<(), ApiError> {
        self.send(endpoint, body).await.map(|_| ())
    }

    /// Stores the token when the server issues one
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.call(Endpoint::Login, Some(request)).await?;
        self.remember_token(&response);
        Ok(response)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.call(Endpoint::Register, Some(request)).await?;
        self.remember_token(&response);
        Ok(response)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.call_empty::<()>(Endpoint::Logout, None).await?;
        self.credentials.clear();
        Ok(())
    }

    fn remember_token(&self, response: &AuthResponse) {
        if let Some(token) = &response.token {
            self.credentials.store(token);
        }
    }

    pub async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.get(Endpoint::ListActivities).await
    }

    pub async fn create_activity(&self, activity: &ActivityPayload) -> Result<Activity, ApiError> {
        self.call(Endpoint::CreateActivity, Some(activity)).await
    }

    pub async fn update_activity(&self, id: ActivityId, activity: &ActivityPayload) -> Result<Activity, ApiError> {
        self.call(Endpoint::UpdateActivity(id), Some(activity)).await
    }

    pub async fn delete_activity(&self, id: ActivityId) -> Result<(), ApiError> {
        self.call_empty::<()>(Endpoint::DeleteActivity(id), None).await
    }

    pub async fn toggle_active(&self, id: ActivityId) -> Result<ToggleActiveResponse, ApiError> {
        self.call::<_, ()>(Endpoint::ToggleActive(id), None).await
    }

    pub async fn categories(&self) -> Result<Vec<ActivityCategory>, ApiError> {
        self.get(Endpoint::Categories).await
    }

    /// `Ok(None)` when the server has no grid for `date`
    pub async fn grid_by_date(&self, date: NaiveDate) -> Result<Option<DailyGrid>, ApiError> {
        match self.get(Endpoint::GridByDate(date)).await {
            Ok(grid) => Ok(Some(grid)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_grid(&self, request: &CreateGridRequest) -> Result<DailyGrid, ApiError> {
        self.call(Endpoint::CreateGrid, Some(request)).await
    }

    pub async fn log_activity(&self, grid_id: GridId, request: &LogActivityRequest) -> Result<LogActivityResponse, ApiError> {
        self.call(Endpoint::LogActivity(grid_id), Some(request)).await
    }

    pub async fn grid_range(&self, start: NaiveDate, end: NaiveDate) -> Result<GridRange, ApiError> {
        self.get(Endpoint::GridRange(start, end)).await
    }

    pub async fn overview(&self) -> Result<UserAnalytics, ApiError> {
        self.get(Endpoint::Overview).await
    }

    pub async fn streaks(&self) -> Result<Vec<StreakAnalytics>, ApiError> {
        self.get(Endpoint::Streaks).await
    }

    pub async fn completion_rates(&self) -> Result<Vec<CompletionRate>, ApiError> {
        self.get(Endpoint::CompletionRates).await
    }

    pub async fn patterns(&self) -> Result<Vec<PatternInsight>, ApiError> {
        self.get(Endpoint::Patterns).await
    }

    pub async fn weekly_report(&self) -> Result<WeeklyReport, ApiError> {
        self.get(Endpoint::WeeklyReport).await
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get(Endpoint::Profile).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.call(Endpoint::UpdateProfile, Some(update)).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get(Endpoint::Health).await
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && self.login_path == other.login_path
            && self.on_unauthorized == other.on_unauthorized
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(&AppConfig::from_env())
    }
}
