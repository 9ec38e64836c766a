use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Activities,
    Analytics,
    Profile,
    Login,
    Register,
}

impl Route {
    /// Pages listed in the navigation bar
    pub const NAV: [Route; 4] = [Route::Dashboard, Route::Activities, Route::Analytics, Route::Profile];

    /// Unknown paths land on the dashboard
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/activities" => Route::Activities,
            "/analytics" => Route::Analytics,
            "/profile" => Route::Profile,
            "/login" => Route::Login,
            "/register" => Route::Register,
            _ => Route::Dashboard,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Activities => "/activities",
            Route::Analytics => "/analytics",
            Route::Profile => "/profile",
            Route::Login => "/login",
            Route::Register => "/register",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Activities => "Activities",
            Route::Analytics => "Analytics",
            Route::Profile => "Profile",
            Route::Login => "Log in",
            Route::Register => "Register",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Route::Dashboard => "📊",
            Route::Activities => "🎯",
            Route::Analytics => "📈",
            Route::Profile => "👤",
            Route::Login | Route::Register => "🔑",
        }
    }

    /// Reachable without a session
    pub fn is_public(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Updates the address bar without reloading the page
pub fn push_path(path: &str) {
    if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// Full-page navigation, used when session state must be rebuilt
pub trait Navigator {
    fn redirect(&self, path: &str);
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        // Reloading the login page would wipe the error it is showing
        if current_path() == path {
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}
