//! Application state slices and their reducers.
//!
//! Async calls are never awaited here. The caller dispatches a [`Thunk`] per
//! phase of a request and the owning slice folds it into its state.

use std::fmt::Display;

pub mod activities;
pub mod analytics;
pub mod auth;
pub mod grids;

pub use activities::{ActivitiesAction, ActivitiesState};
pub use analytics::{AnalyticsAction, AnalyticsState};
pub use auth::{AuthAction, AuthState};
pub use grids::{GridsAction, GridsState};

/// One phase of an async request
#[derive(Debug, Clone, PartialEq)]
pub enum Thunk<T> {
    Pending,
    Fulfilled(T),
    /// Carries the failure message, if the transport produced one
    Rejected(Option<String>),
}

impl<T> Thunk<T> {
    pub fn rejected(message: impl Into<String>) -> Self {
        Thunk::Rejected(Some(message.into()))
    }

    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Thunk::Fulfilled(value),
            Err(e) => Thunk::Rejected(Some(e.to_string())),
        }
    }
}

/// Loading flag and last error shared by every slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }

    pub fn fail(&mut self, message: Option<String>, fallback: &str) {
        self.loading = false;
        self.error = Some(message.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.to_string()));
    }

    /// Applies the pending/rejected phases and hands back a fulfilled value
    pub(crate) fn track<T>(&mut self, thunk: Thunk<T>, fallback: &str) -> Option<T> {
        match thunk {
            Thunk::Pending => {
                self.start();
                None
            }
            Thunk::Fulfilled(value) => {
                self.finish();
                Some(value)
            }
            Thunk::Rejected(message) => {
                self.fail(message, fallback);
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Auth(AuthAction),
    Activities(ActivitiesAction),
    Grids(GridsAction),
    Analytics(AnalyticsAction),
}

/// Root of all session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub activities: ActivitiesState,
    pub grids: GridsState,
    pub analytics: AnalyticsState,
}

impl AppState {
    pub fn reduce(&mut self, action: AppAction) {
        match action {
            AppAction::Auth(action) => self.auth.reduce(action),
            AppAction::Activities(action) => self.activities.reduce(action),
            AppAction::Grids(action) => self.grids.reduce(action),
            AppAction::Analytics(action) => self.analytics.reduce(action),
        }
    }
}
