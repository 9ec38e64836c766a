pub mod use_analytics;
pub mod use_auth;
pub mod use_dashboard;
