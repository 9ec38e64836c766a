pub mod api;
pub mod config;
pub mod credentials;
pub mod date_utils;
pub mod logging;
