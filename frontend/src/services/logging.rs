use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Threshold baked in at build time from `HABIT_GRID_LOG_LEVEL`
    pub fn from_env() -> Self {
        option_env!("HABIT_GRID_LOG_LEVEL")
            .and_then(|value| value.parse().ok())
            .unwrap_or(LogLevel::Info)
    }

    pub fn enabled(self, threshold: LogLevel) -> bool {
        self >= threshold
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", name)
    }
}

thread_local! {
    static THRESHOLD: Cell<LogLevel> = const { Cell::new(LogLevel::Info) };
}

pub struct Logger;

impl Logger {
    /// Sets the lowest level that reaches the console, usually `AppConfig::log_level`
    pub fn init(threshold: LogLevel) {
        THRESHOLD.with(|current| current.set(threshold));
    }

    pub fn threshold() -> LogLevel {
        THRESHOLD.with(|current| current.get())
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if !level.enabled(Self::threshold()) {
            return;
        }
        let line = format_line(component, message);
        emit(level, line);
    }
}

fn format_line(component: &str, message: &str) -> String {
    format!("[{}] {}", component, message)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: String) {
    match level {
        LogLevel::Debug => gloo::console::debug!(line),
        LogLevel::Info => gloo::console::info!(line),
        LogLevel::Warn => gloo::console::warn!(line),
        LogLevel::Error => gloo::console::error!(line),
    }
}

// Native builds (unit tests) have no browser console
#[cfg(not(target_arch = "wasm32"))]
fn emit(level: LogLevel, line: String) {
    eprintln!("{:>5} {}", level, line);
}
