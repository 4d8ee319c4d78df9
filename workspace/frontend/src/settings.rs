use log::Level;
use web_sys::window;

/// API host used when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

const API_BASE_KEY: &str = "dashboard_api_base";
const LOG_LEVEL_KEY: &str = "dashboard_log_level";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Backend base URL without trailing slash (e.g., "http://localhost:8000")
    pub api_base: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            // Baked in at build time, e.g. `DASHBOARD_API_BASE=https://api.example.com trunk build`
            api_base: normalize_api_base(option_env!("DASHBOARD_API_BASE").unwrap_or_default()),
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

            // In development, use more verbose logging
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        // localStorage overrides the build-time configuration
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(api_base)) = storage.get_item(API_BASE_KEY) {
                settings.api_base = normalize_api_base(&api_base);
            }

            if let Ok(Some(log_level)) = storage.get_item(LOG_LEVEL_KEY) {
                settings.log_level = parse_log_level(&log_level).unwrap_or(settings.log_level);
            }
        }

        settings
    }
}

/// Trims whitespace and trailing slashes; blank input falls back to the default host.
pub fn normalize_api_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_log_level(raw: &str) -> Option<Level> {
    match raw.trim().to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<Option<AppSettings>> = const { RefCell::new(None) };
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone().unwrap_or_default())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = Some(AppSettings::from_environment());
    });
}
