use log::Level;
use wasm_bindgen::JsValue;
use web_sys::window;

const API_BASE_KEY: &str = "solarcast_api_base";
const LOG_LEVEL_KEY: &str = "solarcast_log_level";
const TIMEOUT_KEY: &str = "solarcast_request_timeout_ms";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend origin the `/api/...` paths are appended to. Empty means
    /// same origin as the page.
    pub api_base: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Request timeout in milliseconds
    pub request_timeout_ms: u32,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: Level::Info,
            request_timeout_ms: 30000,
            debug_mode: false,
        }
    }
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from the window location, then apply localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(api_base)) = storage.get_item(API_BASE_KEY) {
                settings.api_base = api_base.trim_end_matches('/').to_string();
            }

            if let Ok(Some(level)) = storage.get_item(LOG_LEVEL_KEY) {
                settings.log_level = parse_level(&level).unwrap_or(settings.log_level);
            }

            if let Ok(Some(timeout)) = storage.get_item(TIMEOUT_KEY) {
                if let Ok(timeout_val) = timeout.parse::<u32>() {
                    settings.request_timeout_ms = timeout_val;
                }
            }
        }

        settings
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                storage.set_item(API_BASE_KEY, &self.api_base)?;
                storage.set_item(LOG_LEVEL_KEY, &format!("{:?}", self.log_level).to_lowercase())?;
                storage.set_item(TIMEOUT_KEY, &self.request_timeout_ms.to_string())?;
            }
        }
        Ok(())
    }

    /// Full URL for an API path such as `/api/predict`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Resolves a server-relative path (e.g. a report path) against the
    /// backend origin, falling back to the page origin.
    pub fn resolve(&self, path: &str) -> String {
        let base = if self.api_base.is_empty() {
            window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_default()
        } else {
            self.api_base.clone()
        };

        match web_sys::Url::new_with_base(path, &base) {
            Ok(url) => url.href(),
            Err(_) => path.to_string(),
        }
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Update the global settings
pub fn update_settings<F>(f: F)
where
    F: FnOnce(&mut AppSettings),
{
    SETTINGS.with(|s| {
        let mut settings = s.borrow_mut();
        f(&mut settings);
    });
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
