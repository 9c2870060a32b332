//! Application configuration. Provider credentials, model, language, paths.

use crate::domain::{Category, Language, resolve_language};
use serde::Deserialize;
use tracing::warn;

/// Default Gemini REST base (models are addressed as `{base}/models/{model}:generateContent`).
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model; accepts a response schema alongside the search tool.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Locale variables consulted, in priority order, when no explicit language is configured.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Provider API key. Read from MRDANIEL_API_KEY, falling back to GEMINI_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Provider base URL. Read from MRDANIEL_API_BASE_URL.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Model name. Read from MRDANIEL_MODEL.
    #[serde(default)]
    pub model: Option<String>,

    /// Explicit UI/prompt language override (e.g. "es"). Read from MRDANIEL_LANGUAGE.
    #[serde(default)]
    pub language: Option<String>,

    /// Where CSV reports are written. Read from MRDANIEL_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,

    /// Category loaded at startup. Read from MRDANIEL_DEFAULT_CATEGORY.
    #[serde(default)]
    pub default_category: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("MRDANIEL"));
        if let Ok(path) = std::env::var("MRDANIEL_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the API key if configured. Reads from config or GEMINI_API_KEY env.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn model_or_default(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn reports_dir_or_default(&self) -> String {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| "./reports".to_string())
    }

    /// Startup category. Unknown values are logged and replaced by General.
    pub fn default_category(&self) -> Category {
        match self.default_category.as_deref() {
            None => Category::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "ignoring MRDANIEL_DEFAULT_CATEGORY");
                Category::default()
            }),
        }
    }

    /// Raw language tag: explicit override first, then the runtime locale variables.
    pub fn language_tag(&self) -> Option<String> {
        self.language.clone().or_else(|| {
            LOCALE_ENV_VARS
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find(|v| !v.trim().is_empty())
        })
    }

    /// Language resolved once at startup and injected into services.
    pub fn language(&self) -> Language {
        resolve_language(self.language_tag().as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_url_or_default(), DEFAULT_API_BASE_URL);
        assert_eq!(cfg.model_or_default(), DEFAULT_MODEL);
        assert_eq!(cfg.reports_dir_or_default(), "./reports");
        assert_eq!(cfg.default_category(), Category::General);
    }

    #[test]
    fn test_language_override_wins() {
        let cfg = AppConfig {
            language: Some("es-MX".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.language(), Language::Spanish);
    }

    #[test]
    fn test_default_category_parsing() {
        let cfg = AppConfig {
            default_category: Some("energy".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.default_category(), Category::Energy);

        let bad = AppConfig {
            default_category: Some("Sports".to_string()),
            ..Default::default()
        };
        assert_eq!(bad.default_category(), Category::General);
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let cfg = AppConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert_eq!(cfg.api_key(), None);
        }

        let set = AppConfig {
            api_key: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(set.api_key().as_deref(), Some("abc"));
    }
}
