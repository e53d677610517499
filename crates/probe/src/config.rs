//! Probe configuration file

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, ProbeResult};
use crate::extractor::ExtractorConfig;
use crate::navigator::NavigatorConfig;
use crate::webdriver::WebDriverConfig;

/// Overrides `url` from the file when set
pub const URL_ENV: &str = "EMBEDPROBE_URL";

/// Everything needed to reach one embedded player.
///
/// ```json
/// {
///   "url": "https://example.com/embed-page.html",
///   "webdriver": { "endpoint": "http://localhost:4444", "headless": true },
///   "navigator": { "settle_ms": 1500 },
///   "extractor": { "strategy": "combined" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Page under test
    pub url: String,

    #[serde(default)]
    pub webdriver: WebDriverConfig,

    #[serde(default)]
    pub navigator: NavigatorConfig,

    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl ProbeConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            webdriver: WebDriverConfig::default(),
            navigator: NavigatorConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> ProbeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            ProbeError::Config(reason) => {
                ProbeError::Config(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })
    }

    pub fn from_json(json: &str) -> ProbeResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ProbeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply [`URL_ENV`] if it is set
    pub fn apply_env_overrides(&mut self) -> ProbeResult<()> {
        if let Ok(url) = std::env::var(URL_ENV) {
            self.url = url;
        }
        self.validate()
    }

    pub fn validate(&self) -> ProbeResult<()> {
        if self.url.trim().is_empty() {
            return Err(ProbeError::Config("url must not be empty".to_string()));
        }
        if self.webdriver.endpoint.trim().is_empty() {
            return Err(ProbeError::Config(
                "webdriver endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::CaptureStrategy;
    use std::io::Write;
    use std::sync::Mutex;

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_parse_minimal_config() {
        let config = ProbeConfig::from_json(r#"{"url": "http://localhost:8080/player.html"}"#).unwrap();
        assert_eq!(config.url, "http://localhost:8080/player.html");
        assert_eq!(config.navigator, NavigatorConfig::default());
        assert_eq!(config.extractor.strategy, CaptureStrategy::PerField);
        assert_eq!(config.navigator.settle_ms, 1000);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "url": "http://localhost:8080/player.html",
            "webdriver": { "endpoint": "http://grid:4444", "browser": "firefox", "headless": true },
            "navigator": { "frame_selector": "iframe#kaltura_player_ifp", "settle_ms": 2500 },
            "extractor": { "strategy": "combined" }
        }"#;
        let config = ProbeConfig::from_json(json).unwrap();
        assert_eq!(config.webdriver.endpoint, "http://grid:4444");
        assert!(config.webdriver.headless);
        assert_eq!(config.navigator.frame_selector, "iframe#kaltura_player_ifp");
        assert_eq!(config.navigator.container_selector, ".mwPlayerContainer");
        assert_eq!(config.navigator.settle_delay().as_millis(), 2500);
        assert_eq!(config.extractor.strategy, CaptureStrategy::Combined);
        assert_eq!(config.extractor.player_selector, ".mwEmbedPlayer");
    }

    #[test]
    fn test_missing_url_rejected() {
        assert!(matches!(
            ProbeConfig::from_json(r#"{}"#),
            Err(ProbeError::Config(_))
        ));
        assert!(matches!(
            ProbeConfig::from_json("not json"),
            Err(ProbeError::Config(_))
        ));
        assert!(matches!(
            ProbeConfig::from_json(r#"{"url": ""}"#),
            Err(ProbeError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"url": "http://localhost/embed"}}"#).unwrap();

        let config = ProbeConfig::load(file.path()).unwrap();
        assert_eq!(config.url, "http://localhost/embed");
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ProbeConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_env_overrides_url() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut config = ProbeConfig::new("http://localhost/from-file");

        std::env::set_var(URL_ENV, "http://localhost/from-env");
        let applied = config.apply_env_overrides();
        std::env::remove_var(URL_ENV);
        applied.unwrap();
        assert_eq!(config.url, "http://localhost/from-env");

        let mut untouched = ProbeConfig::new("http://localhost/from-file");
        untouched.apply_env_overrides().unwrap();
        assert_eq!(untouched.url, "http://localhost/from-file");
    }

    #[test]
    fn test_empty_env_url_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut config = ProbeConfig::new("http://localhost/from-file");

        std::env::set_var(URL_ENV, "  ");
        let applied = config.apply_env_overrides();
        std::env::remove_var(URL_ENV);
        assert!(matches!(applied, Err(ProbeError::Config(_))));
    }
}
