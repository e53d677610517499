//! WebDriver-backed automation session

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::{Client, ClientBuilder, Locator};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::error::{describe_bound, ProbeError, ProbeResult};
use crate::session::AutomationSession;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4444";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
        }
    }
}

/// Connection settings for a WebDriver endpoint (chromedriver, geckodriver, grid)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebDriverConfig {
    /// WebDriver server URL
    pub endpoint: String,

    /// Browser to request
    pub browser: Browser,

    /// Run without a visible window
    pub headless: bool,

    /// Upper bound for element waits; `None` keeps the client default
    pub wait_timeout_ms: Option<u64>,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            browser: Browser::default(),
            headless: false,
            wait_timeout_ms: None,
        }
    }
}

impl WebDriverConfig {
    /// W3C capabilities for the new-session request.
    pub fn capabilities(&self) -> Map<String, Value> {
        let mut caps = Map::new();
        caps.insert("browserName".to_string(), json!(self.browser.as_str()));

        match self.browser {
            Browser::Chrome => {
                // Embedded players are expected to auto-play without a click.
                let mut args = vec!["--autoplay-policy=no-user-gesture-required"];
                if self.headless {
                    args.push("--headless=new");
                }
                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
            Browser::Firefox => {
                let args: Vec<&str> = if self.headless { vec!["-headless"] } else { vec![] };
                caps.insert(
                    "moz:firefoxOptions".to_string(),
                    json!({
                        "args": args,
                        "prefs": { "media.autoplay.default": 0 }
                    }),
                );
            }
        }

        caps
    }

    fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_ms.map(Duration::from_millis)
    }
}

/// A live WebDriver session.
///
/// The probe borrows this; whoever connects it is responsible for
/// [`close`](WebDriverSession::close).
pub struct WebDriverSession {
    client: Client,
    endpoint: String,
    wait_timeout: Option<Duration>,
}

impl WebDriverSession {
    /// Open a new browser session on the configured endpoint
    pub async fn connect(config: &WebDriverConfig) -> ProbeResult<Self> {
        info!(
            "Opening {} session at {}",
            config.browser.as_str(),
            config.endpoint
        );

        let client = ClientBuilder::native()
            .capabilities(config.capabilities())
            .connect(&config.endpoint)
            .await
            .map_err(|e| ProbeError::SessionStartup {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            })?;

        debug!("Element waits bounded by {}", describe_bound(config.wait_timeout()));

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            wait_timeout: config.wait_timeout(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// End the remote session and release the browser
    pub async fn close(self) -> ProbeResult<()> {
        info!("Closing WebDriver session at {}", self.endpoint);
        self.client.close().await.map_err(session_error)
    }
}

fn session_error(e: CmdError) -> ProbeError {
    ProbeError::Session(e.to_string())
}

fn locate_error(selector: &str, e: CmdError) -> ProbeError {
    match e {
        CmdError::WaitTimeout => ProbeError::LocateTimeout {
            selector: selector.to_string(),
        },
        e if e.is_no_such_element() => ProbeError::ElementNotFound {
            selector: selector.to_string(),
        },
        e => session_error(e),
    }
}

/// Only errors thrown by the script itself are evaluation failures.
fn evaluation_error(e: CmdError) -> ProbeError {
    let thrown = matches!(
        &e,
        CmdError::Standard(wd) if matches!(wd.error, ErrorStatus::JavascriptError)
    );
    if thrown {
        ProbeError::evaluation("script", e)
    } else {
        session_error(e)
    }
}

#[async_trait]
impl AutomationSession for WebDriverSession {
    type Element = Element;

    async fn navigate(&self, address: &str) -> ProbeResult<()> {
        self.client
            .goto(address)
            .await
            .map_err(|e| ProbeError::Navigation {
                address: address.to_string(),
                reason: e.to_string(),
            })
    }

    async fn wait_for_element(&self, selector: &str) -> ProbeResult<Element> {
        let mut wait = self.client.wait();
        if let Some(bound) = self.wait_timeout {
            wait = wait.at_most(bound);
        }
        wait.for_element(Locator::Css(selector))
            .await
            .map_err(|e| locate_error(selector, e))
    }

    async fn find_element(&self, selector: &str) -> ProbeResult<Element> {
        self.client
            .find(Locator::Css(selector))
            .await
            .map_err(|e| locate_error(selector, e))
    }

    async fn switch_context(&self, frame: Element) -> ProbeResult<()> {
        frame.enter_frame().await.map_err(session_error)?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> ProbeResult<Value> {
        self.client
            .execute(script, Vec::new())
            .await
            .map_err(evaluation_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_capabilities_allow_autoplay() {
        let config = WebDriverConfig {
            headless: true,
            ..Default::default()
        };
        let caps = config.capabilities();
        assert_eq!(caps["browserName"], "chrome");

        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.contains(&json!("--autoplay-policy=no-user-gesture-required")));
        assert!(args.contains(&json!("--headless=new")));
    }

    #[test]
    fn test_firefox_capabilities() {
        let config = WebDriverConfig {
            browser: Browser::Firefox,
            ..Default::default()
        };
        let caps = config.capabilities();
        assert_eq!(caps["browserName"], "firefox");
        assert!(caps.get("goog:chromeOptions").is_none());
        assert!(caps["moz:firefoxOptions"]["args"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_transport_failure_is_a_session_error() {
        assert!(matches!(
            evaluation_error(CmdError::WaitTimeout),
            ProbeError::Session(_)
        ));
        assert!(matches!(
            locate_error(".mwPlayerContainer", CmdError::WaitTimeout),
            ProbeError::LocateTimeout { .. }
        ));
    }

    #[test]
    fn test_parse_browser_config() {
        let config: WebDriverConfig =
            serde_json::from_str(r#"{"browser": "firefox", "wait_timeout_ms": 5000}"#).unwrap();
        assert_eq!(config.browser, Browser::Firefox);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.wait_timeout(), Some(Duration::from_secs(5)));
    }
}
