//! CLI Commands

pub mod check;
pub mod snapshot;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use embedprobe::config::URL_ENV;
use embedprobe::{PlayerHandle, ProbeConfig, WebDriverSession};
use tracing::warn;

/// Looked up in the working directory when neither --config nor --url is given
const DEFAULT_CONFIG: &str = "config.json";

/// Connection settings shared by every command
#[derive(Debug, Clone)]
pub struct Target {
    pub config: Option<PathBuf>,
    pub url: Option<String>,
    pub webdriver: Option<String>,
    pub headless: bool,
}

impl Target {
    /// Merge the config file, environment and command-line flags
    pub fn resolve(&self) -> Result<ProbeConfig> {
        self.resolve_with(Path::new(DEFAULT_CONFIG), std::env::var(URL_ENV).ok())
    }

    fn resolve_with(&self, default_config: &Path, env_url: Option<String>) -> Result<ProbeConfig> {
        let mut config = match (&self.config, &self.url, &env_url) {
            (Some(path), _, _) => ProbeConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            (None, Some(url), _) => ProbeConfig::new(url.clone()),
            (None, None, _) if default_config.exists() => ProbeConfig::load(default_config)
                .with_context(|| format!("loading {}", default_config.display()))?,
            (None, None, Some(url)) => ProbeConfig::new(url.clone()),
            (None, None, None) => bail!(
                "no player page given: pass --url, --config, set {} or provide {}",
                URL_ENV,
                default_config.display()
            ),
        };

        if let Some(url) = self.url.as_ref().or(env_url.as_ref()) {
            config.url = url.clone();
        }
        if let Some(endpoint) = &self.webdriver {
            config.webdriver.endpoint = endpoint.clone();
        }
        if self.headless {
            config.webdriver.headless = true;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Attach to the player through an existing session
pub async fn attach<'s>(
    config: &ProbeConfig,
    session: &'s WebDriverSession,
) -> Result<PlayerHandle<'s, WebDriverSession>> {
    let player = PlayerHandle::build_with(
        &config.url,
        session,
        &config.navigator,
        config.extractor.clone(),
    )
    .await
    .with_context(|| format!("attaching to player at {}", config.url))?;
    Ok(player)
}

/// Release the browser; failures are only logged so they never mask the
/// command's own result.
pub async fn release(session: WebDriverSession) {
    if let Err(e) = session.close().await {
        warn!("Failed to close WebDriver session: {}", e);
    }
}
