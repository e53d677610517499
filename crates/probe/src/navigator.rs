//! Positions a session inside the player's iframe and waits for it to boot

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ProbeError, ProbeResult};
use crate::session::AutomationSession;

pub const DEFAULT_FRAME_SELECTOR: &str = "iframe";
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".mwPlayerContainer";

/// Grace period after the player container appears.
///
/// The player keeps initializing asynchronously after its container is in
/// the DOM and exposes no readiness signal we can wait on, so this is a
/// fixed pause. Flaky runs on slow machines usually mean it is too short.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Selector of the frame embedding the player, in the top-level document
    pub frame_selector: String,

    /// Selector of the player container, inside the frame
    pub container_selector: String,

    /// Settle delay in milliseconds
    pub settle_ms: u64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            frame_selector: DEFAULT_FRAME_SELECTOR.to_string(),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            settle_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
        }
    }
}

impl NavigatorConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Load `address`, enter the player frame and wait until the player has rendered.
///
/// On return every subsequent operation on `session` resolves inside the
/// player's frame.
pub async fn setup<S>(address: &str, session: &S, config: &NavigatorConfig) -> ProbeResult<()>
where
    S: AutomationSession + ?Sized,
{
    debug!("Loading {}", address);
    session.navigate(address).await.map_err(|e| match e {
        e @ ProbeError::Navigation { .. } => e,
        other => ProbeError::Navigation {
            address: address.to_string(),
            reason: other.to_string(),
        },
    })?;

    debug!("Waiting for player frame: {}", config.frame_selector);
    session.wait_for_element(&config.frame_selector).await?;

    let frame = session.find_element(&config.frame_selector).await?;
    session.switch_context(frame).await?;

    debug!("Waiting for player container: {}", config.container_selector);
    session.wait_for_element(&config.container_selector).await?;

    let settle = config.settle_delay();
    debug!("Letting the player settle for {}ms", settle.as_millis());
    session.sleep(settle).await;

    info!("Player frame ready at {}", address);
    Ok(())
}
