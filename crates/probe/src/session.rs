//! The automation session seam
//!
//! Everything the probe needs from a remote browser goes through this trait.
//! [`WebDriverSession`](crate::webdriver::WebDriverSession) is the production
//! implementation; tests plug in scripted fakes.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProbeResult;

/// A remote-controllable browser session.
///
/// All operations resolve against the session's current addressing context
/// (top-level document, or whichever frame was last entered with
/// [`switch_context`](AutomationSession::switch_context)).
#[async_trait]
pub trait AutomationSession: Send + Sync {
    /// Handle to an element located in the remote document.
    type Element: Send;

    /// Load a page by address.
    async fn navigate(&self, address: &str) -> ProbeResult<()>;

    /// Block until an element matching `selector` exists.
    ///
    /// Fails with [`ProbeError::LocateTimeout`](crate::ProbeError::LocateTimeout)
    /// once the session's wait bound runs out.
    async fn wait_for_element(&self, selector: &str) -> ProbeResult<Self::Element>;

    /// Locate a single element, failing if it is absent.
    async fn find_element(&self, selector: &str) -> ProbeResult<Self::Element>;

    /// Re-root subsequent operations inside the given frame element.
    async fn switch_context(&self, frame: Self::Element) -> ProbeResult<()>;

    /// Run a script in the current context and return its result.
    async fn evaluate(&self, script: &str) -> ProbeResult<Value>;

    /// Suspend for a fixed wall-clock duration.
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
