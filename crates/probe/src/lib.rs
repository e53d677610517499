//! EmbedProbe
//!
//! Drives an iframe-embedded video player through a WebDriver session and
//! reads its internal playback state into point-in-time snapshots that a
//! test suite can assert against.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PlayerHandle<'s, S>                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  build(address, session)                                    │
//! │    ├── navigator::setup()   load page, enter iframe, settle │
//! │    └── Extractor::capture() initial snapshot                │
//! │  refresh() -> PlayerSnapshot (replaces the stored one)      │
//! │  snapshot() -> Option<&PlayerSnapshot>                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  AutomationSession (trait)                                  │
//! │    navigate / wait_for_element / find_element /             │
//! │    switch_context / evaluate / sleep                        │
//! │    └── WebDriverSession (fantoccini)                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod expect;
pub mod extractor;
pub mod navigator;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod webdriver;

pub use config::ProbeConfig;
pub use error::{ProbeError, ProbeResult};
pub use expect::{Expectation, ExpectationOutcome};
pub use extractor::{CaptureStrategy, Extractor, ExtractorConfig};
pub use navigator::NavigatorConfig;
pub use player::PlayerHandle;
pub use session::AutomationSession;
pub use snapshot::{PlayerDimensions, PlayerSnapshot};
pub use webdriver::{WebDriverConfig, WebDriverSession};
