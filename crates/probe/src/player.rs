//! Live binding to one embedded player

use tracing::info;

use crate::error::ProbeResult;
use crate::extractor::{Extractor, ExtractorConfig};
use crate::navigator::{self, NavigatorConfig};
use crate::session::AutomationSession;
use crate::snapshot::PlayerSnapshot;

/// An embedded player reached through a borrowed automation session.
///
/// Holds the most recent [`PlayerSnapshot`]. The session must outlive the
/// handle and is released by the caller.
pub struct PlayerHandle<'s, S: AutomationSession + ?Sized> {
    session: &'s S,
    extractor: Extractor,
    snapshot: Option<PlayerSnapshot>,
}

impl<'s, S: AutomationSession + ?Sized> PlayerHandle<'s, S> {
    /// Load `address`, enter the player frame and take an initial snapshot
    pub async fn build(address: &str, session: &'s S) -> ProbeResult<Self> {
        Self::build_with(
            address,
            session,
            &NavigatorConfig::default(),
            ExtractorConfig::default(),
        )
        .await
    }

    /// Same as [`build`](Self::build) with explicit selectors and timing
    pub async fn build_with(
        address: &str,
        session: &'s S,
        navigator: &NavigatorConfig,
        extractor: ExtractorConfig,
    ) -> ProbeResult<Self> {
        let extractor = Extractor::new(extractor)?;
        navigator::setup(address, session, navigator).await?;

        let mut handle = Self {
            session,
            extractor,
            snapshot: None,
        };
        handle.refresh().await?;

        info!("Player attached at {}", address);
        Ok(handle)
    }

    /// The last captured snapshot
    pub fn snapshot(&self) -> Option<&PlayerSnapshot> {
        self.snapshot.as_ref()
    }

    /// Capture a fresh snapshot and store it in place of the previous one.
    ///
    /// On failure the previously stored snapshot is kept.
    pub async fn refresh(&mut self) -> ProbeResult<&PlayerSnapshot> {
        let snapshot = self.extractor.capture(self.session).await?;
        let stored = self.snapshot.insert(snapshot);
        Ok(&*stored)
    }

    pub fn session(&self) -> &'s S {
        self.session
    }
}
