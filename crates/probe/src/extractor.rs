//! Player snapshot extraction
//!
//! Reads every field in [`PLAYER_FIELDS`] from the player element in the
//! session's current context and assembles them into a [`PlayerSnapshot`].
//! A capture either yields a complete snapshot or an error; nothing partial
//! is ever returned.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ProbeError, ProbeResult};
use crate::session::AutomationSession;
use crate::snapshot::{PlayerSnapshot, PLAYER_FIELDS};

pub const DEFAULT_PLAYER_SELECTOR: &str = ".mwEmbedPlayer";

/// How the field reads are phrased as remote scripts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureStrategy {
    /// One script per field, all in flight at once
    #[default]
    PerField,
    /// A single script returning the whole record
    Combined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// CSS selector of the player element inside the player frame
    pub player_selector: String,

    pub strategy: CaptureStrategy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            player_selector: DEFAULT_PLAYER_SELECTOR.to_string(),
            strategy: CaptureStrategy::default(),
        }
    }
}

/// Pre-built capture scripts for one player selector.
#[derive(Debug, Clone)]
pub struct Extractor {
    strategy: CaptureStrategy,
    field_scripts: Vec<(&'static str, String)>,
    combined_script: String,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> ProbeResult<Self> {
        if config.player_selector.trim().is_empty() {
            return Err(ProbeError::Config("player selector is empty".to_string()));
        }

        // A JSON string literal is also a valid JS string literal.
        let selector = serde_json::to_string(&config.player_selector)?;
        let prelude = format!("var player = document.querySelector({selector});");

        let field_scripts = PLAYER_FIELDS
            .iter()
            .map(|(name, accessor)| (*name, format!("{prelude}\nreturn {accessor};")))
            .collect();

        let record = PLAYER_FIELDS
            .iter()
            .map(|(name, accessor)| format!("    {name}: {accessor}"))
            .collect::<Vec<_>>()
            .join(",\n");
        let combined_script = format!("{prelude}\nreturn {{\n{record}\n}};");

        Ok(Self {
            strategy: config.strategy,
            field_scripts,
            combined_script,
        })
    }

    pub fn strategy(&self) -> CaptureStrategy {
        self.strategy
    }

    /// Script evaluated for `field` under [`CaptureStrategy::PerField`].
    pub fn field_script(&self, field: &str) -> Option<&str> {
        self.field_scripts
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, script)| script.as_str())
    }

    /// Script evaluated under [`CaptureStrategy::Combined`].
    pub fn combined_script(&self) -> &str {
        &self.combined_script
    }

    /// Read the player's current state.
    ///
    /// The session must already be addressed at the player's frame.
    pub async fn capture<S>(&self, session: &S) -> ProbeResult<PlayerSnapshot>
    where
        S: AutomationSession + ?Sized,
    {
        let record = match self.strategy {
            CaptureStrategy::PerField => self.capture_per_field(session).await?,
            CaptureStrategy::Combined => session
                .evaluate(&self.combined_script)
                .await
                .map_err(|e| retarget(e, "player record"))?,
        };

        let snapshot = PlayerSnapshot::from_record(record)?;
        debug!(
            playing = ?snapshot.is_playing,
            muted = ?snapshot.is_muted,
            volume = ?snapshot.volume,
            "Captured player snapshot"
        );
        Ok(snapshot)
    }

    async fn capture_per_field<S>(&self, session: &S) -> ProbeResult<Value>
    where
        S: AutomationSession + ?Sized,
    {
        let reads = self.field_scripts.iter().map(|(name, script)| async move {
            let value = session
                .evaluate(script)
                .await
                .map_err(|e| retarget(e, name))?;
            Ok::<_, ProbeError>((name.to_string(), value))
        });

        let fields = try_join_all(reads).await?;
        Ok(Value::Object(fields.into_iter().collect::<Map<_, _>>()))
    }
}

/// Names the field in evaluation failures coming back from the session.
fn retarget(e: ProbeError, target: &str) -> ProbeError {
    match e {
        ProbeError::Evaluation { reason, .. } => ProbeError::evaluation(target, reason),
        other => other,
    }
}
