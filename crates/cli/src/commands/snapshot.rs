//! Snapshot command

use anyhow::Result;
use embedprobe::{PlayerSnapshot, ProbeConfig, WebDriverSession};
use serde::Serialize;

use super::{attach, release};
use crate::output::{print_fields, FieldDisplay, OutputFormat};

/// Shown for values the player did not report
const NONE: &str = "-";

fn show<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NONE.to_string(), |v| v.to_string())
}

/// Snapshot display wrapper for serialization
#[derive(Serialize)]
pub struct SnapshotDisplay<'a> {
    pub url: &'a str,
    #[serde(flatten)]
    pub snapshot: &'a PlayerSnapshot,
}

impl FieldDisplay for SnapshotDisplay<'_> {
    fn fields(&self) -> Vec<(String, String)> {
        let s = self.snapshot;
        let flashvars = s
            .flashvars
            .as_ref()
            .and_then(|f| serde_json::to_string(f).ok())
            .unwrap_or_else(|| NONE.to_string());
        vec![
            ("url".to_string(), self.url.to_string()),
            ("isPlaying".to_string(), show(s.is_playing)),
            ("isStopped".to_string(), show(s.is_stopped)),
            ("isMuted".to_string(), show(s.is_muted)),
            ("volume".to_string(), show(s.volume)),
            ("duration".to_string(), show(s.duration.map(|d| format!("{d}s")))),
            ("currentBitrate".to_string(), show(s.current_bitrate)),
            (
                "dimensions".to_string(),
                format!("{}x{}", show(s.dimensions.width), show(s.dimensions.height)),
            ),
            ("isAudio".to_string(), show(s.is_audio)),
            ("canAutoPlay".to_string(), show(s.can_auto_play)),
            ("isLive".to_string(), show(s.is_live)),
            ("isDVR".to_string(), show(s.is_dvr)),
            ("isLiveOffSynch".to_string(), show(s.is_live_off_synch)),
            ("is360".to_string(), show(s.is_360)),
            ("isDrmRequired".to_string(), show(s.is_drm_required)),
            (
                "useNativePlayerControls".to_string(),
                show(s.use_native_player_controls),
            ),
            (
                "isPersistentNativePlayer".to_string(),
                show(s.is_persistent_native_player),
            ),
            ("isOverlayControls".to_string(), show(s.is_overlay_controls)),
            ("isMobileSkin".to_string(), show(s.is_mobile_skin)),
            ("flashvars".to_string(), flashvars),
        ]
    }
}

pub async fn execute(config: &ProbeConfig, format: OutputFormat) -> Result<()> {
    let session = WebDriverSession::connect(&config.webdriver).await?;
    let result = print(config, &session, format).await;
    release(session).await;
    result
}

async fn print(config: &ProbeConfig, session: &WebDriverSession, format: OutputFormat) -> Result<()> {
    let player = attach(config, session).await?;
    if let Some(snapshot) = player.snapshot() {
        print_fields(
            &SnapshotDisplay {
                url: &config.url,
                snapshot,
            },
            format,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreported_fields_render_as_dash() {
        let snapshot = PlayerSnapshot {
            is_playing: Some(true),
            duration: Some(12.5),
            ..Default::default()
        };
        let display = SnapshotDisplay {
            url: "http://localhost/embed",
            snapshot: &snapshot,
        };
        let fields = display.fields();
        let value = |name: &str| {
            fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value.clone())
                .unwrap()
        };

        assert_eq!(value("isPlaying"), "true");
        assert_eq!(value("duration"), "12.5s");
        assert_eq!(value("volume"), "-");
        assert_eq!(value("dimensions"), "-x-");
        assert_eq!(value("flashvars"), "-");
    }
}
