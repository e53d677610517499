//! Point-in-time player state

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Rendered player size
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerDimensions {
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f64>,
}

/// One read of the embedded player's state.
///
/// Values are reported verbatim; flags such as `is_playing` and
/// `is_stopped` are not reconciled against each other. A field is `None`
/// when the player returned nothing usable for it (`null`, `undefined`,
/// `NaN`, a missing accessor, or a value of another type).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Embed-time configuration parameters
    #[serde(default, deserialize_with = "lenient_map")]
    pub flashvars: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_muted: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_playing: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_stopped: Option<bool>,
    /// Media duration in seconds
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_audio: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub can_auto_play: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub use_native_player_controls: Option<bool>,
    #[serde(rename = "isDVR", default, deserialize_with = "lenient_bool")]
    pub is_dvr: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_persistent_native_player: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_overlay_controls: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_mobile_skin: Option<bool>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_live: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_360: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_drm_required: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_live_off_synch: Option<bool>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_bitrate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_dimensions")]
    pub dimensions: PlayerDimensions,
}

impl PlayerSnapshot {
    /// Decode a player record; only a non-object record is an error.
    pub fn from_record(record: Value) -> serde_json::Result<Self> {
        if !record.is_object() {
            return Err(serde::de::Error::custom(format!(
                "expected an object record, got {record}"
            )));
        }
        serde_json::from_value(record)
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(d)?.as_bool())
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(d)?.as_f64())
}

fn lenient_map<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Map<String, Value>>, D::Error> {
    match Value::deserialize(d)? {
        Value::Object(map) => Ok(Some(map)),
        _ => Ok(None),
    }
}

fn lenient_dimensions<'de, D: Deserializer<'de>>(d: D) -> Result<PlayerDimensions, D::Error> {
    Ok(serde_json::from_value(Value::deserialize(d)?).unwrap_or_default())
}

/// Snapshot field names paired with the accessor expression that reads them
/// off the player element (bound to `player` in the generated scripts).
pub const PLAYER_FIELDS: &[(&str, &str)] = &[
    ("flashvars", "player.getFlashvars()"),
    ("isMuted", "player.getPlayerElementMuted()"),
    ("isPlaying", "player.isPlaying()"),
    ("isStopped", "player.isStopped()"),
    ("duration", "player.getDuration()"),
    ("isAudio", "player.isAudio()"),
    ("canAutoPlay", "player.canAutoPlay()"),
    ("useNativePlayerControls", "player.useNativePlayerControls()"),
    ("isDVR", "player.isDVR()"),
    ("isPersistentNativePlayer", "player.isPersistentNativePlayer()"),
    ("isOverlayControls", "player.isOverlayControls()"),
    ("isMobileSkin", "player.isMobileSkin()"),
    ("volume", "player.getPlayerElementVolume()"),
    ("isLive", "player.isLive()"),
    ("is360", "player.is360()"),
    ("isDrmRequired", "player.isDrmRequired()"),
    ("isLiveOffSynch", "player.isLiveOffSynch()"),
    ("currentBitrate", "player.getCurrentBitrate()"),
    (
        "dimensions",
        "({ width: player.getWidth(), height: player.getHeight() })",
    ),
];
