//! Core types for cue playback

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Completion callback for one playback run
///
/// `FnOnce` makes double delivery impossible. Completions are not `Send`:
/// everything runs on the host's UI thread.
pub type Completion = Box<dyn FnOnce(PlaybackOutcome)>;

/// Terminal result of a playback request, delivered through its [`Completion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackOutcome {
    /// The host reported the end of the run
    Finished,

    /// Playback is disabled or unsupported; nothing was attempted
    Disabled,

    /// A newer request for the same source took over the run
    /// (only delivered under [`SupersedePolicy::Notify`])
    Superseded,
}

impl PlaybackOutcome {
    /// The `didFinish` flag callers receive on the JavaScript side
    pub fn did_finish(self) -> bool {
        matches!(self, PlaybackOutcome::Finished)
    }
}

impl From<PlaybackOutcome> for bool {
    fn from(outcome: PlaybackOutcome) -> Self {
        outcome.did_finish()
    }
}

/// Attributes the manager owns; options cannot override them
pub const RESERVED_ATTRIBUTES: [&str; 3] = ["src", "preload", "style"];

/// Per-request options
///
/// Unrecognized keys land in `attributes` and reach the host element through
/// [`PlayOptions::element_attributes`], so `{"volume": 0.4, "loop": true}`
/// deserializes into a volume plus one attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayOptions {
    /// Output gain in [0.0, 1.0], applied once the element is ready
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    /// Extra element attributes, any JSON scalar
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl PlayOptions {
    /// Options carrying only a volume
    pub fn with_volume(volume: f32) -> Self {
        Self {
            volume: Some(volume),
            ..Self::default()
        }
    }

    /// Parse options from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Volume clamped into [0.0, 1.0]; NaN is treated as absent
    pub fn sanitized_volume(&self) -> Option<f32> {
        match self.volume {
            Some(v) if v.is_nan() => {
                tracing::warn!("Ignoring NaN volume");
                None
            }
            Some(v) if !(0.0..=1.0).contains(&v) => {
                let clamped = v.clamp(0.0, 1.0);
                tracing::warn!("Volume {} out of range, clamped to {}", v, clamped);
                Some(clamped)
            }
            other => other,
        }
    }

    /// Attributes to put on the host element
    ///
    /// Strings and numbers are written as text. `true` sets a boolean
    /// attribute (`loop="loop"`); `false` and `null` leave it off. Reserved
    /// names and non-scalar values are dropped.
    pub fn element_attributes(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .filter_map(|(name, value)| {
                if RESERVED_ATTRIBUTES.contains(&name.to_ascii_lowercase().as_str()) {
                    tracing::warn!("Ignoring reserved attribute {}", name);
                    return None;
                }
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(true) => name.clone(),
                    Value::Bool(false) | Value::Null => return None,
                    Value::Array(_) | Value::Object(_) => {
                        tracing::warn!("Ignoring non-scalar attribute {}", name);
                        return None;
                    }
                };
                Some((name.clone(), text))
            })
            .collect()
    }
}

/// Preload hint passed to the host when an element is constructed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preload {
    /// Fetch the whole resource eagerly
    #[default]
    Auto,

    /// Fetch metadata only
    Metadata,

    /// Fetch nothing until played
    None,
}

impl Preload {
    /// Attribute value understood by media elements
    pub fn as_str(self) -> &'static str {
        match self {
            Preload::Auto => "auto",
            Preload::Metadata => "metadata",
            Preload::None => "none",
        }
    }
}

/// What a repeated `play` does to a handle that already finished loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReusePolicy {
    /// Rewind to the start and play without waiting for another "ready"
    #[default]
    Restart,

    /// Reload the element and wait for a fresh "ready" notification
    Reload,
}

/// What happens to a pending completion when a newer request arrives
/// for the same source before the run finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupersedePolicy {
    /// Drop the old completion without calling it
    #[default]
    Replace,

    /// Call the old completion with [`PlaybackOutcome::Superseded`], then replace it
    Notify,

    /// Keep every completion; all of them see the end of the run
    Queue,
}

/// When handles leave the registry on their own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvictionPolicy {
    /// Keep handles for the page lifetime
    #[default]
    Retain,

    /// Remove the handle and its element once a run finishes
    RemoveOnFinish,
}

/// Lifecycle of a [`PlaybackHandle`](crate::registry::PlaybackHandle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleState {
    /// Registered, host element not requested yet
    Created,

    /// Waiting for the host "ready" notification
    Loading,

    /// Buffered enough to play
    Ready,

    /// Running; the "finished" notification is armed
    Playing,

    /// Last run ended; the handle stays reusable
    Finished,
}

/// Configuration for the playback manager
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Capability flag set by startup detection (default: false)
    pub enabled: bool,

    /// Preload hint for new elements (default: auto)
    pub preload: Preload,

    /// Reuse behaviour for known sources (default: restart)
    pub reuse: ReusePolicy,

    /// Handling of pending completions on re-request (default: replace)
    pub supersede: SupersedePolicy,

    /// Registry eviction (default: retain)
    pub eviction: EvictionPolicy,
}

impl PlaybackConfig {
    /// Default configuration with playback switched on
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Parse configuration from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
