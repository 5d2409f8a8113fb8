//! Tracker - Cue Playback
//!
//! Host-agnostic playback of short audio cues for the tracker web front-end.
//!
//! This crate provides:
//! - One host element per source, created on first request and reused after
//! - A completion per playback run (`Finished`, or `Disabled` when the
//!   capability flag is off)
//! - Explicit policies for re-requests (supersede), reuse (restart vs reload)
//!   and registry eviction
//! - A web-sys `<audio>` host and JavaScript bindings behind the `wasm`
//!   feature
//!
//! # Architecture
//!
//! `tracker-playback` does not touch a document itself. Element construction,
//! volume and transport are delegated to a [`MediaHost`]; the host reports
//! "ready" and "finished" back as [`MediaEvent`]s. Everything runs on one
//! thread, driven by the host's event loop.
//!
//! # Example
//!
//! ```rust
//! use tracker_playback::{
//!     ElementSpec, MediaEvent, MediaHost, PlayOptions, PlaybackConfig, PlaybackManager,
//!     PlaybackOutcome, Result,
//! };
//!
//! struct SilentHost;
//!
//! impl MediaHost for SilentHost {
//!     type Element = String;
//!
//!     fn create(&mut self, spec: &ElementSpec) -> Result<String> {
//!         Ok(spec.source_id.clone())
//!     }
//!     fn set_volume(&mut self, _element: &String, _volume: f32) {}
//!     fn play(&mut self, _element: &String) {}
//!     fn rewind(&mut self, _element: &String) {}
//!     fn reload(&mut self, _element: &String) {}
//!     fn remove(&mut self, _element: String) {}
//! }
//!
//! let mut manager = PlaybackManager::with_host(PlaybackConfig::enabled(), SilentHost);
//!
//! manager
//!     .play(
//!         "/static/sounds/round_end.mp3",
//!         PlayOptions::with_volume(0.5),
//!         Some(Box::new(|outcome: PlaybackOutcome| {
//!             assert!(outcome.did_finish());
//!         })),
//!     )
//!     .unwrap();
//!
//! // Later, from the host's event loop
//! manager.handle_event(MediaEvent::Ready { source_id: "/static/sounds/round_end.mp3".into() });
//! manager.handle_event(MediaEvent::Finished { source_id: "/static/sounds/round_end.mp3".into() });
//! ```

mod error;
mod host;
mod manager;
mod registry;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use error::{PlaybackError, Result};
pub use host::{ElementSpec, MediaEvent, MediaHost};
pub use manager::{PlaybackManager, Resolved};
pub use registry::{PlaybackHandle, PlaybackRegistry};
pub use types::{
    Completion, EvictionPolicy, HandleState, PlayOptions, PlaybackConfig, PlaybackOutcome,
    Preload, ReusePolicy, SupersedePolicy, RESERVED_ATTRIBUTES,
};
