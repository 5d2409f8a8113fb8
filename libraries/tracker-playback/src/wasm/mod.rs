//! WASM bindings for tracker-playback
//!
//! Drives hidden `<audio>` elements in the current document and exposes the
//! manager to JavaScript.

pub mod host;
pub mod manager;

pub use host::{detect_playback_support, WebElement, WebMediaHost};
pub use manager::WasmPlaybackManager;
