//! WASM-compatible PlaybackManager wrapper

use super::host::{EventSink, WebMediaHost};
use crate::{Completion, MediaEvent, PlayOptions, PlaybackConfig, PlaybackManager, PlaybackOutcome};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::warn;
use wasm_bindgen::prelude::*;

type Shared = RefCell<PlaybackManager<WebMediaHost>>;

/// WASM-compatible playback manager
///
/// JavaScript counterpart of `document.playback(src, options, callback)`.
/// The callback receives `true` when the cue played to the end and `false`
/// when playback is disabled.
#[wasm_bindgen]
pub struct WasmPlaybackManager {
    inner: Rc<Shared>,
}

/// Feed a host notification into the manager, then deliver completions
/// with the borrow released so callbacks may call `play` again
fn dispatch(manager: &Weak<Shared>, event: MediaEvent) {
    let Some(manager) = manager.upgrade() else {
        return;
    };
    let resolved = match manager.try_borrow_mut() {
        Ok(mut manager) => manager.resolve(event),
        Err(_) => {
            warn!("Playback manager busy, dropping {:?}", event);
            return;
        }
    };
    resolved.deliver();
}

impl WasmPlaybackManager {
    fn with_config(config: PlaybackConfig) -> Result<WasmPlaybackManager, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let inner = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let weak = weak.clone();
            let events: EventSink = Rc::new(move |event| dispatch(&weak, event));
            RefCell::new(PlaybackManager::with_host(
                config,
                WebMediaHost::new(document, events),
            ))
        });

        Ok(Self { inner })
    }
}

#[wasm_bindgen]
impl WasmPlaybackManager {
    /// Create a playback manager
    ///
    /// `enabled` is the result of capability detection; pass
    /// `detectPlaybackSupport()` when in doubt.
    #[wasm_bindgen(constructor)]
    pub fn new(enabled: bool) -> Result<WasmPlaybackManager, JsValue> {
        console_error_panic_hook::set_once();

        let config = PlaybackConfig {
            enabled,
            ..PlaybackConfig::default()
        };
        Self::with_config(config)
    }

    /// Create a playback manager from a JSON-like config object
    #[wasm_bindgen(js_name = withConfig)]
    pub fn from_js_config(config: JsValue) -> Result<WasmPlaybackManager, JsValue> {
        console_error_panic_hook::set_once();

        let config: PlaybackConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
        Self::with_config(config)
    }

    // ===== Playback =====

    /// Play `src`, calling `callback(didFinish)` at the end of the run
    pub fn play(
        &self,
        src: &str,
        options: JsValue,
        callback: Option<Function>,
    ) -> Result<(), JsValue> {
        let options: PlayOptions = if options.is_undefined() || options.is_null() {
            PlayOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options).unwrap_or_else(|e| {
                warn!("Ignoring unreadable options for {}: {}", src, e);
                PlayOptions::default()
            })
        };

        let completion = callback.map(|callback| -> Completion {
            Box::new(move |outcome: PlaybackOutcome| {
                if let Err(e) =
                    callback.call1(&JsValue::NULL, &JsValue::from_bool(outcome.did_finish()))
                {
                    warn!("Playback callback threw: {:?}", e);
                }
            })
        });

        let resolved = self
            .inner
            .borrow_mut()
            .request(src, options, completion)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        resolved.deliver();
        Ok(())
    }

    // ===== Registry =====

    /// Forget `src` and remove its element
    pub fn evict(&self, src: &str) -> bool {
        self.inner.borrow_mut().evict(src)
    }

    /// Remove every element
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Number of cached elements
    pub fn size(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether playback is enabled
    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.inner.borrow().is_enabled()
    }

    /// Lifecycle state of `src` ("loading", "playing", ...), if cached
    pub fn state(&self, src: &str) -> Option<String> {
        self.inner
            .borrow()
            .state(src)
            .map(|state| format!("{:?}", state).to_lowercase())
    }
}
