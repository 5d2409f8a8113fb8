//! Browser media host backed by hidden `<audio>` elements

use crate::{ElementSpec, MediaEvent, MediaHost, PlaybackError, Result};
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlAudioElement};

/// Receiver for notifications coming out of element listeners
pub type EventSink = Rc<dyn Fn(MediaEvent)>;

type Listener = Closure<dyn FnMut(Event)>;

/// An `<audio>` element plus the listeners keeping it wired to the manager
pub struct WebElement {
    audio: HtmlAudioElement,
    on_ready: Listener,
    on_ended: Listener,
}

impl WebElement {
    pub fn audio(&self) -> &HtmlAudioElement {
        &self.audio
    }
}

/// [`MediaHost`] that appends hidden `<audio>` elements to the document body
pub struct WebMediaHost {
    document: Document,
    events: EventSink,
}

impl WebMediaHost {
    pub fn new(document: Document, events: EventSink) -> Self {
        Self { document, events }
    }

    fn listener(&self, event: fn(String) -> MediaEvent, source_id: &str) -> Listener {
        let events = Rc::clone(&self.events);
        let source_id = source_id.to_string();
        Closure::new(move |_: Event| events(event(source_id.clone())))
    }
}

fn js_error(context: &str, value: &JsValue) -> PlaybackError {
    PlaybackError::Host(format!("{}: {:?}", context, value))
}

impl MediaHost for WebMediaHost {
    type Element = WebElement;

    fn create(&mut self, spec: &ElementSpec) -> Result<WebElement> {
        let audio = HtmlAudioElement::new_with_src(&spec.source_id)
            .map_err(|e| js_error("Failed to construct <audio>", &e))?;

        audio
            .style()
            .set_property("display", "none")
            .map_err(|e| js_error("Failed to hide <audio>", &e))?;
        for (name, value) in &spec.attributes {
            audio
                .set_attribute(name, value)
                .map_err(|e| js_error("Failed to set attribute", &e))?;
        }
        audio.set_preload(spec.preload.as_str());

        let on_ready = self.listener(|source_id| MediaEvent::Ready { source_id }, &spec.source_id);
        let on_ended =
            self.listener(|source_id| MediaEvent::Finished { source_id }, &spec.source_id);
        audio
            .add_event_listener_with_callback("loadeddata", on_ready.as_ref().unchecked_ref())
            .map_err(|e| js_error("Failed to listen for loadeddata", &e))?;
        audio
            .add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref())
            .map_err(|e| js_error("Failed to listen for ended", &e))?;

        let body = self
            .document
            .body()
            .ok_or_else(|| PlaybackError::Host("Document has no body".to_string()))?;
        body.append_child(&audio)
            .map_err(|e| js_error("Failed to attach <audio>", &e))?;

        debug!("Attached <audio> for {}", spec.source_id);
        Ok(WebElement {
            audio,
            on_ready,
            on_ended,
        })
    }

    fn set_volume(&mut self, element: &WebElement, volume: f32) {
        element.audio.set_volume(f64::from(volume));
    }

    fn play(&mut self, element: &WebElement) {
        // Autoplay refusals reject the returned promise; they stay unreported
        if let Err(e) = element.audio.play() {
            warn!("play() failed for {}: {:?}", element.audio.src(), e);
        }
    }

    fn rewind(&mut self, element: &WebElement) {
        element.audio.set_current_time(0.0);
    }

    fn reload(&mut self, element: &WebElement) {
        element.audio.load();
    }

    fn remove(&mut self, element: WebElement) {
        let WebElement {
            audio,
            on_ready,
            on_ended,
        } = element;
        audio
            .remove_event_listener_with_callback("loadeddata", on_ready.as_ref().unchecked_ref())
            .ok();
        audio
            .remove_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref())
            .ok();
        audio.pause().ok();
        audio.remove();
    }
}

/// Probe whether the browser can play MP3 cues
///
/// Startup code feeds the result into `PlaybackConfig::enabled`.
#[wasm_bindgen(js_name = detectPlaybackSupport)]
pub fn detect_playback_support() -> bool {
    HtmlAudioElement::new()
        .map(|audio| !audio.can_play_type("audio/mpeg").is_empty())
        .unwrap_or(false)
}
