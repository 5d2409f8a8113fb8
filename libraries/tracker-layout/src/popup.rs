//! Centered popups
//!
//! A popup starts hidden, sits fixed in the middle of the viewport, and
//! flips visibility each time its trigger is clicked.

use std::fmt;
use tracing::debug;

/// Fixed-position placement centering a box of known size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupGeometry {
    pub margin_left: f64,
    pub margin_top: f64,
}

impl PopupGeometry {
    /// Negative half-size margins around a 50%/50% anchor
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            margin_left: -width / 2.0,
            margin_top: -height / 2.0,
        }
    }

    /// CSS declarations to put on the popup element
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "fixed".to_string()),
            ("top", "50%".to_string()),
            ("left", "50%".to_string()),
            ("margin-left", format!("{}px", self.margin_left)),
            ("margin-top", format!("{}px", self.margin_top)),
        ]
    }
}

/// Toggle state of one popup
pub struct Popup {
    geometry: PopupGeometry,
    visible: bool,
    on_toggle: Option<Box<dyn FnMut(bool)>>,
}

impl Popup {
    /// Hidden popup for a box of `width` x `height`
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            geometry: PopupGeometry::centered(width, height),
            visible: false,
            on_toggle: None,
        }
    }

    /// Run `callback(visible)` after every toggle
    pub fn with_callback(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_toggle = Some(Box::new(callback));
        self
    }

    /// Trigger clicked; returns the new visibility
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        debug!("Popup {}", if self.visible { "shown" } else { "hidden" });
        if let Some(callback) = self.on_toggle.as_mut() {
            callback(self.visible);
        }
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn geometry(&self) -> PopupGeometry {
        self.geometry
    }
}

impl fmt::Debug for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popup")
            .field("geometry", &self.geometry)
            .field("visible", &self.visible)
            .field("on_toggle", &self.on_toggle.is_some())
            .finish()
    }
}
