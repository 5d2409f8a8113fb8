//! Tracker - Layout Helpers
//!
//! Small presentation helpers for the tracker web front-end:
//! - Viewport scale classes (`x-narrow` .. `x-wide`) on the page body
//! - Placeholder emulation for inputs without native support
//! - Centered popups toggled by a trigger
//! - Content replacement that keeps marked scroll positions
//!
//! Each helper is plain state plus a narrow trait for the parts that touch
//! the document, so the logic runs and tests without a browser.

#![deny(unsafe_code)]

mod placeholder;
mod popup;
mod scroll;
mod viewport;

pub use placeholder::PlaceholderField;
pub use popup::{Popup, PopupGeometry};
pub use scroll::{replace_preserving_scroll, ScrollHost, ScrollSnapshot, KEEP_SCROLL_CLASS};
pub use viewport::{ClassList, ViewportClass, SCALE_STEP};
