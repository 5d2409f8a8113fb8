//! Scroll-preserving content replacement
//!
//! Replacing a container's markup resets the scroll offset of every
//! scrollable inside it. Elements marked with [`KEEP_SCROLL_CLASS`] get their
//! offsets back, matched by document order.

use tracing::debug;

/// Marker class for elements whose scroll offset survives a replacement
pub const KEEP_SCROLL_CLASS: &str = "keep-scroll-position";

/// Document access needed to replace content and move scroll offsets
pub trait ScrollHost {
    /// Number of elements currently carrying [`KEEP_SCROLL_CLASS`]
    fn kept_len(&self) -> usize;

    /// Scroll offset of the `index`-th marked element
    fn scroll_top(&self, index: usize) -> f64;

    fn set_scroll_top(&mut self, index: usize, offset: f64);

    /// Replace the container's markup
    fn set_html(&mut self, html: &str);
}

/// Scroll offsets of the marked elements, by document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollSnapshot {
    offsets: Vec<f64>,
}

impl ScrollSnapshot {
    pub fn capture<H: ScrollHost + ?Sized>(host: &H) -> Self {
        Self {
            offsets: (0..host.kept_len()).map(|i| host.scroll_top(i)).collect(),
        }
    }

    /// Put offsets back; marked elements without a recorded offset are
    /// left alone. Returns how many offsets were restored.
    pub fn restore<H: ScrollHost + ?Sized>(&self, host: &mut H) -> usize {
        let count = self.offsets.len().min(host.kept_len());
        for (index, offset) in self.offsets.iter().take(count).enumerate() {
            host.set_scroll_top(index, *offset);
        }
        count
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }
}

/// Replace markup while keeping marked scroll positions
pub fn replace_preserving_scroll<H: ScrollHost + ?Sized>(host: &mut H, html: &str) {
    let snapshot = ScrollSnapshot::capture(host);
    host.set_html(html);
    let restored = snapshot.restore(host);
    debug!(
        "Restored {} of {} scroll position(s)",
        restored,
        snapshot.offsets().len()
    );
}
