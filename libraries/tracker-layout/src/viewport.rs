//! Viewport scale classes
//!
//! The page body carries one of five size classes derived from the larger
//! viewport dimension. Stylesheets key font sizes and column counts off it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Pixels per scale step
pub const SCALE_STEP: u32 = 350;

/// Mutable set of CSS classes on an element
pub trait ClassList {
    fn add_class(&mut self, name: &str);
    fn remove_class(&mut self, name: &str);
}

impl ClassList for BTreeSet<String> {
    fn add_class(&mut self, name: &str) {
        self.insert(name.to_string());
    }

    fn remove_class(&mut self, name: &str) {
        self.remove(name);
    }
}

/// Size class of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewportClass {
    /// Up to 699px
    XNarrow,
    /// 700..=1049px
    Narrow,
    /// 1050..=1399px, no class
    Regular,
    /// 1400..=1749px
    Wide,
    /// 1750px and up
    XWide,
}

impl ViewportClass {
    /// Every class name this helper may put on the body
    pub const ALL_CLASSES: [&'static str; 4] = ["x-narrow", "narrow", "wide", "x-wide"];

    /// Pick the class for a viewport from its larger dimension
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let factor = width.max(height) / SCALE_STEP;
        debug!("current factor is {}", factor);

        match factor {
            0 | 1 => ViewportClass::XNarrow,
            2 => ViewportClass::Narrow,
            3 => ViewportClass::Regular,
            4 => ViewportClass::Wide,
            _ => ViewportClass::XWide,
        }
    }

    /// CSS class name, `None` for the regular size
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            ViewportClass::XNarrow => Some("x-narrow"),
            ViewportClass::Narrow => Some("narrow"),
            ViewportClass::Regular => None,
            ViewportClass::Wide => Some("wide"),
            ViewportClass::XWide => Some("x-wide"),
        }
    }

    /// Strip every size class, then add this one
    pub fn apply<C: ClassList + ?Sized>(self, classes: &mut C) {
        for name in Self::ALL_CLASSES {
            classes.remove_class(name);
        }
        if let Some(name) = self.class_name() {
            classes.add_class(name);
        }
    }
}
