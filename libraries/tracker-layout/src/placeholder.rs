//! Placeholder emulation
//!
//! Shows the placeholder as the field's own text, dimmed by a CSS class,
//! whenever the field is blurred and empty.

/// State of one input with an emulated placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderField {
    placeholder: String,
    text: String,
    dimmed: bool,
}

impl PlaceholderField {
    /// Attach to a field; the field starts blurred
    pub fn new(placeholder: impl Into<String>, text: impl Into<String>) -> Self {
        let mut field = Self {
            placeholder: placeholder.into(),
            text: text.into(),
            dimmed: false,
        };
        field.blur();
        field
    }

    /// Focus gained: hide the placeholder text
    pub fn focus(&mut self) {
        if self.text == self.placeholder {
            self.text.clear();
            self.dimmed = false;
        }
    }

    /// Focus lost: show the placeholder if there is nothing else to show
    pub fn blur(&mut self) {
        if self.text.is_empty() || self.text == self.placeholder {
            self.text.clone_from(&self.placeholder);
            self.dimmed = true;
        }
    }

    /// User edit
    pub fn input(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Text currently displayed in the field
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the placeholder class is applied
    pub fn is_dimmed(&self) -> bool {
        self.dimmed
    }

    /// Value to submit; empty while the placeholder is showing
    pub fn value(&self) -> &str {
        if self.text == self.placeholder {
            ""
        } else {
            &self.text
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}
