//! Form field value objects

/// Glyph used to mask secret field values on screen
const SECRET_MASK: char = '•';

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub is_secret: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            is_secret: false,
        }
    }

    /// Create a new masked field (passwords)
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            is_secret: true,
            ..Self::text(name, label)
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// True when the value is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Get the display value for rendering, masked for secret fields
    pub fn display_value(&self) -> String {
        if self.is_secret {
            std::iter::repeat(SECRET_MASK)
                .take(self.value.chars().count())
                .collect()
        } else {
            self.value.clone()
        }
    }
}
