//! Form state management and form structs

use super::field::FormField;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    /// The text field under the cursor, `None` on selector/button rows
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;

    /// Current values keyed by field name
    fn values(&self) -> Vec<(&str, &str)> {
        (0..self.field_count())
            .filter_map(|i| self.get_field(i))
            .map(|f| (f.name.as_str(), f.as_text()))
            .collect()
    }
}

/// Rows of the project creation form, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormRow {
    Name,
    /// Empty / From template selector
    Mode,
    /// Create button, or the template list in template mode
    Actions,
}

// Project Create Form
#[derive(Debug, Clone)]
pub struct ProjectCreateForm {
    pub name: FormField,
    pub active_field_index: usize,
    show_mode: bool,
}

impl ProjectCreateForm {
    /// `hide_type` removes the Empty/Template selector row
    pub fn new(hide_type: bool) -> Self {
        Self {
            name: FormField::text("name", "Enter a name for your project"),
            active_field_index: 0,
            show_mode: !hide_type,
        }
    }

    pub fn shows_mode(&self) -> bool {
        self.show_mode
    }

    pub fn active_row(&self) -> ProjectFormRow {
        match (self.active_field_index, self.show_mode) {
            (0, _) => ProjectFormRow::Name,
            (1, true) => ProjectFormRow::Mode,
            _ => ProjectFormRow::Actions,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
    }
}

impl Default for ProjectCreateForm {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Form for ProjectCreateForm {
    fn field_count(&self) -> usize {
        if self.show_mode {
            3 // name, mode, actions
        } else {
            2
        }
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_row() {
            ProjectFormRow::Name => Some(&mut self.name),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            _ => None,
        }
    }
}

// Password Reset Form
#[derive(Debug, Clone)]
pub struct PasswordResetForm {
    pub password: FormField,
    pub password_confirm: FormField,
    pub active_field_index: usize,
}

impl PasswordResetForm {
    pub fn new() -> Self {
        Self {
            password: FormField::secret("password", "New password"),
            password_confirm: FormField::secret("password_confirm", "Confirm your new password"),
            active_field_index: 0,
        }
    }

    /// Returns true if the submit button row is currently active
    pub fn is_button_active(&self) -> bool {
        self.active_field_index == 2
    }

    pub fn clear(&mut self) {
        self.password.clear();
        self.password_confirm.clear();
    }
}

impl Default for PasswordResetForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for PasswordResetForm {
    fn field_count(&self) -> usize {
        3 // password, confirmation, button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.password),
            1 => Some(&mut self.password_confirm),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.password),
            1 => Some(&self.password_confirm),
            _ => None,
        }
    }
}
