//! Application state definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    ProjectCreate,
    PasswordReset,
    /// Landing page after a password change
    Login,
    /// A freshly created project
    ProjectDetail,
}

impl View {
    /// Map a navigation path to a view. Unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        match path {
            "" => Some(View::ProjectCreate),
            "/login" => Some(View::Login),
            "/password-reset" => Some(View::PasswordReset),
            _ if path.starts_with("/project/") => Some(View::ProjectDetail),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::ProjectCreate => "New project",
            View::PasswordReset => "Password reset",
            View::Login => "Login",
            View::ProjectDetail => "Project",
        }
    }
}

/// Team the user is working in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// Project as returned by the dashboard API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub team_id: i64,
    #[serde(rename = "brewName", default)]
    pub brew_name: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Path the dashboard serves this project under
    pub fn path(&self) -> String {
        format!("/project/{}", self.id)
    }
}

/// Project template offered in "From template" mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Team new projects are created in
    pub active_team: Option<Team>,
    /// Project shown in the detail view
    pub project: Option<Project>,
    /// Transient message for the status bar
    pub status_message: Option<String>,
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.error_queue.len()
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn clear_errors(&mut self) {
        self.error_queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_path() {
        assert_eq!(View::from_path("/login"), Some(View::Login));
        assert_eq!(View::from_path("/login/"), Some(View::Login));
        assert_eq!(View::from_path("/"), Some(View::ProjectCreate));
        assert_eq!(View::from_path("/project/12"), Some(View::ProjectDetail));
        assert_eq!(View::from_path("/password-reset"), Some(View::PasswordReset));
        assert_eq!(View::from_path("/nowhere"), None);
    }

    #[test]
    fn test_project_deserializes_api_shape() {
        let json = r#"{
            "id": 4,
            "name": "My Project",
            "team_id": 2,
            "brewName": "my-project-4",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "dashboardTitle": null
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 4);
        assert_eq!(project.brew_name.as_deref(), Some("my-project-4"));
        assert!(project.created_at.is_some());
        assert_eq!(project.path(), "/project/4");
    }

    #[test]
    fn test_project_optional_fields_default() {
        let json = r#"{"id": 1, "name": "x", "team_id": 1}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.brew_name.is_none());
        assert!(project.created_at.is_none());
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(!state.has_errors());
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.clear_errors();
        assert!(!state.has_errors());
    }
}
