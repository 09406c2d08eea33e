//! Trait abstraction for the dashboard API to enable mocking in tests

use crate::error::DispatchError;
use crate::state::{Project, Team, Template};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Body of a create-project request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub name: String,
    pub team_id: i64,
}

/// Body of a change-password request.
///
/// A missing token or hash is sent as `null`; the API decides what that means.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub token: Option<String>,
    pub hash: Option<String>,
    pub password: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("token", &self.token)
            .field("hash", &self.hash)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Actions the forms dispatch to the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    /// Create a project in a team
    async fn create_project(&self, project: NewProject) -> Result<Project, DispatchError>;

    /// Change a password using the token/hash pair from a reset link
    async fn change_password(&self, change: PasswordChange) -> Result<(), DispatchError>;

    /// List the teams the user belongs to
    async fn list_teams(&self) -> Result<Vec<Team>, DispatchError>;

    /// List the project templates available to a team
    async fn list_templates(&self, team_id: i64) -> Result<Vec<Template>, DispatchError>;
}

/// Template sub-flow: fills a freshly created project from a template
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplatePicker: Send + Sync {
    async fn apply(
        &self,
        team_id: i64,
        project_id: i64,
        template: Template,
    ) -> Result<(), DispatchError>;
}
