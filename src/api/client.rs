//! HTTP client for the dashboard API
//!
//! Implements [`ActionDispatcher`] and [`TemplatePicker`] over reqwest with
//! JSON bodies and optional bearer authentication.

use super::traits::{ActionDispatcher, NewProject, PasswordChange, TemplatePicker};
use crate::error::DispatchError;
use crate::state::{Project, Team, Template};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API address
pub const DEFAULT_API_HOST: &str = "http://localhost:4019";

/// Error body shape the API uses for failed requests
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateFromTemplate {
    project_id: i64,
}

/// Client for communicating with the dashboard API
pub struct ApiClient {
    http: Client,
    host: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(
        host: impl Into<String>,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DispatchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            host: host.into(),
            auth_token,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.host, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Turn non-success responses into [`DispatchError::Status`]
    async fn check(response: Response) -> Result<Response, DispatchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DispatchError::Status {
            status: status.as_u16(),
            message: error_message(status.as_u16(), status.canonical_reason(), &body),
        })
    }
}

fn join_url(host: &str, path: &str) -> String {
    format!("{}/{}", host.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Pick the most useful message from an error response body
fn error_message(status: u16, reason: Option<&str>, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => {
            if let Some(message) = parsed.message.or(parsed.error) {
                return message;
            }
        }
        Err(_) => {
            let trimmed = body.trim();
            if !trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<') {
                return trimmed.to_string();
            }
        }
    }
    match reason {
        Some(reason) => format!("{status} {reason}"),
        None => format!("Request failed with status {status}"),
    }
}

#[async_trait]
impl ActionDispatcher for ApiClient {
    async fn create_project(&self, project: NewProject) -> Result<Project, DispatchError> {
        tracing::debug!("POST /project team_id={}", project.team_id);
        let response = self
            .authorized(self.http.post(self.url("/project")))
            .json(&project)
            .send()
            .await?;
        let project = Self::check(response).await?.json::<Project>().await?;
        Ok(project)
    }

    async fn change_password(&self, change: PasswordChange) -> Result<(), DispatchError> {
        tracing::debug!("PUT /user/password/change");
        let response = self
            .http
            .put(self.url("/user/password/change"))
            .json(&change)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, DispatchError> {
        let response = self
            .authorized(self.http.get(self.url("/team")))
            .send()
            .await?;
        let teams = Self::check(response).await?.json::<Vec<Team>>().await?;
        Ok(teams)
    }

    async fn list_templates(&self, team_id: i64) -> Result<Vec<Template>, DispatchError> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/team/{team_id}/template"))))
            .send()
            .await?;
        let templates = Self::check(response).await?.json::<Vec<Template>>().await?;
        Ok(templates)
    }
}

#[async_trait]
impl TemplatePicker for ApiClient {
    async fn apply(
        &self,
        team_id: i64,
        project_id: i64,
        template: Template,
    ) -> Result<(), DispatchError> {
        let path = format!("/team/{team_id}/template/generate/{}", template.id);
        tracing::debug!("POST {} project_id={}", path, project_id);
        let response = self
            .authorized(self.http.post(self.url(&path)))
            .json(&GenerateFromTemplate { project_id })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(
            join_url("http://localhost:4019/", "/project"),
            "http://localhost:4019/project"
        );
        assert_eq!(
            join_url("http://localhost:4019", "team/1/template"),
            "http://localhost:4019/team/1/template"
        );
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        let body = r#"{"message": "Invalid token", "error": "ignored"}"#;
        assert_eq!(error_message(400, Some("Bad Request"), body), "Invalid token");
    }

    #[test]
    fn test_error_message_falls_back_to_error_field() {
        let body = r#"{"error": "Not allowed"}"#;
        assert_eq!(error_message(403, Some("Forbidden"), body), "Not allowed");
    }

    #[test]
    fn test_error_message_uses_plain_text_body() {
        assert_eq!(error_message(500, None, "  boom \n"), "boom");
    }

    #[test]
    fn test_error_message_ignores_html_body() {
        let body = "<html><body>Bad gateway</body></html>";
        assert_eq!(error_message(502, Some("Bad Gateway"), body), "502 Bad Gateway");
    }

    #[test]
    fn test_error_message_json_without_message_uses_reason() {
        assert_eq!(error_message(404, Some("Not Found"), "{}"), "404 Not Found");
    }

    #[test]
    fn test_error_message_without_reason() {
        assert_eq!(error_message(599, None, ""), "Request failed with status 599");
    }

    #[test]
    fn test_client_keeps_host() {
        let client = ApiClient::new("http://api.test", None, Duration::from_secs(5)).unwrap();
        assert_eq!(client.host(), "http://api.test");
        assert_eq!(client.url("/team"), "http://api.test/team");
    }
}
