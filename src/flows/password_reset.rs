//! Password reset flow
//!
//! The reset link carries a `token` and `hash` pair. The flow collects the new
//! password twice, validates it locally and asks the API to change it. After a
//! successful change the user is sent to the login page.

use crate::api::{ActionDispatcher, PasswordChange};
use crate::error::{DispatchError, SubmitError, ValidationError};
use crate::flows::Navigator;
use crate::state::{
    AsyncSubmitter, Dispatch, Form, PasswordResetForm, SubmissionStatus, TimerScope, Validate,
};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

pub const LOGIN_PATH: &str = "/login";

/// Delay between a successful change and the redirect to [`LOGIN_PATH`]
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(3000);

pub const REQUEST_FAILED_MESSAGE: &str =
    "The request failed, please try again or get in touch with us for help.";

/// Token and hash from the reset link. Either may be missing; absence is
/// passed through to the API unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetToken {
    token: Option<String>,
    hash: Option<String>,
}

impl ResetToken {
    pub fn new(token: Option<String>, hash: Option<String>) -> Self {
        Self { token, hash }
    }

    /// Parse a query string, with or without the leading `?`.
    /// The first occurrence of each key wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut parsed = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "token" if parsed.token.is_none() => parsed.token = Some(value.into_owned()),
                "hash" if parsed.hash.is_none() => parsed.hash = Some(value.into_owned()),
                _ => {}
            }
        }
        parsed
    }

    /// Parse a full reset link, falling back to treating the input as a bare
    /// query string
    pub fn from_link(link: &str) -> Self {
        match Url::parse(link.trim()) {
            Ok(url) => Self::from_query(url.query().unwrap_or_default()),
            Err(_) => Self::from_query(link),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }
}

pub struct PasswordResetFlow {
    id: Uuid,
    pub form: PasswordResetForm,
    token: ResetToken,
    submitter: AsyncSubmitter<()>,
    validation_error: Option<ValidationError>,
    dispatcher: Arc<dyn ActionDispatcher>,
    navigator: Arc<dyn Navigator>,
    timers: TimerScope,
}

impl PasswordResetFlow {
    pub fn new(
        token: ResetToken,
        dispatcher: Arc<dyn ActionDispatcher>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(
            flow = %id,
            has_token = token.token.is_some(),
            has_hash = token.hash.is_some(),
            "Opening password reset flow"
        );
        Self {
            id,
            form: PasswordResetForm::new(),
            token,
            submitter: AsyncSubmitter::new(),
            validation_error: None,
            dispatcher,
            navigator,
            timers: TimerScope::new(),
        }
    }

    pub fn token(&self) -> &ResetToken {
        &self.token
    }

    pub fn status(&self) -> &SubmissionStatus<()> {
        self.submitter.status()
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.validation_error
    }

    /// Inline validation message or the request failure message
    pub fn error_message(&self) -> Option<String> {
        self.validation_error
            .map(|err| err.to_string())
            .or_else(|| self.submitter.status().error().map(str::to_string))
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// The button stays disabled while loading and after a successful change
    pub fn can_submit(&self) -> bool {
        !self.submitter.is_loading() && !self.submitter.status().is_succeeded()
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.form.get_active_field_mut() {
            field.push_char(c);
            self.on_edit();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.form.get_active_field_mut() {
            field.pop_char();
            self.on_edit();
        }
    }

    pub fn set_passwords(&mut self, password: impl Into<String>, confirmation: impl Into<String>) {
        self.form.password.set_text(password);
        self.form.password_confirm.set_text(confirmation);
        self.on_edit();
    }

    fn on_edit(&mut self) {
        self.validation_error = None;
        self.submitter.reset();
    }

    /// Validate and enter Loading, returning the request to run
    pub fn start_submit(&mut self) -> Result<Dispatch<()>, SubmitError> {
        if self.submitter.is_loading() {
            return Err(SubmitError::InFlight);
        }
        if self.submitter.status().is_succeeded() {
            return Err(SubmitError::Completed);
        }
        if let Err(err) = self.form.validate() {
            tracing::debug!(flow = %self.id, "Password rejected locally: {:?}", err);
            self.validation_error = Some(err);
            return Err(err.into());
        }
        self.submitter.begin()?;
        self.validation_error = None;

        let change = PasswordChange {
            token: self.token.token.clone(),
            hash: self.token.hash.clone(),
            password: self.form.password.as_text().to_string(),
        };
        tracing::info!(
            flow = %self.id,
            attempt = self.submitter.dispatched(),
            "Submitting password change"
        );

        let dispatcher = Arc::clone(&self.dispatcher);
        Ok(Box::pin(
            async move { dispatcher.change_password(change).await },
        ))
    }

    /// Apply the outcome of a request started with [`Self::start_submit`].
    ///
    /// Password fields are cleared only on success.
    pub fn finish_submit(&mut self, outcome: Result<(), DispatchError>) -> Result<(), String> {
        let flow = self.id;
        self.submitter.resolve(outcome, |err| {
            tracing::warn!(flow = %flow, "Password change failed: {}", err);
            REQUEST_FAILED_MESSAGE.to_string()
        })?;

        tracing::info!(flow = %self.id, "Password changed");
        self.form.clear();

        let navigator = Arc::clone(&self.navigator);
        self.timers
            .schedule("login-redirect", LOGIN_REDIRECT_DELAY, move || {
                navigator.redirect(LOGIN_PATH);
            });
        Ok(())
    }

    /// Submit and wait for the result
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        let dispatch = self.start_submit()?;
        let outcome = dispatch.await;
        self.finish_submit(outcome).map_err(SubmitError::Failed)
    }
}

impl Drop for PasswordResetFlow {
    fn drop(&mut self) {
        tracing::debug!(
            flow = %self.id,
            pending_timers = self.timers.pending(),
            "Closing password reset flow"
        );
        self.timers.cancel_all();
    }
}
