//! Submission status tracking shared by every form
//!
//! A form owns one [`AsyncSubmitter`]. The submitter is the only thing that
//! moves the status between Idle, Loading and the terminal states, and it
//! refuses to start a second request while one is in flight.

use crate::error::{DispatchError, SubmitError};
use std::future::Future;
use std::pin::Pin;

/// A detached dispatcher call, ready to be awaited or spawned
pub type Dispatch<T> = Pin<Box<dyn Future<Output = Result<T, DispatchError>> + Send + 'static>>;

/// Status of the most recent submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus<T> {
    Idle,
    Loading,
    Succeeded(T),
    /// Human-readable failure message
    Failed(String),
}

impl<T> Default for SubmissionStatus<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> SubmissionStatus<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Succeeded or Failed
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Succeeded(_) => "Succeeded",
            Self::Failed(_) => "Failed",
        }
    }
}

/// Gatekeeper for one in-flight request per form instance
#[derive(Debug)]
pub struct AsyncSubmitter<T> {
    status: SubmissionStatus<T>,
    dispatched: u64,
}

impl<T> Default for AsyncSubmitter<T> {
    fn default() -> Self {
        Self {
            status: SubmissionStatus::Idle,
            dispatched: 0,
        }
    }
}

impl<T: Clone> AsyncSubmitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SubmissionStatus<T> {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Number of requests this submitter has let through
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Enter Loading. Fails with [`SubmitError::InFlight`] if a request is
    /// already pending.
    pub fn begin(&mut self) -> Result<(), SubmitError> {
        if self.status.is_loading() {
            return Err(SubmitError::InFlight);
        }
        self.status = SubmissionStatus::Loading;
        self.dispatched += 1;
        Ok(())
    }

    /// Apply the outcome of the pending request.
    ///
    /// `describe` turns a dispatch failure into the message shown to the user.
    pub fn resolve<F>(&mut self, outcome: Result<T, DispatchError>, describe: F) -> Result<T, String>
    where
        F: FnOnce(&DispatchError) -> String,
    {
        if !self.status.is_loading() {
            tracing::warn!(
                "Resolving a submission from {} instead of Loading",
                self.status.label()
            );
        }
        match outcome {
            Ok(value) => {
                self.status = SubmissionStatus::Succeeded(value.clone());
                Ok(value)
            }
            Err(err) => {
                let message = describe(&err);
                self.status = SubmissionStatus::Failed(message.clone());
                Err(message)
            }
        }
    }

    /// Return a terminal status to Idle. Loading is left untouched.
    pub fn reset(&mut self) -> bool {
        if self.status.is_terminal() {
            self.status = SubmissionStatus::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let submitter: AsyncSubmitter<()> = AsyncSubmitter::new();
        assert!(submitter.status().is_idle());
        assert_eq!(submitter.dispatched(), 0);
    }

    #[test]
    fn test_begin_refuses_second_request() {
        let mut submitter: AsyncSubmitter<u32> = AsyncSubmitter::new();
        assert_eq!(submitter.begin(), Ok(()));
        assert_eq!(submitter.begin(), Err(SubmitError::InFlight));
        assert!(submitter.is_loading());
        assert_eq!(submitter.dispatched(), 1);
    }

    #[test]
    fn test_resolve_success() {
        let mut submitter = AsyncSubmitter::new();
        submitter.begin().unwrap();
        let result = submitter.resolve(Ok(7u32), |e| e.to_string());
        assert_eq!(result, Ok(7));
        assert_eq!(submitter.status(), &SubmissionStatus::Succeeded(7));
    }

    #[test]
    fn test_resolve_failure_uses_description() {
        let mut submitter: AsyncSubmitter<()> = AsyncSubmitter::new();
        submitter.begin().unwrap();
        let result = submitter.resolve(
            Err(DispatchError::Rejected("network error".to_string())),
            |_| "generic".to_string(),
        );
        assert_eq!(result, Err("generic".to_string()));
        assert_eq!(submitter.status().error(), Some("generic"));
    }

    #[test]
    fn test_terminal_states_pass_through_loading_again() {
        let mut submitter = AsyncSubmitter::new();
        submitter.begin().unwrap();
        submitter.resolve(Ok(()), |e| e.to_string()).unwrap();
        assert!(submitter.status().is_terminal());

        submitter.begin().unwrap();
        assert!(submitter.is_loading());
        assert_eq!(submitter.dispatched(), 2);
    }

    #[test]
    fn test_reset_only_from_terminal() {
        let mut submitter: AsyncSubmitter<()> = AsyncSubmitter::new();
        assert!(!submitter.reset());

        submitter.begin().unwrap();
        assert!(!submitter.reset());
        assert!(submitter.is_loading());

        let _ = submitter.resolve(
            Err(DispatchError::Rejected("boom".to_string())),
            |e| e.to_string(),
        );
        assert!(submitter.reset());
        assert!(submitter.status().is_idle());
    }
}
