//! Delayed callbacks owned by a form
//!
//! Every timer lives in a [`TimerScope`]. Dropping the scope (or calling
//! [`TimerScope::cancel_all`]) aborts timers that have not fired yet, so a
//! callback never runs after the form that scheduled it is gone.

use std::time::Duration;
use tokio::task::JoinHandle;

/// Handle to one scheduled callback; aborts the task when dropped
#[derive(Debug)]
struct TimerHandle {
    label: &'static str,
    task: JoinHandle<()>,
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            tracing::debug!("Cancelling pending timer '{}'", self.label);
            self.task.abort();
        }
    }
}

#[derive(Debug, Default)]
pub struct TimerScope {
    timers: Vec<TimerHandle>,
}

impl TimerScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` once after `delay`. Must be called inside a tokio runtime.
    pub fn schedule<F>(&mut self, label: &'static str, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.timers.retain(|t| !t.task.is_finished());

        // The deadline is fixed here, not when the task is first polled.
        let sleep = tokio::time::sleep(delay);
        let task = tokio::spawn(async move {
            sleep.await;
            callback();
        });

        tracing::debug!("Scheduled timer '{}' in {}ms", label, delay.as_millis());
        self.timers.push(TimerHandle { label, task });
    }

    /// Number of timers that have not fired yet
    pub fn pending(&self) -> usize {
        self.timers.iter().filter(|t| !t.task.is_finished()).count()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }
}
