//! Navigation hand-off from flows to the application shell

use crate::app::UiEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Performs a redirect to an application path
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Navigator that forwards redirects to the UI loop
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: UnboundedSender<UiEvent>,
}

impl ChannelNavigator {
    pub fn new(tx: UnboundedSender<UiEvent>) -> Self {
        Self { tx }
    }
}

impl Navigator for ChannelNavigator {
    fn redirect(&self, path: &str) {
        if self.tx.send(UiEvent::Navigate(path.to_string())).is_err() {
            tracing::debug!("UI loop closed, dropping redirect to {}", path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_redirect_sends_navigate_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let navigator = ChannelNavigator::new(tx);
        navigator.redirect("/login");
        match rx.try_recv() {
            Ok(UiEvent::Navigate(path)) => assert_eq!(path, "/login"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_redirect_after_receiver_dropped_is_silent() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        ChannelNavigator::new(tx).redirect("/login");
    }
}
