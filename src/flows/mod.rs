//! Form flows built on the shared submit pattern
//!
//! - `project_creation`: project creation with the empty/template choice
//! - `password_reset`: password change from a reset link
//! - `navigator`: redirect hand-off to the application shell

mod navigator;
mod password_reset;
mod project_creation;

pub use navigator::{ChannelNavigator, Navigator};
pub use password_reset::{PasswordResetFlow, ResetToken};
pub use project_creation::{
    ActiveMenu, CreateOutcome, OnComplete, ProjectCreationFlow, TemplateList,
};

#[cfg(test)]
pub use navigator::MockNavigator;
#[cfg(test)]
pub use password_reset::REQUEST_FAILED_MESSAGE;
