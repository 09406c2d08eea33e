//! Application state module

mod app_state;
mod forms;
mod submission;
mod timer;

pub use app_state::*;
pub use forms::*;
pub use submission::*;
pub use timer::*;
