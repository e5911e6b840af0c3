pub mod engine;
pub mod messages;
pub mod session;
pub mod state;
pub mod validation;

use thiserror::Error;

pub use engine::{DialogEngine, Turn};
pub use session::{ChatEntry, Session};
pub use state::{Action, DialogState, Transition};
pub use validation::ValidationMode;

#[derive(Error, Debug)]
pub enum DialogError {
    #[error("Unknown dialog state: {0}")]
    UnknownState(String),
}
