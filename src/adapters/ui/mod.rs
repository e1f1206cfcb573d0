//! User interface abstraction layer

pub mod terminal;
pub mod traits;

pub use terminal::{TerminalPresenter, TerminalProgress};
pub use traits::{NoProgress, Presenter, ProgressHandle};
