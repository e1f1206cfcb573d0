//! Export engine abstraction layer
//!
//! The engine turns resolved source files into artifacts. The crate only
//! drives it; [`CommandEngine`] delegates the actual rendering to an
//! external program.

pub mod command;
pub mod traits;

pub use command::CommandEngine;
pub use traits::{EngineError, ExportBatchResult, ExportEngine};
