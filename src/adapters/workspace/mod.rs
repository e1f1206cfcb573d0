//! Workspace abstraction layer
//!
//! Folder enumeration, ownership lookup and recursive file search,
//! behind the [`Workspace`] trait so the resolver can be tested with fakes.

pub mod fs;
pub mod traits;

pub use fs::FsWorkspace;
pub use traits::Workspace;
