//! Tool management framework for the advisor
//!
//! Defines the [`Tool`] trait implemented by each data function the model
//! may call, and the [`ToolRegistry`] the dispatcher resolves names against.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::Tool;
