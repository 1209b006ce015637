//! Prelude module - commonly used types for convenient import.
//!
//! Use `use reflow_core::prelude::*;` to import all essential types.

// Contexts
pub use crate::{CaseExecutionContext, EventContext, ExecutionContext, TaskContext};

// Listeners
pub use crate::{CaseExecutionListener, ExecutionListener, TaskListener};

// Registration metadata
pub use crate::Selector;
