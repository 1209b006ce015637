//! Reflow Test - Shared test utilities for the reflow event bus.
//!
//! This crate provides mock context implementations and test helpers used
//! across the reflow crates as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! reflow-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust
//! use reflow_test::{MockTask, test_task};
//! use reflow_core::TaskContext;
//!
//! let task = MockTask::new().with_task_definition_key("approve_invoice");
//! assert_eq!(task.task_definition_key(), "approve_invoice");
//!
//! assert_eq!(test_task().process_definition_id(), "process_a:3:17");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
