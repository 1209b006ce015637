//! Reflow Core - Context and listener contracts for the reflow event bus.
//!
//! This crate provides:
//! - The three host context traits the engine implements on its delegate
//!   objects (`TaskContext`, `ExecutionContext`, `CaseExecutionContext`)
//! - The three host-shaped listener traits application code implements
//! - The `EventContext` shape enumeration
//! - The declarative `Selector` registration metadata
//!
//! It carries no routing machinery of its own; the bus lives in
//! `reflow-events`. Keeping the contracts in their own crate lets listener
//! implementations and the bus reference them without cycles.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod context;
mod listener;
mod selector;

pub use context::{CaseExecutionContext, EventContext, ExecutionContext, TaskContext};
pub use listener::{CaseExecutionListener, ExecutionListener, TaskListener};
pub use selector::Selector;
