//! Reflow Events - Topic-based event routing for workflow engine lifecycles.
//!
//! This crate provides:
//! - A topic key builder deriving routing keys from fired engine callbacks
//! - A read-only envelope normalizing the three callback shapes
//! - A synchronous, in-process event bus with pattern-based registration
//! - Adapter listeners funneling the engine's listener slots onto the bus
//!
//! # Architecture
//!
//! The engine fires a lifecycle callback → the bus computes the routing key
//! from the callback's attributes, wraps the callback in an envelope, and
//! invokes every listener whose registered pattern matches the key, in
//! registration order, on the firing thread. Delivery is best-effort, single
//! attempt: listener failures are reported to the bus's error handler and
//! never propagate back into the engine.
//!
//! # Example
//!
//! ```rust
//! use reflow_events::prelude::*;
//!
//! struct Audit;
//!
//! impl EventConsumer for Audit {
//!     fn accept(&self, event: &LifecycleEvent<'_>) -> anyhow::Result<()> {
//!         println!("observed {} event", event.context());
//!         Ok(())
//!     }
//! }
//!
//! let bus = EventBus::new();
//!
//! // Route every task creation in process `invoice` to the auditor.
//! let pattern = TopicBuilder::new()
//!     .context(EventContext::Task)
//!     .process("invoice")
//!     .event("create")
//!     .pattern();
//! bus.register_consumer(pattern, Audit);
//!
//! // Install bus.task_listener() (and the execution/case equivalents) into
//! // the engine's listener slots; every fired callback lands on the bus.
//! let _task_slot = bus.task_listener();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod bus;
mod error;
mod event;
mod topic;

pub use bus::{EventBus, EventBusBuilder, RegistrationId};
pub use error::{
    DispatchError, DispatchErrorHandler, LoggingErrorHandler, RegistrationError, RegistrationResult,
};
pub use event::{EventConsumer, EventMetadata, LifecycleEvent, LifecyclePayload};
pub use topic::{TOPIC_TEMPLATE, TopicBuilder, TopicKey, TopicPattern, definition_key};
