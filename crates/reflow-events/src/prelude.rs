//! Prelude module - commonly used types for convenient import.
//!
//! Use `use reflow_events::prelude::*;` to import all essential types,
//! including the contracts re-exported from `reflow-core`.

// Bus
pub use crate::{EventBus, EventBusBuilder, RegistrationId};

// Errors
pub use crate::{
    DispatchError, DispatchErrorHandler, LoggingErrorHandler, RegistrationError, RegistrationResult,
};

// Envelope
pub use crate::{EventConsumer, EventMetadata, LifecycleEvent, LifecyclePayload};

// Topics
pub use crate::{TOPIC_TEMPLATE, TopicBuilder, TopicKey, TopicPattern, definition_key};

// Contracts
pub use reflow_core::{
    CaseExecutionContext, CaseExecutionListener, EventContext, ExecutionContext, ExecutionListener,
    Selector, TaskContext, TaskListener,
};
