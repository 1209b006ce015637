//! Host execution contexts observed by the bus.
//!
//! The workflow engine fires lifecycle callbacks carrying one of three
//! structurally different context shapes. The traits here form the read-only
//! boundary between the engine and the bus: the engine implements them on its
//! delegate objects, the bus only ever reads from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The context shape an event originates from.
///
/// Determines which placeholder-derivation rules apply when a routing key is
/// computed and which listener adapter is used during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventContext {
    /// A task lifecycle notification.
    Task,
    /// A BPMN flow-node or sequence-flow execution notification.
    Bpmn,
    /// A CMMN case-execution notification.
    Cmmn,
}

impl EventContext {
    /// Segment value substituted for the `{context}` placeholder.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Bpmn => "bpmn",
            Self::Cmmn => "cmmn",
        }
    }
}

impl fmt::Display for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a fired task lifecycle callback.
///
/// Valid host callbacks always carry a defining model element; a context
/// without one is a contract violation on the engine side and is not handled
/// defensively here.
pub trait TaskContext: fmt::Debug + Send + Sync {
    /// Versioned process definition id, format `key:version:deployment`.
    fn process_definition_id(&self) -> &str;

    /// Definition key of the task the event fired on.
    fn task_definition_key(&self) -> &str;

    /// Lifecycle event name (`create`, `assignment`, `complete`, ...).
    fn event_name(&self) -> &str;

    /// Type name of the model element defining the task (e.g. `userTask`).
    fn element_type_name(&self) -> &str;
}

/// Read-only view of a fired BPMN execution lifecycle callback.
pub trait ExecutionContext: fmt::Debug + Send + Sync {
    /// Versioned process definition id, format `key:version:deployment`.
    fn process_definition_id(&self) -> &str;

    /// Id of the activity the execution is currently at, if any.
    fn current_activity_id(&self) -> Option<&str>;

    /// Id of the transition currently being taken, if any.
    fn current_transition_id(&self) -> Option<&str>;

    /// Lifecycle event name (`start`, `end`, `take`, ...).
    fn event_name(&self) -> &str;

    /// Type name of the current model element (e.g. `serviceTask`,
    /// `sequenceFlow`).
    fn element_type_name(&self) -> &str;
}

/// Read-only view of a fired CMMN case-execution lifecycle callback.
pub trait CaseExecutionContext: fmt::Debug + Send + Sync {
    /// Versioned case definition id, format `key:version:deployment`.
    fn case_definition_id(&self) -> &str;

    /// Id of the case activity the event fired on, if any.
    fn activity_id(&self) -> Option<&str>;

    /// Lifecycle event name (`create`, `enable`, `complete`, ...).
    fn event_name(&self) -> &str;

    /// Type name of the current model element (e.g. `humanTask`).
    fn element_type_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_context_display() {
        assert_eq!(EventContext::Task.to_string(), "task");
        assert_eq!(EventContext::Bpmn.to_string(), "bpmn");
        assert_eq!(EventContext::Cmmn.to_string(), "cmmn");
    }

    #[test]
    fn test_event_context_serde() {
        let json = serde_json::to_string(&EventContext::Bpmn).unwrap();
        assert_eq!(json, "\"bpmn\"");

        let parsed: EventContext = serde_json::from_str("\"cmmn\"").unwrap();
        assert_eq!(parsed, EventContext::Cmmn);
    }
}
