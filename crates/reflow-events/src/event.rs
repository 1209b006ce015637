//! The normalized event envelope.
//!
//! `notify_*` wraps each fired host callback in a [`LifecycleEvent`] so the
//! rest of the dispatch path can treat the three callback shapes uniformly.
//! The envelope borrows the host context: it lives exactly as long as the
//! dispatch it was created for.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use reflow_core::{CaseExecutionContext, EventContext, ExecutionContext, TaskContext};

/// Metadata stamped on every envelope at wrap time.
#[derive(Debug, Clone)]
pub struct EventMetadata {
    event_id: Uuid,
    occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Create metadata for an event occurring now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }

    /// Unique id of this envelope.
    #[must_use]
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// Wall-clock time the callback was wrapped.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed payload of a lifecycle event - one of the three context shapes.
#[derive(Debug, Clone, Copy)]
pub enum LifecyclePayload<'a> {
    /// A task callback.
    Task(&'a dyn TaskContext),
    /// A BPMN execution callback.
    Execution(&'a dyn ExecutionContext),
    /// A CMMN case-execution callback.
    CaseExecution(&'a dyn CaseExecutionContext),
}

impl LifecyclePayload<'_> {
    /// The context shape of this payload.
    #[must_use]
    pub fn context(&self) -> EventContext {
        match self {
            Self::Task(_) => EventContext::Task,
            Self::Execution(_) => EventContext::Bpmn,
            Self::CaseExecution(_) => EventContext::Cmmn,
        }
    }
}

/// Normalized, read-only envelope around a fired host callback.
///
/// Created once per fired callback and dropped when dispatch returns; the
/// borrowed payload makes retaining it past the firing callback impossible.
#[derive(Debug, Clone)]
pub struct LifecycleEvent<'a> {
    metadata: EventMetadata,
    payload: LifecyclePayload<'a>,
}

impl<'a> LifecycleEvent<'a> {
    /// Wrap a fired task callback.
    #[must_use]
    pub fn task(task: &'a dyn TaskContext) -> Self {
        Self {
            metadata: EventMetadata::new(),
            payload: LifecyclePayload::Task(task),
        }
    }

    /// Wrap a fired BPMN execution callback.
    #[must_use]
    pub fn execution(execution: &'a dyn ExecutionContext) -> Self {
        Self {
            metadata: EventMetadata::new(),
            payload: LifecyclePayload::Execution(execution),
        }
    }

    /// Wrap a fired CMMN case-execution callback.
    #[must_use]
    pub fn case_execution(case_execution: &'a dyn CaseExecutionContext) -> Self {
        Self {
            metadata: EventMetadata::new(),
            payload: LifecyclePayload::CaseExecution(case_execution),
        }
    }

    /// The context shape of the wrapped callback.
    #[must_use]
    pub fn context(&self) -> EventContext {
        self.payload.context()
    }

    /// The wrapped callback, typed as whichever shape it actually is.
    ///
    /// Consumers needing a specific shape should check [`context`](Self::context)
    /// first or use the `as_*` accessors.
    #[must_use]
    pub fn payload(&self) -> LifecyclePayload<'a> {
        self.payload
    }

    /// Envelope metadata.
    #[must_use]
    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    /// The wrapped task context, if this is a task event.
    #[must_use]
    pub fn as_task(&self) -> Option<&'a dyn TaskContext> {
        match self.payload {
            LifecyclePayload::Task(task) => Some(task),
            _ => None,
        }
    }

    /// The wrapped execution context, if this is a BPMN execution event.
    #[must_use]
    pub fn as_execution(&self) -> Option<&'a dyn ExecutionContext> {
        match self.payload {
            LifecyclePayload::Execution(execution) => Some(execution),
            _ => None,
        }
    }

    /// The wrapped case-execution context, if this is a CMMN event.
    #[must_use]
    pub fn as_case_execution(&self) -> Option<&'a dyn CaseExecutionContext> {
        match self.payload {
            LifecyclePayload::CaseExecution(case_execution) => Some(case_execution),
            _ => None,
        }
    }
}

/// Generic envelope consumer, registered directly with no shape adaptation.
///
/// Receives every event its registration pattern matches, regardless of
/// context shape.
pub trait EventConsumer: Send + Sync {
    /// Consume a dispatched envelope.
    ///
    /// # Errors
    ///
    /// Any error is reported to the bus's dispatch error handler; it does not
    /// stop other listeners and never reaches the firing lifecycle operation.
    fn accept(&self, event: &LifecycleEvent<'_>) -> anyhow::Result<()>;
}

impl<T: EventConsumer + ?Sized> EventConsumer for Arc<T> {
    fn accept(&self, event: &LifecycleEvent<'_>) -> anyhow::Result<()> {
        (**self).accept(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_test::{MockExecution, MockTask};

    #[test]
    fn test_envelope_context_kind() {
        let task = MockTask::new();
        let execution = MockExecution::new();

        assert_eq!(LifecycleEvent::task(&task).context(), EventContext::Task);
        assert_eq!(
            LifecycleEvent::execution(&execution).context(),
            EventContext::Bpmn
        );
    }

    #[test]
    fn test_envelope_shape_accessors() {
        let task = MockTask::new().with_task_definition_key("task_a");
        let event = LifecycleEvent::task(&task);

        let payload = event.as_task().unwrap();
        assert_eq!(payload.task_definition_key(), "task_a");
        assert!(event.as_execution().is_none());
        assert!(event.as_case_execution().is_none());
    }

    #[test]
    fn test_envelope_metadata_is_stamped() {
        let task = MockTask::new();
        let first = LifecycleEvent::task(&task);
        let second = LifecycleEvent::task(&task);

        assert_ne!(first.metadata().event_id(), second.metadata().event_id());
    }
}
