//! Host-shaped listener contracts.
//!
//! These are the three callback shapes the engine natively speaks. Listener
//! implementations written against them can be registered on the bus without
//! modification; the bus adapts them into its uniform envelope dispatch.

use std::sync::Arc;

use crate::context::{CaseExecutionContext, ExecutionContext, TaskContext};
use crate::selector::Selector;

/// Listener invoked with task lifecycle notifications.
///
/// Registered listeners are called synchronously on the engine thread that
/// fired the event, in registration order.
pub trait TaskListener: Send + Sync {
    /// Handle a task notification.
    ///
    /// # Errors
    ///
    /// Any error is reported to the bus's dispatch error handler; it does not
    /// stop other listeners and never reaches the firing lifecycle operation.
    fn on_task(&self, task: &dyn TaskContext) -> anyhow::Result<()>;

    /// Registration pattern declared by this listener type, if any.
    ///
    /// Consulted once, at registration time, by the `register_*_declared`
    /// entry points. Listeners registered with an explicit pattern can leave
    /// this at the default `None`.
    fn selector(&self) -> Option<Selector> {
        None
    }
}

/// Listener invoked with BPMN execution lifecycle notifications.
pub trait ExecutionListener: Send + Sync {
    /// Handle an execution notification.
    ///
    /// # Errors
    ///
    /// Any error is reported to the bus's dispatch error handler; it does not
    /// stop other listeners and never reaches the firing lifecycle operation.
    fn on_execution(&self, execution: &dyn ExecutionContext) -> anyhow::Result<()>;

    /// Registration pattern declared by this listener type, if any.
    fn selector(&self) -> Option<Selector> {
        None
    }
}

/// Listener invoked with CMMN case-execution lifecycle notifications.
pub trait CaseExecutionListener: Send + Sync {
    /// Handle a case-execution notification.
    ///
    /// # Errors
    ///
    /// Any error is reported to the bus's dispatch error handler; it does not
    /// stop other listeners and never reaches the firing lifecycle operation.
    fn on_case_execution(&self, case_execution: &dyn CaseExecutionContext) -> anyhow::Result<()>;

    /// Registration pattern declared by this listener type, if any.
    fn selector(&self) -> Option<Selector> {
        None
    }
}

impl<T: TaskListener + ?Sized> TaskListener for Arc<T> {
    fn on_task(&self, task: &dyn TaskContext) -> anyhow::Result<()> {
        (**self).on_task(task)
    }

    fn selector(&self) -> Option<Selector> {
        (**self).selector()
    }
}

impl<T: ExecutionListener + ?Sized> ExecutionListener for Arc<T> {
    fn on_execution(&self, execution: &dyn ExecutionContext) -> anyhow::Result<()> {
        (**self).on_execution(execution)
    }

    fn selector(&self) -> Option<Selector> {
        (**self).selector()
    }
}

impl<T: CaseExecutionListener + ?Sized> CaseExecutionListener for Arc<T> {
    fn on_case_execution(&self, case_execution: &dyn CaseExecutionContext) -> anyhow::Result<()> {
        (**self).on_case_execution(case_execution)
    }

    fn selector(&self) -> Option<Selector> {
        (**self).selector()
    }
}
