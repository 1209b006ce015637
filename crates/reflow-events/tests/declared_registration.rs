//! Registration driven by declarative selectors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reflow_events::prelude::*;
use reflow_test::{
    init_tracing, test_case_execution, test_execution, test_sequence_flow, test_task,
};

struct TaskCreateListener {
    count: Arc<AtomicUsize>,
}

impl TaskListener for TaskCreateListener {
    fn on_task(&self, _task: &dyn TaskContext) -> anyhow::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn selector(&self) -> Option<Selector> {
        Some(
            Selector::new()
                .with_process("process_a")
                .with_event("create")
                // Ignored for task listeners; see register_task_declared.
                .with_element_type("callActivity"),
        )
    }
}

struct UndeclaredTaskListener;

impl TaskListener for UndeclaredTaskListener {
    fn on_task(&self, _task: &dyn TaskContext) -> anyhow::Result<()> {
        Ok(())
    }
}

struct SequenceFlowListener {
    count: Arc<AtomicUsize>,
}

impl ExecutionListener for SequenceFlowListener {
    fn on_execution(&self, _execution: &dyn ExecutionContext) -> anyhow::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn selector(&self) -> Option<Selector> {
        Some(Selector::new().with_element_type("sequenceFlow"))
    }
}

struct CaseTaskListener {
    count: Arc<AtomicUsize>,
}

impl CaseExecutionListener for CaseTaskListener {
    fn on_case_execution(&self, _case_execution: &dyn CaseExecutionContext) -> anyhow::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn selector(&self) -> Option<Selector> {
        Some(Selector::new().with_process("case_a").with_event("create"))
    }
}

/// Consumer registered on the empty pattern, the catch-all for monitoring.
struct CatchAllConsumer {
    count: Arc<AtomicUsize>,
}

impl EventConsumer for CatchAllConsumer {
    fn accept(&self, _event: &LifecycleEvent<'_>) -> anyhow::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_task_listener_registered_from_declared_selector() {
    init_tracing();
    let bus = EventBus::new();
    let count = Arc::new(AtomicUsize::new(0));

    bus.register_task_declared(TaskCreateListener {
        count: Arc::clone(&count),
    })
    .unwrap();

    // The declared element type differs from the event's `userTask`; task
    // registrations leave the {type} slot a wildcard, so this still matches.
    bus.notify_task(&test_task());
    bus.notify_task(&test_task().with_event_name("complete"));

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_missing_selector_fails_at_registration_time() {
    init_tracing();
    let bus = EventBus::new();

    let result = bus.register_task_declared(UndeclaredTaskListener);

    assert!(matches!(
        result,
        Err(RegistrationError::MissingSelector { ref type_name })
            if type_name == "UndeclaredTaskListener"
    ));
    // Failed registration leaves no entry behind.
    assert_eq!(bus.registration_count(), 0);
}

#[test]
fn test_execution_listener_keeps_declared_element_type() {
    init_tracing();
    let bus = EventBus::new();
    let count = Arc::new(AtomicUsize::new(0));

    bus.register_execution_declared(SequenceFlowListener {
        count: Arc::clone(&count),
    })
    .unwrap();

    bus.notify_execution(&test_sequence_flow());
    // A serviceTask event must not reach a sequenceFlow-typed registration.
    bus.notify_execution(&test_execution());

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_case_listener_registered_from_declared_selector() {
    init_tracing();
    let bus = EventBus::new();
    let count = Arc::new(AtomicUsize::new(0));

    bus.register_case_execution_declared(CaseTaskListener {
        count: Arc::clone(&count),
    })
    .unwrap();

    bus.notify_case_execution(&test_case_execution());
    bus.notify_task(&test_task());

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_catch_all_consumer_sees_every_shape() {
    init_tracing();
    let bus = EventBus::new();
    let count = Arc::new(AtomicUsize::new(0));

    bus.register_consumer(
        TopicBuilder::new().pattern(),
        CatchAllConsumer {
            count: Arc::clone(&count),
        },
    );

    bus.notify_task(&test_task());
    bus.notify_execution(&test_execution());
    bus.notify_case_execution(&test_case_execution());

    assert_eq!(count.load(Ordering::SeqCst), 3);
}
