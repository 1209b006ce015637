//! Test fixtures for common callback shapes.

use crate::mocks::{MockCaseExecution, MockExecution, MockTask};

/// A user task `create` callback in a versioned process definition.
#[must_use]
pub fn test_task() -> MockTask {
    MockTask::new()
        .with_process_definition_id("process_a:3:17")
        .with_task_definition_key("task_a")
        .with_event_name("create")
        .with_element_type_name("userTask")
}

/// A service task `start` callback.
#[must_use]
pub fn test_execution() -> MockExecution {
    MockExecution::new()
        .with_process_definition_id("process_a:3:17")
        .with_current_activity_id("service_a")
        .with_event_name("start")
        .with_element_type_name("serviceTask")
}

/// A sequence flow `take` callback; the element slot of its routing key is
/// the transition id, not an activity id.
#[must_use]
pub fn test_sequence_flow() -> MockExecution {
    MockExecution::new()
        .with_process_definition_id("process_a:3:17")
        .with_current_activity_id("service_a")
        .with_current_transition_id("flow_1")
        .with_event_name("take")
        .with_element_type_name("sequenceFlow")
}

/// A human task `create` callback in a versioned case definition.
#[must_use]
pub fn test_case_execution() -> MockCaseExecution {
    MockCaseExecution::new()
        .with_case_definition_id("case_a:3:17")
        .with_activity_id("human_task_a")
        .with_event_name("create")
        .with_element_type_name("humanTask")
}
