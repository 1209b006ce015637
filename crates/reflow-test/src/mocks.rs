//! Mock context implementations for testing.
//!
//! Plain value types implementing the three host context traits, with
//! builder-style `with_*` methods so tests only spell out the fields they
//! care about.

use reflow_core::{CaseExecutionContext, ExecutionContext, TaskContext};

/// Mock implementation of [`TaskContext`].
#[derive(Debug, Clone)]
pub struct MockTask {
    process_definition_id: String,
    task_definition_key: String,
    event_name: String,
    element_type_name: String,
}

impl MockTask {
    /// Create a mock task callback with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            process_definition_id: "process_a:1:1".to_string(),
            task_definition_key: "task_a".to_string(),
            event_name: "create".to_string(),
            element_type_name: "userTask".to_string(),
        }
    }

    /// Set the versioned process definition id.
    #[must_use]
    pub fn with_process_definition_id(mut self, id: impl Into<String>) -> Self {
        self.process_definition_id = id.into();
        self
    }

    /// Set the task definition key.
    #[must_use]
    pub fn with_task_definition_key(mut self, key: impl Into<String>) -> Self {
        self.task_definition_key = key.into();
        self
    }

    /// Set the lifecycle event name.
    #[must_use]
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = name.into();
        self
    }

    /// Set the model element type name.
    #[must_use]
    pub fn with_element_type_name(mut self, name: impl Into<String>) -> Self {
        self.element_type_name = name.into();
        self
    }
}

impl Default for MockTask {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskContext for MockTask {
    fn process_definition_id(&self) -> &str {
        &self.process_definition_id
    }

    fn task_definition_key(&self) -> &str {
        &self.task_definition_key
    }

    fn event_name(&self) -> &str {
        &self.event_name
    }

    fn element_type_name(&self) -> &str {
        &self.element_type_name
    }
}

/// Mock implementation of [`ExecutionContext`].
#[derive(Debug, Clone)]
pub struct MockExecution {
    process_definition_id: String,
    current_activity_id: Option<String>,
    current_transition_id: Option<String>,
    event_name: String,
    element_type_name: String,
}

impl MockExecution {
    /// Create a mock execution callback with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            process_definition_id: "process_a:1:1".to_string(),
            current_activity_id: Some("activity_a".to_string()),
            current_transition_id: None,
            event_name: "start".to_string(),
            element_type_name: "serviceTask".to_string(),
        }
    }

    /// Set the versioned process definition id.
    #[must_use]
    pub fn with_process_definition_id(mut self, id: impl Into<String>) -> Self {
        self.process_definition_id = id.into();
        self
    }

    /// Set the current activity id.
    #[must_use]
    pub fn with_current_activity_id(mut self, id: impl Into<String>) -> Self {
        self.current_activity_id = Some(id.into());
        self
    }

    /// Unset the current activity id.
    #[must_use]
    pub fn without_current_activity_id(mut self) -> Self {
        self.current_activity_id = None;
        self
    }

    /// Set the current transition id.
    #[must_use]
    pub fn with_current_transition_id(mut self, id: impl Into<String>) -> Self {
        self.current_transition_id = Some(id.into());
        self
    }

    /// Unset the current transition id.
    #[must_use]
    pub fn without_current_transition_id(mut self) -> Self {
        self.current_transition_id = None;
        self
    }

    /// Set the lifecycle event name.
    #[must_use]
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = name.into();
        self
    }

    /// Set the model element type name.
    #[must_use]
    pub fn with_element_type_name(mut self, name: impl Into<String>) -> Self {
        self.element_type_name = name.into();
        self
    }
}

impl Default for MockExecution {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext for MockExecution {
    fn process_definition_id(&self) -> &str {
        &self.process_definition_id
    }

    fn current_activity_id(&self) -> Option<&str> {
        self.current_activity_id.as_deref()
    }

    fn current_transition_id(&self) -> Option<&str> {
        self.current_transition_id.as_deref()
    }

    fn event_name(&self) -> &str {
        &self.event_name
    }

    fn element_type_name(&self) -> &str {
        &self.element_type_name
    }
}

/// Mock implementation of [`CaseExecutionContext`].
#[derive(Debug, Clone)]
pub struct MockCaseExecution {
    case_definition_id: String,
    activity_id: Option<String>,
    event_name: String,
    element_type_name: String,
}

impl MockCaseExecution {
    /// Create a mock case-execution callback with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            case_definition_id: "case_a:1:1".to_string(),
            activity_id: Some("human_task_a".to_string()),
            event_name: "create".to_string(),
            element_type_name: "humanTask".to_string(),
        }
    }

    /// Set the versioned case definition id.
    #[must_use]
    pub fn with_case_definition_id(mut self, id: impl Into<String>) -> Self {
        self.case_definition_id = id.into();
        self
    }

    /// Set the case activity id.
    #[must_use]
    pub fn with_activity_id(mut self, id: impl Into<String>) -> Self {
        self.activity_id = Some(id.into());
        self
    }

    /// Unset the case activity id.
    #[must_use]
    pub fn without_activity_id(mut self) -> Self {
        self.activity_id = None;
        self
    }

    /// Set the lifecycle event name.
    #[must_use]
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = name.into();
        self
    }

    /// Set the model element type name.
    #[must_use]
    pub fn with_element_type_name(mut self, name: impl Into<String>) -> Self {
        self.element_type_name = name.into();
        self
    }
}

impl Default for MockCaseExecution {
    fn default() -> Self {
        Self::new()
    }
}

impl CaseExecutionContext for MockCaseExecution {
    fn case_definition_id(&self) -> &str {
        &self.case_definition_id
    }

    fn activity_id(&self) -> Option<&str> {
        self.activity_id.as_deref()
    }

    fn event_name(&self) -> &str {
        &self.event_name
    }

    fn element_type_name(&self) -> &str {
        &self.element_type_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_task_builder() {
        let task = MockTask::new()
            .with_process_definition_id("invoice:2:5")
            .with_event_name("complete");

        assert_eq!(task.process_definition_id(), "invoice:2:5");
        assert_eq!(task.event_name(), "complete");
        assert_eq!(task.task_definition_key(), "task_a");
    }

    #[test]
    fn test_mock_execution_optional_ids() {
        let execution = MockExecution::new()
            .without_current_activity_id()
            .with_current_transition_id("flow_1");

        assert!(execution.current_activity_id().is_none());
        assert_eq!(execution.current_transition_id(), Some("flow_1"));
    }
}
