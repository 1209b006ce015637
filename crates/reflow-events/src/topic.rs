//! Topic keys, patterns, and the builder that derives them.
//!
//! Every routing key and every registration pattern is a substitution of the
//! one [`TOPIC_TEMPLATE`]. A fired event resolves all five placeholders from
//! its context; a registration may leave placeholders unresolved, and each
//! unresolved `{name}` token acts as a wildcard for that whole segment.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use reflow_core::{CaseExecutionContext, EventContext, ExecutionContext, Selector, TaskContext};

/// The template every routing key and registration pattern substitutes.
pub const TOPIC_TEMPLATE: &str = "/reflow/{context}/{type}/{process}/{element}/{event}";

static DEFINITION_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+):\d+:\d+").expect("definition id pattern is valid")
});

/// Strip the `:version:deployment` suffix from a versioned definition id.
///
/// `process_a:3:17` becomes `process_a`. Ids that do not carry the versioned
/// shape pass through unchanged; the engine owns the id format and a key
/// built from an unrecognized id is still routable.
#[must_use]
pub fn definition_key(definition_id: &str) -> String {
    DEFINITION_ID.replace_all(definition_id, "$1").into_owned()
}

/// A fully-substituted routing key computed from a fired event's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicKey(String);

impl TopicKey {
    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A template substitution used at registration time.
///
/// Segments still in literal `{name}` token form match any value in the
/// corresponding key segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicPattern(String);

impl TopicPattern {
    /// The pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this pattern matches the given routing key.
    ///
    /// Segment-wise comparison: every pattern segment must either equal the
    /// corresponding key segment or still be a literal placeholder token. A
    /// wildcard spans exactly one whole segment, never part of one. A key
    /// that itself carries an unresolved token (the host supplied no value)
    /// only matches patterns with a wildcard at that slot.
    #[must_use]
    pub fn matches(&self, key: &TopicKey) -> bool {
        let pattern: Vec<&str> = self.0.split('/').collect();
        let key: Vec<&str> = key.0.split('/').collect();
        pattern.len() == key.len()
            && pattern
                .iter()
                .zip(key.iter())
                .all(|(pattern, key)| pattern == key || is_wildcard(pattern))
    }
}

impl fmt::Display for TopicPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_wildcard(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Fluent accumulation of the five topic placeholders.
///
/// Each setter returns the builder with that placeholder set; all prior
/// calls stay reflected. An empty value is treated identically to an unset
/// one, so a key can never carry a dangling empty segment. Unset
/// placeholders stay as their literal tokens in the built key or pattern.
#[derive(Debug, Clone, Default)]
pub struct TopicBuilder {
    context: Option<EventContext>,
    element_type: Option<String>,
    process: Option<String>,
    element: Option<String>,
    event: Option<String>,
}

impl TopicBuilder {
    /// Create a builder with all placeholders unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the builder for a fired task callback.
    #[must_use]
    pub fn from_task(task: &dyn TaskContext) -> Self {
        Self::new()
            .context(EventContext::Task)
            .element_type(task.element_type_name())
            .process(definition_key(task.process_definition_id()))
            .element(task.task_definition_key())
            .event(task.event_name())
    }

    /// Derive the builder for a fired BPMN execution callback.
    ///
    /// A `sequenceFlow` element has no current activity; its element slot
    /// carries the transition being taken instead.
    #[must_use]
    pub fn from_execution(execution: &dyn ExecutionContext) -> Self {
        let type_name = execution.element_type_name();
        let element = if type_name == "sequenceFlow" {
            execution.current_transition_id()
        } else {
            execution.current_activity_id()
        };
        let builder = Self::new()
            .context(EventContext::Bpmn)
            .element_type(type_name)
            .process(definition_key(execution.process_definition_id()))
            .event(execution.event_name());
        match element {
            Some(element) => builder.element(element),
            None => builder,
        }
    }

    /// Derive the builder for a fired CMMN case-execution callback.
    ///
    /// The case definition key occupies the `{process}` slot; keys and
    /// patterns share the one template.
    #[must_use]
    pub fn from_case(case_execution: &dyn CaseExecutionContext) -> Self {
        let builder = Self::new()
            .context(EventContext::Cmmn)
            .element_type(case_execution.element_type_name())
            .process(definition_key(case_execution.case_definition_id()))
            .event(case_execution.event_name());
        match case_execution.activity_id() {
            Some(element) => builder.element(element),
            None => builder,
        }
    }

    /// Copy every present field of a declarative selector.
    #[must_use]
    pub fn from_selector(selector: &Selector) -> Self {
        let mut builder = Self::new();
        if let Some(context) = selector.context {
            builder = builder.context(context);
        }
        if let Some(element_type) = &selector.element_type {
            builder = builder.element_type(element_type);
        }
        if let Some(process) = &selector.process {
            builder = builder.process(process);
        }
        if let Some(element) = &selector.element {
            builder = builder.element(element);
        }
        if let Some(event) = &selector.event {
            builder = builder.event(event);
        }
        builder
    }

    /// Set the `{context}` placeholder.
    #[must_use]
    pub fn context(mut self, context: EventContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the `{type}` placeholder. An empty value unsets it.
    #[must_use]
    pub fn element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = non_empty(element_type.into());
        self
    }

    /// Set the `{process}` placeholder. An empty value unsets it.
    #[must_use]
    pub fn process(mut self, process: impl Into<String>) -> Self {
        self.process = non_empty(process.into());
        self
    }

    /// Set the `{element}` placeholder. An empty value unsets it.
    #[must_use]
    pub fn element(mut self, element: impl Into<String>) -> Self {
        self.element = non_empty(element.into());
        self
    }

    /// Set the `{event}` placeholder. An empty value unsets it.
    #[must_use]
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = non_empty(event.into());
        self
    }

    /// Build the routing key for a fired event.
    #[must_use]
    pub fn key(&self) -> TopicKey {
        TopicKey(self.substitute())
    }

    /// Build a matchable registration pattern.
    #[must_use]
    pub fn pattern(&self) -> TopicPattern {
        TopicPattern(self.substitute())
    }

    fn substitute(&self) -> String {
        let mut topic = TOPIC_TEMPLATE.to_string();
        if let Some(context) = self.context {
            topic = topic.replace("{context}", context.as_str());
        }
        let values = [
            ("{type}", self.element_type.as_deref()),
            ("{process}", self.process.as_deref()),
            ("{element}", self.element.as_deref()),
            ("{event}", self.event.as_deref()),
        ];
        for (token, value) in values {
            if let Some(value) = value {
                topic = topic.replace(token, value);
            }
        }
        topic
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_test::{MockCaseExecution, MockExecution, MockTask};

    #[test]
    fn test_definition_key_strips_version_suffix() {
        assert_eq!(definition_key("process_a:3:17"), "process_a");
        assert_eq!(definition_key("case_b:12:4"), "case_b");
    }

    #[test]
    fn test_definition_key_identity_for_other_shapes() {
        assert_eq!(definition_key("process_a"), "process_a");
        assert_eq!(definition_key("process_a:3"), "process_a:3");
        assert_eq!(definition_key(""), "");
    }

    #[test]
    fn test_task_key() {
        let task = MockTask::new()
            .with_process_definition_id("process_a:3:17")
            .with_task_definition_key("task_a")
            .with_event_name("create")
            .with_element_type_name("userTask");

        let key = TopicBuilder::from_task(&task).key();
        assert_eq!(key.as_str(), "/reflow/task/userTask/process_a/task_a/create");

        // Equivalent input yields a stable key.
        assert_eq!(TopicBuilder::from_task(&task).key(), key);
    }

    #[test]
    fn test_execution_key_uses_activity_id() {
        let execution = MockExecution::new()
            .with_process_definition_id("process_a:1:1")
            .with_current_activity_id("service_a")
            .with_current_transition_id("flow_1")
            .with_event_name("start")
            .with_element_type_name("serviceTask");

        let key = TopicBuilder::from_execution(&execution).key();
        assert_eq!(
            key.as_str(),
            "/reflow/bpmn/serviceTask/process_a/service_a/start"
        );
    }

    #[test]
    fn test_sequence_flow_key_uses_transition_id() {
        let execution = MockExecution::new()
            .with_process_definition_id("process_a:1:1")
            .with_current_activity_id("service_a")
            .with_current_transition_id("flow_1")
            .with_event_name("take")
            .with_element_type_name("sequenceFlow");

        let key = TopicBuilder::from_execution(&execution).key();
        assert_eq!(
            key.as_str(),
            "/reflow/bpmn/sequenceFlow/process_a/flow_1/take"
        );
    }

    #[test]
    fn test_case_execution_key() {
        let case_execution = MockCaseExecution::new()
            .with_case_definition_id("case_a:2:9")
            .with_activity_id("human_task_a")
            .with_event_name("create")
            .with_element_type_name("humanTask");

        let key = TopicBuilder::from_case(&case_execution).key();
        assert_eq!(key.as_str(), "/reflow/cmmn/humanTask/case_a/human_task_a/create");
    }

    #[test]
    fn test_unset_placeholders_stay_literal() {
        assert_eq!(TopicBuilder::new().key().as_str(), TOPIC_TEMPLATE);
    }

    #[test]
    fn test_empty_value_treated_as_unset() {
        let key = TopicBuilder::new()
            .context(EventContext::Task)
            .process("")
            .event("create")
            .key();
        assert_eq!(key.as_str(), "/reflow/task/{type}/{process}/{element}/create");
    }

    #[test]
    fn test_pattern_wildcard_matches_any_element() {
        let pattern = TopicBuilder::new()
            .context(EventContext::Task)
            .element_type("userTask")
            .process("process_a")
            .event("create")
            .pattern();

        let key_a = TopicBuilder::new()
            .context(EventContext::Task)
            .element_type("userTask")
            .process("process_a")
            .element("task_a")
            .event("create")
            .key();
        let key_b = TopicBuilder::new()
            .context(EventContext::Task)
            .element_type("userTask")
            .process("process_a")
            .element("task_b")
            .event("create")
            .key();

        assert!(pattern.matches(&key_a));
        assert!(pattern.matches(&key_b));
    }

    #[test]
    fn test_pattern_concrete_segment_must_match() {
        let pattern = TopicBuilder::new()
            .context(EventContext::Task)
            .process("process_a")
            .pattern();

        let other_process = TopicBuilder::new()
            .context(EventContext::Task)
            .element_type("userTask")
            .process("process_b")
            .element("task_a")
            .event("create")
            .key();

        assert!(!pattern.matches(&other_process));
    }

    #[test]
    fn test_literal_token_in_key_needs_wildcard_in_pattern() {
        // The host supplied no element; the token passes through to the key.
        let key = TopicBuilder::new()
            .context(EventContext::Bpmn)
            .element_type("serviceTask")
            .process("process_a")
            .event("start")
            .key();

        let concrete = TopicBuilder::new()
            .context(EventContext::Bpmn)
            .element_type("serviceTask")
            .process("process_a")
            .element("service_a")
            .event("start")
            .pattern();
        let wildcard = TopicBuilder::new()
            .context(EventContext::Bpmn)
            .element_type("serviceTask")
            .process("process_a")
            .event("start")
            .pattern();

        assert!(!concrete.matches(&key));
        assert!(wildcard.matches(&key));
    }

    #[test]
    fn test_empty_pattern_matches_every_key() {
        let pattern = TopicBuilder::new().pattern();
        let key = TopicBuilder::from_task(&MockTask::new()).key();
        assert!(pattern.matches(&key));
    }

    #[test]
    fn test_from_selector_copies_present_fields() {
        let selector = Selector::new()
            .with_context(EventContext::Bpmn)
            .with_process("process_a")
            .with_event("end");

        let pattern = TopicBuilder::from_selector(&selector).pattern();
        assert_eq!(
            pattern.as_str(),
            "/reflow/bpmn/{type}/process_a/{element}/end"
        );
    }
}
