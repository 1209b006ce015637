//! Declarative registration metadata.

use serde::{Deserialize, Serialize};

use crate::context::EventContext;

/// Declarative description of a registration pattern.
///
/// Attached to a listener type via [`TaskListener::selector`](crate::TaskListener::selector)
/// (and the execution/case equivalents), or declared in configuration. Every
/// field is independently optional; an absent or empty field leaves the
/// matching placeholder as a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// Context shape to match. Overridden by the shape-specific
    /// `register_*_declared` entry points, so listeners rarely set it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<EventContext>,

    /// Model element type name to match (e.g. `userTask`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,

    /// Process (or case) definition key to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,

    /// Element id to match (task definition key, activity id or
    /// transition id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,

    /// Lifecycle event name to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

impl Selector {
    /// Create a selector with every field unset (matches everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context shape to match.
    #[must_use]
    pub fn with_context(mut self, context: EventContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the model element type name to match.
    #[must_use]
    pub fn with_element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    /// Set the process (or case) definition key to match.
    #[must_use]
    pub fn with_process(mut self, process: impl Into<String>) -> Self {
        self.process = Some(process.into());
        self
    }

    /// Set the element id to match.
    #[must_use]
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Set the lifecycle event name to match.
    #[must_use]
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }
}
