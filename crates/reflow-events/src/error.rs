//! Error types and the dispatch error handler.

use thiserror::Error;
use tracing::error;

use reflow_core::EventContext;

use crate::topic::TopicKey;

/// Errors raised at registration time.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A `register_*_declared` call found no declared selector on the
    /// listener type.
    #[error("no selector declared by listener type {type_name}")]
    MissingSelector {
        /// The listener type that declared no selector.
        type_name: String,
    },
}

/// Result type for registration entry points.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Failures surfaced to the dispatch error handler.
///
/// A failing listener never stops the remaining matches of the same dispatch
/// and never fails the host lifecycle operation that fired the event; these
/// errors are the out-of-band channel for monitoring observer failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A matched listener returned an error.
    #[error("listener {listener} failed on topic {topic}: {error}")]
    ListenerFailed {
        /// Registration label of the failing listener.
        listener: String,
        /// Routing key being dispatched.
        topic: TopicKey,
        /// The error the listener returned.
        error: anyhow::Error,
    },

    /// A matched listener panicked.
    #[error("listener {listener} panicked on topic {topic}: {message}")]
    ListenerPanicked {
        /// Registration label of the panicking listener.
        listener: String,
        /// Routing key being dispatched.
        topic: TopicKey,
        /// Message recovered from the panic payload.
        message: String,
    },

    /// An envelope reached an adapter registered for a different shape.
    #[error("listener {listener} expected a {expected} event on topic {topic}, got {actual}")]
    ContextMismatch {
        /// Registration label of the mismatched listener.
        listener: String,
        /// Routing key being dispatched.
        topic: TopicKey,
        /// Context shape the listener was registered for.
        expected: EventContext,
        /// Context shape of the dispatched envelope.
        actual: EventContext,
    },
}

/// Sink for listener failures during dispatch.
///
/// One handler is installed per bus; it runs on the dispatching (engine)
/// thread after the failing listener returns and before the next matched
/// listener is invoked.
pub trait DispatchErrorHandler: Send + Sync {
    /// Report a failure.
    fn handle(&self, error: &DispatchError);
}

/// Default handler: reports failures at error level via `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingErrorHandler;

impl DispatchErrorHandler for LoggingErrorHandler {
    fn handle(&self, error: &DispatchError) {
        error!(error = %error, "listener failure during dispatch");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::TopicBuilder;

    #[test]
    fn test_registration_error_display() {
        let err = RegistrationError::MissingSelector {
            type_name: "AuditListener".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no selector declared by listener type AuditListener"
        );
    }

    #[test]
    fn test_dispatch_error_display() {
        let topic = TopicBuilder::new().key();
        let err = DispatchError::ContextMismatch {
            listener: "AuditListener".to_string(),
            topic,
            expected: EventContext::Task,
            actual: EventContext::Bpmn,
        };
        assert_eq!(
            err.to_string(),
            "listener AuditListener expected a task event on topic \
             /reflow/{context}/{type}/{process}/{element}/{event}, got bpmn"
        );
    }
}
