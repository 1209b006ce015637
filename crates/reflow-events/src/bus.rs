//! The event bus: registration table, synchronous dispatch, host adapters.

use std::any::type_name;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;
use uuid::Uuid;

use reflow_core::{
    CaseExecutionContext, CaseExecutionListener, EventContext, ExecutionContext, ExecutionListener,
    TaskContext, TaskListener,
};

use crate::error::{
    DispatchError, DispatchErrorHandler, LoggingErrorHandler, RegistrationError, RegistrationResult,
};
use crate::event::{EventConsumer, LifecycleEvent, LifecyclePayload};
use crate::topic::{TopicBuilder, TopicKey, TopicPattern};

/// Handle to a registration entry, used for teardown via
/// [`EventBus::unregister`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uniform wrapper over the four registrable listener shapes.
#[derive(Clone)]
enum RegisteredListener {
    Task(Arc<dyn TaskListener>),
    Execution(Arc<dyn ExecutionListener>),
    CaseExecution(Arc<dyn CaseExecutionListener>),
    Consumer(Arc<dyn EventConsumer>),
}

/// Why a single delivery failed; decorated into a [`DispatchError`] by the
/// dispatch loop, which knows the topic and registration label.
enum DeliveryFailure {
    Failed(anyhow::Error),
    Mismatch { expected: EventContext },
}

impl RegisteredListener {
    /// Convert the uniform envelope dispatch back into the shape the wrapped
    /// listener expects. Shape listeners require a matching envelope kind;
    /// consumers take the envelope as-is.
    fn deliver(&self, event: &LifecycleEvent<'_>) -> Result<(), DeliveryFailure> {
        match (self, event.payload()) {
            (Self::Task(listener), LifecyclePayload::Task(task)) => {
                listener.on_task(task).map_err(DeliveryFailure::Failed)
            }
            (Self::Execution(listener), LifecyclePayload::Execution(execution)) => listener
                .on_execution(execution)
                .map_err(DeliveryFailure::Failed),
            (Self::CaseExecution(listener), LifecyclePayload::CaseExecution(case_execution)) => {
                listener
                    .on_case_execution(case_execution)
                    .map_err(DeliveryFailure::Failed)
            }
            (Self::Consumer(consumer), _) => consumer.accept(event).map_err(DeliveryFailure::Failed),
            (Self::Task(_), _) => Err(DeliveryFailure::Mismatch {
                expected: EventContext::Task,
            }),
            (Self::Execution(_), _) => Err(DeliveryFailure::Mismatch {
                expected: EventContext::Bpmn,
            }),
            (Self::CaseExecution(_), _) => Err(DeliveryFailure::Mismatch {
                expected: EventContext::Cmmn,
            }),
        }
    }
}

#[derive(Clone)]
struct Registration {
    id: RegistrationId,
    pattern: TopicPattern,
    label: String,
    listener: RegisteredListener,
}

/// Topic-based, in-process event bus for engine lifecycle events.
///
/// The bus owns the registration table and the synchronous dispatch path.
/// `notify_*` computes the routing key for a fired callback, wraps it in an
/// envelope, and invokes every registration whose pattern matches, in
/// registration order, on the calling thread. Listener failures go to the
/// bus's [`DispatchErrorHandler`] and never propagate to the engine.
///
/// Cloning is cheap and clones share the registration table, so the bus can
/// be handed to the engine configuration and to registering application code
/// alike. Construct one per engine and tear it down with the engine.
#[derive(Clone)]
pub struct EventBus {
    registrations: Arc<RwLock<Vec<Registration>>>,
    error_handler: Arc<dyn DispatchErrorHandler>,
}

impl EventBus {
    /// Create a bus with the default logging error handler.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a bus with a custom configuration.
    #[must_use]
    pub fn builder() -> EventBusBuilder {
        EventBusBuilder::new()
    }

    /// Route a fired task callback to every matching listener.
    ///
    /// Synchronous: returns after all matched listeners have run.
    pub fn notify_task(&self, task: &dyn TaskContext) {
        let topic = TopicBuilder::from_task(task).key();
        self.dispatch(&topic, &LifecycleEvent::task(task));
    }

    /// Route a fired BPMN execution callback to every matching listener.
    ///
    /// Synchronous: returns after all matched listeners have run.
    pub fn notify_execution(&self, execution: &dyn ExecutionContext) {
        let topic = TopicBuilder::from_execution(execution).key();
        self.dispatch(&topic, &LifecycleEvent::execution(execution));
    }

    /// Route a fired CMMN case-execution callback to every matching
    /// listener.
    ///
    /// Synchronous: returns after all matched listeners have run.
    pub fn notify_case_execution(&self, case_execution: &dyn CaseExecutionContext) {
        let topic = TopicBuilder::from_case(case_execution).key();
        self.dispatch(&topic, &LifecycleEvent::case_execution(case_execution));
    }

    /// Register a task listener under an explicit topic pattern.
    pub fn register_task<L>(&self, pattern: TopicPattern, listener: L) -> RegistrationId
    where
        L: TaskListener + 'static,
    {
        self.insert(
            pattern,
            short_type_name::<L>(),
            RegisteredListener::Task(Arc::new(listener)),
        )
    }

    /// Register a task listener under the pattern its type declares.
    ///
    /// The declared context is forced to `task`, and a declared element type
    /// is ignored: task events carry their defining element's type, which
    /// would otherwise silently filter the listener.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::MissingSelector`] when the listener declares no
    /// selector. Reported here, at registration time, never at dispatch
    /// time.
    pub fn register_task_declared<L>(&self, listener: L) -> RegistrationResult<RegistrationId>
    where
        L: TaskListener + 'static,
    {
        let selector = listener.selector().ok_or_else(missing_selector::<L>)?;
        let pattern = TopicBuilder::from_selector(&selector.with_context(EventContext::Task))
            // an empty value unsets the {type} slot
            .element_type("")
            .pattern();
        Ok(self.register_task(pattern, listener))
    }

    /// Register an execution listener under an explicit topic pattern.
    pub fn register_execution<L>(&self, pattern: TopicPattern, listener: L) -> RegistrationId
    where
        L: ExecutionListener + 'static,
    {
        self.insert(
            pattern,
            short_type_name::<L>(),
            RegisteredListener::Execution(Arc::new(listener)),
        )
    }

    /// Register an execution listener under the pattern its type declares,
    /// with the declared context forced to `bpmn`.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::MissingSelector`] when the listener declares no
    /// selector.
    pub fn register_execution_declared<L>(&self, listener: L) -> RegistrationResult<RegistrationId>
    where
        L: ExecutionListener + 'static,
    {
        let selector = listener.selector().ok_or_else(missing_selector::<L>)?;
        let pattern =
            TopicBuilder::from_selector(&selector.with_context(EventContext::Bpmn)).pattern();
        Ok(self.register_execution(pattern, listener))
    }

    /// Register a case-execution listener under an explicit topic pattern.
    pub fn register_case_execution<L>(&self, pattern: TopicPattern, listener: L) -> RegistrationId
    where
        L: CaseExecutionListener + 'static,
    {
        self.insert(
            pattern,
            short_type_name::<L>(),
            RegisteredListener::CaseExecution(Arc::new(listener)),
        )
    }

    /// Register a case-execution listener under the pattern its type
    /// declares, with the declared context forced to `cmmn`.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::MissingSelector`] when the listener declares no
    /// selector.
    pub fn register_case_execution_declared<L>(
        &self,
        listener: L,
    ) -> RegistrationResult<RegistrationId>
    where
        L: CaseExecutionListener + 'static,
    {
        let selector = listener.selector().ok_or_else(missing_selector::<L>)?;
        let pattern =
            TopicBuilder::from_selector(&selector.with_context(EventContext::Cmmn)).pattern();
        Ok(self.register_case_execution(pattern, listener))
    }

    /// Register a generic envelope consumer under an explicit topic pattern.
    pub fn register_consumer<C>(&self, pattern: TopicPattern, consumer: C) -> RegistrationId
    where
        C: EventConsumer + 'static,
    {
        self.insert(
            pattern,
            short_type_name::<C>(),
            RegisteredListener::Consumer(Arc::new(consumer)),
        )
    }

    /// Remove a registration entry. Returns whether an entry was removed.
    ///
    /// Takes effect from the next `notify_*`; a dispatch already in flight
    /// keeps its snapshot of matched entries.
    pub fn unregister(&self, id: RegistrationId) -> bool {
        let mut registrations = self
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = registrations.len();
        registrations.retain(|registration| registration.id != id);
        registrations.len() < before
    }

    /// Number of live registration entries.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Listener for the engine's task listener slot.
    ///
    /// Funnels every host-fired task event onto the bus, whether or not
    /// anyone is yet registered to consume it.
    #[must_use]
    pub fn task_listener(&self) -> Arc<dyn TaskListener> {
        Arc::new(BusTaskListener { bus: self.clone() })
    }

    /// Listener for the engine's execution listener slot.
    #[must_use]
    pub fn execution_listener(&self) -> Arc<dyn ExecutionListener> {
        Arc::new(BusExecutionListener { bus: self.clone() })
    }

    /// Listener for the engine's case-execution listener slot.
    #[must_use]
    pub fn case_execution_listener(&self) -> Arc<dyn CaseExecutionListener> {
        Arc::new(BusCaseExecutionListener { bus: self.clone() })
    }

    fn insert(
        &self,
        pattern: TopicPattern,
        label: String,
        listener: RegisteredListener,
    ) -> RegistrationId {
        let id = RegistrationId::new();
        debug!(listener = %label, topic = %pattern, "registered listener");
        self.registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Registration {
                id,
                pattern,
                label,
                listener,
            });
        id
    }

    fn dispatch(&self, topic: &TopicKey, event: &LifecycleEvent<'_>) {
        debug!(topic = %topic, payload = ?event.payload(), "dispatching lifecycle event");

        // Snapshot the matches so no lock is held while listeners run;
        // listeners may re-enter the bus to register or unregister.
        let matched: Vec<Registration> = self
            .registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|registration| registration.pattern.matches(topic))
            .cloned()
            .collect();

        for registration in matched {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| registration.listener.deliver(event)));
            let error = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(DeliveryFailure::Failed(error))) => DispatchError::ListenerFailed {
                    listener: registration.label,
                    topic: topic.clone(),
                    error,
                },
                Ok(Err(DeliveryFailure::Mismatch { expected })) => DispatchError::ContextMismatch {
                    listener: registration.label,
                    topic: topic.clone(),
                    expected,
                    actual: event.context(),
                },
                Err(payload) => DispatchError::ListenerPanicked {
                    listener: registration.label,
                    topic: topic.clone(),
                    message: panic_message(payload.as_ref()),
                },
            };
            self.error_handler.handle(&error);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("registrations", &self.registration_count())
            .finish_non_exhaustive()
    }
}

/// Builder for [`EventBus`].
#[derive(Clone)]
pub struct EventBusBuilder {
    error_handler: Arc<dyn DispatchErrorHandler>,
}

impl EventBusBuilder {
    fn new() -> Self {
        Self {
            error_handler: Arc::new(LoggingErrorHandler),
        }
    }

    /// Install a custom handler for listener failures during dispatch.
    #[must_use]
    pub fn error_handler<H>(mut self, handler: H) -> Self
    where
        H: DispatchErrorHandler + 'static,
    {
        self.error_handler = Arc::new(handler);
        self
    }

    /// Build the bus.
    #[must_use]
    pub fn build(self) -> EventBus {
        EventBus {
            registrations: Arc::new(RwLock::new(Vec::new())),
            error_handler: self.error_handler,
        }
    }
}

impl fmt::Debug for EventBusBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBusBuilder").finish_non_exhaustive()
    }
}

struct BusTaskListener {
    bus: EventBus,
}

impl TaskListener for BusTaskListener {
    fn on_task(&self, task: &dyn TaskContext) -> anyhow::Result<()> {
        self.bus.notify_task(task);
        Ok(())
    }
}

struct BusExecutionListener {
    bus: EventBus,
}

impl ExecutionListener for BusExecutionListener {
    fn on_execution(&self, execution: &dyn ExecutionContext) -> anyhow::Result<()> {
        self.bus.notify_execution(execution);
        Ok(())
    }
}

struct BusCaseExecutionListener {
    bus: EventBus,
}

impl CaseExecutionListener for BusCaseExecutionListener {
    fn on_case_execution(&self, case_execution: &dyn CaseExecutionContext) -> anyhow::Result<()> {
        self.bus.notify_case_execution(case_execution);
        Ok(())
    }
}

/// Last path segment of a type name, the way the registration log refers to
/// listeners.
fn short_type_name<T>() -> String {
    let name = type_name::<T>();
    name.rsplit("::").next().unwrap_or(name).to_string()
}

fn missing_selector<L>() -> RegistrationError {
    RegistrationError::MissingSelector {
        type_name: short_type_name::<L>(),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
