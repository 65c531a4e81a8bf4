//! Publish/subscribe state store
//!
//! [`DataStore`] owns the application state and an ordered list of
//! listeners. Section updates shallow-merge into the state, hand the full
//! state to the sink, and optionally publish a section-tagged event.
//!
//! Everything runs synchronously on the calling thread. All methods take
//! `&self`; no internal borrow is held while the sink or a listener runs, so
//! listeners may read the state, subscribe, or unsubscribe. Changes to the
//! listener list made during a publish take effect on the next publish.

use serde_json::Value;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::constants::DATA_UPDATED;
use crate::logging::Logger;
use crate::store::persist::StateSink;
use crate::store::state::{ApplicationState, EventScope, Section, StoreEvent};
use crate::utils::{array, object};

type Listener = Rc<dyn Fn(&StoreEvent) -> anyhow::Result<()>>;

#[derive(Clone)]
struct ListenerEntry {
    id: u64,
    listener: Listener,
}

type ListenerList = RefCell<Vec<ListenerEntry>>;

/// Handle returned by [`DataStore::subscribe`]
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it. The handle does not keep the
/// store alive.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove this listener from the store
    ///
    /// Returns `true` if the listener was still registered. Calling it again,
    /// or after the store is gone, does nothing.
    pub fn unsubscribe(&self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let remaining = {
            let mut list = listeners.borrow_mut();
            let before = list.len();
            list.retain(|entry| entry.id != self.id);
            if list.len() == before {
                return false;
            }
            list.len()
        };
        Logger::new("data-store").debug_with(
            "Listener unsubscribed. Total listeners:",
            &[Value::from(remaining)],
        );
        true
    }
}

/// A listener that failed during a publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub subscription_id: u64,
    pub message: String,
}

/// Outcome of one publish cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Number of listeners invoked, failed ones included
    pub invoked: usize,
    pub failures: Vec<ListenerFailure>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// State store with section-scoped updates and synchronous notification
pub struct DataStore<P: StateSink> {
    /// Authoritative application state
    state: RefCell<ApplicationState>,

    /// Listeners in subscription order
    listeners: Rc<ListenerList>,

    next_id: Cell<u64>,

    /// Where every updated state is written
    sink: P,

    logger: Logger,
}

impl<P: StateSink> DataStore<P> {
    /// Create a store with the default application state
    pub fn new(sink: P) -> Self {
        Self::with_state(ApplicationState::default(), sink)
    }

    /// Create a store seeded with `initial_state`
    pub fn with_state(initial_state: ApplicationState, sink: P) -> Self {
        let logger = Logger::new("data-store");
        logger.debug_with("Store initialized with state:", &[initial_state.to_value()]);
        Self {
            state: RefCell::new(initial_state),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(1),
            sink,
            logger,
        }
    }

    /// Copy of the current state
    pub fn get_state(&self) -> ApplicationState {
        self.state.borrow().clone()
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn update_device_state(&self, partial: &Value, notify: bool) {
        self.update_section_state(Section::Device, partial, notify);
    }

    pub fn update_page_state(&self, partial: &Value, notify: bool) {
        self.update_section_state(Section::Page, partial, notify);
    }

    pub fn update_privacy_state(&self, partial: &Value, notify: bool) {
        self.update_section_state(Section::Privacy, partial, notify);
    }

    /// Shallow-merge `partial` into `section`, persist, and optionally notify
    ///
    /// The state is always written to the sink, before any listener runs.
    /// Listeners hear a `data-updated` event only when `notify` is set.
    pub fn update_section_state(&self, section: Section, partial: &Value, notify: bool) {
        {
            let mut state = self.state.borrow_mut();
            if !object::shallow_merge(state.section_mut(section), partial) {
                self.logger.debug_with(
                    "Ignoring non-object update for section",
                    &[Value::from(section.as_str())],
                );
            }
        }
        self.save_data_and_publish(section, notify);
    }

    /// Merge `new_errors` into the store-level validation errors
    ///
    /// An empty list is replaced by a copy of `new_errors`; otherwise the two
    /// are unioned, keeping the first occurrence of each error.
    pub fn update_validation_error_state(&self, new_errors: &[String]) {
        let mut state = self.state.borrow_mut();
        let merged = if state.validation_errors.is_empty() {
            new_errors.to_vec()
        } else {
            array::union(&state.validation_errors, new_errors)
        };
        state.validation_errors = merged;
    }

    /// Register a listener; it runs on every publish until unsubscribed
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StoreEvent) -> anyhow::Result<()> + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let total = {
            let mut list = self.listeners.borrow_mut();
            list.push(ListenerEntry {
                id,
                listener: Rc::new(listener),
            });
            list.len()
        };
        self.logger.debug_with(
            "Listener subscribed. Total listeners:",
            &[Value::from(total)],
        );

        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Deliver `{message, section}` to every listener in subscription order
    ///
    /// The listener list is captured when the publish starts. A listener that
    /// returns an error or panics is logged and recorded in the report;
    /// delivery continues with the next listener.
    pub fn publish_event(&self, message: &str, scope: impl Into<EventScope>) -> PublishReport {
        let event = StoreEvent::new(message, scope);
        let snapshot: Vec<ListenerEntry> = self.listeners.borrow().clone();

        let mut report = PublishReport::default();
        for entry in &snapshot {
            report.invoked += 1;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (entry.listener)(&event)));
            let failure = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(err)) => format!("{err:#}"),
                Err(payload) => panic_message(payload.as_ref()),
            };
            self.logger.error_with(
                "Error in state listener:",
                &[Value::from(failure.as_str()), event.to_value()],
            );
            report.failures.push(ListenerFailure {
                subscription_id: entry.id,
                message: failure,
            });
        }
        report
    }

    fn save_data_and_publish(&self, section: Section, notify: bool) {
        let snapshot = self.get_state();
        if let Err(err) = self.sink.persist(&snapshot) {
            self.logger
                .warn_with("Failed to persist state:", &[Value::from(err.to_string())]);
        }
        if notify {
            self.publish_event(DATA_UPDATED, section);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("listener panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("listener panicked: {message}")
    } else {
        "listener panicked".to_string()
    }
}
