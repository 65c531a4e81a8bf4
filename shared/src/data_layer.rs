//! Data layer assembly
//!
//! [`DataLayerBuilder`] drives one processing pass: it turns tracking input
//! into device, privacy and page records, validates each, pushes them into a
//! [`DataStore`] and announces `data-ready` once everything is in place.

use serde_json::Value;

use crate::config::DataLayerConfig;
use crate::constants::{DATA_READY, LEGACY_PAGE_TYPE_KEY};
use crate::logging::Logger;
use crate::models::{DataHolder, DeviceHolder, PageHolder, PrivacyHolder, SectionSchema};
use crate::store::{
    ApplicationState, DataStore, EventScope, PublishReport, Section, StateSink, Subscription,
};
use crate::utils::object;

/// Builds the data layer from tracking input
pub struct DataLayerBuilder<P: StateSink> {
    store: DataStore<P>,
    subscriptions: Vec<Subscription>,
    notify_sections: bool,
    logger: Logger,
}

impl<P: StateSink> DataLayerBuilder<P> {
    /// Create a builder whose store writes to `sink`
    ///
    /// The store is seeded with the configured application identity. When
    /// `log_subscribers` is set, two subscribers that log every event are
    /// registered.
    pub fn new(config: &DataLayerConfig, sink: P) -> Self {
        let logger = Logger::new("build-data");
        let store = DataStore::with_state(config.initial_state(), sink);

        let mut subscriptions = Vec::new();
        if config.log_subscribers {
            for label in ["subscriber 1", "subscriber 2"] {
                let listener_logger = logger.clone();
                subscriptions.push(store.subscribe(move |event| {
                    listener_logger.log_with(
                        &format!("State changed from {label}:"),
                        &[event.to_value()],
                    );
                    Ok(())
                }));
            }
        }
        logger.log("Data layer builder initialized.");

        Self {
            store,
            subscriptions,
            notify_sections: config.notify_sections,
            logger,
        }
    }

    pub fn store(&self) -> &DataStore<P> {
        &self.store
    }

    /// Copy of the store's current state
    pub fn state(&self) -> ApplicationState {
        self.store.get_state()
    }

    pub fn into_store(self) -> DataStore<P> {
        self.store
    }

    pub fn into_state(self) -> ApplicationState {
        self.store.get_state()
    }

    /// Remove the subscribers registered by [`DataLayerBuilder::new`]
    pub fn unsubscribe_all(&mut self) -> usize {
        self.subscriptions
            .drain(..)
            .filter(|subscription| subscription.unsubscribe())
            .count()
    }

    /// Process every section from `input`, then publish `data-ready`
    ///
    /// `input` is the tracking document; a non-object or empty input is
    /// treated as `{}`. Sections are processed in the order device, privacy,
    /// page.
    pub fn process_application_data(&self, input: &Value) -> PublishReport {
        self.logger.log_with("Input tracking data:", &[input.clone()]);
        let empty = Value::Null;
        let input = if object::is_not_empty(input) && input.is_object() {
            input
        } else {
            &empty
        };

        self.process_device_data(input);
        self.process_privacy_data(input);
        self.process_page_data(input);

        let report = self.store.publish_event(DATA_READY, EventScope::All);
        if !report.is_clean() {
            self.logger.warn_with(
                "Some listeners failed on data-ready:",
                &[Value::from(report.failures.len())],
            );
        }
        report
    }

    /// Device record from the host probe, overlaid with `input.device`
    pub fn process_device_data(&self, input: &Value) {
        let mut device = DeviceHolder::from_host();
        overlay(&mut device, input, Section::Device);
        self.commit(device, Section::Device);
    }

    /// Privacy defaults overlaid with `input.privacy`
    pub fn process_privacy_data(&self, input: &Value) {
        let mut privacy = PrivacyHolder::new();
        overlay(&mut privacy, input, Section::Privacy);
        self.commit(privacy, Section::Privacy);
    }

    /// Page defaults overlaid with `input.page`; `applePage` sets the type
    pub fn process_page_data(&self, input: &Value) {
        let mut page = PageHolder::new();
        overlay(&mut page, input, Section::Page);
        if let Some(page_type) = input.get(LEGACY_PAGE_TYPE_KEY).filter(|v| !v.is_null()) {
            page.set_property("type", page_type.clone());
        }
        self.commit(page, Section::Page);
    }

    fn commit<S: SectionSchema>(&self, mut holder: DataHolder<S>, section: Section) {
        let errors = holder.record_validation_errors();
        self.store.update_validation_error_state(&errors);
        self.store
            .update_section_state(section, &holder.to_value(), self.notify_sections);
    }
}

fn overlay<S: SectionSchema>(holder: &mut DataHolder<S>, input: &Value, section: Section) {
    if let Some(partial) = input.get(section.as_str()) {
        holder.set(partial);
    }
}
