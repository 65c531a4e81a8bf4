//! Store Flow Integration Test
//!
//! Drives the data holders and the store together through a capturing sink,
//! checking the observable behavior a subscriber or a persistence target sees.

use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

use datalayer_shared::models::{DeviceHolder, PageHolder, PrivacyHolder};
use datalayer_shared::store::{
    ApplicationState, DataStore, EventScope, PersistError, PersistResult, Section, StateSink,
    StoreEvent,
};
use datalayer_shared::{DataLayerBuilder, DataLayerConfig, FileSink, OutputFormat};

/// Sink that records every state it is handed
#[derive(Debug, Clone, Default)]
struct CapturingSink {
    saved: Rc<RefCell<Vec<ApplicationState>>>,
    should_fail: bool,
}

impl CapturingSink {
    fn new() -> Self {
        Self::default()
    }

    fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    fn saved(&self) -> Vec<ApplicationState> {
        self.saved.borrow().clone()
    }
}

impl StateSink for CapturingSink {
    fn persist(&self, state: &ApplicationState) -> PersistResult<()> {
        if self.should_fail {
            return Err(PersistError::Unavailable {
                message: "simulated outage".to_string(),
            });
        }
        self.saved.borrow_mut().push(state.clone());
        Ok(())
    }
}

type EventLog = Rc<RefCell<Vec<StoreEvent>>>;

fn subscribe_recorder<P: StateSink>(store: &DataStore<P>) -> (EventLog, datalayer_shared::Subscription) {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let subscription = store.subscribe(move |event| {
        sink.borrow_mut().push(event.clone());
        Ok(())
    });
    (log, subscription)
}

#[test]
fn test_set_merges_instead_of_replacing() {
    let mut page = PageHolder::new();
    page.set(&json!({"name": "Home", "title": "Welcome"}));
    page.set(&json!({"title": "Welcome back", "pathName": "/"}));

    let record = page.get();
    assert_eq!(record["name"], json!("Home"));
    assert_eq!(record["title"], json!("Welcome back"));
    assert_eq!(record["pathName"], json!("/"));
    assert_eq!(record["type"], json!(""));
}

#[test]
fn test_get_returns_independent_snapshots() {
    let device = DeviceHolder::new();
    let mut first = device.get();
    let second = device.get();
    assert_eq!(first, second);

    first.insert("platform".to_string(), json!("mutated"));
    assert_eq!(device.get(), second);
    assert_eq!(device.get_property("platform"), Some(json!("unknown")));
}

#[test]
fn test_fresh_holders_report_one_error_per_required_string() {
    let device_errors = DeviceHolder::new().get_data_errors();
    let string_errors: Vec<_> = device_errors
        .iter()
        .filter(|e| e.ends_with("-invalid-{unknown}"))
        .collect();
    assert_eq!(string_errors.len(), 4);

    assert_eq!(PageHolder::new().get_data_errors().len(), 4);
    assert_eq!(PrivacyHolder::new().get_data_errors().len(), 3);
}

#[test]
fn test_device_update_scenario() {
    let sink = CapturingSink::new();
    let store = DataStore::new(sink.clone());
    let (first_log, _first) = subscribe_recorder(&store);
    let (second_log, _second) = subscribe_recorder(&store);

    store.update_device_state(&json!({"orientation": "portrait"}), true);

    let expected = vec![StoreEvent::new("data-updated", Section::Device)];
    assert_eq!(*first_log.borrow(), expected);
    assert_eq!(*second_log.borrow(), expected);
    assert_eq!(
        first_log.borrow()[0].to_value(),
        json!({"message": "data-updated", "section": "device"})
    );

    let device = store.get_state().device;
    let mut expected_device = DeviceHolder::default_values();
    expected_device.insert("orientation".to_string(), json!("portrait"));
    assert_eq!(device, expected_device);

    assert_eq!(sink.saved().len(), 1);
    assert_eq!(sink.saved()[0].device["orientation"], json!("portrait"));
}

#[test]
fn test_unsubscribe_before_update_prevents_delivery() {
    let store = DataStore::new(CapturingSink::new());
    let (removed_log, removed) = subscribe_recorder(&store);
    let (kept_log, _kept) = subscribe_recorder(&store);

    assert!(removed.unsubscribe());
    assert!(!removed.unsubscribe());

    store.update_page_state(&json!({"title": "Cart"}), true);
    assert!(removed_log.borrow().is_empty());
    assert_eq!(kept_log.borrow().len(), 1);
    assert_eq!(kept_log.borrow()[0].section, EventScope::Section(Section::Page));
}

#[test]
fn test_failing_listener_does_not_block_later_listener() {
    let store = DataStore::new(CapturingSink::new());
    store.subscribe(|_| anyhow::bail!("listener failed"));
    let (log, _subscription) = subscribe_recorder(&store);

    store.update_privacy_state(&json!({"notice_behavior": "implied"}), true);
    assert_eq!(log.borrow().len(), 1);

    let report = store.publish_event("data-ready", EventScope::All);
    assert_eq!(report.invoked, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_validation_errors_are_deduplicated() {
    let store = DataStore::new(CapturingSink::new());
    let device_errors = DeviceHolder::new().get_data_errors();
    store.update_validation_error_state(&device_errors);
    store.update_validation_error_state(&device_errors);

    let mut overlapping = device_errors[..2].to_vec();
    overlapping.push("{extra}-invalid-{}".to_string());
    store.update_validation_error_state(&overlapping);

    let errors = store.get_state().validation_errors;
    assert_eq!(errors.len(), device_errors.len() + 1);
    for error in &errors {
        assert_eq!(errors.iter().filter(|e| *e == error).count(), 1);
    }
}

#[test]
fn test_sink_failure_keeps_state_and_events() {
    let sink = CapturingSink::with_failure();
    let store = DataStore::new(sink.clone());
    let (log, _subscription) = subscribe_recorder(&store);

    store.update_device_state(&json!({"viewport": "medium"}), true);
    assert!(sink.saved().is_empty());
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(store.get_state().device["viewport"], json!("medium"));
}

#[test]
fn test_builder_end_to_end_with_file_sink() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("state.yml");
    let config = DataLayerConfig {
        log_subscribers: false,
        ..DataLayerConfig::default()
    };

    let builder = DataLayerBuilder::new(&config, FileSink::new(&path, OutputFormat::Yaml));
    let (log, _subscription) = subscribe_recorder(builder.store());
    let report = builder.process_application_data(&json!({
        "applePage": "product",
        "page": {"name": "Widget", "pathName": "/widget", "title": "Widget"},
        "privacy": {
            "notice_behavior": "implied",
            "notice_gdpr_prefs": "0,1,2",
            "notice_preferences": "2"
        }
    }));

    assert!(report.is_clean());
    assert_eq!(*log.borrow(), vec![StoreEvent::new("data-ready", EventScope::All)]);

    let written: ApplicationState =
        serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, builder.state());
    assert_eq!(written.page["type"], json!("product"));
    assert_eq!(written.privacy["validationErrors"], json!([]));
    assert!(written
        .validation_errors
        .iter()
        .all(|error| !error.starts_with("{type}") && !error.starts_with("{notice_")));
    assert_ne!(written.device["validationErrors"], Value::Array(Vec::new()));
}
