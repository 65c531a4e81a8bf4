//! Application state store
//!
//! This module contains the state side of the data layer:
//! - The aggregated application state and its sections
//! - The persistence sink interface the store writes through
//! - The publish/subscribe store coordinating both

pub mod data_store;
pub mod errors;
pub mod persist;
pub mod state;

// Re-export commonly used items
pub use data_store::{DataStore, ListenerFailure, PublishReport, Subscription};
pub use errors::{PersistError, PersistResult};
pub use persist::{render_state, FileSink, MemorySink, NullSink, OutputFormat, StateSink};
pub use state::{ApplicationState, EventScope, Section, StoreEvent};
