//! Per-customer trade-in journey: the interactive session state for one
//! lookup and the append-only log of quotes, network pings, and bookings.

mod session;
mod store;

pub use session::TradeInSession;
pub use store::{
    InMemoryJourneyStore, JourneyEvent, JourneyRecord, JourneyStore, JourneyStoreError,
    JsonFileJourneyStore,
};

use crate::config::JourneyConfig;
use std::sync::Arc;

/// Pick the configured journey store: a JSON file when a path is set, memory otherwise.
pub fn journey_store_from_config(config: &JourneyConfig) -> Arc<dyn JourneyStore> {
    match &config.store_path {
        Some(path) => Arc::new(JsonFileJourneyStore::new(path.clone())),
        None => Arc::new(InMemoryJourneyStore::default()),
    }
}
