//! Session prediction history

mod record;
mod store;

pub use record::{HistoryRecord, CSV_HEADERS, TIMESTAMP_FORMAT};
pub use store::{HistoryState, HistoryStore};
