// Crisis event logging
// Public interface for the best-effort event sink

mod logger;

pub use logger::{hash_query, CrisisEventLog, EventRecord, FileEventLog, NullEventLog};
