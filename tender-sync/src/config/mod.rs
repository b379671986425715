//! Configuration and dependency initialization.

mod dependencies;

pub use dependencies::{wait_for_search_index, ConnectionMode, Dependencies, SyncConfig};
