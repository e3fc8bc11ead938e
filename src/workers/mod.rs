/// Background request handling for the player
pub mod view_count_tracker;

// Re-export commonly used types
pub use view_count_tracker::{TrackerOutput, ViewCountTracker, ViewRecord, normalize_key};
