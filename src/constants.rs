// Playback and view-tracking constants shared by the controller, tracker and config defaults

// === Sources ===
pub const DEFAULT_SOURCE: &str = "https://www.youtube.com/watch?v=RK27RX54EJU&ab_channel=JackMurphy";

// === Counter service ===
pub const DEFAULT_COUNTER_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_COUNTER_TIMEOUT_SECONDS: u64 = 30;
pub const VISUALIZATION_PATH: &str = "visualization";

// === View tracking ===
// A view counts once playback passes this fraction (strictly greater than).
pub const DEFAULT_WATCH_THRESHOLD: f64 = 0.6;

// === Session defaults ===
pub const DEFAULT_VOLUME: f64 = 0.8;
pub const DEFAULT_PLAYBACK_RATE: f64 = 1.0;

// Upper bound of the seek slider; seeking to exactly 1.0 ends the media.
pub const SEEK_MAX: f64 = 0.999999;

// Shown next to the URL input after a playback error
pub const INVALID_SOURCE_MESSAGE: &str = "Invalid URL";
