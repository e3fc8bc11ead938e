use anyhow::Result;

use super::types::PlayerConfig;

/// The embedded media player. Decoding and rendering happen behind this seam;
/// the controller only configures it and tells it where to seek.
pub trait MediaCapability: Send {
    /// Apply the full configuration. Called after every session change.
    fn configure(&mut self, config: &PlayerConfig);

    /// Seek to a fraction of the media duration.
    fn seek_to(&mut self, fraction: f64);

    fn request_fullscreen(&mut self) -> Result<()>;
}
