/// Common types shared between the controller and the embedded player

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Configuration pushed to the embedded player after every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub source_id: String,
    pub is_playing: bool,
    pub volume: f64,
    pub muted: bool,
    pub loop_playback: bool,
    pub playback_rate: f64,
    pub picture_in_picture: bool,
    pub controls_visible: bool,
    pub light_mode: bool,
}

/// Events reported by the embedded player
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Ready,
    Start,
    Play,
    Pause,
    Buffer,
    Seek(f64),
    Ended,
    Error(String),
    Progress { played: f64, loaded: f64 },
    Duration(f64),
    EnablePip,
    DisablePip,
    PlaybackRateChange(f64),
    PlaybackQualityChange(String),
}

/// Buttons a host UI can show under the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    TogglePlaying,
    Restart,
    Stop,
    ToggleLoop,
    ToggleMute,
}
