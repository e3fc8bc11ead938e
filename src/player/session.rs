use crate::config::PlayerOptions;
use crate::constants::{DEFAULT_PLAYBACK_RATE, SEEK_MAX};

use super::types::PlayerConfig;

/// Clamp a reported fraction into [0, 1]. Non-finite values are rejected.
pub fn clamp_fraction(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Playback session mirrored from the embedded player.
///
/// Every transition is a plain method on this struct so the controller can be
/// driven deterministically without a rendering environment.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub source_id: String,
    pub is_playing: bool,
    pub volume: f64,
    pub muted: bool,
    pub played: f64,
    pub loaded: f64,
    pub duration_seconds: f64,
    pub playback_rate: f64,
    pub loop_playback: bool,
    pub picture_in_picture: bool,
    pub fullscreen: bool,
    pub seeking: bool,
    pub seek_target: Option<f64>,
    pub light_mode: bool,
    pub controls_visible: bool,
}

impl SessionState {
    pub fn new(source_id: impl Into<String>, options: &PlayerOptions) -> Self {
        Self {
            source_id: source_id.into(),
            is_playing: options.autoplay,
            volume: clamp_fraction(options.initial_volume).unwrap_or(1.0),
            muted: false,
            played: 0.0,
            loaded: 0.0,
            duration_seconds: 0.0,
            playback_rate: DEFAULT_PLAYBACK_RATE,
            loop_playback: false,
            picture_in_picture: false,
            fullscreen: false,
            seeking: false,
            seek_target: None,
            light_mode: options.light_mode,
            controls_visible: options.controls_visible,
        }
    }

    /// Point the session at a new source and forget everything tied to the old one.
    pub fn reset_for_source(&mut self, source_id: impl Into<String>) {
        self.source_id = source_id.into();
        self.played = 0.0;
        self.loaded = 0.0;
        self.duration_seconds = 0.0;
        self.picture_in_picture = false;
        self.seeking = false;
        self.seek_target = None;
    }

    /// Returns false when the update was dropped (seek in progress or bad input).
    pub fn apply_progress(&mut self, played: f64, loaded: f64) -> bool {
        if self.seeking {
            return false;
        }
        let (Some(played), Some(loaded)) = (clamp_fraction(played), clamp_fraction(loaded)) else {
            return false;
        };
        self.played = played;
        self.loaded = loaded;
        true
    }

    pub fn begin_seek(&mut self) {
        self.seeking = true;
        self.seek_target = Some(self.played);
    }

    pub fn update_seek(&mut self, target: f64) {
        if let Some(target) = clamp_seek(target) {
            self.seek_target = Some(target);
        }
    }

    /// Finish a seek gesture, returning the fraction the player should seek to.
    pub fn commit_seek(&mut self, target: f64) -> Option<f64> {
        let target = clamp_seek(target).or(self.seek_target);
        self.seeking = false;
        self.seek_target = None;
        if let Some(target) = target {
            self.played = target;
        }
        target
    }

    pub fn rewind(&mut self) {
        self.played = 0.0;
        self.seeking = false;
        self.seek_target = None;
    }

    pub fn set_volume(&mut self, volume: f64) -> bool {
        match clamp_fraction(volume) {
            Some(volume) => {
                self.volume = volume;
                true
            }
            None => false,
        }
    }

    pub fn set_playback_rate(&mut self, rate: f64) -> bool {
        if rate.is_finite() && rate > 0.0 {
            self.playback_rate = rate;
            true
        } else {
            false
        }
    }

    pub fn set_duration(&mut self, seconds: f64) -> bool {
        if seconds.is_finite() && seconds >= 0.0 {
            self.duration_seconds = seconds;
            true
        } else {
            false
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.duration_seconds * self.played
    }

    pub fn remaining_seconds(&self) -> f64 {
        self.duration_seconds * (1.0 - self.played)
    }

    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            source_id: self.source_id.clone(),
            is_playing: self.is_playing,
            volume: self.volume,
            muted: self.muted,
            loop_playback: self.loop_playback,
            playback_rate: self.playback_rate,
            picture_in_picture: self.picture_in_picture,
            controls_visible: self.controls_visible,
            light_mode: self.light_mode,
        }
    }
}

fn clamp_seek(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(0.0, SEEK_MAX))
}
