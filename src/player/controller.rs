use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

use super::session::SessionState;
use super::traits::MediaCapability;
use super::types::{ControlAction, LoadState, PlayerEvent};
use crate::backends::VisualizationApi;
use crate::config::{Config, PlayerOptions};
use crate::workers::{ViewCountTracker, ViewRecord};

/// Controller that owns the embedded player and the playback session.
///
/// All methods run on the thread that owns the controller. Counter-service
/// requests are spawned on the current Tokio runtime and their results are
/// applied through [`poll_responses`](Self::poll_responses),
/// [`next_response`](Self::next_response) or [`flush`](Self::flush).
pub struct PlayerController {
    capability: Box<dyn MediaCapability>,
    options: PlayerOptions,
    state: SessionState,
    load_state: LoadState,
    tracker: ViewCountTracker,
    error: Option<String>,
    /// Last source the player finished loading; the first choice for rollback
    last_good_source: Option<String>,
    /// Source that was being left on the last load, used for rollback only
    /// while nothing has loaded yet
    previous_source: Option<String>,
    /// Last source the player reported as unplayable
    failed_source: Option<String>,
}

impl PlayerController {
    /// Create a controller from the loaded config
    pub fn new(
        capability: Box<dyn MediaCapability>,
        api: Arc<dyn VisualizationApi>,
        config: &Config,
    ) -> Self {
        Self::with_options(
            capability,
            api,
            config.player.clone(),
            config.tracking.watch_threshold,
        )
    }

    pub fn with_options(
        capability: Box<dyn MediaCapability>,
        api: Arc<dyn VisualizationApi>,
        options: PlayerOptions,
        watch_threshold: f64,
    ) -> Self {
        let state = SessionState::new(options.default_source.clone(), &options);
        Self {
            capability,
            options,
            state,
            load_state: LoadState::Idle,
            tracker: ViewCountTracker::new(api, watch_threshold),
            error: None,
            last_good_source: None,
            previous_source: None,
            failed_source: None,
        }
    }

    /// One-shot initialization: configure the player with the default source
    /// and fetch its view count.
    pub fn mount(&mut self) {
        if self.load_state != LoadState::Idle {
            warn!("Player already mounted, ignoring");
            return;
        }
        info!("Mounting player with source {}", self.state.source_id);
        self.load_state = LoadState::Loading;
        self.tracker.begin(&self.state.source_id);
        self.sync_capability();
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn previous_source(&self) -> Option<&str> {
        self.previous_source.as_deref()
    }

    pub fn last_good_source(&self) -> Option<&str> {
        self.last_good_source.as_deref()
    }

    pub fn view_record(&self) -> &ViewRecord {
        self.tracker.record()
    }

    pub fn view_count(&self) -> u64 {
        self.tracker.count()
    }

    /// Load a new source. The error indicator is cleared unless the new source
    /// is the one that just failed.
    pub fn load_source(&mut self, new_source: &str) {
        if self.failed_source.as_deref() != Some(new_source) {
            self.error = None;
        }
        self.load(new_source.to_string());
    }

    /// Handle the URL input's Load button. Blank input is ignored.
    pub fn submit_source_input(&mut self, raw: &str) -> bool {
        let source = raw.trim();
        if source.is_empty() {
            debug!("Ignoring empty source input");
            return false;
        }
        self.load_source(source);
        true
    }

    fn load(&mut self, source: String) {
        let outgoing = self.state.source_id.clone();
        let outgoing_failed = self.failed_source.as_deref() == Some(outgoing.as_str());
        if self.load_state != LoadState::Idle && !outgoing_failed && outgoing != source {
            self.previous_source = Some(outgoing);
        }

        info!("Loading source {}", source);
        self.state.reset_for_source(source);
        self.load_state = LoadState::Loading;
        self.tracker.begin(&self.state.source_id);
        self.sync_capability();
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.state.is_playing = playing;
        self.sync_capability();
    }

    pub fn toggle_playing(&mut self) {
        self.set_playing(!self.state.is_playing);
    }

    pub fn set_volume(&mut self, volume: f64) {
        if !self.state.set_volume(volume) {
            warn!("Ignoring invalid volume {}", volume);
            return;
        }
        trace!("Volume set to {}", self.state.volume);
        self.sync_capability();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.state.muted = muted;
        self.sync_capability();
    }

    pub fn toggle_muted(&mut self) {
        self.set_muted(!self.state.muted);
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        if !self.state.set_playback_rate(rate) {
            warn!("Ignoring invalid playback rate {}", rate);
            return;
        }
        self.sync_capability();
    }

    pub fn set_loop(&mut self, loop_playback: bool) {
        self.state.loop_playback = loop_playback;
        self.sync_capability();
    }

    pub fn toggle_loop(&mut self) {
        self.set_loop(!self.state.loop_playback);
    }

    pub fn set_light_mode(&mut self, light_mode: bool) {
        self.state.light_mode = light_mode;
        self.sync_capability();
    }

    pub fn toggle_picture_in_picture(&mut self) {
        self.state.picture_in_picture = !self.state.picture_in_picture;
        self.sync_capability();
    }

    pub fn request_fullscreen(&mut self) {
        match self.capability.request_fullscreen() {
            Ok(()) => self.state.fullscreen = true,
            Err(e) => warn!("Fullscreen request failed: {}", e),
        }
    }

    /// Jump back to the start without touching play/pause
    pub fn restart(&mut self) {
        self.state.rewind();
        self.capability.seek_to(0.0);
    }

    pub fn stop(&mut self) {
        self.state.is_playing = false;
        self.state.rewind();
        self.capability.seek_to(0.0);
        self.sync_capability();
    }

    /// Run a control button. Buttons switched off in the options do nothing.
    pub fn perform(&mut self, action: ControlAction) -> bool {
        let enabled = match action {
            ControlAction::TogglePlaying | ControlAction::Restart => true,
            ControlAction::Stop => self.options.show_stop_button,
            ControlAction::ToggleLoop => self.options.show_loop_toggle,
            ControlAction::ToggleMute => self.options.show_mute_toggle,
        };
        if !enabled {
            debug!("Control {:?} is disabled", action);
            return false;
        }

        match action {
            ControlAction::TogglePlaying => self.toggle_playing(),
            ControlAction::Restart => self.restart(),
            ControlAction::Stop => self.stop(),
            ControlAction::ToggleLoop => self.toggle_loop(),
            ControlAction::ToggleMute => self.toggle_muted(),
        }
        true
    }

    pub fn on_progress(&mut self, played: f64, loaded: f64) {
        if self.state.seeking {
            trace!("Ignoring progress while seeking");
            return;
        }
        if !self.state.apply_progress(played, loaded) {
            warn!("Ignoring invalid progress played={} loaded={}", played, loaded);
            return;
        }
        self.mark_loaded();

        if self.options.verbose_logging {
            debug!(
                "Progress played={:.3} loaded={:.3}",
                self.state.played, self.state.loaded
            );
        } else {
            trace!(
                "Progress played={:.3} loaded={:.3}",
                self.state.played, self.state.loaded
            );
        }

        if self.tracker.observe_progress(self.state.played) {
            info!(
                "Watch threshold passed at {:.2} for {}",
                self.state.played, self.state.source_id
            );
        }
    }

    pub fn on_seek_start(&mut self) {
        self.state.begin_seek();
    }

    pub fn on_seek_change(&mut self, target: f64) {
        self.state.update_seek(target);
    }

    pub fn on_seek_commit(&mut self, target: f64) {
        if let Some(fraction) = self.state.commit_seek(target) {
            trace!("Seeking to {}", fraction);
            self.capability.seek_to(fraction);
        }
    }

    pub fn on_ended(&mut self) {
        self.state.is_playing = self.state.loop_playback;
        self.sync_capability();
    }

    /// The player could not play the current source: show the error and go back
    /// to the last source that loaded, or to the one before it if none has.
    pub fn on_error(&mut self, err: impl Into<String>) {
        let message = err.into();
        let failed = self.state.source_id.clone();
        error!("Playback error for {}: {}", failed, message);

        self.error = Some(message);
        self.load_state = LoadState::Error;
        self.failed_source = Some(failed.clone());

        let target = self
            .last_good_source
            .clone()
            .or_else(|| self.previous_source.clone());
        match target {
            Some(target) if target != failed => {
                info!("Rolling back to {}", target);
                self.load(target);
            }
            _ => {
                warn!("No earlier source to fall back to, staying on {}", failed);
                self.state.is_playing = false;
                self.sync_capability();
            }
        }
    }

    pub fn on_duration_known(&mut self, seconds: f64) {
        if !self.state.set_duration(seconds) {
            warn!("Ignoring invalid duration {}", seconds);
            return;
        }
        debug!("Duration known: {}s", seconds);
        self.mark_loaded();
    }

    /// Dispatch an event reported by the embedded player
    pub fn handle_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Ready => {
                debug!("Player ready");
                self.mark_loaded();
            }
            PlayerEvent::Start => debug!("Playback started"),
            PlayerEvent::Play => self.set_playing(true),
            PlayerEvent::Pause => self.set_playing(false),
            PlayerEvent::Buffer => debug!("Buffering"),
            PlayerEvent::Seek(seconds) => debug!("Player seeked to {}s", seconds),
            PlayerEvent::Ended => self.on_ended(),
            PlayerEvent::Error(message) => self.on_error(message),
            PlayerEvent::Progress { played, loaded } => self.on_progress(played, loaded),
            PlayerEvent::Duration(seconds) => self.on_duration_known(seconds),
            PlayerEvent::EnablePip => {
                self.state.picture_in_picture = true;
                self.sync_capability();
            }
            PlayerEvent::DisablePip => {
                self.state.picture_in_picture = false;
                self.sync_capability();
            }
            PlayerEvent::PlaybackRateChange(rate) => self.set_playback_rate(rate),
            PlayerEvent::PlaybackQualityChange(quality) => {
                debug!("Playback quality changed to {}", quality)
            }
        }
    }

    /// Apply counter-service responses that have already arrived
    pub fn poll_responses(&mut self) -> usize {
        self.tracker.poll()
    }

    /// Wait for the next counter-service response and apply it
    pub async fn next_response(&mut self) {
        self.tracker.next_output().await;
    }

    /// Wait for all in-flight counter-service requests and apply their results
    pub async fn flush(&mut self) {
        self.tracker.flush().await;
    }

    fn mark_loaded(&mut self) {
        if self.load_state == LoadState::Loading {
            info!("Source loaded: {}", self.state.source_id);
            self.load_state = LoadState::Loaded;
            self.last_good_source = Some(self.state.source_id.clone());
        }
    }

    fn sync_capability(&mut self) {
        let config = self.state.player_config();
        self.capability.configure(&config);
    }
}
