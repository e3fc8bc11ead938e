use crate::constants::{INVALID_SOURCE_MESSAGE, SEEK_MAX};
use crate::player::{ControlAction, LoadState, PlayerController};
use crate::utils::format_seconds;

#[derive(Debug, Clone, PartialEq)]
pub struct ControlButton {
    pub action: ControlAction,
    pub label: &'static str,
}

/// Everything a host UI needs to draw the player chrome, taken as a snapshot
/// of the controller after each event.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerViewModel {
    pub source_id: String,
    pub load_state: LoadState,
    pub error_message: Option<&'static str>,
    pub view_count: u64,
    pub controls: Vec<ControlButton>,
    /// Seek slider position; follows the drag while a seek is in progress
    pub seek_value: f64,
    pub seek_max: f64,
    pub volume: f64,
    pub played: f64,
    pub loaded: f64,
    pub duration: String,
    pub elapsed: String,
    pub remaining: String,
    pub picture_in_picture: bool,
    pub fullscreen: bool,
}

impl PlayerViewModel {
    pub fn from_controller(controller: &PlayerController) -> Self {
        let state = controller.state();
        let options = controller.options();

        let mut controls = vec![
            ControlButton {
                action: ControlAction::TogglePlaying,
                label: if state.is_playing { "Pause" } else { "Play" },
            },
            ControlButton {
                action: ControlAction::Restart,
                label: "Restart",
            },
        ];
        if options.show_stop_button {
            controls.push(ControlButton {
                action: ControlAction::Stop,
                label: "Stop",
            });
        }
        if options.show_loop_toggle {
            controls.push(ControlButton {
                action: ControlAction::ToggleLoop,
                label: if state.loop_playback { "Loop: On" } else { "Loop: Off" },
            });
        }
        if options.show_mute_toggle {
            controls.push(ControlButton {
                action: ControlAction::ToggleMute,
                label: if state.muted { "Unmute" } else { "Mute" },
            });
        }

        let seek_value = if state.seeking {
            state.seek_target.unwrap_or(state.played)
        } else {
            state.played
        };

        Self {
            source_id: state.source_id.clone(),
            load_state: controller.load_state(),
            error_message: controller.has_error().then_some(INVALID_SOURCE_MESSAGE),
            view_count: controller.view_count(),
            controls,
            seek_value: seek_value.min(SEEK_MAX),
            seek_max: SEEK_MAX,
            volume: state.volume,
            played: state.played,
            loaded: state.loaded,
            duration: format_seconds(state.duration_seconds),
            elapsed: format_seconds(state.elapsed_seconds()),
            remaining: format_seconds(state.remaining_seconds()),
            picture_in_picture: state.picture_in_picture,
            fullscreen: state.fullscreen,
        }
    }

    pub fn control_labels(&self) -> Vec<&'static str> {
        self.controls.iter().map(|c| c.label).collect()
    }
}
