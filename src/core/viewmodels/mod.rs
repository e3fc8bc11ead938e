pub mod player_view_model;

pub use player_view_model::{ControlButton, PlayerViewModel};
