pub mod controller;
pub mod session;
pub mod traits;
pub mod types;
pub use controller::PlayerController;
pub use session::SessionState;
pub use traits::MediaCapability;
pub use types::{ControlAction, LoadState, PlayerConfig, PlayerEvent};
