pub mod viewmodels;

pub use viewmodels::PlayerViewModel;
