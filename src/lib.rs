// Library entry shared by the CLI binary and integration tests

pub mod backends;
pub mod config;
pub mod constants;
pub mod core;
pub mod player;
pub mod utils;
pub mod workers;

#[cfg(test)]
mod test_utils;
