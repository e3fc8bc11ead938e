pub mod fixtures;
pub mod mocks;

use ledge::backends::CounterApi;
use ledge::config::PlayerOptions;
use ledge::player::PlayerController;
use mockito::ServerGuard;
use std::sync::Arc;
use std::time::Duration;

pub use mocks::RecordingCapability;

/// A controller wired to a real HTTP client pointed at a mock counter service
pub struct TestContext {
    pub server: ServerGuard,
    pub controller: PlayerController,
    pub capability: RecordingCapability,
}

impl TestContext {
    pub async fn new(default_source: &str) -> Self {
        let server = mockito::Server::new_async().await;
        let api = Arc::new(CounterApi::new(&server.url(), Duration::from_secs(5)));
        let capability = RecordingCapability::default();
        let options = PlayerOptions {
            default_source: default_source.to_string(),
            ..Default::default()
        };
        let controller =
            PlayerController::with_options(Box::new(capability.clone()), api, options, 0.6);

        Self {
            server,
            controller,
            capability,
        }
    }
}
