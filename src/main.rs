use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ledge::backends::CounterApi;
use ledge::config::Config;
use ledge::core::PlayerViewModel;
use ledge::player::{MediaCapability, PlayerConfig, PlayerController, PlayerEvent};

const USAGE: &str = "Usage: ledge [--watch] [URL]

Shows the view count for URL (or the configured default source).
With --watch, plays the source through headlessly, recording a view.";

/// Stand-in for an embedded player when running without a UI
struct HeadlessCapability;

impl MediaCapability for HeadlessCapability {
    fn configure(&mut self, config: &PlayerConfig) {
        debug!("Player configured: {:?}", config);
    }

    fn seek_to(&mut self, fraction: f64) {
        debug!("Player seek to {}", fraction);
    }

    fn request_fullscreen(&mut self) -> Result<()> {
        anyhow::bail!("Fullscreen is not available without a display")
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut watch = false;
    let mut source = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--watch" => watch = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => source = Some(arg),
        }
    }

    let mut config = Config::load()?;
    if let Some(source) = source {
        config.player.default_source = source;
    }

    // Initialize tracing
    let default_filter = if config.player.verbose_logging {
        "ledge=debug"
    } else {
        "ledge=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("Starting Ledge player");

    let api = Arc::new(CounterApi::from_config(&config.counter));
    let mut controller = PlayerController::new(Box::new(HeadlessCapability), api, &config);
    controller.mount();
    controller.flush().await;

    if watch {
        controller.handle_event(PlayerEvent::Ready);
        for step in 1..=10 {
            let played = step as f64 / 10.0;
            controller.handle_event(PlayerEvent::Progress {
                played,
                loaded: 1.0,
            });
        }
        controller.handle_event(PlayerEvent::Ended);
        controller.flush().await;
    }

    let view = PlayerViewModel::from_controller(&controller);
    println!(
        "{} ({}): {} views",
        view.source_id,
        controller.view_record().key,
        view.view_count
    );

    Ok(())
}
