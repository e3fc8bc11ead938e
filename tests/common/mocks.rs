use anyhow::Result;
use ledge::player::{MediaCapability, PlayerConfig};
use std::sync::{Arc, Mutex};

/// Embedded player stand-in that remembers every instruction it received
#[derive(Clone, Default)]
pub struct RecordingCapability {
    configs: Arc<Mutex<Vec<PlayerConfig>>>,
    seeks: Arc<Mutex<Vec<f64>>>,
}

impl RecordingCapability {
    pub fn last_config(&self) -> Option<PlayerConfig> {
        self.configs.lock().unwrap().last().cloned()
    }

    pub fn config_count(&self) -> usize {
        self.configs.lock().unwrap().len()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.seeks.lock().unwrap().clone()
    }
}

impl MediaCapability for RecordingCapability {
    fn configure(&mut self, config: &PlayerConfig) {
        self.configs.lock().unwrap().push(config.clone());
    }

    fn seek_to(&mut self, fraction: f64) {
        self.seeks.lock().unwrap().push(fraction);
    }

    fn request_fullscreen(&mut self) -> Result<()> {
        Ok(())
    }
}
