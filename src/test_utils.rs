#![cfg(test)]

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::backends::{Visualization, VisualizationApi};
use crate::player::{MediaCapability, PlayerConfig};
use crate::utils::AppError;

/// In-memory counter service that records every call
#[derive(Default)]
pub struct MockVisualizationApi {
    records: HashMap<String, Visualization>,
    fail_increments: bool,
    fetches: Mutex<Vec<String>>,
    increments: Mutex<Vec<String>>,
}

impl MockVisualizationApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, key: &str, id: &str, count: u64) -> Self {
        self.records.insert(
            key.to_string(),
            Visualization {
                id: id.to_string(),
                count,
            },
        );
        self
    }

    pub fn failing_increments(mut self) -> Self {
        self.fail_increments = true;
        self
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn increments(&self) -> Vec<String> {
        self.increments.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisualizationApi for MockVisualizationApi {
    async fn fetch_visualization(&self, key: &str) -> Result<Visualization, AppError> {
        self.fetches.lock().unwrap().push(key.to_string());
        self.records
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::Network(format!("no record for {}", key)))
    }

    async fn add_visualization(&self, id: &str) -> Result<String, AppError> {
        self.increments.lock().unwrap().push(id.to_string());
        if self.fail_increments {
            Err(AppError::Network("counter unavailable".to_string()))
        } else {
            Ok("Visualization added".to_string())
        }
    }
}

/// What the controller asked the embedded player to do
#[derive(Debug, Default)]
pub struct CapabilityLog {
    pub configs: Vec<PlayerConfig>,
    pub seeks: Vec<f64>,
    pub fullscreen_requests: usize,
}

/// Embedded player stand-in; the log is shared so tests can inspect it after
/// the controller takes ownership.
#[derive(Clone, Default)]
pub struct MockCapability {
    pub log: Arc<Mutex<CapabilityLog>>,
    pub deny_fullscreen: bool,
}

impl MockCapability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.log.lock().unwrap().seeks.clone()
    }

    pub fn last_config(&self) -> Option<PlayerConfig> {
        self.log.lock().unwrap().configs.last().cloned()
    }
}

impl MediaCapability for MockCapability {
    fn configure(&mut self, config: &PlayerConfig) {
        self.log.lock().unwrap().configs.push(config.clone());
    }

    fn seek_to(&mut self, fraction: f64) {
        self.log.lock().unwrap().seeks.push(fraction);
    }

    fn request_fullscreen(&mut self) -> Result<()> {
        self.log.lock().unwrap().fullscreen_requests += 1;
        if self.deny_fullscreen {
            anyhow::bail!("fullscreen not allowed");
        }
        Ok(())
    }
}
