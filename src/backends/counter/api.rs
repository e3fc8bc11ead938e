use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::backends::traits::Visualization;
use crate::config::CounterConfig;
use crate::constants::VISUALIZATION_PATH;
use crate::utils::AppError;

/// HTTP client for the view counter service
#[derive(Debug, Clone)]
pub struct CounterApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct VisualizationResponse {
    visualization: Visualization,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

impl CounterApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &CounterConfig) -> Self {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn visualization_url(&self, segment: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AppError::Configuration(format!("Invalid counter URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Configuration(format!("Counter URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(VISUALIZATION_PATH)
            .push(segment);
        Ok(url)
    }

    pub async fn get_visualization(&self, key: &str) -> Result<Visualization, AppError> {
        let url = self.visualization_url(key)?;
        debug!("Fetching visualization from {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Visualization fetch failed with status {}: {}", status, body);
            return Err(AppError::Network(format!(
                "Failed to fetch visualization: {}",
                status
            )));
        }

        let body: VisualizationResponse = response.json().await?;
        Ok(body.visualization)
    }

    pub async fn post_visualization(&self, id: &str) -> Result<String, AppError> {
        let url = self.visualization_url(id)?;
        debug!("Adding visualization at {}", url);

        let response = self.client.post(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Visualization increment failed with status {}: {}", status, body);
            return Err(AppError::Network(format!(
                "Failed to add visualization: {}",
                status
            )));
        }

        let body: MessageResponse = response.json().await?;
        Ok(body.message)
    }
}
