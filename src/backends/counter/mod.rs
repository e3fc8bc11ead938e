mod api;

#[cfg(test)]
mod tests;

pub use api::CounterApi;

use async_trait::async_trait;

use super::traits::{Visualization, VisualizationApi};
use crate::utils::AppError;

#[async_trait]
impl VisualizationApi for CounterApi {
    async fn fetch_visualization(&self, key: &str) -> Result<Visualization, AppError> {
        self.get_visualization(key).await
    }

    async fn add_visualization(&self, id: &str) -> Result<String, AppError> {
        self.post_visualization(id).await
    }
}
