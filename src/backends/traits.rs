use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::AppError;

/// A view-count record as stored by the counter service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    #[serde(deserialize_with = "deserialize_record_id")]
    pub id: String,
    #[serde(default)]
    pub count: u64,
}

#[async_trait]
pub trait VisualizationApi: Send + Sync {
    /// Read the record for a normalized source key
    async fn fetch_visualization(&self, key: &str) -> Result<Visualization, AppError>;

    /// Increment the record, returning the server's acknowledgement message
    async fn add_visualization(&self, id: &str) -> Result<String, AppError>;
}

// Record ids come back as strings or integers depending on the store behind the service
fn deserialize_record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RecordId {
        Text(String),
        Number(i64),
    }

    Ok(match RecordId::deserialize(deserializer)? {
        RecordId::Text(id) => id,
        RecordId::Number(id) => id.to_string(),
    })
}
