use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Size statistics over the stored asset documents of one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatistics {
    pub total_entities: usize,
    /// Human-readable total, e.g. `"12.40MB"`.
    pub model_size: String,
    /// Human-readable mean document size, e.g. `"1.27KB"`.
    pub average_asset_size: String,
    pub total_size_bytes: u64,
    pub batch_count: usize,
    pub entities_per_batch: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInfo {
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub generator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub total_assets: usize,
    pub total_relationships: usize,
    pub requested_assets: usize,
    pub requested_relationships: usize,
    pub output_format: String,
}

/// The model (or tenant) document written next to the collections.
///
/// Derived entirely from the generated assets and relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub batch_id: String,
    pub description: String,
    pub model_statistics: ModelStatistics,
    /// Asset count per type tag, in catalogue order.
    pub entity_distribution: IndexMap<String, usize>,
    /// Relationship count per category, in catalogue order.
    pub relationship_distribution: IndexMap<String, usize>,
    pub generation_info: GenerationInfo,
}
