//! Model summary derived from the generated collections.

use indexmap::IndexMap;
use time::OffsetDateTime;

use aec_model::models::{GenerationInfo, ModelStatistics, ModelSummary};

use crate::catalogue::TypeCatalogue;

/// Entities per import batch reported in the model statistics.
pub const ENTITIES_PER_BATCH: usize = 25;

pub const GENERATOR_NAME: &str = concat!("aec-datagen v", env!("CARGO_PKG_VERSION"));

/// Collects counts and sizes while documents stream past, then produces the
/// [`ModelSummary`].
#[derive(Debug, Clone)]
pub struct SummaryAccumulator {
    entity_distribution: IndexMap<String, usize>,
    relationship_distribution: IndexMap<String, usize>,
    total_assets: usize,
    total_relationships: usize,
    asset_bytes: u64,
}

impl SummaryAccumulator {
    /// Starts with a zero entry for every asset type and relationship category,
    /// so the distributions list them in catalogue order.
    pub fn new(catalogue: &TypeCatalogue) -> Self {
        Self {
            entity_distribution: catalogue
                .asset_types()
                .iter()
                .map(|t| (t.tag.clone(), 0))
                .collect(),
            relationship_distribution: catalogue
                .relationship_categories()
                .iter()
                .map(|c| (c.name.clone(), 0))
                .collect(),
            total_assets: 0,
            total_relationships: 0,
            asset_bytes: 0,
        }
    }

    /// Records one asset of type `tag` whose stored form is `size` bytes.
    pub fn record_asset(&mut self, tag: &str, size: usize) {
        *self.entity_distribution.entry(tag.to_string()).or_default() += 1;
        self.total_assets += 1;
        self.asset_bytes += size as u64;
    }

    pub fn record_relationship(&mut self, category: &str) {
        *self
            .relationship_distribution
            .entry(category.to_string())
            .or_default() += 1;
        self.total_relationships += 1;
    }

    pub fn total_assets(&self) -> usize {
        self.total_assets
    }

    pub fn total_relationships(&self) -> usize {
        self.total_relationships
    }

    pub fn statistics(&self) -> ModelStatistics {
        let average = if self.total_assets == 0 {
            0.0
        } else {
            self.asset_bytes as f64 / self.total_assets as f64
        };

        ModelStatistics {
            total_entities: self.total_assets,
            model_size: format!("{:.2}MB", self.asset_bytes as f64 / (1024.0 * 1024.0)),
            average_asset_size: format!("{:.2}KB", average / 1024.0),
            total_size_bytes: self.asset_bytes,
            batch_count: self.total_assets.div_ceil(ENTITIES_PER_BATCH),
            entities_per_batch: ENTITIES_PER_BATCH,
        }
    }

    pub fn finish(self, request: SummaryRequest<'_>) -> ModelSummary {
        let model_statistics = self.statistics();
        ModelSummary {
            model_id: request.model_id.to_string(),
            tenant_id: request.tenant_id.map(str::to_string),
            batch_id: format!("batch-aec-model-{}-entities", request.requested_assets),
            description: format!(
                "AEC Model with {} entities - Generated payload",
                request.requested_assets
            ),
            model_statistics,
            entity_distribution: self.entity_distribution,
            relationship_distribution: self.relationship_distribution,
            generation_info: GenerationInfo {
                generated_at: request.generated_at,
                generator: GENERATOR_NAME.to_string(),
                seed: request.seed,
                total_assets: self.total_assets,
                total_relationships: self.total_relationships,
                requested_assets: request.requested_assets,
                requested_relationships: request.requested_relationships,
                output_format: request.output_format.to_string(),
            },
        }
    }
}

/// Run parameters echoed into the summary.
#[derive(Debug, Clone, Copy)]
pub struct SummaryRequest<'a> {
    pub model_id: &'a str,
    pub tenant_id: Option<&'a str>,
    pub generated_at: OffsetDateTime,
    pub seed: Option<u64>,
    pub requested_assets: usize,
    pub requested_relationships: usize,
    pub output_format: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue;
    use time::macros::datetime;

    fn request() -> SummaryRequest<'static> {
        SummaryRequest {
            model_id: "model-1",
            tenant_id: None,
            generated_at: datetime!(2025-01-01 12:00 UTC),
            seed: Some(42),
            requested_assets: 60,
            requested_relationships: 10,
            output_format: "json",
        }
    }

    #[test]
    fn test_statistics_formatting() {
        let catalogue = catalogue::standard().unwrap();
        let mut acc = SummaryAccumulator::new(&catalogue);
        for _ in 0..51 {
            acc.record_asset("walls", 2048);
        }

        let stats = acc.statistics();
        assert_eq!(stats.total_entities, 51);
        assert_eq!(stats.batch_count, 3);
        assert_eq!(stats.entities_per_batch, 25);
        assert_eq!(stats.average_asset_size, "2.00KB");
        assert_eq!(stats.total_size_bytes, 51 * 2048);
        assert_eq!(stats.model_size, "0.10MB");
    }

    #[test]
    fn test_distribution_in_catalogue_order() {
        let catalogue = catalogue::standard().unwrap();
        let mut acc = SummaryAccumulator::new(&catalogue);
        acc.record_asset("fixtures", 100);
        acc.record_asset("walls", 100);
        acc.record_relationship("serves");

        let summary = acc.finish(request());
        let tags: Vec<&str> = summary.entity_distribution.keys().map(String::as_str).collect();
        assert_eq!(tags[0], "walls");
        assert_eq!(tags[7], "fixtures");
        assert_eq!(summary.entity_distribution["doors"], 0);
        assert_eq!(summary.relationship_distribution["serves"], 1);
        assert_eq!(summary.batch_id, "batch-aec-model-60-entities");
        assert_eq!(summary.generation_info.total_assets, 2);
        assert_eq!(summary.generation_info.seed, Some(42));
    }

    #[test]
    fn test_empty_model() {
        let catalogue = catalogue::standard().unwrap();
        let stats = SummaryAccumulator::new(&catalogue).statistics();
        assert_eq!(stats.batch_count, 0);
        assert_eq!(stats.average_asset_size, "0.00KB");
        assert_eq!(stats.model_size, "0.00MB");
    }
}
