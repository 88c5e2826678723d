//! Fluent builder for generating one model.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::Rng;
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::info;

use aec_model::models::{ModelSummary, StoredAsset, StoredRelationship};

use super::{create_dir, create_file, write_pretty};
use crate::allocation::{Allocation, allocate};
use crate::catalogue::TypeCatalogue;
use crate::context::GenerationContext;
use crate::error::GenerationError;
use crate::generators::{AssetFactory, RelationshipSampler};
use crate::output::{CollectionWriter, OutputError, OutputFormat};
use crate::summary::{SummaryAccumulator, SummaryRequest};

/// File name of the model summary document.
pub const SUMMARY_FILE: &str = "model.json";

/// `model-YYYYMMDD-HHMMSS` for the given timestamp.
pub fn default_model_id(at: OffsetDateTime) -> Result<String, GenerationError> {
    let stamp = at.format(format_description!(
        "[year][month][day]-[hour][minute][second]"
    ))?;
    Ok(format!("model-{stamp}"))
}

/// Result of [`ModelBuilder::build_data`].
#[derive(Debug)]
pub struct GeneratedModel {
    pub allocation: Allocation,
    pub assets: Vec<StoredAsset>,
    pub relationships: Vec<StoredRelationship>,
    pub summary: ModelSummary,
    /// Populated if metrics tracking is enabled.
    pub metrics: Option<GenerationMetrics>,
}

/// Result of [`ModelBuilder::write_to`].
#[derive(Debug)]
pub struct WrittenModel {
    pub summary: ModelSummary,
    pub assets_file: PathBuf,
    pub relationships_file: PathBuf,
    pub summary_file: PathBuf,
    /// Populated if metrics tracking is enabled.
    pub metrics: Option<GenerationMetrics>,
}

/// Performance metrics from one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationMetrics {
    /// Wall time from planning to the last document (milliseconds).
    pub generation_time_ms: u64,
    pub asset_count: usize,
    pub relationship_count: usize,
    /// Relationship draws that found an empty endpoint pool.
    pub skipped_draws: usize,
    /// Bytes written across both collection files (0 if `build_data` used).
    pub bytes_written: u64,
}

/// Allocation and context resolved for one run.
struct Plan {
    allocation: Allocation,
    ctx: GenerationContext,
}

/// Builder for generating a single model (or one tenant's model).
///
/// # Example
///
/// ```rust,ignore
/// let written = ModelBuilder::new(catalogue::standard()?)
///     .with_assets(10_000)
///     .with_relationships(2_000)
///     .with_format(OutputFormat::Jsonl)
///     .with_seed(42)
///     .write_to(Path::new("aec_output"), &mut StdRng::seed_from_u64(42))?;
/// ```
pub struct ModelBuilder {
    catalogue: TypeCatalogue,
    factory: AssetFactory,

    asset_count: usize,
    relationship_count: usize,

    model_id: Option<String>,
    tenant_id: Option<String>,
    long_tail: bool,
    generated_at: Option<OffsetDateTime>,

    seed: Option<u64>,
    format: OutputFormat,
    track_metrics: bool,
}

impl ModelBuilder {
    /// Creates a builder over `catalogue` with the default run sizes.
    pub fn new(catalogue: TypeCatalogue) -> Self {
        Self {
            catalogue,
            factory: AssetFactory::default(),
            asset_count: 10_000,
            relationship_count: 2_000,
            model_id: None,
            tenant_id: None,
            long_tail: false,
            generated_at: None,
            seed: None,
            format: OutputFormat::Json,
            track_metrics: false,
        }
    }

    /// Sets the requested total asset count.
    pub fn with_assets(mut self, count: usize) -> Self {
        self.asset_count = count;
        self
    }

    /// Sets the number of relationship draws.
    pub fn with_relationships(mut self, count: usize) -> Self {
        self.relationship_count = count;
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Generates in tenant mode: tenant-wide ids, shard keys and versioning.
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_long_tail_properties(mut self, enabled: bool) -> Self {
        self.long_tail = enabled;
        self
    }

    /// Fixes the run timestamp instead of reading the clock.
    pub fn with_generated_at(mut self, at: OffsetDateTime) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Records the seed of the caller's random source in the summary.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_asset_factory(mut self, factory: AssetFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Enables metrics tracking for performance analysis.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    pub fn catalogue(&self) -> &TypeCatalogue {
        &self.catalogue
    }

    /// Allocates the asset total and checks it fits the element-id ranges.
    pub fn allocation(&self) -> Result<Allocation, GenerationError> {
        let allocation = allocate(self.asset_count, &self.catalogue.weights());
        self.catalogue.check_element_id_capacity(&allocation)?;
        Ok(allocation)
    }

    fn plan(&self) -> Result<Plan, GenerationError> {
        let allocation = self.allocation()?;
        let generated_at = self.generated_at.unwrap_or_else(OffsetDateTime::now_utc);
        let model_id = match &self.model_id {
            Some(id) => id.clone(),
            None => default_model_id(generated_at)?,
        };

        let ctx = match &self.tenant_id {
            Some(tenant_id) => GenerationContext::tenant(model_id, tenant_id.as_str(), generated_at),
            None => GenerationContext::model(model_id, generated_at),
        }
        .with_long_tail(self.long_tail);

        Ok(Plan { allocation, ctx })
    }

    fn summary_request<'a>(&'a self, ctx: &'a GenerationContext) -> SummaryRequest<'a> {
        SummaryRequest {
            model_id: &ctx.model_id,
            tenant_id: ctx.tenant_id.as_deref(),
            generated_at: ctx.generated_at,
            seed: self.seed,
            requested_assets: self.asset_count,
            requested_relationships: self.relationship_count,
            output_format: self.format.as_str(),
        }
    }

    /// Generates the model in memory without writing anything.
    pub fn build_data(&self, rng: &mut impl Rng) -> Result<GeneratedModel, GenerationError> {
        let start_time = self.track_metrics.then(Instant::now);
        let Plan { allocation, ctx } = self.plan()?;
        let mut summary = SummaryAccumulator::new(&self.catalogue);

        let mut assets = Vec::with_capacity(allocation.total());
        let mut stream = self
            .factory
            .stream(&self.catalogue, &allocation, &ctx, &mut *rng);
        while let Some((tag, asset)) = stream.next_tagged() {
            let stored = StoredAsset::from(asset);
            let size = serde_json::to_vec(&stored).map_err(OutputError::from)?.len();
            summary.record_asset(tag, size);
            assets.push(stored);
        }

        let pools = ctx.ids.pools(&self.catalogue, &allocation);
        let sampler = RelationshipSampler::new(self.catalogue.relationship_categories());
        let mut draws = sampler.draws(self.relationship_count, &ctx, &pools, &mut *rng);
        let mut relationships = Vec::new();
        for relationship in draws.by_ref() {
            summary.record_relationship(relationship.category());
            relationships.push(StoredRelationship::from(relationship));
        }
        let skipped_draws = draws.skipped();

        let metrics = start_time.map(|start| GenerationMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            asset_count: assets.len(),
            relationship_count: relationships.len(),
            skipped_draws,
            bytes_written: 0,
        });

        let summary = summary.finish(self.summary_request(&ctx));
        Ok(GeneratedModel {
            allocation,
            assets,
            relationships,
            summary,
            metrics,
        })
    }

    /// Streams the model into `dir`: the asset collection, the relationship
    /// collection, then the summary document.
    ///
    /// Each document is serialized and dropped as it is produced, so memory
    /// use does not depend on the model size.
    pub fn write_to(&self, dir: &Path, rng: &mut impl Rng) -> Result<WrittenModel, GenerationError> {
        let start_time = self.track_metrics.then(Instant::now);
        let Plan { allocation, ctx } = self.plan()?;
        create_dir(dir)?;

        info!(
            "Generating model {} ({} assets, {} relationship draws) into {}",
            ctx.model_id,
            allocation.total(),
            self.relationship_count,
            dir.display()
        );

        let mut summary = SummaryAccumulator::new(&self.catalogue);

        let assets_file = dir.join(self.format.file_name("assets"));
        let mut writer = CollectionWriter::new(create_file(&assets_file)?, self.format)?;
        let mut stream = self
            .factory
            .stream(&self.catalogue, &allocation, &ctx, &mut *rng);
        while let Some((tag, asset)) = stream.next_tagged() {
            let size = writer.push(&StoredAsset::from(asset))?;
            summary.record_asset(tag, size);
        }
        let asset_bytes = writer.finish()?;
        info!(
            "Wrote {} assets to {}",
            summary.total_assets(),
            assets_file.display()
        );

        let pools = ctx.ids.pools(&self.catalogue, &allocation);
        let sampler = RelationshipSampler::new(self.catalogue.relationship_categories());
        let relationships_file = dir.join(self.format.file_name("relationships"));
        let mut writer = CollectionWriter::new(create_file(&relationships_file)?, self.format)?;
        let mut draws = sampler.draws(self.relationship_count, &ctx, &pools, &mut *rng);
        for relationship in draws.by_ref() {
            summary.record_relationship(relationship.category());
            writer.push(&StoredRelationship::from(relationship))?;
        }
        let skipped_draws = draws.skipped();
        let relationship_bytes = writer.finish()?;
        info!(
            "Wrote {} relationships to {} ({} draws skipped)",
            summary.total_relationships(),
            relationships_file.display(),
            skipped_draws
        );

        let metrics = start_time.map(|start| GenerationMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            asset_count: summary.total_assets(),
            relationship_count: summary.total_relationships(),
            skipped_draws,
            bytes_written: asset_bytes + relationship_bytes,
        });

        let summary = summary.finish(self.summary_request(&ctx));
        let summary_file = dir.join(SUMMARY_FILE);
        write_pretty(&summary_file, &summary)?;
        info!(
            "Model {}: {} ({} average per asset)",
            summary.model_id,
            summary.model_statistics.model_size,
            summary.model_statistics.average_asset_size
        );

        Ok(WrittenModel {
            summary,
            assets_file,
            relationships_file,
            summary_file,
            metrics,
        })
    }

    // =========================================================================
    // Preset Runs
    // =========================================================================

    /// A small model for quick checks: 100 assets and 50 relationship draws.
    pub fn smoke_test(catalogue: TypeCatalogue) -> Self {
        Self::new(catalogue)
            .with_assets(100)
            .with_relationships(50)
    }

    /// One tenant of a large-scale workload: tenant ids, long-tail property
    /// bags and JSON Lines output.
    pub fn tenant_workload(catalogue: TypeCatalogue, tenant_id: impl Into<String>) -> Self {
        Self::new(catalogue)
            .with_tenant(tenant_id)
            .with_long_tail_properties(true)
            .with_format(OutputFormat::Jsonl)
    }
}
