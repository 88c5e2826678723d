//! Generates a synthetic AEC dataset on disk.
//!
//! Run with:
//! ```
//! cargo run -p aec-datagen --bin aec-gen -- --assets 10000 --relationships 2000
//! cargo run -p aec-datagen --bin aec-gen -- --workload production --format jsonl
//! ```

use std::path::PathBuf;

use aec_datagen::builders::{ModelBuilder, TenantShardWriter};
use aec_datagen::config::{CataloguePreset, GenerationConfig, Workload};
use aec_datagen::output::OutputFormat;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

/// Synthetic AEC dataset generator
///
/// Options given on the command line override the config file.
#[derive(Parser)]
#[command(name = "aec-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file with any subset of the options below
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Total assets to generate (per tenant with --tenants) [default: 10000]
    #[arg(short, long)]
    assets: Option<usize>,

    /// Relationship draws to perform (per tenant with --tenants) [default: 2000]
    #[arg(short, long)]
    relationships: Option<usize>,

    /// Output directory [default: aec_output]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Model id [default: model-YYYYMMDD-HHMMSS]
    #[arg(short, long)]
    model_id: Option<String>,

    /// Random seed; a random one is chosen and logged when absent
    #[arg(short, long)]
    seed: Option<u64>,

    /// Collection file format: json (array) or jsonl (one document per line)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Asset and relationship catalogue
    #[arg(long, value_enum)]
    catalogue: Option<CataloguePreset>,

    /// Add the variable-size property bag to every asset
    /// [default: false, true with --tenants or --workload]
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    long_tail_properties: Option<bool>,

    /// Split the run into this many equally sized tenants
    #[arg(short, long)]
    tenants: Option<usize>,

    /// Generate a named multi-tenant workload
    #[arg(short, long, value_enum)]
    workload: Option<Workload>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_file(path)?,
            None => GenerationConfig::default(),
        };

        if let Some(assets) = self.assets {
            config.assets = assets;
        }
        if let Some(relationships) = self.relationships {
            config.relationships = relationships;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if self.model_id.is_some() {
            config.model_id = self.model_id;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(catalogue) = self.catalogue {
            config.catalogue = catalogue;
        }
        if self.long_tail_properties.is_some() {
            config.long_tail_properties = self.long_tail_properties;
        }
        if self.tenants.is_some() {
            config.tenants = self.tenants;
        }
        if self.workload.is_some() {
            config.workload = self.workload;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config()?;
    let catalogue = config.catalogue.load()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!("Using seed {}", seed);

    if let Some(manifest) = config.tenant_manifest()? {
        let mut writer = TenantShardWriter::new(catalogue, manifest, seed)
            .with_format(config.format)
            .with_long_tail_properties(config.long_tail_for(true));
        if let Some(model_id) = &config.model_id {
            writer = writer.with_model_id(model_id.as_str());
        }

        let run = writer.write_to(&config.output_dir)?;

        tracing::info!("Generation completed!");
        tracing::info!("  Tenants: {}", run.tenants.len());
        tracing::info!("  Assets: {}", run.total_assets);
        tracing::info!("  Relationships: {}", run.total_relationships);
        tracing::info!("  Output: {}", config.output_dir.display());
        return Ok(());
    }

    let mut builder = ModelBuilder::new(catalogue)
        .with_assets(config.assets)
        .with_relationships(config.relationships)
        .with_long_tail_properties(config.long_tail_for(false))
        .with_format(config.format)
        .with_seed(seed)
        .with_metrics(true);
    if let Some(model_id) = &config.model_id {
        builder = builder.with_model_id(model_id.as_str());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let written = builder.write_to(&config.output_dir, &mut rng)?;

    let stats = &written.summary.model_statistics;
    tracing::info!("Generation completed!");
    tracing::info!("  Model: {}", written.summary.model_id);
    tracing::info!("  Assets: {}", stats.total_entities);
    tracing::info!(
        "  Relationships: {}",
        written.summary.generation_info.total_relationships
    );
    tracing::info!("  Model size: {} ({} per asset)", stats.model_size, stats.average_asset_size);
    tracing::info!("  Batches: {} x {}", stats.batch_count, stats.entities_per_batch);
    if let Some(metrics) = &written.metrics {
        tracing::info!("  Time: {} ms", metrics.generation_time_ms);
    }
    tracing::info!("  Output: {}", config.output_dir.display());

    Ok(())
}
