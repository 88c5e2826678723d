//! Multi-tenant runs: one independent model per tenant directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use super::model::{ModelBuilder, default_model_id};
use super::{create_dir, write_pretty};
use crate::allocation::allocate;
use crate::catalogue::TypeCatalogue;
use crate::config::{TenantManifest, TenantTier};
use crate::error::GenerationError;
use crate::output::OutputFormat;

/// File name of the run-level tenant manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Per-tenant entry of the run manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRecord {
    pub tenant_id: String,
    pub tier: TenantTier,
    /// Relative to the run directory.
    pub directory: String,
    pub seed: u64,
    pub requested_assets: usize,
    pub requested_relationships: usize,
    pub total_assets: usize,
    pub total_relationships: usize,
    pub model_size: String,
}

/// Root `manifest.json` of a multi-tenant run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunManifest {
    pub model_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub base_seed: u64,
    pub output_format: OutputFormat,
    pub total_assets: usize,
    pub total_relationships: usize,
    pub tenants: Vec<TenantRecord>,
}

/// Writes every tenant of a manifest into its own `tenant_NNNN/` directory.
///
/// Tenants share the catalogue, model id and timestamp but nothing else:
/// tenant `i` (zero-based) draws from its own `StdRng` seeded with
/// `base_seed + i`, so any tenant can be regenerated alone.
pub struct TenantShardWriter {
    catalogue: TypeCatalogue,
    manifest: TenantManifest,
    base_seed: u64,
    model_id: Option<String>,
    generated_at: Option<OffsetDateTime>,
    format: OutputFormat,
    long_tail: bool,
}

impl TenantShardWriter {
    /// Long-tail property bags are on by default, as in the production
    /// workload.
    pub fn new(catalogue: TypeCatalogue, manifest: TenantManifest, base_seed: u64) -> Self {
        Self {
            catalogue,
            manifest,
            base_seed,
            model_id: None,
            generated_at: None,
            format: OutputFormat::Json,
            long_tail: true,
        }
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_generated_at(mut self, at: OffsetDateTime) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_long_tail_properties(mut self, enabled: bool) -> Self {
        self.long_tail = enabled;
        self
    }

    /// Seed of the tenant at `index` in the manifest.
    pub fn tenant_seed(&self, index: usize) -> u64 {
        self.base_seed.wrapping_add(index as u64)
    }

    /// Rejects an empty manifest, duplicate tenant ids and any tenant whose
    /// allocation would overrun an element-id range.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.manifest.tenants.is_empty() {
            return Err(GenerationError::NoTenants);
        }

        let mut seen = HashSet::new();
        for tenant in &self.manifest.tenants {
            if !seen.insert(tenant.tenant_id.as_str()) {
                return Err(GenerationError::DuplicateTenant(tenant.tenant_id.clone()));
            }
            let allocation = allocate(tenant.asset_count, &self.catalogue.weights());
            self.catalogue.check_element_id_capacity(&allocation)?;
        }
        Ok(())
    }

    /// Generates every tenant under `dir`, then writes the run manifest.
    pub fn write_to(&self, dir: &Path) -> Result<RunManifest, GenerationError> {
        self.validate()?;
        create_dir(dir)?;

        let generated_at = self.generated_at.unwrap_or_else(OffsetDateTime::now_utc);
        let model_id = match &self.model_id {
            Some(id) => id.clone(),
            None => default_model_id(generated_at)?,
        };

        let tenant_count = self.manifest.tenants.len();
        info!(
            "Generating {} tenants ({} assets, {} relationship draws) into {}",
            tenant_count,
            self.manifest.total_assets(),
            self.manifest.total_relationships(),
            dir.display()
        );

        let mut records = Vec::with_capacity(tenant_count);
        for (index, tenant) in self.manifest.tenants.iter().enumerate() {
            info!(
                "[{}/{}] {} ({}): {} assets, {} relationships",
                index + 1,
                tenant_count,
                tenant.tenant_id,
                tenant.tier,
                tenant.asset_count,
                tenant.relationship_count
            );

            let seed = self.tenant_seed(index);
            let mut rng = StdRng::seed_from_u64(seed);
            let tenant_dir: PathBuf = dir.join(&tenant.tenant_id);

            let written = ModelBuilder::new(self.catalogue.clone())
                .with_tenant(tenant.tenant_id.as_str())
                .with_model_id(model_id.as_str())
                .with_generated_at(generated_at)
                .with_assets(tenant.asset_count)
                .with_relationships(tenant.relationship_count)
                .with_long_tail_properties(self.long_tail)
                .with_format(self.format)
                .with_seed(seed)
                .write_to(&tenant_dir, &mut rng)?;

            let info = &written.summary.generation_info;
            records.push(TenantRecord {
                tenant_id: tenant.tenant_id.clone(),
                tier: tenant.tier,
                directory: tenant.tenant_id.clone(),
                seed,
                requested_assets: tenant.asset_count,
                requested_relationships: tenant.relationship_count,
                total_assets: info.total_assets,
                total_relationships: info.total_relationships,
                model_size: written.summary.model_statistics.model_size.clone(),
            });
        }

        let manifest = RunManifest {
            model_id,
            generated_at,
            base_seed: self.base_seed,
            output_format: self.format,
            total_assets: records.iter().map(|r| r.total_assets).sum(),
            total_relationships: records.iter().map(|r| r.total_relationships).sum(),
            tenants: records,
        };
        write_pretty(&dir.join(MANIFEST_FILE), &manifest)?;

        info!(
            "Generated {} tenants: {} assets, {} relationships",
            tenant_count, manifest.total_assets, manifest.total_relationships
        );
        Ok(manifest)
    }
}
