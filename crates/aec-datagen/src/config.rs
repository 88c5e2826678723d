//! Configuration types for dataset generation.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::catalogue::{self, CatalogueError, TypeCatalogue};
use crate::error::GenerationError;
use crate::output::OutputFormat;

/// Built-in catalogue to generate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CataloguePreset {
    /// Eight plural collections and four relationship categories.
    #[default]
    Standard,
    /// Large-scale workload tags and six relationship categories.
    Revit,
}

impl CataloguePreset {
    pub fn load(&self) -> Result<TypeCatalogue, CatalogueError> {
        match self {
            CataloguePreset::Standard => catalogue::standard(),
            CataloguePreset::Revit => catalogue::revit_workload(),
        }
    }
}

/// Named multi-tenant workloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Workload {
    /// The 50-tenant production distribution.
    Production,
}

/// Settings for one generation run.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Requested assets per model (or per tenant for uniform tenant runs).
    pub assets: usize,
    /// Requested relationship draws per model.
    pub relationships: usize,
    pub output_dir: PathBuf,
    /// Defaults to `model-YYYYMMDD-HHMMSS` from the run timestamp.
    pub model_id: Option<String>,
    /// Random seed; a random one is chosen and logged when absent.
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub catalogue: CataloguePreset,
    /// Adds the variable-size property bag to every asset. Unset means off
    /// for single models and on for tenant runs.
    pub long_tail_properties: Option<bool>,
    /// Runs this many tenants of `assets` each.
    pub tenants: Option<usize>,
    /// Uses a named tenant manifest; takes precedence over `tenants`.
    pub workload: Option<Workload>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            assets: 10_000,
            relationships: 2_000,
            output_dir: PathBuf::from("aec_output"),
            model_id: None,
            seed: None,
            format: OutputFormat::Json,
            catalogue: CataloguePreset::Standard,
            long_tail_properties: None,
            tenants: None,
            workload: None,
        }
    }
}

impl GenerationConfig {
    /// Reads a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, GenerationError> {
        let text = std::fs::read_to_string(path).map_err(|e| GenerationError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| GenerationError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether assets carry the long-tail property bag in this kind of run.
    pub fn long_tail_for(&self, tenant_run: bool) -> bool {
        self.long_tail_properties.unwrap_or(tenant_run)
    }

    /// The tenant manifest this config asks for, if it is a tenant run.
    pub fn tenant_manifest(&self) -> Result<Option<TenantManifest>, GenerationError> {
        match (self.workload, self.tenants) {
            (Some(Workload::Production), _) => Ok(Some(TenantManifest::production_workload())),
            (None, Some(0)) => Err(GenerationError::NoTenants),
            (None, Some(n)) => Ok(Some(TenantManifest::uniform(
                n,
                self.assets,
                self.relationships,
            ))),
            (None, None) => Ok(None),
        }
    }
}

/// Size class of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantTier {
    Small,
    Medium,
    Large,
    Enterprise,
    /// Tenants of a uniform split.
    Standard,
}

impl TenantTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantTier::Small => "small",
            TenantTier::Medium => "medium",
            TenantTier::Large => "large",
            TenantTier::Enterprise => "enterprise",
            TenantTier::Standard => "standard",
        }
    }
}

impl fmt::Display for TenantTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSpec {
    pub tenant_id: String,
    pub tier: TenantTier,
    pub asset_count: usize,
    pub relationship_count: usize,
}

impl TenantSpec {
    fn numbered(number: usize, tier: TenantTier, assets: usize, relationships: usize) -> Self {
        Self {
            tenant_id: format!("tenant_{number:04}"),
            tier,
            asset_count: assets,
            relationship_count: relationships,
        }
    }
}

/// Ordered list of tenants for a multi-tenant run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantManifest {
    pub tenants: Vec<TenantSpec>,
}

impl TenantManifest {
    /// 35 small, 12 medium, 2 large and 1 enterprise tenant; three
    /// relationships per asset.
    pub fn production_workload() -> Self {
        let tiers = [
            (35, TenantTier::Small, 17_000, 51_000),
            (12, TenantTier::Medium, 27_616, 82_848),
            (2, TenantTier::Large, 130_200, 390_600),
            (1, TenantTier::Enterprise, 15_900, 47_700),
        ];

        let mut tenants = Vec::with_capacity(50);
        for (count, tier, assets, relationships) in tiers {
            for _ in 0..count {
                let number = tenants.len() + 1;
                tenants.push(TenantSpec::numbered(number, tier, assets, relationships));
            }
        }
        Self { tenants }
    }

    /// `count` identical tenants numbered from `tenant_0001`.
    pub fn uniform(count: usize, assets: usize, relationships: usize) -> Self {
        Self {
            tenants: (1..=count)
                .map(|n| TenantSpec::numbered(n, TenantTier::Standard, assets, relationships))
                .collect(),
        }
    }

    pub fn total_assets(&self) -> usize {
        self.tenants.iter().map(|t| t.asset_count).sum()
    }

    pub fn total_relationships(&self) -> usize {
        self.tenants.iter().map(|t| t.relationship_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_production_workload_shape() {
        let manifest = TenantManifest::production_workload();
        assert_eq!(manifest.tenants.len(), 50);
        assert_eq!(manifest.tenants[0].tenant_id, "tenant_0001");
        assert_eq!(manifest.tenants[35].tier, TenantTier::Medium);
        assert_eq!(manifest.tenants[35].tenant_id, "tenant_0036");

        let last = manifest.tenants.last().unwrap();
        assert_eq!(last.tenant_id, "tenant_0050");
        assert_eq!(last.tier, TenantTier::Enterprise);
        assert_eq!(last.asset_count, 15_900);

        assert_eq!(manifest.total_assets(), 1_202_692);
        assert_eq!(manifest.total_relationships(), 3 * manifest.total_assets());
    }

    #[test]
    fn test_uniform_manifest() {
        let manifest = TenantManifest::uniform(3, 100, 30);
        let ids: Vec<&str> = manifest.tenants.iter().map(|t| t.tenant_id.as_str()).collect();
        assert_eq!(ids, ["tenant_0001", "tenant_0002", "tenant_0003"]);
        assert_eq!(manifest.total_assets(), 300);
    }

    #[test]
    fn test_tenant_manifest_selection() {
        let mut config = GenerationConfig::default();
        assert_eq!(config.tenant_manifest().unwrap(), None);

        config.tenants = Some(0);
        assert!(matches!(
            config.tenant_manifest(),
            Err(GenerationError::NoTenants)
        ));

        config.tenants = Some(2);
        let manifest = config.tenant_manifest().unwrap().unwrap();
        assert_eq!(manifest.tenants.len(), 2);
        // Every tenant gets the full asset count, not a share of it.
        assert!(manifest.tenants.iter().all(|t| t.asset_count == config.assets));
        assert_eq!(manifest.total_assets(), 2 * config.assets);

        config.workload = Some(Workload::Production);
        assert_eq!(config.tenant_manifest().unwrap().unwrap().tenants.len(), 50);
    }

    #[test]
    fn test_partial_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"assets": 500, "format": "jsonl", "catalogue": "revit", "longTailProperties": true}}"#
        )
        .unwrap();

        let config = GenerationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.assets, 500);
        assert_eq!(config.relationships, 2_000);
        assert_eq!(config.format, OutputFormat::Jsonl);
        assert_eq!(config.catalogue, CataloguePreset::Revit);
        assert_eq!(config.long_tail_properties, Some(true));
        assert_eq!(config.output_dir, PathBuf::from("aec_output"));
    }

    #[test]
    fn test_long_tail_defaults_by_run_kind() {
        let mut config = GenerationConfig::default();
        assert!(!config.long_tail_for(false));
        assert!(config.long_tail_for(true));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tenants": 3, "longTailProperties": false}}"#).unwrap();
        config = GenerationConfig::from_file(file.path()).unwrap();
        assert!(!config.long_tail_for(true));

        config.long_tail_properties = Some(true);
        assert!(config.long_tail_for(false));
    }

    #[test]
    fn test_bad_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"assets\": \"many\"}}").unwrap();
        assert!(matches!(
            GenerationConfig::from_file(file.path()),
            Err(GenerationError::Config { .. })
        ));
    }
}
