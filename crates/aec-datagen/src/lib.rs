//! Synthetic dataset generation for AEC object models.
//!
//! This crate generates large, internally consistent models of building
//! elements (walls, doors, rooms, MEP components, ...) and the typed
//! relationships between them, in the compound-key document form a bulk
//! loader consumes.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use aec_datagen::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let written = ModelBuilder::new(catalogue::standard()?)
//!     .with_assets(10_000)
//!     .with_relationships(2_000)
//!     .with_seed(42)
//!     .write_to(Path::new("aec_output"), &mut rng)?;
//!
//! println!("{}", written.summary.model_statistics.model_size);
//! ```

pub mod allocation;
pub mod builders;
pub mod catalogue;
pub mod config;
pub mod context;
pub mod error;
pub mod generators;
pub mod ids;
pub mod output;
pub mod summary;

// Re-export the document model
pub use aec_model::models;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::allocation::{Allocation, allocate};
    pub use crate::builders::{
        GeneratedModel, GenerationMetrics, ModelBuilder, RunManifest, TenantShardWriter,
        WrittenModel,
    };
    pub use crate::catalogue::{self, CatalogueError, TypeCatalogue};
    pub use crate::config::{
        CataloguePreset, GenerationConfig, TenantManifest, TenantSpec, TenantTier, Workload,
    };
    pub use crate::context::GenerationContext;
    pub use crate::error::GenerationError;
    pub use crate::generators::{AssetFactory, RelationshipSampler};
    pub use crate::ids::{IdAllocator, IdPool, IdPools};
    pub use crate::output::{CollectionWriter, OutputFormat, read_collection};
    pub use crate::summary::SummaryAccumulator;
    pub use aec_model::models::{
        Asset, ModelSummary, Relationship, StoredAsset, StoredRelationship,
    };
    pub use rand::rngs::StdRng;
    pub use std::path::Path;
}
