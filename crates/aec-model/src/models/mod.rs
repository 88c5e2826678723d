//! Documents produced by the generator.
//!
//! - [`Asset`] / [`Relationship`]: generated documents with scalar identities
//! - [`StoredAsset`] / [`StoredRelationship`]: storage shapes keyed by `_id`
//! - [`ComponentNode`]: the typed component tree carried by assets
//! - [`ModelSummary`]: per-model statistics document

mod asset;
mod component;
mod relationship;
mod stored;
mod summary;

pub use asset::{Asset, AssetAttributes, SpaceRef, SystemAttributes, Versioning};
pub use component::{
    ChildMap, Children, ComponentNode, Components, Group, LeafValue, Point3d, ValueKind,
};
pub use relationship::{ApplicationAttributes, AssetRef, Relationship, RelationshipAttributes};
pub use stored::{AssetKey, RelationshipKey, StoredAsset, StoredRelationship};
pub use summary::{GenerationInfo, ModelStatistics, ModelSummary};
