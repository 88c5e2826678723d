//! Storage-ready document shapes with compound primary keys.
//!
//! The bulk loader upserts on `_id`, so the scalar identity fields of an
//! [`Asset`] or [`Relationship`] move into a nested key object and are removed
//! from the top level. For relationships the endpoint asset ids move into the
//! key as well; `from`/`to` survive only when they carry other attributes.
//!
//! The conversions are total and lossless in both directions: every generated
//! document has exactly one stored form, and converting back restores it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::asset::{Asset, AssetAttributes, SpaceRef, Versioning};
use super::component::Components;
use super::relationship::{AssetRef, Relationship, RelationshipAttributes};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub model_id: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub model_id: String,
    pub id: String,
    pub from_asset_id: String,
    pub to_asset_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAsset {
    #[serde(rename = "_id")]
    pub key: AssetKey,
    #[serde(rename = "type")]
    pub type_id: String,
    pub space: SpaceRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_key: Option<String>,
    pub attributes: AssetAttributes,
    pub components: Components,
    #[serde(flatten)]
    pub versioning: Option<Versioning>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRelationship {
    #[serde(rename = "_id")]
    pub key: RelationshipKey,
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Map<String, Value>>,
    pub attributes: RelationshipAttributes,
    #[serde(flatten)]
    pub versioning: Option<Versioning>,
}

/// Drops the endpoint's asset id, keeping the endpoint only if anything is left.
fn strip_endpoint(endpoint: AssetRef) -> Option<Map<String, Value>> {
    if endpoint.extra.is_empty() {
        None
    } else {
        Some(endpoint.extra)
    }
}

impl From<Asset> for StoredAsset {
    fn from(asset: Asset) -> Self {
        Self {
            key: AssetKey {
                tenant_id: asset.tenant_id,
                model_id: asset.model_id,
                id: asset.id,
            },
            type_id: asset.type_id,
            space: asset.space,
            shard_key: asset.shard_key,
            attributes: asset.attributes,
            components: asset.components,
            versioning: asset.versioning,
        }
    }
}

impl From<StoredAsset> for Asset {
    fn from(stored: StoredAsset) -> Self {
        Self {
            tenant_id: stored.key.tenant_id,
            model_id: stored.key.model_id,
            id: stored.key.id,
            type_id: stored.type_id,
            space: stored.space,
            shard_key: stored.shard_key,
            attributes: stored.attributes,
            components: stored.components,
            versioning: stored.versioning,
        }
    }
}

impl From<Relationship> for StoredRelationship {
    fn from(rel: Relationship) -> Self {
        Self {
            key: RelationshipKey {
                tenant_id: rel.tenant_id,
                model_id: rel.model_id,
                id: rel.id,
                from_asset_id: rel.from.asset_id.clone(),
                to_asset_id: rel.to.asset_id.clone(),
            },
            type_id: rel.type_id,
            from: strip_endpoint(rel.from),
            to: strip_endpoint(rel.to),
            attributes: rel.attributes,
            versioning: rel.versioning,
        }
    }
}

impl From<StoredRelationship> for Relationship {
    fn from(stored: StoredRelationship) -> Self {
        Self {
            tenant_id: stored.key.tenant_id,
            model_id: stored.key.model_id,
            id: stored.key.id,
            type_id: stored.type_id,
            from: AssetRef {
                asset_id: stored.key.from_asset_id,
                extra: stored.from.unwrap_or_default(),
            },
            to: AssetRef {
                asset_id: stored.key.to_asset_id,
                extra: stored.to.unwrap_or_default(),
            },
            attributes: stored.attributes,
            versioning: stored.versioning,
        }
    }
}
