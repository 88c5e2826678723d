use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::asset::Versioning;
use super::component::Point3d;

/// Endpoint of a relationship.
///
/// Besides the referenced asset id an endpoint may carry extra attributes;
/// those survive the compound-key transform while `assetId` moves into the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    pub asset_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssetRef {
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAttributes {
    /// Semantic category (`hosted`, `roomBounding`, `serves`, ...).
    pub relationship_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion_point: Option<Point3d>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipAttributes {
    pub application: ApplicationAttributes,
}

/// A directed, typed edge between two assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub model_id: String,
    pub id: String,
    #[serde(rename = "type")]
    pub type_id: String,
    pub from: AssetRef,
    pub to: AssetRef,
    pub attributes: RelationshipAttributes,
    #[serde(flatten)]
    pub versioning: Option<Versioning>,
}

impl Relationship {
    pub fn category(&self) -> &str {
        &self.attributes.application.relationship_type
    }
}
