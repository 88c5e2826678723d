use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::component::Components;
use crate::errors::ModelError;

/// Reference to the level/space an asset sits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemAttributes {
    /// Opaque UUID-shaped id, generated independently of the asset id.
    pub unique_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAttributes {
    pub system: SystemAttributes,
}

/// Bitemporal fields attached to documents in multi-tenant datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versioning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub valid_from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub valid_to: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub transaction_time: OffsetDateTime,
}

impl Versioning {
    /// An open-ended first revision recorded at `at`.
    pub fn initial(revision_id: Option<String>, at: OffsetDateTime) -> Self {
        Self {
            revision_id,
            valid_from: at,
            valid_to: None,
            transaction_time: at,
        }
    }
}

/// One model element as produced by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub model_id: String,
    pub id: String,
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

impl Asset {
    /// The embedded Revit element id (`metadata.elementId`).
    pub fn element_id(&self) -> Result<u64, ModelError> {
        let leaf = self.components.leaf(&["metadata", "elementId"])?;
        leaf.as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ModelError::UnexpectedValue {
                path: "metadata.elementId".to_string(),
                expected: "numeric string",
            })
    }

    pub fn unique_id(&self) -> &str {
        &self.attributes.system.unique_id
    }
}
