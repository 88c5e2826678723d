//! Asset and relationship type catalogue.
//!
//! The catalogue is the immutable description of what a generated model looks
//! like: which asset types exist, their relative weights, the choices their
//! builders sample from, and which relationship categories may connect them.
//! It is validated once at load time so builders never see malformed data.

mod presets;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::allocation::Allocation;

pub use presets::{revit_workload, standard};

#[derive(Debug, Error, PartialEq)]
pub enum CatalogueError {
    #[error("Catalogue defines no asset types")]
    Empty,
    #[error("Catalogue defines no levels")]
    NoLevels,
    #[error("Catalogue defines no construction phases")]
    NoPhases,
    #[error("Duplicate asset type tag: {0}")]
    DuplicateTag(String),
    #[error("Asset type {tag} has invalid weight {weight}")]
    InvalidWeight { tag: String, weight: f64 },
    #[error("Asset type {0} needs at least one family with at least one variant")]
    MissingFamilies(String),
    #[error("Room type {0} needs departments and occupancy types")]
    MissingRoomChoices(String),
    #[error("Asset type {tag} has malformed size label {label:?} (expected a leading inch value before '\"')")]
    MalformedSizeLabel { tag: String, label: String },
    #[error("Asset types {first} and {second} share element id offset {start}")]
    DuplicateElementIdStart {
        first: String,
        second: String,
        start: u64,
    },
    #[error("Element ids of {tag} would overflow into the next type's range ({count} assets, capacity {capacity})")]
    ElementIdOverflow {
        tag: String,
        count: usize,
        capacity: u64,
    },
    #[error("Duplicate relationship category: {0}")]
    DuplicateCategory(String),
    #[error("Relationship category {category} references unknown asset type {tag}")]
    UnknownAssetType { category: String, tag: String },
    #[error("Relationship category {0} needs at least one from-type and one to-type")]
    EmptyEndpointTypes(String),
    #[error("Relationship category {category} has invalid weight {weight}")]
    InvalidRelationshipWeight { category: String, weight: f64 },
}

/// Which builder produces documents for an asset type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderKind {
    Wall,
    Door,
    Window,
    Room,
    /// MEP, structural, furniture, fixtures and anything else.
    Generic,
}

impl BuilderKind {
    fn needs_families(&self) -> bool {
        !matches!(self, BuilderKind::Room)
    }

    fn parses_size_labels(&self) -> bool {
        matches!(self, BuilderKind::Door | BuilderKind::Window)
    }
}

/// Parses the opening width out of a size label such as `36" x 84"`.
///
/// Only the number before the first `"` is used; it is converted from inches
/// to feet.
pub fn parse_width_feet(label: &str) -> Option<f64> {
    let (inches, _) = label.split_once('"')?;
    let inches: f64 = inches.trim().parse().ok()?;
    (inches.is_finite() && inches > 0.0).then_some(inches / 12.0)
}

/// One type variant within a family (a Revit "type name").
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub label: String,
    /// Opening width in feet, when the label carries one.
    pub width_ft: Option<f64>,
}

impl Variant {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let width_ft = parse_width_feet(&label);
        Self { label, width_ft }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Family {
    pub name: String,
    pub variants: Vec<Variant>,
}

impl Family {
    pub fn new(name: impl Into<String>, variants: &[&str]) -> Self {
        Self {
            name: name.into(),
            variants: variants.iter().map(|v| Variant::new(*v)).collect(),
        }
    }
}

/// Definition of one asset type.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetTypeDef {
    /// Catalogue key, used for distribution reporting and relationship tables.
    pub tag: String,
    /// Prefix of per-type asset ids (`{id_prefix}-{index:06}`).
    pub id_prefix: String,
    /// Versioned wire type, e.g. `autodesk.revit:wall-2.0.0`.
    pub type_id: String,
    /// Revit category code, e.g. `OST_Walls`.
    pub category: String,
    pub weight: f64,
    pub element_id_start: u64,
    pub builder: BuilderKind,
    pub families: Vec<Family>,
    pub departments: Vec<String>,
    pub occupancy_types: Vec<String>,
}

impl AssetTypeDef {
    pub fn new(
        tag: impl Into<String>,
        builder: BuilderKind,
        type_id: impl Into<String>,
        category: impl Into<String>,
        weight: f64,
        element_id_start: u64,
    ) -> Self {
        let tag = tag.into();
        Self {
            id_prefix: tag.clone(),
            tag,
            type_id: type_id.into(),
            category: category.into(),
            weight,
            element_id_start,
            builder,
            families: Vec::new(),
            departments: Vec::new(),
            occupancy_types: Vec::new(),
        }
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_family(mut self, name: &str, variants: &[&str]) -> Self {
        self.families.push(Family::new(name, variants));
        self
    }

    pub fn with_room_choices(mut self, departments: &[&str], occupancy_types: &[&str]) -> Self {
        self.departments = departments.iter().map(|s| s.to_string()).collect();
        self.occupancy_types = occupancy_types.iter().map(|s| s.to_string()).collect();
        self
    }

    fn validate(&self) -> Result<(), CatalogueError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(CatalogueError::InvalidWeight {
                tag: self.tag.clone(),
                weight: self.weight,
            });
        }

        if self.builder.needs_families()
            && (self.families.is_empty() || self.families.iter().any(|f| f.variants.is_empty()))
        {
            return Err(CatalogueError::MissingFamilies(self.tag.clone()));
        }

        if self.builder == BuilderKind::Room
            && (self.departments.is_empty() || self.occupancy_types.is_empty())
        {
            return Err(CatalogueError::MissingRoomChoices(self.tag.clone()));
        }

        if self.builder.parses_size_labels() {
            let malformed = self
                .families
                .iter()
                .flat_map(|f| &f.variants)
                .find(|v| v.width_ft.is_none());
            if let Some(variant) = malformed {
                return Err(CatalogueError::MalformedSizeLabel {
                    tag: self.tag.clone(),
                    label: variant.label.clone(),
                });
            }
        }

        Ok(())
    }
}

/// A relationship category and the asset types it may connect.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipCategory {
    /// Semantic name (`hosted`, `roomBounding`, ...).
    pub name: String,
    /// Versioned wire type, e.g. `autodesk.revit:hosted-1.0.0`.
    pub wire_type: String,
    pub from_types: Vec<String>,
    pub to_types: Vec<String>,
    pub weight: f64,
}

impl RelationshipCategory {
    pub fn new(
        name: impl Into<String>,
        wire_type: impl Into<String>,
        from_types: &[&str],
        to_types: &[&str],
        weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            wire_type: wire_type.into(),
            from_types: from_types.iter().map(|s| s.to_string()).collect(),
            to_types: to_types.iter().map(|s| s.to_string()).collect(),
            weight,
        }
    }

    /// True when this category draws an insertion point for every edge.
    pub fn is_hosted(&self) -> bool {
        self.name == "hosted"
    }
}

/// Validated, immutable catalogue of asset and relationship types.
#[derive(Debug, Clone)]
pub struct TypeCatalogue {
    asset_types: Vec<AssetTypeDef>,
    relationship_categories: Vec<RelationshipCategory>,
    levels: Vec<String>,
    phases: Vec<String>,
}

impl TypeCatalogue {
    pub fn builder() -> CatalogueBuilder {
        CatalogueBuilder::default()
    }

    pub fn asset_types(&self) -> &[AssetTypeDef] {
        &self.asset_types
    }

    pub fn relationship_categories(&self) -> &[RelationshipCategory] {
        &self.relationship_categories
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn phases(&self) -> &[String] {
        &self.phases
    }

    pub fn get(&self, tag: &str) -> Option<&AssetTypeDef> {
        self.asset_types.iter().find(|t| t.tag == tag)
    }

    /// `(tag, weight)` pairs in catalogue order.
    pub fn weights(&self) -> Vec<(&str, f64)> {
        self.asset_types
            .iter()
            .map(|t| (t.tag.as_str(), t.weight))
            .collect()
    }

    /// Number of element ids available to `tag` before its range runs into the
    /// next higher offset. `None` for the highest offset (unbounded).
    pub fn element_id_capacity(&self, tag: &str) -> Option<u64> {
        let start = self.get(tag)?.element_id_start;
        self.asset_types
            .iter()
            .map(|t| t.element_id_start)
            .filter(|&s| s > start)
            .min()
            .map(|next| next - start)
    }

    /// Rejects an allocation whose per-type counts would make element ids of
    /// one type collide with another type's range.
    pub fn check_element_id_capacity(&self, allocation: &Allocation) -> Result<(), CatalogueError> {
        for asset_type in &self.asset_types {
            let count = allocation.count(&asset_type.tag);
            let Some(capacity) = self.element_id_capacity(&asset_type.tag) else {
                continue;
            };
            if count as u64 > capacity {
                return Err(CatalogueError::ElementIdOverflow {
                    tag: asset_type.tag.clone(),
                    count,
                    capacity,
                });
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), CatalogueError> {
        if self.asset_types.is_empty() {
            return Err(CatalogueError::Empty);
        }
        if self.levels.is_empty() {
            return Err(CatalogueError::NoLevels);
        }
        if self.phases.is_empty() {
            return Err(CatalogueError::NoPhases);
        }

        let mut tags = HashSet::new();
        for asset_type in &self.asset_types {
            if !tags.insert(asset_type.tag.as_str()) {
                return Err(CatalogueError::DuplicateTag(asset_type.tag.clone()));
            }
            asset_type.validate()?;
        }

        for (i, first) in self.asset_types.iter().enumerate() {
            if let Some(second) = self.asset_types[i + 1..]
                .iter()
                .find(|t| t.element_id_start == first.element_id_start)
            {
                return Err(CatalogueError::DuplicateElementIdStart {
                    first: first.tag.clone(),
                    second: second.tag.clone(),
                    start: first.element_id_start,
                });
            }
        }

        let mut categories = HashSet::new();
        for category in &self.relationship_categories {
            if !categories.insert(category.name.as_str()) {
                return Err(CatalogueError::DuplicateCategory(category.name.clone()));
            }
            if !category.weight.is_finite() || category.weight <= 0.0 {
                return Err(CatalogueError::InvalidRelationshipWeight {
                    category: category.name.clone(),
                    weight: category.weight,
                });
            }
            if category.from_types.is_empty() || category.to_types.is_empty() {
                return Err(CatalogueError::EmptyEndpointTypes(category.name.clone()));
            }
            let unknown = category
                .from_types
                .iter()
                .chain(&category.to_types)
                .find(|tag| !tags.contains(tag.as_str()));
            if let Some(tag) = unknown {
                return Err(CatalogueError::UnknownAssetType {
                    category: category.name.clone(),
                    tag: tag.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Collects catalogue entries and validates them on [`CatalogueBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct CatalogueBuilder {
    asset_types: Vec<AssetTypeDef>,
    relationship_categories: Vec<RelationshipCategory>,
    levels: Vec<String>,
    phases: Vec<String>,
}

impl CatalogueBuilder {
    pub fn asset_type(mut self, def: AssetTypeDef) -> Self {
        self.asset_types.push(def);
        self
    }

    pub fn relationship(mut self, category: RelationshipCategory) -> Self {
        self.relationship_categories.push(category);
        self
    }

    pub fn levels(mut self, levels: &[&str]) -> Self {
        self.levels = levels.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn phases(mut self, phases: &[&str]) -> Self {
        self.phases = phases.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> Result<TypeCatalogue, CatalogueError> {
        let catalogue = TypeCatalogue {
            asset_types: self.asset_types,
            relationship_categories: self.relationship_categories,
            levels: self.levels,
            phases: self.phases,
        };
        catalogue.validate()?;
        Ok(catalogue)
    }
}
