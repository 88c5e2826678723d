//! Asset and relationship generators.
//!
//! - [`AssetFactory`]: dispatches a catalogue entry to its type builder and
//!   wraps the result in the common asset envelope
//! - [`WallGenerator`], [`OpeningGenerator`], [`RoomGenerator`],
//!   [`GenericGenerator`]: type-specific component trees
//! - [`LongTailProperties`]: the variable-size parameter bag of large-scale runs
//! - [`RelationshipSampler`]: weighted, referentially consistent edges

pub mod asset;
pub mod generic;
pub mod opening;
pub mod properties;
pub mod relationship;
pub mod room;
pub mod wall;

pub use asset::{AssetFactory, AssetStream};
pub use generic::{GenericGenConfig, GenericGenerator};
pub use opening::{OpeningGenConfig, OpeningGenerator};
pub use properties::{LongTailProperties, PropertyCountDistribution, PropertyKind};
pub use relationship::{RelationshipDraws, RelationshipSampler};
pub use room::{RoomGenConfig, RoomGenerator};
pub use wall::{WallGenConfig, WallGenerator};

use std::ops::Range;

use rand::Rng;

use aec_model::models::{ChildMap, ComponentNode, Point3d};

use crate::catalogue::{AssetTypeDef, BuilderKind, Family, Variant};

pub(crate) const METADATA_TYPE: &str = "autodesk.revit:element-metadata-1.0.0";
pub(crate) const GEOMETRY_TYPE: &str = "autodesk.geometry:bounds-1.0.0";
pub(crate) const PROPERTY_GROUP_TYPE: &str = "autodesk.aec:component.propertyGroup-1.1.0";
pub(crate) const PARAMETER_MAP_TYPE: &str = "map<autodesk.parameter:parameter-2.0.0>";

/// The type-specific part of an asset, produced by one builder.
#[derive(Debug, Clone)]
pub struct TypeComponents {
    pub level: String,
    /// Metadata entries beyond `elementId` and `categoryId`.
    pub metadata: Vec<(&'static str, ComponentNode)>,
    /// Children of the `{type}Properties` group.
    pub type_properties: Vec<(&'static str, ComponentNode)>,
    pub geometry: ComponentNode,
    /// Initial entries of `properties.properties`.
    pub parameters: ChildMap,
}

/// Rounds to two decimals, the precision of every generated float.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Picks one element of a catalogue list. Lists are non-empty once the
/// catalogue has been validated.
pub(crate) fn pick<'a, T>(items: &'a [T], rng: &mut impl Rng) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

pub(crate) fn pick_variant<'a>(def: &'a AssetTypeDef, rng: &mut impl Rng) -> (&'a Family, &'a Variant) {
    let family = pick(&def.families, rng);
    let variant = pick(&family.variants, rng);
    (family, variant)
}

/// A point with each coordinate drawn uniformly from its range.
pub fn random_point(
    x: Range<f64>,
    y: Range<f64>,
    z: Range<f64>,
    rng: &mut impl Rng,
) -> Point3d {
    [
        round2(rng.gen_range(x)),
        round2(rng.gen_range(y)),
        round2(rng.gen_range(z)),
    ]
}

/// `Level 2` becomes `space-building-level-2`.
pub fn space_id(level: &str) -> String {
    format!("space-building-{}", level.to_lowercase().replace(' ', "-"))
}

/// Key of the type-specific property group, e.g. `wallProperties`.
///
/// Generic types strip one trailing `s` from their tag; MEP and structural
/// collections keep their historical group names.
pub fn property_group_key(def: &AssetTypeDef) -> String {
    match def.tag.as_str() {
        "mepComponents" => "hvacProperties".to_string(),
        "structuralElements" => "structuralProperties".to_string(),
        tag => {
            let stem = if def.builder == BuilderKind::Generic {
                tag.strip_suffix('s').unwrap_or(tag)
            } else {
                def.id_prefix.as_str()
            };
            format!("{stem}Properties")
        }
    }
}

/// `wallProperties` becomes `autodesk.revit:wall-properties-1.0.0`.
pub fn property_group_type(key: &str) -> String {
    format!(
        "autodesk.revit:{}-1.0.0",
        key.replace("Properties", "-properties")
    )
}

/// A measured parameter: `{value: Float64, unit: String}`.
pub fn measure(kind: &str, value: f64, unit: &str) -> ComponentNode {
    ComponentNode::group(
        format!("autodesk.revit.parameter:{kind}-1.0.0"),
        [
            ("value", ComponentNode::float(round2(value))),
            ("unit", ComponentNode::string(unit)),
        ],
    )
}

/// A text parameter: `{value: String}`.
pub fn text_parameter(kind: &str, value: impl Into<String>) -> ComponentNode {
    ComponentNode::group(
        format!("autodesk.revit.parameter:{kind}-1.0.0"),
        [("value", ComponentNode::string(value))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(7.0), 7.0);
        assert_eq!(round2(-0.004), -0.0);
    }

    #[test]
    fn test_space_id() {
        assert_eq!(space_id("Level 1"), "space-building-level-1");
    }

    #[test]
    fn test_property_group_names() {
        let catalogue = catalogue::standard().unwrap();
        let key = |tag: &str| property_group_key(catalogue.get(tag).unwrap());

        assert_eq!(key("walls"), "wallProperties");
        assert_eq!(key("rooms"), "roomProperties");
        assert_eq!(key("mepComponents"), "hvacProperties");
        assert_eq!(key("structuralElements"), "structuralProperties");
        assert_eq!(key("furniture"), "furnitureProperties");
        assert_eq!(key("fixtures"), "fixtureProperties");

        assert_eq!(
            property_group_type("hvacProperties"),
            "autodesk.revit:hvac-properties-1.0.0"
        );
    }

    #[test]
    fn test_random_point_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let [x, y, z] = random_point(0.0..100.0, 0.0..100.0, 0.0..15.0, &mut rng);
            assert!((0.0..=100.0).contains(&x));
            assert!((0.0..=100.0).contains(&y));
            assert!((0.0..=15.0).contains(&z));
        }
    }
}
