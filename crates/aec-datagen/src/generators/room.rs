//! Room generation.

use std::ops::{Range, RangeInclusive};

use rand::Rng;

use aec_model::models::{ChildMap, ComponentNode};

use super::{GEOMETRY_TYPE, TypeComponents, measure, pick, random_point, round2};
use crate::catalogue::AssetTypeDef;

/// Configuration for room generation. Distances in feet.
#[derive(Debug, Clone)]
pub struct RoomGenConfig {
    pub width_range: Range<f64>,
    pub depth_range: Range<f64>,
    pub height_range: Range<f64>,
    pub occupant_load: RangeInclusive<i32>,
    /// Room numbers start here and follow the generation index.
    pub first_number: usize,
}

impl Default for RoomGenConfig {
    fn default() -> Self {
        Self {
            width_range: 10.0..20.0,
            depth_range: 10.0..20.0,
            height_range: 9.0..12.0,
            occupant_load: 1..=10,
            first_number: 100,
        }
    }
}

/// Generates room components.
pub struct RoomGenerator {
    config: RoomGenConfig,
}

impl RoomGenerator {
    pub fn new() -> Self {
        Self {
            config: RoomGenConfig::default(),
        }
    }

    pub fn with_config(config: RoomGenConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        def: &AssetTypeDef,
        index: usize,
        levels: &[String],
        rng: &mut impl Rng,
    ) -> TypeComponents {
        let level = pick(levels, rng).clone();
        let department = pick(&def.departments, rng);
        let occupancy = pick(&def.occupancy_types, rng);

        let width = rng.gen_range(self.config.width_range.clone());
        let depth = rng.gen_range(self.config.depth_range.clone());
        let height = rng.gen_range(self.config.height_range.clone());
        let area = width * depth;
        let volume = area * height;

        let number = self.config.first_number + index;

        let geometry = ComponentNode::group(
            GEOMETRY_TYPE,
            [
                (
                    "minPoint",
                    ComponentNode::point(random_point(0.0..100.0, 0.0..100.0, 0.0..15.0, rng)),
                ),
                (
                    "maxPoint",
                    ComponentNode::point([round2(width), round2(depth), round2(height)]),
                ),
            ],
        );

        let mut parameters = ChildMap::new();
        parameters.insert("area".to_string(), measure("area", area, "sqft"));
        parameters.insert("volume".to_string(), measure("volume", volume, "cuft"));

        TypeComponents {
            metadata: vec![("level", ComponentNode::string(&level))],
            type_properties: vec![
                ("name", ComponentNode::string(format!("{occupancy} {number}"))),
                ("number", ComponentNode::string(number.to_string())),
                ("department", ComponentNode::string(department)),
                ("occupancyType", ComponentNode::string(occupancy)),
                (
                    "occupantLoad",
                    ComponentNode::int(rng.gen_range(self.config.occupant_load.clone())),
                ),
            ],
            level,
            geometry,
            parameters,
        }
    }
}

impl Default for RoomGenerator {
    fn default() -> Self {
        Self::new()
    }
}
