//! Wall generation with bounding geometry and area/volume parameters.

use std::ops::Range;

use rand::Rng;

use aec_model::models::{ChildMap, ComponentNode};

use super::{GEOMETRY_TYPE, TypeComponents, measure, pick, pick_variant, round2};
use crate::catalogue::AssetTypeDef;

/// Configuration for wall generation. Distances in feet.
#[derive(Debug, Clone)]
pub struct WallGenConfig {
    /// Range for the x and y of the wall start.
    pub origin_range: Range<f64>,
    pub length_range: Range<f64>,
    pub height_range: Range<f64>,
    /// Thickness of families whose name contains "Interior".
    pub interior_thickness: f64,
    pub exterior_thickness: f64,
}

impl Default for WallGenConfig {
    fn default() -> Self {
        Self {
            origin_range: 0.0..90.0,
            length_range: 10.0..30.0,
            height_range: 9.0..14.0,
            interior_thickness: 0.5,
            exterior_thickness: 0.75,
        }
    }
}

/// Generates wall components.
pub struct WallGenerator {
    config: WallGenConfig,
}

impl WallGenerator {
    pub fn new() -> Self {
        Self {
            config: WallGenConfig::default(),
        }
    }

    pub fn with_config(config: WallGenConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        def: &AssetTypeDef,
        levels: &[String],
        phases: &[String],
        rng: &mut impl Rng,
    ) -> TypeComponents {
        let (family, variant) = pick_variant(def, rng);
        let level = pick(levels, rng).clone();

        let x = rng.gen_range(self.config.origin_range.clone());
        let y = rng.gen_range(self.config.origin_range.clone());
        let length = rng.gen_range(self.config.length_range.clone());
        let height = rng.gen_range(self.config.height_range.clone());
        let thickness = if family.name.contains("Interior") {
            self.config.interior_thickness
        } else {
            self.config.exterior_thickness
        };

        let area = length * height;
        let volume = area * thickness;

        let geometry = ComponentNode::group(
            GEOMETRY_TYPE,
            [
                ("minPoint", ComponentNode::point([round2(x), round2(y), 0.0])),
                (
                    "maxPoint",
                    ComponentNode::point([
                        round2(x + length),
                        round2(y + thickness),
                        round2(height),
                    ]),
                ),
            ],
        );

        let mut parameters = ChildMap::new();
        parameters.insert("area".to_string(), measure("area", area, "sqft"));
        parameters.insert("volume".to_string(), measure("volume", volume, "cuft"));

        TypeComponents {
            metadata: vec![("phaseCreated", ComponentNode::string(pick(phases, rng)))],
            type_properties: vec![
                ("familyName", ComponentNode::string(&family.name)),
                ("typeName", ComponentNode::string(&variant.label)),
                ("level", ComponentNode::string(&level)),
                ("roomBounding", ComponentNode::boolean(rng.gen_bool(0.5))),
            ],
            level,
            geometry,
            parameters,
        }
    }
}

impl Default for WallGenerator {
    fn default() -> Self {
        Self::new()
    }
}
