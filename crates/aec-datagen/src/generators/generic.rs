//! Generation for MEP, structural, furniture, fixture and other plain types.

use std::ops::Range;

use rand::Rng;

use aec_model::models::{ChildMap, ComponentNode};

use super::{GEOMETRY_TYPE, TypeComponents, pick, pick_variant, random_point};
use crate::catalogue::AssetTypeDef;

#[derive(Debug, Clone)]
pub struct GenericGenConfig {
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub z_range: Range<f64>,
}

impl Default for GenericGenConfig {
    fn default() -> Self {
        Self {
            x_range: 0.0..100.0,
            y_range: 0.0..100.0,
            z_range: 0.0..15.0,
        }
    }
}

/// Generates family/type/level properties and a loose bounding box.
///
/// The two corners are drawn independently, so `minPoint` is not guaranteed
/// to be below `maxPoint`.
pub struct GenericGenerator {
    config: GenericGenConfig,
}

impl GenericGenerator {
    pub fn new() -> Self {
        Self {
            config: GenericGenConfig::default(),
        }
    }

    pub fn with_config(config: GenericGenConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        def: &AssetTypeDef,
        levels: &[String],
        rng: &mut impl Rng,
    ) -> TypeComponents {
        let (family, variant) = pick_variant(def, rng);
        let level = pick(levels, rng).clone();

        let geometry = ComponentNode::group(
            GEOMETRY_TYPE,
            [
                ("minPoint", ComponentNode::point(self.point(rng))),
                ("maxPoint", ComponentNode::point(self.point(rng))),
            ],
        );

        TypeComponents {
            metadata: Vec::new(),
            type_properties: vec![
                ("familyName", ComponentNode::string(&family.name)),
                ("typeName", ComponentNode::string(&variant.label)),
                ("level", ComponentNode::string(&level)),
            ],
            level,
            geometry,
            parameters: ChildMap::new(),
        }
    }

    fn point(&self, rng: &mut impl Rng) -> [f64; 3] {
        random_point(
            self.config.x_range.clone(),
            self.config.y_range.clone(),
            self.config.z_range.clone(),
            rng,
        )
    }
}

impl Default for GenericGenerator {
    fn default() -> Self {
        Self::new()
    }
}
