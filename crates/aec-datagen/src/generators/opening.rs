//! Door and window generation.
//!
//! Openings take their width from the catalogue size label and their height
//! from a fixed per-kind value. The insertion point is independent of any
//! host wall; geometric consistency is not modelled.

use std::ops::Range;

use rand::Rng;

use aec_model::models::{ChildMap, ComponentNode};

use super::{GEOMETRY_TYPE, TypeComponents, measure, pick, pick_variant, random_point, round2};
use crate::catalogue::{AssetTypeDef, BuilderKind};

/// Configuration for opening generation. Distances in feet.
#[derive(Debug, Clone)]
pub struct OpeningGenConfig {
    pub door_height: f64,
    pub window_height: f64,
    /// Depth of the opening's bounding box.
    pub depth: f64,
    pub insertion_x: Range<f64>,
    pub insertion_y: Range<f64>,
    pub insertion_z: Range<f64>,
}

impl Default for OpeningGenConfig {
    fn default() -> Self {
        Self {
            door_height: 7.0,
            window_height: 6.0,
            depth: 0.17,
            insertion_x: 0.0..100.0,
            insertion_y: 0.0..100.0,
            insertion_z: 0.0..15.0,
        }
    }
}

/// Generates door and window components.
pub struct OpeningGenerator {
    config: OpeningGenConfig,
}

impl OpeningGenerator {
    pub fn new() -> Self {
        Self {
            config: OpeningGenConfig::default(),
        }
    }

    pub fn with_config(config: OpeningGenConfig) -> Self {
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

        // Size labels are checked when the catalogue is loaded.
        let width = variant.width_ft.unwrap_or_default();
        let height = match def.builder {
            BuilderKind::Window => self.config.window_height,
            _ => self.config.door_height,
        };

        let insertion_point = random_point(
            self.config.insertion_x.clone(),
            self.config.insertion_y.clone(),
            self.config.insertion_z.clone(),
            rng,
        );

        let geometry = ComponentNode::group(
            GEOMETRY_TYPE,
            [
                ("minPoint", ComponentNode::point([0.0, 0.0, 0.0])),
                (
                    "maxPoint",
                    ComponentNode::point([round2(width), self.config.depth, height]),
                ),
                ("insertionPoint", ComponentNode::point(insertion_point)),
            ],
        );

        let mut parameters = ChildMap::new();
        parameters.insert("width".to_string(), measure("width", width, "ft"));
        parameters.insert("height".to_string(), measure("height", height, "ft"));

        TypeComponents {
            metadata: Vec::new(),
            type_properties: vec![
                ("familyName", ComponentNode::string(&family.name)),
                ("typeName", ComponentNode::string(&variant.label)),
                ("level", ComponentNode::string(&level)),
                ("roomBounding", ComponentNode::boolean(false)),
            ],
            level,
            geometry,
            parameters,
        }
    }
}

impl Default for OpeningGenerator {
    fn default() -> Self {
        Self::new()
    }
}
