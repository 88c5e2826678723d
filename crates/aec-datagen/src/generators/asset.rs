//! Asset assembly: builder dispatch plus the envelope shared by every type.

use rand::Rng;
use tracing::{debug, info};

use aec_model::models::{
    Asset, AssetAttributes, ChildMap, ComponentNode, Components, SpaceRef, SystemAttributes,
};

use super::{
    GenericGenerator, LongTailProperties, METADATA_TYPE, OpeningGenerator, PARAMETER_MAP_TYPE,
    PROPERTY_GROUP_TYPE, RoomGenerator, TypeComponents, WallGenerator, pick, property_group_key,
    property_group_type, space_id,
};
use crate::allocation::Allocation;
use crate::catalogue::{AssetTypeDef, BuilderKind, TypeCatalogue};
use crate::context::GenerationContext;
use crate::ids;

/// Assets between progress log lines.
const PROGRESS_INTERVAL: usize = 10_000;

/// Builds complete asset documents from catalogue entries.
#[derive(Default)]
pub struct AssetFactory {
    walls: WallGenerator,
    openings: OpeningGenerator,
    rooms: RoomGenerator,
    generic: GenericGenerator,
    long_tail: LongTailProperties,
}

impl AssetFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wall_generator(mut self, walls: WallGenerator) -> Self {
        self.walls = walls;
        self
    }

    pub fn with_opening_generator(mut self, openings: OpeningGenerator) -> Self {
        self.openings = openings;
        self
    }

    pub fn with_room_generator(mut self, rooms: RoomGenerator) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn with_generic_generator(mut self, generic: GenericGenerator) -> Self {
        self.generic = generic;
        self
    }

    /// Builds the `index`-th asset of `def`.
    ///
    /// `sequence_offset` is the number of assets generated for earlier types of
    /// the same model; only tenant ids use it.
    pub fn build(
        &self,
        catalogue: &TypeCatalogue,
        def: &AssetTypeDef,
        index: usize,
        sequence_offset: usize,
        ctx: &GenerationContext,
        rng: &mut impl Rng,
    ) -> Asset {
        let levels = catalogue.levels();
        let parts = match def.builder {
            BuilderKind::Wall => self.walls.generate(def, levels, catalogue.phases(), rng),
            BuilderKind::Door | BuilderKind::Window => self.openings.generate(def, levels, rng),
            BuilderKind::Room => self.rooms.generate(def, index, levels, rng),
            BuilderKind::Generic => self.generic.generate(def, levels, rng),
        };

        let id = ctx.ids.asset_id(&def.id_prefix, sequence_offset, index);
        let unique_id = ids::unique_id(index, rng);
        let space = space_id(&parts.level);
        let components = self.assemble(catalogue, def, index, parts, ctx, rng);

        Asset {
            tenant_id: ctx.tenant_id.clone(),
            model_id: ctx.model_id.clone(),
            shard_key: ctx.shard_key(&space),
            versioning: ctx.versioning(Some(&id)),
            id,
            type_id: def.type_id.clone(),
            space: SpaceRef { id: space },
            attributes: AssetAttributes {
                system: SystemAttributes { unique_id },
            },
            components,
        }
    }

    /// Lazily builds every asset of `allocation`, types in catalogue order.
    pub fn stream<'a, R: Rng>(
        &'a self,
        catalogue: &'a TypeCatalogue,
        allocation: &'a Allocation,
        ctx: &'a GenerationContext,
        rng: &'a mut R,
    ) -> AssetStream<'a, R> {
        AssetStream {
            factory: self,
            catalogue,
            allocation,
            ctx,
            rng,
            type_index: 0,
            index: 0,
            sequence_offset: 0,
            produced: 0,
        }
    }

    fn assemble(
        &self,
        catalogue: &TypeCatalogue,
        def: &AssetTypeDef,
        index: usize,
        parts: TypeComponents,
        ctx: &GenerationContext,
        rng: &mut impl Rng,
    ) -> Components {
        let element_id = def.element_id_start + index as u64;

        let mut metadata = ChildMap::new();
        metadata.insert(
            "elementId".to_string(),
            ComponentNode::string(element_id.to_string()),
        );
        metadata.insert(
            "categoryId".to_string(),
            ComponentNode::string(&def.category),
        );
        for (name, node) in parts.metadata {
            metadata.insert(name.to_string(), node);
        }

        let mut parameters = parts.parameters;
        if ctx.long_tail {
            if !metadata.contains_key("phaseCreated") {
                metadata.insert(
                    "phaseCreated".to_string(),
                    ComponentNode::string(pick(catalogue.phases(), rng)),
                );
            }
            metadata.insert(
                "phaseDemo".to_string(),
                ComponentNode::string(pick(catalogue.phases(), rng)),
            );
            self.long_tail.fill(&mut parameters, rng);
        }

        let group_key = property_group_key(def);
        let group_type = property_group_type(&group_key);

        let mut insertions = ChildMap::new();
        insertions.insert(
            "metadata".to_string(),
            ComponentNode::group(METADATA_TYPE, metadata),
        );
        insertions.insert(
            group_key,
            ComponentNode::group(group_type, parts.type_properties),
        );
        insertions.insert("geometry".to_string(), parts.geometry);
        insertions.insert(
            "properties".to_string(),
            ComponentNode::group(
                PROPERTY_GROUP_TYPE,
                [(
                    "properties",
                    ComponentNode::insertions(PARAMETER_MAP_TYPE, parameters),
                )],
            ),
        );

        Components { insertions }
    }
}

/// Lazy, finite asset sequence over an allocation.
///
/// Types are produced in catalogue order and each type's indices run from
/// zero, so the assets match the id pools derived from the same allocation.
pub struct AssetStream<'a, R: Rng> {
    factory: &'a AssetFactory,
    catalogue: &'a TypeCatalogue,
    allocation: &'a Allocation,
    ctx: &'a GenerationContext,
    rng: &'a mut R,
    type_index: usize,
    index: usize,
    sequence_offset: usize,
    produced: usize,
}

impl<'a, R: Rng> AssetStream<'a, R> {
    /// Advances the stream, also returning the tag of the asset's type.
    pub fn next_tagged(&mut self) -> Option<(&'a str, Asset)> {
        let catalogue = self.catalogue;
        loop {
            let def = catalogue.asset_types().get(self.type_index)?;
            let count = self.allocation.count(&def.tag);

            if self.index < count {
                if self.index == 0 {
                    debug!("Generating {} {}...", count, def.tag);
                }
                let asset = self.factory.build(
                    catalogue,
                    def,
                    self.index,
                    self.sequence_offset,
                    self.ctx,
                    &mut *self.rng,
                );
                self.index += 1;
                self.produced += 1;
                if self.produced % PROGRESS_INTERVAL == 0 {
                    info!("Generated {}/{} assets", self.produced, self.allocation.total());
                }
                return Some((def.tag.as_str(), asset));
            }

            self.sequence_offset += count;
            self.type_index += 1;
            self.index = 0;
        }
    }
}

impl<R: Rng> Iterator for AssetStream<'_, R> {
    type Item = Asset;

    fn next(&mut self) -> Option<Asset> {
        self.next_tagged().map(|(_, asset)| asset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.allocation.total() - self.produced;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for AssetStream<'_, R> {}
