//! Relationship sampling over generated id pools.

use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};
use tracing::info;

use aec_model::models::{ApplicationAttributes, AssetRef, Relationship, RelationshipAttributes};

use super::{pick, random_point};
use crate::catalogue::RelationshipCategory;
use crate::context::GenerationContext;
use crate::ids::IdPools;

/// Draws between progress log lines.
const PROGRESS_INTERVAL: usize = 20_000;

/// Samples typed relationships whose endpoints always exist.
///
/// Each draw picks a category by weight, then a from-type and a to-type
/// uniformly from the category's lists, then one id from each type's pool.
/// A draw whose pool is empty yields nothing and is not retried, so the
/// relationship count may fall short of the requested count and relationship
/// ids (scoped to the draw index) may have gaps. Duplicate pairs are allowed.
pub struct RelationshipSampler<'a> {
    categories: &'a [RelationshipCategory],
    weights: Option<WeightedIndex<f64>>,
}

impl<'a> RelationshipSampler<'a> {
    pub fn new(categories: &'a [RelationshipCategory]) -> Self {
        // Weights are validated positive when the catalogue loads; only an empty
        // category list has no distribution.
        let weights = WeightedIndex::new(categories.iter().map(|c| c.weight)).ok();
        Self {
            categories,
            weights,
        }
    }

    /// Performs draw number `draw`. `None` when a required pool is empty.
    pub fn sample_one(
        &self,
        draw: usize,
        ctx: &GenerationContext,
        pools: &IdPools,
        rng: &mut impl Rng,
    ) -> Option<Relationship> {
        let weights = self.weights.as_ref()?;
        let category = &self.categories[weights.sample(rng)];

        let from_type = pick(&category.from_types, rng);
        let to_type = pick(&category.to_types, rng);

        let from = pools.get(from_type)?.choose(rng)?;
        let to = pools.get(to_type)?.choose(rng)?;

        let insertion_point = category
            .is_hosted()
            .then(|| random_point(0.0..100.0, 0.0..100.0, 0.0..15.0, rng));

        Some(Relationship {
            tenant_id: ctx.tenant_id.clone(),
            model_id: ctx.model_id.clone(),
            id: ctx.ids.relationship_id(&category.name, draw),
            type_id: category.wire_type.clone(),
            from: AssetRef::new(from),
            to: AssetRef::new(to),
            attributes: RelationshipAttributes {
                application: ApplicationAttributes {
                    relationship_type: category.name.clone(),
                    insertion_point,
                },
            },
            versioning: ctx.versioning(None),
        })
    }

    /// Performs `count` draws eagerly.
    pub fn sample(
        &self,
        count: usize,
        ctx: &GenerationContext,
        pools: &IdPools,
        rng: &mut impl Rng,
    ) -> Vec<Relationship> {
        self.draws(count, ctx, pools, rng).collect()
    }

    /// Lazily performs `count` draws, yielding only successful ones.
    pub fn draws<'s, R: Rng>(
        &'s self,
        count: usize,
        ctx: &'s GenerationContext,
        pools: &'s IdPools,
        rng: &'s mut R,
    ) -> RelationshipDraws<'s, 'a, R> {
        RelationshipDraws {
            sampler: self,
            ctx,
            pools,
            rng,
            next_draw: 0,
            count,
            skipped: 0,
        }
    }
}

/// Lazy, finite relationship sequence. See [`RelationshipSampler::draws`].
pub struct RelationshipDraws<'s, 'a, R: Rng> {
    sampler: &'s RelationshipSampler<'a>,
    ctx: &'s GenerationContext,
    pools: &'s IdPools,
    rng: &'s mut R,
    next_draw: usize,
    count: usize,
    skipped: usize,
}

impl<R: Rng> RelationshipDraws<'_, '_, R> {
    /// Draws so far that produced nothing because a pool was empty.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: Rng> Iterator for RelationshipDraws<'_, '_, R> {
    type Item = Relationship;

    fn next(&mut self) -> Option<Relationship> {
        while self.next_draw < self.count {
            let draw = self.next_draw;
            self.next_draw += 1;

            if self.next_draw % PROGRESS_INTERVAL == 0 {
                info!("Sampled {}/{} relationship draws", self.next_draw, self.count);
            }

            match self
                .sampler
                .sample_one(draw, self.ctx, self.pools, &mut *self.rng)
            {
                Some(relationship) => return Some(relationship),
                None => self.skipped += 1,
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.count - self.next_draw))
    }
}
