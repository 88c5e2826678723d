//! Asset, relationship and unique id generation.
//!
//! Ids are a pure function of the scheme and an index, so a type's id pool is
//! just the index range it was generated over. Pools render ids on demand and
//! cost the same memory at ten assets or ten million.

use std::ops::Range;

use indexmap::IndexMap;
use rand::Rng;
use uuid::Uuid;

use crate::allocation::Allocation;
use crate::catalogue::TypeCatalogue;

/// How asset and relationship ids are formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdScheme {
    /// `{idPrefix}-{index:06}` and `rel-{category}-{draw:06}`.
    PerType,
    /// `{tenantId}-asset-{seq:06}` and `{tenantId}-rel-{draw:06}`, where `seq`
    /// runs across all types of the tenant.
    Tenant { tenant_id: String },
}

/// Formats ids for one model or tenant.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    scheme: IdScheme,
}

impl IdAllocator {
    pub fn per_type() -> Self {
        Self {
            scheme: IdScheme::PerType,
        }
    }

    pub fn tenant(tenant_id: impl Into<String>) -> Self {
        Self {
            scheme: IdScheme::Tenant {
                tenant_id: tenant_id.into(),
            },
        }
    }

    pub fn scheme(&self) -> &IdScheme {
        &self.scheme
    }

    /// Asset id for the `index`-th asset of a type whose tenant-wide sequence
    /// starts at `offset`. `offset` is ignored by the per-type scheme.
    pub fn asset_id(&self, id_prefix: &str, offset: usize, index: usize) -> String {
        match &self.scheme {
            IdScheme::PerType => format!("{id_prefix}-{index:06}"),
            IdScheme::Tenant { tenant_id } => format!("{tenant_id}-asset-{:06}", offset + index),
        }
    }

    pub fn relationship_id(&self, category: &str, draw: usize) -> String {
        match &self.scheme {
            IdScheme::PerType => format!("rel-{category}-{draw:06}"),
            IdScheme::Tenant { tenant_id } => format!("{tenant_id}-rel-{draw:06}"),
        }
    }

    /// Pools for every type of `catalogue`, matching the ids an asset stream
    /// over the same allocation produces. Zero-count types get empty pools.
    pub fn pools(&self, catalogue: &TypeCatalogue, allocation: &Allocation) -> IdPools {
        let mut pools = IdPools::default();
        let mut offset = 0;
        for asset_type in catalogue.asset_types() {
            let count = allocation.count(&asset_type.tag);
            pools.insert(
                asset_type.tag.clone(),
                self.pool(&asset_type.id_prefix, offset, count),
            );
            offset += count;
        }
        pools
    }

    /// Builds the pool for a type generated over `count` indices.
    pub fn pool(&self, id_prefix: &str, offset: usize, count: usize) -> IdPool {
        IdPool {
            scheme: self.scheme.clone(),
            prefix: id_prefix.to_string(),
            offset,
            indices: 0..count,
        }
    }
}

/// UUID-shaped opaque id with a trailing `-{index:03}`.
///
/// The hex groups come from `rng`, so the result depends only on the random
/// source state. Not guaranteed globally unique.
pub fn unique_id(index: usize, rng: &mut impl Rng) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    format!("{}-{index:03}", Uuid::from_bytes(bytes).hyphenated())
}

/// The ids generated for one asset type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPool {
    scheme: IdScheme,
    prefix: String,
    offset: usize,
    indices: Range<usize>,
}

impl IdPool {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<String> {
        self.indices.contains(&index).then(|| self.render(index))
    }

    /// Draws an id uniformly; `None` when the pool is empty.
    pub fn choose(&self, rng: &mut impl Rng) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(self.render(rng.gen_range(self.indices.clone())))
    }

    /// Membership test without rendering the pool.
    pub fn contains(&self, id: &str) -> bool {
        let parsed = match &self.scheme {
            IdScheme::PerType => id
                .strip_prefix(self.prefix.as_str())
                .and_then(|rest| rest.strip_prefix('-'))
                .and_then(|digits| digits.parse::<usize>().ok()),
            IdScheme::Tenant { tenant_id } => id
                .strip_prefix(tenant_id.as_str())
                .and_then(|rest| rest.strip_prefix("-asset-"))
                .and_then(|digits| digits.parse::<usize>().ok())
                .and_then(|seq| seq.checked_sub(self.offset)),
        };
        // Re-rendering rejects non-canonical spellings such as missing padding.
        parsed.is_some_and(|index| self.indices.contains(&index) && self.render(index) == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        self.indices.clone().map(|i| self.render(i))
    }

    fn render(&self, index: usize) -> String {
        match &self.scheme {
            IdScheme::PerType => format!("{}-{index:06}", self.prefix),
            IdScheme::Tenant { tenant_id } => {
                format!("{tenant_id}-asset-{:06}", self.offset + index)
            }
        }
    }
}

/// Id pools keyed by asset type tag.
#[derive(Debug, Clone, Default)]
pub struct IdPools {
    pools: IndexMap<String, IdPool>,
}

impl IdPools {
    pub fn insert(&mut self, tag: impl Into<String>, pool: IdPool) {
        self.pools.insert(tag.into(), pool);
    }

    pub fn get(&self, tag: &str) -> Option<&IdPool> {
        self.pools.get(tag)
    }

    /// Size of the pool for `tag`; zero when the type was never generated.
    pub fn len_of(&self, tag: &str) -> usize {
        self.get(tag).map_or(0, IdPool::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IdPool)> {
        self.pools.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_per_type_ids() {
        let ids = IdAllocator::per_type();
        assert_eq!(ids.asset_id("wall", 500, 7), "wall-000007");
        assert_eq!(ids.relationship_id("hosted", 42), "rel-hosted-000042");
    }

    #[test]
    fn test_tenant_ids_share_sequence() {
        let ids = IdAllocator::tenant("tenant_0003");
        assert_eq!(ids.asset_id("wall", 0, 0), "tenant_0003-asset-000000");
        assert_eq!(ids.asset_id("door", 120, 5), "tenant_0003-asset-000125");
        assert_eq!(ids.relationship_id("hosted", 9), "tenant_0003-rel-000009");
    }

    #[test]
    fn test_pool_matches_generated_ids() {
        let ids = IdAllocator::tenant("tenant_0001");
        let pool = ids.pool("room", 30, 4);

        let rendered: Vec<String> = pool.iter().collect();
        let expected: Vec<String> = (0..4).map(|i| ids.asset_id("room", 30, i)).collect();
        assert_eq!(rendered, expected);
        assert!(pool.contains("tenant_0001-asset-000033"));
        assert!(!pool.contains("tenant_0001-asset-000034"));
        assert_eq!(pool.get(4), None);
    }

    #[test]
    fn test_empty_pool_never_draws() {
        let pool = IdAllocator::per_type().pool("wall", 0, 0);
        let mut rng = rand::thread_rng();
        assert!(pool.is_empty());
        assert_eq!(pool.choose(&mut rng), None);
    }

    #[test]
    fn test_choose_stays_in_pool() {
        let pool = IdAllocator::per_type().pool("door", 0, 3);
        let mut rng = StdRng::seed_from_u64(12345);
        for _ in 0..50 {
            let id = pool.choose(&mut rng).unwrap();
            assert!(pool.contains(&id), "{id} not in pool");
        }
    }

    #[test]
    fn test_unique_id_shape_and_determinism() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        let id = unique_id(5, &mut a);
        assert_eq!(id, unique_id(5, &mut b));

        let groups: Vec<&str> = id.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(lengths, [8, 4, 4, 4, 12, 3]);
        assert_eq!(groups[5], "005");
        assert!(groups[..5]
            .iter()
            .all(|g| g.chars().all(|c| c.is_ascii_hexdigit())));
    }

    #[test]
    fn test_tenant_pools_do_not_overlap() {
        let catalogue = crate::catalogue::standard().unwrap();
        let allocation = crate::allocation::allocate(100, &catalogue.weights());
        let pools = IdAllocator::tenant("tenant_0001").pools(&catalogue, &allocation);

        let mut seen = std::collections::HashSet::new();
        for (_, pool) in pools.iter() {
            for id in pool.iter() {
                assert!(seen.insert(id.clone()), "duplicate {id}");
            }
        }
        assert_eq!(seen.len(), allocation.total());
        assert!(seen.contains("tenant_0001-asset-000000"));
    }

    #[test]
    fn test_pools_lookup() {
        let ids = IdAllocator::per_type();
        let mut pools = IdPools::default();
        pools.insert("walls", ids.pool("wall", 0, 10));
        assert_eq!(pools.len_of("walls"), 10);
        assert_eq!(pools.len_of("doors"), 0);
    }
}
