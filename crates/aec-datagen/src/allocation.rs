//! Proportional allocation of a requested total across weighted types.

use indexmap::IndexMap;
use serde::Serialize;

/// Absorbs binary float error so exact multiples are not truncated one short.
const FLOOR_TOLERANCE: f64 = 1e-9;

/// Per-type counts in catalogue order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Allocation {
    counts: IndexMap<String, usize>,
}

impl Allocation {
    pub fn from_counts<K: Into<String>>(counts: impl IntoIterator<Item = (K, usize)>) -> Self {
        Self {
            counts: counts.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Count for `tag`; zero for unknown tags.
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn as_map(&self) -> &IndexMap<String, usize> {
        &self.counts
    }
}

/// Splits `total` across `weights` proportionally.
///
/// Each type gets `floor(total * w / W)`. When the budget covers every type,
/// zero counts are raised to one and any resulting overshoot is taken back
/// from the largest counts. Below that, zero-count types get one unit each,
/// heaviest first, while budget remains. The result never exceeds `total`;
/// truncation shortfall is not redistributed.
pub fn allocate(total: usize, weights: &[(&str, f64)]) -> Allocation {
    let usable = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total_weight: f64 = weights.iter().map(|(_, w)| usable(*w)).sum();

    let mut counts: Vec<usize> = weights
        .iter()
        .map(|(_, w)| {
            if total_weight > 0.0 {
                (total as f64 * usable(*w) / total_weight + FLOOR_TOLERANCE).floor() as usize
            } else {
                0
            }
        })
        .collect();

    let mut sum: usize = counts.iter().sum();

    if total >= weights.len() {
        for count in counts.iter_mut().filter(|c| **c == 0) {
            *count = 1;
            sum += 1;
        }
        while sum > total {
            // First maximum, so ties resolve in catalogue order.
            let Some(largest) = (0..counts.len()).reduce(|best, i| {
                if counts[i] > counts[best] { i } else { best }
            }) else {
                break;
            };
            counts[largest] -= 1;
            sum -= 1;
        }
    } else {
        let mut order: Vec<usize> = (0..weights.len()).collect();
        order.sort_by(|&a, &b| usable(weights[b].1).total_cmp(&usable(weights[a].1)));
        for i in order {
            if sum >= total {
                break;
            }
            if counts[i] == 0 {
                counts[i] = 1;
                sum += 1;
            }
        }
    }

    Allocation::from_counts(
        weights
            .iter()
            .zip(counts)
            .map(|((tag, _), count)| (*tag, count)),
    )
}
