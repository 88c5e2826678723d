//! Long-tail parameter bags for large-scale workloads.
//!
//! Production exports carry a few hundred parameters per element with a heavy
//! tail into the thousands. [`PropertyCountDistribution`] reproduces the
//! observed percentiles (P50 287, P75 592, P95 997, P99 4491) and
//! [`LongTailProperties`] fills a parameter map with that many entries.

use rand::Rng;
use rand_distr::Distribution;

use aec_model::models::{ChildMap, ComponentNode};

use super::{measure, round2, text_parameter};

/// Number of parameters on one asset, drawn from four bands.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyCountDistribution;

impl PropertyCountDistribution {
    /// `(cumulative probability, min, max)` per band.
    const BANDS: [(f64, usize, usize); 4] = [
        (0.50, 114, 287),
        (0.75, 288, 592),
        (0.95, 593, 997),
        (1.00, 998, 4491),
    ];
}

impl Distribution<usize> for PropertyCountDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let roll: f64 = rng.r#gen();
        let (_, min, max) = Self::BANDS
            .iter()
            .copied()
            .find(|(cumulative, _, _)| roll < *cumulative)
            .unwrap_or(Self::BANDS[3]);
        rng.gen_range(min..=max)
    }
}

/// Kind of one long-tail parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Area,
    Volume,
    Length,
    Width,
    Height,
    Cost,
    Mark,
    Comments,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 8] = [
        PropertyKind::Area,
        PropertyKind::Volume,
        PropertyKind::Length,
        PropertyKind::Width,
        PropertyKind::Height,
        PropertyKind::Cost,
        PropertyKind::Mark,
        PropertyKind::Comments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Area => "area",
            PropertyKind::Volume => "volume",
            PropertyKind::Length => "length",
            PropertyKind::Width => "width",
            PropertyKind::Height => "height",
            PropertyKind::Cost => "cost",
            PropertyKind::Mark => "mark",
            PropertyKind::Comments => "comments",
        }
    }

    /// `(min, max, unit)` for measured kinds, `None` for text kinds.
    fn measure_range(&self) -> Option<(f64, f64, &'static str)> {
        match self {
            PropertyKind::Area => Some((50.0, 500.0, "sqft")),
            PropertyKind::Volume => Some((100.0, 1000.0, "cuft")),
            PropertyKind::Length => Some((5.0, 50.0, "ft")),
            PropertyKind::Width => Some((0.5, 2.0, "ft")),
            PropertyKind::Height => Some((8.0, 14.0, "ft")),
            PropertyKind::Cost => Some((100.0, 10000.0, "USD")),
            PropertyKind::Mark | PropertyKind::Comments => None,
        }
    }

    pub fn sample_node(&self, rng: &mut impl Rng) -> ComponentNode {
        if let Some((min, max, unit)) = self.measure_range() {
            return measure(self.as_str(), round2(rng.gen_range(min..=max)), unit);
        }
        match self {
            PropertyKind::Mark => {
                text_parameter(self.as_str(), format!("M-{}", rng.gen_range(1..=999)))
            }
            _ => {
                const STATUSES: [&str; 3] = ["Approved", "Pending", "Review"];
                text_parameter(self.as_str(), STATUSES[rng.gen_range(0..STATUSES.len())])
            }
        }
    }
}

/// Appends a variable-size parameter bag to an asset's parameter map.
#[derive(Debug, Clone, Default)]
pub struct LongTailProperties {
    counts: PropertyCountDistribution,
}

impl LongTailProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a count and inserts that many parameters.
    ///
    /// Each slot picks its kind independently. A kind keeps its bare name the
    /// first time it appears in the map; later slots are keyed
    /// `{kind}_{slot}`, so existing parameters are never overwritten.
    pub fn fill(&self, parameters: &mut ChildMap, rng: &mut impl Rng) -> usize {
        let count = self.counts.sample(rng);
        for slot in 0..count {
            let kind = PropertyKind::ALL[rng.gen_range(0..PropertyKind::ALL.len())];
            let key = if parameters.contains_key(kind.as_str()) {
                format!("{}_{slot}", kind.as_str())
            } else {
                kind.as_str().to_string()
            };
            parameters.insert(key, kind.sample_node(rng));
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aec_model::models::LeafValue;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_count_bands() {
        let dist = PropertyCountDistribution;
        let mut rng = StdRng::seed_from_u64(12345);

        let samples: Vec<usize> = (0..20_000).map(|_| dist.sample(&mut rng)).collect();
        assert!(samples.iter().all(|n| (114..=4491).contains(n)));

        let share = |max: usize| {
            samples.iter().filter(|n| **n <= max).count() as f64 / samples.len() as f64
        };
        assert!((share(287) - 0.50).abs() < 0.02, "P50 share {}", share(287));
        assert!((share(592) - 0.75).abs() < 0.02, "P75 share {}", share(592));
        assert!((share(997) - 0.95).abs() < 0.02, "P95 share {}", share(997));
    }

    #[test]
    fn test_fill_key_naming() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut parameters = ChildMap::new();
        parameters.insert("area".to_string(), measure("area", 120.0, "sqft"));

        let count = LongTailProperties::new().fill(&mut parameters, &mut rng);

        assert_eq!(parameters.len(), count + 1);
        // The builder's own area parameter is untouched.
        assert_eq!(
            parameters["area"]
                .child("value")
                .and_then(ComponentNode::as_leaf)
                .and_then(LeafValue::as_f64),
            Some(120.0)
        );
        for key in parameters.keys().skip(1) {
            let kind = key.split('_').next().unwrap();
            assert!(PropertyKind::ALL.iter().any(|k| k.as_str() == kind), "{key}");
        }
    }

    #[test]
    fn test_sample_node_ranges() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let node = PropertyKind::Width.sample_node(&mut rng);
            let value = node
                .child("value")
                .and_then(ComponentNode::as_leaf)
                .and_then(LeafValue::as_f64)
                .unwrap();
            assert!((0.5..=2.0).contains(&value));

            let mark = PropertyKind::Mark.sample_node(&mut rng);
            let text = mark.child("value").and_then(ComponentNode::as_leaf).unwrap();
            assert!(text.as_str().unwrap().starts_with("M-"));
        }
    }
}
