use fxhash::FxHashSet;

use crate::error::{Error, Result};

use super::{tiles, IndexHashTable, TileEncoder};

#[derive(Debug, Clone)]
pub struct TileCoderConfig {
    /// Capacity of the index hash table, i.e. the number of features.
    pub iht_size: usize,
    pub num_tilings: usize,
    /// Tiles spanning each dimension's range in a single tiling.
    pub tiles_per_dimension: usize,
    /// `(min, max)` of every state dimension.
    pub bounds: Vec<(f64, f64)>,
}

impl Default for TileCoderConfig {
    /// Mountain Car position and velocity.
    fn default() -> Self {
        Self {
            iht_size: 4096,
            num_tilings: 8,
            tiles_per_dimension: 8,
            bounds: vec![(-1.2, 0.6), (-0.07, 0.07)],
        }
    }
}

impl TileCoderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iht_size == 0 {
            return Err(Error::InvalidTileCoder("iht_size must be positive".into()));
        }
        if self.num_tilings == 0 {
            return Err(Error::InvalidTileCoder("num_tilings must be positive".into()));
        }
        if self.tiles_per_dimension == 0 {
            return Err(Error::InvalidTileCoder(
                "tiles_per_dimension must be positive".into(),
            ));
        }
        if self.bounds.is_empty() {
            return Err(Error::InvalidTileCoder("at least one dimension is required".into()));
        }
        for (dim, (min, max)) in self.bounds.iter().enumerate() {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(Error::InvalidTileCoder(format!(
                    "dimension {} has invalid bounds ({}, {})",
                    dim, min, max
                )));
            }
        }
        Ok(())
    }
}

/// Tile coder for bounded continuous states backed by an [`IndexHashTable`].
#[derive(Debug, Clone)]
pub struct TileCoder {
    iht: IndexHashTable,
    num_tilings: usize,
    tiles_per_dimension: f64,
    scales: Vec<(f64, f64)>,
}

impl TileCoder {
    pub fn new(config: TileCoderConfig) -> Result<Self> {
        config.validate()?;
        let scales = config
            .bounds
            .iter()
            .map(|(min, max)| (*min, config.tiles_per_dimension as f64 / (max - min)))
            .collect();
        Ok(Self {
            iht: IndexHashTable::new(config.iht_size),
            num_tilings: config.num_tilings,
            tiles_per_dimension: config.tiles_per_dimension as f64,
            scales,
        })
    }

    pub fn num_tilings(&self) -> usize {
        self.num_tilings
    }

    pub fn dimensions(&self) -> usize {
        self.scales.len()
    }

    pub fn iht(&self) -> &IndexHashTable {
        &self.iht
    }

    /// Active tiles of `state` with `tags` appended to every tiling's
    /// coordinates.
    ///
    /// Components outside their bounds are clamped onto the edge tiles.
    /// Hash collisions in a full table can map two tilings to the same
    /// index, so the result is deduplicated and may be shorter than
    /// `num_tilings`.
    pub fn encode_with_tags(&mut self, state: &[f64], tags: &[i64]) -> Result<Vec<usize>> {
        if state.len() != self.scales.len() {
            return Err(Error::StateDimension {
                expected: self.scales.len(),
                got: state.len(),
            });
        }
        if let Some((index, value)) = state.iter().enumerate().find(|(_, x)| !x.is_finite()) {
            return Err(Error::InvalidState {
                index,
                value: *value,
            });
        }
        let scaled: Vec<f64> = state
            .iter()
            .zip(&self.scales)
            .map(|(x, (min, scale))| ((x - min) * scale).clamp(0.0, self.tiles_per_dimension))
            .collect();
        let mut active = tiles(&mut self.iht, self.num_tilings, &scaled, tags, false);
        let mut seen = FxHashSet::default();
        active.retain(|t| seen.insert(*t));
        Ok(active)
    }
}

impl TileEncoder<[f64]> for TileCoder {
    fn table_size(&self) -> usize {
        self.iht.size()
    }

    fn encode(&mut self, state: &[f64]) -> Result<Vec<usize>> {
        self.encode_with_tags(state, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_config() {
        let config = TileCoderConfig {
            iht_size: 0,
            ..Default::default()
        };
        assert!(matches!(TileCoder::new(config), Err(Error::InvalidTileCoder(_))));

        let config = TileCoderConfig {
            bounds: vec![(1.0, 1.0)],
            ..Default::default()
        };
        assert!(matches!(TileCoder::new(config), Err(Error::InvalidTileCoder(_))));
    }

    #[test]
    fn rejects_wrong_dimension() {
        let mut coder = TileCoder::new(TileCoderConfig::default()).unwrap();
        let err = coder.encode(&[0.0][..]).unwrap_err();
        assert!(matches!(err, Error::StateDimension { expected: 2, got: 1 }));
        assert_eq!(coder.iht().count(), 0);
    }

    #[test]
    fn rejects_non_finite_state() {
        let mut coder = TileCoder::new(TileCoderConfig::default()).unwrap();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = coder.encode(&[-0.5, bad][..]).unwrap_err();
            assert!(matches!(err, Error::InvalidState { index: 1, .. }));
        }
        assert_eq!(coder.iht().count(), 0);
    }

    #[test]
    fn out_of_range_states_clamp_to_edges() {
        let mut coder = TileCoder::new(TileCoderConfig::default()).unwrap();
        let far_right = coder.encode(&[1e300, 0.0][..]).unwrap();
        assert_eq!(far_right, coder.encode(&[5.0, 0.0][..]).unwrap());
        assert_eq!(far_right.len(), 8);

        let far_left = coder.encode(&[-1e300, -1e300][..]).unwrap();
        assert_eq!(far_left, coder.encode(&[-1.2, -0.07][..]).unwrap());
        assert!(far_left.iter().chain(&far_right).all(|t| *t < 4096));
    }

    #[test]
    fn collisions_are_deduplicated() {
        let mut coder = TileCoder::new(TileCoderConfig {
            iht_size: 1,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(coder.encode(&[-0.5, 0.0][..]).unwrap(), vec![0]);
        assert_eq!(coder.encode(&[0.3, 0.05][..]).unwrap(), vec![0]);
    }

    #[test]
    fn tiles_stay_in_table() {
        let mut coder = TileCoder::new(TileCoderConfig {
            iht_size: 16,
            ..Default::default()
        })
        .unwrap();
        for i in 0..50 {
            let position = -1.2 + 1.8 * i as f64 / 50.0;
            let active = coder.encode(&[position, 0.01][..]).unwrap();
            assert!(!active.is_empty() && active.len() <= 8);
            assert!(active.iter().all(|t| *t < 16));
            let mut unique = active.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), active.len());
        }
        assert!(coder.iht().is_full());
        assert!(coder.iht().overfull_count() > 0);
    }

    #[test]
    fn deterministic_across_instances() {
        let states = [[-0.5, 0.0], [0.1, -0.03], [-0.5, 0.0], [0.55, 0.06]];
        let mut a = TileCoder::new(TileCoderConfig::default()).unwrap();
        let mut b = TileCoder::new(TileCoderConfig::default()).unwrap();
        for state in states.iter() {
            assert_eq!(a.encode(&state[..]).unwrap(), b.encode(&state[..]).unwrap());
        }
    }

    #[test]
    fn tags_split_features() {
        let mut coder = TileCoder::new(TileCoderConfig::default()).unwrap();
        let push_left = coder.encode_with_tags(&[-0.5, 0.0], &[0]).unwrap();
        let push_right = coder.encode_with_tags(&[-0.5, 0.0], &[2]).unwrap();
        assert!(push_left.iter().all(|t| !push_right.contains(t)));
    }
}
