//! Synthetic dataset shared by every format adapter

use crate::config::BenchConfig;
use crate::Result;
use ndarray::Array2;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::BTreeMap;

/// Named arrays as returned by a format's `load`
pub type ArrayMap = BTreeMap<String, Array2<f64>>;

/// Immutable mapping from key to a fixed-shape `f64` matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    arrays: ArrayMap,
}

impl Dataset {
    /// Generate uniform `[0, 1)` values for every configured key
    pub fn generate(config: &BenchConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let [rows, cols] = config.shape;

        let arrays = config
            .keys
            .iter()
            .map(|key| {
                let values = Array2::from_shape_simple_fn((rows, cols), || rng.gen::<f64>());
                (key.clone(), values)
            })
            .collect();

        Ok(Self { arrays })
    }

    /// Wrap existing arrays
    pub fn from_arrays(arrays: ArrayMap) -> Self {
        Self { arrays }
    }

    pub fn get(&self, key: &str) -> Option<&Array2<f64>> {
        self.arrays.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Array2<f64>)> {
        self.arrays.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Raw payload size, excluding any format headers
    pub fn total_bytes(&self) -> u64 {
        self.arrays
            .values()
            .map(|a| (a.len() * std::mem::size_of::<f64>()) as u64)
            .sum()
    }

    /// Exact element-wise comparison against a loaded mapping.
    ///
    /// Returns the first key that is missing or differs, `None` when every
    /// original key round-tripped.
    pub fn first_mismatch(&self, loaded: &ArrayMap) -> Option<String> {
        self.arrays
            .iter()
            .find(|(key, original)| loaded.get(key.as_str()) != Some(*original))
            .map(|(key, _)| key.clone())
    }

    pub fn matches(&self, loaded: &ArrayMap) -> bool {
        self.first_mismatch(loaded).is_none()
    }
}
