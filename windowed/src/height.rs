use crate::cache::MeasurementCache;
use crate::key::CacheKey;
use crate::options::{HeightFn, ItemHeight, KeyFn};
use crate::{ConfigError, EngineOptions, HeightMode};

/// The validated height source of an engine.
#[derive(Clone)]
pub(crate) enum HeightStrategy {
    Fixed(ItemHeight),
    Estimated(HeightFn),
}

impl HeightStrategy {
    pub(crate) fn from_options<K>(options: &EngineOptions<K>) -> Result<Self, ConfigError> {
        options.validate()?;
        if let Some(item_height) = &options.item_height {
            return Ok(Self::Fixed(item_height.clone()));
        }
        options
            .estimate_item_height
            .clone()
            .map(Self::Estimated)
            .ok_or(ConfigError::MissingEstimator)
    }

    pub(crate) fn mode(&self) -> HeightMode {
        match self {
            Self::Fixed(_) => HeightMode::Fixed,
            Self::Estimated(_) => HeightMode::Dynamic,
        }
    }

    /// The constant height, when every item shares one.
    pub(crate) fn constant(&self) -> Option<u32> {
        match self {
            Self::Fixed(ItemHeight::Constant(h)) => Some(*h),
            _ => None,
        }
    }
}

impl core::fmt::Debug for HeightStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(h) => f.debug_tuple("Fixed").field(h).finish(),
            Self::Estimated(_) => f.write_str("Estimated(..)"),
        }
    }
}

/// Resolves the height of an item by index.
///
/// Resolution order, first match wins:
/// 1. the fixed height, which is authoritative;
/// 2. the measured height recorded for the item's key;
/// 3. the estimate.
///
/// Indices are passed straight to the caller's key and height functions, so they must be
/// below the engine's current `count`. [`crate::Engine::resolve`] checks this for you.
pub struct HeightResolver<'a, K> {
    strategy: &'a HeightStrategy,
    get_item_key: &'a KeyFn<K>,
    cache: &'a MeasurementCache<K>,
}

impl<'a, K: CacheKey> HeightResolver<'a, K> {
    pub(crate) fn new(
        strategy: &'a HeightStrategy,
        get_item_key: &'a KeyFn<K>,
        cache: &'a MeasurementCache<K>,
    ) -> Self {
        Self {
            strategy,
            get_item_key,
            cache,
        }
    }

    pub fn mode(&self) -> HeightMode {
        self.strategy.mode()
    }

    /// `index` must be below `count`.
    pub fn key(&self, index: usize) -> K {
        (self.get_item_key)(index)
    }

    /// `index` must be below `count`.
    pub fn resolve(&self, index: usize) -> u32 {
        match self.strategy {
            HeightStrategy::Fixed(item_height) => item_height.height(index),
            HeightStrategy::Estimated(estimate) => {
                let key = self.key(index);
                self.cache.get(&key).unwrap_or_else(|| estimate(index))
            }
        }
    }

    /// Whether the height of `index` comes from a recorded measurement.
    pub fn is_measured(&self, index: usize) -> bool {
        match self.strategy {
            HeightStrategy::Fixed(_) => false,
            HeightStrategy::Estimated(_) => self.cache.contains(&self.key(index)),
        }
    }

    pub(crate) fn constant(&self) -> Option<u32> {
        self.strategy.constant()
    }
}

impl<K> core::fmt::Debug for HeightResolver<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeightResolver")
            .field("strategy", self.strategy)
            .field("cache", self.cache)
            .finish_non_exhaustive()
    }
}
