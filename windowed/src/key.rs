#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeySizeMap<K> = HashMap<K, u32>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySizeMap<K> = BTreeMap<K, u32>;

/// Bound required of stable item keys.
///
/// With `feature = "std"` keys are hashed (`Hash + Eq`); without it they are ordered (`Ord`).
#[cfg(feature = "std")]
pub trait CacheKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> CacheKey for K {}

/// Bound required of stable item keys.
///
/// With `feature = "std"` keys are hashed (`Hash + Eq`); without it they are ordered (`Ord`).
#[cfg(not(feature = "std"))]
pub trait CacheKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> CacheKey for K {}
