use alloc::vec::Vec;

/// Default key type: the item index widened to `u64`.
///
/// Only suitable when the list is never reordered; see [`crate::EngineOptions::dynamic_keyed`].
pub type ItemKey = u64;

/// One materialized item of the current window.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualizedItem<K = ItemKey> {
    pub index: usize,
    pub key: K,
    pub height: u32,
    /// Sum of the heights of every item before `index`.
    pub offset_top: u64,
}

impl<K> VirtualizedItem<K> {
    pub fn offset_bottom(&self) -> u64 {
        self.offset_top.saturating_add(self.height as u64)
    }
}

/// Inclusive index range of a non-empty window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl WindowRange {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }
}

/// The output of one recompute pass: the materialized items plus the total content height.
///
/// The rendering layer positions each item at `offset_top` and sizes a spacer to
/// `total_height` so native scrollbars reflect the full list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window<K = ItemKey> {
    pub items: Vec<VirtualizedItem<K>>,
    pub total_height: u64,
}

impl<K> Window<K> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_height: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn range(&self) -> Option<WindowRange> {
        let first = self.items.first()?;
        let last = self.items.last()?;
        Some(WindowRange {
            start_index: first.index,
            end_index: last.index,
        })
    }

    pub fn start_index(&self) -> Option<usize> {
        self.items.first().map(|it| it.index)
    }

    pub fn end_index(&self) -> Option<usize> {
        self.items.last().map(|it| it.index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, VirtualizedItem<K>> {
        self.items.iter()
    }
}

impl<K> Default for Window<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, K> IntoIterator for &'a Window<K> {
    type Item = &'a VirtualizedItem<K>;
    type IntoIter = core::slice::Iter<'a, VirtualizedItem<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// How item heights are resolved for an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeightMode {
    /// Heights come from `item_height`; measurements are ignored.
    Fixed,
    /// Heights come from the measurement cache, falling back to the estimate.
    Dynamic,
}

/// Result of an accepted measurement report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureOutcome {
    /// The cache changed and a recompute pass ran.
    Recorded,
    /// The cache already held this height for the key; no pass ran.
    Unchanged,
    /// The engine is in fixed mode, so the report has no effect.
    Ignored,
}
