/// Whether the list is being actively scrolled.
///
/// Hosts use this to degrade rendering cost (placeholders, skipped animations) during fast
/// scroll. See [`crate::ScrollingDebouncer`] for the transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollingState {
    #[default]
    Idle,
    Scrolling,
}

impl ScrollingState {
    pub fn is_scrolling(self) -> bool {
        self == Self::Scrolling
    }
}

/// A lightweight snapshot of the engine inputs.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineState {
    pub count: usize,
    pub scroll_offset: u64,
    pub viewport_height: u32,
    pub scrolling: ScrollingState,
}
