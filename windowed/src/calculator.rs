use alloc::vec::Vec;
use core::cmp;

use crate::height::HeightResolver;
use crate::key::CacheKey;
use crate::{VirtualizedItem, Window};

/// Inputs of a single recompute pass, apart from the item heights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowParams {
    pub count: usize,
    pub scroll_offset: u64,
    pub viewport_height: u32,
    pub overscan: usize,
    pub end_slack: u32,
}

/// Computes the window of items to materialize.
///
/// The window is the first item whose span reaches past `scroll_offset` through the first
/// item whose bottom edge (plus `end_slack`) reaches `scroll_offset + viewport_height`,
/// widened by `overscan` items on each side and clamped to `0..count`.
///
/// The pass is a full prefix-sum walk, `O(count)`, and is pure: identical inputs yield an
/// identical window. Constant-height lists take a closed-form path with the same results.
pub fn compute_window<K: CacheKey>(
    resolver: &HeightResolver<'_, K>,
    params: WindowParams,
) -> Window<K> {
    if params.count == 0 {
        return Window::empty();
    }

    match resolver.constant() {
        Some(height) if height > 0 => compute_constant(resolver, params, height),
        _ => compute_scan(resolver, params),
    }
}

fn compute_scan<K: CacheKey>(
    resolver: &HeightResolver<'_, K>,
    params: WindowParams,
) -> Window<K> {
    let count = params.count;
    let visible_start = params.scroll_offset;
    let visible_end = params
        .scroll_offset
        .saturating_add(params.viewport_height as u64);
    let slack = params.end_slack as u64;

    let mut heights = Vec::with_capacity(count);
    let mut total = 0u64;
    let mut start = None;
    let mut end = None;

    for index in 0..count {
        let height = resolver.resolve(index);
        heights.push(height);
        let bottom = total.saturating_add(height as u64);
        total = bottom;

        if start.is_none() && bottom > visible_start {
            start = Some(index);
        }
        if end.is_none() && bottom.saturating_add(slack) >= visible_end {
            end = Some(index);
        }
    }

    let last = count - 1;
    let start = start.unwrap_or(last);
    let end = cmp::max(end.unwrap_or(last), start);
    let (first, last) = expand(start, end, params.overscan, last);

    let mut offset_top: u64 = heights[..first].iter().map(|&h| h as u64).sum();
    let mut items = Vec::with_capacity(last - first + 1);
    for (index, &height) in heights.iter().enumerate().take(last + 1).skip(first) {
        items.push(VirtualizedItem {
            index,
            key: resolver.key(index),
            height,
            offset_top,
        });
        offset_top = offset_top.saturating_add(height as u64);
    }

    vtrace!(count, first, last, total, "compute_window (scan)");
    Window {
        items,
        total_height: total,
    }
}

fn compute_constant<K: CacheKey>(
    resolver: &HeightResolver<'_, K>,
    params: WindowParams,
    height: u32,
) -> Window<K> {
    let count = params.count;
    let h = height as u64;
    let total = (count as u64).saturating_mul(h);
    let last = count - 1;

    let visible_end = params
        .scroll_offset
        .saturating_add(params.viewport_height as u64);

    // First index whose bottom edge is past the visible start.
    let start = if params.scroll_offset >= total {
        last
    } else {
        (params.scroll_offset / h) as usize
    };
    // First index whose bottom edge plus slack reaches the visible end.
    let reach = visible_end.saturating_sub(params.end_slack as u64);
    let end = usize::try_from(reach.div_ceil(h).saturating_sub(1)).unwrap_or(usize::MAX);
    let end = cmp::max(cmp::min(end, last), start);

    let (first, last) = expand(start, end, params.overscan, last);
    let items = (first..=last)
        .map(|index| VirtualizedItem {
            index,
            key: resolver.key(index),
            height,
            offset_top: (index as u64).saturating_mul(h),
        })
        .collect();

    vtrace!(count, first, last, total, "compute_window (constant)");
    Window {
        items,
        total_height: total,
    }
}

fn expand(start: usize, end: usize, overscan: usize, last: usize) -> (usize, usize) {
    (
        start.saturating_sub(overscan),
        cmp::min(last, end.saturating_add(overscan)),
    )
}
