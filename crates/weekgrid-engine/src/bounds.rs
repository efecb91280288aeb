//! Free-gap resolution around an anchor minute.
//!
//! Given one day's blocks and an anchor, finds the maximal gap the anchor
//! sits in: the nearest block end at or before it, and the nearest block
//! start at or after it. Gestures clamp every candidate position to this
//! gap, so a drag can never cross into a neighboring block.

use crate::schedule::{BlockId, Day, WeekSchedule};
use crate::time::{Minute, MINUTES_PER_DAY};

/// A maximal free gap: no block on the day (other than an excluded one)
/// intersects `(left, right)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub left: Minute,
    pub right: Minute,
}

/// Resolve the free gap around `anchor` on `day` in a single pass over the
/// day's sorted blocks.
///
/// A block ending at or before the anchor raises `left`; the first block
/// starting at or after the anchor caps `right` and ends the scan. With no
/// constraining neighbors the gap is the whole day, `[0, 1440]`.
///
/// `exclude` removes one block from consideration: an edit gesture must
/// not be fenced in by the very block it is dragging.
///
/// The anchor is assumed not to lie strictly inside a non-excluded block.
/// The create gesture rejects such pointer-downs before resolving bounds;
/// for edit gestures the anchor sits on the grabbed (excluded) block.
pub fn find_free_gap(
    schedule: &WeekSchedule,
    day: Day,
    anchor: Minute,
    exclude: Option<BlockId>,
) -> Gap {
    let mut gap = Gap {
        left: 0,
        right: MINUTES_PER_DAY,
    };

    for block in schedule.day_blocks(day) {
        if Some(block.id) == exclude {
            continue;
        }
        if block.end <= anchor {
            gap.left = gap.left.max(block.end);
        } else if block.start >= anchor {
            gap.right = gap.right.min(block.start);
            break;
        }
    }

    gap
}
