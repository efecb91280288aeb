//! Manual entry resolution: the typed alternative to drag gestures.
//!
//! A draft names a set of target days, one wall-clock start and end, and
//! optionally the id of a block being edited. Committing is destructive:
//! on every target day, existing blocks overlapping the new span are
//! dropped and the span is inserted in their place. Days outside the set
//! are never touched, and the whole commit lands as one snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::schedule::{Block, BlockId, Day, WeekSchedule};
use crate::time::{self, Minute, MINUTES_PER_DAY};

/// A manual entry form draft.
///
/// Times are wall-clock `"HH:MM"` strings straight from the form. An end
/// of exactly `"23:59"` is read as end-of-day (`"24:00"`); the form's time
/// field cannot express the sentinel, so `"23:59"` stands in for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub days: BTreeSet<Day>,
    pub start: String,
    pub end: String,
    /// Id of the block this entry replaces, when editing an existing one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editing: Option<BlockId>,
}

/// How a committed entry is classified for the caller's notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// Inserted without touching anything else.
    Added,
    /// Inserted, dropping at least one overlapping block.
    AddedWithReplacements,
    /// Re-saved an existing block without collisions.
    Updated,
}

/// Result of committing a manual entry.
#[derive(Debug, Clone)]
pub struct ManualSave {
    pub schedule: WeekSchedule,
    pub kind: SaveKind,
    /// Overlapping blocks dropped across all target days.
    pub replaced: usize,
    /// Ids of the freshly inserted blocks, one per target day.
    pub inserted: Vec<BlockId>,
}

/// Validate and commit a manual entry against the current snapshot.
///
/// Validation order matches the form: an empty day set is rejected first,
/// then a span whose end does not lie strictly after its start, checked
/// after the `"23:59"` end-of-day remap. Errors leave the schedule
/// untouched. On success the returned snapshot is complete; observers
/// never see a partial commit.
///
/// When `editing` is set, that block is removed first, wherever it lives,
/// so re-saving an entry yields one block rather than a duplicate.
///
/// # Errors
/// [`ScheduleError::NoDaysSelected`] and [`ScheduleError::EndNotAfterStart`].
pub fn apply_entry(schedule: &WeekSchedule, entry: &ManualEntry) -> Result<ManualSave> {
    if entry.days.is_empty() {
        return Err(ScheduleError::NoDaysSelected);
    }

    let (start, end) = entry_span(entry)?;

    let mut next = match entry.editing {
        Some(id) => schedule.remove(id).0,
        None => schedule.clone(),
    };

    let mut replaced = 0;
    let mut inserted = Vec::with_capacity(entry.days.len());

    for &day in &entry.days {
        let before = next.day_blocks(day).count();
        let kept: Vec<Block> = next
            .day_blocks(day)
            .filter(|b| !b.overlaps(start, end))
            .copied()
            .collect();
        replaced += before - kept.len();

        next = next.replace_day(day, kept);
        let (after, id) = next.insert(day, start, end);
        next = after;
        inserted.push(id);
    }

    let kind = if replaced > 0 {
        SaveKind::AddedWithReplacements
    } else if entry.editing.is_some() {
        SaveKind::Updated
    } else {
        SaveKind::Added
    };

    Ok(ManualSave {
        schedule: next,
        kind,
        replaced,
        inserted,
    })
}

/// The entry's minute span: parsed, end-of-day remapped, and clamped into
/// the day before the order check, so malformed input can never seed an
/// inverted block.
fn entry_span(entry: &ManualEntry) -> Result<(Minute, Minute)> {
    let start = time::to_minutes(&entry.start).min(MINUTES_PER_DAY);
    let end_text = if entry.end == "23:59" {
        "24:00"
    } else {
        entry.end.as_str()
    };
    let end = time::to_minutes(end_text).min(MINUTES_PER_DAY);

    if end <= start {
        return Err(ScheduleError::EndNotAfterStart);
    }
    Ok((start, end))
}
