//! The weekly interval store.
//!
//! A [`WeekSchedule`] is an immutable snapshot of every availability block
//! in the week, kept sorted by `(day, start)`. Mutations return a new
//! snapshot and leave the old one intact. Blocks on the same day never
//! overlap at rest; the gesture and manual-entry layers clear or clamp a
//! span before writing it, the store itself only maintains ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::time::{Minute, MINUTES_PER_DAY};

/// A day-of-week partition key, `0..=6`.
///
/// The engine attaches no weekday names or dates; `0` is simply whatever
/// row the presentation layer draws first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

impl Day {
    /// Every day of the week, in grid order.
    pub const ALL: [Day; 7] = [Day(0), Day(1), Day(2), Day(3), Day(4), Day(5), Day(6)];

    /// Validate a raw index into a day.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidDay`] for indices outside `0..=6`.
    pub fn new(index: u8) -> Result<Day> {
        Day::try_from(index)
    }

    /// The raw index, `0..=6`.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl TryFrom<u8> for Day {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Day> {
        if value < 7 {
            Ok(Day(value))
        } else {
            Err(ScheduleError::InvalidDay(value))
        }
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> u8 {
        day.0
    }
}

/// Opaque identifier of a block, unique within one store lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u64);

impl From<u64> for BlockId {
    fn from(raw: u64) -> BlockId {
        BlockId(raw)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One availability block: the half-open minute range `[start, end)` on a
/// single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub day: Day,
    pub start: Minute,
    pub end: Minute,
}

impl Block {
    /// Block length in minutes.
    pub fn duration(&self) -> Minute {
        self.end.saturating_sub(self.start)
    }

    /// Whether the half-open range covers `minute`.
    pub fn contains(&self, minute: Minute) -> bool {
        self.start <= minute && minute < self.end
    }

    /// Whether the half-open range `[start, end)` overlaps this block.
    ///
    /// Touching edges do not overlap.
    pub fn overlaps(&self, start: Minute, end: Minute) -> bool {
        start < self.end && end > self.start
    }
}

/// Immutable snapshot of the whole week.
///
/// Serializes as the bare, ordered block sequence (the persistence
/// contract); deserializing recomputes the id counter from the highest id
/// seen, so blocks minted after a load never collide with loaded ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Block>", into = "Vec<Block>")]
pub struct WeekSchedule {
    blocks: Vec<Block>,
    next_id: u64,
}

impl WeekSchedule {
    /// An empty week.
    pub fn new() -> WeekSchedule {
        WeekSchedule {
            blocks: Vec::new(),
            next_id: 0,
        }
    }

    /// The default week: every day fully available as one `[0, 1440)` block.
    pub fn full_week() -> WeekSchedule {
        let blocks = Day::ALL
            .iter()
            .enumerate()
            .map(|(i, &day)| Block {
                id: BlockId(i as u64),
                day,
                start: 0,
                end: MINUTES_PER_DAY,
            })
            .collect();
        WeekSchedule {
            blocks,
            next_id: Day::ALL.len() as u64,
        }
    }

    /// Every block in the week, sorted by `(day, start)`.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Blocks on one day, in ascending start order.
    pub fn day_blocks(&self, day: Day) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().filter(move |b| b.day == day)
    }

    /// Look up a block by id.
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// The block covering `minute` on `day`, if any.
    pub fn block_at(&self, day: Day, minute: Minute) -> Option<&Block> {
        self.day_blocks(day).find(|b| b.contains(minute))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Insert a new block, minting its id.
    ///
    /// The caller is responsible for having cleared `[start, end)` of
    /// overlapping blocks first; gestures clamp to the free gap and the
    /// manual resolver drops collisions before inserting.
    pub fn insert(&self, day: Day, start: Minute, end: Minute) -> (WeekSchedule, BlockId) {
        debug_assert!(start < end, "inserting an empty block");
        let mut next = self.clone();
        let id = BlockId(next.next_id);
        next.next_id += 1;
        next.blocks.push(Block { id, day, start, end });
        next.resort();
        (next, id)
    }

    /// Rewrite one block's edges. Unknown ids are ignored.
    ///
    /// This is the write path of resize and move drags, which clamp the
    /// edges to the block's free gap before calling.
    pub fn reshape(&self, id: BlockId, start: Minute, end: Minute) -> WeekSchedule {
        let mut next = self.clone();
        if let Some(block) = next.blocks.iter_mut().find(|b| b.id == id) {
            block.start = start;
            block.end = end;
        }
        next.resort();
        next
    }

    /// Remove a block, returning the removed record when the id was present.
    pub fn remove(&self, id: BlockId) -> (WeekSchedule, Option<Block>) {
        let mut next = self.clone();
        let removed = next
            .blocks
            .iter()
            .position(|b| b.id == id)
            .map(|pos| next.blocks.remove(pos));
        (next, removed)
    }

    /// Remove every block on one day, returning how many were dropped.
    pub fn clear_day(&self, day: Day) -> (WeekSchedule, usize) {
        let mut next = self.clone();
        let before = next.blocks.len();
        next.blocks.retain(|b| b.day != day);
        let removed = before - next.blocks.len();
        (next, removed)
    }

    /// Replace one day's blocks wholesale, keeping the given blocks' ids.
    ///
    /// Every block in `replacement` must already carry `day`; blocks on
    /// other days are untouched.
    pub fn replace_day(&self, day: Day, replacement: Vec<Block>) -> WeekSchedule {
        debug_assert!(
            replacement.iter().all(|b| b.day == day),
            "replacement block on the wrong day"
        );
        let mut next = self.clone();
        next.blocks.retain(|b| b.day != day);
        next.blocks.extend(replacement);
        next.resort();
        next
    }

    fn resort(&mut self) {
        self.blocks.sort_by_key(|b| (b.day, b.start));
    }
}

impl Default for WeekSchedule {
    fn default() -> WeekSchedule {
        WeekSchedule::new()
    }
}

impl From<Vec<Block>> for WeekSchedule {
    fn from(mut blocks: Vec<Block>) -> WeekSchedule {
        blocks.sort_by_key(|b| (b.day, b.start));
        let next_id = blocks.iter().map(|b| b.id.0.saturating_add(1)).max().unwrap_or(0);
        WeekSchedule { blocks, next_id }
    }
}

impl From<WeekSchedule> for Vec<Block> {
    fn from(schedule: WeekSchedule) -> Vec<Block> {
        schedule.blocks
    }
}
