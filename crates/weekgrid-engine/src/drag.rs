//! The drag state machine behind grid gestures.
//!
//! Three gestures share one session shape: create (sweep over an empty
//! stretch of a day's track), resize (drag a block's start or end handle)
//! and move (drag a block's body). A session opens on pointer-down,
//! advances on every pointer move and closes on pointer-up.
//!
//! The machine is purely functional: every call takes the current schedule
//! snapshot and session, and returns new values. The caller owns all state
//! and holds at most one session at a time; a pointer-down while a session
//! is open is the caller's to ignore.
//!
//! Candidate positions are clamped to the free gap resolved at
//! pointer-down, snapped to the 15-minute grid, then clamped once more so
//! snapping can never step over a neighbor edge that is not 15-aligned.

use crate::bounds::{find_free_gap, Gap};
use crate::schedule::{BlockId, Day, WeekSchedule};
use crate::time::{Minute, MINUTES_PER_DAY};

/// Snapping granularity for every interactive gesture, in minutes.
pub const SNAP_STEP: Minute = 15;

/// Minimum span a create drag must sweep for a block to commit on release.
pub const MIN_CREATE_SPAN: Minute = 15;

/// Maps horizontal pixel positions to grid minutes.
///
/// The grid draws its 24-hour axis over `width_px` pixels starting at
/// `origin_px`, in whatever coordinate space the caller measures pointer
/// events in. The mapping is linear and knows nothing about day rows;
/// which day a gesture belongs to is decided by the row that received the
/// pointer-down. Callers re-measure on layout changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    origin_px: f64,
    width_px: f64,
}

impl GridGeometry {
    /// A mapper for a time axis `width_px` wide starting at `origin_px`.
    /// Widths below one pixel are treated as one.
    pub fn new(origin_px: f64, width_px: f64) -> GridGeometry {
        GridGeometry {
            origin_px,
            width_px: width_px.max(1.0),
        }
    }

    /// The raw (unclamped, unsnapped) minute under pixel `x`.
    ///
    /// Positions left of the origin map below zero and positions past the
    /// right edge map above 1440; gap clamping brings both back in range.
    pub fn minute_at(&self, x: f64) -> f64 {
        (x - self.origin_px) / self.width_px * f64::from(MINUTES_PER_DAY)
    }
}

/// Which part of a block an edit gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// The leading edge; dragging rewrites `start`.
    Start,
    /// The trailing edge; dragging rewrites `end`.
    End,
    /// The body; dragging shifts both edges, preserving duration.
    Move,
}

/// What a session is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Sweeping out a new block over empty track.
    Create,
    /// Reshaping or moving an existing block.
    Edit {
        id: BlockId,
        handle: Handle,
        /// The block's start when the gesture began; move deltas apply to
        /// this, not to the current start, so repeated updates never drift.
        origin_start: Minute,
    },
}

/// Live gesture state between pointer-down and pointer-up.
///
/// `cursor` is the single source of truth for the in-flight position: the
/// create preview derives from it and nothing else re-derives one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    day: Day,
    kind: SessionKind,
    anchor: Minute,
    bounds: Gap,
    cursor: Minute,
}

impl DragSession {
    /// The day row the gesture started on.
    pub fn day(&self) -> Day {
        self.day
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Snapped pointer minute at pointer-down.
    pub fn anchor(&self) -> Minute {
        self.anchor
    }

    /// Free gap resolved at pointer-down; candidates never leave it.
    pub fn bounds(&self) -> Gap {
        self.bounds
    }

    /// Latest snapped candidate minute.
    pub fn cursor(&self) -> Minute {
        self.cursor
    }

    /// The live create preview, spanning anchor to cursor.
    ///
    /// `None` for edit sessions: their live state is the block itself,
    /// already rewritten in the schedule on every update.
    pub fn preview_span(&self) -> Option<(Minute, Minute)> {
        match self.kind {
            SessionKind::Create => {
                Some((self.anchor.min(self.cursor), self.anchor.max(self.cursor)))
            }
            SessionKind::Edit { .. } => None,
        }
    }
}

/// Result of a pointer move: the advanced session, plus a new schedule
/// snapshot when an edit gesture rewrote its block.
#[derive(Debug, Clone)]
pub struct DragUpdate {
    pub session: DragSession,
    pub schedule: Option<WeekSchedule>,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// A create drag committed a new block.
    Created(BlockId),
    /// A create drag swept less than [`MIN_CREATE_SPAN`] and was dropped.
    Discarded,
    /// An edit drag finished; its writes already live in the schedule.
    Updated,
    /// A resize collapsed its block to zero length; the block was removed.
    Removed(BlockId),
}

/// Result of a pointer-up.
#[derive(Debug, Clone)]
pub struct DragEnd {
    pub schedule: WeekSchedule,
    pub outcome: DragOutcome,
}

/// Open a create session from a pointer-down on a day's track.
///
/// The pointer minute is snapped first; a snapped anchor landing inside an
/// existing block is an ignored gesture and returns `None`. Otherwise the
/// session is fenced into the free gap around the anchor.
pub fn begin_create(schedule: &WeekSchedule, day: Day, raw_minute: f64) -> Option<DragSession> {
    let anchor = snap(raw_minute);
    if schedule.block_at(day, anchor).is_some() {
        return None;
    }
    let bounds = find_free_gap(schedule, day, anchor, None);
    Some(DragSession {
        day,
        kind: SessionKind::Create,
        anchor,
        bounds,
        cursor: anchor,
    })
}

/// Open an edit session from a pointer-down on a block's handle or body.
///
/// Returns `None` when the id is not in the schedule. Bounds are resolved
/// at the block's own start with the block excluded: the gap fences the
/// gesture between the block's neighbors even when the snapped pointer
/// lands a few minutes inside one of them.
pub fn begin_edit(
    schedule: &WeekSchedule,
    id: BlockId,
    handle: Handle,
    raw_minute: f64,
) -> Option<DragSession> {
    let block = schedule.get(id)?;
    let anchor = snap(raw_minute);
    let bounds = find_free_gap(schedule, block.day, block.start, Some(id));
    Some(DragSession {
        day: block.day,
        kind: SessionKind::Edit {
            id,
            handle,
            origin_start: block.start,
        },
        anchor,
        bounds,
        cursor: anchor,
    })
}

/// Advance a session to a new pointer position.
///
/// Create sessions only move their cursor; the store is untouched until
/// release. Edit sessions rewrite the grabbed block on every update and
/// return the new snapshot:
///
/// - start handle: `start = min(candidate, end)` -- the edge may touch,
///   but never cross, its opposite;
/// - end handle: `end = max(candidate, start)`, symmetrically;
/// - move: the delta from the anchor shifts the block's original start,
///   clamped so the whole block stays inside the gap; duration never
///   changes.
pub fn update_session(
    schedule: &WeekSchedule,
    session: &DragSession,
    raw_minute: f64,
) -> DragUpdate {
    let candidate = candidate_minute(session, raw_minute);
    let mut next = *session;
    next.cursor = candidate;

    let rewritten = match session.kind {
        SessionKind::Create => None,
        SessionKind::Edit {
            id,
            handle,
            origin_start,
        } => schedule.get(id).map(|block| {
            let (start, end) = match handle {
                Handle::Start => (candidate.min(block.end), block.end),
                Handle::End => (block.start, candidate.max(block.start)),
                Handle::Move => {
                    let duration = block.duration();
                    let start = shifted_start(session, origin_start, duration, candidate);
                    (start, start + duration)
                }
            };
            schedule.reshape(id, start, end)
        }),
    };

    DragUpdate {
        session: next,
        schedule: rewritten,
    }
}

/// Close a session at its release position.
///
/// A create session commits the span between anchor and final candidate as
/// a new block iff it reaches [`MIN_CREATE_SPAN`]; shorter sweeps (and
/// plain clicks) are discarded. Edit sessions already wrote every
/// intermediate position; release only removes the block when a resize
/// collapsed it to zero length, restoring `start < end` at rest.
///
/// A release outside the grid behaves as the most extreme in-gap position,
/// never as an abort.
pub fn end_session(schedule: &WeekSchedule, session: &DragSession, raw_minute: f64) -> DragEnd {
    match session.kind {
        SessionKind::Create => {
            let candidate = candidate_minute(session, raw_minute);
            let start = session.anchor.min(candidate);
            let end = session.anchor.max(candidate);
            if end - start >= MIN_CREATE_SPAN {
                let (next, id) = schedule.insert(session.day, start, end);
                DragEnd {
                    schedule: next,
                    outcome: DragOutcome::Created(id),
                }
            } else {
                DragEnd {
                    schedule: schedule.clone(),
                    outcome: DragOutcome::Discarded,
                }
            }
        }
        SessionKind::Edit { id, .. } => match schedule.get(id) {
            Some(block) if block.duration() == 0 => {
                let (next, _) = schedule.remove(id);
                DragEnd {
                    schedule: next,
                    outcome: DragOutcome::Removed(id),
                }
            }
            _ => DragEnd {
                schedule: schedule.clone(),
                outcome: DragOutcome::Updated,
            },
        },
    }
}

/// Snap a raw minute to the nearest [`SNAP_STEP`] boundary, clamped into
/// the day, `0..=1440`.
fn snap(raw_minute: f64) -> Minute {
    let stepped = (raw_minute / f64::from(SNAP_STEP)).round() * f64::from(SNAP_STEP);
    stepped.clamp(0.0, f64::from(MINUTES_PER_DAY)) as Minute
}

/// Clamp to the session gap, snap, clamp again. The second clamp keeps a
/// snapped candidate from stepping past a gap edge that is not 15-aligned.
fn candidate_minute(session: &DragSession, raw_minute: f64) -> Minute {
    let Gap { left, right } = session.bounds;
    let clamped = raw_minute.clamp(f64::from(left), f64::from(right));
    snap(clamped).clamp(left, right)
}

/// New start for a moved block: original start shifted by the cursor's
/// delta from the anchor, clamped so `[start, start + duration)` stays
/// inside the session gap.
fn shifted_start(
    session: &DragSession,
    origin_start: Minute,
    duration: Minute,
    candidate: Minute,
) -> Minute {
    let delta = i32::from(candidate) - i32::from(session.anchor);
    let shifted = i32::from(origin_start) + delta;
    let left = i32::from(session.bounds.left);
    // The gap always fits the block; the max guards a degenerate empty gap.
    let right_limit = (i32::from(session.bounds.right) - i32::from(duration)).max(left);
    shifted.clamp(left, right_limit) as Minute
}
