//! # weekgrid-engine
//!
//! Interval engine for an interactive weekly availability grid.
//!
//! A week is seven independent day tracks holding half-open minute blocks
//! `[start, end)`, with `1440` (written `"24:00"`) as the end-of-day
//! sentinel. The engine owns every behavioral rule of such a grid: pointer
//! gestures that create, resize and move blocks with 15-minute snapping,
//! boundary resolution that fences each drag inside its free gap, and a
//! manual entry form whose commits destructively replace whatever they
//! overlap. It is pure and synchronous: no I/O, no clocks, no timezones.
//! Mutations return new snapshots and the presentation layer owns all
//! state, including the single live drag session.
//!
//! ## Quick start
//!
//! ```rust
//! use weekgrid_engine::{begin_create, end_session, update_session, Day, WeekSchedule};
//!
//! // Sweep out 09:00-17:00 on an empty third day track.
//! let week = WeekSchedule::new();
//! let day = Day::new(2).unwrap();
//!
//! let session = begin_create(&week, day, 540.0).unwrap();
//! let moved = update_session(&week, &session, 1020.0);
//! let done = end_session(&week, &moved.session, 1020.0);
//!
//! let block = done.schedule.day_blocks(day).next().unwrap();
//! assert_eq!((block.start, block.end), (540, 1020));
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `"HH:MM"` ↔ minute-of-day conversion and the `24:00` sentinel
//! - [`schedule`] — the immutable, `(day, start)`-sorted block store
//! - [`bounds`] — free-gap resolution around an anchor minute
//! - [`drag`] — the create/resize/move gesture state machine
//! - [`manual`] — manual entry validation and destructive merge
//! - [`error`] — error types

pub mod bounds;
pub mod drag;
pub mod error;
pub mod manual;
pub mod schedule;
pub mod time;

pub use bounds::{find_free_gap, Gap};
pub use drag::{
    begin_create, begin_edit, end_session, update_session, DragEnd, DragOutcome, DragSession,
    DragUpdate, GridGeometry, Handle, SessionKind, MIN_CREATE_SPAN, SNAP_STEP,
};
pub use error::{Result, ScheduleError};
pub use manual::{apply_entry, ManualEntry, ManualSave, SaveKind};
pub use schedule::{Block, BlockId, Day, WeekSchedule};
pub use time::{display_time, to_minutes, to_time, Minute, MINUTES_PER_DAY};
