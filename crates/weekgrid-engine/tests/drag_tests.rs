//! Tests for the create/resize/move drag state machine.
//!
//! Raw pointer minutes are fed straight to the machine; pixel mapping is
//! covered separately in `geometry_tests.rs`.

use weekgrid_engine::{
    begin_create, begin_edit, end_session, update_session, BlockId, Day, DragOutcome, Handle,
    Minute, WeekSchedule,
};

/// Helper to build a validated day index.
fn day(index: u8) -> Day {
    Day::new(index).unwrap()
}

/// Helper to populate one day with the given spans.
fn week_with(on: Day, spans: &[(Minute, Minute)]) -> WeekSchedule {
    let mut week = WeekSchedule::new();
    for &(start, end) in spans {
        week = week.insert(on, start, end).0;
    }
    week
}

/// Assert no two blocks on the same day overlap.
fn assert_no_overlap(week: &WeekSchedule) {
    for pair in week.blocks().windows(2) {
        if pair[0].day == pair[1].day {
            assert!(
                pair[1].start >= pair[0].end,
                "blocks overlap: {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

// ───────────────────────── create drags ─────────────────────────

#[test]
fn create_commits_when_span_reaches_the_minimum() {
    let week = WeekSchedule::new();

    // Pointer-down at raw 103 snaps the anchor to 105.
    let session = begin_create(&week, day(0), 103.0).unwrap();
    assert_eq!(session.anchor(), 105);

    let done = end_session(&week, &session, 120.0);

    match done.outcome {
        DragOutcome::Created(id) => {
            let block = done.schedule.get(id).unwrap();
            assert_eq!((block.start, block.end), (105, 120));
        }
        other => panic!("expected Created, got {other:?}"),
    }
}

#[test]
fn create_below_minimum_span_is_discarded() {
    let week = WeekSchedule::new();
    let session = begin_create(&week, day(0), 103.0).unwrap();

    // Raw 108 snaps to 105, the anchor itself: zero span.
    let done = end_session(&week, &session, 108.0);

    assert_eq!(done.outcome, DragOutcome::Discarded);
    assert!(done.schedule.is_empty(), "nothing may be committed");
}

#[test]
fn plain_click_is_discarded() {
    let week = WeekSchedule::new();
    let session = begin_create(&week, day(6), 300.0).unwrap();

    let done = end_session(&week, &session, 300.0);

    assert_eq!(done.outcome, DragOutcome::Discarded);
}

#[test]
fn pointer_down_inside_a_block_is_ignored() {
    let week = week_with(day(2), &[(540, 600)]);

    // Raw 550 snaps to 555, inside the block.
    assert!(begin_create(&week, day(2), 550.0).is_none());

    // The exclusive end edge is free track again.
    assert!(begin_create(&week, day(2), 600.0).is_some());
}

#[test]
fn create_is_fenced_by_its_neighbors() {
    let week = week_with(day(0), &[(60, 120), (300, 360)]);

    let session = begin_create(&week, day(0), 200.0).unwrap();
    assert_eq!(session.anchor(), 195);

    // Dragging far right stops at the next block's start.
    let update = update_session(&week, &session, 500.0);
    assert_eq!(update.session.preview_span(), Some((195, 300)));
    assert!(update.schedule.is_none(), "create writes nothing until release");

    let done = end_session(&week, &update.session, 500.0);
    match done.outcome {
        DragOutcome::Created(id) => {
            let block = done.schedule.get(id).unwrap();
            assert_eq!((block.start, block.end), (195, 300));
        }
        other => panic!("expected Created, got {other:?}"),
    }
    assert_no_overlap(&done.schedule);
}

#[test]
fn create_sweeps_left_of_the_anchor_too() {
    let week = week_with(day(0), &[(60, 120), (300, 360)]);
    let session = begin_create(&week, day(0), 200.0).unwrap();

    // Dragging far left stops at the previous block's end.
    let done = end_session(&week, &session, 10.0);

    match done.outcome {
        DragOutcome::Created(id) => {
            let block = done.schedule.get(id).unwrap();
            assert_eq!((block.start, block.end), (120, 195));
        }
        other => panic!("expected Created, got {other:?}"),
    }
}

#[test]
fn create_can_sweep_the_whole_day() {
    let week = WeekSchedule::new();

    // Both ends released outside the grid clamp to the day edges.
    let session = begin_create(&week, day(3), -50.0).unwrap();
    assert_eq!(session.anchor(), 0);

    let done = end_session(&week, &session, 5000.0);

    match done.outcome {
        DragOutcome::Created(id) => {
            let block = done.schedule.get(id).unwrap();
            assert_eq!((block.start, block.end), (0, 1440));
        }
        other => panic!("expected Created, got {other:?}"),
    }
}

#[test]
fn preview_follows_the_cursor_in_both_directions() {
    let week = WeekSchedule::new();
    let session = begin_create(&week, day(1), 195.0).unwrap();

    let right = update_session(&week, &session, 250.0);
    assert_eq!(right.session.preview_span(), Some((195, 255)));

    let left = update_session(&week, &right.session, 90.0);
    assert_eq!(left.session.preview_span(), Some((90, 195)));
}

// ───────────────────────── resize drags ─────────────────────────

#[test]
fn resize_start_pulls_the_leading_edge() {
    let week = week_with(day(4), &[(540, 720)]);
    let id = week.block_at(day(4), 540).unwrap().id;

    let session = begin_edit(&week, id, Handle::Start, 540.0).unwrap();
    let update = update_session(&week, &session, 480.0);

    let rewritten = update.schedule.expect("edit drags rewrite live");
    let block = rewritten.get(id).unwrap();
    assert_eq!((block.start, block.end), (480, 720));

    let done = end_session(&rewritten, &update.session, 480.0);
    assert_eq!(done.outcome, DragOutcome::Updated);
}

#[test]
fn resize_start_stops_at_its_own_end_then_release_removes() {
    let week = week_with(day(4), &[(540, 720)]);
    let id = week.block_at(day(4), 540).unwrap().id;

    let session = begin_edit(&week, id, Handle::Start, 540.0).unwrap();

    // Dragging well past the end edge pins start to end: zero width.
    let update = update_session(&week, &session, 800.0);
    let collapsed = update.schedule.unwrap();
    let block = collapsed.get(id).unwrap();
    assert_eq!((block.start, block.end), (720, 720));

    let done = end_session(&collapsed, &update.session, 800.0);
    assert_eq!(done.outcome, DragOutcome::Removed(id));
    assert!(done.schedule.get(id).is_none(), "collapsed block is dropped");
}

#[test]
fn resize_end_stops_at_its_own_start_then_release_removes() {
    let week = week_with(day(4), &[(540, 720)]);
    let id = week.block_at(day(4), 540).unwrap().id;

    let session = begin_edit(&week, id, Handle::End, 720.0).unwrap();
    let update = update_session(&week, &session, 100.0);
    let collapsed = update.schedule.unwrap();
    assert_eq!(collapsed.get(id).unwrap().duration(), 0);

    let done = end_session(&collapsed, &update.session, 100.0);
    assert_eq!(done.outcome, DragOutcome::Removed(id));
}

#[test]
fn resize_is_fenced_by_the_neighbor_gap() {
    let week = week_with(day(5), &[(0, 480), (540, 720)]);
    let id = week.block_at(day(5), 540).unwrap().id;

    let session = begin_edit(&week, id, Handle::Start, 540.0).unwrap();
    let update = update_session(&week, &session, 300.0);

    let block = update.schedule.unwrap().get(id).copied().unwrap();
    assert_eq!(
        (block.start, block.end),
        (480, 720),
        "start lands exactly on the neighbor's end"
    );
}

#[test]
fn snapping_cannot_step_past_an_unaligned_neighbor() {
    // The neighbor's end, 127, is not on the 15-minute grid; a snapped
    // candidate would be 120, two minutes inside it.
    let week = week_with(day(5), &[(0, 127), (300, 420)]);
    let id = week.block_at(day(5), 300).unwrap().id;

    let session = begin_edit(&week, id, Handle::Start, 300.0).unwrap();
    let update = update_session(&week, &session, 50.0);

    let rewritten = update.schedule.unwrap();
    assert_eq!(rewritten.get(id).unwrap().start, 127);
    assert_no_overlap(&rewritten);
}

// ───────────────────────── move drags ─────────────────────────

#[test]
fn move_clamps_against_the_gap_end() {
    // Block [100, 160) with its gap capped at 300 by a neighbor: dragging
    // way right parks it flush at [240, 300).
    let week = week_with(day(2), &[(100, 160), (300, 420)]);
    let id = week.block_at(day(2), 100).unwrap().id;

    let session = begin_edit(&week, id, Handle::Move, 130.0).unwrap();
    let update = update_session(&week, &session, 500.0);

    let rewritten = update.schedule.unwrap();
    let block = rewritten.get(id).unwrap();
    assert_eq!((block.start, block.end), (240, 300));
    assert_eq!(block.duration(), 60, "moves never change duration");
    assert_no_overlap(&rewritten);

    let done = end_session(&rewritten, &update.session, 500.0);
    assert_eq!(done.outcome, DragOutcome::Updated);
}

#[test]
fn move_clamps_against_the_gap_start() {
    let week = week_with(day(2), &[(100, 160), (300, 420)]);
    let id = week.block_at(day(2), 100).unwrap().id;

    let session = begin_edit(&week, id, Handle::Move, 130.0).unwrap();
    let update = update_session(&week, &session, -100.0);

    let block = update.schedule.unwrap().get(id).copied().unwrap();
    assert_eq!((block.start, block.end), (0, 60));
}

#[test]
fn move_deltas_apply_to_the_original_start_without_drift() {
    let week = week_with(day(1), &[(100, 160)]);
    let id = week.block_at(day(1), 100).unwrap().id;

    let session = begin_edit(&week, id, Handle::Move, 130.0).unwrap();

    // Raw 200 snaps to 195; delta from the 135 anchor is +60.
    let first = update_session(&week, &session, 200.0);
    let moved = first.schedule.unwrap();
    assert_eq!(moved.get(id).unwrap().start, 160);

    // The same pointer position again must not move the block further.
    let second = update_session(&moved, &first.session, 200.0);
    assert_eq!(second.schedule.unwrap().get(id).unwrap().start, 160);
}

#[test]
fn edit_preview_is_none() {
    let week = week_with(day(4), &[(540, 720)]);
    let id = week.block_at(day(4), 540).unwrap().id;

    let session = begin_edit(&week, id, Handle::Move, 600.0).unwrap();

    assert!(session.preview_span().is_none());
}

#[test]
fn edit_of_an_unknown_id_is_refused() {
    let week = WeekSchedule::new();

    assert!(begin_edit(&week, BlockId::from(42), Handle::Move, 100.0).is_none());
}

#[test]
fn mixed_gestures_keep_the_day_collision_free() {
    let week = week_with(day(0), &[(60, 120), (300, 360)]);

    // Sweep the middle gap closed.
    let session = begin_create(&week, day(0), 200.0).unwrap();
    let week = end_session(&week, &session, 500.0).schedule;
    assert_no_overlap(&week);

    // Then shove the first block as far right as it goes.
    let id = week.block_at(day(0), 60).unwrap().id;
    let session = begin_edit(&week, id, Handle::Move, 70.0).unwrap();
    let update = update_session(&week, &session, 1000.0);
    let week = update.schedule.unwrap();

    let block = week.get(id).unwrap();
    assert_eq!((block.start, block.end), (135, 195));
    assert_no_overlap(&week);
}
