//! WASM bindings for weekgrid-engine.
//!
//! Exposes the availability grid to a browser UI via `wasm-bindgen`. The
//! exported [`ScheduleEditor`] owns what the engine itself refuses to own:
//! the current schedule snapshot, the single live drag session, the grid's
//! pixel geometry and an uninterpreted timezone label. Complex values cross
//! the boundary as JSON strings.
//!
//! The UI wires pointer events straight through: `pointerDown`/`grabBlock`
//! on a day row or block handle, `pointerMove` while dragging, `pointerUp`
//! to commit. After any call that returns `true` or an outcome, re-render
//! from `blocks` and `preview`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p weekgrid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/weekgrid_wasm.wasm
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;
use weekgrid_engine::{
    apply_entry, begin_create, begin_edit, end_session, time, update_session, BlockId, Day,
    DragOutcome, DragSession, GridGeometry, Handle, ManualEntry, SaveKind, WeekSchedule,
};

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// One block, decorated with ready-to-render strip labels.
#[derive(Serialize)]
struct BlockDto {
    id: BlockId,
    day: Day,
    start: u16,
    end: u16,
    start_label: String,
    end_label: String,
}

impl From<&weekgrid_engine::Block> for BlockDto {
    fn from(block: &weekgrid_engine::Block) -> Self {
        Self {
            id: block.id,
            day: block.day,
            start: block.start,
            end: block.end,
            start_label: time::display_time(&time::to_time(block.start)),
            end_label: time::display_time(&time::to_time(block.end)),
        }
    }
}

/// The live create preview derived from the drag session.
#[derive(Serialize)]
struct PreviewDto {
    day: Day,
    start: u16,
    end: u16,
    start_label: String,
    end_label: String,
}

/// How a pointer-up resolved.
#[derive(Serialize)]
struct DragOutcomeDto {
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<BlockId>,
}

/// How a manual save resolved.
#[derive(Serialize)]
struct SaveOutcomeDto {
    kind: &'static str,
    replaced: usize,
    days: usize,
    inserted: Vec<BlockId>,
}

/// Validation failure payload: `message` for a toast, `field` for inline
/// highlighting on the form.
#[derive(Serialize)]
struct ValidationErrorDto {
    message: String,
    field: &'static str,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_handle(handle: &str) -> Result<Handle, JsValue> {
    match handle {
        "start" => Ok(Handle::Start),
        "end" => Ok(Handle::End),
        "move" => Ok(Handle::Move),
        other => Err(JsValue::from_str(&format!(
            "Unknown handle '{}': expected start, end or move",
            other
        ))),
    }
}

fn parse_day(day: u8) -> Result<Day, JsValue> {
    Day::new(day).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ---------------------------------------------------------------------------
// The editor
// ---------------------------------------------------------------------------

/// Stateful grid editor held by the web UI.
///
/// Ids handed back through JSON are plain numbers; pass them back as `f64`
/// (the default `number`) -- they stay well inside the safe integer range.
#[wasm_bindgen]
pub struct ScheduleEditor {
    schedule: WeekSchedule,
    session: Option<DragSession>,
    grid: GridGeometry,
    timezone_label: Option<String>,
}

#[wasm_bindgen]
impl ScheduleEditor {
    /// A new editor, seeded from a JSON block array or, given `null`, the
    /// default fully-available week.
    #[wasm_bindgen(constructor)]
    pub fn new(blocks_json: Option<String>) -> Result<ScheduleEditor, JsValue> {
        let schedule = match blocks_json {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| JsValue::from_str(&format!("Invalid schedule JSON: {}", e)))?,
            None => WeekSchedule::full_week(),
        };
        Ok(ScheduleEditor {
            schedule,
            session: None,
            grid: GridGeometry::new(0.0, 1440.0),
            timezone_label: None,
        })
    }

    /// Update the time-axis geometry. Call on mount and on layout changes;
    /// pointer coordinates are interpreted against the latest values.
    #[wasm_bindgen(js_name = "setGrid")]
    pub fn set_grid(&mut self, origin_px: f64, width_px: f64) {
        self.grid = GridGeometry::new(origin_px, width_px);
    }

    /// Replace the schedule wholesale from a JSON block array. Drops any
    /// live session.
    pub fn load(&mut self, blocks_json: &str) -> Result<(), JsValue> {
        self.schedule = serde_json::from_str(blocks_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid schedule JSON: {}", e)))?;
        self.session = None;
        Ok(())
    }

    /// The label shown next to the grid header. Displayed only; the engine
    /// never computes with it.
    #[wasm_bindgen(js_name = "timezoneLabel")]
    pub fn timezone_label(&self) -> Option<String> {
        self.timezone_label.clone()
    }

    #[wasm_bindgen(js_name = "setTimezoneLabel")]
    pub fn set_timezone_label(&mut self, label: Option<String>) {
        self.timezone_label = label;
    }

    #[wasm_bindgen(js_name = "isDragging")]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    // -- gestures ----------------------------------------------------------

    /// Pointer-down on a day row's empty track: try to open a create
    /// session. Returns `false` for ignored gestures (inside an existing
    /// block, or while another session is open).
    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, day: u8, x: f64) -> Result<bool, JsValue> {
        let day = parse_day(day)?;
        if self.session.is_some() {
            return Ok(false);
        }
        self.session = begin_create(&self.schedule, day, self.grid.minute_at(x));
        Ok(self.session.is_some())
    }

    /// Pointer-down on a block's handle (`"start"`, `"end"`) or body
    /// (`"move"`): try to open an edit session.
    #[wasm_bindgen(js_name = "grabBlock")]
    pub fn grab_block(&mut self, id: f64, handle: &str, x: f64) -> Result<bool, JsValue> {
        let handle = parse_handle(handle)?;
        if self.session.is_some() {
            return Ok(false);
        }
        let id = BlockId::from(id as u64);
        self.session = begin_edit(&self.schedule, id, handle, self.grid.minute_at(x));
        Ok(self.session.is_some())
    }

    /// Pointer move while a session is open. Returns `true` when there is a
    /// session and the caller should re-render.
    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, x: f64) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        let update = update_session(&self.schedule, &session, self.grid.minute_at(x));
        self.session = Some(update.session);
        if let Some(schedule) = update.schedule {
            self.schedule = schedule;
        }
        true
    }

    /// Pointer-up: close the session and report `{"outcome": ...}` JSON,
    /// one of `"created"`, `"discarded"`, `"updated"`, `"removed"` (with an
    /// `id` where applicable) or `"none"` when no session was open.
    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self, x: f64) -> Result<String, JsValue> {
        let Some(session) = self.session.take() else {
            return to_json(&DragOutcomeDto {
                outcome: "none",
                id: None,
            });
        };

        let done = end_session(&self.schedule, &session, self.grid.minute_at(x));
        self.schedule = done.schedule;

        let dto = match done.outcome {
            DragOutcome::Created(id) => DragOutcomeDto {
                outcome: "created",
                id: Some(id),
            },
            DragOutcome::Discarded => DragOutcomeDto {
                outcome: "discarded",
                id: None,
            },
            DragOutcome::Updated => DragOutcomeDto {
                outcome: "updated",
                id: None,
            },
            DragOutcome::Removed(id) => DragOutcomeDto {
                outcome: "removed",
                id: Some(id),
            },
        };
        to_json(&dto)
    }

    // -- manual entry and deletion -----------------------------------------

    /// Commit a manual entry form.
    ///
    /// `entry_json` is `{"days": [0..6], "start": "HH:MM", "end": "HH:MM",
    /// "editing": id?}`. On success returns `{"kind", "replaced", "days",
    /// "inserted"}`; on validation failure the error is a JSON string with
    /// `message` and the offending `field`.
    #[wasm_bindgen(js_name = "manualSave")]
    pub fn manual_save(&mut self, entry_json: &str) -> Result<String, JsValue> {
        let entry: ManualEntry = serde_json::from_str(entry_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid entry JSON: {}", e)))?;

        let save = apply_entry(&self.schedule, &entry).map_err(|e| {
            let dto = ValidationErrorDto {
                message: e.to_string(),
                field: e.field(),
            };
            JsValue::from_str(&serde_json::to_string(&dto).unwrap_or_else(|_| e.to_string()))
        })?;

        self.schedule = save.schedule;
        let days = save.inserted.len();
        to_json(&SaveOutcomeDto {
            kind: match save.kind {
                SaveKind::Added => "added",
                SaveKind::AddedWithReplacements => "added_with_replacements",
                SaveKind::Updated => "updated",
            },
            replaced: save.replaced,
            days,
            inserted: save.inserted,
        })
    }

    /// Delete one block. Returns the removed block as JSON (for an undo
    /// toast), or `null` when the id was unknown.
    #[wasm_bindgen(js_name = "deleteBlock")]
    pub fn delete_block(&mut self, id: f64) -> Result<String, JsValue> {
        let (schedule, removed) = self.schedule.remove(BlockId::from(id as u64));
        self.schedule = schedule;
        to_json(&removed.as_ref().map(BlockDto::from))
    }

    /// Delete every block on one day. Returns how many were removed.
    #[wasm_bindgen(js_name = "clearDay")]
    pub fn clear_day(&mut self, day: u8) -> Result<u32, JsValue> {
        let day = parse_day(day)?;
        let (schedule, removed) = self.schedule.clear_day(day);
        self.schedule = schedule;
        Ok(removed as u32)
    }

    // -- rendering ---------------------------------------------------------

    /// Every block, sorted by `(day, start)`, decorated with strip labels.
    pub fn blocks(&self) -> Result<String, JsValue> {
        let dtos: Vec<BlockDto> = self.schedule.blocks().iter().map(BlockDto::from).collect();
        to_json(&dtos)
    }

    /// The live create preview, or `null` outside a create drag. Edit drags
    /// have no separate preview: their block is already rewritten in
    /// [`blocks`](Self::blocks) on every move.
    pub fn preview(&self) -> Result<String, JsValue> {
        let dto = self.session.as_ref().and_then(|session| {
            session.preview_span().map(|(start, end)| PreviewDto {
                day: session.day(),
                start,
                end,
                start_label: time::display_time(&time::to_time(start)),
                end_label: time::display_time(&time::to_time(end)),
            })
        });
        to_json(&dto)
    }

    /// The bare ordered block list for whoever owns persistence.
    #[wasm_bindgen(js_name = "saveAll")]
    pub fn save_all(&self) -> Result<String, JsValue> {
        to_json(&self.schedule)
    }
}
