//! Error types for weekgrid operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("No days selected")]
    NoDaysSelected,

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Invalid day index: {0} (expected 0..=6)")]
    InvalidDay(u8),
}

impl ScheduleError {
    /// The form field a validation failure belongs to, for inline display.
    pub fn field(&self) -> &'static str {
        match self {
            ScheduleError::NoDaysSelected | ScheduleError::InvalidDay(_) => "days",
            ScheduleError::EndNotAfterStart => "end",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
