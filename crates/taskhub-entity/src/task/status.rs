//! Task status enumeration.
//!
//! Stored and transmitted as a bare integer (the wire format the front
//! end expects), with a typed enum on top.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use taskhub_core::AppError;

/// Workflow status of a task. Serialized as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[repr(i32)]
pub enum TaskStatus {
    /// Not started yet.
    Todo = 0,
    /// Being worked on.
    InProgress = 1,
    /// Finished.
    Done = 2,
}

impl TaskStatus {
    /// Return the status as a lowercase string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Return the integer wire representation.
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i32> for TaskStatus {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Todo),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Done),
            _ => Err(AppError::validation(format!(
                "Invalid task status: {value}. Expected 0 (todo), 1 (in-progress) or 2 (done)"
            ))),
        }
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i32::deserialize(deserializer)?;
        Self::try_from(value).map_err(|e| D::Error::custom(e.message))
    }
}
