use std::fmt::Display;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Longest note accepted by [NewMovement::validate], in characters.
pub const MAX_NOTES_LENGTH: usize = 200;

/// Kinds of movement the user can log. Order of declaration is also the tie-break order for
/// statistics that pick a single "most common" type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Walking,
    Stretching,
    Stairs,
    Housework,
    Dancing,
    Gardening,
    Playing,
    Other,
}

impl ActivityType {
    pub const ALL: [ActivityType; 8] = [
        ActivityType::Walking,
        ActivityType::Stretching,
        ActivityType::Stairs,
        ActivityType::Housework,
        ActivityType::Dancing,
        ActivityType::Gardening,
        ActivityType::Playing,
        ActivityType::Other,
    ];
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityType::Walking => write!(f, "walking"),
            ActivityType::Stretching => write!(f, "stretching"),
            ActivityType::Stairs => write!(f, "stairs"),
            ActivityType::Housework => write!(f, "housework"),
            ActivityType::Dancing => write!(f, "dancing"),
            ActivityType::Gardening => write!(f, "gardening"),
            ActivityType::Playing => write!(f, "playing"),
            ActivityType::Other => write!(f, "other"),
        }
    }
}

/// Identifier of a record. It's the creation time in milliseconds, pushed forward when two
/// records are created within the same millisecond, so ids grow with insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(u64);

impl MovementId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Picks an id for a record created at `moment`, given the newest id already in the log.
    pub fn next(moment: DateTime<Utc>, newest: Option<MovementId>) -> Self {
        let candidate = u64::try_from(moment.timestamp_millis()).unwrap_or(0);
        match newest {
            Some(MovementId(previous)) if previous >= candidate => Self(previous + 1),
            _ => Self(candidate),
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for MovementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logged movement. Records are never changed after they are written.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct MovementRecord {
    pub id: MovementId,
    #[serde(rename = "type")]
    pub activity: ActivityType,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl MovementRecord {
    pub fn from_new(id: MovementId, created_at: DateTime<Utc>, movement: NewMovement) -> Self {
        Self {
            id,
            activity: movement.activity,
            duration_minutes: movement.duration_minutes,
            notes: movement.notes,
            created_at,
        }
    }
}

/// Movement as entered by the user, before it gets an id and a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    pub activity: ActivityType,
    pub duration_minutes: u32,
    pub notes: String,
}

impl NewMovement {
    pub fn new(activity: ActivityType, duration_minutes: u32, notes: impl Into<String>) -> Self {
        Self {
            activity,
            duration_minutes,
            notes: notes.into(),
        }
    }

    /// Trims notes and checks the entry can be stored.
    pub fn validate(self) -> Result<Self> {
        if self.duration_minutes == 0 {
            bail!("Duration must be a positive number of minutes");
        }
        let notes = self.notes.trim().to_string();
        let length = notes.chars().count();
        if length > MAX_NOTES_LENGTH {
            bail!("Notes are {length} characters long, at most {MAX_NOTES_LENGTH} are allowed");
        }
        Ok(Self { notes, ..self })
    }
}
