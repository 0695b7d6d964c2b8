//! The movement log and everything that writes to it.
//!  - [entities] holds the record types.
//!  - [store::JsonLinesStore] keeps the durable copy of the log, one JSON object per line.
//!  - [recorder::MovementRecorder] turns user input into stored records.

pub mod entities;
pub mod recorder;
pub mod store;
