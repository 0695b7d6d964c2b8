//! Small command line log of mindful movements: short walks, stretching, taking the stairs.
//! Movements are kept in a plain JSON lines file and every statistic (streaks, daily and weekly
//! totals, favourite activity, peak hour) is derived from that log on demand.
//!

pub mod cli;
pub mod fs;
pub mod movement;
pub mod stats;
pub mod utils;
