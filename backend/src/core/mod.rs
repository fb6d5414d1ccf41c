//! Core timekeeping and macro signals

pub mod inflation;
pub mod time;
