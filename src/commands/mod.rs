//! Command implementations for weekly-review

pub mod config;
pub mod dispatch;
pub mod review;
pub mod sprinkle;
