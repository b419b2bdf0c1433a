//! Data layer for viewtime.
//!
//! Responsible for parsing Google Takeout watch-history exports,
//! reconstructing viewing sessions, and computing the watch-history and
//! liked-videos analytics snapshots.

pub mod analytics;
pub mod liked;
pub mod parser;
pub mod sessions;

pub use viewtime_core as core;
