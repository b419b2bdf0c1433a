//! Runtime orchestration layer for viewtime.
//!
//! Owns the persistence gateway, the typed per-artifact repositories,
//! the external video-API collaborator traits, and the managers that
//! drive ingest and sync flows around the pure analytics core.

pub mod liked_videos;
pub mod metadata;
pub mod store;
pub mod watch_history;

pub use viewtime_core as core;
pub use viewtime_data as data;
