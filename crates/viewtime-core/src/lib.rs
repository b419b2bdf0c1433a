//! Core domain layer for viewtime.
//!
//! Holds the strictly-typed watch-history and liked-videos data model, the
//! error taxonomy, timestamp and ISO 8601 duration parsing, keyword
//! extraction and the provenance-classification rule set shared by the
//! analytics pipelines.

pub mod classify;
pub mod duration;
pub mod error;
pub mod keywords;
pub mod liked_models;
pub mod models;
pub mod settings;
pub mod timestamps;
