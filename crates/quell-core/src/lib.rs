//! Core types, message catalog, and per-file suppression state for quell.
//!
//! This crate provides the foundational data structures used across all quell crates:
//! - [`types`]: Categories, confidence levels, emitted messages, and error types
//! - [`definition`]: Message definitions and their `%`-style templates
//! - [`catalog`]: The [`MessageCatalog`](catalog::MessageCatalog) trait and its in-memory store
//! - [`file_state`]: Line-indexed suppression transitions for one file
//! - [`stats`]: Counters for accepted messages
//! - [`stats_store`]: SQLite persistence for run statistics
//! - [`reporter`]: The [`Reporter`](reporter::Reporter) sink trait
//! - [`config`]: Configuration loading from `.quell/quell.json`

pub mod catalog;
pub mod config;
pub mod definition;
pub mod file_state;
pub mod reporter;
pub mod stats;
pub mod stats_store;
pub mod types;
