//! Notesweep Core Library
//!
//! Domain logic for reconciling a note application's local database against
//! its sync directory and disposing of orphaned records.

pub mod backup;
pub mod config;
pub mod db;
pub mod dispose;
pub mod error;
pub mod export;
pub mod guard;
pub mod logging;
pub mod reconcile;
pub mod scan;
