//! Core domain layer for the sales dashboard.
//!
//! Holds the typed sale record and dataset models, the pure trend
//! calculations, the tolerant field parsers used during ingestion, the
//! shared error type, display formatting helpers and the CLI settings.

pub mod calculations;
pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
