//! # Core Module
//!
//! Fundamental data structures for the selection language: the read-only atom
//! snapshot model and the classification tables the keyword selectors
//! (`protein`, `water`, `metal`, ...) are defined against.
//!
//! ## Key Components
//!
//! - [`models`] - The [`models::atom::Atom`] snapshot and secondary-structure codes
//! - [`tables`] - Static residue/element classification data and the loadable
//!   [`tables::registry::ClassificationRegistry`]
//!
//! This module owns no atom storage: every atom sequence is supplied by the
//! caller, and nothing here mutates or caches it.

pub mod models;
pub mod tables;
