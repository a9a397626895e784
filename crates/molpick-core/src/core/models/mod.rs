//! # Core Models Module
//!
//! Data structures describing the atom snapshot the selection language is
//! evaluated against.
//!
//! The snapshot is externally owned: a host application (viewer, analysis
//! tool, command shell) assembles the ordered atom sequence and passes it in
//! by reference. Evaluation returns a filtered subsequence of that sequence,
//! never a copy with altered fields.

pub mod atom;
