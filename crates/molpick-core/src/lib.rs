//! # Molpick Core Library
//!
//! A selection expression language for molecular structures, in the style of
//! PyMOL's selection algebra. A caller hands the library an expression string
//! such as `byres (name CA and chain A)` or `around 4.5 (resn LIG)` together
//! with an ordered snapshot of atoms, and receives back the matching atoms as
//! an order-preserving subsequence.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction:
//!
//! - **[`core`]: The Foundation.** Stateless data models (the [`core::models::atom::Atom`]
//!   snapshot), and the static classification tables (standard amino acids,
//!   water and solvent residues, metal elements, backbone atom names) that the
//!   keyword selectors are defined against. Changing what counts as "water" or
//!   "metal" is a data change in this layer, never a logic change above it.
//!
//! - **[`selection`]: The Language.** Lexer, recursive-descent parser, the
//!   closed [`selection::ast::Expr`] sum type, the order-preserving evaluator,
//!   and the best-effort compiler from simple conjunctive expressions into a
//!   flat [`selection::spec::SelectionSpec`] usable by a host renderer's
//!   native filtering path.
//!
//! Everything here is synchronous and pure: parsing and evaluation are
//! functions of their inputs with no shared mutable state, so they are safe to
//! call concurrently and re-invocation with identical input yields identical
//! output.
//!
//! ## Usage
//!
//! ```ignore
//! use molpick::selection;
//!
//! let matched = selection::select(&atoms, "chain A and backbone")?;
//! for atom in matched {
//!     println!("{} {}{}", atom.name, atom.res_name, atom.res_seq);
//! }
//! ```

pub mod core;
pub mod selection;
