//! Selection expression language for molecular structures.
//!
//! Supports PyMOL-style selection expressions:
//! - `name CA+CB`       — atom name in a `+`-joined list (globs allowed)
//! - `resn ALA+GLY`     — residue name in a list (globs allowed)
//! - `resi 1-10`        — residue number: exact, range, or `>= <= > < ==`
//! - `index 42`         — atom serial, same forms as `resi`
//! - `chain A`          — chain identifier
//! - `elem FE`          — element symbol
//! - `protein`, `water`, `solvent`, `backbone`, `sidechain`, `metal`,
//!   `ligand`, `organic`, `hydrogen`, `heavy`, `polar_hydrogen`,
//!   `nonpolar_hydrogen`, `helix`, `sheet`, `turn`, `loop`, `all`, `none`
//! - `around 4.5 expr`  — matches plus neighbors within the radius
//! - `xaround 4.5 expr` — neighbors only, matches excluded
//! - `beyond 8 expr`    — atoms with no match within the radius
//! - `byres expr` / `bychain expr` — expand to whole residues / chains
//!
//! Combinators: `and`, `or`, `not`, `xor`, parentheses.
//!
//! # Examples
//!
//! ```ignore
//! use molpick::selection;
//!
//! let matched = selection::select(&atoms, "chain A and name CA")?;
//! let pocket = selection::select(&atoms, "byres (around 4.5 resn LIG)")?;
//!
//! // Fast path: simple conjunctions compile to a flat spec the host
//! // renderer can filter natively; everything else evaluates here.
//! let expr = selection::parse("name CA and chain A")?;
//! match selection::to_spec(&expr) {
//!     Some(spec) => host.filter_native(&spec),
//!     None => selection::evaluate(&expr, &atoms),
//! };
//! ```

pub mod ast;
pub mod error;
pub mod eval;
pub mod parser;
pub mod spec;
pub mod token;

pub use error::SelectionError;
pub use eval::SelectionContext;
pub use spec::{SelectionSpec, to_spec};

use crate::core::models::atom::Atom;
use ast::Expr;
use tracing::{debug, instrument};

/// Parses a selection expression into an AST.
///
/// # Errors
///
/// Returns [`SelectionError::Syntax`] when the input does not match the
/// grammar.
pub fn parse(expression: &str) -> Result<Expr, SelectionError> {
    parser::parse_selection(expression)
}

/// Parses and evaluates a selection expression against an atom snapshot
/// using the built-in classification tables.
///
/// # Errors
///
/// Returns [`SelectionError::Syntax`] when the expression does not match the
/// grammar; evaluation itself cannot fail.
#[instrument(skip(atoms), fields(atom_count = atoms.len()))]
pub fn select<'a>(atoms: &'a [Atom], expression: &str) -> Result<Vec<&'a Atom>, SelectionError> {
    let matched = SelectionContext::new().select(atoms, expression)?;
    debug!(matched = matched.len(), "selection evaluated");
    Ok(matched)
}

/// Evaluates a pre-built AST against an atom snapshot using the built-in
/// classification tables.
pub fn evaluate<'a>(expr: &Expr, atoms: &'a [Atom]) -> Vec<&'a Atom> {
    SelectionContext::new().evaluate(expr, atoms)
}
