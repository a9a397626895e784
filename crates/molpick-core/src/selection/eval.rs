//! Evaluator for selection expressions against an atom snapshot.
//!
//! Evaluation is mask-based: every node produces one boolean per input atom,
//! and the final subsequence is read off the mask in input order. That makes
//! order preservation and duplicate-freedom structural properties rather
//! than per-operator obligations.

use crate::core::models::atom::{Atom, SecondaryStructure};
use crate::core::tables::registry::ClassificationRegistry;
use crate::selection::ast::{Expr, Keyword};
use crate::selection::error::SelectionError;
use crate::selection::parser::parse_selection;
use kiddo::{KdTree, SquaredEuclidean};
use std::collections::HashSet;

/// Evaluation context binding the classification registry the keyword
/// selectors consult.
///
/// The context holds no atom data; every call receives a fresh ordered
/// sequence and returns a filtered subsequence of it. A context is cheap to
/// share and reuse across snapshots.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'r> {
    registry: &'r ClassificationRegistry,
}

impl SelectionContext<'static> {
    /// A context backed by the built-in classification tables.
    pub fn new() -> Self {
        Self {
            registry: ClassificationRegistry::standard(),
        }
    }
}

impl Default for SelectionContext<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> SelectionContext<'r> {
    /// A context backed by a caller-supplied registry (e.g. one loaded from
    /// a data file).
    pub fn with_registry(registry: &'r ClassificationRegistry) -> Self {
        Self { registry }
    }

    /// Parses and evaluates a selection expression in one step.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Syntax`] when the expression does not match
    /// the grammar.
    pub fn select<'a>(
        &self,
        atoms: &'a [Atom],
        expression: &str,
    ) -> Result<Vec<&'a Atom>, SelectionError> {
        let expr = parse_selection(expression)?;
        Ok(self.evaluate(&expr, atoms))
    }

    /// Evaluates a parsed expression, returning the matching atoms as an
    /// order-preserving, duplicate-free subsequence of `atoms`.
    pub fn evaluate<'a>(&self, expr: &Expr, atoms: &'a [Atom]) -> Vec<&'a Atom> {
        let mask = self.eval_mask(expr, atoms);
        atoms
            .iter()
            .zip(mask)
            .filter_map(|(atom, keep)| keep.then_some(atom))
            .collect()
    }

    fn eval_mask(&self, expr: &Expr, atoms: &[Atom]) -> Vec<bool> {
        let n = atoms.len();
        match expr {
            Expr::Keyword(keyword) => self.keyword_mask(*keyword, atoms),
            Expr::Name(patterns) => atoms
                .iter()
                .map(|a| {
                    let name = a.name.trim();
                    patterns.iter().any(|p| p.matches(name))
                })
                .collect(),
            Expr::ResName(patterns) => atoms
                .iter()
                .map(|a| {
                    let res_name = a.res_name.trim();
                    patterns.iter().any(|p| p.matches(res_name))
                })
                .collect(),
            Expr::Chain(id) => atoms.iter().map(|a| a.chain == *id).collect(),
            Expr::Element(symbol) => atoms
                .iter()
                .map(|a| a.element.trim().eq_ignore_ascii_case(symbol))
                .collect(),
            Expr::ResSeq(test) => atoms
                .iter()
                .map(|a| test.matches(a.res_seq as i64))
                .collect(),
            Expr::Index(test) => atoms
                .iter()
                .map(|a| test.matches(a.serial as i64))
                .collect(),
            Expr::Not(inner) => {
                let mut mask = self.eval_mask(inner, atoms);
                for m in &mut mask {
                    *m = !*m;
                }
                mask
            }
            Expr::And(children) => {
                let mut mask = vec![true; n];
                for child in children {
                    for (m, c) in mask.iter_mut().zip(self.eval_mask(child, atoms)) {
                        *m &= c;
                    }
                }
                mask
            }
            Expr::Or(children) => {
                let mut mask = vec![false; n];
                for child in children {
                    for (m, c) in mask.iter_mut().zip(self.eval_mask(child, atoms)) {
                        *m |= c;
                    }
                }
                mask
            }
            Expr::Xor(children) => {
                // Membership in exactly one child, not odd-count parity.
                let mut counts = vec![0u32; n];
                for child in children {
                    for (count, c) in counts.iter_mut().zip(self.eval_mask(child, atoms)) {
                        *count += u32::from(c);
                    }
                }
                counts.into_iter().map(|count| count == 1).collect()
            }
            Expr::Around { radius, inner } => {
                let inner_mask = self.eval_mask(inner, atoms);
                match proximity_mask(&inner_mask, atoms, *radius) {
                    Some(near) => inner_mask
                        .iter()
                        .zip(near)
                        .map(|(&is_ref, within)| is_ref || within)
                        .collect(),
                    None => inner_mask,
                }
            }
            Expr::XAround { radius, inner } => {
                let inner_mask = self.eval_mask(inner, atoms);
                match proximity_mask(&inner_mask, atoms, *radius) {
                    Some(near) => inner_mask
                        .iter()
                        .zip(near)
                        .map(|(&is_ref, within)| !is_ref && within)
                        .collect(),
                    None => vec![false; n],
                }
            }
            Expr::Beyond { radius, inner } => {
                let inner_mask = self.eval_mask(inner, atoms);
                match proximity_mask(&inner_mask, atoms, *radius) {
                    Some(near) => near.into_iter().map(|within| !within).collect(),
                    None => vec![true; n],
                }
            }
            Expr::ByRes(inner) => {
                let inner_mask = self.eval_mask(inner, atoms);
                let keys: HashSet<(char, isize)> = atoms
                    .iter()
                    .zip(&inner_mask)
                    .filter(|&(_, &matched)| matched)
                    .map(|(a, _)| (a.chain, a.res_seq))
                    .collect();
                atoms
                    .iter()
                    .map(|a| keys.contains(&(a.chain, a.res_seq)))
                    .collect()
            }
            Expr::ByChain(inner) => {
                let inner_mask = self.eval_mask(inner, atoms);
                let chains: HashSet<char> = atoms
                    .iter()
                    .zip(&inner_mask)
                    .filter(|&(_, &matched)| matched)
                    .map(|(a, _)| a.chain)
                    .collect();
                atoms.iter().map(|a| chains.contains(&a.chain)).collect()
            }
        }
    }

    fn keyword_mask(&self, keyword: Keyword, atoms: &[Atom]) -> Vec<bool> {
        let n = atoms.len();
        let registry = self.registry;
        match keyword {
            Keyword::All => vec![true; n],
            Keyword::None => vec![false; n],
            Keyword::Protein => atoms
                .iter()
                .map(|a| registry.is_amino_acid(&a.res_name))
                .collect(),
            Keyword::Water => atoms
                .iter()
                .map(|a| registry.is_water(&a.res_name))
                .collect(),
            Keyword::Solvent => atoms
                .iter()
                .map(|a| registry.is_solvent(&a.res_name))
                .collect(),
            Keyword::Metal => atoms
                .iter()
                .map(|a| registry.is_metal(&a.element))
                .collect(),
            Keyword::Backbone => atoms
                .iter()
                .map(|a| registry.is_amino_acid(&a.res_name) && registry.is_backbone_atom(&a.name))
                .collect(),
            Keyword::Sidechain => atoms
                .iter()
                .map(|a| {
                    registry.is_amino_acid(&a.res_name)
                        && !registry.is_backbone_atom(&a.name)
                        && !registry.is_terminal_oxygen(&a.name)
                })
                .collect(),
            Keyword::Ligand => atoms.iter().map(|a| self.is_ligand_atom(a)).collect(),
            Keyword::Organic => self.organic_mask(atoms),
            // All hydrogens are treated alike until bond data is available.
            Keyword::Hydrogen | Keyword::PolarHydrogen | Keyword::NonpolarHydrogen => {
                atoms.iter().map(is_hydrogen).collect()
            }
            Keyword::Heavy => atoms.iter().map(|a| !is_hydrogen(a)).collect(),
            Keyword::Helix => atoms
                .iter()
                .map(|a| a.sec_struct == SecondaryStructure::Helix)
                .collect(),
            Keyword::Sheet => atoms
                .iter()
                .map(|a| a.sec_struct == SecondaryStructure::Sheet)
                .collect(),
            Keyword::Turn => atoms
                .iter()
                .map(|a| a.sec_struct == SecondaryStructure::Turn)
                .collect(),
            Keyword::Loop => atoms
                .iter()
                .map(|a| {
                    matches!(
                        a.sec_struct,
                        SecondaryStructure::Loop | SecondaryStructure::Unassigned
                    )
                })
                .collect(),
        }
    }

    fn is_polymer_or_solvent(&self, atom: &Atom) -> bool {
        self.registry.is_amino_acid(&atom.res_name) || self.registry.is_solvent(&atom.res_name)
    }

    fn is_ligand_atom(&self, atom: &Atom) -> bool {
        !self.is_polymer_or_solvent(atom) && !self.registry.is_metal(&atom.element)
    }

    // Residue-level carbon-presence heuristic standing in for real bond
    // analysis: a non-polymer, non-solvent atom counts as organic when its
    // (chain, residue) group contains at least one ligand-criterion carbon.
    fn organic_mask(&self, atoms: &[Atom]) -> Vec<bool> {
        let mut carbon_groups: HashSet<(char, isize)> = HashSet::new();
        for atom in atoms {
            if atom.element.trim().eq_ignore_ascii_case("C") && self.is_ligand_atom(atom) {
                carbon_groups.insert((atom.chain, atom.res_seq));
            }
        }
        atoms
            .iter()
            .map(|a| {
                !self.is_polymer_or_solvent(a) && carbon_groups.contains(&(a.chain, a.res_seq))
            })
            .collect()
    }
}

fn is_hydrogen(atom: &Atom) -> bool {
    atom.element.trim().eq_ignore_ascii_case("H")
}

/// One flag per atom: is some reference atom within `radius` (inclusive)?
/// `None` when the reference set is empty.
fn proximity_mask(inner_mask: &[bool], atoms: &[Atom], radius: f64) -> Option<Vec<bool>> {
    let references: Vec<[f64; 3]> = atoms
        .iter()
        .zip(inner_mask)
        .filter(|&(_, &matched)| matched)
        .map(|(a, _)| [a.position.x, a.position.y, a.position.z])
        .collect();
    if references.is_empty() {
        return None;
    }

    let kdtree: KdTree<f64, 3> = (&references).into();
    let radius_sq = radius * radius;
    Some(
        atoms
            .iter()
            .map(|a| {
                let nearest = kdtree.nearest_one::<SquaredEuclidean>(&[
                    a.position.x,
                    a.position.y,
                    a.position.z,
                ]);
                nearest.distance <= radius_sq
            })
            .collect(),
    )
}
