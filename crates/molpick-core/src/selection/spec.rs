//! Best-effort compilation of simple expressions into a flat attribute spec.
//!
//! Hosts with a native filtering path (a viewer wrapper that can restrict its
//! own atom stream by attribute) can skip full evaluation for expressions
//! that are pure conjunctions of exact attribute tests. [`to_spec`] performs
//! that rewrite; `None` is the normal "not convertible" outcome and callers
//! always keep the evaluator as fallback.

use crate::core::models::atom::Atom;
use crate::selection::ast::{CmpOp, Expr, Keyword, NamePattern, NumTest};
use serde::Serialize;
use std::collections::HashSet;

/// A flat conjunction of attribute constraints.
///
/// Every present field must hold for an atom to pass. Name, residue-name,
/// and element constraints compare case-insensitively (values are stored
/// uppercased); chain and residue number compare exactly. A produced spec
/// denotes exactly the same atom set as evaluating its source expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionSpec {
    /// Accepted atom names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atom_names: Option<Vec<String>>,
    /// Accepted residue names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res_names: Option<Vec<String>>,
    /// Required chain identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<char>,
    /// Required element symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Required residue sequence number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res_seq: Option<isize>,
}

impl SelectionSpec {
    /// The host-filter semantics this spec promises: exact membership per
    /// attribute, case-insensitive for names/residues/elements.
    pub fn matches(&self, atom: &Atom) -> bool {
        let name_ok = self.atom_names.as_ref().is_none_or(|names| {
            names
                .iter()
                .any(|n| n.eq_ignore_ascii_case(atom.name.trim()))
        });
        let res_ok = self.res_names.as_ref().is_none_or(|names| {
            names
                .iter()
                .any(|n| n.eq_ignore_ascii_case(atom.res_name.trim()))
        });
        let chain_ok = self.chain.is_none_or(|c| c == atom.chain);
        let element_ok = self
            .element
            .as_ref()
            .is_none_or(|e| e.eq_ignore_ascii_case(atom.element.trim()));
        let seq_ok = self.res_seq.is_none_or(|r| r == atom.res_seq);
        name_ok && res_ok && chain_ok && element_ok && seq_ok
    }
}

/// Rewrites an expression into a [`SelectionSpec`] when it is a pure
/// conjunction of exact attribute tests.
///
/// Convertible nodes: `all`, `name`/`resn` with exact (glob-free) values,
/// `chain`, `elem`, `resi` with exact equality, and `and` over convertible
/// operands. Everything else — any `or`/`not`/`xor`, distance or expansion
/// operator, range or relational `resi`, any `index` test, glob values, or
/// conflicting repeated attributes — returns `None`, which is not an error:
/// the caller falls back to full evaluation.
pub fn to_spec(expr: &Expr) -> Option<SelectionSpec> {
    let mut spec = SelectionSpec::default();
    merge(expr, &mut spec)?;
    Some(spec)
}

fn merge(expr: &Expr, spec: &mut SelectionSpec) -> Option<()> {
    match expr {
        Expr::Keyword(Keyword::All) => Some(()),
        Expr::Name(patterns) => set_values(&mut spec.atom_names, exact_values(patterns)?),
        Expr::ResName(patterns) => set_values(&mut spec.res_names, exact_values(patterns)?),
        Expr::Chain(id) => set_scalar(&mut spec.chain, *id),
        Expr::Element(symbol) => set_scalar(&mut spec.element, symbol.to_ascii_uppercase()),
        Expr::ResSeq(NumTest::Single(n)) | Expr::ResSeq(NumTest::Cmp(CmpOp::Eq, n)) => {
            set_scalar(&mut spec.res_seq, *n as isize)
        }
        Expr::And(children) => {
            for child in children {
                merge(child, spec)?;
            }
            Some(())
        }
        _ => None,
    }
}

fn exact_values(patterns: &[NamePattern]) -> Option<Vec<String>> {
    patterns
        .iter()
        .map(|pattern| match pattern {
            NamePattern::Exact(value) => Some(value.to_ascii_uppercase()),
            NamePattern::Glob { .. } => None,
        })
        .collect()
}

fn set_values(slot: &mut Option<Vec<String>>, values: Vec<String>) -> Option<()> {
    match slot {
        Some(existing) => {
            let lhs: HashSet<&str> = existing.iter().map(String::as_str).collect();
            let rhs: HashSet<&str> = values.iter().map(String::as_str).collect();
            (lhs == rhs).then_some(())
        }
        None => {
            *slot = Some(values);
            Some(())
        }
    }
}

fn set_scalar<T: PartialEq>(slot: &mut Option<T>, value: T) -> Option<()> {
    match slot {
        Some(existing) => (*existing == value).then_some(()),
        None => {
            *slot = Some(value);
            Some(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::eval::SelectionContext;
    use crate::selection::parser::parse_selection;
    use nalgebra::Point3;

    fn fixture() -> Vec<Atom> {
        let mut atoms = vec![
            Atom::new(0, "N", "ALA", 1, 'A', Point3::new(0.0, 0.0, 0.0)),
            Atom::new(1, "CA", "ALA", 1, 'A', Point3::new(1.5, 0.0, 0.0)),
            Atom::new(2, "CB", "ALA", 1, 'A', Point3::new(1.5, 1.5, 0.0)),
            Atom::new(3, "CA", "GLY", 2, 'A', Point3::new(6.0, 0.0, 0.0)),
            Atom::new(4, "CA", "VAL", 3, 'B', Point3::new(21.0, 0.0, 0.0)),
            Atom::new(5, "O", "HOH", 100, 'W', Point3::new(30.0, 0.0, 0.0)),
        ];
        for (atom, element) in atoms.iter_mut().zip(["N", "C", "C", "C", "C", "O"]) {
            atom.element = element.to_string();
        }
        atoms
    }

    #[test]
    fn converts_each_simple_predicate() {
        assert_eq!(
            to_spec(&parse_selection("all").unwrap()),
            Some(SelectionSpec::default())
        );

        let spec = to_spec(&parse_selection("name CA+CB").unwrap()).unwrap();
        assert_eq!(
            spec.atom_names,
            Some(vec!["CA".to_string(), "CB".to_string()])
        );

        let spec = to_spec(&parse_selection("resn ala").unwrap()).unwrap();
        assert_eq!(spec.res_names, Some(vec!["ALA".to_string()]));

        let spec = to_spec(&parse_selection("chain A").unwrap()).unwrap();
        assert_eq!(spec.chain, Some('A'));

        let spec = to_spec(&parse_selection("elem fe").unwrap()).unwrap();
        assert_eq!(spec.element, Some("FE".to_string()));

        let spec = to_spec(&parse_selection("resi 5").unwrap()).unwrap();
        assert_eq!(spec.res_seq, Some(5));

        let spec = to_spec(&parse_selection("resi ==5").unwrap()).unwrap();
        assert_eq!(spec.res_seq, Some(5));
    }

    #[test]
    fn converts_conjunctions_of_simple_predicates() {
        let spec =
            to_spec(&parse_selection("name CA and resn ALA and chain A and resi 1").unwrap())
                .unwrap();
        assert_eq!(spec.atom_names, Some(vec!["CA".to_string()]));
        assert_eq!(spec.res_names, Some(vec!["ALA".to_string()]));
        assert_eq!(spec.chain, Some('A'));
        assert_eq!(spec.res_seq, Some(1));
    }

    #[test]
    fn rejects_everything_outside_the_convertible_subset() {
        for expression in [
            "name CA or name CB",
            "not name CA",
            "helix xor sheet",
            "around 4.0 name CA",
            "xaround 4.0 name CA",
            "beyond 4.0 name CA",
            "byres name CA",
            "bychain name CA",
            "resi 1-10",
            "resi >5",
            "index 3",
            "water",
            "name CA and water",
            "name CA and (name CB or name CG)",
        ] {
            assert!(
                to_spec(&parse_selection(expression).unwrap()).is_none(),
                "'{expression}' should not be convertible"
            );
        }
    }

    #[test]
    fn glob_values_are_not_convertible() {
        assert!(to_spec(&parse_selection("name C*").unwrap()).is_none());
        assert!(to_spec(&parse_selection("resn AL?").unwrap()).is_none());
    }

    #[test]
    fn repeated_attributes_merge_when_equal_and_reject_otherwise() {
        assert!(to_spec(&parse_selection("chain A and chain A").unwrap()).is_some());
        assert!(to_spec(&parse_selection("chain A and chain B").unwrap()).is_none());
        assert!(to_spec(&parse_selection("name CA+CB and name CB+CA").unwrap()).is_some());
        assert!(to_spec(&parse_selection("name CA and name CB").unwrap()).is_none());
    }

    #[test]
    fn spec_filter_agrees_with_full_evaluation() {
        let atoms = fixture();
        let ctx = SelectionContext::new();
        for expression in [
            "all",
            "name CA",
            "name CA+CB",
            "resn ALA",
            "chain B",
            "elem O",
            "resi 1",
            "name CA and chain A",
            "resn ALA and resi 1 and elem C",
            "name ca and resn ala and chain A and resi ==1 and elem C",
        ] {
            let expr = parse_selection(expression).unwrap();
            let spec = to_spec(&expr).expect(expression);
            let by_spec: Vec<usize> = atoms
                .iter()
                .filter(|a| spec.matches(a))
                .map(|a| a.serial)
                .collect();
            let by_eval: Vec<usize> = ctx.evaluate(&expr, &atoms).iter().map(|a| a.serial).collect();
            assert_eq!(by_spec, by_eval, "spec and evaluator disagree on '{expression}'");
        }
    }

    #[test]
    fn serializes_only_present_fields() {
        let spec = to_spec(&parse_selection("name CA and chain A").unwrap()).unwrap();
        let toml = toml::to_string(&spec).unwrap();
        assert!(toml.contains("atom_names"));
        assert!(toml.contains("chain"));
        assert!(!toml.contains("res_seq"));
        assert!(!toml.contains("element"));
    }
}
