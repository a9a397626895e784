use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Secondary-structure assignment for an atom's residue.
///
/// Assignments come from whatever structure annotation the host has loaded
/// (PDB HELIX/SHEET records, DSSP output, ...), reduced to the one-letter
/// codes the selection language matches on: `h`, `s`, `t`, `c`, or blank.
///
/// The `loop` selector matches both [`SecondaryStructure::Loop`] and
/// [`SecondaryStructure::Unassigned`]: atoms without any assignment are
/// treated as coil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecondaryStructure {
    /// Alpha helix (code `h`).
    Helix,
    /// Beta sheet / strand (code `s`).
    Sheet,
    /// Turn (code `t`).
    Turn,
    /// Loop / coil (code `c`).
    Loop,
    /// No assignment available (blank code).
    #[default]
    Unassigned,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid secondary structure code '{0}'")]
pub struct ParseSecondaryStructureError(pub String);

impl SecondaryStructure {
    /// Converts a one-letter secondary-structure code into an assignment.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSecondaryStructureError`] for any character outside
    /// `h`, `s`, `t`, `c` (case-insensitive) or blank.
    pub fn from_code(code: char) -> Result<Self, ParseSecondaryStructureError> {
        match code.to_ascii_lowercase() {
            'h' => Ok(SecondaryStructure::Helix),
            's' => Ok(SecondaryStructure::Sheet),
            't' => Ok(SecondaryStructure::Turn),
            'c' => Ok(SecondaryStructure::Loop),
            ' ' => Ok(SecondaryStructure::Unassigned),
            _ => Err(ParseSecondaryStructureError(code.to_string())),
        }
    }

    /// Returns the one-letter code for this assignment (blank for
    /// [`SecondaryStructure::Unassigned`]).
    pub fn code(&self) -> char {
        match self {
            SecondaryStructure::Helix => 'h',
            SecondaryStructure::Sheet => 's',
            SecondaryStructure::Turn => 't',
            SecondaryStructure::Loop => 'c',
            SecondaryStructure::Unassigned => ' ',
        }
    }
}

impl FromStr for SecondaryStructure {
    type Err = ParseSecondaryStructureError;

    /// Parses a one-letter code or a full name (`"helix"`, `"sheet"`,
    /// `"turn"`, `"loop"`), case-insensitively. The empty string parses as
    /// [`SecondaryStructure::Unassigned`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" => Ok(SecondaryStructure::Unassigned),
            "helix" => Ok(SecondaryStructure::Helix),
            "sheet" | "strand" => Ok(SecondaryStructure::Sheet),
            "turn" => Ok(SecondaryStructure::Turn),
            "loop" | "coil" => Ok(SecondaryStructure::Loop),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_code(c),
                    _ => Err(ParseSecondaryStructureError(s.to_string())),
                }
            }
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SecondaryStructure::Helix => "Helix",
                SecondaryStructure::Sheet => "Sheet",
                SecondaryStructure::Turn => "Turn",
                SecondaryStructure::Loop => "Loop",
                SecondaryStructure::Unassigned => "Unassigned",
            }
        )
    }
}

/// A single atom in the host's structure snapshot.
///
/// This is a read-only view of what the host application knows about an atom
/// at evaluation time. The selection engine never mutates it, caches it, or
/// resolves anything beyond the fields present here; in particular there is
/// no bond graph, which is why the `organic` and `polar_hydrogen` selectors
/// are documented approximations.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Unique non-negative serial within the session, in snapshot order.
    pub serial: usize,
    /// The atom name (e.g., "CA", "N", "OXT").
    pub name: String,
    /// The residue name (e.g., "ALA", "HOH", "LIG").
    pub res_name: String,
    /// The residue sequence number from the source file.
    pub res_seq: isize,
    /// Chain identifier; a blank space when the source assigns none.
    pub chain: char,
    /// Element symbol (e.g., "C", "N", "FE").
    pub element: String,
    /// Secondary-structure assignment of the owning residue.
    pub sec_struct: SecondaryStructure,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Identifier of the loaded model/object this atom belongs to.
    pub object: String,
}

impl Atom {
    /// Creates a new `Atom` with default values for the remaining fields.
    ///
    /// `element`, `sec_struct`, and `object` start empty/unassigned and can
    /// be set afterward as needed.
    ///
    /// # Arguments
    ///
    /// * `serial` - Session-unique serial number.
    /// * `name` - The atom name.
    /// * `res_name` - The owning residue's name.
    /// * `res_seq` - The owning residue's sequence number.
    /// * `chain` - The owning chain identifier.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(
        serial: usize,
        name: &str,
        res_name: &str,
        res_seq: isize,
        chain: char,
        position: Point3<f64>,
    ) -> Self {
        Self {
            serial,
            name: name.to_string(),
            res_name: res_name.to_string(),
            res_seq,
            chain,
            element: String::new(),
            sec_struct: SecondaryStructure::default(),
            position,
            object: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(7, "CA", "ALA", 1, 'A', Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.serial, 7);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.res_name, "ALA");
        assert_eq!(atom.res_seq, 1);
        assert_eq!(atom.chain, 'A');
        assert_eq!(atom.element, "");
        assert_eq!(atom.sec_struct, SecondaryStructure::Unassigned);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.object, "");
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new(0, "N", "GLY", 2, 'B', Point3::origin());
        atom1.element = "N".to_string();
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }

    #[test]
    fn from_code_parses_valid_codes() {
        assert_eq!(
            SecondaryStructure::from_code('h'),
            Ok(SecondaryStructure::Helix)
        );
        assert_eq!(
            SecondaryStructure::from_code('S'),
            Ok(SecondaryStructure::Sheet)
        );
        assert_eq!(
            SecondaryStructure::from_code('t'),
            Ok(SecondaryStructure::Turn)
        );
        assert_eq!(
            SecondaryStructure::from_code('c'),
            Ok(SecondaryStructure::Loop)
        );
        assert_eq!(
            SecondaryStructure::from_code(' '),
            Ok(SecondaryStructure::Unassigned)
        );
    }

    #[test]
    fn from_code_rejects_unknown_codes() {
        assert!(SecondaryStructure::from_code('x').is_err());
        assert!(SecondaryStructure::from_code('1').is_err());
    }

    #[test]
    fn from_str_parses_names_and_codes() {
        assert_eq!("helix".parse(), Ok(SecondaryStructure::Helix));
        assert_eq!("Sheet".parse(), Ok(SecondaryStructure::Sheet));
        assert_eq!("strand".parse(), Ok(SecondaryStructure::Sheet));
        assert_eq!("TURN".parse(), Ok(SecondaryStructure::Turn));
        assert_eq!("coil".parse(), Ok(SecondaryStructure::Loop));
        assert_eq!("h".parse(), Ok(SecondaryStructure::Helix));
        assert_eq!("".parse(), Ok(SecondaryStructure::Unassigned));
        assert!("spiral".parse::<SecondaryStructure>().is_err());
    }

    #[test]
    fn code_round_trips_through_from_code() {
        for ss in [
            SecondaryStructure::Helix,
            SecondaryStructure::Sheet,
            SecondaryStructure::Turn,
            SecondaryStructure::Loop,
            SecondaryStructure::Unassigned,
        ] {
            assert_eq!(SecondaryStructure::from_code(ss.code()), Ok(ss));
        }
    }
}
