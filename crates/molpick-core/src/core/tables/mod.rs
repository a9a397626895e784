//! Static classification tables for the keyword selectors.
//!
//! These are the built-in defaults; [`registry::ClassificationRegistry`]
//! wraps them as a value that can be replaced from a data file.

pub mod registry;

use phf::{Set, phf_set};

static STANDARD_AMINO_ACIDS: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    // Protonation-state and disulfide variants
    "HID", "HIE", "HIP", "HSD", "HSE", "HSP", "CYX", "CYM", "ASH", "GLH", "LYN",
};

static WATER_RESIDUES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "D2O", "SOL",
    "TIP3", "TIP4", "TIP5", "T3P", "T4P", "T5P", "SPC",
};

// Non-water solvents and cryoprotectants; the `solvent` selector covers
// these plus every water residue.
static SOLVENT_RESIDUES: Set<&'static str> = phf_set! {
    "GOL", "EDO", "DMS", "MPD", "PEG", "PGE", "IPA", "EOH", "MOH", "ACT",
    "ACN", "FMT", "BME",
};

static METAL_ELEMENTS: Set<&'static str> = phf_set! {
    "LI", "BE", "NA", "MG", "AL", "K", "CA", "SC", "TI", "V", "CR", "MN",
    "FE", "CO", "NI", "CU", "ZN", "GA", "RB", "SR", "Y", "ZR", "NB", "MO",
    "TC", "RU", "RH", "PD", "AG", "CD", "IN", "SN", "CS", "BA", "LA", "CE",
    "PR", "ND", "SM", "EU", "GD", "TB", "DY", "HO", "ER", "TM", "YB", "LU",
    "HF", "TA", "W", "RE", "OS", "IR", "PT", "AU", "HG", "TL", "PB", "BI",
};

static BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "N", "CA", "C", "O",
};

/// Terminal-oxygen atom name, excluded from `sidechain` alongside the
/// backbone set.
pub const TERMINAL_OXYGEN: &str = "OXT";

pub fn is_standard_amino_acid(res_name: &str) -> bool {
    STANDARD_AMINO_ACIDS.contains(res_name.trim().to_ascii_uppercase().as_str())
}

pub fn is_water_residue(res_name: &str) -> bool {
    WATER_RESIDUES.contains(res_name.trim().to_ascii_uppercase().as_str())
}

/// True for water residues and non-water solvents alike.
pub fn is_solvent_residue(res_name: &str) -> bool {
    let key = res_name.trim().to_ascii_uppercase();
    WATER_RESIDUES.contains(key.as_str()) || SOLVENT_RESIDUES.contains(key.as_str())
}

pub fn is_metal_element(element: &str) -> bool {
    METAL_ELEMENTS.contains(element.trim().to_ascii_uppercase().as_str())
}

pub fn is_backbone_atom_name(atom_name: &str) -> bool {
    BACKBONE_ATOM_NAMES.contains(atom_name.trim().to_ascii_uppercase().as_str())
}

pub fn is_terminal_oxygen(atom_name: &str) -> bool {
    atom_name.trim().eq_ignore_ascii_case(TERMINAL_OXYGEN)
}

pub(crate) fn standard_amino_acid_names() -> impl Iterator<Item = &'static str> {
    STANDARD_AMINO_ACIDS.iter().copied()
}

pub(crate) fn water_residue_names() -> impl Iterator<Item = &'static str> {
    WATER_RESIDUES.iter().copied()
}

pub(crate) fn solvent_residue_names() -> impl Iterator<Item = &'static str> {
    SOLVENT_RESIDUES.iter().copied()
}

pub(crate) fn metal_element_symbols() -> impl Iterator<Item = &'static str> {
    METAL_ELEMENTS.iter().copied()
}

pub(crate) fn backbone_atom_names() -> impl Iterator<Item = &'static str> {
    BACKBONE_ATOM_NAMES.iter().copied()
}
