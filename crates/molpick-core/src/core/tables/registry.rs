use super::{
    TERMINAL_OXYGEN, backbone_atom_names, metal_element_symbols, solvent_residue_names,
    standard_amino_acid_names, water_residue_names,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Classification data the evaluator consults for keyword selectors.
///
/// Defaults to the built-in tables in [`super`]; a host can load a TOML data
/// file to adjust what counts as water, solvent, metal, amino acid, or
/// backbone without touching evaluator logic. Categories absent from the
/// file keep their defaults.
#[derive(Debug, Clone)]
pub struct ClassificationRegistry {
    amino_acids: HashSet<String>,
    water: HashSet<String>,
    solvent: HashSet<String>,
    metals: HashSet<String>,
    backbone_atoms: HashSet<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    amino_acids: Option<Vec<String>>,
    water: Option<Vec<String>>,
    solvent: Option<Vec<String>>,
    metals: Option<Vec<String>>,
    backbone_atoms: Option<Vec<String>>,
}

impl Default for ClassificationRegistry {
    fn default() -> Self {
        Self {
            amino_acids: standard_amino_acid_names().map(str::to_string).collect(),
            water: water_residue_names().map(str::to_string).collect(),
            solvent: solvent_residue_names().map(str::to_string).collect(),
            metals: metal_element_symbols().map(str::to_string).collect(),
            backbone_atoms: backbone_atom_names().map(str::to_string).collect(),
        }
    }
}

impl ClassificationRegistry {
    /// The process-wide registry built from the default tables, initialized
    /// once on first use.
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<ClassificationRegistry> = OnceLock::new();
        STANDARD.get_or_init(ClassificationRegistry::default)
    }

    /// Loads a registry from a TOML file, starting from the defaults and
    /// replacing each category the file specifies.
    ///
    /// Expected keys (all optional, each an array of strings):
    /// `amino_acids`, `water`, `solvent`, `metals`, `backbone_atoms`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryLoadError`] if the file cannot be read or is not
    /// valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, RegistryLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: RegistryFile = toml::from_str(&content).map_err(|e| RegistryLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut registry = Self::default();
        let normalize =
            |names: Vec<String>| names.iter().map(|n| canonical_key(n)).collect::<HashSet<_>>();
        if let Some(names) = file.amino_acids {
            registry.amino_acids = normalize(names);
        }
        if let Some(names) = file.water {
            registry.water = normalize(names);
        }
        if let Some(names) = file.solvent {
            registry.solvent = normalize(names);
        }
        if let Some(names) = file.metals {
            registry.metals = normalize(names);
        }
        if let Some(names) = file.backbone_atoms {
            registry.backbone_atoms = normalize(names);
        }
        Ok(registry)
    }

    pub fn is_amino_acid(&self, res_name: &str) -> bool {
        self.amino_acids.contains(&canonical_key(res_name))
    }

    pub fn is_water(&self, res_name: &str) -> bool {
        self.water.contains(&canonical_key(res_name))
    }

    /// True for water residues and non-water solvents alike.
    pub fn is_solvent(&self, res_name: &str) -> bool {
        let key = canonical_key(res_name);
        self.water.contains(&key) || self.solvent.contains(&key)
    }

    pub fn is_metal(&self, element: &str) -> bool {
        self.metals.contains(&canonical_key(element))
    }

    pub fn is_backbone_atom(&self, atom_name: &str) -> bool {
        self.backbone_atoms.contains(&canonical_key(atom_name))
    }

    pub fn is_terminal_oxygen(&self, atom_name: &str) -> bool {
        atom_name.trim().eq_ignore_ascii_case(TERMINAL_OXYGEN)
    }
}

fn canonical_key(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

#[derive(Debug, Error)]
pub enum RegistryLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}
