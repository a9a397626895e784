//! AST node types for the selection language.

use regex::Regex;

/// A parsed selection expression.
///
/// The sum type is closed and evaluation matches on it exhaustively, so an
/// unrecognized node kind is a compile error here rather than a runtime
/// fault. Nodes are built once per parse and never mutated.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Bare classification keyword (`all`, `protein`, `helix`, ...).
    Keyword(Keyword),
    /// `name CA+CB` — atom-name membership, entries exact or glob.
    Name(Vec<NamePattern>),
    /// `resn ALA+GLY` — residue-name membership, entries exact or glob.
    ResName(Vec<NamePattern>),
    /// `chain A` — exact chain identifier match.
    Chain(char),
    /// `elem FE` — case-insensitive element match.
    Element(String),
    /// `resi 1-10` — residue sequence number test.
    ResSeq(NumTest),
    /// `index 42` — atom serial test.
    Index(NumTest),
    /// `not expr` — complement against the input sequence.
    Not(Box<Expr>),
    /// `a and b and c` — n-ary intersection.
    And(Vec<Expr>),
    /// `a or b or c` — n-ary union.
    Or(Vec<Expr>),
    /// `a xor b xor c` — atoms matched by exactly one child.
    Xor(Vec<Expr>),
    /// `around R expr` — matches plus everything within `R` of a match.
    Around { radius: f64, inner: Box<Expr> },
    /// `xaround R expr` — everything within `R` of a match, minus the
    /// matches themselves.
    XAround { radius: f64, inner: Box<Expr> },
    /// `beyond R expr` — atoms with no match within `R`.
    Beyond { radius: f64, inner: Box<Expr> },
    /// `byres expr` — expand matches to whole residues.
    ByRes(Box<Expr>),
    /// `bychain expr` — expand matches to whole chains.
    ByChain(Box<Expr>),
}

/// Bare keyword selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    All,
    None,
    Protein,
    Water,
    Solvent,
    Backbone,
    Sidechain,
    Metal,
    Ligand,
    Organic,
    Hydrogen,
    Heavy,
    PolarHydrogen,
    NonpolarHydrogen,
    Helix,
    Sheet,
    Turn,
    Loop,
}

impl Keyword {
    /// Maps a lowercased word to its keyword, if it is one.
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "all" => Keyword::All,
            "none" => Keyword::None,
            "protein" => Keyword::Protein,
            "water" => Keyword::Water,
            "solvent" => Keyword::Solvent,
            "backbone" => Keyword::Backbone,
            "sidechain" => Keyword::Sidechain,
            "metal" => Keyword::Metal,
            "ligand" => Keyword::Ligand,
            "organic" => Keyword::Organic,
            "hydrogen" => Keyword::Hydrogen,
            "heavy" => Keyword::Heavy,
            "polar_hydrogen" => Keyword::PolarHydrogen,
            "nonpolar_hydrogen" => Keyword::NonpolarHydrogen,
            "helix" => Keyword::Helix,
            "sheet" => Keyword::Sheet,
            "turn" => Keyword::Turn,
            "loop" => Keyword::Loop,
            _ => return None,
        })
    }
}

/// One entry of a `name`/`resn` value list.
///
/// Exact entries compare case-insensitively; entries containing `*` or `?`
/// are compiled once, at parse time, into an anchored case-insensitive
/// pattern (`*` matches any run, `?` any single character, everything else
/// literally).
#[derive(Debug, Clone)]
pub enum NamePattern {
    Exact(String),
    Glob { source: String, regex: Regex },
}

impl NamePattern {
    /// Builds the right pattern variant for a raw value list entry.
    pub fn parse(value: &str) -> Result<Self, regex::Error> {
        if value.contains('*') || value.contains('?') {
            Ok(NamePattern::Glob {
                source: value.to_string(),
                regex: glob_to_regex(value)?,
            })
        } else {
            Ok(NamePattern::Exact(value.to_string()))
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            NamePattern::Exact(expected) => expected.eq_ignore_ascii_case(value),
            NamePattern::Glob { regex, .. } => regex.is_match(value),
        }
    }

    /// The entry as written in the expression.
    pub fn source(&self) -> &str {
        match self {
            NamePattern::Exact(value) => value,
            NamePattern::Glob { source, .. } => source,
        }
    }

    pub fn is_glob(&self) -> bool {
        matches!(self, NamePattern::Glob { .. })
    }
}

/// Compiles a `*`/`?` glob into an anchored, case-insensitive [`Regex`].
fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(glob.len() + 8);
    pattern.push_str("(?i)^");
    for ch in glob.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    pattern.push('$');
    Regex::new(&pattern)
}

/// Comparison operator for `resi`/`index` predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ge,
    Le,
    Gt,
    Lt,
}

impl CmpOp {
    pub fn compare(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Lt => lhs < rhs,
        }
    }
}

/// Numeric test carried by `resi`/`index`: exact value, inclusive range, or
/// relational comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumTest {
    Single(i64),
    Range(i64, i64),
    Cmp(CmpOp, i64),
}

impl NumTest {
    pub fn matches(&self, value: i64) -> bool {
        match self {
            NumTest::Single(expected) => value == *expected,
            NumTest::Range(lo, hi) => value >= *lo && value <= *hi,
            NumTest::Cmp(op, rhs) => op.compare(value, *rhs),
        }
    }
}
