use thiserror::Error;

/// Reasons a SMILES string cannot be turned into a molecule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmilesError {
    #[error("empty SMILES")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected end of SMILES")]
    UnexpectedEnd,

    #[error("unknown element '{0}'")]
    UnknownElement(String),

    #[error("isotope at position {0} is out of range")]
    IsotopeOutOfRange(usize),

    #[error("unterminated bracket atom starting at position {0}")]
    UnterminatedBracket(usize),

    #[error("bond symbol at position {0} is not followed by an atom")]
    DanglingBond(usize),

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("unclosed ring bond {0}")]
    UnclosedRing(u16),

    #[error("ring bond {0} duplicates an existing bond")]
    DuplicateBond(u16),

    #[error("atom {index} ({symbol}) exceeds its allowed valence")]
    Valence { index: usize, symbol: String },

    #[error("atom {index} ({symbol}) carries more hydrogens than can be counted")]
    TooManyHydrogens { index: usize, symbol: String },

    #[error("atom {index} ({symbol}) is marked aromatic but is not in a ring")]
    NonRingAromatic { index: usize, symbol: String },
}
