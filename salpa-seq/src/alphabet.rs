//! Residue alphabets with fixed symbol/state-index tables.
//!
//! An [`Alphabet`] is a runtime value selected by [`AlphabetId`]. Each
//! alphabet fixes an ordered list of canonical states (a symbol's state
//! index is its position in that list), a set of extended symbols accepted
//! in sequence data but carrying no state index, and the gap symbol `-`.
//!
//! State orders:
//!
//! - DNA: `A C G T` (0..4)
//! - RNA: `A C G U` (0..4)
//! - protein: `A R N D C Q E G H I L K M F P S T W Y V` (0..20)

use salpa_core::{Result, SalpaError};

/// Gap symbol shared by all alphabets.
pub const GAP: u8 = b'-';

/// Canonical nucleotide states, DNA spelling.
const DNA_STATES: &[u8] = b"ACGT";
/// Canonical nucleotide states, RNA spelling.
const RNA_STATES: &[u8] = b"ACGU";
/// Canonical amino-acid states in the classic substitution-matrix order.
const PROTEIN_STATES: &[u8] = b"ARNDCQEGHILKMFPSTWYV";

/// IUPAC nucleotide ambiguity symbols.
const NUC_EXTENDED: &[u8] = b"NRYSWKMBDHV";
/// Extended amino-acid symbols. `*` marks a translated stop in data files.
const PROTEIN_EXTENDED: &[u8] = b"BZXJUO*";

// ---------------------------------------------------------------------------
// Alphabet identifiers
// ---------------------------------------------------------------------------

/// Identifier for the supported residue alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlphabetId {
    Dna,
    Rna,
    Protein,
}

// ---------------------------------------------------------------------------
// Alphabet
// ---------------------------------------------------------------------------

/// A residue alphabet with a fixed symbol/state-index table.
///
/// Input symbols are handled case-insensitively; canonical symbols are
/// uppercase bytes. Extended symbols and the gap are accepted by
/// [`is_valid`](Alphabet::is_valid) but have no state index, so
/// [`state_index`](Alphabet::state_index) rejects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    id: AlphabetId,
    name: &'static str,
    states: &'static [u8],
    extended: &'static [u8],
}

impl Alphabet {
    /// The DNA alphabet (`ACGT` plus IUPAC ambiguity symbols).
    pub fn dna() -> Self {
        Alphabet {
            id: AlphabetId::Dna,
            name: "DNA",
            states: DNA_STATES,
            extended: NUC_EXTENDED,
        }
    }

    /// The RNA alphabet (`ACGU` plus IUPAC ambiguity symbols).
    pub fn rna() -> Self {
        Alphabet {
            id: AlphabetId::Rna,
            name: "RNA",
            states: RNA_STATES,
            extended: NUC_EXTENDED,
        }
    }

    /// The 20-state protein alphabet.
    pub fn protein() -> Self {
        Alphabet {
            id: AlphabetId::Protein,
            name: "protein",
            states: PROTEIN_STATES,
            extended: PROTEIN_EXTENDED,
        }
    }

    /// Alphabet for an identifier.
    pub fn from_id(id: AlphabetId) -> Self {
        match id {
            AlphabetId::Dna => Alphabet::dna(),
            AlphabetId::Rna => Alphabet::rna(),
            AlphabetId::Protein => Alphabet::protein(),
        }
    }

    pub fn id(&self) -> AlphabetId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of canonical states: 4 for nucleotide alphabets, 20 for protein.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Whether this is a nucleotide alphabet (DNA or RNA).
    pub fn is_nucleic(&self) -> bool {
        matches!(self.id, AlphabetId::Dna | AlphabetId::Rna)
    }

    /// State index of a canonical symbol.
    ///
    /// Extended symbols and gaps carry no state index and are rejected
    /// along with everything else outside the alphabet.
    pub fn state_index(&self, symbol: u8) -> Result<usize> {
        let up = symbol.to_ascii_uppercase();
        self.states
            .iter()
            .position(|&s| s == up)
            .ok_or_else(|| SalpaError::BadChar {
                context: "Alphabet::state_index",
                token: (symbol as char).to_string(),
                alphabet: self.description(),
            })
    }

    /// Canonical symbol for a state index.
    pub fn symbol(&self, index: usize) -> Result<u8> {
        self.states
            .get(index)
            .copied()
            .ok_or_else(|| SalpaError::BadIndex {
                context: "Alphabet::symbol",
                index,
                alphabet: self.description(),
            })
    }

    /// Whether `symbol` is acceptable in sequence data for this alphabet:
    /// canonical, extended, or gap.
    pub fn is_valid(&self, symbol: u8) -> bool {
        let up = symbol.to_ascii_uppercase();
        up == GAP || self.states.contains(&up) || self.extended.contains(&up)
    }

    /// Whether `symbol` is a fully resolved canonical state.
    pub fn is_canonical(&self, symbol: u8) -> bool {
        self.states.contains(&symbol.to_ascii_uppercase())
    }

    /// Whether `symbol` is the gap.
    pub fn is_gap(symbol: u8) -> bool {
        symbol == GAP
    }

    /// Short description used in error messages, e.g. `DNA alphabet (4 states)`.
    pub fn description(&self) -> String {
        format!("{} alphabet ({} states)", self.name, self.size())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dna_state_indices() {
        let dna = Alphabet::dna();
        assert_eq!(dna.state_index(b'A').unwrap(), 0);
        assert_eq!(dna.state_index(b'C').unwrap(), 1);
        assert_eq!(dna.state_index(b'G').unwrap(), 2);
        assert_eq!(dna.state_index(b'T').unwrap(), 3);
        assert_eq!(dna.state_index(b't').unwrap(), 3);
    }

    #[test]
    fn rna_spells_u_not_t() {
        let rna = Alphabet::rna();
        assert_eq!(rna.state_index(b'U').unwrap(), 3);
        assert!(rna.state_index(b'T').is_err());
        assert!(Alphabet::dna().state_index(b'U').is_err());
    }

    #[test]
    fn protein_state_order() {
        let prot = Alphabet::protein();
        assert_eq!(prot.size(), 20);
        assert_eq!(prot.state_index(b'A').unwrap(), 0);
        assert_eq!(prot.state_index(b'R').unwrap(), 1);
        assert_eq!(prot.state_index(b'M').unwrap(), 12);
        assert_eq!(prot.state_index(b'V').unwrap(), 19);
        assert_eq!(prot.symbol(19).unwrap(), b'V');
    }

    #[test]
    fn symbol_and_state_index_are_inverse() {
        for alphabet in [Alphabet::dna(), Alphabet::rna(), Alphabet::protein()] {
            for i in 0..alphabet.size() {
                let s = alphabet.symbol(i).unwrap();
                assert_eq!(alphabet.state_index(s).unwrap(), i);
            }
        }
    }

    #[test]
    fn extended_symbols_are_valid_but_not_canonical() {
        let dna = Alphabet::dna();
        for &b in b"NRYSWKMBDHV" {
            assert!(dna.is_valid(b));
            assert!(!dna.is_canonical(b));
            assert!(dna.state_index(b).is_err());
        }
        let prot = Alphabet::protein();
        assert!(prot.is_valid(b'X'));
        assert!(prot.is_valid(b'*'));
        assert!(prot.state_index(b'*').is_err());
    }

    #[test]
    fn gap_is_valid_everywhere() {
        for alphabet in [Alphabet::dna(), Alphabet::rna(), Alphabet::protein()] {
            assert!(alphabet.is_valid(b'-'));
            assert!(!alphabet.is_canonical(b'-'));
        }
        assert!(Alphabet::is_gap(b'-'));
        assert!(!Alphabet::is_gap(b'A'));
    }

    #[test]
    fn bad_char_reports_token_and_alphabet() {
        let err = Alphabet::dna().state_index(b'!').unwrap_err();
        match err {
            SalpaError::BadChar { token, alphabet, .. } => {
                assert_eq!(token, "!");
                assert!(alphabet.contains("DNA"));
            }
            other => panic!("expected BadChar, got {other:?}"),
        }
    }

    #[test]
    fn bad_index_out_of_range() {
        assert!(Alphabet::dna().symbol(4).is_err());
        assert!(Alphabet::protein().symbol(20).is_err());
        match Alphabet::protein().symbol(99).unwrap_err() {
            SalpaError::BadIndex { index, .. } => assert_eq!(index, 99),
            other => panic!("expected BadIndex, got {other:?}"),
        }
    }

    #[test]
    fn from_id_round_trips() {
        for id in [AlphabetId::Dna, AlphabetId::Rna, AlphabetId::Protein] {
            assert_eq!(Alphabet::from_id(id).id(), id);
        }
    }

    #[test]
    fn nucleic_flag() {
        assert!(Alphabet::dna().is_nucleic());
        assert!(Alphabet::rna().is_nucleic());
        assert!(!Alphabet::protein().is_nucleic());
    }
}
