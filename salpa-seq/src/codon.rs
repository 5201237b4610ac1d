//! The 64-codon alphabet over a nucleotide alphabet.
//!
//! Codon indices use a radix-4 positional encoding with the first position
//! most significant: `index = 16*p0 + 4*p1 + p2`, where each `p` is the
//! state index of the base at that position (`A`=0, `C`=1, `G`=2,
//! `T`/`U`=3). Index 0 is `AAA`, index 63 is `TTT` (`UUU` in RNA
//! spelling).

use salpa_core::{Result, SalpaError};

use crate::alphabet::Alphabet;

/// Number of codons in the alphabet.
pub const CODON_COUNT: usize = 64;

/// The 64 nucleotide triplets with their fixed index space.
///
/// The underlying nucleotide alphabet fixes the spelling (`T` for DNA,
/// `U` for RNA); the index space is identical either way. Triplets
/// containing ambiguity symbols or gaps resolve to no single index and
/// are rejected as bad characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonAlphabet {
    nucleic: Alphabet,
}

impl CodonAlphabet {
    /// Codon alphabet with DNA spelling.
    pub fn dna() -> Self {
        CodonAlphabet {
            nucleic: Alphabet::dna(),
        }
    }

    /// Codon alphabet with RNA spelling.
    pub fn rna() -> Self {
        CodonAlphabet {
            nucleic: Alphabet::rna(),
        }
    }

    /// Codon alphabet over an arbitrary nucleotide alphabet.
    pub fn new(nucleic: Alphabet) -> Result<Self> {
        if !nucleic.is_nucleic() {
            return Err(SalpaError::InvalidInput(format!(
                "codon alphabet requires a nucleotide alphabet, got {}",
                nucleic.name()
            )));
        }
        Ok(CodonAlphabet { nucleic })
    }

    /// The underlying nucleotide alphabet.
    pub fn nucleic_alphabet(&self) -> &Alphabet {
        &self.nucleic
    }

    /// Number of codons, always 64.
    pub fn len(&self) -> usize {
        CODON_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Short description used in error messages.
    pub fn description(&self) -> String {
        format!("{} codon alphabet (64 codons)", self.nucleic.name())
    }

    /// Index of a three-base codon spelling (case-insensitive).
    ///
    /// The spelling must be exactly three canonical bases of the
    /// underlying alphabet; anything else, wrong lengths included, is a
    /// bad character.
    pub fn index_of(&self, codon: &[u8]) -> Result<usize> {
        let bad_char = || SalpaError::BadChar {
            context: "CodonAlphabet::index_of",
            token: String::from_utf8_lossy(codon).into_owned(),
            alphabet: self.description(),
        };
        if codon.len() != 3 {
            return Err(bad_char());
        }
        let mut index = 0;
        for &base in codon {
            match self.nucleic.state_index(base) {
                Ok(p) => index = 4 * index + p,
                Err(_) => return Err(bad_char()),
            }
        }
        Ok(index)
    }

    /// Decode an index into its three base positions.
    pub fn positions(&self, index: usize) -> Result<[usize; 3]> {
        if index >= CODON_COUNT {
            return Err(SalpaError::BadIndex {
                context: "CodonAlphabet::positions",
                index,
                alphabet: self.description(),
            });
        }
        Ok([index >> 4, (index >> 2) & 3, index & 3])
    }

    /// Encode three base positions into a codon index.
    pub fn index_from_positions(&self, positions: [usize; 3]) -> Result<usize> {
        for &p in &positions {
            if p >= self.nucleic.size() {
                return Err(SalpaError::BadIndex {
                    context: "CodonAlphabet::index_from_positions",
                    index: p,
                    alphabet: self.nucleic.description(),
                });
            }
        }
        Ok(16 * positions[0] + 4 * positions[1] + positions[2])
    }

    /// Spell the codon at `index` in the underlying alphabet.
    pub fn codon_at(&self, index: usize) -> Result<[u8; 3]> {
        let [p0, p1, p2] = self.positions(index)?;
        Ok([
            self.nucleic.symbol(p0)?,
            self.nucleic.symbol(p1)?,
            self.nucleic.symbol(p2)?,
        ])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_position_is_most_significant() {
        let codons = CodonAlphabet::dna();
        assert_eq!(codons.index_of(b"AAA").unwrap(), 0);
        assert_eq!(codons.index_of(b"AAC").unwrap(), 1);
        assert_eq!(codons.index_of(b"AAT").unwrap(), 3);
        assert_eq!(codons.index_of(b"ACA").unwrap(), 4);
        assert_eq!(codons.index_of(b"CAA").unwrap(), 16);
        assert_eq!(codons.index_of(b"ATG").unwrap(), 14);
        assert_eq!(codons.index_of(b"TTT").unwrap(), 63);
    }

    #[test]
    fn spelling_round_trips_through_index() {
        let codons = CodonAlphabet::dna();
        for i in 0..CODON_COUNT {
            let spelled = codons.codon_at(i).unwrap();
            assert_eq!(codons.index_of(&spelled).unwrap(), i);
        }
    }

    #[test]
    fn positions_round_trip() {
        let codons = CodonAlphabet::rna();
        for i in 0..CODON_COUNT {
            let p = codons.positions(i).unwrap();
            assert_eq!(codons.index_from_positions(p).unwrap(), i);
        }
    }

    #[test]
    fn rna_spelling_uses_u() {
        let codons = CodonAlphabet::rna();
        assert_eq!(codons.codon_at(14).unwrap(), *b"AUG");
        assert_eq!(codons.index_of(b"AUG").unwrap(), 14);
        assert_eq!(codons.index_of(b"aug").unwrap(), 14);
        assert!(codons.index_of(b"ATG").is_err());
    }

    #[test]
    fn wrong_length_is_bad_char() {
        let codons = CodonAlphabet::dna();
        for bad in [&b""[..], b"AT", b"ATGA"] {
            match codons.index_of(bad).unwrap_err() {
                SalpaError::BadChar { token, .. } => {
                    assert_eq!(token.as_bytes(), bad);
                }
                other => panic!("expected BadChar, got {other:?}"),
            }
        }
    }

    #[test]
    fn ambiguity_and_gap_are_bad_chars() {
        let codons = CodonAlphabet::dna();
        assert!(codons.index_of(b"ANT").is_err());
        assert!(codons.index_of(b"A-G").is_err());
        assert!(codons.index_of(b"XYZ").is_err());
    }

    #[test]
    fn index_out_of_range() {
        let codons = CodonAlphabet::dna();
        assert!(codons.positions(64).is_err());
        assert!(codons.codon_at(64).is_err());
        match codons.positions(4096).unwrap_err() {
            SalpaError::BadIndex { index, .. } => assert_eq!(index, 4096),
            other => panic!("expected BadIndex, got {other:?}"),
        }
    }

    #[test]
    fn rejects_protein_alphabet() {
        assert!(CodonAlphabet::new(Alphabet::protein()).is_err());
        assert!(CodonAlphabet::new(Alphabet::rna()).is_ok());
    }
}
