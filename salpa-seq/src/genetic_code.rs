//! Genetic-code tables and codon translation.
//!
//! A [`GeneticCode`] binds a 64-entry amino-acid table to the two
//! alphabets it translates between: a [`CodonAlphabet`] fixing codon
//! spelling and indexing, and the proteic [`Alphabet`] fixing amino-acid
//! state indices. Translation is a pure table lookup; stop codons are
//! reported as errors carrying the offending triplet, spelled by the
//! codon alphabet the code was built with.
//!
//! Seven NCBI translation tables are provided; [`GeneticCode::standard`]
//! is table 1.

use salpa_core::{Result, SalpaError, Summarizable};

use crate::alphabet::Alphabet;
use crate::codon::{CodonAlphabet, CODON_COUNT};

/// Marker for stop entries in the amino-acid tables.
const STOP: u8 = b'*';

// ---------------------------------------------------------------------------
// Table identifiers
// ---------------------------------------------------------------------------

/// NCBI translation table identifier.
///
/// Discriminants are the NCBI table numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneticCodeId {
    Standard = 1,
    VertebrateMitochondrial = 2,
    YeastMitochondrial = 3,
    MoldProtozoanMitochondrial = 4,
    InvertebrateMitochondrial = 5,
    CiliateNuclear = 6,
    BacterialPlastid = 11,
}

impl GeneticCodeId {
    /// The NCBI table number.
    pub fn ncbi_number(self) -> u8 {
        self as u8
    }

    /// Identifier for an NCBI table number, if supported.
    pub fn from_ncbi(number: u8) -> Option<Self> {
        match number {
            1 => Some(GeneticCodeId::Standard),
            2 => Some(GeneticCodeId::VertebrateMitochondrial),
            3 => Some(GeneticCodeId::YeastMitochondrial),
            4 => Some(GeneticCodeId::MoldProtozoanMitochondrial),
            5 => Some(GeneticCodeId::InvertebrateMitochondrial),
            6 => Some(GeneticCodeId::CiliateNuclear),
            11 => Some(GeneticCodeId::BacterialPlastid),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Amino-acid tables
// ---------------------------------------------------------------------------

// Entries are indexed by codon: AAA=0 .. TTT=63, first position most
// significant (A=0, C=1, G=2, T=3). Stops are `*`.

/// Standard code (NCBI table 1).
#[rustfmt::skip]
const TABLE1_AA: [u8; 64] = [
    b'K', b'N', b'K', b'N', // AAA AAC AAG AAT
    b'T', b'T', b'T', b'T', // ACA ACC ACG ACT
    b'R', b'S', b'R', b'S', // AGA AGC AGG AGT
    b'I', b'I', b'M', b'I', // ATA ATC ATG ATT
    b'Q', b'H', b'Q', b'H', // CAA CAC CAG CAT
    b'P', b'P', b'P', b'P', // CCA CCC CCG CCT
    b'R', b'R', b'R', b'R', // CGA CGC CGG CGT
    b'L', b'L', b'L', b'L', // CTA CTC CTG CTT
    b'E', b'D', b'E', b'D', // GAA GAC GAG GAT
    b'A', b'A', b'A', b'A', // GCA GCC GCG GCT
    b'G', b'G', b'G', b'G', // GGA GGC GGG GGT
    b'V', b'V', b'V', b'V', // GTA GTC GTG GTT
    b'*', b'Y', b'*', b'Y', // TAA TAC TAG TAT
    b'S', b'S', b'S', b'S', // TCA TCC TCG TCT
    b'*', b'C', b'W', b'C', // TGA TGC TGG TGT
    b'L', b'F', b'L', b'F', // TTA TTC TTG TTT
];

/// Vertebrate mitochondrial (NCBI table 2): AGA/AGG become stops, ATA
/// reads Met, TGA reads Trp.
const TABLE2_AA: [u8; 64] = {
    let mut t = TABLE1_AA;
    t[8] = STOP; // AGA
    t[10] = STOP; // AGG
    t[12] = b'M'; // ATA
    t[56] = b'W'; // TGA
    t
};

/// Yeast mitochondrial (NCBI table 3): ATA reads Met, the CTN box reads
/// Thr, TGA reads Trp.
const TABLE3_AA: [u8; 64] = {
    let mut t = TABLE1_AA;
    t[12] = b'M'; // ATA
    t[28] = b'T'; // CTA
    t[29] = b'T'; // CTC
    t[30] = b'T'; // CTG
    t[31] = b'T'; // CTT
    t[56] = b'W'; // TGA
    t
};

/// Mold, protozoan, and coelenterate mitochondrial (NCBI table 4):
/// TGA reads Trp.
const TABLE4_AA: [u8; 64] = {
    let mut t = TABLE1_AA;
    t[56] = b'W'; // TGA
    t
};

/// Invertebrate mitochondrial (NCBI table 5): AGA/AGG read Ser, ATA
/// reads Met, TGA reads Trp.
const TABLE5_AA: [u8; 64] = {
    let mut t = TABLE1_AA;
    t[8] = b'S'; // AGA
    t[10] = b'S'; // AGG
    t[12] = b'M'; // ATA
    t[56] = b'W'; // TGA
    t
};

/// Ciliate nuclear (NCBI table 6): TAA/TAG read Gln, only TGA stops.
const TABLE6_AA: [u8; 64] = {
    let mut t = TABLE1_AA;
    t[48] = b'Q'; // TAA
    t[50] = b'Q'; // TAG
    t
};

/// Bacterial and plant plastid (NCBI table 11): same amino acids as the
/// standard code, different start set.
const TABLE11_AA: [u8; 64] = TABLE1_AA;

// ---------------------------------------------------------------------------
// Start-codon sets
// ---------------------------------------------------------------------------

const TABLE1_STARTS: [bool; 64] = {
    let mut s = [false; 64];
    s[14] = true; // ATG
    s
};

const TABLE2_STARTS: [bool; 64] = {
    let mut s = [false; 64];
    s[12] = true; // ATA
    s[13] = true; // ATC
    s[14] = true; // ATG
    s[15] = true; // ATT
    s[46] = true; // GTG
    s
};

const TABLE3_STARTS: [bool; 64] = {
    let mut s = [false; 64];
    s[12] = true; // ATA
    s[14] = true; // ATG
    s[46] = true; // GTG
    s
};

const TABLE4_STARTS: [bool; 64] = {
    let mut s = [false; 64];
    s[12] = true; // ATA
    s[13] = true; // ATC
    s[14] = true; // ATG
    s[15] = true; // ATT
    s[30] = true; // CTG
    s[46] = true; // GTG
    s[60] = true; // TTA
    s[62] = true; // TTG
    s
};

const TABLE5_STARTS: [bool; 64] = {
    let mut s = [false; 64];
    s[12] = true; // ATA
    s[13] = true; // ATC
    s[14] = true; // ATG
    s[15] = true; // ATT
    s[46] = true; // GTG
    s[62] = true; // TTG
    s
};

const TABLE6_STARTS: [bool; 64] = TABLE1_STARTS;

const TABLE11_STARTS: [bool; 64] = {
    let mut s = [false; 64];
    s[12] = true; // ATA
    s[13] = true; // ATC
    s[14] = true; // ATG
    s[15] = true; // ATT
    s[30] = true; // CTG
    s[46] = true; // GTG
    s[62] = true; // TTG
    s
};

// ---------------------------------------------------------------------------
// GeneticCode
// ---------------------------------------------------------------------------

/// A genetic-code table bound to its codon and proteic alphabets.
///
/// The codon alphabet fixes how input triplets are spelled and how stop
/// codons are reported; the proteic alphabet fixes the state indices that
/// [`translate_index`](GeneticCode::translate_index) returns. Both are set
/// at construction and the table never changes afterwards, so every query
/// is a pure function of its arguments.
#[derive(Debug, Clone)]
pub struct GeneticCode {
    id: GeneticCodeId,
    name: &'static str,
    table: [u8; 64],
    starts: [bool; 64],
    codons: CodonAlphabet,
    protein: Alphabet,
}

impl GeneticCode {
    /// Genetic code for an NCBI table, with the given codon spelling.
    pub fn new(id: GeneticCodeId, codons: CodonAlphabet) -> Self {
        let (name, table, starts) = match id {
            GeneticCodeId::Standard => ("Standard", TABLE1_AA, TABLE1_STARTS),
            GeneticCodeId::VertebrateMitochondrial => {
                ("Vertebrate mitochondrial", TABLE2_AA, TABLE2_STARTS)
            }
            GeneticCodeId::YeastMitochondrial => {
                ("Yeast mitochondrial", TABLE3_AA, TABLE3_STARTS)
            }
            GeneticCodeId::MoldProtozoanMitochondrial => (
                "Mold, protozoan, and coelenterate mitochondrial",
                TABLE4_AA,
                TABLE4_STARTS,
            ),
            GeneticCodeId::InvertebrateMitochondrial => {
                ("Invertebrate mitochondrial", TABLE5_AA, TABLE5_STARTS)
            }
            GeneticCodeId::CiliateNuclear => ("Ciliate nuclear", TABLE6_AA, TABLE6_STARTS),
            GeneticCodeId::BacterialPlastid => {
                ("Bacterial and plant plastid", TABLE11_AA, TABLE11_STARTS)
            }
        };
        GeneticCode {
            id,
            name,
            table,
            starts,
            codons,
            protein: Alphabet::protein(),
        }
    }

    /// Genetic code for an NCBI table, with DNA codon spelling.
    pub fn from_id(id: GeneticCodeId) -> Self {
        GeneticCode::new(id, CodonAlphabet::dna())
    }

    /// The standard code (NCBI table 1) with DNA codon spelling.
    pub fn standard() -> Self {
        GeneticCode::from_id(GeneticCodeId::Standard)
    }

    pub fn id(&self) -> GeneticCodeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The codon alphabet input triplets are spelled in.
    pub fn codon_alphabet(&self) -> &CodonAlphabet {
        &self.codons
    }

    /// The proteic alphabet translated state indices refer to.
    pub fn proteic_alphabet(&self) -> &Alphabet {
        &self.protein
    }

    /// Translate a codon index into a proteic state index.
    ///
    /// Stop codons fail with a stop error carrying the triplet spelled by
    /// the codon alphabet; indices outside `0..64` fail as bad indices.
    pub fn translate_index(&self, index: usize) -> Result<usize> {
        let aa = *self
            .table
            .get(index)
            .ok_or_else(|| self.bad_index("GeneticCode::translate_index", index))?;
        if aa == STOP {
            return Err(self.stop_error("GeneticCode::translate_index", index));
        }
        self.protein.state_index(aa)
    }

    /// Translate a three-base codon spelling into its one-letter amino acid.
    ///
    /// Spellings that are not exactly three canonical bases of the codon
    /// alphabet fail as bad characters before any lookup; stop semantics
    /// are those of [`translate_index`](GeneticCode::translate_index).
    pub fn translate_codon(&self, codon: &[u8]) -> Result<u8> {
        let index = self.codons.index_of(codon)?;
        let state = self.translate_index(index)?;
        self.protein.symbol(state)
    }

    /// Translate successive codons of `seq` into amino-acid letters.
    ///
    /// Translation stops at the first stop codon, which is not emitted.
    /// A trailing incomplete codon is ignored; an invalid base anywhere
    /// aborts with a bad-character error.
    pub fn translate_sequence(&self, seq: &[u8]) -> Result<Vec<u8>> {
        let mut protein = Vec::with_capacity(seq.len() / 3);
        for codon in seq.chunks_exact(3) {
            match self.translate_codon(codon) {
                Ok(aa) => protein.push(aa),
                Err(SalpaError::StopCodon { .. }) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(protein)
    }

    /// Whether `index` is a stop codon in this table.
    pub fn is_stop_index(&self, index: usize) -> bool {
        self.table.get(index).map_or(false, |&aa| aa == STOP)
    }

    /// Whether the codon spelling is a stop codon in this table.
    ///
    /// Unparseable spellings are simply not stops.
    pub fn is_stop(&self, codon: &[u8]) -> bool {
        self.codons
            .index_of(codon)
            .map_or(false, |i| self.table[i] == STOP)
    }

    /// Whether the codon spelling is an initiation codon in this table.
    pub fn is_start(&self, codon: &[u8]) -> bool {
        self.codons.index_of(codon).map_or(false, |i| self.starts[i])
    }

    /// All stop codons of this table, in index order.
    pub fn stop_codons(&self) -> Vec<[u8; 3]> {
        (0..CODON_COUNT)
            .filter(|&i| self.table[i] == STOP)
            .filter_map(|i| self.codons.codon_at(i).ok())
            .collect()
    }

    /// All initiation codons of this table, in index order.
    pub fn start_codons(&self) -> Vec<[u8; 3]> {
        (0..CODON_COUNT)
            .filter(|&i| self.starts[i])
            .filter_map(|i| self.codons.codon_at(i).ok())
            .collect()
    }

    /// Whether two codon indices have the same outcome: the same amino
    /// acid, or both stops.
    pub fn are_synonymous(&self, i: usize, j: usize) -> Result<bool> {
        let a = *self
            .table
            .get(i)
            .ok_or_else(|| self.bad_index("GeneticCode::are_synonymous", i))?;
        let b = *self
            .table
            .get(j)
            .ok_or_else(|| self.bad_index("GeneticCode::are_synonymous", j))?;
        Ok(a == b)
    }

    /// Spelling variant of [`are_synonymous`](GeneticCode::are_synonymous).
    pub fn are_synonymous_codons(&self, a: &[u8], b: &[u8]) -> Result<bool> {
        let i = self.codons.index_of(a)?;
        let j = self.codons.index_of(b)?;
        self.are_synonymous(i, j)
    }

    /// All codons with the same outcome as `codon`, in index order.
    /// The argument itself is included.
    pub fn synonymous_codons(&self, codon: &[u8]) -> Result<Vec<[u8; 3]>> {
        let index = self.codons.index_of(codon)?;
        let target = self.table[index];
        Ok((0..CODON_COUNT)
            .filter(|&i| self.table[i] == target)
            .filter_map(|i| self.codons.codon_at(i).ok())
            .collect())
    }

    fn bad_index(&self, context: &'static str, index: usize) -> SalpaError {
        SalpaError::BadIndex {
            context,
            index,
            alphabet: self.codons.description(),
        }
    }

    fn stop_error(&self, context: &'static str, index: usize) -> SalpaError {
        // index is in range here, so the spelling cannot fail
        let codon = self
            .codons
            .codon_at(index)
            .map(|c| String::from_utf8_lossy(&c).into_owned())
            .unwrap_or_default();
        SalpaError::StopCodon { context, codon }
    }
}

impl Summarizable for GeneticCode {
    fn summary(&self) -> String {
        format!(
            "{} genetic code (NCBI table {}, {} spelling)",
            self.name,
            self.id.ncbi_number(),
            self.codons.nucleic_alphabet().name()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_codon() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(proptest::sample::select(vec![b'A', b'C', b'G', b'T']), 3)
    }

    proptest! {
        #[test]
        fn spelling_agrees_with_index_path(codon in arb_codon()) {
            let code = GeneticCode::standard();
            let index = code.codon_alphabet().index_of(&codon).unwrap();
            match code.translate_index(index) {
                Ok(state) => {
                    let aa = code.translate_codon(&codon).unwrap();
                    prop_assert_eq!(code.proteic_alphabet().state_index(aa).unwrap(), state);
                    prop_assert!(state < 20);
                }
                Err(SalpaError::StopCodon { .. }) => {
                    prop_assert!(code.is_stop(&codon));
                }
                Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
            }
        }

        #[test]
        fn index_spelling_round_trip(index in 0usize..64) {
            let codons = CodonAlphabet::dna();
            let spelled = codons.codon_at(index).unwrap();
            prop_assert_eq!(codons.index_of(&spelled).unwrap(), index);
        }

        #[test]
        fn synonymy_is_symmetric(i in 0usize..64, j in 0usize..64) {
            let code = GeneticCode::standard();
            prop_assert_eq!(
                code.are_synonymous(i, j).unwrap(),
                code.are_synonymous(j, i).unwrap()
            );
        }
    }
}
