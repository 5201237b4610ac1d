//! Named, alphabet-validated sequence records.

use std::fmt;
use std::ops::Deref;

use salpa_core::{Annotated, Result, SalpaError, Sequence, Summarizable};

use crate::alphabet::Alphabet;

/// A named sequence whose bytes were validated against an alphabet.
///
/// Bytes are uppercased on construction and guaranteed valid (canonical,
/// extended, or gap) for the alphabet the record was built with. Records
/// do not retain the alphabet; containers carry it for them.
#[derive(Clone, PartialEq, Eq)]
pub struct SeqRecord {
    name: String,
    comments: Vec<String>,
    data: Vec<u8>,
}

impl SeqRecord {
    /// Create a record, uppercasing and validating every byte.
    pub fn new(
        name: impl Into<String>,
        data: impl AsRef<[u8]>,
        alphabet: &Alphabet,
    ) -> Result<Self> {
        let name = name.into();
        let data: Vec<u8> = data
            .as_ref()
            .iter()
            .map(|b| b.to_ascii_uppercase())
            .collect();
        for (i, &b) in data.iter().enumerate() {
            if !alphabet.is_valid(b) {
                return Err(SalpaError::InvalidInput(format!(
                    "invalid {} byte '{}' (0x{:02X}) at position {} in sequence '{}'",
                    alphabet.name(),
                    b as char,
                    b,
                    i,
                    name
                )));
            }
        }
        Ok(SeqRecord {
            name,
            comments: Vec::new(),
            data,
        })
    }

    /// Build a record from bytes already validated by a container.
    pub(crate) fn from_validated(name: String, comments: Vec<String>, data: Vec<u8>) -> Self {
        SeqRecord {
            name,
            comments,
            data,
        }
    }

    /// Attach free-text comment lines (Mase-style annotations).
    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the record, returning its sequence bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl Deref for SeqRecord {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for SeqRecord {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Sequence for SeqRecord {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Annotated for SeqRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.comments.first().map(String::as_str)
    }
}

impl Summarizable for SeqRecord {
    fn summary(&self) -> String {
        let preview: String = self.data.iter().take(20).map(|&b| b as char).collect();
        let ellipsis = if self.data.len() > 20 { "..." } else { "" };
        format!(
            "{} ({} residues): {}{}",
            self.name,
            self.data.len(),
            preview,
            ellipsis
        )
    }
}

impl fmt::Display for SeqRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.data))
    }
}

impl fmt::Debug for SeqRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeqRecord({:?}, {:?})", self.name, self.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_uppercases_and_validates() {
        let rec = SeqRecord::new("s1", b"acgtACGT", &Alphabet::dna()).unwrap();
        assert_eq!(rec.as_bytes(), b"ACGTACGT");
        assert_eq!(rec.name(), "s1");
        assert_eq!(rec.len(), 8);
    }

    #[test]
    fn gaps_and_ambiguity_pass_validation() {
        let rec = SeqRecord::new("s1", b"AC-NT", &Alphabet::dna()).unwrap();
        assert_eq!(rec.as_bytes(), b"AC-NT");
    }

    #[test]
    fn invalid_byte_reports_position_and_name() {
        let err = SeqRecord::new("oops", b"ACGE", &Alphabet::dna()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'E'"));
        assert!(msg.contains("position 3"));
        assert!(msg.contains("oops"));
    }

    #[test]
    fn protein_records_accept_stop_symbol() {
        let rec = SeqRecord::new("p1", b"MKV*", &Alphabet::protein()).unwrap();
        assert_eq!(rec.as_bytes(), b"MKV*");
        assert!(SeqRecord::new("p2", b"MK1", &Alphabet::protein()).is_err());
    }

    #[test]
    fn comments_round_trip() {
        let rec = SeqRecord::new("s1", b"ACGT", &Alphabet::dna())
            .unwrap()
            .with_comments(vec!["from sample 7".to_string()]);
        assert_eq!(rec.comments(), ["from sample 7"]);
        assert_eq!(Annotated::description(&rec), Some("from sample 7"));
    }

    #[test]
    fn empty_sequence_is_fine() {
        let rec = SeqRecord::new("empty", b"", &Alphabet::rna()).unwrap();
        assert!(rec.is_empty());
    }

    #[test]
    fn summary_truncates_long_sequences() {
        let rec = SeqRecord::new("long", b"ACGT".repeat(10), &Alphabet::dna()).unwrap();
        let s = rec.summary();
        assert!(s.contains("40 residues"));
        assert!(s.ends_with("..."));
    }
}
