//! Sequence containers: free sets and aligned site matrices.
//!
//! A [`SequenceSet`] owns uniquely named records over one alphabet. An
//! [`Alignment`] is a set whose records all have the same length, viewed
//! as a matrix of sites (columns); it dereferences to its underlying set
//! for record access.

use std::ops::Deref;

use salpa_core::{Result, SalpaError, Summarizable};

use crate::alphabet::Alphabet;
use crate::record::SeqRecord;

// ---------------------------------------------------------------------------
// SequenceSet
// ---------------------------------------------------------------------------

/// An ordered collection of uniquely named records over one alphabet.
#[derive(Debug, Clone)]
pub struct SequenceSet {
    alphabet: Alphabet,
    records: Vec<SeqRecord>,
}

impl SequenceSet {
    /// Empty set over the given alphabet.
    pub fn new(alphabet: Alphabet) -> Self {
        SequenceSet {
            alphabet,
            records: Vec::new(),
        }
    }

    /// The alphabet all records were validated against.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Append a record. Names must be unique within the set.
    pub fn push(&mut self, record: SeqRecord) -> Result<()> {
        if self.records.iter().any(|r| r.name() == record.name()) {
            return Err(SalpaError::InvalidInput(format!(
                "duplicate sequence name '{}'",
                record.name()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SeqRecord> {
        self.records.get(index)
    }

    /// Record with the given name, if present.
    pub fn by_name(&self, name: &str) -> Option<&SeqRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeqRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[SeqRecord] {
        &self.records
    }

    /// Record names in set order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name()).collect()
    }
}

impl Summarizable for SequenceSet {
    fn summary(&self) -> String {
        format!("{} sequence set ({} sequences)", self.alphabet.name(), self.len())
    }
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// A [`SequenceSet`] whose records all have the same length.
#[derive(Debug, Clone)]
pub struct Alignment {
    set: SequenceSet,
    site_count: usize,
}

impl Alignment {
    /// Validate that every record has the same length and take ownership.
    pub fn from_set(set: SequenceSet) -> Result<Self> {
        let site_count = set.records.first().map_or(0, |r| r.len());
        for r in &set.records {
            if r.len() != site_count {
                return Err(SalpaError::InvalidInput(format!(
                    "sequence '{}' has {} sites, expected {}",
                    r.name(),
                    r.len(),
                    site_count
                )));
            }
        }
        Ok(Alignment { set, site_count })
    }

    /// Number of sites (columns).
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    /// The site at `index`, top to bottom in record order.
    pub fn site(&self, index: usize) -> Result<Vec<u8>> {
        if index >= self.site_count {
            return Err(SalpaError::BadIndex {
                context: "Alignment::site",
                index,
                alphabet: format!("alignment of {} sites", self.site_count),
            });
        }
        Ok(self.set.iter().map(|r| r.as_bytes()[index]).collect())
    }

    /// New alignment keeping the listed sites, in the given order.
    /// A site may be listed more than once.
    pub fn select_sites(&self, sites: &[usize]) -> Result<Alignment> {
        if let Some(&bad) = sites.iter().find(|&&s| s >= self.site_count) {
            return Err(SalpaError::BadIndex {
                context: "Alignment::select_sites",
                index: bad,
                alphabet: format!("alignment of {} sites", self.site_count),
            });
        }
        Ok(self.retain_sites(sites))
    }

    /// Sites whose symbols are all canonical: no gaps, no ambiguity.
    pub fn complete_sites(&self) -> Alignment {
        let alphabet = &self.set.alphabet;
        let kept: Vec<usize> = (0..self.site_count)
            .filter(|&i| {
                self.set
                    .iter()
                    .all(|r| alphabet.is_canonical(r.as_bytes()[i]))
            })
            .collect();
        self.retain_sites(&kept)
    }

    /// Sites without gap symbols. Ambiguity symbols are kept.
    pub fn ungapped_sites(&self) -> Alignment {
        let kept: Vec<usize> = (0..self.site_count)
            .filter(|&i| {
                self.set
                    .iter()
                    .all(|r| !Alphabet::is_gap(r.as_bytes()[i]))
            })
            .collect();
        self.retain_sites(&kept)
    }

    /// Give back the underlying set.
    pub fn into_set(self) -> SequenceSet {
        self.set
    }

    // Indices must already be in range.
    fn retain_sites(&self, keep: &[usize]) -> Alignment {
        let records = self
            .set
            .iter()
            .map(|r| {
                let bytes = r.as_bytes();
                let data: Vec<u8> = keep.iter().map(|&s| bytes[s]).collect();
                SeqRecord::from_validated(r.name().to_string(), r.comments().to_vec(), data)
            })
            .collect();
        Alignment {
            set: SequenceSet {
                alphabet: self.set.alphabet.clone(),
                records,
            },
            site_count: keep.len(),
        }
    }
}

impl Deref for Alignment {
    type Target = SequenceSet;

    fn deref(&self) -> &SequenceSet {
        &self.set
    }
}

impl Summarizable for Alignment {
    fn summary(&self) -> String {
        format!(
            "{} alignment ({} sequences x {} sites)",
            self.set.alphabet.name(),
            self.set.len(),
            self.site_count
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dna_set(rows: &[(&str, &str)]) -> SequenceSet {
        let alphabet = Alphabet::dna();
        let mut set = SequenceSet::new(alphabet.clone());
        for (name, seq) in rows {
            set.push(SeqRecord::new(*name, seq.as_bytes(), &alphabet).unwrap())
                .unwrap();
        }
        set
    }

    #[test]
    fn push_rejects_duplicate_names() {
        let alphabet = Alphabet::dna();
        let mut set = SequenceSet::new(alphabet.clone());
        set.push(SeqRecord::new("a", b"ACGT", &alphabet).unwrap())
            .unwrap();
        let err = set
            .push(SeqRecord::new("a", b"TTTT", &alphabet).unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn lookup_by_name_and_index() {
        let set = dna_set(&[("a", "ACGT"), ("b", "TGCA")]);
        assert_eq!(set.by_name("b").unwrap().as_bytes(), b"TGCA");
        assert!(set.by_name("c").is_none());
        assert_eq!(set.get(0).unwrap().name(), "a");
        assert_eq!(set.names(), ["a", "b"]);
    }

    #[test]
    fn alignment_requires_equal_lengths() {
        let set = dna_set(&[("a", "ACGT"), ("b", "AC")]);
        let err = Alignment::from_set(set).unwrap_err();
        assert!(err.to_string().contains("'b'"));

        let ok = Alignment::from_set(dna_set(&[("a", "ACGT"), ("b", "TGCA")])).unwrap();
        assert_eq!(ok.site_count(), 4);
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn empty_alignment_has_zero_sites() {
        let aln = Alignment::from_set(SequenceSet::new(Alphabet::rna())).unwrap();
        assert_eq!(aln.site_count(), 0);
        assert!(aln.site(0).is_err());
    }

    #[test]
    fn sites_read_top_to_bottom() {
        let aln = Alignment::from_set(dna_set(&[("a", "ACGT"), ("b", "TGCA")])).unwrap();
        assert_eq!(aln.site(0).unwrap(), b"AT");
        assert_eq!(aln.site(3).unwrap(), b"TA");
        assert!(aln.site(4).is_err());
    }

    #[test]
    fn select_sites_keeps_order_and_checks_bounds() {
        let aln = Alignment::from_set(dna_set(&[("a", "ACGT"), ("b", "TGCA")])).unwrap();
        let picked = aln.select_sites(&[3, 0, 0]).unwrap();
        assert_eq!(picked.site_count(), 3);
        assert_eq!(picked.by_name("a").unwrap().as_bytes(), b"TAA");
        assert_eq!(picked.by_name("b").unwrap().as_bytes(), b"ATT");

        match aln.select_sites(&[0, 4]).unwrap_err() {
            SalpaError::BadIndex { index, .. } => assert_eq!(index, 4),
            other => panic!("expected BadIndex, got {other:?}"),
        }
    }

    #[test]
    fn complete_sites_drop_gaps_and_ambiguity() {
        let aln = Alignment::from_set(dna_set(&[("a", "A-GNT"), ("b", "ACGTT")])).unwrap();
        let complete = aln.complete_sites();
        assert_eq!(complete.site_count(), 3);
        assert_eq!(complete.by_name("a").unwrap().as_bytes(), b"AGT");
        assert_eq!(complete.by_name("b").unwrap().as_bytes(), b"AGT");
    }

    #[test]
    fn ungapped_sites_keep_ambiguity() {
        let aln = Alignment::from_set(dna_set(&[("a", "A-GNT"), ("b", "ACGTT")])).unwrap();
        let nogap = aln.ungapped_sites();
        assert_eq!(nogap.site_count(), 4);
        assert_eq!(nogap.by_name("a").unwrap().as_bytes(), b"AGNT");
    }

    #[test]
    fn selection_preserves_comments() {
        let alphabet = Alphabet::dna();
        let mut set = SequenceSet::new(alphabet.clone());
        set.push(
            SeqRecord::new("a", b"ACGT", &alphabet)
                .unwrap()
                .with_comments(vec!["kept".to_string()]),
        )
        .unwrap();
        let aln = Alignment::from_set(set).unwrap();
        let picked = aln.select_sites(&[0, 1]).unwrap();
        assert_eq!(picked.by_name("a").unwrap().comments(), ["kept"]);
    }

    #[test]
    fn summaries_name_alphabet_and_shape() {
        let aln = Alignment::from_set(dna_set(&[("a", "ACGT"), ("b", "TGCA")])).unwrap();
        assert_eq!(aln.summary(), "DNA alignment (2 sequences x 4 sites)");
        assert_eq!(aln.set.summary(), "DNA sequence set (2 sequences)");
    }
}
