//! Config-driven construction of alphabets, alignments, and output files.
//!
//! Every function reads string options from an [`OptionMap`], with the
//! caller-supplied `prefix` prepended to each canonical key. Unknown
//! values fail with a bad-option error naming the key; absent required
//! options fail as missing. Recognized options (shown unprefixed):
//!
//! - `alphabet = DNA | RNA | Protein`
//! - `sequence.file = <path>`
//! - `sequence.format = Fasta | Mase | Phylip | Clustal | DCSE`
//! - `sequence.format_phylip.order = interleaved | sequential`
//! - `sequence.format_phylip.ext = classic | extended`
//! - `sequence.format_mase.site_selection = <selection name>`
//! - `sequence.sites_to_use = complete | nogap`
//! - `output.sequence.file = <path>`
//! - `output.sequence.format = Fasta | Mase | Phylip`
//! - `output.sequence.length = <n>` (Fasta line width)
//! - `output.sequence.format_phylip.order`, `output.sequence.format_phylip.ext`

use std::fs;

use salpa_core::{Result, SalpaError};
use salpa_seq::{Alignment, Alphabet, SeqRecord, SequenceSet};

use crate::clustal;
use crate::dcse;
use crate::fasta::{self, FastaRecord};
use crate::mase::{self, MaseFile, MaseRecord};
use crate::options::OptionMap;
use crate::phylip::{self, PhylipAlignment, PhylipOrder, PhylipVariant};

/// Default Fasta line width used by [`write_sequences`].
const DEFAULT_LINE_LENGTH: usize = 100;

/// Build an alphabet from the `alphabet` option.
pub fn build_alphabet(opts: &OptionMap, prefix: &str) -> Result<Alphabet> {
    let key = format!("{prefix}alphabet");
    match opts.require(&key)? {
        "DNA" => Ok(Alphabet::dna()),
        "RNA" => Ok(Alphabet::rna()),
        "Protein" => Ok(Alphabet::protein()),
        other => Err(SalpaError::BadOption {
            key,
            value: other.to_string(),
        }),
    }
}

/// Read the alignment named by `sequence.file` in the format named by
/// `sequence.format`, validating every record against `alphabet`.
///
/// For Mase input, a `sequence.format_mase.site_selection` option
/// restricts the alignment to the named site selection from the file
/// header.
pub fn build_alignment(alphabet: &Alphabet, opts: &OptionMap, prefix: &str) -> Result<Alignment> {
    let format_key = format!("{prefix}sequence.format");
    let format = opts.require(&format_key)?;
    let path = opts.require(&format!("{prefix}sequence.file"))?;

    let mut set = SequenceSet::new(alphabet.clone());
    let mut selection: Option<Vec<usize>> = None;

    match format {
        "Fasta" => {
            for record in fasta::read_fasta(path)? {
                set.push(SeqRecord::new(record.id, &record.seq, alphabet)?)?;
            }
        }
        "Mase" => {
            let text = fs::read_to_string(path)?;
            let file = mase::parse_mase(&text)?;
            if let Some(name) = opts.get(&format!("{prefix}sequence.format_mase.site_selection")) {
                selection = Some(mase::site_selection(&file.header, name)?);
            }
            for record in file.records {
                set.push(
                    SeqRecord::new(record.name, record.seq.as_bytes(), alphabet)?
                        .with_comments(record.comments),
                )?;
            }
        }
        "Phylip" => {
            let text = fs::read_to_string(path)?;
            let order = phylip_order(opts, format!("{prefix}sequence.format_phylip.order"))?;
            let variant = phylip_variant(opts, format!("{prefix}sequence.format_phylip.ext"))?;
            let parsed = phylip::parse_phylip(&text, order, variant)?;
            for (name, seq) in parsed.sequences {
                set.push(SeqRecord::new(name, seq.as_bytes(), alphabet)?)?;
            }
        }
        "Clustal" => {
            let text = fs::read_to_string(path)?;
            let parsed = clustal::parse_clustal(&text)?;
            for (name, seq) in parsed.sequences {
                set.push(SeqRecord::new(name, seq.as_bytes(), alphabet)?)?;
            }
        }
        "DCSE" => {
            let text = fs::read_to_string(path)?;
            for (name, seq) in dcse::parse_dcse(&text)? {
                set.push(SeqRecord::new(name, seq.as_bytes(), alphabet)?)?;
            }
        }
        other => {
            return Err(SalpaError::BadOption {
                key: format_key,
                value: other.to_string(),
            })
        }
    }

    let alignment = Alignment::from_set(set)?;
    match selection {
        Some(sites) => alignment.select_sites(&sites),
        None => Ok(alignment),
    }
}

/// Restrict an alignment per the `sequence.sites_to_use` option:
/// `complete` keeps fully resolved sites (the default), `nogap` keeps
/// gap-free sites.
pub fn select_sites(alignment: &Alignment, opts: &OptionMap, prefix: &str) -> Result<Alignment> {
    let key = format!("{prefix}sequence.sites_to_use");
    match opts.get_or(&key, "complete") {
        "complete" => Ok(alignment.complete_sites()),
        "nogap" => Ok(alignment.ungapped_sites()),
        other => Err(SalpaError::BadOption {
            key,
            value: other.to_string(),
        }),
    }
}

/// Write sequences to the file named by `output.sequence.file` in the
/// format named by `output.sequence.format`.
///
/// An [`Alignment`] can be passed directly; it dereferences to its set.
/// Phylip output requires records of equal length.
pub fn write_sequences(seqs: &SequenceSet, opts: &OptionMap, prefix: &str) -> Result<()> {
    let format_key = format!("{prefix}output.sequence.format");
    let format = opts.require(&format_key)?;
    let path = opts.require(&format!("{prefix}output.sequence.file"))?;

    let text = match format {
        "Fasta" => {
            let length = opts
                .get_usize(&format!("{prefix}output.sequence.length"))?
                .unwrap_or(DEFAULT_LINE_LENGTH);
            let records: Vec<FastaRecord> = seqs
                .iter()
                .map(|r| FastaRecord {
                    id: r.name().to_string(),
                    seq: r.as_bytes().to_vec(),
                })
                .collect();
            fasta::write_fasta(&records, length)
        }
        "Mase" => {
            let file = MaseFile {
                header: Vec::new(),
                records: seqs
                    .iter()
                    .map(|r| MaseRecord {
                        comments: r.comments().to_vec(),
                        name: r.name().to_string(),
                        seq: String::from_utf8_lossy(r.as_bytes()).into_owned(),
                    })
                    .collect(),
            };
            mase::write_mase(&file)
        }
        "Phylip" => {
            let n_sites = seqs.get(0).map_or(0, |r| r.len());
            if seqs.iter().any(|r| r.len() != n_sites) {
                return Err(SalpaError::InvalidInput(
                    "Phylip output requires aligned sequences of equal length".to_string(),
                ));
            }
            let order = phylip_order(
                opts,
                format!("{prefix}output.sequence.format_phylip.order"),
            )?;
            let variant = phylip_variant(
                opts,
                format!("{prefix}output.sequence.format_phylip.ext"),
            )?;
            let aligned = PhylipAlignment {
                sequences: seqs
                    .iter()
                    .map(|r| {
                        (
                            r.name().to_string(),
                            String::from_utf8_lossy(r.as_bytes()).into_owned(),
                        )
                    })
                    .collect(),
                n_taxa: seqs.len(),
                n_sites,
            };
            phylip::write_phylip(&aligned, order, variant)
        }
        other => {
            return Err(SalpaError::BadOption {
                key: format_key,
                value: other.to_string(),
            })
        }
    };

    fs::write(path, text)?;
    Ok(())
}

fn phylip_order(opts: &OptionMap, key: String) -> Result<PhylipOrder> {
    match opts.get_or(&key, "interleaved") {
        "interleaved" => Ok(PhylipOrder::Interleaved),
        "sequential" => Ok(PhylipOrder::Sequential),
        other => Err(SalpaError::BadOption {
            key,
            value: other.to_string(),
        }),
    }
}

fn phylip_variant(opts: &OptionMap, key: String) -> Result<PhylipVariant> {
    match opts.get_or(&key, "extended") {
        "classic" => Ok(PhylipVariant::Classic),
        "extended" => Ok(PhylipVariant::Extended),
        other => Err(SalpaError::BadOption {
            key,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
