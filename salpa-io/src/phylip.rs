//! PHYLIP alignment format parser and writer.
//!
//! The format starts with a dimension line giving the number of taxa and
//! sites, followed by sequence data in either interleaved or sequential
//! layout. Two naming conventions are supported: the classic fixed
//! 10-character name field, and the extended (relaxed) convention where
//! the name is a whitespace-delimited token of arbitrary length.

use salpa_core::{Result, SalpaError};

/// Block layout of the sequence data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhylipOrder {
    Interleaved,
    Sequential,
}

/// Naming convention used in the first column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhylipVariant {
    /// Fixed 10-character name field.
    Classic,
    /// Whitespace-delimited names of arbitrary length.
    Extended,
}

/// A parsed PHYLIP multiple sequence alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhylipAlignment {
    /// Aligned sequences as `(name, aligned_sequence)` pairs.
    pub sequences: Vec<(String, String)>,
    /// Number of taxa declared in the header.
    pub n_taxa: usize,
    /// Number of sites (alignment columns) declared in the header.
    pub n_sites: usize,
}

/// Parse a PHYLIP alignment from a string.
///
/// The first line must contain `n_taxa n_sites`. Interleaved input has
/// names in the first block only, with data-only blocks separated by
/// blank lines; sequential input lists each taxon in full before the
/// next one starts.
///
/// # Examples
///
/// ```
/// # use salpa_io::phylip::{parse_phylip, PhylipOrder, PhylipVariant};
/// let input = " 2 8\nhuman  GTTCA\nchimp  GTTCG\n\nCGA\nCGA\n";
/// let aln = parse_phylip(input, PhylipOrder::Interleaved, PhylipVariant::Extended).unwrap();
/// assert_eq!(aln.sequences[0].1, "GTTCACGA");
/// ```
pub fn parse_phylip(
    input: &str,
    order: PhylipOrder,
    variant: PhylipVariant,
) -> Result<PhylipAlignment> {
    match order {
        PhylipOrder::Interleaved => parse_interleaved(input, variant),
        PhylipOrder::Sequential => parse_sequential(input, variant),
    }
}

fn parse_interleaved(input: &str, variant: PhylipVariant) -> Result<PhylipAlignment> {
    let mut lines = input.lines().peekable();

    let (n_taxa, n_sites) = parse_dimensions(&mut lines)?;

    skip_blank_lines(&mut lines);
    if n_taxa == 0 && lines.peek().is_some() {
        return Err(SalpaError::Parse(
            "PHYLIP header declares 0 taxa but sequence data follows".to_string(),
        ));
    }

    // First block: names + sequences
    let mut seq_names: Vec<String> = Vec::with_capacity(n_taxa);
    let mut seq_data: Vec<String> = Vec::with_capacity(n_taxa);

    for _ in 0..n_taxa {
        let line = lines.next().ok_or_else(|| {
            SalpaError::Parse("input ended inside the first PHYLIP block".to_string())
        })?;
        let line = line.trim_end();
        if line.trim().is_empty() {
            return Err(SalpaError::Parse(
                "blank line inside the first PHYLIP block".to_string(),
            ));
        }

        let (name, seq) = split_name_seq(line, variant)?;
        seq_names.push(name);
        seq_data.push(seq);
    }

    // Subsequent blocks: sequences only
    loop {
        skip_blank_lines(&mut lines);
        if lines.peek().is_none() {
            break;
        }

        for data in seq_data.iter_mut() {
            let line = match lines.next() {
                Some(l) => l,
                None => break,
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            data.extend(trimmed.chars().filter(|c| !c.is_whitespace()));
        }
    }

    // Validate site counts
    for (name, seq) in seq_names.iter().zip(&seq_data) {
        if seq.len() != n_sites {
            return Err(SalpaError::Parse(format!(
                "taxon '{}' has {} sites, header declares {}",
                name,
                seq.len(),
                n_sites
            )));
        }
    }

    Ok(PhylipAlignment {
        sequences: seq_names.into_iter().zip(seq_data).collect(),
        n_taxa,
        n_sites,
    })
}

fn parse_sequential(input: &str, variant: PhylipVariant) -> Result<PhylipAlignment> {
    let mut lines = input.lines().peekable();

    let (n_taxa, n_sites) = parse_dimensions(&mut lines)?;

    skip_blank_lines(&mut lines);
    if n_taxa == 0 && lines.peek().is_some() {
        return Err(SalpaError::Parse(
            "PHYLIP header declares 0 taxa but sequence data follows".to_string(),
        ));
    }

    let mut sequences: Vec<(String, String)> = Vec::with_capacity(n_taxa);

    for _ in 0..n_taxa {
        skip_blank_lines(&mut lines);

        // First line of each taxon: name plus optional sequence fragment
        let first_line = lines.next().ok_or_else(|| {
            SalpaError::Parse("input ended before all sequential PHYLIP taxa were read".to_string())
        })?;
        let (name, mut seq) = split_name_seq(first_line.trim_end(), variant)?;

        // Continuation lines until the declared site count is reached
        while seq.len() < n_sites {
            let line = lines.next().ok_or_else(|| {
                SalpaError::Parse(format!(
                    "input ended for taxon '{}' after {} of {} sites",
                    name,
                    seq.len(),
                    n_sites
                ))
            })?;
            seq.extend(line.chars().filter(|c| !c.is_whitespace()));
        }

        if seq.len() != n_sites {
            return Err(SalpaError::Parse(format!(
                "taxon '{}' has {} sites, header declares {}",
                name,
                seq.len(),
                n_sites
            )));
        }

        sequences.push((name, seq));
    }

    Ok(PhylipAlignment {
        sequences,
        n_taxa,
        n_sites,
    })
}

/// Write a PHYLIP alignment in the requested layout and naming variant.
///
/// # Examples
///
/// ```
/// # use salpa_io::phylip::{write_phylip, PhylipAlignment, PhylipOrder, PhylipVariant};
/// let aln = PhylipAlignment {
///     sequences: vec![("pongo".to_string(), "TTGA".to_string())],
///     n_taxa: 1,
///     n_sites: 4,
/// };
/// let out = write_phylip(&aln, PhylipOrder::Interleaved, PhylipVariant::Extended);
/// assert!(out.starts_with(" 1 4"));
/// ```
pub fn write_phylip(aln: &PhylipAlignment, order: PhylipOrder, variant: PhylipVariant) -> String {
    const BLOCK_SIZE: usize = 60;

    let mut out = String::new();
    out.push_str(&format!(" {} {}\n", aln.n_taxa, aln.n_sites));

    if aln.sequences.is_empty() {
        return out;
    }

    let max_name_len = aln
        .sequences
        .iter()
        .map(|(n, _)| n.len())
        .max()
        .unwrap_or(0);

    let name_field = |name: &str| -> String {
        match variant {
            PhylipVariant::Classic => {
                let short: String = name.chars().take(10).collect();
                format!("{:<10}", short)
            }
            PhylipVariant::Extended => format!("{:<width$}", name, width = max_name_len + 2),
        }
    };

    match order {
        PhylipOrder::Interleaved => {
            let total_len = aln.n_sites;
            let mut offset = 0;
            while offset < total_len {
                let end = std::cmp::min(offset + BLOCK_SIZE, total_len);
                for (name, seq) in &aln.sequences {
                    let fragment = if end <= seq.len() {
                        &seq[offset..end]
                    } else if offset < seq.len() {
                        &seq[offset..]
                    } else {
                        ""
                    };
                    if offset == 0 {
                        out.push_str(&format!("{}{}\n", name_field(name), fragment));
                    } else {
                        out.push_str(&format!("{}\n", fragment));
                    }
                }
                if end < total_len {
                    out.push('\n');
                }
                offset = end;
            }
        }
        PhylipOrder::Sequential => {
            for (name, seq) in &aln.sequences {
                let first_end = std::cmp::min(BLOCK_SIZE, seq.len());
                out.push_str(&format!("{}{}\n", name_field(name), &seq[..first_end]));
                let mut offset = first_end;
                while offset < seq.len() {
                    let end = std::cmp::min(offset + BLOCK_SIZE, seq.len());
                    out.push_str(&format!("{}\n", &seq[offset..end]));
                    offset = end;
                }
            }
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn parse_dimensions<'a, I: Iterator<Item = &'a str>>(
    lines: &mut std::iter::Peekable<I>,
) -> Result<(usize, usize)> {
    let dim_line = loop {
        match lines.next() {
            Some(l) => {
                let trimmed = l.trim();
                if !trimmed.is_empty() {
                    break trimmed.to_string();
                }
            }
            None => {
                return Err(SalpaError::Parse(
                    "missing PHYLIP dimension line".to_string(),
                ))
            }
        }
    };

    let parts: Vec<&str> = dim_line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(SalpaError::Parse(format!(
            "malformed PHYLIP dimension line: '{}'",
            dim_line
        )));
    }

    let n_taxa: usize = parts[0].parse().map_err(|_| {
        SalpaError::Parse(format!("bad taxon count '{}' in dimension line", parts[0]))
    })?;

    let n_sites: usize = parts[1].parse().map_err(|_| {
        SalpaError::Parse(format!("bad site count '{}' in dimension line", parts[1]))
    })?;

    Ok((n_taxa, n_sites))
}

fn skip_blank_lines<'a, I: Iterator<Item = &'a str>>(lines: &mut std::iter::Peekable<I>) {
    while let Some(line) = lines.peek() {
        if line.trim().is_empty() {
            lines.next();
        } else {
            break;
        }
    }
}

fn split_name_seq(line: &str, variant: PhylipVariant) -> Result<(String, String)> {
    match variant {
        PhylipVariant::Extended => {
            let line = line.trim_start();
            let parts: Vec<&str> = line.splitn(2, char::is_whitespace).collect();
            if parts.is_empty() || parts[0].is_empty() {
                return Err(SalpaError::Parse(format!(
                    "no taxon name on line: '{}'",
                    line
                )));
            }
            let name = parts[0].to_string();
            let seq = if parts.len() > 1 {
                parts[1].chars().filter(|c| !c.is_whitespace()).collect()
            } else {
                String::new()
            };
            Ok((name, seq))
        }
        PhylipVariant::Classic => {
            // The first 10 characters are the name field.
            let split_at = line
                .char_indices()
                .nth(10)
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            let (name_field, rest) = line.split_at(split_at);
            let name = name_field.trim().to_string();
            if name.is_empty() {
                return Err(SalpaError::Parse(format!(
                    "no taxon name on line: '{}'",
                    line
                )));
            }
            let seq = rest.chars().filter(|c| !c.is_whitespace()).collect();
            Ok((name, seq))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
