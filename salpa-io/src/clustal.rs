//! Clustal alignment reader.
//!
//! Parses ClustalW / Clustal Omega output: a `CLUSTAL` header line
//! followed by blocks of interleaved sequence data. Each block holds one
//! line per sequence (name, aligned fragment, optional cumulative count)
//! and may end with a conservation line built from `*`, `:`, and `.`.

use salpa_core::{Result, SalpaError};

/// A parsed Clustal multiple sequence alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClustalAlignment {
    /// Aligned sequences as `(name, aligned_sequence)` pairs.
    pub sequences: Vec<(String, String)>,
    /// Conservation string assembled from the trimmed per-block
    /// fragments, if any block carried one.
    pub conservation: Option<String>,
}

/// Parse a Clustal-format alignment from a string.
///
/// The first non-blank line must start with `CLUSTAL`.
///
/// # Examples
///
/// ```
/// # use salpa_io::clustal::parse_clustal;
/// let input = "CLUSTAL W (1.83) multiple sequence alignment\n\n\
///              human   GATTACA-\n\
///              gibbon  GATTACAT\n\
///              \x20       *******\n";
/// let aln = parse_clustal(input).unwrap();
/// assert_eq!(aln.sequences[0].1, "GATTACA-");
/// ```
pub fn parse_clustal(input: &str) -> Result<ClustalAlignment> {
    let mut lines = input.lines().peekable();

    let mut found_header = false;
    while let Some(line) = lines.peek() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            lines.next();
            continue;
        }
        if trimmed.starts_with("CLUSTAL") {
            found_header = true;
            lines.next();
        }
        break;
    }
    if !found_header {
        return Err(SalpaError::Parse("missing CLUSTAL header line".to_string()));
    }

    let mut sequences: Vec<(String, String)> = Vec::new();
    let mut conservation = String::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Conservation lines hold only the three marker characters and
        // spaces, indented under the data column.
        if trimmed
            .chars()
            .all(|c| matches!(c, '*' | ':' | '.' | ' '))
        {
            conservation.push_str(trimmed);
            continue;
        }

        // Sequence line: name, fragment, optional trailing count.
        let mut parts = trimmed.split_whitespace();
        let name = match parts.next() {
            Some(n) => n,
            None => continue,
        };
        let fragment = match parts.next() {
            Some(f) => f,
            None => continue,
        };
        match sequences.iter_mut().find(|(n, _)| n == name) {
            Some((_, seq)) => seq.push_str(fragment),
            None => sequences.push((name.to_string(), fragment.to_string())),
        }
    }

    let conservation = if conservation.is_empty() {
        None
    } else {
        Some(conservation)
    };

    Ok(ClustalAlignment {
        sequences,
        conservation,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
