//! DCSE alignment reader.
//!
//! DCSE (Dedicated Comparative Sequence Editor) files embed secondary
//! structure annotation directly in the alignment text. This reader
//! keeps residue letters and `-` gaps, strips every other character
//! (brackets, helix digits, layout marks), and takes the text after the
//! last run of two or more spaces as the row name. Rows whose body holds
//! no residue letters, such as helix-numbering and structure rows, are
//! skipped.

use salpa_core::{Result, SalpaError};

/// Parse sequence rows from a DCSE file.
///
/// # Examples
///
/// ```
/// # use salpa_io::dcse::parse_dcse;
/// let rows = parse_dcse("AUC-G[AUG]UU  Escherichia coli\n").unwrap();
/// assert_eq!(rows[0].0, "Escherichia coli");
/// assert_eq!(rows[0].1, "AUC-GAUGUU");
/// ```
pub fn parse_dcse(input: &str) -> Result<Vec<(String, String)>> {
    let mut sequences = Vec::new();
    for line in input.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        let (body, name) = match split_trailing_name(line) {
            Some(parts) => parts,
            None => continue,
        };
        let residues: String = body
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || *c == '-')
            .collect();
        if !residues.chars().any(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        sequences.push((name.to_string(), residues));
    }
    if sequences.is_empty() {
        return Err(SalpaError::Parse(
            "no sequence rows found in DCSE input".to_string(),
        ));
    }
    Ok(sequences)
}

/// Split a row into body and trailing name at the last run of two or
/// more spaces.
fn split_trailing_name(line: &str) -> Option<(&str, &str)> {
    let pos = line.rfind("  ")?;
    let name = line[pos..].trim_start();
    if name.is_empty() {
        return None;
    }
    Some((&line[..pos], name))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
 1 2   3 4 5   6     Helix numbering
 (((   )))   (((     Secondary structure
AUC-G[AUG]UU^CA      Escherichia coli
AUCCG[AUG]-U^CA      Bacillus subtilis
";

    #[test]
    fn keeps_residues_and_gaps_drops_annotation() {
        let rows = parse_dcse(SAMPLE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            ("Escherichia coli".to_string(), "AUC-GAUGUUCA".to_string())
        );
        assert_eq!(
            rows[1],
            ("Bacillus subtilis".to_string(), "AUCCGAUG-UCA".to_string())
        );
    }

    #[test]
    fn layout_rows_without_residues_are_skipped() {
        let input = "123 456  Helix numbering\nACGU[1]  tRNA-Lys\n";
        let rows = parse_dcse(input).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "tRNA-Lys");
        assert_eq!(rows[0].1, "ACGU");
    }

    #[test]
    fn rows_without_a_name_field_are_skipped() {
        let input = "ACGUACGU\nACGU  named\n";
        let rows = parse_dcse(input).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "named");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(parse_dcse("").is_err());
        assert!(parse_dcse("12 34  Helix numbering\n").is_err());
    }
}
