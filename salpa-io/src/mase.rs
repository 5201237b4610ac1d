//! Mase format (SeaView lineage) parser and writer.
//!
//! A Mase file opens with a block of `;;` header lines, followed by
//! records: one or more `;` comment lines, a name line, then sequence
//! lines until the next comment. Named site selections may be stored in
//! the header as a `# of segments=<count> <name>` line followed by
//! 1-based inclusive `start,end` pairs on the next header lines:
//!
//! ```text
//! ;;# of segments=2 cds
//! ;;1,10 21,30
//! ```

use salpa_core::{Result, SalpaError};

/// A parsed Mase file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaseFile {
    /// Header lines, without the `;;` prefix.
    pub header: Vec<String>,
    pub records: Vec<MaseRecord>,
}

/// One Mase record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaseRecord {
    /// Comment lines preceding the name, without the `;` prefix.
    pub comments: Vec<String>,
    pub name: String,
    pub seq: String,
}

/// Parse a Mase file from a string.
///
/// The header block ends at the first line that is not a `;;` comment.
/// Comment lines after that point belong to the record that follows
/// them; trailing comments with no record are dropped.
///
/// # Examples
///
/// ```
/// # use salpa_io::mase::parse_mase;
/// let input = ";;archived alignment\n;from sample 7\nseq1\nACGT\nACGT\n";
/// let file = parse_mase(input).unwrap();
/// assert_eq!(file.header, ["archived alignment"]);
/// assert_eq!(file.records[0].name, "seq1");
/// assert_eq!(file.records[0].seq, "ACGTACGT");
/// ```
pub fn parse_mase(input: &str) -> Result<MaseFile> {
    let mut header: Vec<String> = Vec::new();
    let mut records: Vec<MaseRecord> = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut current: Option<MaseRecord> = None;
    let mut in_header = true;

    for line in input.lines() {
        let line = line.trim_end();
        if in_header {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(text) = line.strip_prefix(";;") {
                header.push(text.trim().to_string());
                continue;
            }
            in_header = false;
        }
        if line.starts_with(';') {
            if let Some(rec) = current.take() {
                records.push(rec);
            }
            let text = line.trim_start_matches(';').trim();
            if !text.is_empty() {
                pending.push(text.to_string());
            }
        } else if let Some(rec) = current.as_mut() {
            rec.seq.extend(line.chars().filter(|c| !c.is_whitespace()));
        } else {
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            current = Some(MaseRecord {
                comments: std::mem::take(&mut pending),
                name: name.to_string(),
                seq: String::new(),
            });
        }
    }
    if let Some(rec) = current.take() {
        records.push(rec);
    }
    if records.is_empty() && header.is_empty() {
        return Err(SalpaError::Parse("empty Mase input".to_string()));
    }
    Ok(MaseFile { header, records })
}

/// Render a Mase file as a string.
///
/// Every record is introduced by at least one `;` line, as the format
/// requires; sequences wrap at 60 characters.
pub fn write_mase(file: &MaseFile) -> String {
    const LINE_WIDTH: usize = 60;

    let mut out = String::new();
    for line in &file.header {
        out.push_str(";;");
        out.push_str(line);
        out.push('\n');
    }
    for record in &file.records {
        if record.comments.is_empty() {
            out.push_str(";\n");
        } else {
            for comment in &record.comments {
                out.push(';');
                out.push_str(comment);
                out.push('\n');
            }
        }
        out.push_str(&record.name);
        out.push('\n');
        for chunk in record.seq.as_bytes().chunks(LINE_WIDTH) {
            out.push_str(&String::from_utf8_lossy(chunk));
            out.push('\n');
        }
    }
    out
}

/// Expand the named site selection from a Mase header into 0-based
/// site indices.
///
/// The selection is announced by a `# of segments=<count> <name>` header
/// line; the following header lines carry `start,end` pairs (1-based,
/// inclusive), whitespace-separated, until `count` pairs were read.
pub fn site_selection(header: &[String], name: &str) -> Result<Vec<usize>> {
    let mut lines = header.iter();
    let mut segment_count: Option<usize> = None;
    for line in lines.by_ref() {
        let rest = match line.trim().strip_prefix("# of segments") {
            Some(r) => r.trim_start(),
            None => continue,
        };
        let rest = match rest.strip_prefix('=') {
            Some(r) => r.trim(),
            None => continue,
        };
        let mut parts = rest.splitn(2, char::is_whitespace);
        let count_token = parts.next().unwrap_or("");
        let selection_name = parts.next().map(str::trim).unwrap_or("");
        if selection_name != name {
            continue;
        }
        let count = count_token.parse().map_err(|_| {
            SalpaError::Parse(format!(
                "invalid segment count '{}' for site selection '{}'",
                count_token, name
            ))
        })?;
        segment_count = Some(count);
        break;
    }
    let expected = segment_count.ok_or_else(|| {
        SalpaError::InvalidInput(format!(
            "no site selection named '{}' in Mase header",
            name
        ))
    })?;

    let mut sites = Vec::new();
    let mut segments = 0usize;
    'collect: for line in lines {
        let line = line.trim();
        if line.starts_with("# of segments") {
            break;
        }
        for token in line.split_whitespace() {
            let (start, end) = token.split_once(',').ok_or_else(|| {
                SalpaError::Parse(format!(
                    "invalid segment '{}' in site selection '{}'",
                    token, name
                ))
            })?;
            let start: usize = start.parse().map_err(|_| {
                SalpaError::Parse(format!(
                    "invalid segment start '{}' in site selection '{}'",
                    start, name
                ))
            })?;
            let end: usize = end.parse().map_err(|_| {
                SalpaError::Parse(format!(
                    "invalid segment end '{}' in site selection '{}'",
                    end, name
                ))
            })?;
            if start == 0 || end < start {
                return Err(SalpaError::Parse(format!(
                    "invalid segment {},{} in site selection '{}'",
                    start, end, name
                )));
            }
            sites.extend(start - 1..end);
            segments += 1;
            if segments == expected {
                break 'collect;
            }
        }
    }
    if segments != expected {
        return Err(SalpaError::Parse(format!(
            "site selection '{}' declares {} segments, found {}",
            name, expected, segments
        )));
    }
    Ok(sites)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
