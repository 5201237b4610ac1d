//! Flat `key = value` option maps.
//!
//! The factory functions in [`crate::factory`] read their configuration
//! from an [`OptionMap`], typically parsed from a text file with one
//! assignment per line. Shell comments (`# ...`), C++ comments
//! (`// ...`), and C block comments (`/* ... */`, possibly spanning
//! lines) are stripped before parsing; blank lines are ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use salpa_core::{Result, SalpaError};

/// A parsed set of configuration options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: BTreeMap<String, String>,
}

impl OptionMap {
    /// Empty option map.
    pub fn new() -> Self {
        OptionMap::default()
    }

    /// Parse options from text.
    ///
    /// Every non-blank line after comment stripping must be a
    /// `name = value` assignment. Later assignments to the same name win.
    ///
    /// # Examples
    ///
    /// ```
    /// # use salpa_io::options::OptionMap;
    /// let opts = OptionMap::parse("alphabet = DNA # nucleotides\n").unwrap();
    /// assert_eq!(opts.get("alphabet"), Some("DNA"));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let stripped = strip_comments(input);
        let mut entries = BTreeMap::new();
        for (lineno, line) in stripped.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => {
                    let key = key.trim();
                    if key.is_empty() {
                        return Err(SalpaError::Parse(format!(
                            "empty option name on line {}",
                            lineno + 1
                        )));
                    }
                    entries.insert(key.to_string(), value.trim().to_string());
                }
                None => {
                    return Err(SalpaError::Parse(format!(
                        "expected 'name = value' on line {}: '{}'",
                        lineno + 1,
                        line
                    )))
                }
            }
        }
        Ok(OptionMap { entries })
    }

    /// Parse options from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        OptionMap::parse(&text)
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a required option.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| SalpaError::MissingOption(key.to_string()))
    }

    /// Look up an option, falling back to a default.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Look up an unsigned integer option.
    pub fn get_usize(&self, key: &str) -> Result<Option<usize>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| {
                SalpaError::Parse(format!(
                    "option '{}' expects an unsigned integer, got '{}'",
                    key, value
                ))
            }),
        }
    }

    /// Set an option, overwriting any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Option names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Strip `#`, `//`, and `/* ... */` comments. Newlines inside block
/// comments are kept so line numbers in later errors stay meaningful.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_block = false;
    while let Some(c) = chars.next() {
        if in_block {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block = false;
            } else if c == '\n' {
                out.push('\n');
            }
            continue;
        }
        match c {
            '#' => skip_to_eol(&mut chars),
            '/' if chars.peek() == Some(&'/') => skip_to_eol(&mut chars),
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                in_block = true;
            }
            _ => out.push(c),
        }
    }
    out
}

fn skip_to_eol(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while let Some(&next) = chars.peek() {
        if next == '\n' {
            break;
        }
        chars.next();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_assignments_and_trims() {
        let opts = OptionMap::parse("a = 1\n  b=two words  \nc.d.e = 3\n").unwrap();
        assert_eq!(opts.get("a"), Some("1"));
        assert_eq!(opts.get("b"), Some("two words"));
        assert_eq!(opts.get("c.d.e"), Some("3"));
        assert_eq!(opts.len(), 3);
    }

    #[test]
    fn values_may_contain_equals() {
        let opts = OptionMap::parse("formula = a=b\n").unwrap();
        assert_eq!(opts.get("formula"), Some("a=b"));
    }

    #[test]
    fn later_assignments_win() {
        let opts = OptionMap::parse("a = 1\na = 2\n").unwrap();
        assert_eq!(opts.get("a"), Some("2"));
        assert_eq!(opts.len(), 1);
    }

    #[test]
    fn strips_all_three_comment_styles() {
        let input = "\
# leading comment
a = 1 # trailing shell
b = 2 // trailing cpp
/* block
   spanning lines */
c = 3
d = 4 /* inline */
";
        let opts = OptionMap::parse(input).unwrap();
        assert_eq!(opts.get("a"), Some("1"));
        assert_eq!(opts.get("b"), Some("2"));
        assert_eq!(opts.get("c"), Some("3"));
        assert_eq!(opts.get("d"), Some("4"));
        assert_eq!(opts.len(), 4);
    }

    #[test]
    fn block_comment_keeps_line_numbers() {
        let err = OptionMap::parse("/* one\ntwo */\nbroken line\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn rejects_lines_without_assignment() {
        assert!(OptionMap::parse("just some text\n").is_err());
        assert!(OptionMap::parse("= value\n").is_err());
    }

    #[test]
    fn require_and_defaults() {
        let opts = OptionMap::parse("present = yes\n").unwrap();
        assert_eq!(opts.require("present").unwrap(), "yes");
        assert!(matches!(
            opts.require("absent").unwrap_err(),
            SalpaError::MissingOption(_)
        ));
        assert_eq!(opts.get_or("absent", "fallback"), "fallback");
    }

    #[test]
    fn integer_options() {
        let opts = OptionMap::parse("n = 100\nbad = ten\n").unwrap();
        assert_eq!(opts.get_usize("n").unwrap(), Some(100));
        assert_eq!(opts.get_usize("missing").unwrap(), None);
        assert!(opts.get_usize("bad").is_err());
    }

    #[test]
    fn insert_overwrites() {
        let mut opts = OptionMap::new();
        opts.insert("k", "v1");
        opts.insert("k", "v2");
        assert_eq!(opts.get("k"), Some("v2"));
        assert_eq!(opts.keys().collect::<Vec<_>>(), ["k"]);
    }

    #[test]
    fn reads_option_files() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "alphabet = DNA").unwrap();
        writeln!(file, "sequence.format = Fasta").unwrap();
        file.flush().unwrap();

        let opts = OptionMap::from_file(file.path()).unwrap();
        assert_eq!(opts.get("alphabet"), Some("DNA"));
        assert_eq!(opts.get("sequence.format"), Some("Fasta"));
        assert!(OptionMap::from_file("/nonexistent/options.txt").is_err());
    }
}
