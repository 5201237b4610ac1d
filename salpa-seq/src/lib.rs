//! Alphabets, genetic codes, and sequence containers.
//!
//! This crate provides the residue-level building blocks of salpa:
//!
//! - [`alphabet`] -- DNA, RNA, and protein alphabets with fixed
//!   symbol/state-index tables
//! - [`codon`] -- the 64-codon alphabet and its radix-4 index space
//! - [`genetic_code`] -- NCBI translation tables and codon translation
//! - [`record`] -- named, alphabet-validated sequence records
//! - [`container`] -- sequence sets and site-addressable alignments
//!
//! # Example
//!
//! ```
//! use salpa_seq::GeneticCode;
//!
//! let code = GeneticCode::standard();
//! assert_eq!(code.translate_codon(b"ATG").unwrap(), b'M');
//! assert!(code.is_stop(b"TAA"));
//! ```

pub mod alphabet;
pub mod codon;
pub mod container;
pub mod genetic_code;
pub mod record;

pub use alphabet::{Alphabet, AlphabetId};
pub use codon::{CodonAlphabet, CODON_COUNT};
pub use container::{Alignment, SequenceSet};
pub use genetic_code::{GeneticCode, GeneticCodeId};
pub use record::SeqRecord;
