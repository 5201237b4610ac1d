//! Alignment file formats and config-driven sequence I/O.
//!
//! Format modules parse to and write from plain data structures:
//!
//! - [`fasta`] -- FASTA via `needletail`, with a wrapping writer
//! - [`mase`] -- Mase (SeaView lineage), including header site selections
//! - [`phylip`] -- PHYLIP, interleaved/sequential and classic/extended names
//! - [`clustal`] -- ClustalW / Clustal Omega output (read-only)
//! - [`dcse`] -- DCSE structure alignments (read-only)
//!
//! The [`factory`] module builds validated [`salpa_seq`] alphabets and
//! alignments from [`options::OptionMap`] configuration, dispatching on
//! the format options above.

pub mod clustal;
pub mod dcse;
pub mod factory;
pub mod fasta;
pub mod mase;
pub mod options;
pub mod phylip;

pub use factory::{build_alignment, build_alphabet, select_sites, write_sequences};
pub use options::OptionMap;
