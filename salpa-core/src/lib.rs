//! Shared primitives and traits for the salpa sequence-analysis crates.
//!
//! `salpa-core` provides the foundation the other salpa crates build on:
//!
//! - **Error types** -- [`SalpaError`] and [`Result`] for structured error
//!   handling across alphabets, translation, containers, and file formats
//! - **Traits** -- [`Sequence`], [`Annotated`], [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{Result, SalpaError};
pub use traits::*;
