//! Text normalization pipeline.
//!
//! This module provides the three ordered stages applied to every edit:
//! - **Filter**: Drops characters outside the configured character class
//! - **Case**: Maps letter case over the filtered text
//! - **Grouping**: Enforces the length limit and inserts group separators

pub mod case;
pub mod filter;
pub mod grouping;
pub mod normalizer;

pub use normalizer::{normalize, TextNormalizer};
