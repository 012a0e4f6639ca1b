//! Input normalization for restricted text fields.
//!
//! [`TextNormalizer`] turns raw keystroke text into the value a restricted
//! field should display: characters outside the allowed class are dropped,
//! letter case is mapped, and the result is cut to a maximum length and
//! optionally grouped (`"4111 1111 1111 1111"`).
//!
//! [`LimitField`] is a headless host for the normalizer that owns the current
//! value and reports normalized changes to listeners. [`ProfileSet`] loads
//! named configurations from TOML.

pub mod field;
pub mod pipeline;
pub mod profile;

pub use field::{ClearButtonMode, EditAction, FieldEvent, LimitField};
pub use pipeline::{normalize, TextNormalizer};
pub use profile::{ProfileError, ProfileSet};

pub use limitfield_types::{CharacterClass, LetterCase, NormalizationConfig};
