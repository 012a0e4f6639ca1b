//! Core types for the limitfield text-normalization pipeline.
//!
//! This crate holds the configuration model shared by the pipeline and by
//! hosts that embed it. Keeping the types separate ensures:
//!
//! - **No dependencies**: Hosts can describe a field without pulling in the engine
//! - **Cheap values**: Configs clone in O(1), custom predicates are reference counted
//! - **Clean boundaries**: The pipeline crate depends on this one, never the reverse

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

/// Caller-supplied character acceptance function.
///
/// Evaluated once per Unicode scalar. A predicate that panics unwinds through
/// the normalizer unchanged.
pub type CharPredicate = Arc<dyn Fn(char) -> bool + Send + Sync>;

/// Which characters survive the filtering stage.
#[derive(Clone, Default)]
pub enum CharacterClass {
    /// Keep every character.
    #[default]
    None,
    /// Unicode decimal digits (general category Nd).
    DigitsOnly,
    /// ASCII letters `[A-Za-z]`.
    LettersOnly,
    /// ASCII letters or Unicode decimal digits.
    LettersAndDigits,
    /// ASCII letters or whitespace.
    LettersAndSpaces,
    /// ASCII letters, whitespace, or any Unicode letter, mark, punctuation
    /// or space separator.
    LettersSpacesAndPunctuation,
    /// Any Unicode alphabetic character or whitespace.
    WordsAndSpaces,
    /// ASCII alphanumerics, `@` and `.`.
    EmailCharacters,
    /// Caller-supplied predicate.
    Custom(CharPredicate),
}

impl CharacterClass {
    /// All named classes, in declaration order. `Custom` is excluded.
    pub const NAMED: [CharacterClass; 8] = [
        CharacterClass::None,
        CharacterClass::DigitsOnly,
        CharacterClass::LettersOnly,
        CharacterClass::LettersAndDigits,
        CharacterClass::LettersAndSpaces,
        CharacterClass::LettersSpacesAndPunctuation,
        CharacterClass::WordsAndSpaces,
        CharacterClass::EmailCharacters,
    ];

    /// Wraps a closure as a `Custom` class.
    ///
    /// ```
    /// use limitfield_types::CharacterClass;
    ///
    /// let vowels = CharacterClass::custom(|c| "aeiouAEIOU".contains(c));
    /// assert_eq!(vowels.name(), "custom");
    /// ```
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        CharacterClass::Custom(Arc::new(predicate))
    }

    /// Stable kebab-case name, as used in profile files.
    pub const fn name(&self) -> &'static str {
        match self {
            CharacterClass::None => "none",
            CharacterClass::DigitsOnly => "digits-only",
            CharacterClass::LettersOnly => "letters-only",
            CharacterClass::LettersAndDigits => "letters-and-digits",
            CharacterClass::LettersAndSpaces => "letters-and-spaces",
            CharacterClass::LettersSpacesAndPunctuation => "letters-spaces-and-punctuation",
            CharacterClass::WordsAndSpaces => "words-and-spaces",
            CharacterClass::EmailCharacters => "email-characters",
            CharacterClass::Custom(_) => "custom",
        }
    }

    /// Returns true if this class keeps every character.
    #[inline(always)]
    pub const fn is_none(&self) -> bool {
        matches!(self, CharacterClass::None)
    }
}

impl fmt::Debug for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterClass::Custom(_) => f.write_str("Custom(..)"),
            other => f.write_str(other.name()),
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for CharacterClass {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Two custom classes are equal only if they share the same predicate
            (CharacterClass::Custom(a), CharacterClass::Custom(b)) => Arc::ptr_eq(a, b),
            (a, b) => core::mem::discriminant(a) == core::mem::discriminant(b),
        }
    }
}

impl FromStr for CharacterClass {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "custom" {
            return Err(ParseError::CustomWithoutPredicate);
        }

        CharacterClass::NAMED
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| ParseError::UnknownName {
                kind: "character class",
                name: s.to_owned(),
            })
    }
}

/// Letter-case normalization applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LetterCase {
    /// Leave case unchanged.
    #[default]
    None = 0,
    /// Full Unicode uppercase mapping.
    Uppercase = 1,
    /// Full Unicode lowercase mapping.
    Lowercase = 2,
}

impl LetterCase {
    /// Stable kebab-case name, as used in profile files.
    pub const fn name(self) -> &'static str {
        match self {
            LetterCase::None => "none",
            LetterCase::Uppercase => "uppercase",
            LetterCase::Lowercase => "lowercase",
        }
    }
}

impl fmt::Display for LetterCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LetterCase {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(LetterCase::None),
            "uppercase" => Ok(LetterCase::Uppercase),
            "lowercase" => Ok(LetterCase::Lowercase),
            _ => Err(ParseError::UnknownName {
                kind: "letter case",
                name: s.to_owned(),
            }),
        }
    }
}

/// Errors produced when parsing configuration names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The name does not match any known variant.
    UnknownName {
        /// What was being parsed ("character class", "letter case").
        kind: &'static str,
        /// The rejected input.
        name: String,
    },
    /// `custom` cannot be built from a name alone; it needs a predicate.
    CustomWithoutPredicate,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownName { kind, name } => {
                write!(f, "unknown {}: {:?}", kind, name)
            }
            ParseError::CustomWithoutPredicate => {
                write!(f, "custom character class requires a predicate")
            }
        }
    }
}

impl core::error::Error for ParseError {}

/// Complete configuration for one normalization call.
///
/// Limits use signed integers: any value `<= 0` disables the limit.
///
/// # Examples
///
/// ```
/// use limitfield_types::{CharacterClass, NormalizationConfig};
///
/// let card = NormalizationConfig::default()
///     .with_character_class(CharacterClass::DigitsOnly)
///     .with_max_length(16)
///     .with_group_size(4);
///
/// assert_eq!(card.max_length_limit(), Some(16));
/// assert_eq!(card.group_size_limit(), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationConfig {
    /// Character filter (stage 1).
    pub character_class: CharacterClass,
    /// Case mapping (stage 2).
    pub letter_case: LetterCase,
    /// Maximum number of scalars. `<= 0` means unlimited.
    /// With grouping enabled, separators are not counted.
    pub max_length: isize,
    /// Scalars per group. `<= 0` disables grouping.
    pub group_size: isize,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self::passthrough()
    }
}

impl NormalizationConfig {
    /// Sentinel for a disabled length or group limit.
    pub const UNLIMITED: isize = -1;

    /// A configuration that returns its input unchanged.
    pub const fn passthrough() -> Self {
        Self {
            character_class: CharacterClass::None,
            letter_case: LetterCase::None,
            max_length: Self::UNLIMITED,
            group_size: Self::UNLIMITED,
        }
    }

    /// Sets the character class.
    #[must_use]
    pub fn with_character_class(mut self, character_class: CharacterClass) -> Self {
        self.character_class = character_class;
        self
    }

    /// Sets the letter case.
    #[must_use]
    pub fn with_letter_case(mut self, letter_case: LetterCase) -> Self {
        self.letter_case = letter_case;
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn with_max_length(mut self, max_length: isize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the group size.
    #[must_use]
    pub fn with_group_size(mut self, group_size: isize) -> Self {
        self.group_size = group_size;
        self
    }

    /// Effective maximum length, or `None` when unlimited.
    #[inline(always)]
    pub fn max_length_limit(&self) -> Option<usize> {
        positive(self.max_length)
    }

    /// Effective group size, or `None` when grouping is disabled.
    #[inline(always)]
    pub fn group_size_limit(&self) -> Option<usize> {
        positive(self.group_size)
    }

    /// Returns true if normalization cannot change any input.
    pub fn is_passthrough(&self) -> bool {
        self.character_class.is_none()
            && self.letter_case == LetterCase::None
            && self.max_length_limit().is_none()
            && self.group_size_limit().is_none()
    }
}

#[inline(always)]
fn positive(value: isize) -> Option<usize> {
    if value > 0 {
        Some(value as usize)
    } else {
        None
    }
}
