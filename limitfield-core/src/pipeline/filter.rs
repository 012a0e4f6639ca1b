//! Character-class filtering (stage 1).
//!
//! Every predicate here works on a single Unicode scalar. Digit checks skip the
//! general-category lookup for ASCII.

use std::borrow::Cow;
use std::sync::Arc;

use limitfield_types::CharacterClass;
use rustc_hash::FxHashSet;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Unicode decimal digit (general category Nd).
#[inline]
pub fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_digit()
    } else {
        get_general_category(c) == GeneralCategory::DecimalNumber
    }
}

/// ASCII alphanumeric, `@` or `.`.
#[inline(always)]
pub const fn is_email_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '@' || c == '.'
}

/// Combining mark (general categories Mn, Mc, Me).
///
/// Marks travel with the letter they modify, both in decomposed input
/// (`e` + U+0301) and in case mappings that emit them (`İ` -> `i` + U+0307).
#[inline]
pub fn is_combining_mark(c: char) -> bool {
    !c.is_ascii()
        && matches!(
            get_general_category(c),
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
        )
}

/// Any Unicode letter or mark, any punctuation, a space separator, or tab.
///
/// ASCII symbols such as `$`, `+` and `~` are not punctuation.
#[inline]
pub fn is_letter_punctuation_or_space(c: char) -> bool {
    if c == '\t' {
        return true;
    }

    use GeneralCategory::*;
    matches!(
        get_general_category(c),
        UppercaseLetter
            | LowercaseLetter
            | TitlecaseLetter
            | ModifierLetter
            | OtherLetter
            | NonspacingMark
            | SpacingMark
            | EnclosingMark
            | ConnectorPunctuation
            | DashPunctuation
            | OpenPunctuation
            | ClosePunctuation
            | InitialPunctuation
            | FinalPunctuation
            | OtherPunctuation
            | SpaceSeparator
    )
}

/// Returns true if `class` keeps `c`.
#[inline]
pub fn accepts(class: &CharacterClass, c: char) -> bool {
    match class {
        CharacterClass::None => true,
        CharacterClass::DigitsOnly => is_decimal_digit(c),
        CharacterClass::LettersOnly => c.is_ascii_alphabetic(),
        CharacterClass::LettersAndDigits => c.is_ascii_alphabetic() || is_decimal_digit(c),
        CharacterClass::LettersAndSpaces => c.is_ascii_alphabetic() || c.is_whitespace(),
        CharacterClass::LettersSpacesAndPunctuation => {
            // The third test already covers the first two; kept as a superset.
            c.is_ascii_alphabetic() || c.is_whitespace() || is_letter_punctuation_or_space(c)
        }
        CharacterClass::WordsAndSpaces => {
            c.is_alphabetic() || c.is_whitespace() || is_combining_mark(c)
        }
        CharacterClass::EmailCharacters => is_email_char(c),
        CharacterClass::Custom(predicate) => predicate(c),
    }
}

/// Applies `class` to `input`.
///
/// Borrows when nothing is removed, so a clean keystroke costs no allocation.
pub fn filter<'a>(input: &'a str, class: &CharacterClass) -> Cow<'a, str> {
    if class.is_none() {
        return Cow::Borrowed(input);
    }

    let first_rejected = match input.char_indices().find(|&(_, c)| !accepts(class, c)) {
        Some((idx, _)) => idx,
        None => return Cow::Borrowed(input),
    };

    let mut out = String::with_capacity(input.len());
    out.push_str(&input[..first_rejected]);
    out.extend(
        input[first_rejected..]
            .chars()
            .filter(|&c| accepts(class, c)),
    );
    Cow::Owned(out)
}

/// Builds a `Custom` class that accepts exactly the scalars of `allowed`.
///
/// ```
/// use limitfield_core::pipeline::filter::{accepts, one_of};
///
/// let hex = one_of("0123456789abcdef");
/// assert!(accepts(&hex, 'c'));
/// assert!(!accepts(&hex, 'g'));
/// ```
pub fn one_of(allowed: &str) -> CharacterClass {
    let set: FxHashSet<char> = allowed.chars().collect();
    CharacterClass::Custom(Arc::new(move |c| set.contains(&c)))
}
