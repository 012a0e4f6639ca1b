//! Letter-case mapping (stage 2).

use std::borrow::Cow;

use limitfield_types::LetterCase;

/// Applies `case` to the whole of `text`.
///
/// Non-ASCII text goes through the full Unicode mappings of `str`, so
/// expansions ("ß" -> "SS") and context rules (final sigma) are honored.
/// ASCII text is mapped in place, and left borrowed when already in case.
pub fn apply(case: LetterCase, text: Cow<'_, str>) -> Cow<'_, str> {
    match case {
        LetterCase::None => text,
        LetterCase::Uppercase => {
            if text.is_ascii() {
                if !text.bytes().any(|b| b.is_ascii_lowercase()) {
                    return text;
                }
                let mut owned = text.into_owned();
                owned.make_ascii_uppercase();
                Cow::Owned(owned)
            } else {
                Cow::Owned(text.to_uppercase())
            }
        }
        LetterCase::Lowercase => {
            if text.is_ascii() {
                if !text.bytes().any(|b| b.is_ascii_uppercase()) {
                    return text;
                }
                let mut owned = text.into_owned();
                owned.make_ascii_lowercase();
                Cow::Owned(owned)
            } else {
                Cow::Owned(text.to_lowercase())
            }
        }
    }
}
