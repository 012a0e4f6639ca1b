use limitfield_types::NormalizationConfig;

use super::{case, filter, grouping};

/// Stateless input normalizer for restricted text fields.
///
/// Runs three stages in a fixed order:
/// - Drops characters outside the configured character class
/// - Maps letter case (Unicode-aware)
/// - Applies the length limit, then groups with single-space separators
///
/// The same input and config always produce the same output. Feeding the
/// output back in reproduces it: separators are stripped as whitespace and
/// reinserted at the same positions.
///
/// # Examples
///
/// ```
/// use limitfield_core::TextNormalizer;
/// use limitfield_types::{CharacterClass, NormalizationConfig};
///
/// let card = TextNormalizer::new(
///     NormalizationConfig::default()
///         .with_character_class(CharacterClass::DigitsOnly)
///         .with_max_length(12)
///         .with_group_size(4),
/// );
/// assert_eq!(card.normalize("88888sss8888"), "8888 8888 8");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    config: NormalizationConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub fn new(config: NormalizationConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[inline]
    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity, so a host can
    /// keep one buffer per field and call this on every keystroke.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        run(&self.config, input, out);
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }

    /// Normalizes optional text. Absent input yields an empty string.
    #[inline]
    pub fn normalize_opt(&self, input: Option<&str>) -> String {
        input.map(|s| self.normalize(s)).unwrap_or_default()
    }
}

/// One-shot normalization without constructing a [`TextNormalizer`].
///
/// ```
/// use limitfield_core::normalize;
/// use limitfield_types::{CharacterClass, LetterCase, NormalizationConfig};
///
/// let email = NormalizationConfig::default()
///     .with_character_class(CharacterClass::EmailCharacters)
///     .with_letter_case(LetterCase::Lowercase)
///     .with_max_length(8);
///
/// assert_eq!(normalize(Some("Jo.hn@Doe99"), &email), "jo.hn@do");
/// assert_eq!(normalize(None, &email), "");
/// ```
pub fn normalize(input: Option<&str>, config: &NormalizationConfig) -> String {
    let Some(input) = input else {
        return String::new();
    };

    let mut out = String::with_capacity(input.len());
    run(config, input, &mut out);
    out
}

/// Appends the normalized form of `input` to `out`.
fn run(config: &NormalizationConfig, input: &str, out: &mut String) {
    if config.is_passthrough() {
        out.push_str(input);
        return;
    }

    let filtered = filter::filter(input, &config.character_class);
    let cased = case::apply(config.letter_case, filtered);
    grouping::limit_into(
        &cased,
        config.max_length_limit(),
        config.group_size_limit(),
        out,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use limitfield_types::{CharacterClass, LetterCase};

    fn cfg() -> NormalizationConfig {
        NormalizationConfig::default()
    }

    fn norm(input: &str, config: NormalizationConfig) -> String {
        TextNormalizer::new(config).normalize(input)
    }

    const SAMPLES: [&str; 12] = [
        "",
        "hello world",
        "88888sss8888",
        "Jo.hn@Doe99",
        "  4111 1111 1111 1111  ",
        "Straße 12, München",
        "ΟΔΟΣ οδός",
        "你好 世界 123",
        "tab\tnew\nline",
        "Hi! 🌍 ok?",
        "İstanbul ΐ",
        "Jose\u{301} Pen\u{303}a",
    ];

    fn configs() -> Vec<NormalizationConfig> {
        let mut out = Vec::new();
        for class in CharacterClass::NAMED {
            for case in [LetterCase::None, LetterCase::Uppercase, LetterCase::Lowercase] {
                for max in [-1, 0, 3, 8] {
                    for group in [-1, 0, 1, 4] {
                        out.push(
                            cfg()
                                .with_character_class(class.clone())
                                .with_letter_case(case)
                                .with_max_length(max)
                                .with_group_size(group),
                        );
                    }
                }
            }
        }
        out
    }

    #[test]
    fn digits_grouped_example() {
        let config = cfg()
            .with_character_class(CharacterClass::DigitsOnly)
            .with_group_size(4)
            .with_max_length(12);
        assert_eq!(norm("88888sss8888", config), "8888 8888 8");
    }

    #[test]
    fn email_lowercase_truncated_example() {
        let config = cfg()
            .with_character_class(CharacterClass::EmailCharacters)
            .with_letter_case(LetterCase::Lowercase)
            .with_max_length(8);
        assert_eq!(norm("Jo.hn@Doe99", config), "jo.hn@do");
    }

    #[test]
    fn custom_vowels_example() {
        let config = cfg().with_character_class(CharacterClass::custom(|c| {
            matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U')
        }));
        assert_eq!(norm("Hello World", config), "eoo");
    }

    #[test]
    fn absent_input_is_empty() {
        for config in configs() {
            assert_eq!(normalize(None, &config), "");
            assert_eq!(TextNormalizer::new(config).normalize_opt(None), "");
        }
    }

    #[test]
    fn passthrough_is_identity() {
        for limit in [0, -1, -42] {
            let config = cfg().with_max_length(limit).with_group_size(limit);
            for s in SAMPLES {
                assert_eq!(norm(s, config.clone()), s);
            }
        }
    }

    #[test]
    fn struct_and_free_function_agree() {
        for config in configs() {
            let normalizer = TextNormalizer::new(config.clone());
            for s in SAMPLES {
                assert_eq!(normalizer.normalize(s), normalize(Some(s), &config));
            }
        }
    }

    #[test]
    fn length_never_exceeds_max() {
        for config in configs() {
            let Some(max) = config.max_length_limit() else {
                continue;
            };
            let normalizer = TextNormalizer::new(config);
            for s in SAMPLES {
                let out = normalizer.normalize(s);
                let counted = out.chars().filter(|&c| c != grouping::SEPARATOR).count();
                assert!(counted <= max, "{:?} -> {:?} exceeds {}", s, out, max);
            }
        }
    }

    #[test]
    fn groups_are_full_except_last() {
        for config in configs() {
            let Some(size) = config.group_size_limit() else {
                continue;
            };
            let normalizer = TextNormalizer::new(config);
            for s in SAMPLES {
                let out = normalizer.normalize(s);
                if out.is_empty() {
                    continue;
                }
                let groups: Vec<&str> = out.split(grouping::SEPARATOR).collect();
                let (last, full) = groups.split_last().expect("non-empty output");
                for group in full {
                    assert_eq!(group.chars().count(), size, "{:?}", out);
                }
                let tail = last.chars().count();
                assert!(tail >= 1 && tail <= size, "{:?}", out);
            }
        }
    }

    #[test]
    fn reprocessing_is_stable() {
        for config in configs() {
            let normalizer = TextNormalizer::new(config);
            for s in SAMPLES {
                let once = normalizer.normalize(s);
                let twice = normalizer.normalize(&once);
                assert_eq!(once, twice, "config {:?}", normalizer.config());
            }
        }
    }

    #[test]
    fn truncation_counts_whitespace_without_grouping() {
        let config = cfg().with_max_length(5);
        assert_eq!(norm("ab cd ef", config), "ab cd");
    }

    #[test]
    fn grouping_ignores_input_spacing() {
        let config = cfg()
            .with_character_class(CharacterClass::DigitsOnly)
            .with_max_length(16)
            .with_group_size(4);
        assert_eq!(norm("4111 1111 1111 1111 999", config.clone()), "4111 1111 1111 1111");
        assert_eq!(norm("41 1111111 1111111", config), "4111 1111 1111 1111");
    }

    #[test]
    fn case_runs_after_filter() {
        // 'ß' uppercases to "SS"; the filter must not see the expansion
        let config = cfg()
            .with_character_class(CharacterClass::WordsAndSpaces)
            .with_letter_case(LetterCase::Uppercase)
            .with_max_length(7);
        assert_eq!(norm("straße 9", config), "STRASSE");
    }

    #[test]
    fn normalize_into_reuses_capacity() {
        let normalizer = TextNormalizer::new(cfg().with_letter_case(LetterCase::Uppercase));
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        normalizer.normalize_into("hello", &mut buf);
        assert_eq!(buf, "HELLO");
        assert_eq!(buf.capacity(), cap);

        normalizer.normalize_into("world", &mut buf);
        assert_eq!(buf, "WORLD");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn normalize_into_clears_previous_content() {
        let normalizer = TextNormalizer::new(cfg().with_character_class(CharacterClass::DigitsOnly));
        let mut buf = String::from("stale");
        normalizer.normalize_into("abc", &mut buf);
        assert_eq!(buf, "");
    }

    #[test]
    fn grouped_output_has_no_other_whitespace() {
        for config in configs() {
            if config.group_size_limit().is_none() {
                continue;
            }
            let normalizer = TextNormalizer::new(config);
            for s in SAMPLES {
                let out = normalizer.normalize(s);
                assert!(!out.starts_with(grouping::SEPARATOR), "{:?}", out);
                assert!(!out.contains("  "), "{:?}", out);
                assert!(
                    out.chars()
                        .all(|c| c == grouping::SEPARATOR || !c.is_whitespace()),
                    "{:?}",
                    out
                );
            }
        }
    }

    #[test]
    fn case_mapping_marks_survive_reprocessing() {
        let cases = [
            (LetterCase::Lowercase, "İstanbul", "i\u{307}stanbul"),
            (LetterCase::Uppercase, "ΐ", "\u{399}\u{308}\u{301}"),
        ];

        for (case, input, expected) in cases {
            let normalizer = TextNormalizer::new(
                cfg()
                    .with_character_class(CharacterClass::WordsAndSpaces)
                    .with_letter_case(case),
            );
            let once = normalizer.normalize(input);
            assert_eq!(once, expected);
            assert_eq!(normalizer.normalize(&once), once);
        }
    }

    #[test]
    fn decomposed_letters_keep_their_accents() {
        let config = cfg()
            .with_character_class(CharacterClass::WordsAndSpaces)
            .with_letter_case(LetterCase::Uppercase);
        assert_eq!(norm("e\u{301}te\u{301} 42", config), "E\u{301}TE\u{301} ");
    }

    #[test]
    fn normalizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TextNormalizer>();
    }
}
