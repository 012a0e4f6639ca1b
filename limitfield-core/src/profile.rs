//! Named field configurations loaded from TOML.
//!
//! A profile file maps names to [`NormalizationConfig`] values:
//!
//! ```toml
//! [profiles.card]
//! character-class = "digits-only"
//! max-length = 16
//! group-size = 4
//!
//! [profiles.voucher]
//! character-class = "custom"
//! allowed-characters = "0123456789ABCDEF-"
//! letter-case = "uppercase"
//! ```
//!
//! Omitted keys fall back to the passthrough defaults. Every profile is
//! validated when the file is loaded, so [`ProfileSet::get`] can only fail on
//! an unknown name.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use limitfield_types::{CharacterClass, LetterCase, NormalizationConfig, ParseError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::pipeline::filter;

/// Errors produced while loading or looking up profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile file could not be read.
    #[error("failed to read profile file {}: {source}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unexpected keys.
    #[error("invalid profile file: {0}")]
    Toml(#[from] toml::de::Error),
    /// A character class or letter case name was not recognized.
    #[error("profile {profile:?}: {source}")]
    InvalidName {
        /// Profile containing the bad name.
        profile: String,
        /// Parse failure.
        #[source]
        source: ParseError,
    },
    /// `custom` was selected without `allowed-characters`.
    #[error("profile {0:?}: custom character class requires allowed-characters")]
    MissingAllowedCharacters(String),
    /// `allowed-characters` was given for a named class.
    #[error("profile {0:?}: allowed-characters requires character-class = \"custom\"")]
    UnexpectedAllowedCharacters(String),
    /// No profile with this name exists.
    #[error("unknown profile {0:?}")]
    UnknownProfile(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ProfileSpec {
    #[serde(default)]
    character_class: Option<String>,
    #[serde(default)]
    letter_case: Option<String>,
    #[serde(default = "unlimited")]
    max_length: isize,
    #[serde(default = "unlimited")]
    group_size: isize,
    #[serde(default)]
    allowed_characters: Option<String>,
}

fn unlimited() -> isize {
    NormalizationConfig::UNLIMITED
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    #[serde(default)]
    profiles: BTreeMap<String, ProfileSpec>,
}

impl ProfileSpec {
    fn into_config(self, name: &str) -> Result<NormalizationConfig, ProfileError> {
        let invalid = |source: ParseError| ProfileError::InvalidName {
            profile: name.to_owned(),
            source,
        };

        let character_class = match (self.character_class.as_deref(), self.allowed_characters) {
            (Some("custom"), Some(allowed)) => filter::one_of(&allowed),
            (Some("custom"), None) => {
                return Err(ProfileError::MissingAllowedCharacters(name.to_owned()))
            }
            (_, Some(_)) => {
                return Err(ProfileError::UnexpectedAllowedCharacters(name.to_owned()))
            }
            (Some(class), None) => class.parse::<CharacterClass>().map_err(invalid)?,
            (None, None) => CharacterClass::None,
        };

        let letter_case = match self.letter_case.as_deref() {
            Some(case) => case.parse::<LetterCase>().map_err(invalid)?,
            None => LetterCase::None,
        };

        Ok(NormalizationConfig {
            character_class,
            letter_case,
            max_length: self.max_length,
            group_size: self.group_size,
        })
    }
}

/// Validated set of named configurations.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    profiles: BTreeMap<String, NormalizationConfig>,
}

impl ProfileSet {
    /// Parses and validates a TOML profile document.
    pub fn from_toml_str(source: &str) -> Result<Self, ProfileError> {
        let file: ProfileFile = toml::from_str(source)?;

        if file.profiles.is_empty() {
            warn!("profile document defines no profiles");
        }

        let mut profiles = BTreeMap::new();
        for (name, spec) in file.profiles {
            let config = spec.into_config(&name)?;
            profiles.insert(name, config);
        }

        Ok(Self { profiles })
    }

    /// Reads and validates a TOML profile file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let set = Self::from_toml_str(&source)?;
        info!(path = %path.display(), count = set.len(), "loaded field profiles");
        Ok(set)
    }

    /// Returns a copy of the named configuration.
    pub fn get(&self, name: &str) -> Result<NormalizationConfig, ProfileError> {
        self.profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ProfileError::UnknownProfile(name.to_owned()))
    }

    /// Adds or replaces a profile.
    pub fn insert(&mut self, name: impl Into<String>, config: NormalizationConfig) {
        self.profiles.insert(name.into(), config);
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if no profiles are defined.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
