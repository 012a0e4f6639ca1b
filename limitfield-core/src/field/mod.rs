//! Headless restricted text field.
//!
//! [`LimitField`] owns the displayed value and the active configuration. It
//! does no rendering: a UI layer forwards raw edits here and displays
//! [`LimitField::text`]. Every path that can change the value (user edits,
//! programmatic assignment, config changes) goes through the normalizer, so
//! the stored value is always normalized.
//!
//! Threading:
//! - Mutation requires `&mut self`. Listeners run synchronously, after the new
//!   value has been stored, so they never observe a stale value.

mod event;

pub use event::{ClearButtonMode, EditAction, FieldEvent};

use core::fmt;

use limitfield_types::{CharacterClass, LetterCase, NormalizationConfig};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::pipeline::TextNormalizer;

/// Boxed event listener.
pub type Listener = Box<dyn FnMut(&FieldEvent) + Send>;

/// Restricted text field state.
///
/// # Example
///
/// ```
/// use limitfield_core::{CharacterClass, FieldEvent, LimitField, NormalizationConfig};
/// use std::sync::{Arc, Mutex};
///
/// let config = NormalizationConfig::default()
///     .with_character_class(CharacterClass::DigitsOnly)
///     .with_group_size(4);
/// let mut field = LimitField::new(config);
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// field.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
///
/// field.input("12ab345");
/// assert_eq!(field.text(), "1234 5");
/// assert_eq!(
///     *seen.lock().unwrap(),
///     vec![FieldEvent::TextChanged("1234 5".to_string())]
/// );
/// ```
pub struct LimitField {
    normalizer: TextNormalizer,
    text: String,
    scratch: String,
    revision: u64,
    editing: bool,
    allow_copy_paste: bool,
    clear_button_mode: ClearButtonMode,
    listeners: SmallVec<[Listener; 2]>,
}

impl Default for LimitField {
    fn default() -> Self {
        Self::new(NormalizationConfig::default())
    }
}

impl fmt::Debug for LimitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimitField")
            .field("text", &self.text)
            .field("config", self.normalizer.config())
            .field("revision", &self.revision)
            .field("editing", &self.editing)
            .field("allow_copy_paste", &self.allow_copy_paste)
            .field("clear_button_mode", &self.clear_button_mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl LimitField {
    /// Creates an empty field.
    pub fn new(config: NormalizationConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(config),
            text: String::new(),
            scratch: String::new(),
            revision: 0,
            editing: false,
            allow_copy_paste: true,
            clear_button_mode: ClearButtonMode::Never,
            listeners: SmallVec::new(),
        }
    }

    /// Creates a field holding the normalized form of `raw`.
    pub fn with_text(config: NormalizationConfig, raw: &str) -> Self {
        let mut field = Self::new(config);
        field.set_text(raw);
        field
    }

    /// Sets the clear-button mode.
    #[must_use]
    pub fn with_clear_button_mode(mut self, mode: ClearButtonMode) -> Self {
        self.clear_button_mode = mode;
        self
    }

    /// Enables or disables copy, cut, paste and selection.
    #[must_use]
    pub fn with_copy_paste(mut self, allowed: bool) -> Self {
        self.allow_copy_paste = allowed;
        self
    }

    // =========================================================================
    // Value
    // =========================================================================

    /// The current, normalized value.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Monotonic counter, incremented whenever the stored value changes.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Programmatic assignment. Stores the normalized value without notifying.
    ///
    /// Returns true if the stored value changed.
    pub fn set_text(&mut self, raw: &str) -> bool {
        self.normalizer.normalize_into(raw, &mut self.scratch);
        self.commit()
    }

    /// A user edit: stores the normalized value and reports it to listeners.
    ///
    /// Listeners receive the normalized value even when it equals the previous
    /// one (a rejected keystroke still produces a change event).
    pub fn input(&mut self, raw: &str) {
        self.set_text(raw);
        let event = FieldEvent::TextChanged(self.text.clone());
        self.emit(&event);
    }

    /// Empties the field and reports the empty value.
    pub fn clear(&mut self) {
        self.input("");
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &NormalizationConfig {
        self.normalizer.config()
    }

    /// Replaces the configuration and renormalizes the current value.
    ///
    /// Does not notify listeners. Returns true if the stored value changed.
    pub fn set_config(&mut self, config: NormalizationConfig) -> bool {
        trace!(?config, "field config replaced");
        self.normalizer = TextNormalizer::new(config);
        self.normalizer.normalize_into(&self.text, &mut self.scratch);
        self.commit()
    }

    /// Replaces the character class. See [`set_config`](Self::set_config).
    pub fn set_character_class(&mut self, character_class: CharacterClass) -> bool {
        let config = self.config().clone().with_character_class(character_class);
        self.set_config(config)
    }

    /// Replaces the letter case. See [`set_config`](Self::set_config).
    pub fn set_letter_case(&mut self, letter_case: LetterCase) -> bool {
        let config = self.config().clone().with_letter_case(letter_case);
        self.set_config(config)
    }

    /// Replaces the maximum length. See [`set_config`](Self::set_config).
    pub fn set_max_length(&mut self, max_length: isize) -> bool {
        let config = self.config().clone().with_max_length(max_length);
        self.set_config(config)
    }

    /// Replaces the group size. See [`set_config`](Self::set_config).
    pub fn set_group_size(&mut self, group_size: isize) -> bool {
        let config = self.config().clone().with_group_size(group_size);
        self.set_config(config)
    }

    // =========================================================================
    // Editing state
    // =========================================================================

    /// Returns true while the field has focus.
    #[inline]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Marks the field as focused.
    pub fn begin_editing(&mut self) {
        self.set_editing(true);
    }

    /// Marks the field as unfocused.
    pub fn end_editing(&mut self) {
        self.set_editing(false);
    }

    /// Handles the return key: ends editing, then reports the press.
    pub fn submit(&mut self) {
        self.set_editing(false);
        self.emit(&FieldEvent::ReturnPressed);
    }

    fn set_editing(&mut self, editing: bool) {
        if self.editing == editing {
            return;
        }
        self.editing = editing;
        self.emit(&FieldEvent::EditingChanged(editing));
    }

    // =========================================================================
    // Actions and clear button
    // =========================================================================

    /// Returns true if copy, cut, paste and selection are allowed.
    #[inline]
    pub fn allows_copy_paste(&self) -> bool {
        self.allow_copy_paste
    }

    /// Enables or disables copy, cut, paste and selection.
    pub fn set_copy_paste(&mut self, allowed: bool) {
        self.allow_copy_paste = allowed;
    }

    /// Returns true if the host may perform `action` on this field.
    pub fn can_perform(&self, action: EditAction) -> bool {
        match action {
            EditAction::Copy
            | EditAction::Cut
            | EditAction::Paste
            | EditAction::Select
            | EditAction::SelectAll => self.allow_copy_paste,
        }
    }

    /// The current clear-button mode.
    #[inline]
    pub fn clear_button_mode(&self) -> ClearButtonMode {
        self.clear_button_mode
    }

    /// Sets the clear-button mode.
    pub fn set_clear_button_mode(&mut self, mode: ClearButtonMode) {
        self.clear_button_mode = mode;
    }

    /// Returns true if the clear button should be shown.
    pub fn clear_button_visible(&self) -> bool {
        self.clear_button_mode
            .is_visible(self.editing, !self.text.is_empty())
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Registers a listener. Listeners run in registration order.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&FieldEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Number of registered listeners.
    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&mut self, event: &FieldEvent) {
        trace!(?event, listeners = self.listeners.len(), "field event");
        for listener in self.listeners.iter_mut() {
            listener(event);
        }
    }

    /// Swaps the freshly normalized `scratch` into place if it differs.
    fn commit(&mut self) -> bool {
        if self.scratch == self.text {
            return false;
        }

        core::mem::swap(&mut self.text, &mut self.scratch);
        self.revision += 1;
        debug!(
            revision = self.revision,
            len = self.text.chars().count(),
            "field value changed"
        );
        true
    }
}
