//! Events, edit actions and clear-button modes for [`LimitField`](super::LimitField).

/// Notification delivered to field listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// A user edit or clear produced this normalized value.
    TextChanged(String),
    /// Editing began (`true`) or ended (`false`).
    EditingChanged(bool),
    /// The return key was pressed; editing has ended.
    ReturnPressed,
}

/// Pasteboard and selection actions a host may ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    /// Copy the selection.
    Copy,
    /// Cut the selection.
    Cut,
    /// Paste from the pasteboard.
    Paste,
    /// Select a word.
    Select,
    /// Select the whole value.
    SelectAll,
}

impl EditAction {
    /// All actions, in declaration order.
    pub const ALL: [EditAction; 5] = [
        EditAction::Copy,
        EditAction::Cut,
        EditAction::Paste,
        EditAction::Select,
        EditAction::SelectAll,
    ];
}

/// When the clear button is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClearButtonMode {
    /// Never shown.
    #[default]
    Never,
    /// Shown while editing a non-empty value.
    WhileEditing,
    /// Shown while not editing a non-empty value.
    UnlessEditing,
    /// Always shown, even when the value is empty.
    Always,
}

impl ClearButtonMode {
    /// Resolves visibility for the given field state.
    #[inline]
    pub const fn is_visible(self, editing: bool, has_text: bool) -> bool {
        match self {
            ClearButtonMode::Never => false,
            ClearButtonMode::WhileEditing => editing && has_text,
            ClearButtonMode::UnlessEditing => !editing && has_text,
            ClearButtonMode::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_button_visibility_table() {
        use ClearButtonMode::*;

        let cases = [
            // (mode, editing, has_text, visible)
            (Never, true, true, false),
            (Never, false, false, false),
            (WhileEditing, true, true, true),
            (WhileEditing, true, false, false),
            (WhileEditing, false, true, false),
            (UnlessEditing, false, true, true),
            (UnlessEditing, true, true, false),
            (UnlessEditing, false, false, false),
            (Always, false, false, true),
            (Always, true, true, true),
        ];

        for (mode, editing, has_text, visible) in cases {
            assert_eq!(
                mode.is_visible(editing, has_text),
                visible,
                "{:?} editing={} has_text={}",
                mode,
                editing,
                has_text
            );
        }
    }
}
