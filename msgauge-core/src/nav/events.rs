//! Navigation input events and resulting actions

/// Debounced operator input
///
/// Produced by the input task from button and encoder edges; the
/// electrical layer is done by the time these exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Long press: advance to the next top-level view
    NextView,
    /// Short press: select / enter / leave edit mode
    Select,
    /// Encoder rotation, signed detent count
    Adjust(i8),
}

/// What the orchestrator must do after a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavAction {
    /// Pure navigation, nothing to persist
    None,
    /// An edit changed a settings value; mark the store dirty
    SettingsEdited,
    /// The settings view was left; flush batched edits now
    SettingsClosed,
}
