//! Navigation state machine
//!
//! All view and menu behavior is a function of the current state and one
//! input event. Position counters wrap modulo their domain and are never
//! observable out of range.

use crate::settings::Settings;
use crate::tables::FIELD_TABLE;
use crate::telemetry::FieldId;

use super::events::{InputEvent, NavAction};

/// Number of top-level views
pub const NUM_VIEWS: u8 = 4;
/// Rows in the settings list, including Exit
pub const NUM_SETTINGS_ROWS: u8 = 5;
/// Fields browsable in the single-gauge view
pub const NUM_GAUGES: u8 = 16;
/// Channels browsable in the graph view
pub const NUM_GRAPHS: u8 = 3;

/// Top-level views, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum View {
    Dashboard,
    SingleGauge,
    Graph,
    Settings,
}

impl View {
    fn index(self) -> u8 {
        match self {
            View::Dashboard => 0,
            View::SingleGauge => 1,
            View::Graph => 2,
            View::Settings => 3,
        }
    }

    fn from_index(index: u8) -> Self {
        match index % NUM_VIEWS {
            0 => View::Dashboard,
            1 => View::SingleGauge,
            2 => View::Graph,
            _ => View::Settings,
        }
    }

    fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Rows of the settings list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsRow {
    Ring,
    ShiftRpm,
    Warnings,
    CoolantWarn,
    Exit,
}

impl SettingsRow {
    fn from_index(index: u8) -> Self {
        match index {
            0 => SettingsRow::Ring,
            1 => SettingsRow::ShiftRpm,
            2 => SettingsRow::Warnings,
            3 => SettingsRow::CoolantWarn,
            _ => SettingsRow::Exit,
        }
    }
}

/// The complete navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavState {
    view: View,
    settings_pos: u8,
    gauge_pos: u8,
    graph_pos: u8,
    editing: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavState {
    pub const fn new() -> Self {
        Self {
            view: View::Dashboard,
            settings_pos: 0,
            gauge_pos: 0,
            graph_pos: 0,
            editing: false,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Currently highlighted settings row
    pub fn settings_row(&self) -> SettingsRow {
        SettingsRow::from_index(self.settings_pos)
    }

    pub fn settings_pos(&self) -> u8 {
        self.settings_pos
    }

    /// True while a settings value is being edited
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Field shown by the single-gauge view
    pub fn gauge_field(&self) -> FieldId {
        FIELD_TABLE[self.gauge_pos as usize].id
    }

    pub fn gauge_pos(&self) -> u8 {
        self.gauge_pos
    }

    /// Channel plotted by the graph view: AFR, MAP, or MAT
    pub fn graph_channel(&self) -> FieldId {
        match self.graph_pos {
            0 => FieldId::Afr,
            1 => FieldId::Map,
            _ => FieldId::Mat,
        }
    }

    pub fn graph_pos(&self) -> u8 {
        self.graph_pos
    }

    /// Process one input event
    ///
    /// Settings edits apply to `settings` immediately; the returned action
    /// tells the orchestrator whether to mark the store dirty or flush it.
    pub fn handle(&mut self, event: InputEvent, settings: &mut Settings) -> NavAction {
        match event {
            InputEvent::NextView => self.next_view(),
            InputEvent::Select => self.select(),
            InputEvent::Adjust(delta) => self.adjust(delta, settings),
        }
    }

    fn next_view(&mut self) -> NavAction {
        // View changes wait until the edit is closed
        if self.editing {
            return NavAction::None;
        }
        let leaving_settings = self.view == View::Settings;
        self.view = self.view.next();
        if leaving_settings {
            NavAction::SettingsClosed
        } else {
            NavAction::None
        }
    }

    fn select(&mut self) -> NavAction {
        if self.editing {
            // Edits applied as they happened; just leave edit mode
            self.editing = false;
            return NavAction::None;
        }
        if self.view != View::Settings {
            return NavAction::None;
        }
        match self.settings_row() {
            SettingsRow::Exit => {
                self.view = View::Dashboard;
                NavAction::SettingsClosed
            }
            _ => {
                self.editing = true;
                NavAction::None
            }
        }
    }

    fn adjust(&mut self, delta: i8, settings: &mut Settings) -> NavAction {
        if self.editing {
            let changed = match self.settings_row() {
                SettingsRow::Ring => settings.toggle_ring(),
                SettingsRow::ShiftRpm => settings.adjust_shift_rpm(delta),
                SettingsRow::Warnings => settings.toggle_warnings(),
                SettingsRow::CoolantWarn => settings.adjust_coolant_warning(delta),
                // Exit has no value; Select would not have entered editing
                SettingsRow::Exit => false,
            };
            return if changed {
                NavAction::SettingsEdited
            } else {
                NavAction::None
            };
        }

        match self.view {
            // No dedicated counter here: rotation cycles the view itself
            View::Dashboard => {
                self.view = View::from_index(wrap(self.view.index(), delta, NUM_VIEWS));
            }
            View::SingleGauge => self.gauge_pos = wrap(self.gauge_pos, delta, NUM_GAUGES),
            View::Graph => self.graph_pos = wrap(self.graph_pos, delta, NUM_GRAPHS),
            View::Settings => self.settings_pos = wrap(self.settings_pos, delta, NUM_SETTINGS_ROWS),
        }
        NavAction::None
    }
}

fn wrap(pos: u8, delta: i8, count: u8) -> u8 {
    (pos as i16 + delta as i16).rem_euclid(count as i16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_view_cycle() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();

        assert_eq!(nav.view(), View::Dashboard);
        nav.handle(InputEvent::NextView, &mut settings);
        assert_eq!(nav.view(), View::SingleGauge);
        nav.handle(InputEvent::NextView, &mut settings);
        assert_eq!(nav.view(), View::Graph);
        nav.handle(InputEvent::NextView, &mut settings);
        assert_eq!(nav.view(), View::Settings);
        let action = nav.handle(InputEvent::NextView, &mut settings);
        assert_eq!(nav.view(), View::Dashboard);
        assert_eq!(action, NavAction::SettingsClosed);
    }

    #[test]
    fn test_rotation_cycles_view_from_dashboard() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();

        nav.handle(InputEvent::Adjust(1), &mut settings);
        assert_eq!(nav.view(), View::SingleGauge);

        // Rotating the other way from Dashboard wraps to Settings
        let mut nav = NavState::new();
        nav.handle(InputEvent::Adjust(-1), &mut settings);
        assert_eq!(nav.view(), View::Settings);
    }

    #[test]
    fn test_rotation_in_gauge_view_stays_in_view() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();
        nav.handle(InputEvent::NextView, &mut settings);
        assert_eq!(nav.view(), View::SingleGauge);

        nav.handle(InputEvent::Adjust(1), &mut settings);
        assert_eq!(nav.view(), View::SingleGauge);
        assert_eq!(nav.gauge_pos(), 1);
    }

    #[test]
    fn test_gauge_index_wraps_both_directions() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();
        nav.handle(InputEvent::NextView, &mut settings);
        assert_eq!(nav.view(), View::SingleGauge);

        nav.handle(InputEvent::Adjust(-1), &mut settings);
        assert_eq!(nav.gauge_pos(), NUM_GAUGES - 1);
        nav.handle(InputEvent::Adjust(1), &mut settings);
        assert_eq!(nav.gauge_pos(), 0);
        assert_eq!(nav.gauge_field(), FieldId::Rpm);
    }

    #[test]
    fn test_settings_row_wraps() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();
        goto_settings(&mut nav, &mut settings);

        for _ in 0..4 {
            nav.handle(InputEvent::Adjust(1), &mut settings);
        }
        assert_eq!(nav.settings_row(), SettingsRow::Exit);
        nav.handle(InputEvent::Adjust(1), &mut settings);
        assert_eq!(nav.settings_row(), SettingsRow::Ring);
    }

    #[test]
    fn test_exit_row_returns_to_dashboard() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();
        goto_settings(&mut nav, &mut settings);

        nav.handle(InputEvent::Adjust(-1), &mut settings);
        assert_eq!(nav.settings_row(), SettingsRow::Exit);

        let action = nav.handle(InputEvent::Select, &mut settings);
        assert_eq!(action, NavAction::SettingsClosed);
        assert_eq!(nav.view(), View::Dashboard);
        assert!(!nav.is_editing());
    }

    #[test]
    fn test_edit_applies_immediately_and_marks_dirty() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();
        goto_settings(&mut nav, &mut settings);

        nav.handle(InputEvent::Adjust(1), &mut settings);
        assert_eq!(nav.settings_row(), SettingsRow::ShiftRpm);
        nav.handle(InputEvent::Select, &mut settings);
        assert!(nav.is_editing());

        let action = nav.handle(InputEvent::Adjust(1), &mut settings);
        assert_eq!(action, NavAction::SettingsEdited);
        assert_eq!(settings.shift_rpm, 6900);

        // Leaving edit mode keeps the value
        nav.handle(InputEvent::Select, &mut settings);
        assert!(!nav.is_editing());
        assert_eq!(settings.shift_rpm, 6900);
    }

    #[test]
    fn test_clamped_edit_is_not_a_change() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();
        settings.shift_rpm = crate::settings::SHIFT_RPM_MAX;
        goto_settings(&mut nav, &mut settings);

        nav.handle(InputEvent::Adjust(1), &mut settings);
        nav.handle(InputEvent::Select, &mut settings);
        let action = nav.handle(InputEvent::Adjust(1), &mut settings);

        assert_eq!(action, NavAction::None);
        assert_eq!(settings.shift_rpm, crate::settings::SHIFT_RPM_MAX);
    }

    #[test]
    fn test_next_view_ignored_while_editing() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();
        goto_settings(&mut nav, &mut settings);

        nav.handle(InputEvent::Select, &mut settings);
        assert!(nav.is_editing());

        nav.handle(InputEvent::NextView, &mut settings);
        assert_eq!(nav.view(), View::Settings);
        assert!(nav.is_editing());
    }

    #[test]
    fn test_select_outside_settings_is_inert() {
        let mut nav = NavState::new();
        let mut settings = Settings::new();

        let action = nav.handle(InputEvent::Select, &mut settings);
        assert_eq!(action, NavAction::None);
        assert_eq!(nav.view(), View::Dashboard);
        assert!(!nav.is_editing());
    }

    fn goto_settings(nav: &mut NavState, settings: &mut Settings) {
        for _ in 0..3 {
            nav.handle(InputEvent::NextView, settings);
        }
        assert_eq!(nav.view(), View::Settings);
    }

    fn arb_event() -> impl Strategy<Value = InputEvent> {
        prop_oneof![
            Just(InputEvent::NextView),
            Just(InputEvent::Select),
            (-3i8..=3).prop_map(InputEvent::Adjust),
        ]
    }

    proptest! {
        #[test]
        fn test_counters_stay_in_range(events in proptest::collection::vec(arb_event(), 0..200)) {
            let mut nav = NavState::new();
            let mut settings = Settings::new();

            for event in events {
                nav.handle(event, &mut settings);
                prop_assert!(nav.settings_pos() < NUM_SETTINGS_ROWS);
                prop_assert!(nav.gauge_pos() < NUM_GAUGES);
                prop_assert!(nav.graph_pos() < NUM_GRAPHS);
                prop_assert!(settings.shift_rpm >= crate::settings::SHIFT_RPM_MIN);
                prop_assert!(settings.shift_rpm <= crate::settings::SHIFT_RPM_MAX);
                prop_assert!(settings.coolant_warning >= crate::settings::COOLANT_WARN_MIN);
                prop_assert!(settings.coolant_warning <= crate::settings::COOLANT_WARN_MAX);
            }
        }
    }
}
