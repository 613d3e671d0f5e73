//! Persisted user settings
//!
//! The record itself lives here; [`store`] handles the EEPROM image and
//! batched persistence. Edits from the settings menu apply to the live
//! record immediately and are flushed later in one pass.

pub mod store;

pub use store::{SettingsStore, SETTINGS_LEN, SETTINGS_VALID_MARKER};

/// Shift-light RPM adjustment range and step
pub const SHIFT_RPM_MIN: u16 = 5000;
pub const SHIFT_RPM_MAX: u16 = 9900;
pub const SHIFT_RPM_STEP: u16 = 100;

/// Coolant warning threshold range and step, whole degrees
pub const COOLANT_WARN_MIN: u16 = 100;
pub const COOLANT_WARN_MAX: u16 = 300;
pub const COOLANT_WARN_STEP: u16 = 10;

/// The complete user-adjustable settings record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// LED ring enabled
    pub ring_enabled: bool,
    /// Shift-light activation RPM
    pub shift_rpm: u16,
    /// Warning indicators enabled
    pub warnings_enabled: bool,
    /// Coolant over-temperature warning threshold, whole degrees
    pub coolant_warning: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Factory defaults, used when the EEPROM image is absent or invalid
    pub const fn new() -> Self {
        Self {
            ring_enabled: true,
            shift_rpm: 6800,
            warnings_enabled: true,
            coolant_warning: 240,
        }
    }

    /// Toggle the LED ring. Always a change.
    pub fn toggle_ring(&mut self) -> bool {
        self.ring_enabled = !self.ring_enabled;
        true
    }

    /// Toggle warning indicators. Always a change.
    pub fn toggle_warnings(&mut self) -> bool {
        self.warnings_enabled = !self.warnings_enabled;
        true
    }

    /// Step the shift RPM up or down, saturating at the range ends
    ///
    /// Returns true when the stored value actually changed.
    pub fn adjust_shift_rpm(&mut self, delta: i8) -> bool {
        let next = step(self.shift_rpm, delta, SHIFT_RPM_STEP, SHIFT_RPM_MIN, SHIFT_RPM_MAX);
        let changed = next != self.shift_rpm;
        self.shift_rpm = next;
        changed
    }

    /// Step the coolant warning threshold, saturating at the range ends
    pub fn adjust_coolant_warning(&mut self, delta: i8) -> bool {
        let next = step(
            self.coolant_warning,
            delta,
            COOLANT_WARN_STEP,
            COOLANT_WARN_MIN,
            COOLANT_WARN_MAX,
        );
        let changed = next != self.coolant_warning;
        self.coolant_warning = next;
        changed
    }
}

fn step(value: u16, delta: i8, step: u16, min: u16, max: u16) -> u16 {
    let moved = value as i32 + delta as i32 * step as i32;
    moved.clamp(min as i32, max as i32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::new();
        assert!(s.ring_enabled);
        assert_eq!(s.shift_rpm, 6800);
        assert!(s.warnings_enabled);
        assert_eq!(s.coolant_warning, 240);
    }

    #[test]
    fn test_shift_rpm_saturates() {
        let mut s = Settings::new();
        s.shift_rpm = SHIFT_RPM_MAX;
        assert!(!s.adjust_shift_rpm(1));
        assert_eq!(s.shift_rpm, SHIFT_RPM_MAX);

        s.shift_rpm = SHIFT_RPM_MIN;
        assert!(!s.adjust_shift_rpm(-1));
        assert_eq!(s.shift_rpm, SHIFT_RPM_MIN);

        assert!(s.adjust_shift_rpm(1));
        assert_eq!(s.shift_rpm, SHIFT_RPM_MIN + SHIFT_RPM_STEP);
    }

    #[test]
    fn test_coolant_caps_at_max_after_nine_steps() {
        let mut s = Settings::new();
        for _ in 0..9 {
            s.adjust_coolant_warning(1);
        }
        assert_eq!(s.coolant_warning, COOLANT_WARN_MAX);
        assert!(!s.adjust_coolant_warning(1));
        assert_eq!(s.coolant_warning, COOLANT_WARN_MAX);
    }

    #[test]
    fn test_toggles_report_change() {
        let mut s = Settings::new();
        assert!(s.toggle_ring());
        assert!(!s.ring_enabled);
        assert!(s.toggle_warnings());
        assert!(!s.warnings_enabled);
    }
}
