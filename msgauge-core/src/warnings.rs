//! Warning and indicator evaluation
//!
//! Pure function of the telemetry and settings records, run each display
//! tick. Rendering and LED tasks consume the result; nothing here latches.

use crate::settings::Settings;
use crate::telemetry::Telemetry;

/// Active indicator outputs for one refresh tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicators {
    /// Engine speed at or past the shift point
    pub shift: bool,
    /// Coolant at or past the warning threshold
    pub coolant_hot: bool,
    /// Any check-engine lamp lit
    pub cel: bool,
}

impl Indicators {
    pub fn any(&self) -> bool {
        self.shift || self.coolant_hot || self.cel
    }
}

/// Evaluate all indicators
///
/// Coolant telemetry is in tenths of a degree while the threshold setting
/// is whole degrees. The warnings-enable setting gates the coolant and CEL
/// indicators; the shift light follows only the ring-enable setting, which
/// the LED task applies.
pub fn evaluate(t: &Telemetry, s: &Settings) -> Indicators {
    Indicators {
        shift: t.rpm >= s.shift_rpm,
        coolant_hot: s.warnings_enabled && t.clt >= s.coolant_warning * 10,
        cel: s.warnings_enabled && t.any_cel(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::FlagId;

    #[test]
    fn test_shift_point() {
        let mut t = Telemetry::new();
        let s = Settings::new();

        t.rpm = 6799;
        assert!(!evaluate(&t, &s).shift);
        t.rpm = 6800;
        assert!(evaluate(&t, &s).shift);
    }

    #[test]
    fn test_coolant_threshold_unit_conversion() {
        let mut t = Telemetry::new();
        let s = Settings::new();

        // Threshold 240 degrees against telemetry in tenths
        t.clt = 2399;
        assert!(!evaluate(&t, &s).coolant_hot);
        t.clt = 2400;
        assert!(evaluate(&t, &s).coolant_hot);
    }

    #[test]
    fn test_warnings_disable_gates_coolant_and_cel() {
        let mut t = Telemetry::new();
        t.clt = 9999;
        t.set_flag(FlagId::CelClt, true);
        t.rpm = 9000;

        let mut s = Settings::new();
        s.warnings_enabled = false;

        let ind = evaluate(&t, &s);
        assert!(!ind.coolant_hot);
        assert!(!ind.cel);
        // Shift light is not a warning
        assert!(ind.shift);
    }

    #[test]
    fn test_any() {
        assert!(!Indicators::default().any());
        let ind = Indicators {
            cel: true,
            ..Default::default()
        };
        assert!(ind.any());
    }
}
