//! Session extrema tracking
//!
//! After each decoded frame the orchestrator runs one update pass. Extrema
//! are monotone for the session: highs only rise, the AFR low only falls.
//! They reset with the record itself at power-on, never mid-session.

use crate::telemetry::Telemetry;

/// Fold the current readings into the session extrema
pub fn update(t: &mut Telemetry) {
    t.rpm_highest = t.rpm_highest.max(t.rpm);
    t.map_highest = t.map_highest.max(t.map);
    t.clt_highest = t.clt_highest.max(t.clt);
    t.mat_highest = t.mat_highest.max(t.mat);
    t.knock_highest = t.knock_highest.max(t.knock);
    t.afr_highest = t.afr_highest.max(t.afr);
    t.afr_lowest = t.afr_lowest.min(t.afr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_becomes_extremum() {
        let mut t = Telemetry::new();
        t.rpm = 850;
        t.afr = 147;
        update(&mut t);

        assert_eq!(t.rpm_highest, 850);
        assert_eq!(t.afr_highest, 147);
        assert_eq!(t.afr_lowest, 147);
    }

    #[test]
    fn test_highs_only_rise() {
        let mut t = Telemetry::new();
        t.rpm = 6800;
        update(&mut t);
        t.rpm = 900;
        update(&mut t);

        assert_eq!(t.rpm_highest, 6800);
    }

    #[test]
    fn test_afr_low_only_falls() {
        let mut t = Telemetry::new();
        t.afr = 147;
        update(&mut t);
        t.afr = 118;
        update(&mut t);
        t.afr = 160;
        update(&mut t);

        assert_eq!(t.afr_lowest, 118);
        assert_eq!(t.afr_highest, 160);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut t = Telemetry::new();
        t.rpm = 3000;
        t.map = 1013;
        update(&mut t);
        let snapshot = t;
        update(&mut t);

        assert_eq!(t, snapshot);
    }
}
