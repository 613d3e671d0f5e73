//! Decoded engine telemetry
//!
//! One flat record shared by the decoder, extrema tracker, navigation
//! machine (alarm checks), and display rendering. The orchestrator owns
//! the single instance; the decoder and extrema tracker are its only
//! writers. Never persisted.

/// Identifies one numeric telemetry field
///
/// Raw table indices stop at the decoding boundary; everything past it is
/// addressed through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldId {
    /// Engine speed (RPM)
    Rpm,
    /// Air-fuel ratio, tenths (signed)
    Afr,
    /// Coolant temperature, tenths of a degree
    Clt,
    /// Manifold absolute pressure, tenths of a kPa
    Map,
    /// Manifold air temperature, tenths of a degree
    Mat,
    /// Ignition timing advance, tenths of a degree
    SparkAdv,
    /// Battery voltage, tenths of a volt
    BattV,
    /// Throttle position, tenths of a percent
    Tps,
    /// Knock sensor level, tenths
    Knock,
    /// Barometric pressure, tenths of a kPa
    Baro,
    /// EGO correction, tenths of a percent
    EgoCorr,
    /// Idle air control position
    Iac,
    /// Spark dwell, tenths of a millisecond
    Dwell,
    /// Boost controller duty cycle, percent
    BoostDuty,
    /// Closed-loop idle target RPM
    IdleTarget,
    /// Air-fuel ratio target, tenths (signed)
    AfrTarget,
}

/// Identifies one boolean status flag
///
/// Some flags are intentionally aliased onto the same status bit in the
/// flag table; each name still has its own field in [`Telemetry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlagId {
    // Engine phase byte
    Ready,
    Crank,
    Ase,
    Wue,
    TpsAccel,
    TpsDecel,
    MapAccel,
    MapDecel,
    // Status 1
    NeedBurn,
    DataLost,
    ConfigError,
    Synced,
    VeTable2,
    SparkTable2,
    FullSync,
    // Status 2
    Nitrous1,
    Nitrous2,
    RevLimit,
    Launch,
    FlatShift,
    SparkCut,
    OverBoost,
    ClosedLoopIdle,
    // Status 3
    FuelCut,
    SoftLimit,
    // Check-engine lamps
    CelMap,
    CelMat,
    CelClt,
    CelTps,
    CelBatt,
    CelAfr,
    CelSync,
    CelEgt,
    // Port status
    Port0,
    Port1,
    Port2,
    Port3,
    Port4,
    Port5,
    Port6,
    // Status 6
    EgtWarn,
    EgtShutdown,
    AfrWarn,
    AfrShutdown,
    IdleVe,
    Fan,
    // Status 7
    KnockFlag,
    Ac,
}

/// All decoded engine values, status flags, and session extrema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Telemetry {
    pub rpm: u16,
    pub clt: u16,
    pub map: u16,
    pub mat: u16,
    pub spark_adv: u16,
    pub batt_v: u16,
    pub tps: u16,
    pub knock: u16,
    pub baro: u16,
    pub ego_corr: u16,
    pub iac: u16,
    pub dwell: u16,
    pub boost_duty: u16,
    pub idle_target: u16,
    pub afr: i16,
    pub afr_target: i16,

    // Session extrema - written only by the extrema tracker
    pub rpm_highest: u16,
    pub map_highest: u16,
    pub clt_highest: u16,
    pub mat_highest: u16,
    pub knock_highest: u16,
    pub afr_highest: i16,
    pub afr_lowest: i16,

    // Engine phase
    pub ready: bool,
    pub crank: bool,
    pub ase: bool,
    pub wue: bool,
    pub tps_accel: bool,
    pub tps_decel: bool,
    pub map_accel: bool,
    pub map_decel: bool,
    // Status 1
    pub need_burn: bool,
    pub data_lost: bool,
    pub config_error: bool,
    pub synced: bool,
    pub ve_table_2: bool,
    pub spark_table_2: bool,
    pub full_sync: bool,
    // Status 2
    pub nitrous_1: bool,
    pub nitrous_2: bool,
    pub rev_limit: bool,
    pub launch: bool,
    pub flat_shift: bool,
    pub spark_cut: bool,
    pub over_boost: bool,
    pub closed_loop_idle: bool,
    // Status 3
    pub fuel_cut: bool,
    pub soft_limit: bool,
    // Check-engine lamps
    pub cel_map: bool,
    pub cel_mat: bool,
    pub cel_clt: bool,
    pub cel_tps: bool,
    pub cel_batt: bool,
    pub cel_afr: bool,
    pub cel_sync: bool,
    pub cel_egt: bool,
    // Port status
    pub port0: bool,
    pub port1: bool,
    pub port2: bool,
    pub port3: bool,
    pub port4: bool,
    pub port5: bool,
    pub port6: bool,
    // Status 6
    pub egt_warn: bool,
    pub egt_shutdown: bool,
    pub afr_warn: bool,
    pub afr_shutdown: bool,
    pub idle_ve: bool,
    pub fan: bool,
    // Status 7
    pub knock_flag: bool,
    pub ac: bool,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    /// Create a fresh record
    ///
    /// Extrema initialize to the opposite end of their range so the first
    /// real sample always becomes the initial extremum.
    pub const fn new() -> Self {
        Self {
            rpm: 0,
            clt: 0,
            map: 0,
            mat: 0,
            spark_adv: 0,
            batt_v: 0,
            tps: 0,
            knock: 0,
            baro: 0,
            ego_corr: 0,
            iac: 0,
            dwell: 0,
            boost_duty: 0,
            idle_target: 0,
            afr: 0,
            afr_target: 0,

            rpm_highest: u16::MIN,
            map_highest: u16::MIN,
            clt_highest: u16::MIN,
            mat_highest: u16::MIN,
            knock_highest: u16::MIN,
            afr_highest: i16::MIN,
            afr_lowest: i16::MAX,

            ready: false,
            crank: false,
            ase: false,
            wue: false,
            tps_accel: false,
            tps_decel: false,
            map_accel: false,
            map_decel: false,
            need_burn: false,
            data_lost: false,
            config_error: false,
            synced: false,
            ve_table_2: false,
            spark_table_2: false,
            full_sync: false,
            nitrous_1: false,
            nitrous_2: false,
            rev_limit: false,
            launch: false,
            flat_shift: false,
            spark_cut: false,
            over_boost: false,
            closed_loop_idle: false,
            fuel_cut: false,
            soft_limit: false,
            cel_map: false,
            cel_mat: false,
            cel_clt: false,
            cel_tps: false,
            cel_batt: false,
            cel_afr: false,
            cel_sync: false,
            cel_egt: false,
            port0: false,
            port1: false,
            port2: false,
            port3: false,
            port4: false,
            port5: false,
            port6: false,
            egt_warn: false,
            egt_shutdown: false,
            afr_warn: false,
            afr_shutdown: false,
            idle_ve: false,
            fan: false,
            knock_flag: false,
            ac: false,
        }
    }

    /// Store a decoded field value
    ///
    /// Unsigned fields take the low 16 bits; the signed AFR fields take a
    /// signed 16-bit interpretation. The decoder is the only caller.
    pub fn set_field(&mut self, id: FieldId, value: i32) {
        match id {
            FieldId::Rpm => self.rpm = value as u16,
            FieldId::Clt => self.clt = value as u16,
            FieldId::Map => self.map = value as u16,
            FieldId::Mat => self.mat = value as u16,
            FieldId::SparkAdv => self.spark_adv = value as u16,
            FieldId::BattV => self.batt_v = value as u16,
            FieldId::Tps => self.tps = value as u16,
            FieldId::Knock => self.knock = value as u16,
            FieldId::Baro => self.baro = value as u16,
            FieldId::EgoCorr => self.ego_corr = value as u16,
            FieldId::Iac => self.iac = value as u16,
            FieldId::Dwell => self.dwell = value as u16,
            FieldId::BoostDuty => self.boost_duty = value as u16,
            FieldId::IdleTarget => self.idle_target = value as u16,
            FieldId::Afr => self.afr = value as i16,
            FieldId::AfrTarget => self.afr_target = value as i16,
        }
    }

    /// Read a field value, widened to i32
    pub fn field(&self, id: FieldId) -> i32 {
        match id {
            FieldId::Rpm => self.rpm as i32,
            FieldId::Clt => self.clt as i32,
            FieldId::Map => self.map as i32,
            FieldId::Mat => self.mat as i32,
            FieldId::SparkAdv => self.spark_adv as i32,
            FieldId::BattV => self.batt_v as i32,
            FieldId::Tps => self.tps as i32,
            FieldId::Knock => self.knock as i32,
            FieldId::Baro => self.baro as i32,
            FieldId::EgoCorr => self.ego_corr as i32,
            FieldId::Iac => self.iac as i32,
            FieldId::Dwell => self.dwell as i32,
            FieldId::BoostDuty => self.boost_duty as i32,
            FieldId::IdleTarget => self.idle_target as i32,
            FieldId::Afr => self.afr as i32,
            FieldId::AfrTarget => self.afr_target as i32,
        }
    }

    /// Store a decoded status flag
    pub fn set_flag(&mut self, id: FlagId, value: bool) {
        match id {
            FlagId::Ready => self.ready = value,
            FlagId::Crank => self.crank = value,
            FlagId::Ase => self.ase = value,
            FlagId::Wue => self.wue = value,
            FlagId::TpsAccel => self.tps_accel = value,
            FlagId::TpsDecel => self.tps_decel = value,
            FlagId::MapAccel => self.map_accel = value,
            FlagId::MapDecel => self.map_decel = value,
            FlagId::NeedBurn => self.need_burn = value,
            FlagId::DataLost => self.data_lost = value,
            FlagId::ConfigError => self.config_error = value,
            FlagId::Synced => self.synced = value,
            FlagId::VeTable2 => self.ve_table_2 = value,
            FlagId::SparkTable2 => self.spark_table_2 = value,
            FlagId::FullSync => self.full_sync = value,
            FlagId::Nitrous1 => self.nitrous_1 = value,
            FlagId::Nitrous2 => self.nitrous_2 = value,
            FlagId::RevLimit => self.rev_limit = value,
            FlagId::Launch => self.launch = value,
            FlagId::FlatShift => self.flat_shift = value,
            FlagId::SparkCut => self.spark_cut = value,
            FlagId::OverBoost => self.over_boost = value,
            FlagId::ClosedLoopIdle => self.closed_loop_idle = value,
            FlagId::FuelCut => self.fuel_cut = value,
            FlagId::SoftLimit => self.soft_limit = value,
            FlagId::CelMap => self.cel_map = value,
            FlagId::CelMat => self.cel_mat = value,
            FlagId::CelClt => self.cel_clt = value,
            FlagId::CelTps => self.cel_tps = value,
            FlagId::CelBatt => self.cel_batt = value,
            FlagId::CelAfr => self.cel_afr = value,
            FlagId::CelSync => self.cel_sync = value,
            FlagId::CelEgt => self.cel_egt = value,
            FlagId::Port0 => self.port0 = value,
            FlagId::Port1 => self.port1 = value,
            FlagId::Port2 => self.port2 = value,
            FlagId::Port3 => self.port3 = value,
            FlagId::Port4 => self.port4 = value,
            FlagId::Port5 => self.port5 = value,
            FlagId::Port6 => self.port6 = value,
            FlagId::EgtWarn => self.egt_warn = value,
            FlagId::EgtShutdown => self.egt_shutdown = value,
            FlagId::AfrWarn => self.afr_warn = value,
            FlagId::AfrShutdown => self.afr_shutdown = value,
            FlagId::IdleVe => self.idle_ve = value,
            FlagId::Fan => self.fan = value,
            FlagId::KnockFlag => self.knock_flag = value,
            FlagId::Ac => self.ac = value,
        }
    }

    /// Read a status flag
    pub fn flag(&self, id: FlagId) -> bool {
        match id {
            FlagId::Ready => self.ready,
            FlagId::Crank => self.crank,
            FlagId::Ase => self.ase,
            FlagId::Wue => self.wue,
            FlagId::TpsAccel => self.tps_accel,
            FlagId::TpsDecel => self.tps_decel,
            FlagId::MapAccel => self.map_accel,
            FlagId::MapDecel => self.map_decel,
            FlagId::NeedBurn => self.need_burn,
            FlagId::DataLost => self.data_lost,
            FlagId::ConfigError => self.config_error,
            FlagId::Synced => self.synced,
            FlagId::VeTable2 => self.ve_table_2,
            FlagId::SparkTable2 => self.spark_table_2,
            FlagId::FullSync => self.full_sync,
            FlagId::Nitrous1 => self.nitrous_1,
            FlagId::Nitrous2 => self.nitrous_2,
            FlagId::RevLimit => self.rev_limit,
            FlagId::Launch => self.launch,
            FlagId::FlatShift => self.flat_shift,
            FlagId::SparkCut => self.spark_cut,
            FlagId::OverBoost => self.over_boost,
            FlagId::ClosedLoopIdle => self.closed_loop_idle,
            FlagId::FuelCut => self.fuel_cut,
            FlagId::SoftLimit => self.soft_limit,
            FlagId::CelMap => self.cel_map,
            FlagId::CelMat => self.cel_mat,
            FlagId::CelClt => self.cel_clt,
            FlagId::CelTps => self.cel_tps,
            FlagId::CelBatt => self.cel_batt,
            FlagId::CelAfr => self.cel_afr,
            FlagId::CelSync => self.cel_sync,
            FlagId::CelEgt => self.cel_egt,
            FlagId::Port0 => self.port0,
            FlagId::Port1 => self.port1,
            FlagId::Port2 => self.port2,
            FlagId::Port3 => self.port3,
            FlagId::Port4 => self.port4,
            FlagId::Port5 => self.port5,
            FlagId::Port6 => self.port6,
            FlagId::EgtWarn => self.egt_warn,
            FlagId::EgtShutdown => self.egt_shutdown,
            FlagId::AfrWarn => self.afr_warn,
            FlagId::AfrShutdown => self.afr_shutdown,
            FlagId::IdleVe => self.idle_ve,
            FlagId::Fan => self.fan,
            FlagId::KnockFlag => self.knock_flag,
            FlagId::Ac => self.ac,
        }
    }

    /// True if any check-engine lamp is lit
    pub fn any_cel(&self) -> bool {
        self.cel_map
            || self.cel_mat
            || self.cel_clt
            || self.cel_tps
            || self.cel_batt
            || self.cel_afr
            || self.cel_sync
            || self.cel_egt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extrema_initialization() {
        let t = Telemetry::new();
        assert_eq!(t.rpm_highest, u16::MIN);
        assert_eq!(t.knock_highest, u16::MIN);
        assert_eq!(t.afr_highest, i16::MIN);
        assert_eq!(t.afr_lowest, i16::MAX);
    }

    #[test]
    fn test_signed_field_interpretation() {
        let mut t = Telemetry::new();
        t.set_field(FieldId::Afr, -5);
        assert_eq!(t.afr, -5);
        assert_eq!(t.field(FieldId::Afr), -5);
    }

    #[test]
    fn test_any_cel() {
        let mut t = Telemetry::new();
        assert!(!t.any_cel());
        t.set_flag(FlagId::CelClt, true);
        assert!(t.any_cel());
        t.set_flag(FlagId::CelClt, false);
        assert!(!t.any_cel());
    }
}
