//! Fixed field and flag descriptor tables
//!
//! The tables are build-time data: one row per numeric field describing
//! where it lives in the ECU's realtime data block, and one row per status
//! flag naming a (status byte, bit) position. Row order is declaration
//! order and is the scan order of the decoder.

use crate::telemetry::{FieldId, FlagId};

/// Realtime data lives in this block
pub const REALTIME_BLOCK: u8 = 7;

/// Maximum size of a data block in bytes
pub const MAX_BLOCK_SIZE: u16 = 512;

/// Display scaling for a field's raw integral value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scale {
    /// Value is used directly
    Raw,
    /// Value is in tenths; rendered with one decimal place
    Tenths,
}

/// Locates and interprets one numeric field within a block
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldDescriptor {
    pub id: FieldId,
    /// Source block
    pub block: u8,
    /// Byte offset within the block
    pub offset: u16,
    /// Byte width, 1 or 2
    pub width: u8,
    /// Display scaling
    pub scale: Scale,
    /// Big-endian signed interpretation
    pub signed: bool,
}

/// The eight semantic status bytes of the realtime block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusByte {
    Engine,
    Status1,
    Status2,
    Status3,
    Cel,
    Port,
    Status6,
    Status7,
}

impl StatusByte {
    /// Block the status bytes live in
    pub fn block(self) -> u8 {
        REALTIME_BLOCK
    }

    /// Byte offset within the block
    pub fn offset(self) -> u16 {
        match self {
            StatusByte::Engine => 11,
            StatusByte::Status1 => 78,
            StatusByte::Status2 => 79,
            StatusByte::Status3 => 80,
            StatusByte::Cel => 425,
            StatusByte::Port => 70,
            StatusByte::Status6 => 233,
            StatusByte::Status7 => 351,
        }
    }
}

/// Locates one boolean flag within a status byte
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlagDescriptor {
    pub id: FlagId,
    pub byte: StatusByte,
    /// Bit position, 0-7
    pub bit: u8,
}

const fn field(id: FieldId, offset: u16, width: u8, scale: Scale) -> FieldDescriptor {
    FieldDescriptor {
        id,
        block: REALTIME_BLOCK,
        offset,
        width,
        scale,
        signed: matches!(id, FieldId::Afr | FieldId::AfrTarget),
    }
}

const fn flag(id: FlagId, byte: StatusByte, bit: u8) -> FlagDescriptor {
    FlagDescriptor { id, byte, bit }
}

/// Every numeric field, in scan order
pub static FIELD_TABLE: [FieldDescriptor; 16] = [
    field(FieldId::Rpm, 6, 2, Scale::Raw),
    field(FieldId::Afr, 252, 1, Scale::Raw),
    field(FieldId::Clt, 22, 2, Scale::Tenths),
    field(FieldId::Map, 18, 2, Scale::Tenths),
    field(FieldId::Mat, 20, 2, Scale::Tenths),
    field(FieldId::SparkAdv, 8, 2, Scale::Tenths),
    field(FieldId::BattV, 26, 2, Scale::Tenths),
    field(FieldId::Tps, 24, 2, Scale::Tenths),
    field(FieldId::Knock, 32, 2, Scale::Tenths),
    field(FieldId::Baro, 16, 2, Scale::Tenths),
    field(FieldId::EgoCorr, 34, 2, Scale::Tenths),
    field(FieldId::Iac, 54, 2, Scale::Raw),
    field(FieldId::Dwell, 62, 2, Scale::Tenths),
    field(FieldId::BoostDuty, 39, 1, Scale::Raw),
    field(FieldId::IdleTarget, 380, 2, Scale::Raw),
    field(FieldId::AfrTarget, 12, 1, Scale::Tenths),
];

/// Every status flag, in scan order
///
/// Two rows intentionally alias one bit (RevLimit/Launch on Status2 bit 2,
/// and the pair of IdleVe rows on Status6); the aliases are part of the
/// table and are kept, not deduplicated.
pub static FLAG_TABLE: [FlagDescriptor; 50] = [
    // Engine phase
    flag(FlagId::Ready, StatusByte::Engine, 0),
    flag(FlagId::Crank, StatusByte::Engine, 1),
    flag(FlagId::Ase, StatusByte::Engine, 2),
    flag(FlagId::Wue, StatusByte::Engine, 3),
    flag(FlagId::TpsAccel, StatusByte::Engine, 4),
    flag(FlagId::TpsDecel, StatusByte::Engine, 5),
    flag(FlagId::MapAccel, StatusByte::Engine, 6),
    flag(FlagId::MapDecel, StatusByte::Engine, 7),
    // Status 1
    flag(FlagId::NeedBurn, StatusByte::Status1, 0),
    flag(FlagId::DataLost, StatusByte::Status1, 1),
    flag(FlagId::ConfigError, StatusByte::Status1, 2),
    flag(FlagId::Synced, StatusByte::Status1, 3),
    flag(FlagId::VeTable2, StatusByte::Status1, 5),
    flag(FlagId::SparkTable2, StatusByte::Status1, 6),
    flag(FlagId::FullSync, StatusByte::Status1, 7),
    // Status 2
    flag(FlagId::Nitrous1, StatusByte::Status2, 0),
    flag(FlagId::Nitrous2, StatusByte::Status2, 1),
    flag(FlagId::RevLimit, StatusByte::Status2, 2),
    flag(FlagId::Launch, StatusByte::Status2, 2),
    flag(FlagId::FlatShift, StatusByte::Status2, 4),
    flag(FlagId::SparkCut, StatusByte::Status2, 5),
    flag(FlagId::OverBoost, StatusByte::Status2, 6),
    flag(FlagId::ClosedLoopIdle, StatusByte::Status2, 7),
    // Status 3
    flag(FlagId::FuelCut, StatusByte::Status3, 0),
    flag(FlagId::SoftLimit, StatusByte::Status3, 5),
    flag(FlagId::Launch, StatusByte::Status3, 7),
    // Check-engine lamps
    flag(FlagId::CelMap, StatusByte::Cel, 0),
    flag(FlagId::CelMat, StatusByte::Cel, 1),
    flag(FlagId::CelClt, StatusByte::Cel, 2),
    flag(FlagId::CelTps, StatusByte::Cel, 3),
    flag(FlagId::CelBatt, StatusByte::Cel, 4),
    flag(FlagId::CelAfr, StatusByte::Cel, 5),
    flag(FlagId::CelSync, StatusByte::Cel, 6),
    flag(FlagId::CelEgt, StatusByte::Cel, 7),
    // Port status
    flag(FlagId::Port0, StatusByte::Port, 0),
    flag(FlagId::Port1, StatusByte::Port, 1),
    flag(FlagId::Port2, StatusByte::Port, 2),
    flag(FlagId::Port3, StatusByte::Port, 3),
    flag(FlagId::Port4, StatusByte::Port, 4),
    flag(FlagId::Port5, StatusByte::Port, 5),
    flag(FlagId::Port6, StatusByte::Port, 6),
    // Status 6
    flag(FlagId::EgtWarn, StatusByte::Status6, 0),
    flag(FlagId::EgtShutdown, StatusByte::Status6, 1),
    flag(FlagId::AfrWarn, StatusByte::Status6, 2),
    flag(FlagId::AfrShutdown, StatusByte::Status6, 3),
    flag(FlagId::IdleVe, StatusByte::Status6, 4),
    flag(FlagId::IdleVe, StatusByte::Status6, 5),
    flag(FlagId::Fan, StatusByte::Status6, 6),
    // Status 7
    flag(FlagId::KnockFlag, StatusByte::Status7, 4),
    flag(FlagId::Ac, StatusByte::Status7, 5),
];

/// Iterate the field descriptors in declaration order
pub fn for_each_field() -> impl Iterator<Item = &'static FieldDescriptor> {
    FIELD_TABLE.iter()
}

/// Iterate the flag descriptors in declaration order
pub fn for_each_flag() -> impl Iterator<Item = &'static FlagDescriptor> {
    FLAG_TABLE.iter()
}

/// Look up the descriptor for one field
pub fn descriptor(id: FieldId) -> &'static FieldDescriptor {
    // Table covers every FieldId; the completeness test below guards this.
    FIELD_TABLE
        .iter()
        .find(|d| d.id == id)
        .unwrap_or(&FIELD_TABLE[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_offsets_within_block() {
        for desc in for_each_field() {
            assert!(desc.width == 1 || desc.width == 2, "{:?}", desc.id);
            assert!(
                desc.offset + desc.width as u16 <= MAX_BLOCK_SIZE,
                "{:?} exceeds block size",
                desc.id
            );
        }
    }

    #[test]
    fn test_status_bytes_within_block() {
        for desc in for_each_flag() {
            assert!(desc.bit < 8);
            assert!(desc.byte.offset() < MAX_BLOCK_SIZE);
        }
    }

    #[test]
    fn test_every_field_has_a_descriptor() {
        use crate::telemetry::FieldId::*;
        let all = [
            Rpm, Afr, Clt, Map, Mat, SparkAdv, BattV, Tps, Knock, Baro, EgoCorr, Iac, Dwell,
            BoostDuty, IdleTarget, AfrTarget,
        ];
        for id in all {
            assert_eq!(descriptor(id).id, id);
        }
    }

    #[test]
    fn test_signed_designation() {
        for desc in for_each_field() {
            let expect = matches!(
                desc.id,
                crate::telemetry::FieldId::Afr | crate::telemetry::FieldId::AfrTarget
            );
            assert_eq!(desc.signed, expect, "{:?}", desc.id);
        }
    }

    #[test]
    fn test_aliased_bits_are_preserved() {
        let status2_bit2: heapless::Vec<_, 4> = FLAG_TABLE
            .iter()
            .filter(|d| d.byte == StatusByte::Status2 && d.bit == 2)
            .map(|d| d.id)
            .collect();
        assert_eq!(status2_bit2.len(), 2);

        let idle_ve_rows = FLAG_TABLE
            .iter()
            .filter(|d| matches!(d.id, crate::telemetry::FlagId::IdleVe))
            .count();
        assert_eq!(idle_ve_rows, 2);
    }
}
