//! Hardware abstraction traits
//!
//! Implemented by the firmware crate against real peripherals, and by
//! in-memory fakes in host tests.

/// Errors from settings EEPROM operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError {
    /// Bus transaction failed
    Bus,
    /// Address range falls outside the device
    OutOfRange,
}

/// Byte-addressed settings EEPROM
///
/// The settings record occupies a handful of bytes at the start of the
/// device. Implementations handle device addressing and write cycles;
/// callers see a flat byte array.
pub trait SettingsEeprom {
    /// Read `buffer.len()` bytes starting at `addr`
    fn read(
        &mut self,
        addr: u8,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<(), EepromError>>;

    /// Write `data` starting at `addr`
    fn write(
        &mut self,
        addr: u8,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), EepromError>>;
}
