//! 24C02-family I2C EEPROM backend for the settings store

use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Timer;

use msgauge_core::traits::{EepromError, SettingsEeprom};

/// Fixed 24Cxx device address
const DEVICE_ADDR: u8 = 0x50;

/// Write page size of the 24C02
const PAGE_SIZE: usize = 8;

/// Internal write-cycle time
const WRITE_CYCLE_MS: u64 = 5;

/// Settings EEPROM on the second I2C bus
pub struct Eeprom24c {
    i2c: I2c<'static, I2C1, Async>,
}

impl Eeprom24c {
    pub fn new(i2c: I2c<'static, I2C1, Async>) -> Self {
        Self { i2c }
    }
}

impl SettingsEeprom for Eeprom24c {
    async fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), EepromError> {
        self.i2c
            .write_read_async(DEVICE_ADDR as u16, [addr], buffer)
            .await
            .map_err(|_| EepromError::Bus)
    }

    async fn write(&mut self, addr: u8, data: &[u8]) -> Result<(), EepromError> {
        // Writes must not cross a device page boundary; split on pages
        // and wait out the internal write cycle after each transaction.
        let mut offset = 0usize;
        while offset < data.len() {
            let dest = addr as usize + offset;
            let page_remaining = PAGE_SIZE - (dest % PAGE_SIZE);
            let chunk = page_remaining.min(data.len() - offset);

            let mut payload = [0u8; PAGE_SIZE + 1];
            payload[0] = dest as u8;
            payload[1..=chunk].copy_from_slice(&data[offset..offset + chunk]);

            self.i2c
                .write_async(DEVICE_ADDR as u16, payload[..=chunk].iter().copied())
                .await
                .map_err(|_| EepromError::Bus)?;

            Timer::after_millis(WRITE_CYCLE_MS).await;
            offset += chunk;
        }
        Ok(())
    }
}
