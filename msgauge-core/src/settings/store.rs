//! EEPROM-backed settings persistence
//!
//! The on-device image is a fixed 7-byte record headed by a validity
//! marker. A wrong marker (fresh chip, erased chip, older layout) means
//! the whole image is untrusted: the store falls back to defaults and
//! rewrites the image once.
//!
//! Writes are batched. Menu edits mark the store dirty; the orchestrator
//! calls [`SettingsStore::flush`] when the user leaves the settings view,
//! so a burst of encoder clicks costs one EEPROM write cycle.

use crate::traits::{EepromError, SettingsEeprom};

use super::{
    Settings, COOLANT_WARN_MAX, COOLANT_WARN_MIN, SHIFT_RPM_MAX, SHIFT_RPM_MIN,
};

/// Marker byte stored at address 0 when the image is valid
pub const SETTINGS_VALID_MARKER: u8 = 13;

/// Size of the on-device image in bytes
pub const SETTINGS_LEN: usize = 7;

const ADDR_BASE: u8 = 0;

/// Settings persistence over a byte-addressed EEPROM
pub struct SettingsStore<E> {
    eeprom: E,
    dirty: bool,
}

impl<E: SettingsEeprom> SettingsStore<E> {
    pub fn new(eeprom: E) -> Self {
        Self {
            eeprom,
            dirty: false,
        }
    }

    /// Load settings from the device
    ///
    /// An invalid marker yields factory defaults, which are written back
    /// immediately so the next boot finds a valid image.
    pub async fn load(&mut self) -> Result<Settings, EepromError> {
        let mut image = [0u8; SETTINGS_LEN];
        self.eeprom.read(ADDR_BASE, &mut image).await?;

        if image[0] != SETTINGS_VALID_MARKER {
            let defaults = Settings::new();
            // Best effort; defaults still apply if the rewrite fails
            let _ = self.eeprom.write(ADDR_BASE, &encode(&defaults)).await;
            self.dirty = false;
            return Ok(defaults);
        }

        Ok(decode(&image))
    }

    /// Record that the live settings differ from the stored image
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the record if dirty; returns whether a write happened
    pub async fn flush(&mut self, settings: &Settings) -> Result<bool, EepromError> {
        if !self.dirty {
            return Ok(false);
        }
        self.eeprom.write(ADDR_BASE, &encode(settings)).await?;
        self.dirty = false;
        Ok(true)
    }
}

fn encode(settings: &Settings) -> [u8; SETTINGS_LEN] {
    let shift = settings.shift_rpm.to_le_bytes();
    let coolant = settings.coolant_warning.to_le_bytes();
    [
        SETTINGS_VALID_MARKER,
        settings.ring_enabled as u8,
        shift[0],
        shift[1],
        settings.warnings_enabled as u8,
        coolant[0],
        coolant[1],
    ]
}

fn decode(image: &[u8; SETTINGS_LEN]) -> Settings {
    let shift = u16::from_le_bytes([image[2], image[3]]);
    let coolant = u16::from_le_bytes([image[5], image[6]]);
    // Out-of-range stored values are pulled back into range rather than
    // rejected; the marker already vouched for the image as a whole.
    Settings {
        ring_enabled: image[1] != 0,
        shift_rpm: shift.clamp(SHIFT_RPM_MIN, SHIFT_RPM_MAX),
        warnings_enabled: image[4] != 0,
        coolant_warning: coolant.clamp(COOLANT_WARN_MIN, COOLANT_WARN_MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    /// In-memory EEPROM fake that counts write transactions
    struct FakeEeprom {
        cells: [u8; 32],
        writes: usize,
    }

    impl FakeEeprom {
        fn blank() -> Self {
            Self {
                cells: [0xFF; 32],
                writes: 0,
            }
        }

        fn with_image(image: &[u8; SETTINGS_LEN]) -> Self {
            let mut fake = Self::blank();
            fake.cells[..SETTINGS_LEN].copy_from_slice(image);
            fake
        }
    }

    impl SettingsEeprom for FakeEeprom {
        async fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), EepromError> {
            let start = addr as usize;
            buffer.copy_from_slice(&self.cells[start..start + buffer.len()]);
            Ok(())
        }

        async fn write(&mut self, addr: u8, data: &[u8]) -> Result<(), EepromError> {
            let start = addr as usize;
            self.cells[start..start + data.len()].copy_from_slice(data);
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_blank_device_yields_defaults_and_writes_image() {
        let mut store = SettingsStore::new(FakeEeprom::blank());
        let settings = block_on(store.load()).unwrap();

        assert_eq!(settings, Settings::new());
        assert_eq!(store.eeprom.writes, 1);
        assert_eq!(store.eeprom.cells[0], SETTINGS_VALID_MARKER);
    }

    #[test]
    fn test_roundtrip_through_device() {
        let mut settings = Settings::new();
        settings.toggle_ring();
        settings.adjust_shift_rpm(3);

        let mut store = SettingsStore::new(FakeEeprom::with_image(&encode(&settings)));
        let loaded = block_on(store.load()).unwrap();

        assert_eq!(loaded, settings);
        assert_eq!(store.eeprom.writes, 0);
    }

    #[test]
    fn test_flush_only_when_dirty() {
        let mut store = SettingsStore::new(FakeEeprom::blank());
        let settings = block_on(store.load()).unwrap();

        assert!(!block_on(store.flush(&settings)).unwrap());
        assert_eq!(store.eeprom.writes, 1);

        store.mark_dirty();
        assert!(block_on(store.flush(&settings)).unwrap());
        assert!(!store.is_dirty());
        assert_eq!(store.eeprom.writes, 2);

        // A second flush without new edits is free
        assert!(!block_on(store.flush(&settings)).unwrap());
        assert_eq!(store.eeprom.writes, 2);
    }

    #[test]
    fn test_batched_edits_cost_one_write() {
        let mut store = SettingsStore::new(FakeEeprom::blank());
        let mut settings = block_on(store.load()).unwrap();

        for _ in 0..5 {
            if settings.adjust_shift_rpm(1) {
                store.mark_dirty();
            }
        }
        block_on(store.flush(&settings)).unwrap();

        assert_eq!(store.eeprom.writes, 2);
        let reloaded = block_on(store.load()).unwrap();
        assert_eq!(reloaded.shift_rpm, 6800 + 500);
    }

    #[test]
    fn test_out_of_range_image_is_clamped() {
        let mut image = encode(&Settings::new());
        image[2..4].copy_from_slice(&20000u16.to_le_bytes());
        image[5..7].copy_from_slice(&1u16.to_le_bytes());

        let mut store = SettingsStore::new(FakeEeprom::with_image(&image));
        let loaded = block_on(store.load()).unwrap();

        assert_eq!(loaded.shift_rpm, SHIFT_RPM_MAX);
        assert_eq!(loaded.coolant_warning, COOLANT_WARN_MIN);
    }
}
