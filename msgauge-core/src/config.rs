//! Compiled-in device and timing configuration
//!
//! Persisted user settings live in [`crate::settings`]; everything here is
//! fixed at build time.

/// CAN device id of this gauge unit
pub const MY_CAN_ID: u8 = 10;

/// CAN device id of the engine controller (almost always 0)
pub const ECU_CAN_ID: u8 = 0;

/// Show the stale-data indicator after this long without a bus frame
pub const CAN_TIMEOUT_MS: u64 = 1000;

/// Display refresh interval
pub const DISPLAY_REFRESH_MS: u64 = 100;

/// One data-request window is transmitted per request tick
pub const REQUEST_INTERVAL_MS: u64 = 20;

/// Blink interval for ring pixels during warning conditions
pub const GAUGE_FLASH_MS: u64 = 50;

/// Button debounce time
pub const DEBOUNCE_MS: u64 = 25;

/// Button hold time that counts as a long press
pub const LONG_PRESS_MS: u64 = 500;

/// Number of LEDs on the ring
pub const NUM_RING_LEDS: usize = 16;
