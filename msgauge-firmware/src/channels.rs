//! Inter-task communication channels
//!
//! Static embassy-sync primitives wiring the bus, input, orchestrator,
//! and LED ring tasks together. Interrupt-adjacent tasks only enqueue
//! here; all record mutation happens in the orchestrator.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use msgauge_core::nav::InputEvent;
use msgauge_protocol::DataFrame;

/// Channel capacity for operator input events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for accepted bus frames
const FRAME_CHANNEL_SIZE: usize = 16;

/// Debounced encoder/button events from the input task
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Classified data frames from the CAN task
pub static FRAME_CHANNEL: Channel<CriticalSectionRawMutex, DataFrame, FRAME_CHANNEL_SIZE> =
    Channel::new();

/// LED ring state (updated by the orchestrator each refresh tick)
pub static RING_STATE: Signal<CriticalSectionRawMutex, RingState> = Signal::new();

/// What the LED ring should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingState {
    /// Ring enabled in settings
    pub enabled: bool,
    /// Current engine speed
    pub rpm: u16,
    /// Shift-light activation point
    pub shift_rpm: u16,
    /// Flash the whole ring (active warning)
    pub alarm: bool,
}
