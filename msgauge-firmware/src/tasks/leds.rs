//! WS2812 LED ring task
//!
//! Renders the RPM sweep and warning flashes on the 16-pixel ring.
//! Receives a compact state snapshot from the orchestrator each refresh
//! tick; flash timing is handled locally.

use defmt::*;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_time::{with_timeout, Duration};
use smart_leds::RGB8;

use msgauge_core::config::{GAUGE_FLASH_MS, NUM_RING_LEDS};

use crate::channels::{RingState, RING_STATE};

const OFF: RGB8 = RGB8::new(0, 0, 0);
const GREEN: RGB8 = RGB8::new(0, 40, 0);
const YELLOW: RGB8 = RGB8::new(40, 32, 0);
const RED: RGB8 = RGB8::new(48, 0, 0);
const WHITE: RGB8 = RGB8::new(32, 32, 32);

#[embassy_executor::task]
pub async fn led_task(mut ws: PioWs2812<'static, PIO0, 0, NUM_RING_LEDS>) {
    info!("LED ring task started");

    let mut state = RingState {
        enabled: true,
        rpm: 0,
        shift_rpm: u16::MAX,
        alarm: false,
    };
    let mut flash_on = false;
    let mut pixels = [OFF; NUM_RING_LEDS];

    loop {
        render(&state, flash_on, &mut pixels);
        ws.write(&pixels).await;

        let flashing = state.alarm || (state.enabled && state.rpm >= state.shift_rpm);
        if flashing {
            // Keep toggling the flash phase until the next snapshot
            match with_timeout(Duration::from_millis(GAUGE_FLASH_MS), RING_STATE.wait()).await {
                Ok(next) => state = next,
                Err(_) => flash_on = !flash_on,
            }
        } else {
            flash_on = false;
            state = RING_STATE.wait().await;
        }
    }
}

fn render(state: &RingState, flash_on: bool, pixels: &mut [RGB8; NUM_RING_LEDS]) {
    // Alarm flash overrides everything, ring enable included
    if state.alarm {
        let color = if flash_on { RED } else { OFF };
        pixels.fill(color);
        return;
    }

    if !state.enabled {
        pixels.fill(OFF);
        return;
    }

    // At the shift point the whole ring strobes white
    if state.rpm >= state.shift_rpm {
        let color = if flash_on { WHITE } else { OFF };
        pixels.fill(color);
        return;
    }

    // RPM sweep, green through yellow into red near the shift point
    let lit = (state.rpm as u32 * NUM_RING_LEDS as u32 / state.shift_rpm.max(1) as u32) as usize;
    for (i, px) in pixels.iter_mut().enumerate() {
        *px = if i >= lit {
            OFF
        } else if i >= NUM_RING_LEDS * 7 / 8 {
            RED
        } else if i >= NUM_RING_LEDS * 5 / 8 {
            YELLOW
        } else {
            GREEN
        };
    }
}
