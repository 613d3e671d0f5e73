//! Operator input tasks
//!
//! Encoder rotation becomes `Adjust(delta)`; a short button press is
//! `Select`, a held press is `NextView`. Events land in the input channel
//! fully debounced; these tasks never touch the shared records.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{with_timeout, Duration, Timer};

use msgauge_core::config::{DEBOUNCE_MS, LONG_PRESS_MS};
use msgauge_core::nav::InputEvent;

use crate::channels::INPUT_CHANNEL;
use crate::encoder::Encoder;

/// Encoder rotation task
#[embassy_executor::task]
pub async fn encoder_task(a: Input<'static>, b: Input<'static>) {
    info!("Encoder task started");

    let mut encoder = Encoder::new(a, b);

    loop {
        if let Some(delta) = encoder.poll().await {
            if INPUT_CHANNEL.try_send(InputEvent::Adjust(delta)).is_err() {
                warn!("input queue full, dropping rotation");
            }
        }
    }
}

/// Button press task
#[embassy_executor::task]
pub async fn button_task(mut btn: Input<'static>) {
    info!("Button task started");

    loop {
        btn.wait_for_falling_edge().await;

        // Debounce
        Timer::after_millis(DEBOUNCE_MS).await;

        if btn.is_low() {
            // Wait for release or long-press timeout
            let released = with_timeout(
                Duration::from_millis(LONG_PRESS_MS),
                btn.wait_for_rising_edge(),
            )
            .await;

            let event = match released {
                Ok(()) => InputEvent::Select,
                Err(_) => {
                    // Held long enough; report and wait for actual release
                    btn.wait_for_rising_edge().await;
                    InputEvent::NextView
                }
            };

            debug!("button event {}", event);
            if INPUT_CHANNEL.try_send(event).is_err() {
                warn!("input queue full, dropping press");
            }

            // Debounce after release
            Timer::after_millis(DEBOUNCE_MS).await;
        }
    }
}
