//! CAN bus task
//!
//! Single owner of the MCP2515. Alternates between draining the receive
//! buffers and pacing the periodic data-request schedule, one request
//! window per tick so the ECU's reply buffers are never flooded.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, Timer};

use msgauge_core::config::REQUEST_INTERVAL_MS;
use msgauge_core::tables::REALTIME_BLOCK;
use msgauge_protocol::DataRequest;

use crate::canbus::CanBus;
use crate::channels::FRAME_CHANNEL;

/// Receive poll interval
const RX_POLL_MS: u64 = 2;

/// Request windows, (offset, length), covering every table entry
///
/// Consecutive fields share a window where they pack into one 8-byte
/// reply; sparse offsets get their own short window.
const REQUEST_WINDOWS: &[(u16, u8)] = &[
    (6, 8),   // rpm, spark adv, engine byte, afr target
    (16, 8),  // baro, map, mat, clt
    (24, 8),  // tps, batt v
    (32, 8),  // knock, ego corr, boost duty
    (54, 2),  // iac
    (62, 2),  // dwell
    (70, 1),  // port status
    (78, 3),  // status 1-3
    (233, 1), // status 6
    (252, 1), // afr
    (351, 1), // status 7
    (380, 2), // idle target
    (425, 1), // cel
];

#[embassy_executor::task]
pub async fn can_task(mut bus: CanBus, mut activity_led: Output<'static>) {
    info!("CAN task started");

    let mut window = 0usize;
    let mut next_request = Instant::now();

    loop {
        // Drain everything the controller has buffered; the activity LED
        // follows whether this pass saw traffic.
        let mut received = false;
        while let Some(frame) = bus.try_recv() {
            received = true;
            if FRAME_CHANNEL.try_send(frame).is_err() {
                warn!("frame queue full, dropping");
            }
        }
        activity_led.set_level(received.into());

        if Instant::now() >= next_request {
            let (offset, length) = REQUEST_WINDOWS[window];
            let request = DataRequest {
                block: REALTIME_BLOCK,
                offset,
                length,
            };
            if bus.send_request(&request).is_err() {
                warn!("request transmit failed (offset {})", offset);
            }
            window = (window + 1) % REQUEST_WINDOWS.len();
            next_request += Duration::from_millis(REQUEST_INTERVAL_MS);
        }

        Timer::after_millis(RX_POLL_MS).await;
    }
}
