//! Orchestrator task
//!
//! Sole owner of the telemetry, settings, and navigation records. Every
//! mutation happens here, in one sequential flow: decoded frames and
//! input events arrive over channels, the refresh tick drives rendering,
//! history sampling, and indicator evaluation.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};

use msgauge_core::config::DISPLAY_REFRESH_MS;
use msgauge_core::history::ChannelHistory;
use msgauge_core::link::LinkMonitor;
use msgauge_core::nav::{NavAction, NavState};
use msgauge_core::settings::{Settings, SettingsStore};
use msgauge_core::telemetry::{FieldId, Telemetry};
use msgauge_core::{decode, extrema, warnings};

use crate::channels::{RingState, FRAME_CHANNEL, INPUT_CHANNEL, RING_STATE};
use crate::display::{self, GRAPH_CHANNELS};
use crate::eeprom::Eeprom24c;
use crate::sh1106::Sh1106;

/// Channels sampled into history each refresh tick, graph-index order
const GRAPHED: [FieldId; GRAPH_CHANNELS] = [FieldId::Afr, FieldId::Map, FieldId::Mat];

#[embassy_executor::task]
pub async fn orchestrator_task(mut oled: Sh1106<I2c<'static, I2C0, Async>>, eeprom: Eeprom24c) {
    info!("Orchestrator task started");

    let mut store = SettingsStore::new(eeprom);
    let mut settings = match store.load().await {
        Ok(settings) => {
            info!("settings loaded, shift {} rpm", settings.shift_rpm);
            settings
        }
        Err(_) => {
            // Unreadable EEPROM degrades to defaults for this session
            warn!("settings EEPROM unreadable, using defaults");
            Settings::new()
        }
    };

    let mut telemetry = Telemetry::new();
    let mut nav = NavState::new();
    let mut link = LinkMonitor::new();
    let mut histories: [ChannelHistory; GRAPH_CHANNELS] = Default::default();

    let mut refresh = Ticker::every(Duration::from_millis(DISPLAY_REFRESH_MS));

    loop {
        match select3(
            FRAME_CHANNEL.receive(),
            INPUT_CHANNEL.receive(),
            refresh.next(),
        )
        .await
        {
            Either3::First(frame) => {
                if decode::apply_frame(&mut telemetry, &frame) > 0 {
                    extrema::update(&mut telemetry);
                }
                link.frame_received(Instant::now().as_millis());
            }
            Either3::Second(event) => match nav.handle(event, &mut settings) {
                NavAction::SettingsEdited => store.mark_dirty(),
                NavAction::SettingsClosed => {
                    match store.flush(&settings).await {
                        Ok(true) => info!("settings flushed"),
                        Ok(false) => {}
                        Err(_) => warn!("settings flush failed, edits stay live"),
                    }
                }
                NavAction::None => {}
            },
            Either3::Third(()) => {
                for (history, id) in histories.iter_mut().zip(GRAPHED) {
                    let value = telemetry.field(id).clamp(i16::MIN as i32, i16::MAX as i32);
                    history.push(value as i16);
                }

                let stale = link.is_stale(Instant::now().as_millis());
                let indicators = warnings::evaluate(&telemetry, &settings);

                RING_STATE.signal(RingState {
                    enabled: settings.ring_enabled,
                    rpm: telemetry.rpm,
                    shift_rpm: settings.shift_rpm,
                    alarm: indicators.coolant_hot || indicators.cel,
                });

                if display::render(
                    &mut oled,
                    &telemetry,
                    &nav,
                    &settings,
                    &indicators,
                    stale,
                    &histories,
                )
                .await
                .is_err()
                {
                    warn!("display flush failed");
                }
            }
        }
    }
}
