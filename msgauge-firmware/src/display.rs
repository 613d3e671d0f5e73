//! Screen rendering
//!
//! Formats the telemetry, navigation, and settings records into the
//! SH1106 frame buffer. One entry point per refresh tick; the view is
//! chosen by the navigation state.

use core::fmt::Write as _;

use heapless::String;

use msgauge_core::history::{ChannelHistory, HISTORY_LEN};
use msgauge_core::nav::{NavState, SettingsRow, View};
use msgauge_core::settings::Settings;
use msgauge_core::tables::{descriptor, Scale};
use msgauge_core::telemetry::{FieldId, Telemetry};
use msgauge_core::warnings::Indicators;

use crate::sh1106::{Sh1106, HEIGHT};

/// Number of graphed channels
pub const GRAPH_CHANNELS: usize = 3;

/// Render the current view and flush
pub async fn render<I2C>(
    display: &mut Sh1106<I2C>,
    t: &Telemetry,
    nav: &NavState,
    settings: &Settings,
    indicators: &Indicators,
    stale: bool,
    histories: &[ChannelHistory; GRAPH_CHANNELS],
) -> Result<(), I2C::Error>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    display.clear();

    match nav.view() {
        View::Dashboard => draw_dashboard(display, t, indicators, stale),
        View::SingleGauge => draw_gauge(display, t, nav, stale),
        View::Graph => draw_graph(display, t, nav, histories),
        View::Settings => draw_settings(display, nav, settings),
    }

    display.flush().await
}

/// Short display label for a field
fn label(id: FieldId) -> &'static str {
    match id {
        FieldId::Rpm => "RPM",
        FieldId::Afr => "AFR",
        FieldId::Clt => "CLT",
        FieldId::Map => "MAP",
        FieldId::Mat => "MAT",
        FieldId::SparkAdv => "SPK",
        FieldId::BattV => "BAT",
        FieldId::Tps => "TPS",
        FieldId::Knock => "KNK",
        FieldId::Baro => "BARO",
        FieldId::EgoCorr => "EGO",
        FieldId::Iac => "IAC",
        FieldId::Dwell => "DWL",
        FieldId::BoostDuty => "BST",
        FieldId::IdleTarget => "IDLE",
        FieldId::AfrTarget => "AFRT",
    }
}

/// Format a raw value per its descriptor's scale flag
fn format_value(id: FieldId, value: i32) -> String<12> {
    let mut out = String::new();
    match descriptor(id).scale {
        Scale::Raw => {
            let _ = write!(out, "{}", value);
        }
        Scale::Tenths => {
            let sign = if value < 0 { "-" } else { "" };
            let v = value.unsigned_abs();
            let _ = write!(out, "{}{}.{}", sign, v / 10, v % 10);
        }
    }
    out
}

/// Session extremum for the single-gauge footer, where one is tracked
fn highest(t: &Telemetry, id: FieldId) -> Option<i32> {
    match id {
        FieldId::Rpm => Some(t.rpm_highest as i32),
        FieldId::Map => Some(t.map_highest as i32),
        FieldId::Clt => Some(t.clt_highest as i32),
        FieldId::Mat => Some(t.mat_highest as i32),
        FieldId::Knock => Some(t.knock_highest as i32),
        FieldId::Afr => Some(t.afr_highest as i32),
        _ => None,
    }
}

fn draw_dashboard<I2C>(
    display: &mut Sh1106<I2C>,
    t: &Telemetry,
    indicators: &Indicators,
    stale: bool,
) where
    I2C: embedded_hal_async::i2c::I2c,
{
    // Status line: link state and lamps
    if stale {
        display.draw_text(0, 0, "NO SIGNAL");
    } else if indicators.cel {
        display.draw_text(0, 0, "CEL");
    }
    if indicators.coolant_hot {
        display.draw_text(0, 13, "HOT!");
        display.invert_region(0, 13, 17);
    }

    // Two-column value grid
    const LEFT: [FieldId; 3] = [FieldId::Rpm, FieldId::Clt, FieldId::Tps];
    const RIGHT: [FieldId; 3] = [FieldId::Afr, FieldId::Map, FieldId::BattV];

    for (i, &id) in LEFT.iter().enumerate() {
        let row = (2 + i * 2) as u8;
        display.draw_text(row, 0, label(id));
        display.draw_text(row, 5, format_value(id, t.field(id)).as_str());
    }
    for (i, &id) in RIGHT.iter().enumerate() {
        let row = (2 + i * 2) as u8;
        display.draw_text(row, 11, label(id));
        display.draw_text(row, 16, format_value(id, t.field(id)).as_str());
    }
}

fn draw_gauge<I2C>(display: &mut Sh1106<I2C>, t: &Telemetry, nav: &NavState, stale: bool)
where
    I2C: embedded_hal_async::i2c::I2c,
{
    let id = nav.gauge_field();

    display.draw_text(0, 0, label(id));
    if stale {
        display.draw_text(0, 12, "NO SIGNAL");
    }

    display.draw_text(3, 4, format_value(id, t.field(id)).as_str());
    display.invert_region(3, 4, 17);

    if let Some(max) = highest(t, id) {
        let mut line: String<21> = String::new();
        let _ = write!(line, "MAX {}", format_value(id, max));
        display.draw_text(6, 0, line.as_str());
    }
    // AFR also tracks a session low
    if id == FieldId::Afr && t.afr_lowest != i16::MAX {
        let mut line: String<21> = String::new();
        let _ = write!(line, "MIN {}", format_value(id, t.afr_lowest as i32));
        display.draw_text(7, 0, line.as_str());
    }
}

fn draw_graph<I2C>(
    display: &mut Sh1106<I2C>,
    t: &Telemetry,
    nav: &NavState,
    histories: &[ChannelHistory; GRAPH_CHANNELS],
) where
    I2C: embedded_hal_async::i2c::I2c,
{
    let id = nav.graph_channel();
    let history = &histories[nav.graph_pos() as usize];

    let mut header: String<21> = String::new();
    let _ = write!(header, "{} {}", label(id), format_value(id, t.field(id)));
    display.draw_text(0, 0, header.as_str());

    let Some((lo, hi)) = history.span() else {
        display.draw_text(4, 0, "no samples yet");
        return;
    };
    let span = (hi as i32 - lo as i32).max(1);

    // Plot area below the header: rows 2-7, two columns per sample
    const TOP: usize = 16;
    let plot_height = (HEIGHT - TOP - 1) as i32;

    let mut prev_y: Option<usize> = None;
    for (i, &sample) in history.iter().enumerate() {
        let x = i * 2;
        if x >= 2 * HISTORY_LEN {
            break;
        }
        let norm = (sample as i32 - lo as i32) * plot_height / span;
        let y = HEIGHT - 1 - norm as usize;
        match prev_y {
            Some(py) => display.draw_vline(x, py, y),
            None => display.set_pixel(x, y),
        }
        prev_y = Some(y);
    }
}

fn draw_settings<I2C>(display: &mut Sh1106<I2C>, nav: &NavState, settings: &Settings)
where
    I2C: embedded_hal_async::i2c::I2c,
{
    display.draw_text(0, 0, "SETTINGS");

    const ROWS: [(SettingsRow, &str); 5] = [
        (SettingsRow::Ring, "Ring light"),
        (SettingsRow::ShiftRpm, "Shift RPM"),
        (SettingsRow::Warnings, "Warnings"),
        (SettingsRow::CoolantWarn, "Coolant warn"),
        (SettingsRow::Exit, "Exit"),
    ];

    for (i, &(row, name)) in ROWS.iter().enumerate() {
        let line = (2 + i) as u8;
        display.draw_text(line, 1, name);

        let mut value: String<8> = String::new();
        match row {
            SettingsRow::Ring => {
                let _ = value.push_str(on_off(settings.ring_enabled));
            }
            SettingsRow::ShiftRpm => {
                let _ = write!(value, "{}", settings.shift_rpm);
            }
            SettingsRow::Warnings => {
                let _ = value.push_str(on_off(settings.warnings_enabled));
            }
            SettingsRow::CoolantWarn => {
                let _ = write!(value, "{}", settings.coolant_warning);
            }
            SettingsRow::Exit => {}
        }
        let value_col = 21 - value.len() as u8;
        display.draw_text(line, value_col, value.as_str());

        if row == nav.settings_row() {
            if nav.is_editing() {
                // Highlight only the value being edited
                display.invert_region(line, value_col, 21);
            } else {
                display.invert_region(line, 0, 21);
            }
        }
    }
}

fn on_off(v: bool) -> &'static str {
    if v {
        "On"
    } else {
        "Off"
    }
}
