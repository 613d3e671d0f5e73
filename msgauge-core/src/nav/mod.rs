//! View and menu navigation
//!
//! Owns the current view, the four position counters, and settings edit
//! mode. Driven by debounced input events; the machine itself never reads
//! hardware.

mod events;
mod machine;

pub use events::{InputEvent, NavAction};
pub use machine::{NavState, SettingsRow, View, NUM_GAUGES, NUM_GRAPHS, NUM_SETTINGS_ROWS, NUM_VIEWS};
