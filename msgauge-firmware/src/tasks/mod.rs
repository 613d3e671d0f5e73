//! Embassy task definitions
//!
//! Task layout:
//! - `can_task`: polls the MCP2515 and paces the request schedule
//! - `encoder_task` / `button_task`: produce debounced input events
//! - `orchestrator_task`: owns all mutable records and the display
//! - `led_task`: drives the WS2812 ring

mod can;
mod input;
mod leds;
mod orchestrator;

pub use can::can_task;
pub use input::{button_task, encoder_task};
pub use leds::led_task;
pub use orchestrator::orchestrator_task;
