//! Board-agnostic core logic for the CAN gauge firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Telemetry data model and the fixed field/flag descriptor tables
//! - Frame decoder and session extrema tracking
//! - Persisted settings record and EEPROM-backed store
//! - Menu/view navigation state machine
//! - Warning/indicator evaluation and bus-silence watchdog
//!
//! All mutable records (telemetry, settings, navigation) are owned by the
//! firmware's orchestrator task and passed by reference into the entry
//! points here; nothing in this crate holds ambient state.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod decode;
pub mod extrema;
pub mod history;
pub mod link;
pub mod nav;
pub mod settings;
pub mod tables;
pub mod telemetry;
pub mod traits;
pub mod warnings;
