//! Megasquirt CAN Broadcast Protocol
//!
//! This crate defines the 29-bit extended-identifier protocol spoken on a
//! Megasquirt engine-control bus. All routing data lives in the CAN
//! identifier; the 0-8 byte payload is a window of raw bytes out of one of
//! the ECU's data blocks.
//!
//! # Header layout
//!
//! The 29 identifier bits are packed LSB-first:
//! ```text
//! ┌────────┬─────────┬──────────┬─────────┬───────┬──────────┬───────┐
//! │ offset │ block_h │ msg_type │ from_id │ to_id │ block_lo │ spare │
//! │ 11b    │ 1b      │ 3b       │ 4b      │ 4b    │ 4b       │ 2b    │
//! └────────┴─────────┴──────────┴─────────┴───────┴──────────┴───────┘
//!  bit 28                                                       bit 0
//! ```
//!
//! The gauge never originates anything except periodic data requests; the
//! ECU answers with response frames addressed to the gauge's device id.

#![no_std]
#![deny(unsafe_code)]

pub mod id;
pub mod messages;

pub use id::{HeaderError, MsgHeader, EXTENDED_ID_BITS, MAX_BLOCK, MAX_DEVICE_ID, MAX_OFFSET};
pub use messages::{classify, DataFrame, DataRequest, MsgType, MAX_DATA_LEN};
