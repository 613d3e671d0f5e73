//! Table-driven telemetry frame decoder
//!
//! Each inbound data frame carries a window of bytes from one block,
//! addressed by the block id and the window's base offset. Decoding scans
//! both descriptor tables and updates every field and flag whose bytes lie
//! entirely inside the window. Everything else is left untouched, so
//! partial windows are harmless and unknown payload bytes are ignored.

use msgauge_protocol::DataFrame;

use crate::tables::{for_each_field, for_each_flag};
use crate::telemetry::Telemetry;

/// Apply one data frame to the telemetry record
///
/// Returns the number of fields and flags updated. Values are stored as
/// raw integers; big-endian, sign-extended where the descriptor says so.
/// The scale flag is a rendering concern and plays no part here.
pub fn apply_frame(telemetry: &mut Telemetry, frame: &DataFrame) -> usize {
    let start = frame.offset;
    let end = start + frame.data.len() as u16;
    let mut updated = 0;

    for desc in for_each_field() {
        if desc.block != frame.block {
            continue;
        }
        let field_end = desc.offset + desc.width as u16;
        if desc.offset < start || field_end > end {
            continue;
        }
        let i = (desc.offset - start) as usize;
        let value = match (desc.width, desc.signed) {
            (1, false) => frame.data[i] as i32,
            (1, true) => frame.data[i] as i8 as i32,
            (2, false) => u16::from_be_bytes([frame.data[i], frame.data[i + 1]]) as i32,
            (2, true) => i16::from_be_bytes([frame.data[i], frame.data[i + 1]]) as i32,
            // Table invariant: width is 1 or 2
            _ => continue,
        };
        telemetry.set_field(desc.id, value);
        updated += 1;
    }

    for desc in for_each_flag() {
        let offset = desc.byte.offset();
        if desc.byte.block() != frame.block || offset < start || offset >= end {
            continue;
        }
        let byte = frame.data[(offset - start) as usize];
        telemetry.set_flag(desc.id, byte & (1 << desc.bit) != 0);
        updated += 1;
    }

    updated
}
