//! Message taxonomy, request payloads, and inbound frame classification.

use heapless::Vec;

use crate::id::{HeaderError, MsgHeader};

/// Maximum payload length of one bus frame
pub const MAX_DATA_LEN: usize = 8;

/// Message types carried in the 3-bit header field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MsgType {
    /// Write data into a block
    Cmd,
    /// Request a window of block data
    Req,
    /// Response carrying requested block data
    Rsp,
    /// Extended subscription
    XSub,
    /// Commit block data to ECU non-volatile memory
    Burn,
    /// Outmsg protocol request
    OutReq,
    /// Outmsg protocol response
    OutRsp,
    /// Outmsg extended subscription
    OutXSub,
}

impl MsgType {
    /// Decode from the 3-bit header field (total over the masked range)
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => MsgType::Cmd,
            1 => MsgType::Req,
            2 => MsgType::Rsp,
            3 => MsgType::XSub,
            4 => MsgType::Burn,
            5 => MsgType::OutReq,
            6 => MsgType::OutRsp,
            _ => MsgType::OutXSub,
        }
    }

    /// Encode to the 3-bit header field
    pub fn to_bits(self) -> u8 {
        match self {
            MsgType::Cmd => 0,
            MsgType::Req => 1,
            MsgType::Rsp => 2,
            MsgType::XSub => 3,
            MsgType::Burn => 4,
            MsgType::OutReq => 5,
            MsgType::OutRsp => 6,
            MsgType::OutXSub => 7,
        }
    }
}

/// A request for a window of block data
///
/// The ECU answers with a `Rsp` frame whose header carries the same block
/// and offset and whose payload is the requested bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataRequest {
    /// Block to read from (0-31)
    pub block: u8,
    /// Byte offset within the block (0-2047)
    pub offset: u16,
    /// Number of bytes requested (1-8)
    pub length: u8,
}

impl DataRequest {
    /// Encode the 3-byte request payload
    ///
    /// Byte 0 carries the block in the upper five bits and the top three
    /// offset bits below it; byte 1 is the low offset byte; byte 2 the
    /// requested length.
    pub fn encode_payload(&self) -> [u8; 3] {
        [
            (self.block << 3) | ((self.offset >> 8) as u8 & 0x07),
            (self.offset & 0xFF) as u8,
            self.length,
        ]
    }

    /// Decode a 3-byte request payload
    pub fn decode_payload(payload: &[u8; 3]) -> Self {
        Self {
            block: payload[0] >> 3,
            offset: (((payload[0] & 0x07) as u16) << 8) | payload[1] as u16,
            length: payload[2],
        }
    }

    /// Build the complete request frame: (29-bit identifier, payload)
    pub fn frame(&self, from_id: u8, to_id: u8) -> Result<(u32, [u8; 3]), HeaderError> {
        let header = MsgHeader::new(self.block, to_id, from_id, MsgType::Req, self.offset)?;
        Ok((header.pack(), self.encode_payload()))
    }
}

/// One inbound window of block data, ready for the telemetry decoder
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataFrame {
    /// Source block
    pub block: u8,
    /// Base offset of `data` within the block
    pub offset: u16,
    /// Payload bytes
    pub data: Vec<u8, MAX_DATA_LEN>,
}

impl DataFrame {
    /// Construct a frame from raw parts (test and driver convenience)
    pub fn new(block: u8, offset: u16, data: &[u8]) -> Option<Self> {
        let mut payload = Vec::new();
        payload.extend_from_slice(data).ok()?;
        Some(Self {
            block,
            offset,
            data: payload,
        })
    }
}

/// Classify one received frame
///
/// Accepts only `Rsp` frames addressed to `my_id`; anything else on the
/// bus (other devices' traffic, commands, burns) is not for the gauge and
/// yields `None`. Malformed identifiers are dropped the same way - a bad
/// frame is never an error at this boundary.
pub fn classify(raw_id: u32, data: &[u8], my_id: u8) -> Option<DataFrame> {
    let header = MsgHeader::parse(raw_id).ok()?;

    if header.msg_type != MsgType::Rsp || header.to_id != my_id {
        return None;
    }

    DataFrame::new(header.block, header.offset, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_type_roundtrip() {
        for bits in 0..8u8 {
            assert_eq!(MsgType::from_bits(bits).to_bits(), bits);
        }
    }

    #[test]
    fn test_request_payload_roundtrip() {
        let req = DataRequest {
            block: 7,
            offset: 425,
            length: 1,
        };
        let payload = req.encode_payload();
        assert_eq!(DataRequest::decode_payload(&payload), req);
    }

    #[test]
    fn test_request_frame() {
        let req = DataRequest {
            block: 7,
            offset: 16,
            length: 8,
        };
        let (raw_id, payload) = req.frame(10, 0).unwrap();

        let header = MsgHeader::parse(raw_id).unwrap();
        assert_eq!(header.msg_type, MsgType::Req);
        assert_eq!(header.block, 7);
        assert_eq!(header.offset, 16);
        assert_eq!(header.from_id, 10);
        assert_eq!(header.to_id, 0);
        assert_eq!(payload[2], 8);
    }

    #[test]
    fn test_classify_accepts_addressed_response() {
        let header = MsgHeader::new(7, 10, 0, MsgType::Rsp, 18).unwrap();
        let frame = classify(header.pack(), &[0x00, 0x64], 10).unwrap();

        assert_eq!(frame.block, 7);
        assert_eq!(frame.offset, 18);
        assert_eq!(frame.data.as_slice(), &[0x00, 0x64]);
    }

    #[test]
    fn test_classify_rejects_other_destination() {
        let header = MsgHeader::new(7, 3, 0, MsgType::Rsp, 18).unwrap();
        assert!(classify(header.pack(), &[0x00, 0x64], 10).is_none());
    }

    #[test]
    fn test_classify_rejects_non_response() {
        for msg_type in [MsgType::Cmd, MsgType::Req, MsgType::Burn, MsgType::XSub] {
            let header = MsgHeader::new(7, 10, 0, msg_type, 18).unwrap();
            assert!(classify(header.pack(), &[0x00], 10).is_none());
        }
    }

    #[test]
    fn test_classify_rejects_wide_id() {
        assert!(classify(1 << 29, &[0x00], 10).is_none());
    }

    #[test]
    fn test_classify_rejects_oversized_payload() {
        let header = MsgHeader::new(7, 10, 0, MsgType::Rsp, 0).unwrap();
        assert!(classify(header.pack(), &[0u8; 9], 10).is_none());
    }
}
