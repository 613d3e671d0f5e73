//! 29-bit extended identifier packing and parsing.
//!
//! The block number is split across the identifier: the low four bits sit
//! next to the spare bits, the fifth bit lives above the message type.

use crate::messages::MsgType;

/// Number of significant bits in an extended CAN identifier
pub const EXTENDED_ID_BITS: u32 = 29;

/// Largest raw identifier value that fits in 29 bits
const MAX_RAW_ID: u32 = (1 << EXTENDED_ID_BITS) - 1;

/// Largest addressable data block (5 bits)
pub const MAX_BLOCK: u8 = 0x1F;

/// Largest device id on the bus (4 bits)
pub const MAX_DEVICE_ID: u8 = 0x0F;

/// Largest byte offset within a block (11 bits)
pub const MAX_OFFSET: u16 = 0x7FF;

/// Errors from header construction or parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderError {
    /// Raw identifier does not fit in 29 bits
    IdTooWide,
    /// Block number exceeds 5 bits
    BlockTooLarge,
    /// Device id exceeds 4 bits
    DeviceIdTooLarge,
    /// Offset exceeds 11 bits
    OffsetTooLarge,
}

/// Decoded 29-bit frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MsgHeader {
    /// Data block the payload belongs to (0-31)
    pub block: u8,
    /// Destination device id (0-15)
    pub to_id: u8,
    /// Originating device id (0-15)
    pub from_id: u8,
    /// Message type
    pub msg_type: MsgType,
    /// Byte offset of the payload within the block (0-2047)
    pub offset: u16,
}

impl MsgHeader {
    /// Create a header, validating every field range
    pub fn new(
        block: u8,
        to_id: u8,
        from_id: u8,
        msg_type: MsgType,
        offset: u16,
    ) -> Result<Self, HeaderError> {
        if block > MAX_BLOCK {
            return Err(HeaderError::BlockTooLarge);
        }
        if to_id > MAX_DEVICE_ID || from_id > MAX_DEVICE_ID {
            return Err(HeaderError::DeviceIdTooLarge);
        }
        if offset > MAX_OFFSET {
            return Err(HeaderError::OffsetTooLarge);
        }

        Ok(Self {
            block,
            to_id,
            from_id,
            msg_type,
            offset,
        })
    }

    /// Pack this header into a raw 29-bit identifier
    ///
    /// Fields are assumed in range; `new` and `parse` are the only public
    /// constructors and both enforce the ranges.
    pub fn pack(&self) -> u32 {
        let block_lo = (self.block & 0x0F) as u32;
        let block_hi = ((self.block >> 4) & 0x01) as u32;

        (block_lo << 2)
            | ((self.to_id as u32) << 6)
            | ((self.from_id as u32) << 10)
            | ((self.msg_type.to_bits() as u32) << 14)
            | (block_hi << 17)
            | ((self.offset as u32) << 18)
    }

    /// Parse a raw 29-bit identifier into a header
    pub fn parse(raw: u32) -> Result<Self, HeaderError> {
        if raw > MAX_RAW_ID {
            return Err(HeaderError::IdTooWide);
        }

        let block_lo = ((raw >> 2) & 0x0F) as u8;
        let to_id = ((raw >> 6) & 0x0F) as u8;
        let from_id = ((raw >> 10) & 0x0F) as u8;
        let msg_type = MsgType::from_bits(((raw >> 14) & 0x07) as u8);
        let block_hi = ((raw >> 17) & 0x01) as u8;
        let offset = ((raw >> 18) & 0x7FF) as u16;

        Ok(Self {
            block: (block_hi << 4) | block_lo,
            to_id,
            from_id,
            msg_type,
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_parse_roundtrip() {
        let header = MsgHeader::new(7, 10, 0, MsgType::Rsp, 425).unwrap();
        let raw = header.pack();
        assert!(raw <= MAX_RAW_ID);

        let parsed = MsgHeader::parse(raw).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_block_split_across_header() {
        // Block 23 = 0b10111: high bit lands above the message type
        let header = MsgHeader::new(23, 1, 2, MsgType::Req, 0).unwrap();
        let raw = header.pack();

        assert_eq!((raw >> 2) & 0x0F, 0b0111);
        assert_eq!((raw >> 17) & 0x01, 1);
        assert_eq!(MsgHeader::parse(raw).unwrap().block, 23);
    }

    #[test]
    fn test_range_validation() {
        assert_eq!(
            MsgHeader::new(32, 0, 0, MsgType::Cmd, 0),
            Err(HeaderError::BlockTooLarge)
        );
        assert_eq!(
            MsgHeader::new(0, 16, 0, MsgType::Cmd, 0),
            Err(HeaderError::DeviceIdTooLarge)
        );
        assert_eq!(
            MsgHeader::new(0, 0, 16, MsgType::Cmd, 0),
            Err(HeaderError::DeviceIdTooLarge)
        );
        assert_eq!(
            MsgHeader::new(0, 0, 0, MsgType::Cmd, 0x800),
            Err(HeaderError::OffsetTooLarge)
        );
    }

    #[test]
    fn test_parse_rejects_wide_id() {
        assert_eq!(MsgHeader::parse(1 << 29), Err(HeaderError::IdTooWide));
        assert!(MsgHeader::parse(MAX_RAW_ID & !0x03).is_ok());
    }

    #[test]
    fn test_spare_bits_unused() {
        // Spare bits are never set by pack
        let header = MsgHeader::new(31, 15, 15, MsgType::OutXSub, 0x7FF).unwrap();
        assert_eq!(header.pack() & 0x03, 0);
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            block in 0u8..=MAX_BLOCK,
            to_id in 0u8..=MAX_DEVICE_ID,
            from_id in 0u8..=MAX_DEVICE_ID,
            msg_bits in 0u8..8,
            offset in 0u16..=MAX_OFFSET,
        ) {
            let header = MsgHeader::new(
                block,
                to_id,
                from_id,
                MsgType::from_bits(msg_bits),
                offset,
            ).unwrap();

            let parsed = MsgHeader::parse(header.pack()).unwrap();
            prop_assert_eq!(parsed, header);
        }
    }
}
