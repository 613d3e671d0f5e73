//! MCP2515 CAN controller wrapper
//!
//! Owns the SPI-attached controller and translates between raw bus frames
//! and the protocol crate's types. The controller is polled; the receive
//! path never blocks.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_02::can::{ExtendedId, Frame, Id};
use mcp2515::error::Error as McpError;
use mcp2515::frame::CanFrame;
use mcp2515::regs::OpMode;
use mcp2515::{CanSpeed, McpSpeed, Settings, MCP2515};

use msgauge_core::config::{ECU_CAN_ID, MY_CAN_ID};
use msgauge_protocol::{classify, DataFrame, DataRequest};

type Bus = MCP2515<Spi<'static, SPI0, Blocking>, Output<'static>>;

/// Errors surfaced to the CAN task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanError {
    /// Controller init failed
    Init,
    /// Transmit failed (bus off, buffers full)
    Transmit,
}

/// CAN interface for the gauge
pub struct CanBus {
    mcp: Bus,
}

impl CanBus {
    /// Bring up the controller at 500 kbit/s with a 8 MHz crystal
    pub fn new(spi: Spi<'static, SPI0, Blocking>, cs: Output<'static>) -> Result<Self, CanError> {
        let mut mcp = MCP2515::new(spi, cs);
        mcp.init(
            &mut Delay,
            Settings {
                mode: OpMode::Normal,
                can_speed: CanSpeed::Kbps500,
                mcp_speed: McpSpeed::MHz8,
                clkout_en: false,
            },
        )
        .map_err(|_| CanError::Init)?;

        Ok(Self { mcp })
    }

    /// Poll for one frame addressed to this gauge
    ///
    /// Other traffic on the bus (broadcasts to other devices, commands,
    /// standard-id frames) is read and discarded here.
    pub fn try_recv(&mut self) -> Option<DataFrame> {
        let frame = match self.mcp.read_message() {
            Ok(frame) => frame,
            Err(McpError::NoMessage) => return None,
            Err(_) => return None,
        };

        let raw_id = match frame.id() {
            Id::Extended(id) => id.as_raw(),
            Id::Standard(_) => return None,
        };

        classify(raw_id, frame.data(), MY_CAN_ID)
    }

    /// Transmit one data-request frame to the ECU
    pub fn send_request(&mut self, request: &DataRequest) -> Result<(), CanError> {
        let (raw_id, payload) = request
            .frame(MY_CAN_ID, ECU_CAN_ID)
            .map_err(|_| CanError::Transmit)?;

        let id = ExtendedId::new(raw_id).ok_or(CanError::Transmit)?;
        let frame = CanFrame::new(Id::Extended(id), &payload).ok_or(CanError::Transmit)?;

        self.mcp.send_message(frame).map_err(|_| CanError::Transmit)
    }
}
