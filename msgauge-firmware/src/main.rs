//! MSGauge - Megasquirt CAN instrument cluster firmware
//!
//! Main firmware binary for RP2040-based gauge heads. Listens to the
//! Megasquirt broadcast bus through an SPI-attached MCP2515, renders
//! telemetry on a SH1106 OLED, and drives a 16-pixel WS2812 ring.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, I2C1, PIO0};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::spi::{self, Spi};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::canbus::CanBus;
use crate::eeprom::Eeprom24c;
use crate::sh1106::Sh1106;

mod canbus;
mod channels;
mod display;
mod eeprom;
mod encoder;
mod font;
mod sh1106;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

// The loaded PIO program must outlive the LED task
static WS_PROGRAM: StaticCell<PioWs2812Program<'static, PIO0>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("MSGauge firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // SPI0 for the MCP2515 CAN controller
    // (CLK=GPIO18, MOSI=GPIO19, MISO=GPIO16, CS=GPIO17)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 8_000_000;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);

    let canbus = match CanBus::new(spi, cs) {
        Ok(bus) => bus,
        Err(_) => {
            // Nothing works without the bus controller; stop here so the
            // fault is visible on the probe instead of a blank gauge.
            panic!("MCP2515 init failed");
        }
    };
    info!("CAN controller initialized");

    // I2C0 for the OLED (SDA=GPIO4, SCL=GPIO5)
    let oled_i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let mut oled = Sh1106::new(oled_i2c);
    match oled.init().await {
        Ok(()) => {
            info!("OLED initialized");
            oled.clear();
            oled.draw_text(0, 0, "MSGauge");
            oled.flush().await.ok();
        }
        Err(_) => error!("Failed to initialize OLED"),
    }

    // I2C1 for the settings EEPROM (SDA=GPIO2, SCL=GPIO3)
    let eeprom_i2c = I2c::new_async(p.I2C1, p.PIN_3, p.PIN_2, Irqs, i2c::Config::default());
    let eeprom = Eeprom24c::new(eeprom_i2c);

    // Encoder (A=GPIO10, B=GPIO11, button=GPIO12)
    let enc_a = Input::new(p.PIN_10, Pull::Up);
    let enc_b = Input::new(p.PIN_11, Pull::Up);
    let enc_btn = Input::new(p.PIN_12, Pull::Up);

    // WS2812 ring on PIO0 (data=GPIO22)
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let ws_program = WS_PROGRAM.init(PioWs2812Program::new(&mut common));
    let ring = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_22, ws_program);

    // Onboard LED doubles as a CAN activity indicator
    let activity_led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks
    spawner.spawn(tasks::can_task(canbus, activity_led)).unwrap();
    spawner.spawn(tasks::encoder_task(enc_a, enc_b)).unwrap();
    spawner.spawn(tasks::button_task(enc_btn)).unwrap();
    spawner.spawn(tasks::led_task(ring)).unwrap();
    spawner.spawn(tasks::orchestrator_task(oled, eeprom)).unwrap();

    info!("All tasks spawned, gauge running");
}
