//! Fermbox - Fermentation Box Controller Firmware
//!
//! Main firmware binary for an RP2040 board driving a fermentation box:
//! a DS18B20 probe, a heater relay, two setpoint buttons and a 128x64
//! SSD1306 OLED. A single control task samples, decides and redraws at a
//! fixed cadence; a diagnostic line per pass goes out on UART0.

#![no_std]
#![no_main]

mod onewire;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0, UART0};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::onewire::{PioOneWire, PioOneWireProgram};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartTx, Config as UartConfig};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use fermbox_core::{Buttons, ControlLoop, ControllerConfig};
use fermbox_drivers::diagnostics::SerialDiagnostics;
use fermbox_drivers::display::Ssd1306;
use fermbox_drivers::heater::GpioHeater;
use fermbox_drivers::input::ActiveLowButton;
use fermbox_drivers::sensor::{Ds18b20, Resolution};

use crate::onewire::PioBus;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Diagnostic serial baud rate
const DIAG_BAUD: u32 = 9600;

/// OLED bus clock
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// DS18B20 resolution; sets the conversion wait inside each pass
const PROBE_RESOLUTION: Resolution = Resolution::Bits10;

// Static buffer for the diagnostic UART
static TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Fermbox firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Heater relay on GPIO4, driven low before anything else
    let heater_pin = Output::new(p.PIN_4, Level::Low);
    let heater = GpioHeater::new_active_high(heater_pin);

    let config = ControllerConfig::DEFAULT;
    if let Err(e) = config.validate() {
        // Heater pin is already low and holds its level through the halt
        defmt::panic!("Invalid controller configuration: {:?}", e);
    }

    // Setpoint buttons on GPIO3 (up) and GPIO13 (down), pressed = low
    let up = ActiveLowButton::new(Input::new(p.PIN_3, Pull::Up));
    let down = ActiveLowButton::new(Input::new(p.PIN_13, Pull::Up));

    // DS18B20 on GPIO5 through a PIO 1-Wire program
    let mut pio = Pio::new(p.PIO0, Irqs);
    let program = PioOneWireProgram::new(&mut pio.common);
    let wire = PioOneWire::new(&mut pio.common, pio.sm0, p.PIN_5, &program);
    let mut sensor = Ds18b20::new(PioBus::new(wire));
    match sensor.set_resolution(PROBE_RESOLUTION).await {
        Ok(()) => info!("DS18B20 set to {:?}", PROBE_RESOLUTION),
        Err(e) => warn!("DS18B20 not configured ({:?}), using power-on resolution", e),
    }

    // SSD1306 on I2C1 (SDA GPIO14, SCL GPIO15)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_15, p.PIN_14, Irqs, i2c_config);
    let mut display = Ssd1306::new(i2c);
    if let Err(e) = display.init().await {
        warn!("Display init failed: {:?}", e);
    }

    // Diagnostic line output on UART0 TX (GPIO0)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = DIAG_BAUD;
    let tx_buf = TX_BUF.init([0u8; 128]);
    let tx = BufferedUartTx::new(p.UART0, Irqs, p.PIN_0, tx_buf, uart_config);
    let diagnostics = SerialDiagnostics::new(tx);

    info!("Peripherals initialized");

    let ctl = ControlLoop::new(
        config,
        sensor,
        heater,
        Buttons { up, down },
        display,
        diagnostics,
        Delay,
    );

    spawner
        .spawn(tasks::control_task(ctl, config.loop_delay_ms))
        .unwrap();

    info!("Control task spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
