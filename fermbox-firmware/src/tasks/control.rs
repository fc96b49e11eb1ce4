//! Control task
//!
//! Runs the control loop forever: one pass, then a fixed pause. The pause
//! comes after the work, so a slow pass stretches the period instead of
//! queueing catch-up passes.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Delay, Timer};

use fermbox_core::control::HeaterState;
use fermbox_core::{ControlLoop, Iteration};
use fermbox_drivers::diagnostics::SerialDiagnostics;
use fermbox_drivers::display::Ssd1306;
use fermbox_drivers::heater::GpioHeater;
use fermbox_drivers::input::ActiveLowButton;
use fermbox_drivers::sensor::Ds18b20;

use crate::onewire::PioBus;

/// The control loop bound to the board's peripherals
pub type BoardLoop = ControlLoop<
    Ds18b20<PioBus<'static, PIO0, 0>>,
    GpioHeater<Output<'static>>,
    ActiveLowButton<Input<'static>>,
    ActiveLowButton<Input<'static>>,
    Ssd1306<I2c<'static, I2C1, i2c::Async>>,
    SerialDiagnostics<BufferedUartTx>,
    Delay,
>;

/// Control loop task
#[embassy_executor::task]
pub async fn control_task(mut ctl: BoardLoop, loop_delay_ms: u32) {
    info!(
        "Control task started (target {}°C, band {}°C)",
        ctl.controller().target_c(),
        ctl.controller().config().hysteresis_band_c
    );

    loop {
        let iteration = ctl.iterate().await;
        report(&iteration);
        Timer::after_millis(loop_delay_ms as u64).await;
    }
}

fn report(iteration: &Iteration) {
    let update = &iteration.update;

    match update.reading {
        Ok(celsius) => trace!("Temperature: {}°C, target {}°C", celsius, update.target_c),
        Err(e) => warn!("Sensor fault: {:?}, heater held off", e),
    }

    if update.setpoint_changed() {
        info!(
            "Target {}°C -> {}°C",
            update.previous_target_c, update.target_c
        );
    }

    match update.transition() {
        Some(HeaterState::Heating) => info!("Heater on"),
        Some(HeaterState::Idle) => info!("Heater off"),
        None => {}
    }

    if let Err(e) = iteration.display {
        warn!("Display update failed: {:?}", e);
    }
}
