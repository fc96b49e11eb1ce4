//! Control loop iteration
//!
//! Wires the collaborators around a [`Controller`]. One call to
//! [`ControlLoop::iterate`] is one full pass: sample the probe, emit the
//! diagnostic line, poll the buttons, decide, drive the heater, redraw.
//! The caller owns the cadence (the delay between passes).

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;
use embedded_hal_async::delay::DelayNs;

use crate::config::ControllerConfig;
use crate::controller::{ButtonSample, Controller, Update};
use crate::status::{diagnostic_line, render_status, Reading, StatusView};
use crate::traits::{
    classify_celsius, Button, DiagnosticSink, DisplayError, FrameSink, HeaterOutput,
    TemperatureSensor,
};

/// The two setpoint buttons
pub struct Buttons<U, D> {
    /// Raises the setpoint
    pub up: U,
    /// Lowers the setpoint
    pub down: D,
}

impl<U: Button, D: Button> Buttons<U, D> {
    /// Sample both buttons
    pub fn sample(&mut self) -> ButtonSample {
        ButtonSample {
            up: self.up.is_pressed(),
            down: self.down.is_pressed(),
        }
    }
}

/// Result of one loop pass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Iteration {
    /// Controller decision
    pub update: Update,
    /// Outcome of redrawing the display; never aborts the loop
    pub display: Result<(), DisplayError>,
}

/// Single-threaded control loop over abstract hardware
pub struct ControlLoop<S, H, U, Dn, D, X, W> {
    controller: Controller,
    sensor: S,
    heater: H,
    buttons: Buttons<U, Dn>,
    display: D,
    diagnostics: X,
    delay: W,
}

impl<S, H, U, Dn, D, X, W> ControlLoop<S, H, U, Dn, D, X, W>
where
    S: TemperatureSensor,
    H: HeaterOutput,
    U: Button,
    Dn: Button,
    D: DrawTarget<Color = BinaryColor> + FrameSink,
    X: DiagnosticSink,
    W: DelayNs,
{
    /// Create the loop and force the heater off
    pub fn new(
        config: ControllerConfig,
        sensor: S,
        mut heater: H,
        buttons: Buttons<U, Dn>,
        display: D,
        diagnostics: X,
        delay: W,
    ) -> Self {
        heater.set_on(false);

        Self {
            controller: Controller::new(config),
            sensor,
            heater,
            buttons,
            display,
            diagnostics,
            delay,
        }
    }

    /// Run one pass of the loop
    pub async fn iterate(&mut self) -> Iteration {
        let reading = self.sample_temperature().await;

        let line = diagnostic_line(reading, self.controller.target_c());
        self.diagnostics.emit_line(&line);

        let buttons = self.buttons.sample();
        let update = self.controller.update(reading, buttons);

        let on = update.heater.is_on();
        if self.heater.is_on() != on {
            self.heater.set_on(on);
        }

        let view = StatusView {
            target_c: update.target_c,
            current: reading,
        };
        let display = self.redraw(&view).await;

        Iteration { update, display }
    }

    /// Request a conversion, wait for it, read and classify
    async fn sample_temperature(&mut self) -> Reading {
        self.sensor.request_conversion().await?;
        self.delay.delay_ms(self.sensor.conversion_time_ms()).await;
        let celsius = self.sensor.read_celsius().await?;
        classify_celsius(celsius)
    }

    async fn redraw(&mut self, view: &StatusView) -> Result<(), DisplayError> {
        render_status(&mut self.display, view).map_err(|_| DisplayError::Draw)?;
        self.display.present().await
    }

    /// The controller and its state
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Heater output
    pub fn heater(&self) -> &H {
        &self.heater
    }

    /// Display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Diagnostic sink
    pub fn diagnostics(&self) -> &X {
        &self.diagnostics
    }

    /// Temperature sensor
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Setpoint buttons
    pub fn buttons_mut(&mut self) -> &mut Buttons<U, Dn> {
        &mut self.buttons
    }
}
