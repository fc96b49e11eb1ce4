//! PIO-backed 1-Wire bus

use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::onewire::PioOneWire;
use fermbox_drivers::sensor::OneWireBus;

/// 1-Wire master running on one PIO state machine
pub struct PioBus<'d, PIO: Instance, const SM: usize> {
    wire: PioOneWire<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioBus<'d, PIO, SM> {
    pub fn new(wire: PioOneWire<'d, PIO, SM>) -> Self {
        Self { wire }
    }
}

impl<PIO: Instance, const SM: usize> OneWireBus for PioBus<'_, PIO, SM> {
    async fn reset(&mut self) -> bool {
        self.wire.reset().await
    }

    async fn write_bytes(&mut self, bytes: &[u8]) {
        self.wire.write_bytes(bytes).await
    }

    async fn read_bytes(&mut self, buf: &mut [u8]) {
        self.wire.read_bytes(buf).await
    }
}
