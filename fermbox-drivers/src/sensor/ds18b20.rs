//! DS18B20 digital thermometer
//!
//! Single probe on a 1-Wire bus, addressed with SKIP ROM. The bus timing
//! itself lives behind [`OneWireBus`]; this module only speaks the
//! DS18B20 command set and decodes its scratchpad.

use core::future::Future;

use fermbox_core::traits::{SensorError, TemperatureSensor};

/// ROM and function commands
mod cmd {
    pub const SKIP_ROM: u8 = 0xCC;
    pub const CONVERT_T: u8 = 0x44;
    pub const READ_SCRATCHPAD: u8 = 0xBE;
    pub const WRITE_SCRATCHPAD: u8 = 0x4E;
}

/// Scratchpad length including CRC byte
const SCRATCHPAD_LEN: usize = 9;

/// 1-Wire bus master
pub trait OneWireBus {
    /// Issue a reset pulse; returns true if a device answered with presence
    fn reset(&mut self) -> impl Future<Output = bool>;

    /// Write bytes LSB first
    fn write_bytes(&mut self, bytes: &[u8]) -> impl Future<Output = ()>;

    /// Read bytes LSB first
    fn read_bytes(&mut self, buf: &mut [u8]) -> impl Future<Output = ()>;
}

/// Conversion resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.5 °C, 93.75 ms
    Bits9,
    /// 0.25 °C, 187.5 ms
    Bits10,
    /// 0.125 °C, 375 ms
    Bits11,
    /// 0.0625 °C, 750 ms (power-on default)
    Bits12,
}

impl Resolution {
    /// Configuration register value
    pub const fn config_byte(self) -> u8 {
        match self {
            Resolution::Bits9 => 0x1F,
            Resolution::Bits10 => 0x3F,
            Resolution::Bits11 => 0x5F,
            Resolution::Bits12 => 0x7F,
        }
    }

    /// Worst-case conversion time, rounded up to whole milliseconds
    pub const fn conversion_time_ms(self) -> u32 {
        match self {
            Resolution::Bits9 => 94,
            Resolution::Bits10 => 188,
            Resolution::Bits11 => 375,
            Resolution::Bits12 => 750,
        }
    }
}

/// Dallas/Maxim CRC-8 (polynomial x^8 + x^5 + x^4 + 1, reflected)
///
/// Running it over a full scratchpad including its CRC byte yields 0.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}

/// Decode a scratchpad into degrees Celsius
///
/// Bytes 0 and 1 hold a signed 16-bit value in 1/16 °C. Undefined low
/// bits at reduced resolutions are already zero on the device.
///
/// A data line stuck low answers every reset and reads back all zeros,
/// which passes the CRC. A real device never returns that (byte 4 is the
/// config register, with its reserved bits set), so it is a disconnect.
pub fn decode_scratchpad(scratchpad: &[u8; SCRATCHPAD_LEN]) -> Result<f32, SensorError> {
    if scratchpad.iter().all(|&b| b == 0) {
        return Err(SensorError::Disconnected);
    }
    if crc8(scratchpad) != 0 {
        return Err(SensorError::CrcMismatch);
    }
    let raw = i16::from_le_bytes([scratchpad[0], scratchpad[1]]);
    Ok(raw as f32 / 16.0)
}

/// DS18B20 temperature sensor driver
pub struct Ds18b20<W> {
    wire: W,
    resolution: Resolution,
}

impl<W: OneWireBus> Ds18b20<W> {
    /// Create a driver assuming the power-on resolution (12 bits)
    pub fn new(wire: W) -> Self {
        Self {
            wire,
            resolution: Resolution::Bits12,
        }
    }

    /// Current resolution
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Set the conversion resolution (volatile; lost on power cycle)
    pub async fn set_resolution(&mut self, resolution: Resolution) -> Result<(), SensorError> {
        self.select().await?;
        // Th and Tl alarm registers are unused
        self.wire
            .write_bytes(&[cmd::WRITE_SCRATCHPAD, 0x00, 0x00, resolution.config_byte()])
            .await;
        self.resolution = resolution;
        Ok(())
    }

    /// Reset and address the single device on the bus
    async fn select(&mut self) -> Result<(), SensorError> {
        if !self.wire.reset().await {
            return Err(SensorError::NoPresence);
        }
        self.wire.write_bytes(&[cmd::SKIP_ROM]).await;
        Ok(())
    }
}

impl<W: OneWireBus> TemperatureSensor for Ds18b20<W> {
    async fn request_conversion(&mut self) -> Result<(), SensorError> {
        self.select().await?;
        self.wire.write_bytes(&[cmd::CONVERT_T]).await;
        Ok(())
    }

    async fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.select().await?;
        self.wire.write_bytes(&[cmd::READ_SCRATCHPAD]).await;

        let mut scratchpad = [0u8; SCRATCHPAD_LEN];
        self.wire.read_bytes(&mut scratchpad).await;

        // An absent pull-up reads back all ones, which fails the CRC
        decode_scratchpad(&scratchpad)
    }

    fn conversion_time_ms(&self) -> u32 {
        self.resolution.conversion_time_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use std::vec::Vec;

    /// Scratchpad with a valid CRC for a raw reading
    fn scratchpad(raw: i16) -> [u8; SCRATCHPAD_LEN] {
        let [lsb, msb] = raw.to_le_bytes();
        let mut pad = [lsb, msb, 0x4B, 0x46, 0x7F, 0xFF, 0x0C, 0x10, 0x00];
        pad[8] = crc8(&pad[..8]);
        pad
    }

    struct MockWire {
        present: bool,
        response: [u8; SCRATCHPAD_LEN],
        written: Vec<u8>,
        resets: u32,
    }

    impl MockWire {
        fn new(response: [u8; SCRATCHPAD_LEN]) -> Self {
            Self {
                present: true,
                response,
                written: Vec::new(),
                resets: 0,
            }
        }
    }

    impl OneWireBus for MockWire {
        async fn reset(&mut self) -> bool {
            self.resets += 1;
            self.present
        }

        async fn write_bytes(&mut self, bytes: &[u8]) {
            self.written.extend_from_slice(bytes);
        }

        async fn read_bytes(&mut self, buf: &mut [u8]) {
            buf.copy_from_slice(&self.response[..buf.len()]);
        }
    }

    #[test]
    fn test_crc8_known_rom() {
        // ROM code from the DS18B20 datasheet CRC example
        let rom = [0x28, 0xFF, 0x4C, 0x6B, 0x71, 0x16, 0x03];
        let crc = crc8(&rom);
        let mut full = [0u8; 8];
        full[..7].copy_from_slice(&rom);
        full[7] = crc;
        assert_eq!(crc8(&full), 0);
    }

    #[test]
    fn test_decode_positive_and_negative() {
        // Datasheet table: 0x0191 = +25.0625, 0xFF5E = -10.125, 0xFC90 = -55
        assert_eq!(decode_scratchpad(&scratchpad(0x0191)), Ok(25.0625));
        assert_eq!(decode_scratchpad(&scratchpad(0xFF5Eu16 as i16)), Ok(-10.125));
        assert_eq!(decode_scratchpad(&scratchpad(0xFC90u16 as i16)), Ok(-55.0));
        assert_eq!(decode_scratchpad(&scratchpad(0x0550)), Ok(85.0));
    }

    #[test]
    fn test_decode_rejects_bad_crc() {
        let mut pad = scratchpad(0x01C0);
        pad[0] ^= 0x01;
        assert_eq!(decode_scratchpad(&pad), Err(SensorError::CrcMismatch));
    }

    #[test]
    fn test_floating_bus_fails_crc() {
        assert_eq!(
            decode_scratchpad(&[0xFF; SCRATCHPAD_LEN]),
            Err(SensorError::CrcMismatch)
        );
    }

    #[test]
    fn test_all_zero_scratchpad_is_disconnected() {
        assert_eq!(crc8(&[0u8; SCRATCHPAD_LEN]), 0);
        assert_eq!(
            decode_scratchpad(&[0u8; SCRATCHPAD_LEN]),
            Err(SensorError::Disconnected)
        );
    }

    #[test]
    fn test_shorted_bus_reads_as_disconnected() {
        // Line held low: every reset sees "presence", every byte is 0x00
        let mut sensor = Ds18b20::new(MockWire::new([0u8; SCRATCHPAD_LEN]));

        assert_eq!(block_on(sensor.request_conversion()), Ok(()));
        assert_eq!(
            block_on(sensor.read_celsius()),
            Err(SensorError::Disconnected)
        );
    }

    #[test]
    fn test_conversion_and_read_commands() {
        let mut sensor = Ds18b20::new(MockWire::new(scratchpad(0x01B8)));

        block_on(sensor.request_conversion()).unwrap();
        let celsius = block_on(sensor.read_celsius()).unwrap();

        assert_eq!(celsius, 27.5);
        assert_eq!(sensor.wire.written, [0xCC, 0x44, 0xCC, 0xBE]);
        assert_eq!(sensor.wire.resets, 2);
    }

    #[test]
    fn test_no_presence() {
        let mut wire = MockWire::new(scratchpad(0x01B8));
        wire.present = false;
        let mut sensor = Ds18b20::new(wire);

        assert_eq!(
            block_on(sensor.request_conversion()),
            Err(SensorError::NoPresence)
        );
        assert_eq!(block_on(sensor.read_celsius()), Err(SensorError::NoPresence));
        assert!(sensor.wire.written.is_empty());
    }

    #[test]
    fn test_set_resolution() {
        let mut sensor = Ds18b20::new(MockWire::new(scratchpad(0)));
        assert_eq!(sensor.conversion_time_ms(), 750);

        block_on(sensor.set_resolution(Resolution::Bits10)).unwrap();
        assert_eq!(sensor.wire.written, [0xCC, 0x4E, 0x00, 0x00, 0x3F]);
        assert_eq!(sensor.conversion_time_ms(), 188);
        assert_eq!(sensor.resolution(), Resolution::Bits10);
    }
}
