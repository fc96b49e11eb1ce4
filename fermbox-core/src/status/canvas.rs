//! 128x64 monochrome frame buffer
//!
//! Organised as 8 pages of 128 column bytes, bit 0 at the top of each
//! page. That is the native GDDRAM layout of SSD1306/SH1106 controllers,
//! so a page can be streamed to the panel without conversion.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Width in pixels
pub const WIDTH: usize = 128;
/// Height in pixels
pub const HEIGHT: usize = 64;
/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Frame buffer (1 bit per pixel)
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a blank canvas
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Raw bytes of one page
    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }

    /// Read back one pixel; out of bounds reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match Self::locate(x, y) {
            Some((page, col, bit)) => self.pages[page][col] & bit != 0,
            None => false,
        }
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones())
            .sum()
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((page, col, bit)) = Self::locate(x, y) {
            if on {
                self.pages[page][col] |= bit;
            } else {
                self.pages[page][col] &= !bit;
            }
        }
    }

    fn locate(x: i32, y: i32) -> Option<(usize, usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let y = y as usize;
        Some((y / 8, x as usize, 1 << (y % 8)))
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        // Out of bounds pixels are clipped
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(fill);
        }
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl core::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("lit", &self.lit_count())
            .finish()
    }
}
