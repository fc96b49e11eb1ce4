//! Status screen
//!
//! Three boxed rows on a 128x64 canvas:
//!
//! ```text
//! +------------------------------+  y 0..16
//! |     FERMENTATION BOX :)      |
//! +------------------------------+  y 17..41
//! | Target Temperature :         |
//! | 28.0                         |
//! +------------------------------+  y 41..64
//! | Current Temperature :        |
//! | 27.5                         |
//! +------------------------------+
//! ```
//!
//! The whole frame is redrawn every time; there is no partial update.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};

use super::format::{format_reading, format_temperature, Reading};

const TITLE: &str = "FERMENTATION BOX :)";
const TARGET_LABEL: &str = "Target Temperature :";
const CURRENT_LABEL: &str = "Current Temperature :";

/// Left margin for row text
const TEXT_X: i32 = 5;

/// Row frames: (x, y, width, height)
const TITLE_FRAME: (i32, i32, u32, u32) = (0, 0, 128, 16);
const TARGET_FRAME: (i32, i32, u32, u32) = (0, 17, 128, 24);
const CURRENT_FRAME: (i32, i32, u32, u32) = (0, 41, 128, 23);

/// Text baselines
const TITLE_BASELINE: i32 = 12;
const TARGET_LABEL_BASELINE: i32 = 28;
const TARGET_VALUE_BASELINE: i32 = 38;
const CURRENT_LABEL_BASELINE: i32 = 52;
const CURRENT_VALUE_BASELINE: i32 = 62;

/// Values shown on the status screen
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusView {
    /// Target temperature
    pub target_c: f32,
    /// Latest reading, or the fault that replaced it
    pub current: Reading,
}

/// Clear the target and draw the status screen
pub fn render_status<D>(target: &mut D, view: &StatusView) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let text_style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
    let frame_style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

    target.clear(BinaryColor::Off)?;

    for (x, y, w, h) in [TITLE_FRAME, TARGET_FRAME, CURRENT_FRAME] {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(frame_style)
            .draw(target)?;
    }

    let centre_x = TITLE_FRAME.0 + TITLE_FRAME.2 as i32 / 2;
    Text::with_alignment(
        TITLE,
        Point::new(centre_x, TITLE_BASELINE),
        text_style,
        Alignment::Center,
    )
    .draw(target)?;

    let target_value = format_temperature(view.target_c);
    let current_value = format_reading(view.current);

    let rows = [
        (TARGET_LABEL, TARGET_LABEL_BASELINE),
        (target_value.as_str(), TARGET_VALUE_BASELINE),
        (CURRENT_LABEL, CURRENT_LABEL_BASELINE),
        (current_value.as_str(), CURRENT_VALUE_BASELINE),
    ];
    for (text, baseline) in rows {
        Text::new(text, Point::new(TEXT_X, baseline), text_style).draw(target)?;
    }

    Ok(())
}
