//! Static text styles shared by every draw call.
//!
//! Both layers are one-bit, so all styles ink with `BinaryColor::On`; the
//! layer a string is drawn into decides whether it shows black or red.

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        iso_8859_1::{FONT_6X10, FONT_7X13, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

pub const INK: BinaryColor = BinaryColor::On;

/// Location label in the header
pub const TITLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_10X20, INK);
/// Timestamp, wind, metrics
pub const LABEL: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_7X13, INK);
/// Footer labels, gridline labels, compass marker
pub const SMALL: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_6X10, INK);
/// Large temperature readout, drawn at 1x then blown up
pub const VALUE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_24_POINT, INK);

pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

pub const CENTERED_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

pub const LEFT_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Middle)
    .build();

pub const LEFT_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

pub const RIGHT_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Middle)
    .build();
