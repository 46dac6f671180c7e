//! Packed one-bit-per-pixel layer
//!
//! Rows are stored MSB first and padded to a whole byte, the layout e-paper
//! controllers expect for each color plane. A set bit is ink.

use core::convert::Infallible;

use embedded_graphics::{Pixel, pixelcolor::BinaryColor, prelude::*};

#[derive(Clone, PartialEq, Eq)]
pub struct MonoLayer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl MonoLayer {
    /// Blank layer of the given size
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let stride = Self::stride_for(width);
        Self {
            width,
            height,
            bytes: vec![0; stride * height as usize],
        }
    }

    fn stride_for(width: u32) -> usize {
        (width as usize).div_ceil(8)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw packed rows
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn index(&self, x: u32, y: u32) -> (usize, u8) {
        let offset = y as usize * Self::stride_for(self.width) + (x / 8) as usize;
        (offset, 0x80 >> (x % 8))
    }

    /// Whether the pixel carries ink; out of bounds reads as blank
    #[must_use]
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        let (offset, mask) = self.index(x as u32, y as u32);
        self.bytes[offset] & mask != 0
    }

    pub fn set(&mut self, x: i32, y: i32, ink: bool) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let (offset, mask) = self.index(x as u32, y as u32);
        if ink {
            self.bytes[offset] |= mask;
        } else {
            self.bytes[offset] &= !mask;
        }
    }

    /// Number of inked pixels
    #[must_use]
    pub fn ink_count(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Number of inked pixels inside a rectangle
    #[must_use]
    pub fn ink_in(&self, area: &embedded_graphics::primitives::Rectangle) -> usize {
        area.points().filter(|p| self.is_set(p.x, p.y)).count()
    }

    /// Positions of every inked pixel
    pub fn ink_points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as i32).flat_map(move |y| {
            (0..self.width as i32)
                .filter(move |&x| self.is_set(x, y))
                .map(move |x| Point::new(x, y))
        })
    }
}

impl core::fmt::Debug for MonoLayer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MonoLayer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("ink", &self.ink_count())
            .finish()
    }
}

impl OriginDimensions for MonoLayer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for MonoLayer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}
