//! Forecast temperature graph: scaling, gridlines and the two polylines

use core::ops::{Add, Div, Mul, Range, Sub};

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use itertools::Itertools;

use super::{layout::Layout, styles};
use crate::models::Forecast;

/// Padding added below the lowest low and above the highest high, in °F
pub const RANGE_PADDING: f32 = 10.0;
/// Spacing of the horizontal gridlines, in °F
pub const GRID_STEP: f32 = 10.0;
/// Left gutter reserved for gridline labels
const LABEL_GUTTER: i32 = 30;

pub trait Scalable<T>
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>,
{
    fn scale_between_ranges(&self, input_range: &Range<T>, output_range: &Range<T>) -> T;
}

impl<T> Scalable<T> for T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>,
{
    fn scale_between_ranges(&self, input_range: &Range<T>, output_range: &Range<T>) -> T {
        (*self - input_range.start) * (output_range.end - output_range.start)
            / (input_range.end - input_range.start)
            + output_range.start
    }
}

/// Maps temperatures onto the vertical extent of the graph band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureScale {
    min: f32,
    max: f32,
    top: i32,
    height: u32,
}

impl TemperatureScale {
    #[must_use]
    pub fn new(min: f32, max: f32, top: i32, height: u32) -> Self {
        Self { min, max, top, height }
    }

    /// Padded range of a forecast, placed on the graph band
    #[must_use]
    pub fn for_forecast(forecast: &Forecast, graph: &Rectangle) -> Self {
        let (low, high) = forecast.temperature_bounds();
        Self::new(
            low - RANGE_PADDING,
            high + RANGE_PADDING,
            graph.top_left.y,
            graph.size.height,
        )
    }

    #[must_use]
    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    fn span(&self) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f32::EPSILON { 1.0 } else { span }
    }

    /// Row for a temperature; `min` lands on the bottom edge, `max` on the top
    #[must_use]
    pub fn y_for(&self, value: f32) -> i32 {
        let bottom = (self.top + self.height as i32) as f32;
        let y = value.scale_between_ranges(
            &(self.min..self.min + self.span()),
            &(bottom..self.top as f32),
        );
        y.round() as i32
    }

    /// Multiples of [`GRID_STEP`] inside the padded range
    #[must_use]
    pub fn gridlines(&self) -> Vec<f32> {
        let first = (self.min / GRID_STEP).ceil() as i32;
        let last = (self.max / GRID_STEP).floor() as i32;
        (first..=last).map(|step| step as f32 * GRID_STEP).collect()
    }
}

/// One forecast series, one point per day slot
pub struct TemperatureLine {
    points: Vec<Point>,
    thickness: u32,
}

impl TemperatureLine {
    pub fn new(scale: &TemperatureScale, layout: &Layout, values: impl Iterator<Item = f32>) -> Self {
        let points = values
            .enumerate()
            .map(|(day, v)| Point::new(layout.slot_center(day), scale.y_for(v)))
            .collect();
        Self { points, thickness: 2 }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Drawable for TemperatureLine {
    type Color = BinaryColor;
    type Output = ();

    fn draw<D: DrawTarget<Color = BinaryColor>>(&self, target: &mut D) -> Result<(), D::Error> {
        let stroke = PrimitiveStyle::with_stroke(styles::INK, self.thickness);
        self.points
            .iter()
            .tuple_windows()
            .try_for_each(|(prev, point)| Line::new(*prev, *point).into_styled(stroke).draw(target))?;

        let marker = PrimitiveStyle::with_fill(styles::INK);
        self.points
            .iter()
            .try_for_each(|p| Circle::with_center(*p, 5).into_styled(marker).draw(target))
    }
}

/// Horizontal gridlines with their degree labels in the left gutter
pub struct Gridlines<'a> {
    scale: &'a TemperatureScale,
    graph: Rectangle,
}

impl<'a> Gridlines<'a> {
    pub fn new(scale: &'a TemperatureScale, graph: Rectangle) -> Self {
        Self { scale, graph }
    }
}

impl Drawable for Gridlines<'_> {
    type Color = BinaryColor;
    type Output = ();

    fn draw<D: DrawTarget<Color = BinaryColor>>(&self, target: &mut D) -> Result<(), D::Error> {
        let stroke = PrimitiveStyle::with_stroke(styles::INK, 1);
        let left = self.graph.top_left.x;
        let right = left + self.graph.size.width as i32 - 1;
        for value in self.scale.gridlines() {
            let y = self.scale.y_for(value);
            Line::new(Point::new(left + LABEL_GUTTER, y), Point::new(right, y))
                .into_styled(stroke)
                .draw(target)?;
            Text::with_text_style(
                &format!("{value:.0}°"),
                Point::new(left + 2, y),
                styles::SMALL,
                styles::LEFT_MIDDLE,
            )
            .draw(target)?;
        }
        Ok(())
    }
}
