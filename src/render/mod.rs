//! Layout engine: turns a weather snapshot into black and red layers
//!
//! Drawing order follows the panel from top to bottom: header, current
//! conditions, wind compass, metrics row, forecast graph and footer. All
//! geometry comes from [`Layout`]; this module only decides what ink goes
//! where and on which layer.

pub mod chart;
pub mod compass;
pub mod layer;
pub mod layout;
pub mod styles;

use std::sync::Arc;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
    text::{Baseline, Text, renderer::TextRenderer},
};
use tracing::{debug, warn};

pub use layer::MonoLayer;
pub use layout::Layout;

use crate::conditions::IconId;
use crate::icons::IconSource;
use crate::models::{CurrentConditions, Forecast, WeatherSnapshot};
use chart::{Gridlines, TemperatureLine, TemperatureScale};
use compass::Compass;

/// Magnification of the large temperature readout
const TEMPERATURE_SCALE: u32 = 2;
/// Diameter of the degree ring after the large temperature
const DEGREE_RING: u32 = 12;

/// The two color planes of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub black: MonoLayer,
    pub red: MonoLayer,
}

pub struct LayoutEngine {
    layout: Layout,
    location: String,
    icons: Arc<dyn IconSource>,
}

impl LayoutEngine {
    pub fn new(width: u32, height: u32, location: impl Into<String>, icons: Arc<dyn IconSource>) -> Self {
        Self {
            layout: Layout::new(width, height),
            location: location.into(),
            icons,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Render a full frame. Missing icons are skipped; everything else always draws.
    #[must_use]
    pub fn render(&self, snapshot: &WeatherSnapshot) -> RenderedFrame {
        let (width, height) = (self.layout.width, self.layout.height);
        let mut black = MonoLayer::new(width, height);
        let mut red = MonoLayer::new(width, height);

        self.draw_header(&mut black, &snapshot.format_timestamp());
        self.draw_current(&mut black, &mut red, snapshot);
        self.draw_wind(&mut black, &snapshot.current);
        self.draw_metrics(&mut black, &snapshot.current);
        self.draw_graph(&mut black, &mut red, &snapshot.forecast);
        self.draw_footer(&mut black, &snapshot.forecast);

        debug!(
            black_ink = black.ink_count(),
            red_ink = red.ink_count(),
            "Rendered frame"
        );
        RenderedFrame { black, red }
    }

    fn draw_header(&self, black: &mut MonoLayer, timestamp: &str) {
        let layout = &self.layout;
        paint(
            black,
            &Text::with_text_style(&self.location, layout.location_anchor, styles::TITLE, styles::CENTERED),
        );
        paint(
            black,
            &Text::with_text_style(timestamp, layout.timestamp_anchor, styles::LABEL, styles::RIGHT_MIDDLE),
        );
        let rule_y = layout.header_rule_y - 1;
        paint(
            black,
            &Line::new(Point::new(0, rule_y), Point::new(layout.width as i32 - 1, rule_y))
                .into_styled(PrimitiveStyle::with_stroke(styles::INK, 1)),
        );
    }

    fn draw_current(&self, black: &mut MonoLayer, red: &mut MonoLayer, snapshot: &WeatherSnapshot) {
        let layout = &self.layout;
        let icon_box = layout.current_icon;
        self.draw_icon(black, snapshot.current_icon(), icon_box.top_left, icon_box.size.width);

        let temperature = snapshot.current.format_temperature();
        let readout_width = draw_enlarged(red, &temperature, layout.temperature_anchor, TEMPERATURE_SCALE);
        if snapshot.current.temperature.is_some() {
            let ring = Point::new(
                layout.temperature_anchor.x + readout_width as i32 + 4,
                layout.temperature_anchor.y + 4,
            );
            paint(
                red,
                &Circle::new(ring, DEGREE_RING).into_styled(PrimitiveStyle::with_stroke(styles::INK, 3)),
            );
        }

        paint(
            black,
            &Text::with_text_style(
                &snapshot.current.format_feels_like(),
                layout.feels_like_anchor,
                styles::LABEL,
                styles::LEFT_MIDDLE,
            ),
        );
    }

    fn draw_wind(&self, black: &mut MonoLayer, current: &CurrentConditions) {
        let layout = &self.layout;
        paint(
            black,
            &Compass::new(layout.compass_center, layout.compass_radius, current.wind_direction),
        );
        let (speed, gust) = current.format_wind();
        for (text, anchor) in [(speed, layout.wind_speed_anchor), (gust, layout.wind_gust_anchor)] {
            paint(
                black,
                &Text::with_text_style(&text, anchor, styles::LABEL, styles::CENTERED),
            );
        }
    }

    fn draw_metrics(&self, black: &mut MonoLayer, current: &CurrentConditions) {
        let labels = [
            current.format_humidity(),
            current.format_pressure(),
            current.format_rain_rate(),
            current.format_rain_total(),
        ];
        for (text, anchor) in labels.iter().zip(self.layout.metric_anchors) {
            paint(
                black,
                &Text::with_text_style(text, anchor, styles::LABEL, styles::LEFT_MIDDLE),
            );
        }
    }

    fn draw_graph(&self, black: &mut MonoLayer, red: &mut MonoLayer, forecast: &Forecast) {
        let layout = &self.layout;
        let scale = TemperatureScale::for_forecast(forecast, &layout.graph);
        paint(black, &Gridlines::new(&scale, layout.graph));
        paint(red, &TemperatureLine::new(&scale, layout, forecast.highs()));
        paint(black, &TemperatureLine::new(&scale, layout, forecast.lows()));
    }

    fn draw_footer(&self, black: &mut MonoLayer, forecast: &Forecast) {
        let layout = &self.layout;
        for (day, entry) in forecast.days().iter().enumerate() {
            self.draw_icon(black, entry.icon, layout.footer_icon(day).top_left, layout.footer_icon_size);
            let (day_anchor, date_anchor) = layout.footer_labels(day);
            paint(
                black,
                &Text::with_text_style(&entry.day_label, day_anchor, styles::SMALL, styles::CENTERED_TOP),
            );
            paint(
                black,
                &Text::with_text_style(&entry.date_label, date_anchor, styles::SMALL, styles::CENTERED_TOP),
            );
        }
    }

    fn draw_icon(&self, target: &mut MonoLayer, icon: IconId, top_left: Point, size: u32) {
        match self.icons.icon(icon, size) {
            Ok(bitmap) => blit(target, &bitmap, top_left, 1),
            Err(e) => warn!(icon = %icon, error = %e, "Icon unavailable, skipping"),
        }
    }
}

/// Draw onto a layer; drawing into memory cannot fail
fn paint<T>(layer: &mut MonoLayer, item: &T)
where
    T: Drawable<Color = BinaryColor>,
{
    let Ok(_) = item.draw(layer);
}

/// Copy the ink of `source` onto `target`, each pixel magnified `scale` times
pub fn blit(target: &mut MonoLayer, source: &MonoLayer, top_left: Point, scale: u32) {
    let scale = scale.max(1) as i32;
    for p in source.ink_points() {
        let origin = top_left + p * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                target.set(origin.x + dx, origin.y + dy, true);
            }
        }
    }
}

/// Render `text` in the large value font at `scale`; returns the drawn width
fn draw_enlarged(target: &mut MonoLayer, text: &str, top_left: Point, scale: u32) -> u32 {
    let size = styles::VALUE
        .measure_string(text, Point::zero(), Baseline::Top)
        .bounding_box
        .size;
    let mut scratch = MonoLayer::new(size.width, size.height);
    paint(
        &mut scratch,
        &Text::with_text_style(text, Point::zero(), styles::VALUE, styles::LEFT_TOP),
    );
    blit(target, &scratch, top_left, scale);
    size.width * scale
}
