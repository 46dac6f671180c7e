//! Screen geometry
//!
//! Every anchor the engine draws at is derived here from the canvas size, so
//! the same code lays out an 800x480 panel or a smaller test canvas.

use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::models::FORECAST_DAYS;

/// Height of the header band
pub const HEADER_HEIGHT: u32 = 40;
/// Outer margin around blocks
pub const MARGIN: u32 = 8;
/// Radius of the wind compass ring
pub const COMPASS_RADIUS: u32 = 30;
/// Target height of the forecast graph band
pub const GRAPH_HEIGHT: u32 = 150;
/// Line height of the footer labels
const FOOTER_LINE: u32 = 12;
/// Shortest graph band that still separates gridlines and labels
pub const MIN_GRAPH_HEIGHT: u32 = 60;
/// Narrowest metrics column that holds a label and its reading
pub const MIN_METRIC_COLUMN: u32 = 128;

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,

    pub location_anchor: Point,
    pub timestamp_anchor: Point,
    pub header_rule_y: i32,

    /// Large icon box, W/6 square
    pub current_icon: Rectangle,
    /// Top-left of the large temperature readout
    pub temperature_anchor: Point,
    pub feels_like_anchor: Point,

    pub compass_center: Point,
    pub compass_radius: u32,
    pub wind_speed_anchor: Point,
    pub wind_gust_anchor: Point,

    /// Humidity, pressure, rain rate, rain total; left-aligned, vertically centered
    pub metric_anchors: [Point; 4],

    pub graph: Rectangle,

    /// Footer icon edge, W/10
    pub footer_icon_size: u32,
    pub footer_top: i32,
}

impl Layout {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let margin = MARGIN as i32;
        let header = HEADER_HEIGHT as i32;
        let w = width as i32;

        let icon_size = width / 6;
        let current_icon = Rectangle::new(Point::new(margin, header + margin), Size::new(icon_size, icon_size));
        let icon_right = current_icon.top_left.x + icon_size as i32;
        let temperature_anchor = Point::new(icon_right + 2 * margin, current_icon.top_left.y + margin);
        let feels_like_anchor = Point::new(
            temperature_anchor.x,
            current_icon.top_left.y + icon_size as i32 - 2 * margin,
        );

        let compass_center = Point::new(w * 3 / 4, header + margin + COMPASS_RADIUS as i32 + 10);
        let below_compass = compass_center.y + COMPASS_RADIUS as i32;
        let wind_speed_anchor = Point::new(compass_center.x, below_compass + 14);
        let wind_gust_anchor = Point::new(compass_center.x, below_compass + 30);

        let block_bottom = (current_icon.top_left.y + icon_size as i32).max(wind_gust_anchor.y + 6);
        let metrics_y = block_bottom + 2 * margin;
        let quarter = w / 4;
        let metric_anchors = [0, 1, 2, 3].map(|i| Point::new(margin + i * quarter, metrics_y));

        let footer_icon_size = width / 10;
        let footer_top = height as i32 - (footer_icon_size + 2 * FOOTER_LINE) as i32 - margin / 2;

        let graph_top = metrics_y + 2 * margin;
        let available = (footer_top - margin - graph_top).max(1) as u32;
        let graph = Rectangle::new(Point::new(0, graph_top), Size::new(width, GRAPH_HEIGHT.min(available)));

        Self {
            width,
            height,
            location_anchor: Point::new(w / 2, header / 2),
            timestamp_anchor: Point::new(w - margin, header / 2),
            header_rule_y: header,
            current_icon,
            temperature_anchor,
            feels_like_anchor,
            compass_center,
            compass_radius: COMPASS_RADIUS,
            wind_speed_anchor,
            wind_gust_anchor,
            metric_anchors,
            graph,
            footer_icon_size,
            footer_top,
        }
    }

    /// Whether every band fits on the canvas without overlapping its neighbours
    #[must_use]
    pub fn fits(&self) -> bool {
        let graph_bottom = self.graph.top_left.y + self.graph.size.height as i32;
        self.graph.size.height >= MIN_GRAPH_HEIGHT
            && graph_bottom <= self.footer_top - MARGIN as i32
            && self.width / 4 >= MIN_METRIC_COLUMN
    }

    /// Horizontal center of a forecast day column, rounded to the nearest pixel
    #[must_use]
    pub fn slot_center(&self, day: usize) -> i32 {
        let columns = 2 * FORECAST_DAYS as i32;
        ((2 * day as i32 + 1) * self.width as i32 + columns / 2) / columns
    }

    /// Box of the footer icon for a forecast day
    #[must_use]
    pub fn footer_icon(&self, day: usize) -> Rectangle {
        let size = self.footer_icon_size;
        Rectangle::new(
            Point::new(self.slot_center(day) - size as i32 / 2, self.footer_top),
            Size::new(size, size),
        )
    }

    /// Top-center anchors of the day and date labels below a footer icon
    #[must_use]
    pub fn footer_labels(&self, day: usize) -> (Point, Point) {
        let x = self.slot_center(day);
        let below_icon = self.footer_top + self.footer_icon_size as i32;
        (
            Point::new(x, below_icon + 1),
            Point::new(x, below_icon + 1 + FOOTER_LINE as i32),
        )
    }
}
