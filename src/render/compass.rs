//! Wind compass: ring, north marker and direction arrow

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
    text::Text,
};

use super::styles;

/// Arrow length as a fraction of the ring radius
const ARROW_REACH: f32 = 0.7;
/// Length of each arrowhead barb
const BARB_LENGTH: f32 = 8.0;
/// Barb angle relative to the arrow bearing
const BARB_ANGLE: f32 = 150.0;

/// Point at `distance` from `center` along a compass bearing (0° up, clockwise)
fn along_bearing(center: Point, distance: f32, bearing_deg: f32) -> Point {
    let theta = bearing_deg.to_radians();
    Point::new(
        center.x + (distance * theta.sin()).round() as i32,
        center.y - (distance * theta.cos()).round() as i32,
    )
}

/// Tip of the wind arrow for a bearing in degrees
#[must_use]
pub fn arrow_tip(center: Point, radius: u32, bearing_deg: f32) -> Point {
    along_bearing(center, ARROW_REACH * radius as f32, bearing_deg)
}

pub struct Compass {
    center: Point,
    radius: u32,
    direction: Option<u16>,
}

impl Compass {
    #[must_use]
    pub fn new(center: Point, radius: u32, direction: Option<u16>) -> Self {
        Self {
            center,
            radius,
            direction,
        }
    }
}

impl Drawable for Compass {
    type Color = BinaryColor;
    type Output = ();

    fn draw<D: DrawTarget<Color = BinaryColor>>(&self, target: &mut D) -> Result<(), D::Error> {
        let stroke = PrimitiveStyle::with_stroke(styles::INK, 2);
        Circle::with_center(self.center, self.radius * 2)
            .into_styled(stroke)
            .draw(target)?;

        Text::with_text_style(
            "N",
            self.center - Point::new(0, self.radius as i32 + 7),
            styles::SMALL,
            styles::CENTERED,
        )
        .draw(target)?;

        let Some(direction) = self.direction else {
            return Ok(());
        };
        let bearing = f32::from(direction % 360);
        let tip = arrow_tip(self.center, self.radius, bearing);
        Line::new(self.center, tip).into_styled(stroke).draw(target)?;
        for barb in [BARB_ANGLE, -BARB_ANGLE] {
            let end = along_bearing(tip, BARB_LENGTH, bearing + barb);
            Line::new(tip, end).into_styled(stroke).draw(target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layer::MonoLayer;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Point::new(100, 79))]
    #[case(90.0, Point::new(121, 100))]
    #[case(180.0, Point::new(100, 121))]
    #[case(270.0, Point::new(79, 100))]
    fn test_arrow_tip(#[case] bearing: f32, #[case] expected: Point) {
        assert_eq!(arrow_tip(Point::new(100, 100), 30, bearing), expected);
    }

    #[test]
    fn test_arrow_stays_inside_ring() {
        let center = Point::new(50, 50);
        for bearing in (0..360).step_by(15) {
            let tip = arrow_tip(center, 30, bearing as f32);
            let offset = tip - center;
            assert!(offset.x * offset.x + offset.y * offset.y <= 22 * 22);
        }
    }

    #[test]
    fn test_north_arrow_inks_above_center() {
        let mut layer = MonoLayer::new(100, 100);
        Compass::new(Point::new(50, 50), 30, Some(0))
            .draw(&mut layer)
            .unwrap();
        assert!(layer.is_set(50, 35));
        assert!(!layer.is_set(50, 65));
    }

    #[test]
    fn test_missing_direction_draws_ring_only() {
        let mut with_arrow = MonoLayer::new(100, 100);
        let mut without = MonoLayer::new(100, 100);
        Compass::new(Point::new(50, 50), 30, Some(90))
            .draw(&mut with_arrow)
            .unwrap();
        Compass::new(Point::new(50, 50), 30, None)
            .draw(&mut without)
            .unwrap();
        assert!(!without.is_set(60, 50));
        assert!(with_arrow.is_set(60, 50));
        assert!(without.ink_count() > 0);
    }
}
