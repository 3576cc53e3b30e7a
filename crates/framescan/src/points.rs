//! Coordinate correction for reported points.
//!
//! Rotation is already baked into the frame's addressing before decode
//! runs, so candidate points come out in rotated space. Only the
//! independent front-camera mirror needs a post-hoc correction before the
//! points are shown over a preview.

use framescan_core::Point;

/// Mirror a point about the vertical axis of a frame `width` pixels wide.
pub fn mirror_horizontal(point: Point, width: usize) -> Point {
    Point::new(width as f32 - point.x, point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_x_and_keeps_y() {
        let p = mirror_horizontal(Point::new(10.0, 20.0), 100);
        assert_eq!(p, Point::new(90.0, 20.0));
        let p = mirror_horizontal(Point::new(30.0, 40.0), 100);
        assert_eq!(p, Point::new(70.0, 40.0));
    }
}
