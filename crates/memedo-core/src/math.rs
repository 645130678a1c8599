use serde::{Deserialize, Serialize};

/// A pixel position on a canvas, origin top-left, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Offset this point by `(dx, dy)`.
    pub fn offset(&self, dx: i32, dy: i32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_offset() {
        let p = Point::new(50, 250).offset(0, 40);
        assert_eq!(p, Point::new(50, 290));
    }

    #[test]
    fn test_point_from_tuple() {
        let p: Point = (575, 100).into();
        assert_eq!(p.x, 575);
        assert_eq!(p.y, 100);
        assert_eq!(Point::default(), Point::zero());
    }
}
