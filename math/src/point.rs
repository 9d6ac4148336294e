use crate::{Coord, Rect};

/// A location in 2D space.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

/// Unsigned 16-bit point, the coordinate space of targets.
pub type Point16 = Point<u16>;
/// Signed 16-bit point, the coordinate space of drawing operations.
pub type SPoint16 = Point<i16>;

impl<T: Coord> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }

    /// Moves the point by `(dx, dy)`.
    pub fn offset(self, dx: T, dy: T) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Converts to another coordinate type, or `None` if either component
    /// doesn't fit.
    pub fn cast<U: Coord>(self) -> Option<Point<U>> {
        Some(Point::new(num_traits::cast(self.x)?, num_traits::cast(self.y)?))
    }

    /// Pulls the point into `bounds`, which may be in any orientation.
    pub fn clamp_to(self, bounds: &Rect<T>) -> Self {
        let clamp = |v: T, lo: T, hi: T| {
            if v < lo {
                lo
            } else if v > hi {
                hi
            } else {
                v
            }
        };
        Point::new(
            clamp(self.x, bounds.left(), bounds.right()),
            clamp(self.y, bounds.top(), bounds.bottom()),
        )
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from(p: (T, T)) -> Self {
        Point { x: p.0, y: p.1 }
    }
}
