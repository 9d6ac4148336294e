//! Axis-aligned rectangles with inclusive corners.
//!
//! A `Rect` stores two corner points and is *not* forced into normal order: a
//! rectangle whose first corner is right of (or below) its second is
//! "flipped", and drawing operations use that to mirror blits and select arc
//! quadrants. Accessors like `left` and `width` are orientation-independent.

use arrayvec::ArrayVec;
use bitflags::bitflags;
use core::cmp::{max, min};
use num_traits::Signed;

use crate::{Coord, Point, Size};

bitflags! {
    /// Which axes of a rectangle run backwards.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Orientation: u8 {
        /// `x1 > x2`.
        const FLIPPED_HORIZONTAL = 1;
        /// `y1 > y2`.
        const FLIPPED_VERTICAL = 2;
    }
}

impl Orientation {
    /// Corners in increasing order on both axes.
    pub const NORMALIZED: Orientation = Orientation::empty();
}

/// A rectangle given by two inclusive corners, `(x1, y1)` and `(x2, y2)`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rect<T> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

pub type Rect16 = Rect<u16>;
pub type SRect16 = Rect<i16>;

/// Inclusive distance between two coordinates, saturated to `T`'s range.
fn span<T: Coord>(a: T, b: T) -> T {
    let (hi, lo) = if a > b { (a, b) } else { (b, a) };
    match hi.checked_sub(&lo) {
        Some(d) => d.saturating_add(T::one()),
        None => T::max_value(),
    }
}

impl<T: Coord> Rect<T> {
    pub fn new(p1: Point<T>, p2: Point<T>) -> Self {
        Rect::from_xyxy(p1.x, p1.y, p2.x, p2.y)
    }

    pub fn from_xyxy(x1: T, y1: T, x2: T, y2: T) -> Self {
        Rect { x1, y1, x2, y2 }
    }

    /// Normalized rectangle with its top-left corner at `location`.
    ///
    /// A zero dimension produces a rectangle one pixel wide (or tall) along
    /// that axis, since rects can't represent emptiness.
    pub fn from_location_size(location: Point<T>, size: Size<T>) -> Self {
        let one = T::one();
        let w = if size.width > T::zero() { size.width - one } else { T::zero() };
        let h = if size.height > T::zero() { size.height - one } else { T::zero() };
        Rect::from_xyxy(location.x, location.y, location.x + w, location.y + h)
    }

    pub fn left(&self) -> T {
        min(self.x1, self.x2)
    }

    pub fn right(&self) -> T {
        max(self.x1, self.x2)
    }

    pub fn top(&self) -> T {
        min(self.y1, self.y2)
    }

    pub fn bottom(&self) -> T {
        max(self.y1, self.y2)
    }

    /// Number of columns covered. Always at least one.
    pub fn width(&self) -> T {
        span(self.x1, self.x2)
    }

    /// Number of rows covered. Always at least one.
    pub fn height(&self) -> T {
        span(self.y1, self.y2)
    }

    pub fn dimensions(&self) -> Size<T> {
        Size::new(self.width(), self.height())
    }

    /// The top-left corner, regardless of orientation.
    pub fn location(&self) -> Point<T> {
        self.top_left()
    }

    pub fn point1(&self) -> Point<T> {
        Point::new(self.x1, self.y1)
    }

    pub fn point2(&self) -> Point<T> {
        Point::new(self.x2, self.y2)
    }

    pub fn top_left(&self) -> Point<T> {
        Point::new(self.left(), self.top())
    }

    pub fn top_right(&self) -> Point<T> {
        Point::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Point<T> {
        Point::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Point<T> {
        Point::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point<T> {
        let two = T::one() + T::one();
        Point::new(
            (self.left() + self.right()) / two,
            (self.top() + self.bottom()) / two,
        )
    }

    pub fn orientation(&self) -> Orientation {
        let mut o = Orientation::NORMALIZED;
        if self.x1 > self.x2 {
            o |= Orientation::FLIPPED_HORIZONTAL;
        }
        if self.y1 > self.y2 {
            o |= Orientation::FLIPPED_VERTICAL;
        }
        o
    }

    pub fn is_normalized(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Reorders the corners so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalize(&self) -> Self {
        Rect::from_xyxy(self.left(), self.top(), self.right(), self.bottom())
    }

    pub fn flip_horizontal(&self) -> Self {
        Rect::from_xyxy(self.x2, self.y1, self.x1, self.y2)
    }

    pub fn flip_vertical(&self) -> Self {
        Rect::from_xyxy(self.x1, self.y2, self.x2, self.y1)
    }

    pub fn flip_all(&self) -> Self {
        Rect::from_xyxy(self.x2, self.y2, self.x1, self.y1)
    }

    /// Moves the rectangle by `(dx, dy)`, keeping its orientation.
    pub fn offset(&self, dx: T, dy: T) -> Self {
        Rect::from_xyxy(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }

    pub fn offset_point(&self, delta: Point<T>) -> Self {
        self.offset(delta.x, delta.y)
    }

    /// True if `point` lies inside the rectangle, edges included.
    pub fn contains(&self, point: Point<T>) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// True if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect<T>) -> bool {
        self.contains(other.top_left()) && self.contains(other.bottom_right())
    }

    /// True if the rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect<T>) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }

    /// Same as `contains`, named for symmetry with `intersects`.
    pub fn intersects_point(&self, point: Point<T>) -> bool {
        self.contains(point)
    }

    /// Clamps each edge to `bounds`, preserving this rectangle's orientation.
    ///
    /// If the rectangles don't intersect, the result collapses onto the
    /// nearest edge of `bounds`; test with `intersects` first where that
    /// matters.
    pub fn crop(&self, bounds: &Rect<T>) -> Self {
        let cx = |v: T| max(bounds.left(), min(v, bounds.right()));
        let cy = |v: T| max(bounds.top(), min(v, bounds.bottom()));
        Rect::from_xyxy(cx(self.x1), cy(self.y1), cx(self.x2), cy(self.y2))
    }

    /// Splits this rectangle into the pieces left over after removing the
    /// area it shares with `cut`.
    ///
    /// Pieces are produced in a fixed order: the band above the cut, the
    /// piece left of it, the piece right of it, and the band below it. At
    /// most `max_out` pieces are returned. If the rectangles don't intersect,
    /// the result is this rectangle alone (normalized).
    pub fn split(&self, cut: &Rect<T>, max_out: usize) -> ArrayVec<[Rect<T>; 4]> {
        let mut out = ArrayVec::new();
        if max_out == 0 {
            return out;
        }
        let me = self.normalize();
        if !me.intersects(cut) {
            out.push(me);
            return out;
        }
        let c = cut.normalize().crop(&me);
        let one = T::one();
        let mut pieces: [Option<Rect<T>>; 4] = [None; 4];
        if c.top() > me.top() {
            pieces[0] = Some(Rect::from_xyxy(me.x1, me.y1, me.x2, c.y1 - one));
        }
        if c.left() > me.left() {
            pieces[1] = Some(Rect::from_xyxy(me.x1, c.y1, c.x1 - one, c.y2));
        }
        if c.right() < me.right() {
            pieces[2] = Some(Rect::from_xyxy(c.x2 + one, c.y1, me.x2, c.y2));
        }
        if c.bottom() < me.bottom() {
            pieces[3] = Some(Rect::from_xyxy(me.x1, c.y2 + one, me.x2, me.y2));
        }
        for piece in pieces.iter().filter_map(|p| *p) {
            if out.len() == max_out {
                break;
            }
            out.push(piece);
        }
        out
    }

    /// Converts to another coordinate type, or `None` if any corner doesn't
    /// fit.
    pub fn cast<U: Coord>(self) -> Option<Rect<U>> {
        Some(Rect::new(self.point1().cast()?, self.point2().cast()?))
    }
}

impl<T: Coord + Signed> Rect<T> {
    /// Grows the rectangle by `dx` on the left and right and `dy` on the top
    /// and bottom (negative values shrink it). A flipped rectangle stays
    /// flipped and still grows outward.
    pub fn inflate(&self, dx: T, dy: T) -> Self {
        let (x1, x2) = if self.x1 <= self.x2 {
            (self.x1 - dx, self.x2 + dx)
        } else {
            (self.x1 + dx, self.x2 - dx)
        };
        let (y1, y2) = if self.y1 <= self.y2 {
            (self.y1 - dy, self.y2 + dy)
        } else {
            (self.y1 + dy, self.y2 - dy)
        };
        Rect::from_xyxy(x1, y1, x2, y2)
    }
}
