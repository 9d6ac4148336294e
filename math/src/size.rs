use crate::{Coord, Point, Rect};

/// Width and height of a region, in pixels.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

pub type Size16 = Size<u16>;
pub type SSize16 = Size<i16>;

impl<T: Coord> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    /// A size with no area can't hold any pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= T::zero() || self.height <= T::zero()
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.width.to_usize().unwrap_or(0) * self.height.to_usize().unwrap_or(0)
    }

    /// The rectangle from `(0, 0)` covering this size.
    ///
    /// An empty size produces a one-pixel rectangle at the origin; check
    /// `is_empty` first where that matters.
    pub fn bounds(&self) -> Rect<T> {
        let one = T::one();
        Rect::from_xyxy(
            T::zero(),
            T::zero(),
            self.width.saturating_sub(one),
            self.height.saturating_sub(one),
        )
    }

    pub fn cast<U: Coord>(self) -> Option<Size<U>> {
        Some(Size::new(
            num_traits::cast(self.width)?,
            num_traits::cast(self.height)?,
        ))
    }

    /// Rectangle of this size with its top-left corner at `location`.
    pub fn at(&self, location: Point<T>) -> Rect<T> {
        Rect::from_location_size(location, *self)
    }
}
