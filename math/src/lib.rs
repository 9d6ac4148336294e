//! `no_std` geometry primitives.
//!
//! Everything here is generic over the coordinate type so the same code serves
//! unsigned device coordinates (`Point16`, `Rect16`) and signed drawing
//! coordinates that may hang off the edge of a target (`SPoint16`, `SRect16`).

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod path;
mod point;
mod rect;
mod size;

pub use path::{Path, SPath16};
pub use point::{Point, Point16, SPoint16};
pub use rect::{Orientation, Rect, Rect16, SRect16};
pub use size::{SSize16, Size, Size16};

/// Integer types usable as coordinates.
///
/// This is just a bundle of `num_traits` bounds; it is implemented for every
/// primitive integer.
pub trait Coord: num_traits::PrimInt + core::fmt::Debug + Default {}

impl<T> Coord for T where T: num_traits::PrimInt + core::fmt::Debug + Default {}

/// Converts between coordinate types, saturating at the bounds of the target
/// type instead of failing.
pub fn saturate<T: Coord, U: Coord>(value: T) -> U {
    match <U as num_traits::NumCast>::from(value) {
        Some(v) => v,
        None if value < T::zero() => U::min_value(),
        None => U::max_value(),
    }
}
