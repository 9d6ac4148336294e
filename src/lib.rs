//! A raster graphics engine for small, memory-constrained displays.
//!
//! The engine draws into anything implementing `target::Destination`: an
//! in-memory `Bitmap` over a caller-owned buffer, or a display driver that
//! declares which accelerated operations it has through `target::Caps`. Pixels
//! can be of any format declared with `pixel_format!`, from 1-bit monochrome
//! to 64-bit multi-channel, and colors are converted between formats (and
//! through palettes) as they are drawn.
//!
//! Layout of the workspace:
//!
//! - `gfx` has the bit-level buffer primitives and Bresenham line stepping.
//! - `math` has the geometry: points, sizes, rectangles and paths.
//! - This crate has the pixel model, palettes, bitmaps, the target contracts
//!   and the drawing engine in `draw`.
//!
//! Everything is `no_std`. The `alloc` feature adds `Bitmap::allocate`; the
//! `std` feature adds an adapter from `std::io` to `stream::Stream`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;

pub mod bitmap;
pub mod draw;
pub mod font;
pub mod image;
pub mod palette;
pub mod pixel;
pub mod sample;
pub mod stream;
pub mod target;

#[cfg(test)]
mod testing;

pub use crate::bitmap::Bitmap;
pub use crate::error::{Error, Result};
pub use crate::pixel::{Format, Pixel};
pub use crate::target::{Caps, Destination, Source, Target};

pub use math::{
    Orientation, Path, Point, Point16, Rect, Rect16, SPath16, SPoint16, SRect16, SSize16, Size,
    Size16,
};
