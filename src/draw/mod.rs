//! The drawing engine.
//!
//! Every operation takes a destination, geometry in signed coordinates, a
//! color in any pixel format and an optional clip rectangle. Geometry outside
//! the destination (or the clip) is cut away silently; only failures of the
//! destination itself, or of color conversion, are errors.
//!
//! Which destination primitive each write goes through is decided from the
//! destination's `CAPS`, at compile time: native block copies beat batches,
//! which beat single pixels. The `_async` variants use the destination's
//! asynchronous primitives when it has them and the synchronous ones
//! otherwise. Operations made of many writes run with the destination
//! suspended, if it supports that, so the whole shape appears at once.

mod blit;
mod ellipse;
mod helpers;
mod image;
mod line;
mod polygon;
mod rect;
mod text;

use math::{Point, Rect16, SPath16, SPoint16, SRect16};

use self::helpers::{suspended, Ink, Pen};
use crate::font::{Font, TextOptions};
use crate::image::Decoder;
use crate::pixel::{Format, Pixel};
use crate::target::{Destination, Source};
use crate::Result;

pub use crate::sample::Resize;

pub fn point<D: Destination, C: Format>(
    dst: &mut D,
    location: SPoint16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    line::point(dst, &pen, location)
}

pub fn point_async<D: Destination, C: Format>(
    dst: &mut D,
    location: SPoint16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, true)?;
    line::point(dst, &pen, location)
}

/// Draws a line from `(ends.x1, ends.y1)` to `(ends.x2, ends.y2)`, both
/// ends included.
pub fn line<D: Destination, C: Format>(
    dst: &mut D,
    ends: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| line::line(dst, &pen, ends))
}

pub fn line_async<D: Destination, C: Format>(
    dst: &mut D,
    ends: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, true)?;
    suspended(dst, true, |dst| line::line(dst, &pen, ends))
}

pub fn rectangle<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| rect::rectangle(dst, &pen, rect))
}

pub fn rectangle_async<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, true)?;
    suspended(dst, true, |dst| rect::rectangle(dst, &pen, rect))
}

/// Fills `rect`, in any orientation.
pub fn filled_rectangle<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    rect::filled_rectangle(dst, &pen, rect)
}

pub fn filled_rectangle_async<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, true)?;
    rect::filled_rectangle(dst, &pen, rect)
}

/// Outlines the ellipse inscribed in `rect`.
pub fn ellipse<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| ellipse::ellipse(dst, &pen, rect, false))
}

pub fn filled_ellipse<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| ellipse::ellipse(dst, &pen, rect, true))
}

/// Draws a quarter ellipse filling `rect`. The orientation of `rect` picks
/// the quarter: normalized is top-left, flipped horizontally top-right,
/// flipped vertically bottom-left, and flipped both ways bottom-right.
pub fn arc<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| ellipse::arc(dst, &pen, rect, false))
}

/// Like `arc`, filled out to the corner the quarter curves around.
pub fn filled_arc<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| ellipse::arc(dst, &pen, rect, true))
}

/// Outlines `rect` with corners rounded by `ratio` of its width and height
/// (clamped to `0.025..=0.5`).
pub fn rounded_rectangle<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    ratio: f64,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| rect::rounded_rectangle(dst, &pen, rect, ratio))
}

pub fn filled_rounded_rectangle<D: Destination, C: Format>(
    dst: &mut D,
    rect: &SRect16,
    ratio: f64,
    color: Pixel<C>,
    clip: Option<&SRect16>,
) -> Result<()> {
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| rect::filled_rounded_rectangle(dst, &pen, rect, ratio))
}

/// Outlines the closed polygon through the points of `path`.
pub fn polygon<D, C, B>(dst: &mut D, path: &SPath16<B>, color: Pixel<C>, clip: Option<&SRect16>) -> Result<()>
where
    D: Destination,
    C: Format,
    B: AsRef<[Point<i16>]>,
{
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| polygon::polygon(dst, &pen, path))
}

/// Fills the polygon through the points of `path`, by the even-odd rule.
pub fn filled_polygon<D, C, B>(dst: &mut D, path: &SPath16<B>, color: Pixel<C>, clip: Option<&SRect16>) -> Result<()>
where
    D: Destination,
    C: Format,
    B: AsRef<[Point<i16>]>,
{
    let pen = Pen::new(dst, color, clip, false)?;
    suspended(dst, false, |dst| polygon::filled_polygon(dst, &pen, path))
}

/// Draws `text` inside `rect`, wrapping at its right edge and stopping at
/// its bottom. `background` is used only if `options` ask for an opaque
/// background.
#[allow(clippy::too_many_arguments)]
pub fn text<D, C, F>(
    dst: &mut D,
    rect: &SRect16,
    text: &str,
    font: &F,
    color: Pixel<C>,
    background: Pixel<C>,
    options: &TextOptions,
    clip: Option<&SRect16>,
) -> Result<()>
where
    D: Destination,
    C: Format,
    F: Font + ?Sized,
{
    let pen = Pen::new(dst, color, clip, false)?;
    let bg = if options.transparent_background {
        Ink::Clear
    } else {
        Ink::new(dst, background)?
    };
    suspended(dst, false, |dst| text::text(dst, &pen, bg, rect, text, font, options))
}

#[allow(clippy::too_many_arguments)]
pub fn text_async<D, C, F>(
    dst: &mut D,
    rect: &SRect16,
    text: &str,
    font: &F,
    color: Pixel<C>,
    background: Pixel<C>,
    options: &TextOptions,
    clip: Option<&SRect16>,
) -> Result<()>
where
    D: Destination,
    C: Format,
    F: Font + ?Sized,
{
    let pen = Pen::new(dst, color, clip, true)?;
    let bg = if options.transparent_background {
        Ink::Clear
    } else {
        Ink::new(dst, background)?
    };
    suspended(dst, true, |dst| text::text(dst, &pen, bg, rect, text, font, options))
}

/// Draws `src_rect` of `src` into `dest_rect`, fitted by `resize`. Source
/// pixels equal to `transparent` are left out.
///
/// With `Resize::Crop` the smaller of the two rectangles is copied, and a
/// flipped `dest_rect` mirrors the image along the flipped axes.
#[allow(clippy::too_many_arguments)]
pub fn bitmap<D: Destination, S: Source>(
    dst: &mut D,
    dest_rect: &SRect16,
    src: &S,
    src_rect: &Rect16,
    resize: Resize,
    transparent: Option<Pixel<S::Format>>,
    clip: Option<&SRect16>,
) -> Result<()> {
    blit::bitmap(dst, dest_rect, src, src_rect, resize, transparent, clip, false)
}

#[allow(clippy::too_many_arguments)]
pub fn bitmap_async<D: Destination, S: Source>(
    dst: &mut D,
    dest_rect: &SRect16,
    src: &S,
    src_rect: &Rect16,
    resize: Resize,
    transparent: Option<Pixel<S::Format>>,
    clip: Option<&SRect16>,
) -> Result<()> {
    blit::bitmap(dst, dest_rect, src, src_rect, resize, transparent, clip, true)
}

/// Draws the image `decoder` produces with its top-left corner at
/// `location`. The decoder must already be initialized.
///
/// A decode canceled by the decoder returns `Ok(())`.
pub fn image<D, Dec>(dst: &mut D, location: SPoint16, decoder: &mut Dec, clip: Option<&SRect16>) -> Result<()>
where
    D: Destination,
    Dec: Decoder + ?Sized,
{
    image::image(dst, location, decoder, clip, false)
}

/// Suspends visible updates of `dst` until the matching `resume`. Does
/// nothing if the destination can't.
pub fn suspend<D: Destination>(dst: &mut D) -> Result<()> {
    if D::CAPS.suspend {
        dst.suspend()
    } else {
        Ok(())
    }
}

pub fn resume<D: Destination>(dst: &mut D) -> Result<()> {
    if D::CAPS.suspend {
        dst.resume()
    } else {
        Ok(())
    }
}

/// Blocks until every asynchronous operation on `dst` has finished.
pub fn wait_all_async<D: Destination>(dst: &mut D) -> Result<()> {
    if D::CAPS.async_ {
        dst.wait_all_async()
    } else {
        Ok(())
    }
}
