//! Rectangles, plain and rounded.

use math::{saturate, SPoint16, SRect16, SSize16};

use super::ellipse::arc;
use super::helpers::{clip_rect, fill, Pen};
use super::line::line;
use crate::target::Destination;
use crate::Result;

/// A rectangle from wide coordinates, saturated to `i16`.
pub(crate) fn srect(x1: i32, y1: i32, x2: i32, y2: i32) -> SRect16 {
    SRect16::from_xyxy(saturate(x1), saturate(y1), saturate(x2), saturate(y2))
}

pub(crate) fn filled_rectangle<D: Destination>(dst: &mut D, pen: &Pen<D::Format>, rect: &SRect16) -> Result<()> {
    match clip_rect(rect, pen.area) {
        Some(r) => fill(dst, &r, &pen.ink, pen.async_),
        None => Ok(()),
    }
}

/// Outline: top, left, right and bottom edges, in that order.
pub(crate) fn rectangle<D: Destination>(dst: &mut D, pen: &Pen<D::Format>, rect: &SRect16) -> Result<()> {
    let r = rect;
    line(dst, pen, &SRect16::from_xyxy(r.x1, r.y1, r.x2, r.y1))?;
    line(dst, pen, &SRect16::from_xyxy(r.x1, r.y1, r.x1, r.y2))?;
    line(dst, pen, &SRect16::from_xyxy(r.x2, r.y1, r.x2, r.y2))?;
    line(dst, pen, &SRect16::from_xyxy(r.x1, r.y2, r.x2, r.y2))
}

/// Corner radii for `rect`: `ratio` (clamped to 0.025..=0.5) of each side.
fn radii(rect: &SRect16, ratio: f64) -> (i32, i32) {
    let f = if ratio < 0.025 {
        0.025
    } else if ratio > 0.5 {
        0.5
    } else {
        ratio
    };
    let rw = (rect.width() as f64 * f + 0.5) as i32;
    let rh = (rect.height() as f64 * f + 0.5) as i32;
    (rw, rh)
}

/// The four quarter-ellipse corners of a rounded rectangle, each flipped so
/// the arc primitive bends it the right way.
fn corners(r: &SRect16, rw: i32, rh: i32) -> [SRect16; 4] {
    let size = SSize16::new(saturate(rw + 1), saturate(rh + 1));
    let (x1, y1, x2, y2) = (r.x1 as i32, r.y1 as i32, r.x2 as i32, r.y2 as i32);
    let at = |x: i32, y: i32| SRect16::from_location_size(SPoint16::new(saturate(x), saturate(y)), size);
    [
        at(x1, y1),
        at(x2 - rw, y1).flip_horizontal(),
        at(x1, y2 - rh).flip_vertical(),
        at(x2 - rw, y2 - rh).flip_all(),
    ]
}

pub(crate) fn rounded_rectangle<D: Destination>(
    dst: &mut D,
    pen: &Pen<D::Format>,
    rect: &SRect16,
    ratio: f64,
) -> Result<()> {
    let r = rect.normalize();
    let (rw, rh) = radii(&r, ratio);
    if rw == 0 || rh == 0 {
        return rectangle(dst, pen, &r);
    }
    let (x1, y1, x2, y2) = (r.x1 as i32, r.y1 as i32, r.x2 as i32, r.y2 as i32);
    line(dst, pen, &srect(x1 + rw, y1, x2 - rw, y1))?;
    line(dst, pen, &srect(x1, y1 + rh, x1, y2 - rh))?;
    line(dst, pen, &srect(x2, y1 + rh, x2, y2 - rh))?;
    line(dst, pen, &srect(x1 + rw, y2, x2 - rw, y2))?;
    for c in corners(&r, rw, rh).iter() {
        arc(dst, pen, c, false)?;
    }
    Ok(())
}

pub(crate) fn filled_rounded_rectangle<D: Destination>(
    dst: &mut D,
    pen: &Pen<D::Format>,
    rect: &SRect16,
    ratio: f64,
) -> Result<()> {
    let r = rect.normalize();
    let (rw, rh) = radii(&r, ratio);
    if rw == 0 || rh == 0 {
        return filled_rectangle(dst, pen, &r);
    }
    let (x1, y1, x2, y2) = (r.x1 as i32, r.y1 as i32, r.x2 as i32, r.y2 as i32);
    // Bands between the corners: top, middle, bottom.
    if rh > 1 {
        filled_rectangle(dst, pen, &srect(x1 + rw, y1, x2 - rw, y1 + rh - 1))?;
    }
    if y2 - rh - 1 >= y1 + rh {
        filled_rectangle(dst, pen, &srect(x1, y1 + rh, x2, y2 - rh - 1))?;
    }
    filled_rectangle(dst, pen, &srect(x1 + rw, y2 - rh, x2 - rw, y2))?;
    for c in corners(&r, rw, rh).iter() {
        arc(dst, pen, c, true)?;
    }
    Ok(())
}
