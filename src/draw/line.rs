//! Points and lines.

use math::{SPoint16, SRect16};

use super::helpers::{clip_point, put, Pen};
use super::rect::filled_rectangle;
use crate::target::Destination;
use crate::Result;

pub(crate) fn point<D: Destination>(dst: &mut D, pen: &Pen<D::Format>, location: SPoint16) -> Result<()> {
    match clip_point(location, pen.area) {
        Some(p) => put(dst, p, &pen.ink, pen.async_),
        None => Ok(()),
    }
}

/// Draws the line from `(x1, y1)` to `(x2, y2)` of `ends`, both included.
pub(crate) fn line<D: Destination>(dst: &mut D, pen: &Pen<D::Format>, ends: &SRect16) -> Result<()> {
    if ends.x1 == ends.x2 || ends.y1 == ends.y2 {
        return filled_rectangle(dst, pen, ends);
    }
    let area = match pen.area {
        Some(a) => a,
        None => return Ok(()),
    };
    let seg = (ends.x1 as i32, ends.y1 as i32, ends.x2 as i32, ends.y2 as i32);
    let (x0, y0, x1, y1) = match clip_line(seg, &area) {
        Some(s) => s,
        None => return Ok(()),
    };
    gfx::plot_line(x0, y0, x1, y1, |x, y| {
        // Clipped endpoints are rounded, so the odd point can land just
        // outside.
        match clip_point(SPoint16::new(x as i16, y as i16), pen.area) {
            Some(p) => put(dst, p, &pen.ink, pen.async_),
            None => Ok(()),
        }
    })
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

fn outcode(x: i32, y: i32, area: &SRect16) -> u8 {
    let mut code = 0;
    if x < area.left() as i32 {
        code |= LEFT;
    } else if x > area.right() as i32 {
        code |= RIGHT;
    }
    if y < area.top() as i32 {
        code |= TOP;
    } else if y > area.bottom() as i32 {
        code |= BOTTOM;
    }
    code
}

/// Cohen-Sutherland clip of a segment to `area`. Returns the part inside,
/// or `None` if there isn't one.
pub(crate) fn clip_line(seg: (i32, i32, i32, i32), area: &SRect16) -> Option<(i32, i32, i32, i32)> {
    let (mut x0, mut y0, mut x1, mut y1) = seg;
    let (left, right) = (area.left() as i32, area.right() as i32);
    let (top, bottom) = (area.top() as i32, area.bottom() as i32);
    // Each pass moves one endpoint onto an edge; rounding can cost a few
    // extra passes but never more than this.
    for _ in 0..8 {
        let c0 = outcode(x0, y0, area);
        let c1 = outcode(x1, y1, area);
        if c0 | c1 == 0 {
            return Some((x0, y0, x1, y1));
        }
        if c0 & c1 != 0 {
            return None;
        }
        let out = if c0 != 0 { c0 } else { c1 };
        let (dx, dy) = ((x1 - x0) as f64, (y1 - y0) as f64);
        let at = |num: f64, den: f64| libm::round(num / den) as i32;
        let (x, y) = if out & TOP != 0 {
            (x0 + at(dx * (top - y0) as f64, dy), top)
        } else if out & BOTTOM != 0 {
            (x0 + at(dx * (bottom - y0) as f64, dy), bottom)
        } else if out & RIGHT != 0 {
            (right, y0 + at(dy * (right - x0) as f64, dx))
        } else {
            (left, y0 + at(dy * (left - x0) as f64, dx))
        };
        if out == c0 {
            x0 = x;
            y0 = y;
        } else {
            x1 = x;
            y1 = y;
        }
    }
    None
}
