//! Low-level raster kernels: bit-packed buffer access and integer line
//! stepping.
//!
//! This crate is deliberately architecture-independent and free of any notion
//! of pixel formats or destinations, to allow for testing on the host. The
//! drawing engine in the root crate layers clipping, color conversion and
//! destination dispatch on top of these.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod bit;

use core::mem::swap;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Horizontal,
    Vertical,
}

/// Iterator over the points of a line segment, computed with Bresenham's
/// algorithm along whichever axis changes the most.
///
/// Both endpoints are included and points come out in order from the first
/// endpoint to the second. A zero-length line yields its single point.
#[derive(Clone, Debug)]
pub struct Line {
    x: i32,
    y: i32,
    /// Step applied along the major axis every iteration.
    major_step: (i32, i32),
    /// Step applied along the minor axis when the error term overflows.
    minor_step: (i32, i32),
    dminor2: i32,
    dmajor2: i32,
    error: i32,
    /// Points left to produce, including the current one.
    remaining: u32,
}

impl Line {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let dx = x1 - x0; // may be negative
        let dy = y1 - y0; // may be negative
        let x_adv = if dx < 0 { -1 } else { 1 };
        let y_adv = if dy < 0 { -1 } else { 1 };
        let (dx, dy) = (dx.abs(), dy.abs());

        let dir = if dx >= dy {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };

        let (mut dmajor, mut dminor) = (dx, dy);
        let (mut major_step, mut minor_step) = ((x_adv, 0), (0, y_adv));
        if dir == Direction::Vertical {
            swap(&mut dmajor, &mut dminor);
            swap(&mut major_step, &mut minor_step);
        }

        Line {
            x: x0,
            y: y0,
            major_step,
            minor_step,
            dminor2: dminor * 2,
            dmajor2: dmajor * 2,
            error: dminor * 2 - dmajor,
            remaining: dmajor as u32 + 1,
        }
    }
}

impl Iterator for Line {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = (self.x, self.y);
        self.remaining -= 1;
        if self.remaining != 0 {
            if self.error >= 0 {
                self.x += self.minor_step.0;
                self.y += self.minor_step.1;
                self.error -= self.dmajor2;
            }
            self.error += self.dminor2;
            self.x += self.major_step.0;
            self.y += self.major_step.1;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Line {}

/// Visits every point of the line from `(x0, y0)` to `(x1, y1)` in order,
/// stopping at (and returning) the first error produced by `plot`.
///
/// No clipping is done here; callers clip the endpoints first.
pub fn plot_line<E>(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    mut plot: impl FnMut(i32, i32) -> Result<(), E>,
) -> Result<(), E> {
    for (x, y) in Line::new(x0, y0, x1, y1) {
        plot(x, y)?;
    }
    Ok(())
}
