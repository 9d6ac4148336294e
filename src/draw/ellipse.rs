//! Ellipses and quarter-ellipse arcs, by the midpoint algorithm.
//!
//! Both walk one quadrant of the curve from the top (`x = 0, y = ry`) down to
//! the side (`y = 0`) and mirror each step into place. Even widths and
//! heights put the center between two pixels; `x_adj`/`y_adj` are 1 in that
//! case and shift the mirrored halves apart so the shape fills its bounds.

use math::{Orientation, SPoint16, SRect16};

use super::helpers::Pen;
use super::line::point;
use super::rect::{filled_rectangle, srect};
use crate::target::Destination;
use crate::Result;

/// Walks one quadrant of the ellipse with radii `rx`, `ry`, calling `visit`
/// with offsets from the center.
fn midpoint(rx: i32, ry: i32, y_adj: i32, mut visit: impl FnMut(i32, i32) -> Result<()>) -> Result<()> {
    let rx2 = (rx as f64) * (rx as f64);
    let ry2 = (ry as f64) * (ry as f64);
    let (mut x, mut y) = (0i32, ry);
    let mut dx = 0.0;
    let mut dy = 2.0 * rx2 * y as f64;

    // Region 1: slope shallower than -1.
    let mut d1 = ry2 - rx2 * ry as f64 + 0.25 * rx2;
    while dx < dy + y_adj as f64 {
        visit(x, y)?;
        x += 1;
        dx += 2.0 * ry2;
        if d1 < 0.0 {
            d1 += dx + ry2;
        } else {
            y -= 1;
            dy -= 2.0 * rx2;
            d1 += dx - dy + ry2;
        }
    }

    // Region 2: the steep part.
    let xf = x as f64 + 0.5;
    let yf = (y - 1) as f64;
    let mut d2 = ry2 * xf * xf + rx2 * yf * yf - rx2 * ry2;
    while y >= 0 {
        visit(x, y)?;
        y -= 1;
        dy -= 2.0 * rx2;
        if d2 > 0.0 {
            d2 += rx2 - dy;
        } else {
            x += 1;
            dx += 2.0 * ry2;
            d2 += dx - dy + rx2;
        }
    }
    Ok(())
}

fn span<D: Destination>(dst: &mut D, pen: &Pen<D::Format>, xa: i32, xb: i32, y: i32) -> Result<()> {
    filled_rectangle(dst, pen, &srect(xa, y, xb, y))
}

fn dot<D: Destination>(dst: &mut D, pen: &Pen<D::Format>, x: i32, y: i32) -> Result<()> {
    point(dst, pen, SPoint16::new(math::saturate(x), math::saturate(y)))
}

/// The ellipse inscribed in `rect`, outlined or filled.
pub(crate) fn ellipse<D: Destination>(dst: &mut D, pen: &Pen<D::Format>, rect: &SRect16, filled: bool) -> Result<()> {
    let (w, h) = (rect.width() as i32, rect.height() as i32);
    let (left, top) = (rect.left() as i32, rect.top() as i32);
    let x_adj = 1 - (w & 1);
    let y_adj = 1 - (h & 1);
    let rx = (w / 2 - x_adj).max(1);
    let ry = (h / 2 - y_adj).max(1);
    let xc = w / 2 + left - x_adj;
    let yc = h / 2 + top - y_adj;

    midpoint(rx, ry, y_adj, |x, y| {
        if filled {
            span(dst, pen, -x + xc, x + xc + x_adj, y + yc + y_adj)?;
            span(dst, pen, -x + xc, x + xc + x_adj, -y + yc)
        } else {
            dot(dst, pen, x + xc + x_adj, y + yc + y_adj)?;
            dot(dst, pen, -x + xc, y + yc + y_adj)?;
            dot(dst, pen, x + xc + x_adj, -y + yc)?;
            dot(dst, pen, -x + xc, -y + yc)
        }
    })
}

/// A quarter of the ellipse twice the size of `rect`, outlined or filled
/// (as a pie slice).
///
/// The rect's orientation picks the quarter. A normalized rect gets the
/// top-left quarter, curving from its bottom-left corner to its top-right.
/// Flipping horizontally mirrors that to the top-right quarter, vertically
/// to the bottom-left, and both to the bottom-right.
pub(crate) fn arc<D: Destination>(dst: &mut D, pen: &Pen<D::Format>, rect: &SRect16, filled: bool) -> Result<()> {
    let o = rect.orientation();
    let flip_h = o.contains(Orientation::FLIPPED_HORIZONTAL);
    let flip_v = o.contains(Orientation::FLIPPED_VERTICAL);
    let (w, h) = (rect.width() as i32, rect.height() as i32);
    let (left, top) = (rect.left() as i32, rect.top() as i32);
    let (right, bottom) = (rect.right() as i32, rect.bottom() as i32);
    let x_adj = 1 - (w & 1);
    let y_adj = 1 - (h & 1);
    let rx = (w - x_adj - 1).max(1);
    let ry = (h - 1).max(1);
    let xc = w + left - x_adj - 1;
    let yc = h + top - 1;
    let y1 = rect.y1 as i32;

    midpoint(rx, ry, y_adj, |x, y| {
        let row = if flip_v { y + yc - ry } else { -y + yc };
        if filled {
            if flip_h {
                span(dst, pen, xc - rx, x + xc + x_adj - rx, row)
            } else {
                span(dst, pen, -x + xc, xc + x_adj, row)
            }
        } else if flip_h {
            dot(dst, pen, x + xc + x_adj - rx, row)?;
            // Close the gap at the outer corner on even widths.
            if x_adj != 0 && !flip_v && row == y1 {
                dot(dst, pen, left, top)?;
            }
            Ok(())
        } else {
            dot(dst, pen, -x + xc, row)?;
            if x_adj != 0 && row == y1 {
                let y = if flip_v { bottom } else { top };
                dot(dst, pen, right, y)?;
            }
            Ok(())
        }
    })
}

#[cfg(test)]
mod tests {
    use crate::draw;
    use crate::pixel::{Gsc8, Pixel};
    use crate::testing::{Plain, Recorder};
    use math::SRect16;

    fn white() -> Pixel<Gsc8> {
        Pixel::from_channels(&[255])
    }

    #[test]
    fn odd_ellipse_outline() {
        let mut r = Recorder::<Gsc8, Plain>::new(9, 7);
        draw::ellipse(&mut r, &SRect16::from_xyxy(0, 0, 8, 6), white(), None).unwrap();
        assert_eq!(
            r.picture(),
            [
                "..#####..",
                ".#.....#.",
                "#.......#",
                "#.......#",
                "#.......#",
                ".#.....#.",
                "..#####..",
            ]
        );
    }

    #[test]
    fn even_ellipse_is_symmetric() {
        for &filled in &[false, true] {
            let mut r = Recorder::<Gsc8, Plain>::new(12, 8);
            let rect = SRect16::from_xyxy(0, 0, 11, 7);
            if filled {
                draw::filled_ellipse(&mut r, &rect, white(), None).unwrap();
            } else {
                draw::ellipse(&mut r, &rect, white(), None).unwrap();
            }
            let pic = r.picture();
            for y in 0..8 {
                let mut row: std::vec::Vec<char> = pic[y].chars().collect();
                assert_eq!(pic[y], pic[7 - y], "{:#?}", pic);
                let orig = row.clone();
                row.reverse();
                assert_eq!(orig, row, "{:#?}", pic);
            }
            // Touches all four sides.
            assert!(pic[0].contains('#') && pic[7].contains('#'), "{:#?}", pic);
            assert!(pic.iter().any(|l| l.starts_with('#')), "{:#?}", pic);
            assert!(pic.iter().any(|l| l.ends_with('#')), "{:#?}", pic);
        }
    }

    #[test]
    fn filled_arc_quarters() {
        let mut r = Recorder::<Gsc8, Plain>::new(5, 5);
        draw::filled_arc(&mut r, &SRect16::from_xyxy(0, 0, 4, 4), white(), None).unwrap();
        // Top-left quarter: the corner stays empty, the far corner is inside.
        assert_eq!(r.at(0, 0), 0);
        assert_eq!(r.at(4, 0), 255);
        assert_eq!(r.at(0, 4), 255);
        assert_eq!(r.at(4, 4), 255);

        // Flipped both ways: the bottom-right quarter.
        let mut r = Recorder::<Gsc8, Plain>::new(5, 5);
        draw::filled_arc(&mut r, &SRect16::from_xyxy(4, 4, 0, 0), white(), None).unwrap();
        assert_eq!(r.at(4, 4), 0);
        assert_eq!(r.at(0, 0), 255);
        assert_eq!(r.at(0, 4), 255);
        assert_eq!(r.at(4, 0), 255);
    }

    #[test]
    fn arc_outline_runs_corner_to_corner() {
        let mut r = Recorder::<Gsc8, Plain>::new(5, 5);
        draw::arc(&mut r, &SRect16::from_xyxy(0, 0, 4, 4), white(), None).unwrap();
        assert_eq!(r.picture(), ["...##", ".##..", ".#...", "#....", "#...."]);
    }
}
