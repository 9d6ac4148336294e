//! Polygons from paths.

use math::{Point, SPath16, SPoint16, SRect16};

use super::helpers::Pen;
use super::line::line;
use super::rect::filled_rectangle;
use crate::target::Destination;
use crate::Result;

/// Outlines the closed polygon through `path`'s points.
pub(crate) fn polygon<D, B>(dst: &mut D, pen: &Pen<D::Format>, path: &SPath16<B>) -> Result<()>
where
    D: Destination,
    B: AsRef<[Point<i16>]>,
{
    let pts = path.points();
    for (i, a) in pts.iter().enumerate() {
        let b = pts[(i + 1) % pts.len()];
        line(dst, pen, &SRect16::new(*a, b))?;
    }
    Ok(())
}

/// Fills the polygon by scanning each row of its bounds for runs of points
/// inside it.
pub(crate) fn filled_polygon<D, B>(dst: &mut D, pen: &Pen<D::Format>, path: &SPath16<B>) -> Result<()>
where
    D: Destination,
    B: AsRef<[Point<i16>]>,
{
    let (bounds, area) = match (path.bounds(), pen.area) {
        (Some(b), Some(a)) if b.intersects(&a) => (b, a),
        _ => return Ok(()),
    };
    let scan = bounds.crop(&area);
    for y in scan.top()..=scan.bottom() {
        let mut start = None;
        for x in scan.left()..=scan.right() {
            let inside = path.intersects(SPoint16::new(x, y), true);
            match (inside, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    filled_rectangle(dst, pen, &SRect16::from_xyxy(s, y, x - 1, y))?;
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            filled_rectangle(dst, pen, &SRect16::from_xyxy(s, y, scan.right(), y))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::draw;
    use crate::pixel::{Gsc8, Pixel};
    use crate::testing::{Op, Plain, Recorder};
    use math::{SPath16, SPoint16};

    fn white() -> Pixel<Gsc8> {
        Pixel::from_channels(&[255])
    }

    fn triangle() -> SPath16<[SPoint16; 3]> {
        SPath16::new([SPoint16::new(0, 0), SPoint16::new(10, 0), SPoint16::new(5, 10)])
    }

    #[test]
    fn filled_triangle_rows() {
        let mut r = Recorder::<Gsc8, Plain>::new(16, 16);
        draw::filled_polygon(&mut r, &triangle(), white(), None).unwrap();
        let widths: std::vec::Vec<u16> = r
            .ops
            .iter()
            .map(|op| match *op {
                Op::Fill(rect, _) => {
                    assert_eq!(rect.height(), 1);
                    rect.width()
                }
                ref other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(widths, [11, 9, 9, 7, 7, 5, 5, 3, 3, 1, 1]);
    }

    #[test]
    fn outline_is_closed() {
        let mut r = Recorder::<Gsc8, Plain>::new(16, 16);
        draw::polygon(&mut r, &triangle(), white(), None).unwrap();
        for &(x, y) in &[(0, 0), (10, 0), (5, 10), (5, 0)] {
            assert_ne!(r.at(x, y), 0, "{:?}\n{:#?}", (x, y), r.picture());
        }
        assert_eq!(r.at(5, 4), 0);
    }

    #[test]
    fn fill_is_clipped() {
        let mut r = Recorder::<Gsc8, Plain>::new(16, 16);
        let clip = math::SRect16::from_xyxy(0, 0, 4, 1);
        draw::filled_polygon(&mut r, &triangle(), white(), Some(&clip)).unwrap();
        // Row 0 spans 0..=10 and row 1 spans 1..=9, both cut at x = 4.
        assert_eq!(r.touched().len(), 5 + 4);
    }
}
