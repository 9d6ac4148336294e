use core::marker::PhantomData;

use crate::{Coord, Point, Rect};

/// An ordered run of points over caller-owned storage.
///
/// The path never allocates; `B` is anything that can be viewed as a slice of
/// points (an array, a borrowed slice, a `Vec`). Its bounding box and
/// hit-testing are computed on demand.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Path<T, B> {
    points: B,
    _coord: PhantomData<T>,
}

pub type SPath16<B> = Path<i16, B>;

impl<T: Coord, B: AsRef<[Point<T>]>> Path<T, B> {
    pub fn new(points: B) -> Self {
        Path {
            points,
            _coord: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.points.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.as_ref().is_empty()
    }

    pub fn points(&self) -> &[Point<T>] {
        self.points.as_ref()
    }

    pub fn get(&self, index: usize) -> Option<Point<T>> {
        self.points.as_ref().get(index).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point<T>> + '_ {
        self.points.as_ref().iter().cloned()
    }

    pub fn into_inner(self) -> B {
        self.points
    }

    /// Smallest normalized rectangle containing every point, or `None` for an
    /// empty path.
    pub fn bounds(&self) -> Option<Rect<T>> {
        let mut pts = self.iter();
        let first = pts.next()?;
        let mut r = Rect::new(first, first);
        for p in pts {
            if p.x < r.x1 {
                r.x1 = p.x;
            }
            if p.x > r.x2 {
                r.x2 = p.x;
            }
            if p.y < r.y1 {
                r.y1 = p.y;
            }
            if p.y > r.y2 {
                r.y2 = p.y;
            }
        }
        Some(r)
    }

    /// Hit test.
    ///
    /// A point that lands exactly on a vertex or on an edge is always a hit.
    /// Otherwise, when `as_polygon` is set, the path is treated as a closed
    /// polygon (the last point connects back to the first) and the point hits
    /// if it is inside by the even-odd rule. With `as_polygon` clear, the path
    /// is an open polyline and only boundary hits count.
    pub fn intersects(&self, point: Point<T>, as_polygon: bool) -> bool {
        let pts = self.points.as_ref();
        let n = pts.len();
        if n == 0 {
            return false;
        }
        let (x, y) = widen(point);
        if n == 1 {
            return widen(pts[0]) == (x, y);
        }
        let edges = if as_polygon { n } else { n - 1 };
        let mut inside = false;
        for i in 0..edges {
            let (ax, ay) = widen(pts[i]);
            let (bx, by) = widen(pts[(i + 1) % n]);
            if (ax, ay) == (x, y) || (bx, by) == (x, y) {
                return true;
            }
            let cross = (bx - ax) * (y - ay) - (by - ay) * (x - ax);
            if cross == 0
                && x >= ax.min(bx)
                && x <= ax.max(bx)
                && y >= ay.min(by)
                && y <= ay.max(by)
            {
                return true;
            }
            if (ay > y) != (by > y) {
                let xint = (bx - ax) as f64 * (y - ay) as f64 / (by - ay) as f64
                    + ax as f64;
                if (x as f64) < xint {
                    inside = !inside;
                }
            }
        }
        inside && as_polygon
    }

    /// Writes this path, moved by `(dx, dy)`, into `out`. Returns the number
    /// of points written, which is limited by the shorter of the two.
    pub fn offset_into(&self, dx: T, dy: T, out: &mut [Point<T>]) -> usize {
        let mut count = 0;
        for (dst, src) in out.iter_mut().zip(self.iter()) {
            *dst = src.offset(dx, dy);
            count += 1;
        }
        count
    }
}

impl<T: Coord, B: AsRef<[Point<T>]> + AsMut<[Point<T>]>> Path<T, B> {
    /// Replaces the point at `index`, returning the old one, or `None` if the
    /// index is out of range.
    pub fn set(&mut self, index: usize, point: Point<T>) -> Option<Point<T>> {
        let slot = self.points.as_mut().get_mut(index)?;
        Some(core::mem::replace(slot, point))
    }
}

fn widen<T: Coord>(p: Point<T>) -> (i64, i64) {
    (p.x.to_i64().unwrap_or(0), p.y.to_i64().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> SPath16<[Point<i16>; 3]> {
        Path::new([Point::new(0, 0), Point::new(10, 0), Point::new(5, 10)])
    }

    fn row_width(path: &SPath16<[Point<i16>; 3]>, y: i16) -> usize {
        (-5..16)
            .filter(|&x| path.intersects(Point::new(x, y), true))
            .count()
    }

    #[test]
    fn triangle_rows() {
        let t = triangle();
        let widths: Vec<usize> = (0..=10).map(|y| row_width(&t, y)).collect();
        assert_eq!(widths, vec![11, 9, 9, 7, 7, 5, 5, 3, 3, 1, 1]);
        assert_eq!(row_width(&t, 11), 0);
        assert_eq!(row_width(&t, -1), 0);
    }

    #[test]
    fn boundary_hits_without_polygon() {
        let t = triangle();
        // Vertex and edge hits count either way.
        assert!(t.intersects(Point::new(5, 10), false));
        assert!(t.intersects(Point::new(4, 0), false));
        // The closing edge (5,10)-(0,0) only exists for polygons.
        assert!(!t.intersects(Point::new(1, 2), false));
        assert!(t.intersects(Point::new(1, 2), true));
        // Interior points never hit an open polyline.
        assert!(!t.intersects(Point::new(5, 5), false));
        assert!(t.intersects(Point::new(5, 5), true));
    }

    #[test]
    fn bounds_and_set() {
        let mut t = triangle();
        assert_eq!(t.bounds(), Some(Rect::from_xyxy(0, 0, 10, 10)));
        assert_eq!(t.set(2, Point::new(-3, 12)), Some(Point::new(5, 10)));
        assert_eq!(t.bounds(), Some(Rect::from_xyxy(-3, 0, 10, 12)));
        assert_eq!(t.set(3, Point::new(0, 0)), None);
        let empty: SPath16<&[Point<i16>]> = Path::new(&[]);
        assert_eq!(empty.bounds(), None);
        assert!(!empty.intersects(Point::new(0, 0), true));
    }

    #[test]
    fn offset_into_shorter_buffer() {
        let t = triangle();
        let mut out = [Point::default(); 2];
        assert_eq!(t.offset_into(1, -1, &mut out), 2);
        assert_eq!(out, [Point::new(1, -1), Point::new(11, -1)]);
    }
}
