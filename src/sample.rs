//! Pixel lookup for resizing.
//!
//! Each sampler maps texture coordinates `(u, v)` in `0.0..=1.0` onto a
//! rectangle of a source and returns a color. Coordinates that land outside
//! the rectangle are clamped to its edge, so every sample comes from inside
//! it.
//!
//! The filtering samplers work in 32-bit RGBA, resolving indexed sources
//! through their palette, and return that; the caller converts to the
//! destination format.

use math::{Point16, Rect16};
use smart_default::SmartDefault;

use crate::palette::{convert_between, NoPalette};
use crate::pixel::{clamp_unit, Pixel, Rgba8888};
use crate::target::Source;
use crate::Result;

/// How a bitmap is fitted into a destination rectangle of another size.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, SmartDefault)]
pub enum Resize {
    /// No scaling: the source is cut to the destination rectangle.
    #[default]
    Crop,
    Nearest,
    Bilinear,
    Bicubic,
}

/// Source pixel at `(x, y)`, clamped into `rect`.
fn texel<S: Source>(src: &S, rect: &Rect16, x: i64, y: i64) -> Result<Pixel<S::Format>> {
    let clamp = |v: i64, lo: u16, hi: u16| {
        if v < lo as i64 {
            lo
        } else if v > hi as i64 {
            hi
        } else {
            v as u16
        }
    };
    let at = Point16::new(
        clamp(x, rect.left(), rect.right()),
        clamp(y, rect.top(), rect.bottom()),
    );
    src.point(at)
}

fn texel_rgba<S: Source>(src: &S, rect: &Rect16, x: i64, y: i64) -> Result<Pixel<Rgba8888>> {
    let px = texel(src, rect, x, y)?;
    convert_between::<_, _, Rgba8888, NoPalette<Rgba8888>>(px, src.palette(), None, None)
}

/// The source pixel under `(u, v)`, unfiltered.
pub fn nearest<S: Source>(src: &S, rect: &Rect16, u: f64, v: f64) -> Result<Pixel<S::Format>> {
    let r = rect.normalize();
    let x = libm::floor(u * r.width() as f64) as i64 + r.left() as i64;
    let y = libm::floor(v * r.height() as f64) as i64 + r.top() as i64;
    texel(src, &r, x, y)
}

/// Linear blend of the four source pixels around `(u, v)`.
pub fn bilinear<S: Source>(src: &S, rect: &Rect16, u: f64, v: f64) -> Result<Pixel<Rgba8888>> {
    let r = rect.normalize();
    let fx = u * r.width() as f64 - 0.5 + r.left() as f64;
    let fy = v * r.height() as f64 - 0.5 + r.top() as f64;
    let (x0, y0) = (libm::floor(fx), libm::floor(fy));
    let (xf, yf) = (fx - x0, fy - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = texel_rgba(src, &r, x0, y0)?;
    let p10 = texel_rgba(src, &r, x0 + 1, y0)?;
    let p01 = texel_rgba(src, &r, x0, y0 + 1)?;
    let p11 = texel_rgba(src, &r, x0 + 1, y0 + 1)?;

    let top = p10.blend(p00, xf);
    let bottom = p11.blend(p01, xf);
    Ok(bottom.blend(top, yf))
}

/// Cubic Hermite spline through `b` and `c`, using `a` and `d` for the
/// tangents, evaluated at `t` in `0.0..=1.0`.
pub(crate) fn cubic_hermite(a: f64, b: f64, c: f64, d: f64, t: f64) -> f64 {
    let ca = -a / 2.0 + (3.0 * b) / 2.0 - (3.0 * c) / 2.0 + d / 2.0;
    let cb = a - (5.0 * b) / 2.0 + 2.0 * c - d / 2.0;
    let cc = -a / 2.0 + c / 2.0;
    let cd = b;
    ca * t * t * t + cb * t * t + cc * t + cd
}

/// Bicubic interpolation of the 4x4 source neighborhood around `(u, v)`, as
/// normalized RGBA clamped to `0.0..=1.0`.
pub(crate) fn bicubic_reals<S: Source>(src: &S, rect: &Rect16, u: f64, v: f64) -> Result<[f64; 4]> {
    let r = rect.normalize();
    let fx = u * r.width() as f64 - 0.5 + r.left() as f64;
    let fy = v * r.height() as f64 - 0.5 + r.top() as f64;
    let (xi, yi) = (libm::floor(fx), libm::floor(fy));
    let (xf, yf) = (fx - xi, fy - yi);
    let (xi, yi) = (xi as i64, yi as i64);

    let mut grid = [[Pixel::<Rgba8888>::from_native(0); 4]; 4];
    for (j, row) in grid.iter_mut().enumerate() {
        for (i, px) in row.iter_mut().enumerate() {
            *px = texel_rgba(src, &r, xi + i as i64 - 1, yi + j as i64 - 1)?;
        }
    }

    let mut out = [0.0; 4];
    for (c, o) in out.iter_mut().enumerate() {
        let mut cols = [0.0; 4];
        for (j, col) in cols.iter_mut().enumerate() {
            let row = &grid[j];
            *col = cubic_hermite(
                row[0].real(c),
                row[1].real(c),
                row[2].real(c),
                row[3].real(c),
                xf,
            );
        }
        *o = clamp_unit(cubic_hermite(cols[0], cols[1], cols[2], cols[3], yf));
    }
    Ok(out)
}

/// Bicubic interpolation of the 4x4 source neighborhood around `(u, v)`.
pub fn bicubic<S: Source>(src: &S, rect: &Rect16, u: f64, v: f64) -> Result<Pixel<Rgba8888>> {
    Ok(Pixel::from_reals(&bicubic_reals(src, rect, u, v)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Gsc8;
    use crate::target::Target;
    use crate::Bitmap;
    use math::Size16;

    fn gradient() -> Bitmap<Gsc8, [u8; 4]> {
        // 2x2: 0 100 / 200 255
        Bitmap::new(Size16::new(2, 2), [0, 100, 200, 255]).unwrap()
    }

    #[test]
    fn nearest_maps_and_clamps() {
        let bmp = gradient();
        let r = bmp.bounds();
        assert_eq!(nearest(&bmp, &r, 0.0, 0.0).unwrap().channel(0), 0);
        assert_eq!(nearest(&bmp, &r, 0.6, 0.0).unwrap().channel(0), 100);
        assert_eq!(nearest(&bmp, &r, 0.49, 0.99).unwrap().channel(0), 200);
        // u == 1.0 lands one past the edge and is pulled back in.
        assert_eq!(nearest(&bmp, &r, 1.0, 1.0).unwrap().channel(0), 255);
    }

    #[test]
    fn bilinear_center_is_average() {
        let bmp = gradient();
        let px = bilinear(&bmp, &bmp.bounds(), 0.5, 0.5).unwrap();
        // (0 + 100 + 200 + 255) / 4 = 138.75
        let r = px.channel(0) as i64;
        assert!((r - 139).abs() <= 1, "{}", r);
        assert_eq!(px.channel(3), 255);
    }

    #[test]
    fn bilinear_at_texel_centers_is_exact() {
        let bmp = gradient();
        let px = bilinear(&bmp, &bmp.bounds(), 0.75, 0.25).unwrap();
        assert_eq!(px.channel(1), 100);
    }

    #[test]
    fn hermite_interpolates_endpoints() {
        assert_eq!(cubic_hermite(0.0, 0.2, 0.8, 1.0, 0.0), 0.2);
        assert!((cubic_hermite(0.0, 0.2, 0.8, 1.0, 1.0) - 0.8).abs() < 1e-12);
        assert!(cubic_hermite(0.0, 1.0, 1.0, 0.0, 0.5) > 1.0);
    }

    #[test]
    fn bicubic_clamps_overshoot() {
        // Columns 0 255 255 0 make the spline overshoot between the two
        // bright columns.
        let bmp = Bitmap::<Gsc8, _>::new(Size16::new(4, 1), [0u8, 255, 255, 0]).unwrap();
        let reals = bicubic_reals(&bmp, &bmp.bounds(), 0.5, 0.5).unwrap();
        for v in reals.iter() {
            assert!(*v >= 0.0 && *v <= 1.0, "{}", v);
        }
        assert_eq!(reals[0], 1.0);
        let px = bicubic(&bmp, &bmp.bounds(), 0.5, 0.5).unwrap();
        assert_eq!(px, Pixel::from_channels(&[255, 255, 255, 255]));
    }
}
