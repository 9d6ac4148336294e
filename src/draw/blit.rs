//! Drawing one target onto another.
//!
//! When nothing has to happen to the pixels on the way (same layout, no
//! scaling, no transparent key, no flip) the copy goes through the fastest
//! route both ends support: a raw buffer copy, the destination's `copy_from`
//! or the source's `copy_to`. Everything else is sampled and written pixel by
//! pixel, through a batch when the destination has one.

use math::{Orientation, Point16, Rect16, SRect16};

use super::helpers::{clip_rect, drawable_area, put, Batch, Ink};
use super::rect::srect;
use crate::bitmap::blt_rows;
use crate::palette::{convert_between, NoPalette};
use crate::pixel::{same_layout, Format, Pixel, Rgba8888};
use crate::sample::{self, Resize};
use crate::target::{Destination, Source};
use crate::Result;

/// Draws `src_rect` of `src` into `dest_rect` of `dst`.
///
/// With `Resize::Crop` the copy is the smaller of the two rectangles and a
/// flipped `dest_rect` mirrors it; the other modes scale the source to fill
/// `dest_rect`. Source pixels equal to `transparent` are skipped.
#[allow(clippy::too_many_arguments)]
pub(crate) fn bitmap<D, S>(
    dst: &mut D,
    dest_rect: &SRect16,
    src: &S,
    src_rect: &Rect16,
    resize: Resize,
    transparent: Option<Pixel<S::Format>>,
    clip: Option<&SRect16>,
    async_: bool,
) -> Result<()>
where
    D: Destination,
    S: Source,
{
    let src_bounds = src.bounds();
    let sr = src_rect.normalize();
    if src.dimensions().is_empty() || !sr.intersects(&src_bounds) {
        return Ok(());
    }
    let sr = sr.crop(&src_bounds);
    let area = match drawable_area(dst, clip) {
        Some(a) => a,
        None => return Ok(()),
    };

    let dn = dest_rect.normalize();
    let (dw, dh) = (dn.width() as i32, dn.height() as i32);
    let (sw, sh) = (sr.width() as i32, sr.height() as i32);
    let (w, h) = if resize == Resize::Crop {
        (dw.min(sw), dh.min(sh))
    } else {
        (dw, dh)
    };
    let target = srect(dn.x1 as i32, dn.y1 as i32, dn.x1 as i32 + w - 1, dn.y1 as i32 + h - 1);
    let visible = match clip_rect(&target, Some(area)) {
        Some(v) => v,
        None => return Ok(()),
    };
    // Offset of the visible part within the copy.
    let (ox, oy) = (visible.x1 as i32 - dn.x1 as i32, visible.y1 as i32 - dn.y1 as i32);

    let raw = same_layout(<S::Format as Format>::CHANNELS, <D::Format as Format>::CHANNELS)
        && ((D::CAPS.blt && S::CAPS.blt) || D::CAPS.copy_from || S::CAPS.copy_to)
        && transparent.is_none()
        && dest_rect.is_normalized()
        && (resize == Resize::Crop || (dw == sw && dh == sh));
    if raw {
        let sub = Rect16::from_xyxy(
            sr.x1 + ox as u16,
            sr.y1 + oy as u16,
            sr.x1 + ox as u16 + visible.width() - 1,
            sr.y1 + oy as u16 + visible.height() - 1,
        );
        if copy_raw(dst, src, &sub, visible.top_left())? {
            return Ok(());
        }
    }

    log::trace!("sampled blit {:?} -> {:?} ({:?})", sr, visible, resize);
    let flips = dest_rect.orientation();
    let geometry = Geometry {
        sr,
        w,
        h,
        ox,
        oy,
        flip_h: flips.contains(Orientation::FLIPPED_HORIZONTAL),
        flip_v: flips.contains(Orientation::FLIPPED_VERTICAL),
    };
    super::helpers::suspended(dst, async_, |dst| {
        sampled(dst, src, &visible, &geometry, resize, transparent, async_)
    })
}

/// Copies without touching pixel values. Returns false if neither end
/// could do it after all.
fn copy_raw<D: Destination, S: Source>(dst: &mut D, src: &S, sub: &Rect16, at: Point16) -> Result<bool> {
    if D::CAPS.blt && S::CAPS.blt {
        let (src_width, dst_width) = (src.dimensions().width as usize, dst.dimensions().width as usize);
        if let (Some(from), Some(to)) = (src.blt_buffer(), dst.blt_buffer_mut()) {
            log::trace!("raw blit {:?} -> {:?}", sub, at);
            blt_rows::<S::Format>(from, src_width, sub, to, dst_width, at);
            return Ok(true);
        }
    }
    if D::CAPS.copy_from {
        dst.copy_from(sub, src, at)?;
        return Ok(true);
    }
    if S::CAPS.copy_to {
        src.copy_to(sub, dst, at)?;
        return Ok(true);
    }
    Ok(false)
}

struct Geometry {
    /// Source rectangle.
    sr: Rect16,
    /// Size of the whole copy in the destination.
    w: i32,
    h: i32,
    /// Where the visible part starts within the copy.
    ox: i32,
    oy: i32,
    flip_h: bool,
    flip_v: bool,
}

impl Geometry {
    /// Source pixel for copy offset `(i, j)`, unscaled.
    fn cropped(&self, i: i32, j: i32) -> Point16 {
        let x = if self.flip_h { self.w - 1 - i } else { i };
        let y = if self.flip_v { self.h - 1 - j } else { j };
        Point16::new(self.sr.x1 + x as u16, self.sr.y1 + y as u16)
    }

    /// Texture coordinates for copy offset `(i, j)`, scaled.
    fn uv(&self, i: i32, j: i32) -> (f64, f64) {
        let t = |k: i32, n: i32, flip: bool| {
            let t = if n > 1 { k as f64 / (n - 1) as f64 } else { 0.0 };
            if flip {
                1.0 - t
            } else {
                t
            }
        };
        (t(i, self.w, self.flip_h), t(j, self.h, self.flip_v))
    }
}

enum Sample<F: Format> {
    Skip,
    Native(Pixel<F>),
    Rgba(Pixel<Rgba8888>),
}

fn sampled<D, S>(
    dst: &mut D,
    src: &S,
    visible: &Rect16,
    g: &Geometry,
    resize: Resize,
    transparent: Option<Pixel<S::Format>>,
    async_: bool,
) -> Result<()>
where
    D: Destination,
    S: Source,
{
    let key_rgba = match transparent {
        Some(k) if resize == Resize::Bilinear || resize == Resize::Bicubic => Some(
            convert_between::<_, _, Rgba8888, NoPalette<Rgba8888>>(k, src.palette(), None, None)?,
        ),
        _ => None,
    };
    let fetch = |i: i32, j: i32| -> Result<Sample<S::Format>> {
        let px = match resize {
            Resize::Crop => src.point(g.cropped(i, j))?,
            Resize::Nearest => {
                let (u, v) = g.uv(i, j);
                sample::nearest(src, &g.sr, u, v)?
            }
            Resize::Bilinear | Resize::Bicubic => {
                let (u, v) = g.uv(i, j);
                let px = if resize == Resize::Bilinear {
                    sample::bilinear(src, &g.sr, u, v)?
                } else {
                    sample::bicubic(src, &g.sr, u, v)?
                };
                if key_rgba == Some(px) {
                    return Ok(Sample::Skip);
                }
                return Ok(Sample::Rgba(px));
            }
        };
        if transparent == Some(px) {
            return Ok(Sample::Skip);
        }
        Ok(Sample::Native(px))
    };

    // Without a key or alpha every pixel is written, so a batch can take
    // them all.
    let plain = transparent.is_none() && !Pixel::<S::Format>::HAS_ALPHA;
    if plain && D::CAPS.batch {
        let mut batch = Batch::begin(dst, visible, async_)?;
        for y in visible.top()..=visible.bottom() {
            for x in visible.left()..=visible.right() {
                let (i, j) = (x as i32 - visible.x1 as i32 + g.ox, y as i32 - visible.y1 as i32 + g.oy);
                let px = match fetch(i, j)? {
                    Sample::Native(p) => convert_between(p, src.palette(), batch.destination().palette(), None)?,
                    Sample::Rgba(p) => {
                        convert_between::<_, NoPalette<Rgba8888>, _, _>(p, None, batch.destination().palette(), None)?
                    }
                    Sample::Skip => Pixel::from_native(0),
                };
                batch.write(Point16::new(x, y), px)?;
            }
        }
        return batch.commit();
    }

    for y in visible.top()..=visible.bottom() {
        for x in visible.left()..=visible.right() {
            let (i, j) = (x as i32 - visible.x1 as i32 + g.ox, y as i32 - visible.y1 as i32 + g.oy);
            let ink = match fetch(i, j)? {
                Sample::Skip => continue,
                Sample::Native(p) => Ink::with_palette(dst, p, src.palette())?,
                Sample::Rgba(p) => Ink::new(dst, p)?,
            };
            put(dst, Point16::new(x, y), &ink, async_)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::draw::{self, Resize};
    use crate::pixel::{Gsc8, Pixel, Rgb888};
    use crate::sample::bicubic_reals;
    use crate::target::{Source, Target};
    use crate::testing::{Batching, Op, Recorder};
    use crate::Bitmap;
    use math::{Point16, Rect16, SRect16, Size16};

    fn gray(v: u8) -> Pixel<Gsc8> {
        Pixel::from_channels(&[v as u64])
    }

    fn row(bmp: &Bitmap<Gsc8, [u8; 64]>, y: u16) -> std::vec::Vec<u64> {
        (0..8).map(|x| bmp.point(Point16::new(x, y)).unwrap().channel(0)).collect()
    }

    #[test]
    fn same_format_copies_raw_and_clips() {
        let src = Bitmap::<Gsc8, _>::new(Size16::new(4, 2), [1u8, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let mut dst = Bitmap::<Gsc8, _>::new(Size16::new(8, 8), [0u8; 64]).unwrap();
        let all = src.bounds();
        draw::bitmap(&mut dst, &SRect16::from_xyxy(5, 1, 12, 9), &src, &all, Resize::Crop, None, None).unwrap();
        assert_eq!(row(&dst, 1), [0, 0, 0, 0, 0, 1, 2, 3]);
        assert_eq!(row(&dst, 2), [0, 0, 0, 0, 0, 5, 6, 7]);
        assert_eq!(row(&dst, 3), [0; 8]);

        // Hanging off the top-left edge.
        let mut dst = Bitmap::<Gsc8, _>::new(Size16::new(8, 8), [0u8; 64]).unwrap();
        draw::bitmap(&mut dst, &SRect16::from_xyxy(-2, -1, 5, 5), &src, &all, Resize::Crop, None, None).unwrap();
        assert_eq!(row(&dst, 0), [7, 8, 0, 0, 0, 0, 0, 0]);
        assert_eq!(row(&dst, 1), [0; 8]);
    }

    #[test]
    fn flipped_destination_mirrors() {
        let src = Bitmap::<Gsc8, _>::new(Size16::new(3, 1), [1u8, 2, 3]).unwrap();
        let mut dst = Bitmap::<Gsc8, _>::new(Size16::new(8, 8), [0u8; 64]).unwrap();
        draw::bitmap(&mut dst, &SRect16::from_xyxy(2, 0, 0, 0), &src, &src.bounds(), Resize::Crop, None, None)
            .unwrap();
        assert_eq!(row(&dst, 0), [3, 2, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn transparent_key_is_skipped() {
        let src = Bitmap::<Gsc8, _>::new(Size16::new(2, 2), [0u8, 50, 50, 0]).unwrap();
        let mut dst = Bitmap::<Gsc8, _>::new(Size16::new(8, 8), [9u8; 64]).unwrap();
        let at = SRect16::from_xyxy(0, 0, 1, 1);
        draw::bitmap(&mut dst, &at, &src, &src.bounds(), Resize::Crop, Some(gray(0)), None).unwrap();
        assert_eq!(&row(&dst, 0)[..2], [9, 50]);
        assert_eq!(&row(&dst, 1)[..2], [50, 9]);
    }

    #[test]
    fn nearest_scales_up() {
        let src = Bitmap::<Gsc8, _>::new(Size16::new(2, 2), [10u8, 20, 30, 40]).unwrap();
        let mut dst = Bitmap::<Gsc8, _>::new(Size16::new(8, 8), [0u8; 64]).unwrap();
        let at = SRect16::from_xyxy(0, 0, 3, 3);
        draw::bitmap(&mut dst, &at, &src, &src.bounds(), Resize::Nearest, None, None).unwrap();
        assert_eq!(&row(&dst, 0)[..5], [10, 10, 20, 20, 0]);
        assert_eq!(&row(&dst, 3)[..5], [30, 30, 40, 40, 0]);
    }

    #[test]
    fn bicubic_checkerboard_stays_in_range() {
        let src = Bitmap::<Gsc8, _>::new(Size16::new(2, 2), [0u8, 255, 255, 0]).unwrap();
        let mut dst = Bitmap::<Gsc8, _>::new(Size16::new(8, 8), [0u8; 64]).unwrap();
        let at = SRect16::from_xyxy(0, 0, 3, 3);
        draw::bitmap(&mut dst, &at, &src, &src.bounds(), Resize::Bicubic, None, None).unwrap();

        // The spline overshoots at every sample position; each channel is
        // clamped before conversion.
        for j in 0..4 {
            for i in 0..4 {
                let (u, v) = (i as f64 / 3.0, j as f64 / 3.0);
                let reals = bicubic_reals(&src, &src.bounds(), u, v).unwrap();
                for c in reals.iter() {
                    assert!(*c >= 0.0 && *c <= 1.0, "({}, {}): {}", i, j, c);
                }
            }
        }

        let out: std::vec::Vec<std::vec::Vec<i64>> =
            (0..4).map(|y| row(&dst, y)[..4].iter().map(|&v| v as i64).collect()).collect();
        assert!(out[0][0] <= 1 && out[3][3] <= 1, "{:?}", out);
        assert!(out[0][3] >= 254 && out[3][0] >= 254, "{:?}", out);
        for j in 0..4 {
            for i in 0..4 {
                // Point symmetric, and mirroring one axis inverts the board.
                assert!((out[j][i] - out[3 - j][3 - i]).abs() <= 1, "{:?}", out);
                assert!((out[j][i] + out[j][3 - i] - 255).abs() <= 2, "{:?}", out);
            }
        }
        assert_eq!(row(&dst, 4), [0; 8]);
        assert_eq!(&row(&dst, 0)[4..], [0; 4]);
    }

    #[test]
    fn conversion_goes_through_a_batch() {
        let src = Bitmap::<Gsc8, _>::new(Size16::new(2, 1), [0u8, 255]).unwrap();
        let mut r = Recorder::<Rgb888, Batching>::new(4, 4);
        let at = SRect16::from_xyxy(1, 1, 2, 1);
        draw::bitmap(&mut r, &at, &src, &src.bounds(), Resize::Crop, None, None).unwrap();
        assert_eq!(
            r.ops,
            [
                Op::Begin(Rect16::from_xyxy(1, 1, 2, 1)),
                Op::Write(0),
                Op::Write(Pixel::<Rgb888>::from_channels(&[255, 255, 255]).native_value()),
                Op::Commit
            ]
        );

        // Same layout takes the source's own copy instead: plain writes.
        let mut r = Recorder::<Gsc8, Batching>::new(4, 4);
        draw::bitmap(&mut r, &at, &src, &src.bounds(), Resize::Crop, None, None).unwrap();
        assert_eq!(r.ops, [Op::Point(1, 1, 0), Op::Point(2, 1, 255)]);
    }
}
