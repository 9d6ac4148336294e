//! Packed in-memory bitmaps.
//!
//! A `Bitmap` lays pixels out row-major with no padding between pixels or
//! rows: pixel `(x, y)` starts at bit `(y * width + x) * bit_depth`. Formats
//! whose depth is a whole number of bytes store each pixel as a
//! `PACKED_SIZE`-byte big-endian value (host order with the `native-order`
//! feature); other formats are packed bit by bit, most significant bit first.
//!
//! The bitmap never allocates its own storage, except through
//! `Bitmap::allocate` when the `alloc` feature is enabled.

use core::marker::PhantomData;

use byteorder::ByteOrder;
use gfx::bit;
use math::{Point16, Rect16, Size16};

use crate::palette::{NoPalette, Palette};
use crate::pixel::{same_layout, Format, Pixel};
use crate::target::{copy_pixels, crop_copy, Caps, Destination, Source, Target};
use crate::{Error, Result};

cfg_if::cfg_if! {
    if #[cfg(feature = "native-order")] {
        /// Byte order of byte-aligned pixels in a buffer.
        pub type StorageOrder = byteorder::NativeEndian;
    } else {
        /// Byte order of byte-aligned pixels in a buffer.
        pub type StorageOrder = byteorder::BigEndian;
    }
}

/// A bitmap of format `F` over the buffer `B`, with an optional palette `P`
/// for indexed formats.
#[derive(Clone, Debug)]
pub struct Bitmap<F, B, P = NoPalette<F>> {
    dimensions: Size16,
    buffer: B,
    palette: Option<P>,
    _format: PhantomData<F>,
}

/// Bytes needed for a `dimensions` bitmap of format `F`.
pub fn sizeof_buffer<F: Format>(dimensions: Size16) -> usize {
    let bits = dimensions.width as usize * dimensions.height as usize * Pixel::<F>::BIT_DEPTH as usize;
    (bits + 7) / 8
}

impl<F: Format, B: AsRef<[u8]>, P: Palette<F>> Bitmap<F, B, P> {
    /// Wraps `buffer`, which must hold at least `sizeof_buffer(dimensions)`
    /// bytes.
    ///
    /// An empty buffer is accepted and makes an uninitialized bitmap: it
    /// reports its size, but every pixel access fails with `InvalidState`.
    pub fn new(dimensions: Size16, buffer: B) -> Result<Self> {
        let have = buffer.as_ref().len();
        let need = sizeof_buffer::<F>(dimensions);
        if have != 0 && have < need {
            log::debug!("bitmap buffer too small: {} < {}", have, need);
            return Err(Error::OutOfMemory);
        }
        Ok(Bitmap {
            dimensions,
            buffer,
            palette: None,
            _format: PhantomData,
        })
    }

    pub fn with_palette(dimensions: Size16, buffer: B, palette: P) -> Result<Self> {
        let mut bmp = Self::new(dimensions, buffer)?;
        bmp.palette = Some(palette);
        Ok(bmp)
    }

    pub fn sizeof_buffer(dimensions: Size16) -> usize {
        sizeof_buffer::<F>(dimensions)
    }

    /// Bytes of the buffer in use.
    pub fn size_bytes(&self) -> usize {
        sizeof_buffer::<F>(self.dimensions)
    }

    pub fn initialized(&self) -> bool {
        self.size_bytes() == 0 || !self.buffer.as_ref().is_empty()
    }

    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }

    pub fn set_palette(&mut self, palette: Option<P>) {
        self.palette = palette;
    }

    pub fn palette_mut(&mut self) -> Option<&mut P> {
        self.palette.as_mut()
    }

    fn check(&self) -> Result<()> {
        if self.initialized() {
            Ok(())
        } else {
            Err(Error::InvalidState)
        }
    }

    fn index(&self, location: Point16) -> usize {
        location.y as usize * self.dimensions.width as usize + location.x as usize
    }

    fn in_bounds(&self, location: Point16) -> bool {
        location.x < self.dimensions.width && location.y < self.dimensions.height
    }
}

impl<F: Format, B: AsRef<[u8]> + AsMut<[u8]>, P: Palette<F>> Bitmap<F, B, P> {
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut()
    }

    /// Round-trips every pixel through format `Via`, in place. Useful to
    /// preview how an image survives a narrower format.
    pub fn resample<Via: Format>(&mut self) -> Result<()> {
        self.check()?;
        for y in 0..self.dimensions.height {
            for x in 0..self.dimensions.width {
                let at = Point16::new(x, y);
                let px = self.point(at)?;
                let via: Pixel<Via> = px.convert()?;
                self.set_point(at, via.convert()?)?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl<F: Format, P: Palette<F>> Bitmap<F, alloc::vec::Vec<u8>, P> {
    /// Allocates a zeroed bitmap on the heap.
    pub fn allocate(dimensions: Size16) -> Result<Self> {
        let n = sizeof_buffer::<F>(dimensions);
        let mut v = alloc::vec::Vec::new();
        v.try_reserve_exact(n).map_err(|_| Error::OutOfMemory)?;
        v.resize(n, 0);
        log::debug!("allocated {} byte bitmap for {:?}", n, dimensions);
        Self::new(dimensions, v)
    }
}

/// Packed value of pixel number `index`.
fn read_packed<F: Format>(buf: &[u8], index: usize) -> u64 {
    if Pixel::<F>::BYTE_ALIGNED {
        let n = Pixel::<F>::PACKED_SIZE;
        StorageOrder::read_uint(&buf[index * n..index * n + n], n)
    } else {
        let depth = Pixel::<F>::BIT_DEPTH as usize;
        bit::get_bits(buf, index * depth, depth)
    }
}

fn write_packed<F: Format>(buf: &mut [u8], index: usize, packed: u64) {
    if Pixel::<F>::BYTE_ALIGNED {
        let n = Pixel::<F>::PACKED_SIZE;
        StorageOrder::write_uint(&mut buf[index * n..index * n + n], packed, n);
    } else {
        let depth = Pixel::<F>::BIT_DEPTH as usize;
        bit::put_bits(buf, index * depth, depth, packed);
    }
}

/// Fills `count` pixels starting at pixel number `start`.
///
/// Sub-byte formats go through a byte pattern holding eight pixels in the
/// alignment of the run's first bit. `cache` keeps the last pattern and its
/// alignment so consecutive rows with the same alignment reuse it.
fn fill_run<F: Format>(
    buf: &mut [u8],
    start: usize,
    count: usize,
    packed: u64,
    cache: &mut Option<(usize, [u8; 64])>,
) {
    if Pixel::<F>::BYTE_ALIGNED {
        let n = Pixel::<F>::PACKED_SIZE;
        let mut bytes = [0u8; 8];
        StorageOrder::write_uint(&mut bytes[..n], packed, n);
        for px in buf[start * n..(start + count) * n].chunks_exact_mut(n) {
            px.copy_from_slice(&bytes[..n]);
        }
        return;
    }
    let depth = Pixel::<F>::BIT_DEPTH as usize;
    let offset = start * depth;
    if depth == 1 {
        bit::set_bits(buf, offset, count, packed != 0);
        return;
    }
    let phase = offset % 8;
    let stale = match cache {
        Some((p, _)) => *p != phase,
        None => true,
    };
    if stale {
        // Sixteen pixels in a row from `phase`: the second half of the
        // scratch (bytes depth..2*depth) is fully covered and has the same
        // alignment as the run.
        let mut scratch = [0u8; 129];
        for m in 0..16 {
            bit::put_bits(&mut scratch, phase + m * depth, depth, packed);
        }
        let mut pattern = [0u8; 64];
        pattern[..depth].copy_from_slice(&scratch[depth..2 * depth]);
        *cache = Some((phase, pattern));
    }
    if let Some((_, pattern)) = cache {
        bit::fill_pattern(buf, offset, count * depth, &pattern[..depth]);
    }
}

impl<F: Format, B: AsRef<[u8]>, P: Palette<F>> Target for Bitmap<F, B, P> {
    type Format = F;
    type Palette = P;

    const CAPS: Caps = Caps {
        blt: true,
        copy_to: true,
        read: true,
        ..Caps::NONE
    };

    fn dimensions(&self) -> Size16 {
        self.dimensions
    }

    fn palette(&self) -> Option<&P> {
        self.palette.as_ref()
    }
}

impl<F: Format, B: AsRef<[u8]>, P: Palette<F>> Source for Bitmap<F, B, P> {
    fn point(&self, location: Point16) -> Result<Pixel<F>> {
        self.check()?;
        if !self.in_bounds(location) {
            return Ok(Pixel::from_native(0));
        }
        let packed = read_packed::<F>(self.buffer.as_ref(), self.index(location));
        Ok(Pixel::from_packed(packed))
    }

    /// Copies pixels to `dst`. When `dst` exposes a buffer of the same format
    /// the rows are copied raw; otherwise each pixel is converted.
    fn copy_to<D: Destination>(&self, src_rect: &Rect16, dst: &mut D, location: Point16) -> Result<()> {
        self.check()?;
        if D::CAPS.blt && same_layout(F::CHANNELS, <D::Format as Format>::CHANNELS) {
            let dst_width = dst.dimensions().width as usize;
            if let Some((sr, at)) = crop_copy(self.bounds(), src_rect, dst.bounds(), location) {
                if let Some(out) = dst.blt_buffer_mut() {
                    log::trace!("raw copy of {:?} to {:?}", sr, at);
                    blt_rows::<F>(
                        self.buffer.as_ref(),
                        self.dimensions.width as usize,
                        &sr,
                        out,
                        dst_width,
                        at,
                    );
                    return Ok(());
                }
            } else {
                return Ok(());
            }
        }
        copy_pixels(self, src_rect, dst, location)
    }

    fn blt_buffer(&self) -> Option<&[u8]> {
        if self.initialized() {
            Some(self.buffer.as_ref())
        } else {
            None
        }
    }
}

/// Raw row copy between two packed buffers of the same format.
pub(crate) fn blt_rows<F: Format>(
    src: &[u8],
    src_width: usize,
    sr: &Rect16,
    dst: &mut [u8],
    dst_width: usize,
    at: Point16,
) {
    let w = sr.width() as usize;
    for row in 0..sr.height() as usize {
        let si = (sr.y1 as usize + row) * src_width + sr.x1 as usize;
        let di = (at.y as usize + row) * dst_width + at.x as usize;
        if Pixel::<F>::BYTE_ALIGNED {
            let n = Pixel::<F>::PACKED_SIZE;
            dst[di * n..(di + w) * n].copy_from_slice(&src[si * n..(si + w) * n]);
        } else {
            let depth = Pixel::<F>::BIT_DEPTH as usize;
            bit::copy_bits_between(dst, di * depth, src, si * depth, w * depth);
        }
    }
}

impl<F: Format, B: AsRef<[u8]> + AsMut<[u8]>, P: Palette<F>> Destination for Bitmap<F, B, P> {
    fn set_point(&mut self, location: Point16, pixel: Pixel<F>) -> Result<()> {
        self.check()?;
        if !self.in_bounds(location) {
            return Ok(());
        }
        let i = self.index(location);
        write_packed::<F>(self.buffer.as_mut(), i, pixel.packed_value());
        Ok(())
    }

    fn fill(&mut self, bounds: &Rect16, pixel: Pixel<F>) -> Result<()> {
        self.check()?;
        let all = self.bounds();
        if self.dimensions.is_empty() || !bounds.intersects(&all) {
            return Ok(());
        }
        let r = bounds.normalize().crop(&all);
        let width = self.dimensions.width as usize;
        let packed = pixel.packed_value();
        let mut cache = None;
        let buf = self.buffer.as_mut();
        if r.left() == 0 && r.right() as usize == width - 1 {
            // Whole rows are one contiguous run.
            let start = r.top() as usize * width;
            let count = r.height() as usize * width;
            fill_run::<F>(buf, start, count, packed, &mut cache);
            return Ok(());
        }
        for y in r.top()..=r.bottom() {
            let start = y as usize * width + r.left() as usize;
            fill_run::<F>(buf, start, r.width() as usize, packed, &mut cache);
        }
        Ok(())
    }

    fn read_point(&self, location: Point16) -> Result<Pixel<F>> {
        self.point(location)
    }

    fn blt_buffer_mut(&mut self) -> Option<&mut [u8]> {
        if self.initialized() {
            Some(self.buffer.as_mut())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::TablePalette;
    use crate::pixel::{Gsc1, Gsc4, Gsc8, Index2, Rgb565, Rgb666, Rgb888, Rgba8888};
    use rand::{Rng, SeedableRng};

    fn size(w: u16, h: u16) -> Size16 {
        Size16::new(w, h)
    }

    #[test]
    fn buffer_sizes() {
        assert_eq!(sizeof_buffer::<Gsc1>(size(9, 3)), 4);
        assert_eq!(sizeof_buffer::<Rgb888>(size(4, 4)), 48);
        assert_eq!(sizeof_buffer::<Rgb666>(size(3, 1)), 7);
        let too_small = [0u8; 47];
        assert_eq!(
            Bitmap::<Rgb888, _>::new(size(4, 4), &too_small[..]).err(),
            Some(Error::OutOfMemory)
        );
    }

    #[test]
    fn uninitialized_reports_invalid_state() {
        let bmp = Bitmap::<Rgb565, &[u8]>::new(size(2, 2), &[]).unwrap();
        assert!(!bmp.initialized());
        assert_eq!(bmp.point(Point16::new(0, 0)), Err(Error::InvalidState));
    }

    #[test]
    fn big_endian_storage() {
        let mut buf = [0u8; 6];
        let mut bmp = Bitmap::<Rgb888, _>::new(size(2, 1), &mut buf[..]).unwrap();
        bmp.set_point(Point16::new(1, 0), Pixel::from_channels(&[0x12, 0x34, 0x56]))
            .unwrap();
        #[cfg(not(feature = "native-order"))]
        assert_eq!(bmp.buffer(), &[0, 0, 0, 0x12, 0x34, 0x56]);
        assert_eq!(
            bmp.point(Point16::new(1, 0)).unwrap(),
            Pixel::from_channels(&[0x12, 0x34, 0x56])
        );
    }

    #[test]
    fn sub_byte_packing() {
        let mut bmp = Bitmap::<Gsc4, _>::new(size(3, 1), [0u8; 2]).unwrap();
        bmp.set_point(Point16::new(0, 0), Pixel::from_channels(&[0xA])).unwrap();
        bmp.set_point(Point16::new(2, 0), Pixel::from_channels(&[0x5])).unwrap();
        assert_eq!(bmp.buffer(), &[0xA0, 0x50]);
        assert_eq!(bmp.point(Point16::new(2, 0)).unwrap().channel(0), 5);
    }

    #[test]
    fn out_of_bounds_is_quiet() {
        let mut bmp = Bitmap::<Gsc8, _>::new(size(2, 2), [7u8; 4]).unwrap();
        bmp.set_point(Point16::new(2, 0), Pixel::from_channels(&[1])).unwrap();
        assert_eq!(bmp.buffer(), &[7; 4]);
        assert_eq!(bmp.point(Point16::new(0, 9)).unwrap().native_value(), 0);
    }

    /// Fills through the pattern path and checks every pixel against a
    /// per-pixel reference.
    fn check_fill<F: Format>(w: u16, h: u16, seed: u64) {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        let n = sizeof_buffer::<F>(size(w, h));
        let mut fast = [0u8; 512];
        for b in fast[..n].iter_mut() {
            *b = rng.gen();
        }
        let mut slow = fast;
        for _ in 0..20 {
            let r = Rect16::from_xyxy(
                rng.gen_range(0, w + 3),
                rng.gen_range(0, h + 3),
                rng.gen_range(0, w + 3),
                rng.gen_range(0, h + 3),
            );
            let px = Pixel::<F>::from_native(rng.gen());
            let mut a = Bitmap::<F, _>::new(size(w, h), &mut fast[..n]).unwrap();
            a.fill(&r, px).unwrap();
            let mut b = Bitmap::<F, _>::new(size(w, h), &mut slow[..n]).unwrap();
            let c = r.normalize();
            for y in c.top()..=c.bottom() {
                for x in c.left()..=c.right() {
                    b.set_point(Point16::new(x, y), px).unwrap();
                }
            }
            assert_eq!(&fast[..n], &slow[..n], "fill {:?}", r);
        }
    }

    #[test]
    fn fills_match_reference() {
        check_fill::<Gsc1>(13, 5, 1);
        check_fill::<Gsc4>(7, 6, 2);
        check_fill::<Rgb666>(9, 7, 3);
        check_fill::<Rgb565>(11, 4, 4);
        check_fill::<Rgb888>(5, 5, 5);
        check_fill::<Index2>(17, 3, 6);
    }

    #[test]
    fn raw_copy_between_sub_byte_bitmaps() {
        let mut src = Bitmap::<Rgb666, _>::new(size(5, 4), [0u8; 45]).unwrap();
        for y in 0..4 {
            for x in 0..5 {
                let v = (y * 5 + x) as u64;
                src.set_point(Point16::new(x, y), Pixel::from_channels(&[v, 63 - v, v * 2]))
                    .unwrap();
            }
        }
        let mut dst = Bitmap::<Rgb666, _>::new(size(7, 3), [0u8; 48]).unwrap();
        src.copy_to(&Rect16::from_xyxy(1, 1, 4, 3), &mut dst, Point16::new(4, 1))
            .unwrap();
        for y in 0..3u16 {
            for x in 0..7u16 {
                let got = dst.point(Point16::new(x, y)).unwrap();
                if y >= 1 && x >= 4 {
                    let want = src.point(Point16::new(x - 3, y)).unwrap();
                    assert_eq!(got, want, "({}, {})", x, y);
                } else {
                    assert_eq!(got.native_value(), 0, "({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn converting_copy_with_alpha() {
        let mut src = Bitmap::<Rgba8888, _>::new(size(2, 1), [0u8; 8]).unwrap();
        src.set_point(Point16::new(0, 0), Pixel::from_channels(&[255, 0, 0, 255]))
            .unwrap();
        src.set_point(Point16::new(1, 0), Pixel::from_channels(&[255, 0, 0, 0]))
            .unwrap();
        let mut dst = Bitmap::<Rgb565, _>::new(size(2, 1), [0u8; 4]).unwrap();
        dst.fill(&dst.bounds(), Pixel::from_channels(&[0, 0, 31])).unwrap();
        src.copy_to(&src.bounds(), &mut dst, Point16::new(0, 0)).unwrap();
        assert_eq!(dst.point(Point16::new(0, 0)).unwrap(), Pixel::from_channels(&[31, 0, 0]));
        assert_eq!(dst.point(Point16::new(1, 0)).unwrap(), Pixel::from_channels(&[0, 0, 31]));
    }

    #[test]
    fn indexed_copy_uses_palettes() {
        let ramp = [
            Pixel::<Gsc8>::from_channels(&[0]),
            Pixel::from_channels(&[85]),
            Pixel::from_channels(&[170]),
            Pixel::from_channels(&[255]),
        ];
        let pal = TablePalette::<Index2, Gsc8, _>::new(ramp).unwrap();
        let mut src = Bitmap::<Index2, _, _>::with_palette(size(4, 1), [0b00_01_10_11u8], pal).unwrap();
        let mut dst = Bitmap::<Gsc8, _>::new(size(4, 1), [0u8; 4]).unwrap();
        src.copy_to(&src.bounds(), &mut dst, Point16::new(0, 0)).unwrap();
        assert_eq!(dst.buffer(), &[0, 85, 170, 255]);

        src.set_palette(None);
        assert_eq!(
            src.copy_to(&src.bounds(), &mut dst, Point16::new(0, 0)),
            Err(Error::NoPalette)
        );
    }

    #[test]
    fn resample_through_narrow_format() {
        let mut bmp = Bitmap::<Rgb888, _>::new(size(1, 1), [0u8; 3]).unwrap();
        bmp.set_point(Point16::new(0, 0), Pixel::from_channels(&[0x12, 0x34, 0x56]))
            .unwrap();
        bmp.resample::<Rgb565>().unwrap();
        assert_eq!(bmp.point(Point16::new(0, 0)).unwrap(), Pixel::from_channels(&[0x10, 0x35, 0x52]));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn allocate_zeroed() {
        let bmp = Bitmap::<Gsc4, alloc::vec::Vec<u8>>::allocate(size(3, 3)).unwrap();
        assert_eq!(bmp.buffer(), &[0u8; 5][..]);
    }
}
