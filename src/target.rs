//! The contracts between the drawing engine and the things it draws on.
//!
//! A draw target is anything with a pixel format, a palette and a size
//! (`Target`). Targets that can be read implement `Source`; targets that can
//! be written implement `Destination`. Beyond the required per-pixel
//! operations, every optional feature is declared up front in `Target::CAPS`
//! and the engine never calls an operation whose capability is not declared.
//! The default implementations of optional operations fail with
//! `NotSupported` or do nothing, so a minimal destination only has to write
//! single pixels.

use math::{Point16, Rect16, Size16};

use crate::palette::{convert_between, Palette};
use crate::pixel::{Format, Pixel};
use crate::{Error, Result};

/// Optional features of a target.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Caps {
    /// Exposes its storage as a packed buffer in bitmap layout
    /// (`blt_buffer`/`blt_buffer_mut`).
    pub blt: bool,
    /// Implements `Destination::copy_from` natively.
    pub copy_from: bool,
    /// Implements `Source::copy_to` natively.
    pub copy_to: bool,
    /// Implements `begin_batch`/`write_batch`/`commit_batch`.
    pub batch: bool,
    /// Implements the `_async` operations.
    pub async_: bool,
    /// Implements `suspend`/`resume`.
    pub suspend: bool,
    /// Implements `Destination::read_point`.
    pub read: bool,
}

impl Caps {
    /// Nothing beyond single-pixel writes.
    pub const NONE: Caps = Caps {
        blt: false,
        copy_from: false,
        copy_to: false,
        batch: false,
        async_: false,
        suspend: false,
        read: false,
    };
}

/// Something with pixels.
pub trait Target {
    type Format: Format;
    type Palette: Palette<Self::Format>;

    const CAPS: Caps;

    fn dimensions(&self) -> Size16;

    fn bounds(&self) -> Rect16 {
        self.dimensions().bounds()
    }

    /// The palette resolving indexed pixels, if the target has one.
    fn palette(&self) -> Option<&Self::Palette> {
        None
    }
}

/// A target that can be read.
pub trait Source: Target {
    /// Reads one pixel. Locations outside the target read as zero.
    fn point(&self, location: Point16) -> Result<Pixel<Self::Format>>;

    /// Copies `src_rect` of this target to `dst`, placing its top-left
    /// corner at `location`.
    ///
    /// The default reads, converts and writes one pixel at a time. Pixels
    /// carrying alpha are composited onto what `dst` already holds when it
    /// can be read back.
    fn copy_to<D: Destination>(&self, src_rect: &Rect16, dst: &mut D, location: Point16) -> Result<()>
    where
        Self: Sized,
    {
        copy_pixels(self, src_rect, dst, location)
    }

    /// The backing store, if it is a packed buffer in bitmap layout.
    fn blt_buffer(&self) -> Option<&[u8]> {
        None
    }
}

/// A target that can be written.
pub trait Destination: Target {
    /// Writes one pixel. Locations outside the target are ignored.
    fn set_point(&mut self, location: Point16, pixel: Pixel<Self::Format>) -> Result<()>;

    /// Fills `bounds` (any orientation) with `pixel`.
    ///
    /// The default streams the pixels through a batch when the target has
    /// one, and writes them one at a time otherwise.
    fn fill(&mut self, bounds: &Rect16, pixel: Pixel<Self::Format>) -> Result<()> {
        fill_pixels(self, bounds, pixel)
    }

    /// Fills `bounds` with the zero pixel.
    fn clear(&mut self, bounds: &Rect16) -> Result<()> {
        self.fill(bounds, Pixel::from_native(0))
    }

    /// Starts a batch covering `bounds`; pixels are then written left to
    /// right, top to bottom, by `write_batch`.
    fn begin_batch(&mut self, _bounds: &Rect16) -> Result<()> {
        Err(Error::NotSupported)
    }

    fn write_batch(&mut self, _pixel: Pixel<Self::Format>) -> Result<()> {
        Err(Error::NotSupported)
    }

    fn commit_batch(&mut self) -> Result<()> {
        Err(Error::NotSupported)
    }

    fn set_point_async(&mut self, location: Point16, pixel: Pixel<Self::Format>) -> Result<()> {
        self.set_point(location, pixel)
    }

    fn fill_async(&mut self, bounds: &Rect16, pixel: Pixel<Self::Format>) -> Result<()> {
        self.fill(bounds, pixel)
    }

    fn begin_batch_async(&mut self, bounds: &Rect16) -> Result<()> {
        self.begin_batch(bounds)
    }

    fn write_batch_async(&mut self, pixel: Pixel<Self::Format>) -> Result<()> {
        self.write_batch(pixel)
    }

    fn commit_batch_async(&mut self) -> Result<()> {
        self.commit_batch()
    }

    /// Defers visible updates until the matching `resume`.
    fn suspend(&mut self) -> Result<()> {
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        Ok(())
    }

    fn suspend_async(&mut self) -> Result<()> {
        self.suspend()
    }

    fn resume_async(&mut self) -> Result<()> {
        self.resume()
    }

    /// Blocks until every async operation issued so far has completed.
    fn wait_all_async(&mut self) -> Result<()> {
        Ok(())
    }

    /// Reads back a pixel already written.
    fn read_point(&self, _location: Point16) -> Result<Pixel<Self::Format>> {
        Err(Error::NotSupported)
    }

    /// Copies `src_rect` of `src` into this target at `location`.
    fn copy_from<S: Source>(&mut self, _src_rect: &Rect16, _src: &S, _location: Point16) -> Result<()>
    where
        Self: Sized,
    {
        Err(Error::NotSupported)
    }

    /// The backing store, if it is a packed buffer in bitmap layout.
    fn blt_buffer_mut(&mut self) -> Option<&mut [u8]> {
        None
    }
}

/// Fill without a native fill operation: one batch over the cropped
/// rectangle if the target batches, single pixels if not.
fn fill_pixels<D: Destination + ?Sized>(dst: &mut D, bounds: &Rect16, pixel: Pixel<D::Format>) -> Result<()> {
    let r = bounds.normalize().crop(&dst.bounds());
    if !r.intersects(&dst.bounds()) {
        return Ok(());
    }
    if D::CAPS.batch {
        dst.begin_batch(&r)?;
        for _ in 0..r.dimensions().area() {
            dst.write_batch(pixel)?;
        }
        return dst.commit_batch();
    }
    for y in r.top()..=r.bottom() {
        for x in r.left()..=r.right() {
            dst.set_point(Point16::new(x, y), pixel)?;
        }
    }
    Ok(())
}

/// Crops `src_rect` against the source and the destination placed at
/// `location`. Returns the source rectangle left and its destination origin,
/// or `None` if nothing remains.
pub(crate) fn crop_copy(
    src_bounds: Rect16,
    src_rect: &Rect16,
    dst_bounds: Rect16,
    location: Point16,
) -> Option<(Rect16, Point16)> {
    let sr = src_rect.normalize();
    if !sr.intersects(&src_bounds) || !dst_bounds.contains(location) {
        return None;
    }
    let sr = sr.crop(&src_bounds);
    // Room left in the destination from `location`.
    let w = (sr.width() as u32).min(dst_bounds.right() as u32 - location.x as u32 + 1);
    let h = (sr.height() as u32).min(dst_bounds.bottom() as u32 - location.y as u32 + 1);
    let sr = Rect16::from_xyxy(
        sr.x1,
        sr.y1,
        sr.x1 + (w - 1) as u16,
        sr.y1 + (h - 1) as u16,
    );
    Some((sr, location))
}

/// Pixel-at-a-time copy between any two targets.
pub(crate) fn copy_pixels<S: Source, D: Destination>(
    src: &S,
    src_rect: &Rect16,
    dst: &mut D,
    location: Point16,
) -> Result<()> {
    let (sr, loc) = match crop_copy(src.bounds(), src_rect, dst.bounds(), location) {
        Some(v) => v,
        None => return Ok(()),
    };
    let blend = Pixel::<S::Format>::HAS_ALPHA && D::CAPS.read;
    for y in 0..sr.height() {
        for x in 0..sr.width() {
            let px = src.point(Point16::new(sr.x1 + x, sr.y1 + y))?;
            let at = Point16::new(loc.x + x, loc.y + y);
            let bg = if blend { Some(dst.read_point(at)?) } else { None };
            let out = convert_between(px, src.palette(), dst.palette(), bg)?;
            dst.set_point(at, out)?;
        }
    }
    Ok(())
}
