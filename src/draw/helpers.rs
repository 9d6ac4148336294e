//! Plumbing shared by the drawing operations: resolving a color against a
//! destination, clipping signed geometry to device coordinates, and picking
//! the destination primitive for each write from its capabilities.

use math::{saturate, Point16, Rect16, SPoint16, SRect16};

use crate::palette::{convert_between, NoPalette, Palette};
use crate::pixel::{same_layout, Format, Pixel, Rgba8888};
use crate::target::{Destination, Target};
use crate::Result;

/// A color resolved for one destination.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Ink<F: Format> {
    /// Nothing is drawn.
    Clear,
    /// Written as is.
    Solid(Pixel<F>),
    /// Composited onto what the destination holds, which must be readable.
    Blend(Pixel<Rgba8888>),
}

impl<F: Format> Ink<F> {
    pub(crate) fn new<D, C>(dst: &D, color: Pixel<C>) -> Result<Self>
    where
        D: Target<Format = F>,
        C: Format,
    {
        Self::with_palette::<D, C, NoPalette<C>>(dst, color, None)
    }

    /// Resolves `color`, whose palette (if it is indexed) is `palette`.
    ///
    /// Translucent colors stay translucent if the destination format has
    /// alpha. Otherwise they are blended against the destination when it
    /// can be read back; when it can't, they are drawn opaque if at least
    /// half opaque and not at all otherwise.
    pub(crate) fn with_palette<D, C, P>(dst: &D, color: Pixel<C>, palette: Option<&P>) -> Result<Self>
    where
        D: Target<Format = F>,
        C: Format,
        P: Palette<C>,
    {
        if same_layout(C::CHANNELS, F::CHANNELS) {
            return Ok(Ink::Solid(Pixel::from_native(color.native_value())));
        }
        let solid = |c: Pixel<C>| -> Result<Self> {
            Ok(Ink::Solid(convert_between(c, palette, dst.palette(), None)?))
        };
        if !Pixel::<C>::HAS_ALPHA || !color.is_translucent() || Pixel::<F>::HAS_ALPHA {
            return solid(color);
        }
        if color.is_transparent() {
            return Ok(Ink::Clear);
        }
        if D::CAPS.read {
            return Ok(Ink::Blend(color.convert()?));
        }
        log::warn!(
            "destination can't read back; alpha {:.2} drawn as {}",
            color.alpha(),
            if color.alpha() >= 0.5 { "opaque" } else { "nothing" }
        );
        if color.alpha() >= 0.5 {
            solid(color)
        } else {
            Ok(Ink::Clear)
        }
    }
}

/// Everything a primitive needs besides its geometry.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Pen<F: Format> {
    pub(crate) ink: Ink<F>,
    /// The clip rectangle intersected with the destination, or `None` if
    /// nothing can be drawn.
    pub(crate) area: Option<SRect16>,
    pub(crate) async_: bool,
}

impl<F: Format> Pen<F> {
    pub(crate) fn new<D, C>(dst: &D, color: Pixel<C>, clip: Option<&SRect16>, async_: bool) -> Result<Self>
    where
        D: Target<Format = F>,
        C: Format,
    {
        Ok(Pen {
            ink: Ink::new(dst, color)?,
            area: drawable_area(dst, clip),
            async_,
        })
    }

    /// The same pen with another ink.
    pub(crate) fn with_ink(&self, ink: Ink<F>) -> Self {
        Pen { ink, ..*self }
    }
}

/// The part of the destination a draw may touch: its bounds, cut down to
/// `clip` if there is one.
pub(crate) fn drawable_area<D: Target>(dst: &D, clip: Option<&SRect16>) -> Option<SRect16> {
    let size = dst.dimensions();
    if size.is_empty() {
        return None;
    }
    let device = SRect16::from_xyxy(
        0,
        0,
        saturate::<u16, i16>(size.width - 1),
        saturate::<u16, i16>(size.height - 1),
    );
    match clip {
        None => Some(device),
        Some(c) => {
            let c = c.normalize();
            if c.intersects(&device) {
                Some(c.crop(&device))
            } else {
                None
            }
        }
    }
}

/// Normalizes `rect` and cuts it to `area`, in device coordinates.
pub(crate) fn clip_rect(rect: &SRect16, area: Option<SRect16>) -> Option<Rect16> {
    let area = area?;
    let r = rect.normalize();
    if !r.intersects(&area) {
        return None;
    }
    let r = r.crop(&area);
    // Inside the device, so non-negative.
    Some(Rect16::from_xyxy(
        r.x1 as u16,
        r.y1 as u16,
        r.x2 as u16,
        r.y2 as u16,
    ))
}

pub(crate) fn clip_point(p: SPoint16, area: Option<SRect16>) -> Option<Point16> {
    match area {
        Some(a) if a.contains(p) => Some(Point16::new(p.x as u16, p.y as u16)),
        _ => None,
    }
}

/// Writes one device pixel, asynchronously if asked and supported.
pub(crate) fn write_point<D: Destination>(
    dst: &mut D,
    at: Point16,
    px: Pixel<D::Format>,
    async_: bool,
) -> Result<()> {
    if async_ && D::CAPS.async_ {
        dst.set_point_async(at, px)
    } else {
        dst.set_point(at, px)
    }
}

/// Puts `ink` at device pixel `at`.
pub(crate) fn put<D: Destination>(dst: &mut D, at: Point16, ink: &Ink<D::Format>, async_: bool) -> Result<()> {
    match *ink {
        Ink::Clear => Ok(()),
        Ink::Solid(px) => write_point(dst, at, px, async_),
        Ink::Blend(color) => {
            let bg = dst.read_point(at)?;
            let px = convert_between::<_, NoPalette<Rgba8888>, _, _>(color, None, dst.palette(), Some(bg))?;
            write_point(dst, at, px, async_)
        }
    }
}

/// Fills a device rectangle with `ink`: one native fill for solid inks, a
/// pixel loop for blended ones.
pub(crate) fn fill<D: Destination>(dst: &mut D, r: &Rect16, ink: &Ink<D::Format>, async_: bool) -> Result<()> {
    match *ink {
        Ink::Clear => Ok(()),
        Ink::Solid(px) => {
            if async_ && D::CAPS.async_ {
                dst.fill_async(r, px)
            } else {
                dst.fill(r, px)
            }
        }
        Ink::Blend(_) => {
            for y in r.top()..=r.bottom() {
                for x in r.left()..=r.right() {
                    put(dst, Point16::new(x, y), ink, async_)?;
                }
            }
            Ok(())
        }
    }
}

/// Writes a rectangle of pixels in order, left to right and top to bottom.
///
/// If the destination batches, the pixels go through one
/// `begin_batch`/`commit_batch` pair and every pixel of the rectangle must be
/// written. Otherwise each is a point write and any may be skipped.
pub(crate) struct Batch<'d, D: Destination> {
    dst: &'d mut D,
    native: bool,
    async_: bool,
}

impl<'d, D: Destination> Batch<'d, D> {
    pub(crate) fn begin(dst: &'d mut D, bounds: &Rect16, async_: bool) -> Result<Self> {
        let async_ = async_ && D::CAPS.async_;
        let native = D::CAPS.batch;
        if native {
            if async_ {
                dst.begin_batch_async(bounds)?;
            } else {
                dst.begin_batch(bounds)?;
            }
        }
        Ok(Batch { dst, native, async_ })
    }

    pub(crate) fn write(&mut self, at: Point16, px: Pixel<D::Format>) -> Result<()> {
        match (self.native, self.async_) {
            (true, true) => self.dst.write_batch_async(px),
            (true, false) => self.dst.write_batch(px),
            (false, _) => write_point(self.dst, at, px, self.async_),
        }
    }

    pub(crate) fn destination(&mut self) -> &mut D {
        self.dst
    }

    pub(crate) fn commit(self) -> Result<()> {
        match (self.native, self.async_) {
            (true, true) => self.dst.commit_batch_async(),
            (true, false) => self.dst.commit_batch(),
            (false, _) => Ok(()),
        }
    }
}

/// Runs `body` with the destination's refresh suspended, resuming afterward
/// whether or not `body` succeeded. The first error wins.
pub(crate) fn suspended<D, R>(dst: &mut D, async_: bool, body: impl FnOnce(&mut D) -> Result<R>) -> Result<R>
where
    D: Destination,
{
    if !D::CAPS.suspend {
        return body(dst);
    }
    let async_ = async_ && D::CAPS.async_;
    if async_ {
        dst.suspend_async()?;
    } else {
        dst.suspend()?;
    }
    // Resume even if `body` unwinds.
    let mut guard = scopeguard::guard(dst, |d| {
        let _ = resume_one(d, async_);
    });
    let result = body(&mut **guard);
    let dst = scopeguard::ScopeGuard::into_inner(guard);
    let resumed = resume_one(dst, async_);
    let out = result?;
    resumed?;
    Ok(out)
}

fn resume_one<D: Destination>(dst: &mut D, async_: bool) -> Result<()> {
    if async_ {
        dst.resume_async()
    } else {
        dst.resume()
    }
}
