//! Drawing decoded images.

use math::{saturate, Rect16, SPoint16, SRect16};

use super::blit;
use super::helpers::{drawable_area, suspended, Pen};
use super::rect::{filled_rectangle, srect};
use crate::image::{DecodeSink, Decoder, Patch};
use crate::sample::Resize;
use crate::target::{Destination, Target};
use crate::Result;

/// Places patches from a decoder at `origin` in the destination.
struct ImageSink<'d, D: Destination> {
    dst: &'d mut D,
    origin: SPoint16,
    area: SRect16,
    async_: bool,
}

impl<'d, D: Destination> ImageSink<'d, D> {
    fn place(&self, r: &Rect16) -> SRect16 {
        let (x, y) = (self.origin.x as i32, self.origin.y as i32);
        srect(r.x1 as i32 + x, r.y1 as i32 + y, r.x2 as i32 + x, r.y2 as i32 + y)
    }
}

impl<'d, D: Destination> DecodeSink for ImageSink<'d, D> {
    fn patch(&mut self, patch: Patch<'_>) -> Result<()> {
        let dest = self.place(&patch.bounds());
        match patch {
            Patch::Bitmap { bitmap, .. } => blit::bitmap(
                &mut *self.dst,
                &dest,
                bitmap,
                &bitmap.bounds(),
                Resize::Crop,
                None,
                Some(&self.area),
                self.async_,
            ),
            Patch::Fill { color, .. } => {
                let pen = Pen::new(&*self.dst, color, Some(&self.area), self.async_)?;
                filled_rectangle(&mut *self.dst, &pen, &dest)
            }
        }
    }
}

/// Decodes the visible part of the image with its top-left corner at
/// `location`. A decode the sink cancels counts as done.
pub(crate) fn image<D, Dec>(
    dst: &mut D,
    location: SPoint16,
    decoder: &mut Dec,
    clip: Option<&SRect16>,
    async_: bool,
) -> Result<()>
where
    D: Destination,
    Dec: Decoder + ?Sized,
{
    let size = decoder.dimensions();
    if size.is_empty() {
        return Ok(());
    }
    let (x, y) = (location.x as i32, location.y as i32);
    let placed = srect(x, y, x + size.width as i32 - 1, y + size.height as i32 - 1);
    let area = match drawable_area(dst, clip) {
        Some(a) if a.intersects(&placed) => a,
        _ => return Ok(()),
    };
    let vis = placed.crop(&area);
    // The visible part in image coordinates.
    let bounds = Rect16::from_xyxy(
        saturate(vis.x1 as i32 - x),
        saturate(vis.y1 as i32 - y),
        saturate(vis.x2 as i32 - x),
        saturate(vis.y2 as i32 - y),
    );
    log::debug!("drawing {:?} of image at {:?}", bounds, location);

    suspended(dst, async_, |dst| {
        let mut sink = ImageSink {
            dst,
            origin: location,
            area,
            async_,
        };
        match decoder.draw(&bounds, &mut sink) {
            Err(e) if e.is_canceled() => {
                log::debug!("image decode canceled");
                Ok(())
            }
            other => other,
        }
    })
}
