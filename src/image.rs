//! The interface between streaming image decoders and the engine.
//!
//! A decoder produces its image as a sequence of `Patch`es, each either a
//! small RGBA block at some location or a rectangle of one color, and hands
//! them to a `DecodeSink`. The sink may return `Error::Canceled` to stop the
//! decode early; that is a clean stop, not a failure.

use math::{Point16, Rect16, Size16};

use crate::pixel::{Pixel, Rgba8888};
use crate::target::Target;
use crate::{Bitmap, Result};

/// One piece of a decoded image, in image coordinates.
#[derive(Debug)]
pub enum Patch<'a> {
    Bitmap {
        location: Point16,
        bitmap: &'a Bitmap<Rgba8888, &'a [u8]>,
    },
    Fill {
        bounds: Rect16,
        color: Pixel<Rgba8888>,
    },
}

impl<'a> Patch<'a> {
    /// The area of the image this patch covers.
    pub fn bounds(&self) -> Rect16 {
        match self {
            Patch::Bitmap { location, bitmap } => bitmap.dimensions().at(*location),
            Patch::Fill { bounds, .. } => bounds.normalize(),
        }
    }
}

/// Receives patches from a decoder.
pub trait DecodeSink {
    fn patch(&mut self, patch: Patch<'_>) -> Result<()>;
}

impl<F: FnMut(Patch<'_>) -> Result<()>> DecodeSink for F {
    fn patch(&mut self, patch: Patch<'_>) -> Result<()> {
        self(patch)
    }
}

pub trait Decoder {
    /// Reads headers; must succeed before `dimensions` or `draw` are used.
    fn initialize(&mut self) -> Result<()>;

    fn dimensions(&self) -> Size16;

    /// Decodes the part of the image inside `bounds`, feeding patches to
    /// `sink`. Stops at and returns the first error from the sink.
    fn draw(&mut self, bounds: &Rect16, sink: &mut dyn DecodeSink) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::Error;

    /// Produces a 4x4 image as a red 2x2 block at (0, 0) followed by a blue
    /// fill of the bottom half.
    pub(crate) struct Checker {
        pub(crate) ready: bool,
        pub(crate) block: [u8; 16],
    }

    impl Checker {
        pub(crate) fn new() -> Self {
            let mut block = [0; 16];
            for px in block.chunks_mut(4) {
                px.copy_from_slice(&[255, 0, 0, 255]);
            }
            Checker {
                ready: false,
                block,
            }
        }
    }

    impl Decoder for Checker {
        fn initialize(&mut self) -> Result<()> {
            self.ready = true;
            Ok(())
        }

        fn dimensions(&self) -> Size16 {
            Size16::new(4, 4)
        }

        fn draw(&mut self, bounds: &Rect16, sink: &mut dyn DecodeSink) -> Result<()> {
            if !self.ready {
                return Err(Error::InvalidState);
            }
            let bmp = Bitmap::new(Size16::new(2, 2), &self.block[..])?;
            let block = Patch::Bitmap {
                location: Point16::new(0, 0),
                bitmap: &bmp,
            };
            if block.bounds().intersects(bounds) {
                sink.patch(block)?;
            }
            let fill = Patch::Fill {
                bounds: Rect16::from_xyxy(0, 2, 3, 3),
                color: Pixel::from_channels(&[0, 0, 255, 255]),
            };
            if fill.bounds().intersects(bounds) {
                sink.patch(fill)?;
            }
            Ok(())
        }
    }

    #[test]
    fn sink_sees_patches_and_can_cancel() {
        let mut dec = Checker::new();
        let all = Rect16::from_xyxy(0, 0, 3, 3);
        assert_eq!(
            dec.draw(&all, &mut |_: Patch<'_>| -> Result<()> { Ok(()) }),
            Err(Error::InvalidState)
        );
        dec.initialize().unwrap();

        let mut seen = std::vec::Vec::new();
        dec.draw(&all, &mut |p: Patch<'_>| -> Result<()> {
            seen.push(p.bounds());
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, [Rect16::from_xyxy(0, 0, 1, 1), Rect16::from_xyxy(0, 2, 3, 3)]);

        let mut count = 0;
        let r = dec.draw(&all, &mut |_: Patch<'_>| -> Result<()> {
            count += 1;
            Err(Error::Canceled)
        });
        assert!(r.unwrap_err().is_canceled());
        assert_eq!(count, 1);
    }
}
