//! A destination that records what the engine asks of it.
//!
//! `Recorder` keeps its pixels as plain native values so tests can inspect
//! the result, logs every operation it receives, and can be told to fail
//! after a number of writes. Its capabilities come from a `Profile` type, so
//! one recorder type per capability set exercises every dispatch path.

use core::marker::PhantomData;

use math::{Point16, Rect16, Size16};

use crate::palette::NoPalette;
use crate::pixel::{Format, Pixel};
use crate::target::{Caps, Destination, Target};
use crate::{Error, Result};

pub(crate) trait Profile {
    const CAPS: Caps;
}

macro_rules! profile {
    ($name:ident, $caps:expr) => {
        pub(crate) struct $name;
        impl Profile for $name {
            const CAPS: Caps = $caps;
        }
    };
}

profile!(Plain, Caps::NONE);
profile!(Readable, Caps { read: true, ..Caps::NONE });
profile!(Batching, Caps { batch: true, read: true, ..Caps::NONE });
profile!(Suspending, Caps { suspend: true, read: true, ..Caps::NONE });
profile!(
    Everything,
    Caps {
        batch: true,
        async_: true,
        suspend: true,
        read: true,
        ..Caps::NONE
    }
);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Op {
    Point(u16, u16, u64),
    Fill(Rect16, u64),
    Begin(Rect16),
    Write(u64),
    Commit,
    Suspend,
    Resume,
    Wait,
}

pub(crate) struct Recorder<F, C> {
    size: Size16,
    pixels: std::vec::Vec<u64>,
    pub(crate) ops: std::vec::Vec<Op>,
    /// Current suspend nesting.
    pub(crate) depth: i32,
    /// Calls that came in through an `_async` entry point.
    pub(crate) async_calls: usize,
    /// Fail every write once this many have succeeded.
    pub(crate) fail_after: Option<usize>,
    writes: usize,
    batch: Option<(Rect16, usize)>,
    _m: PhantomData<(F, C)>,
}

impl<F: Format, C: Profile> Recorder<F, C> {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Recorder {
            size: Size16::new(width, height),
            pixels: vec![0; width as usize * height as usize],
            ops: vec![],
            depth: 0,
            async_calls: 0,
            fail_after: None,
            writes: 0,
            batch: None,
            _m: PhantomData,
        }
    }

    pub(crate) fn at(&self, x: u16, y: u16) -> u64 {
        self.pixels[y as usize * self.size.width as usize + x as usize]
    }

    /// Every location set, by any means, in the order the writes arrived.
    pub(crate) fn touched(&self) -> std::vec::Vec<(u16, u16)> {
        let mut out = vec![];
        for op in &self.ops {
            match *op {
                Op::Point(x, y, _) => out.push((x, y)),
                Op::Fill(r, _) => {
                    for y in r.top()..=r.bottom() {
                        for x in r.left()..=r.right() {
                            out.push((x, y));
                        }
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Pixels with a nonzero value, as an ASCII picture for assertions.
    pub(crate) fn picture(&self) -> std::vec::Vec<std::string::String> {
        (0..self.size.height)
            .map(|y| {
                (0..self.size.width)
                    .map(|x| if self.at(x, y) != 0 { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    fn count_write(&mut self) -> Result<()> {
        if let Some(n) = self.fail_after {
            if self.writes >= n {
                return Err(Error::DeviceError);
            }
        }
        self.writes += 1;
        Ok(())
    }

    fn store(&mut self, x: u16, y: u16, native: u64) {
        if x < self.size.width && y < self.size.height {
            let w = self.size.width as usize;
            self.pixels[y as usize * w + x as usize] = native;
        }
    }
}

impl<F: Format, C: Profile> Target for Recorder<F, C> {
    type Format = F;
    type Palette = NoPalette<F>;

    const CAPS: Caps = C::CAPS;

    fn dimensions(&self) -> Size16 {
        self.size
    }
}

impl<F: Format, C: Profile> Destination for Recorder<F, C> {
    fn set_point(&mut self, location: Point16, pixel: Pixel<F>) -> Result<()> {
        self.count_write()?;
        let v = pixel.native_value();
        self.ops.push(Op::Point(location.x, location.y, v));
        self.store(location.x, location.y, v);
        Ok(())
    }

    fn fill(&mut self, bounds: &Rect16, pixel: Pixel<F>) -> Result<()> {
        self.count_write()?;
        let r = bounds.normalize();
        let v = pixel.native_value();
        self.ops.push(Op::Fill(r, v));
        for y in r.top()..=r.bottom() {
            for x in r.left()..=r.right() {
                self.store(x, y, v);
            }
        }
        Ok(())
    }

    fn begin_batch(&mut self, bounds: &Rect16) -> Result<()> {
        if !C::CAPS.batch {
            return Err(Error::NotSupported);
        }
        if self.batch.is_some() {
            return Err(Error::InvalidState);
        }
        self.batch = Some((bounds.normalize(), 0));
        self.ops.push(Op::Begin(bounds.normalize()));
        Ok(())
    }

    fn write_batch(&mut self, pixel: Pixel<F>) -> Result<()> {
        self.count_write()?;
        let (r, n) = self.batch.ok_or(Error::InvalidState)?;
        let w = r.width() as usize;
        let (x, y) = (r.left() + (n % w) as u16, r.top() + (n / w) as u16);
        self.batch = Some((r, n + 1));
        self.ops.push(Op::Write(pixel.native_value()));
        self.store(x, y, pixel.native_value());
        Ok(())
    }

    fn commit_batch(&mut self) -> Result<()> {
        match self.batch.take() {
            Some((r, n)) if n == r.dimensions().area() => {
                self.ops.push(Op::Commit);
                Ok(())
            }
            _ => Err(Error::InvalidState),
        }
    }

    fn set_point_async(&mut self, location: Point16, pixel: Pixel<F>) -> Result<()> {
        self.async_calls += 1;
        self.set_point(location, pixel)
    }

    fn fill_async(&mut self, bounds: &Rect16, pixel: Pixel<F>) -> Result<()> {
        self.async_calls += 1;
        self.fill(bounds, pixel)
    }

    fn begin_batch_async(&mut self, bounds: &Rect16) -> Result<()> {
        self.async_calls += 1;
        self.begin_batch(bounds)
    }

    fn write_batch_async(&mut self, pixel: Pixel<F>) -> Result<()> {
        self.async_calls += 1;
        self.write_batch(pixel)
    }

    fn commit_batch_async(&mut self) -> Result<()> {
        self.async_calls += 1;
        self.commit_batch()
    }

    fn suspend(&mut self) -> Result<()> {
        self.depth += 1;
        self.ops.push(Op::Suspend);
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.depth -= 1;
        self.ops.push(Op::Resume);
        Ok(())
    }

    fn wait_all_async(&mut self) -> Result<()> {
        self.ops.push(Op::Wait);
        Ok(())
    }

    fn read_point(&self, location: Point16) -> Result<Pixel<F>> {
        if !C::CAPS.read {
            return Err(Error::NotSupported);
        }
        if location.x < self.size.width && location.y < self.size.height {
            Ok(Pixel::from_native(self.at(location.x, location.y)))
        } else {
            Ok(Pixel::from_native(0))
        }
    }
}
