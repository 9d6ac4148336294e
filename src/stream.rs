//! Byte streams feeding fonts and image decoders.
//!
//! `Stream` is deliberately small: block and single-byte reads and writes
//! plus seeking, with the supported subset reported by `caps`. Operations a
//! stream doesn't support fail with `NotSupported`.

use bitflags::bitflags;
use byteorder::ByteOrder;

use crate::{Error, Result};

bitflags! {
    /// What a stream can do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StreamCaps: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const SEEK = 1 << 2;
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SeekOrigin {
    Start,
    Current,
    End,
}

pub trait Stream {
    fn caps(&self) -> StreamCaps;

    /// Reads up to `buf.len()` bytes, returning how many were read. Zero
    /// means end of stream.
    fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(Error::NotSupported)
    }

    /// Writes up to `buf.len()` bytes, returning how many were written.
    fn write(&mut self, _buf: &[u8]) -> Result<usize> {
        Err(Error::NotSupported)
    }

    /// Moves the cursor and returns its new offset from the start. The
    /// result is clamped to the stream.
    fn seek(&mut self, _position: i64, _origin: SeekOrigin) -> Result<u64> {
        Err(Error::NotSupported)
    }

    /// The next byte, or `None` at end of stream.
    fn getc(&mut self) -> Result<Option<u8>> {
        let mut b = [0];
        match self.read(&mut b)? {
            0 => Ok(None),
            _ => Ok(Some(b[0])),
        }
    }

    fn putc(&mut self, value: u8) -> Result<()> {
        match self.write(&[value])? {
            0 => Err(Error::IoError),
            _ => Ok(()),
        }
    }

    /// Fills `buf` completely; running out of data is `InvalidFormat`, since
    /// it means the input was truncated.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut done = 0;
        while done < buf.len() {
            match self.read(&mut buf[done..])? {
                0 => return Err(Error::InvalidFormat),
                n => done += n,
            }
        }
        Ok(())
    }

    fn read_u16<B: ByteOrder>(&mut self) -> Result<u16>
    where
        Self: Sized,
    {
        let mut b = [0; 2];
        self.read_exact(&mut b)?;
        Ok(B::read_u16(&b))
    }

    fn read_u32<B: ByteOrder>(&mut self) -> Result<u32>
    where
        Self: Sized,
    {
        let mut b = [0; 4];
        self.read_exact(&mut b)?;
        Ok(B::read_u32(&b))
    }
}

/// Clamps a seek request against a stream of `len` bytes.
fn seek_in(len: usize, current: usize, position: i64, origin: SeekOrigin) -> usize {
    let base = match origin {
        SeekOrigin::Start => 0,
        SeekOrigin::Current => current as i64,
        SeekOrigin::End => len as i64,
    };
    let p = base.saturating_add(position);
    if p < 0 {
        0
    } else if p as u64 > len as u64 {
        len
    } else {
        p as usize
    }
}

/// Reads, writes and seeks within a caller's mutable buffer. Writes never
/// grow the buffer; they stop at its end.
#[derive(Debug)]
pub struct BufferStream<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufferStream<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        BufferStream { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn into_inner(self) -> &'a mut [u8] {
        self.buf
    }
}

impl<'a> Stream for BufferStream<'a> {
    fn caps(&self) -> StreamCaps {
        StreamCaps::all()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let src = &self.buf[self.pos..];
        let n = src.len().min(buf.len());
        buf[..n].copy_from_slice(&src[..n]);
        self.pos += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let dst = &mut self.buf[self.pos..];
        let n = dst.len().min(buf.len());
        dst[..n].copy_from_slice(&buf[..n]);
        self.pos += n;
        Ok(n)
    }

    fn seek(&mut self, position: i64, origin: SeekOrigin) -> Result<u64> {
        self.pos = seek_in(self.buf.len(), self.pos, position, origin);
        Ok(self.pos as u64)
    }
}

/// Reads and seeks within a read-only buffer.
#[derive(Copy, Clone, Debug)]
pub struct ConstBufferStream<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ConstBufferStream<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ConstBufferStream { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Stream for ConstBufferStream<'a> {
    fn caps(&self) -> StreamCaps {
        StreamCaps::READ | StreamCaps::SEEK
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let src = &self.buf[self.pos..];
        let n = src.len().min(buf.len());
        buf[..n].copy_from_slice(&src[..n]);
        self.pos += n;
        Ok(n)
    }

    fn seek(&mut self, position: i64, origin: SeekOrigin) -> Result<u64> {
        self.pos = seek_in(self.buf.len(), self.pos, position, origin);
        Ok(self.pos as u64)
    }
}

/// Adapts anything implementing `std::io::{Read, Write, Seek}`, such as a
/// `File` or a `Cursor<Vec<u8>>`.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoStream<T> {
    inner: T,
}

#[cfg(feature = "std")]
impl<T> IoStream<T> {
    pub fn new(inner: T) -> Self {
        IoStream { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<T: std::io::Read + std::io::Write + std::io::Seek> Stream for IoStream<T> {
    fn caps(&self) -> StreamCaps {
        StreamCaps::all()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.inner.read(buf)?)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        Ok(self.inner.write(buf)?)
    }

    fn seek(&mut self, position: i64, origin: SeekOrigin) -> Result<u64> {
        use std::io::SeekFrom;
        let from = match origin {
            SeekOrigin::Start => SeekFrom::Start(position.max(0) as u64),
            SeekOrigin::Current => SeekFrom::Current(position),
            SeekOrigin::End => SeekFrom::End(position),
        };
        Ok(self.inner.seek(from)?)
    }
}
