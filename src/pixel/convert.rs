//! The color conversion engine.
//!
//! Conversions work on channel tables and native words rather than on typed
//! pixels, so one copy of this code serves every pair of formats. The caller
//! (`Pixel::convert`) provides the types.

use super::channel::{has, index_of, same_layout, shift_of, Channel, ChannelName};
use super::{Format, Rgba8888};

use ChannelName::*;

/// Color model of a channel table, decided by which channel names it has.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Model {
    Rgb,
    Gray,
    Yuv,
    YCbCr,
    /// Alpha only.
    Alpha,
    Other,
}

impl Model {
    pub(crate) fn of(channels: &[Channel]) -> Model {
        let n = channels.len();
        let alpha = has(channels, A);
        if n < 5 && has(channels, R) && has(channels, G) && has(channels, B) {
            Model::Rgb
        } else if has(channels, L) && (n == 1 || (n == 2 && alpha)) {
            Model::Gray
        } else if n < 5 && has(channels, Y) && has(channels, U) && has(channels, V) {
            Model::Yuv
        } else if n < 5 && has(channels, Y) && has(channels, Cb) && has(channels, Cr) {
            Model::YCbCr
        } else if n == 1 && alpha {
            Model::Alpha
        } else {
            Model::Other
        }
    }
}

/// Read/write access to the channels of one native word.
#[derive(Copy, Clone)]
struct Word<'a> {
    channels: &'a [Channel],
    native: u64,
}

impl<'a> Word<'a> {
    fn new(channels: &'a [Channel], native: u64) -> Self {
        Word { channels, native }
    }

    fn index(&self, name: ChannelName) -> Option<usize> {
        index_of(self.channels, name)
    }

    fn get(&self, i: usize) -> u64 {
        (self.native >> shift_of(self.channels, i)) & self.channels[i].mask()
    }

    fn set(&mut self, i: usize, value: u64) {
        let c = &self.channels[i];
        let shift = shift_of(self.channels, i);
        let m = c.mask() << shift;
        self.native = (self.native & !m) | ((c.clamp(value) << shift) & m);
    }

    /// Normalized value of the named channel; zero if absent.
    fn real(&self, name: ChannelName) -> f64 {
        match self.index(name) {
            Some(i) => self.channels[i].to_real(self.get(i)),
            None => 0.0,
        }
    }

    fn set_real(&mut self, name: ChannelName, r: f64) {
        if let Some(i) = self.index(name) {
            let v = self.channels[i].from_real(r);
            self.set(i, v);
        }
    }

    /// Copies channel `from` of `src` into channel `to` of this word,
    /// rescaling between bit depths.
    fn rescale_from(&mut self, to: ChannelName, src: &Word, from: ChannelName) {
        let (di, si) = match (self.index(to), src.index(from)) {
            (Some(d), Some(s)) => (d, s),
            _ => return,
        };
        let v = rescale(&src.channels[si], src.get(si), &self.channels[di]);
        self.set(di, v);
    }
}

/// Moves a value between channels of different depth.
///
/// Equal depths copy (with clamping); narrowing drops low bits; widening
/// scales through the normalized value and rounds.
pub(crate) fn rescale(src: &Channel, value: u64, dst: &Channel) -> u64 {
    if src.bit_depth == dst.bit_depth {
        dst.clamp(value)
    } else if src.bit_depth > dst.bit_depth {
        dst.clamp(value >> (src.bit_depth - dst.bit_depth))
    } else {
        dst.from_real(src.to_real(value))
    }
}

/// Converts `native` from the `src` table to the `dst` table.
///
/// Identical tables copy. Otherwise a direct rule between the two color
/// models is used if one exists, or the conversion is chained through 32-bit
/// RGBA. Returns `None` if neither works.
pub(crate) fn convert(src: &[Channel], native: u64, dst: &[Channel]) -> Option<u64> {
    if same_layout(src, dst) {
        return Some(native);
    }
    if let Some(v) = direct(src, native, dst) {
        return Some(v);
    }
    let pivot = Rgba8888::CHANNELS;
    if same_layout(src, pivot) || same_layout(dst, pivot) {
        return None;
    }
    log::trace!("chaining conversion through RGBA");
    let mid = direct(src, native, pivot)?;
    direct(pivot, mid, dst)
}

fn direct(src: &[Channel], native: u64, dst: &[Channel]) -> Option<u64> {
    let s = Word::new(src, native);
    let mut d = Word::new(dst, 0);
    // Start from each channel's minimum so ranged channels stay legal.
    for i in 0..dst.len() {
        d.set(i, 0);
    }

    match (Model::of(src), Model::of(dst)) {
        (Model::Rgb, Model::Rgb) => {
            d.rescale_from(R, &s, R);
            d.rescale_from(G, &s, G);
            d.rescale_from(B, &s, B);
        }
        (Model::Rgb, Model::Gray) => {
            let l = 0.299 * s.real(R) + 0.587 * s.real(G) + 0.114 * s.real(B);
            d.set_real(L, l);
        }
        (Model::Rgb, Model::Yuv) => {
            let (r, g, b) = (s.real(R) * 255.0, s.real(G) * 255.0, s.real(B) * 255.0);
            d.set_real(Y, (0.257 * r + 0.504 * g + 0.098 * b + 16.0) / 255.0);
            d.set_real(U, (-0.148 * r - 0.291 * g + 0.439 * b + 128.0) / 255.0);
            d.set_real(V, (0.439 * r - 0.368 * g - 0.071 * b + 128.0) / 255.0);
        }
        (Model::Rgb, Model::YCbCr) => {
            let (r, g, b) = (s.real(R) * 255.0, s.real(G) * 255.0, s.real(B) * 255.0);
            d.set_real(Y, (0.299 * r + 0.587 * g + 0.114 * b) / 255.0);
            d.set_real(Cb, (-0.168_736 * r - 0.331_264 * g + 0.5 * b + 128.0) / 255.0);
            d.set_real(Cr, (0.5 * r - 0.418_688 * g - 0.081_312 * b + 128.0) / 255.0);
        }
        (Model::Gray, Model::Gray) => d.rescale_from(L, &s, L),
        (Model::Gray, Model::Rgb) => {
            d.rescale_from(R, &s, L);
            d.rescale_from(G, &s, L);
            d.rescale_from(B, &s, L);
        }
        // Gray has no chroma to carry over: use the neutral value.
        (Model::Gray, Model::Yuv) => {
            d.rescale_from(Y, &s, L);
            d.set_real(U, NEUTRAL_CHROMA);
            d.set_real(V, NEUTRAL_CHROMA);
        }
        (Model::Gray, Model::YCbCr) => {
            d.rescale_from(Y, &s, L);
            d.set_real(Cb, NEUTRAL_CHROMA);
            d.set_real(Cr, NEUTRAL_CHROMA);
        }
        (Model::Yuv, Model::Yuv) => {
            d.rescale_from(Y, &s, Y);
            d.rescale_from(U, &s, U);
            d.rescale_from(V, &s, V);
        }
        (Model::Yuv, Model::Rgb) => {
            let y = s.real(Y) * 256.0 - 16.0;
            let u = s.real(U) * 256.0 - 128.0;
            let v = s.real(V) * 256.0 - 128.0;
            d.set_real(R, (1.164 * y + 1.596 * v) / 255.0);
            d.set_real(G, (1.164 * y - 0.392 * u - 0.813 * v) / 255.0);
            d.set_real(B, (1.164 * y + 2.017 * u) / 255.0);
        }
        (Model::Yuv, Model::Gray) => d.rescale_from(L, &s, Y),
        (Model::YCbCr, Model::YCbCr) => {
            d.rescale_from(Y, &s, Y);
            d.rescale_from(Cb, &s, Cb);
            d.rescale_from(Cr, &s, Cr);
        }
        (Model::YCbCr, Model::Rgb) => {
            let (r, g, b) = ycbcr_to_rgb(s.real(Y), s.real(Cb), s.real(Cr));
            d.set_real(R, r as f64 / 255.0);
            d.set_real(G, g as f64 / 255.0);
            d.set_real(B, b as f64 / 255.0);
        }
        (Model::YCbCr, Model::Gray) => d.rescale_from(L, &s, Y),
        // Alpha-only formats carry no color; the alpha pass below does all
        // the work.
        (Model::Alpha, Model::Rgb) | (Model::Alpha, Model::Gray) | (_, Model::Alpha) => {}
        _ => return None,
    }

    if d.index(A).is_some() {
        if s.index(A).is_some() {
            d.rescale_from(A, &s, A);
        } else if let Some(i) = d.index(A) {
            let max = dst[i].max;
            d.set(i, max);
        }
    }
    Some(d.native)
}

/// Chroma value meaning "no color" in U/V and Cb/Cr channels.
///
/// Gray sources convert to YUV and YCbCr with this chroma rather than zero.
/// Zero chroma is a saturated green-blue, so a gray would not convert back
/// to itself.
const NEUTRAL_CHROMA: f64 = 128.0 / 255.0;

/// Fixed-point scale for the YCbCr to RGB transform.
const CVACC: i64 = 1024;

/// BT.601 full-range YCbCr to 8-bit RGB, in integer arithmetic. Inputs are
/// normalized; chroma is centered on 128.
fn ycbcr_to_rgb(y: f64, cb: f64, cr: f64) -> (i64, i64, i64) {
    let to8 = |v: f64| (v * 255.0 + 0.5) as i64;
    let y = to8(y);
    let cb = to8(cb) - 128;
    let cr = to8(cr) - 128;
    let clamp8 = |v: i64| {
        if v < 0 {
            0
        } else if v > 255 {
            255
        } else {
            v
        }
    };
    let r = y + (1435 * cr) / CVACC;
    let g = y - (352 * cb + 731 * cr) / CVACC;
    let b = y + (1814 * cb) / CVACC;
    (clamp8(r), clamp8(g), clamp8(b))
}
