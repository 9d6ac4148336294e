//! Pixels: packed channel values plus a compile-time format.
//!
//! A `Pixel<F>` is one unsigned integer holding every channel of the format
//! `F`, packed most-significant-first in declaration order into the smallest
//! native word that fits. Unused low bits of that word are padding.
//!
//! Formats are zero-sized marker types declared with `pixel_format!`, which
//! also checks the channel table at compile time.

mod channel;
pub mod color;
mod convert;
mod formats;

use core::fmt;
use core::marker::PhantomData;

pub use self::channel::{
    bit_depth, has, index_of, is_valid, mask, same_layout, shift_of, word_bits, Channel,
    ChannelName,
};
pub use self::formats::*;

use crate::{Error, Result};

/// A pixel format, identified by its channel table.
pub trait Format:
    Copy + Clone + fmt::Debug + Default + PartialEq + Eq + core::hash::Hash + 'static
{
    const CHANNELS: &'static [Channel];
}

/// Declares a pixel format marker type.
///
/// ```ignore
/// pixel_format! {
///     /// 4-bit grayscale.
///     pub struct Gsc4 [Channel::new(ChannelName::L, 4)];
/// }
/// ```
#[macro_export]
macro_rules! pixel_format {
    ($(#[$m:meta])* $vis:vis struct $name:ident [$($ch:expr),+ $(,)?];) => {
        $(#[$m])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::pixel::Format for $name {
            const CHANNELS: &'static [$crate::pixel::Channel] = &[$($ch),+];
        }

        const _: () = assert!(
            $crate::pixel::is_valid(<$name as $crate::pixel::Format>::CHANNELS),
            concat!("invalid channel table for ", stringify!($name)),
        );
    };
}

/// A single pixel of format `F`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pixel<F> {
    native: u64,
    _format: PhantomData<F>,
}

impl<F: Format> Pixel<F> {
    /// Sum of all channel depths.
    pub const BIT_DEPTH: u32 = bit_depth(F::CHANNELS);
    /// Width of the native word holding the pixel.
    pub const WORD_BITS: u32 = word_bits(Self::BIT_DEPTH);
    /// Bytes occupied in a packed buffer, for byte-aligned formats.
    pub const PACKED_SIZE: usize = ((Self::BIT_DEPTH + 7) / 8) as usize;
    pub const BYTE_ALIGNED: bool = Self::BIT_DEPTH % 8 == 0;
    /// Padding between the last channel and the bottom of the native word.
    pub const PAD_RIGHT_BITS: u32 = Self::WORD_BITS - Self::BIT_DEPTH;
    /// Bits of the native word that belong to channels.
    pub const MASK: u64 = mask(Self::BIT_DEPTH as u8) << Self::PAD_RIGHT_BITS;
    pub const HAS_ALPHA: bool = has(F::CHANNELS, ChannelName::A);
    pub const INDEXED: bool = has(F::CHANNELS, ChannelName::Index);

    /// Wraps a native word. Bits outside `MASK` are discarded.
    pub const fn from_native(native: u64) -> Self {
        Pixel {
            native: native & Self::MASK,
            _format: PhantomData,
        }
    }

    pub const fn native_value(&self) -> u64 {
        self.native
    }

    /// The pixel as it is stored: channel bits only, right-aligned.
    pub const fn packed_value(&self) -> u64 {
        self.native >> Self::PAD_RIGHT_BITS
    }

    pub const fn from_packed(packed: u64) -> Self {
        Self::from_native(packed << Self::PAD_RIGHT_BITS)
    }

    pub fn channels(&self) -> &'static [Channel] {
        F::CHANNELS
    }

    /// Integer value of channel `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not a channel of `F`.
    pub fn channel(&self, index: usize) -> u64 {
        let c = &F::CHANNELS[index];
        (self.native >> shift_of(F::CHANNELS, index)) & c.mask()
    }

    /// Sets channel `index`, clamping `value` into the channel's range.
    ///
    /// # Panics
    ///
    /// If `index` is not a channel of `F`.
    pub fn set_channel(&mut self, index: usize, value: u64) {
        let c = &F::CHANNELS[index];
        let shift = shift_of(F::CHANNELS, index);
        let m = c.mask() << shift;
        self.native = (self.native & !m) | ((c.clamp(value) << shift) & m);
    }

    pub fn channel_by_name(&self, name: ChannelName) -> Option<u64> {
        index_of(F::CHANNELS, name).map(|i| self.channel(i))
    }

    /// Sets the named channel; returns false if the format has no such
    /// channel.
    pub fn set_channel_by_name(&mut self, name: ChannelName, value: u64) -> bool {
        match index_of(F::CHANNELS, name) {
            Some(i) => {
                self.set_channel(i, value);
                true
            }
            None => false,
        }
    }

    /// Channel `index` normalized to `0.0..=1.0`.
    ///
    /// # Panics
    ///
    /// If `index` is not a channel of `F`.
    pub fn real(&self, index: usize) -> f64 {
        F::CHANNELS[index].to_real(self.channel(index))
    }

    /// # Panics
    ///
    /// If `index` is not a channel of `F`.
    pub fn set_real(&mut self, index: usize, value: f64) {
        let v = F::CHANNELS[index].from_real(value);
        self.set_channel(index, v);
    }

    pub fn real_by_name(&self, name: ChannelName) -> Option<f64> {
        index_of(F::CHANNELS, name).map(|i| self.real(i))
    }

    /// Builds a pixel from integer channel values in declaration order.
    /// Missing trailing values are left at zero (clamped to each channel's
    /// minimum); extra values are ignored.
    pub fn from_channels(values: &[u64]) -> Self {
        let mut px = Self::from_native(0);
        for i in 0..F::CHANNELS.len() {
            px.set_channel(i, values.get(i).cloned().unwrap_or(0));
        }
        px
    }

    /// Like `from_channels`, with normalized reals.
    pub fn from_reals(values: &[f64]) -> Self {
        let mut px = Self::from_native(0);
        for i in 0..F::CHANNELS.len() {
            px.set_real(i, values.get(i).cloned().unwrap_or(0.0));
        }
        px
    }

    /// An opaque color from normalized red, green and blue.
    pub fn rgb(r: f64, g: f64, b: f64) -> Result<Self> {
        Pixel::<Rgba8888>::from_reals(&[r, g, b, 1.0]).convert()
    }

    /// A color from normalized red, green, blue and alpha.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Result<Self> {
        Pixel::<Rgba8888>::from_reals(&[r, g, b, a]).convert()
    }

    /// Normalized alpha; formats without alpha are fully opaque.
    pub fn alpha(&self) -> f64 {
        self.real_by_name(ChannelName::A).unwrap_or(1.0)
    }

    /// True if the pixel carries alpha and is less than fully opaque.
    pub fn is_translucent(&self) -> bool {
        match index_of(F::CHANNELS, ChannelName::A) {
            Some(i) => self.channel(i) < F::CHANNELS[i].max,
            None => false,
        }
    }

    /// True if the pixel carries alpha and it is at its minimum.
    pub fn is_transparent(&self) -> bool {
        match index_of(F::CHANNELS, ChannelName::A) {
            Some(i) => self.channel(i) <= F::CHANNELS[i].min,
            None => false,
        }
    }

    /// Converts to another format.
    ///
    /// Fails with `NotSupported` if there is no rule between the two color
    /// models, directly or through 32-bit RGBA.
    pub fn convert<G: Format>(&self) -> Result<Pixel<G>> {
        match convert::convert(F::CHANNELS, self.native, G::CHANNELS) {
            Some(native) => Ok(Pixel::from_native(native)),
            None => {
                log::debug!(
                    "no conversion from {:?} to {:?}",
                    F::default(),
                    G::default()
                );
                Err(Error::NotSupported)
            }
        }
    }

    /// Converts to another format, producing a zero pixel on failure.
    pub fn convert_or_zero<G: Format>(&self) -> Pixel<G> {
        self.convert().unwrap_or_else(|_| Pixel::from_native(0))
    }

    /// Per-channel linear interpolation: `self * ratio + other * (1 - ratio)`
    /// in normalized units. `ratio` is clamped to `0.0..=1.0`.
    pub fn blend(&self, other: Pixel<F>, ratio: f64) -> Self {
        let ratio = clamp_unit(ratio);
        let mut out = *self;
        for (i, c) in F::CHANNELS.iter().enumerate() {
            if c.name == ChannelName::Nop {
                continue;
            }
            let v = self.real(i) * ratio + other.real(i) * (1.0 - ratio);
            out.set_real(i, v);
        }
        out
    }

    /// Squared distance between two pixels of the same format, summed over
    /// normalized channels.
    pub fn difference(&self, other: Pixel<F>) -> f64 {
        F::CHANNELS
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name != ChannelName::Nop)
            .map(|(i, _)| {
                let d = self.real(i) - other.real(i);
                d * d
            })
            .sum()
    }
}

impl<F: Format> fmt::Debug for Pixel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pixel<{:?}>(", F::default())?;
        for (i, c) in F::CHANNELS.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}={}", c.name, self.channel(i))?;
        }
        f.write_str(")")
    }
}

/// Source-over composite of `fg` onto `bg`.
///
/// If `fg` has no alpha it simply replaces `bg`. The result's alpha (when `G`
/// has one) is `a + bg_a * (1 - a)`.
pub fn composite<F: Format, G: Format>(fg: Pixel<F>, bg: Pixel<G>) -> Result<Pixel<G>> {
    let mut top: Pixel<G> = fg.convert()?;
    if !Pixel::<F>::HAS_ALPHA {
        return Ok(top);
    }
    let a = fg.alpha();
    let bg_a = bg.alpha();
    top = top.blend(bg, a);
    if let Some(i) = index_of(G::CHANNELS, ChannelName::A) {
        top.set_real(i, a + bg_a * (1.0 - a));
    }
    Ok(top)
}

pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v > 1.0 {
        1.0
    } else if v > 0.0 {
        v
    } else {
        0.0
    }
}
