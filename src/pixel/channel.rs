//! Channel descriptors and the const layout arithmetic over channel tables.
//!
//! A pixel format is just a `&'static [Channel]`. Everything about how a
//! pixel is packed (total depth, word size, where each channel lives) is
//! derived from the table by the `const fn`s here, so formats can be checked
//! at compile time by `pixel_format!`.

/// What a channel means.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ChannelName {
    R,
    G,
    B,
    A,
    H,
    S,
    U,
    V,
    Y,
    L,
    Cb,
    Cr,
    Index,
    /// Padding. Never read by conversions.
    Nop,
}

/// One channel of a pixel format.
///
/// Values are integers in `min..=max`; `scale` is the denominator used when a
/// value is viewed as a real number, so `value / scale` is the normalized
/// intensity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Channel {
    pub name: ChannelName,
    pub bit_depth: u8,
    pub min: u64,
    pub max: u64,
    pub scale: u64,
}

impl Channel {
    /// A channel using its full bit range.
    pub const fn new(name: ChannelName, bit_depth: u8) -> Self {
        let m = mask(bit_depth);
        Channel {
            name,
            bit_depth,
            min: 0,
            max: m,
            scale: m,
        }
    }

    /// A channel limited to `min..=max`, normalized against `max`.
    pub const fn with_range(name: ChannelName, bit_depth: u8, min: u64, max: u64) -> Self {
        Channel {
            name,
            bit_depth,
            min,
            max,
            scale: max,
        }
    }

    pub const fn mask(&self) -> u64 {
        mask(self.bit_depth)
    }

    /// Clamps `value` into this channel's range.
    pub fn clamp(&self, value: u64) -> u64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// `value` as a real number in `0.0..=1.0`.
    pub fn to_real(&self, value: u64) -> f64 {
        if self.scale == 0 {
            return 0.0;
        }
        value as f64 / self.scale as f64
    }

    /// Nearest integer value for the normalized real `r`, clamped.
    pub fn from_real(&self, r: f64) -> u64 {
        let v = r * self.scale as f64 + 0.5;
        if !(v > 0.0) {
            // Catches negatives and NaN.
            return self.min;
        }
        if v >= self.max as f64 {
            return self.max;
        }
        self.clamp(v as u64)
    }
}

/// Low `bits` bits set.
pub const fn mask(bits: u8) -> u64 {
    if bits >= 64 {
        !0
    } else {
        (1u64 << bits) - 1
    }
}

/// Total packed depth of a table, padding channels included.
pub const fn bit_depth(channels: &[Channel]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < channels.len() {
        total += channels[i].bit_depth as u32;
        i += 1;
    }
    total
}

/// Smallest native word (8, 16, 32 or 64 bits) that holds `depth` bits.
pub const fn word_bits(depth: u32) -> u32 {
    if depth <= 8 {
        8
    } else if depth <= 16 {
        16
    } else if depth <= 32 {
        32
    } else {
        64
    }
}

/// Index of the first channel called `name`, if any.
pub const fn index_of(channels: &[Channel], name: ChannelName) -> Option<usize> {
    let mut i = 0;
    while i < channels.len() {
        if channels[i].name as u8 == name as u8 {
            return Some(i);
        }
        i += 1;
    }
    None
}

pub const fn has(channels: &[Channel], name: ChannelName) -> bool {
    index_of(channels, name).is_some()
}

/// Bit position of the least significant bit of channel `index` within the
/// pixel's native word. Channels are packed from the top of the word down.
pub const fn shift_of(channels: &[Channel], index: usize) -> u32 {
    let mut used = 0;
    let mut i = 0;
    while i <= index {
        used += channels[i].bit_depth as u32;
        i += 1;
    }
    word_bits(bit_depth(channels)) - used
}

/// Whether a table describes a representable pixel: at least one channel,
/// every channel `1..=64` bits with a sane range and nonzero scale, and no
/// more than 64 bits in total.
pub const fn is_valid(channels: &[Channel]) -> bool {
    if channels.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < channels.len() {
        let c = &channels[i];
        if c.bit_depth == 0 || c.bit_depth > 64 {
            return false;
        }
        if c.name as u8 != ChannelName::Nop as u8 {
            if c.min > c.max || c.max > mask(c.bit_depth) || c.scale == 0 {
                return false;
            }
        }
        i += 1;
    }
    bit_depth(channels) <= 64
}

/// Compares two tables channel by channel.
pub const fn same_layout(a: &[Channel], b: &[Channel]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        let (x, y) = (&a[i], &b[i]);
        if x.name as u8 != y.name as u8
            || x.bit_depth != y.bit_depth
            || x.min != y.min
            || x.max != y.max
            || x.scale != y.scale
        {
            return false;
        }
        i += 1;
    }
    true
}
