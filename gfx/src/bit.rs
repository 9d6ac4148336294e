//! Bit-granular access to packed byte buffers.
//!
//! Packed pixel formats don't respect byte boundaries: a 4-bit pixel may share
//! a byte with its neighbor, and a 12-bit pixel can straddle two or three
//! bytes. The routines in this module read, write, and shift arbitrary runs of
//! bits within a `[u8]` so that the storage layer doesn't have to care.
//!
//! Bits are numbered from the most significant bit of the first byte: bit
//! offset 0 is `0x80` in `buf[0]`, offset 7 is `0x01` in `buf[0]`, and offset
//! 8 is `0x80` in `buf[1]`. This is the order packed pixels use in memory, so a
//! value written with `put_bits` reads naturally left-to-right.
//!
//! None of these routines touch bits outside the range they are given, and
//! zero-length ranges are always a no-op.
//!
//! # Panics
//!
//! Every routine panics if the requested range extends past the end of the
//! buffer, the same way slice indexing would.

use core::cmp::min;

/// Number of bits moved per step by the shift routines. Anything up to 64
/// works; 32 keeps the intermediate values in a single register on 32-bit
/// targets.
const SHIFT_CHUNK_BITS: usize = 32;

/// Byte-order reversal for the unsigned integer widths used to hold packed
/// pixels.
pub trait Swap: Copy {
    fn swap(self) -> Self;
}

impl Swap for u8 {
    #[inline]
    fn swap(self) -> Self {
        self
    }
}

impl Swap for u16 {
    #[inline]
    fn swap(self) -> Self {
        self.swap_bytes()
    }
}

impl Swap for u32 {
    #[inline]
    fn swap(self) -> Self {
        self.swap_bytes()
    }
}

impl Swap for u64 {
    #[inline]
    fn swap(self) -> Self {
        self.swap_bytes()
    }
}

/// Reverses the byte order of `value`. A no-op for `u8`.
#[inline]
pub fn swap<T: Swap>(value: T) -> T {
    value.swap()
}

/// Mask selecting the bits of a byte at and after bit `offset` (0..8).
#[inline]
const fn left_mask(offset: usize) -> u8 {
    0xFF >> offset
}

/// Mask selecting the bits of a byte before bit `overhang` (0..8). An overhang
/// of zero means the range ends exactly on a byte boundary, so the whole byte
/// is selected.
#[inline]
const fn right_mask(overhang: usize) -> u8 {
    if overhang == 0 {
        0xFF
    } else {
        !(0xFF >> overhang)
    }
}

/// The bytes touched by a non-empty bit range, and the masks for the partial
/// bytes at either end.
struct Span {
    first: usize,
    last: usize,
    first_mask: u8,
    last_mask: u8,
}

impl Span {
    fn new(offset: usize, count: usize) -> Self {
        let end = offset + count;
        Span {
            first: offset / 8,
            last: (end - 1) / 8,
            first_mask: left_mask(offset % 8),
            last_mask: right_mask(end % 8),
        }
    }
}

/// Sets (`value == true`) or clears the `count` bits starting at bit `offset`.
///
/// The partial bytes at either end are masked; whole bytes in between are
/// filled directly.
pub fn set_bits(buf: &mut [u8], offset: usize, count: usize, value: bool) {
    if count == 0 {
        return;
    }
    let span = Span::new(offset, count);

    fn apply(b: &mut u8, mask: u8, value: bool) {
        if value {
            *b |= mask
        } else {
            *b &= !mask
        }
    }

    if span.first == span.last {
        apply(&mut buf[span.first], span.first_mask & span.last_mask, value);
        return;
    }
    apply(&mut buf[span.first], span.first_mask, value);
    apply(&mut buf[span.last], span.last_mask, value);
    let fill = if value { 0xFF } else { 0 };
    for b in &mut buf[span.first + 1..span.last] {
        *b = fill;
    }
}

/// Copies the `count` bits starting at bit `offset` of `src` into the same bit
/// positions of `dst`.
///
/// `src` and `dst` are addressed identically, so to move bits between
/// different alignments, shift them first (see `shift_left` and
/// `shift_right`).
pub fn copy_bits(dst: &mut [u8], src: &[u8], offset: usize, count: usize) {
    if count == 0 {
        return;
    }
    let span = Span::new(offset, count);

    fn blend(d: &mut u8, s: u8, mask: u8) {
        *d = (*d & !mask) | (s & mask);
    }

    if span.first == span.last {
        blend(
            &mut dst[span.first],
            src[span.first],
            span.first_mask & span.last_mask,
        );
        return;
    }
    blend(&mut dst[span.first], src[span.first], span.first_mask);
    blend(&mut dst[span.last], src[span.last], span.last_mask);
    dst[span.first + 1..span.last]
        .copy_from_slice(&src[span.first + 1..span.last]);
}

/// Reads `count` (at most 64) bits starting at bit `offset`, returning them
/// right-aligned in a `u64`. The first bit read ends up most significant.
pub fn get_bits(buf: &[u8], offset: usize, count: usize) -> u64 {
    assert!(count <= 64, "cannot read {} bits into a u64", count);
    let mut result = 0u64;
    let mut pos = offset;
    let mut remaining = count;
    while remaining > 0 {
        let bit = pos % 8;
        let n = min(8 - bit, remaining);
        let byte = u64::from(buf[pos / 8]);
        let chunk = (byte >> (8 - bit - n)) & ((1 << n) - 1);
        result = (result << n) | chunk;
        pos += n;
        remaining -= n;
    }
    result
}

/// Writes the low `count` (at most 64) bits of `value` starting at bit
/// `offset`, most significant first. Higher bits of `value` are ignored.
pub fn put_bits(buf: &mut [u8], offset: usize, count: usize, value: u64) {
    assert!(count <= 64, "cannot write {} bits from a u64", count);
    let mut pos = offset;
    let mut remaining = count;
    while remaining > 0 {
        let bit = pos % 8;
        let n = min(8 - bit, remaining);
        let chunk = ((value >> (remaining - n)) & ((1 << n) - 1)) as u8;
        let shift = 8 - bit - n;
        let mask = (((1u16 << n) - 1) as u8) << shift;
        let b = &mut buf[pos / 8];
        *b = (*b & !mask) | (chunk << shift);
        pos += n;
        remaining -= n;
    }
}

/// Shifts the `count`-bit range starting at `offset` left (toward lower bit
/// offsets) by `shift` bits, in place. Vacated bits at the end of the range
/// are cleared; bits outside the range are preserved.
///
/// Shifting by `count` or more clears the whole range.
pub fn shift_left(buf: &mut [u8], offset: usize, count: usize, shift: usize) {
    if count == 0 || shift == 0 {
        return;
    }
    if shift >= count {
        set_bits(buf, offset, count, false);
        return;
    }
    let keep = count - shift;
    // Walk forward: every read is ahead of every write so far.
    let mut i = 0;
    while i < keep {
        let n = min(SHIFT_CHUNK_BITS, keep - i);
        let v = get_bits(buf, offset + i + shift, n);
        put_bits(buf, offset + i, n, v);
        i += n;
    }
    set_bits(buf, offset + keep, shift, false);
}

/// Shifts the `count`-bit range starting at `offset` right (toward higher bit
/// offsets) by `shift` bits, in place. Vacated bits at the start of the range
/// are cleared; bits outside the range are preserved.
///
/// Shifting by `count` or more clears the whole range.
pub fn shift_right(buf: &mut [u8], offset: usize, count: usize, shift: usize) {
    if count == 0 || shift == 0 {
        return;
    }
    if shift >= count {
        set_bits(buf, offset, count, false);
        return;
    }
    let keep = count - shift;
    // Walk backward: every read is behind every write so far.
    let mut end = keep;
    while end > 0 {
        let n = min(SHIFT_CHUNK_BITS, end);
        let start = end - n;
        let v = get_bits(buf, offset + start, n);
        put_bits(buf, offset + start + shift, n, v);
        end = start;
    }
    set_bits(buf, offset, shift, false);
}

/// Fills the `count` bits starting at `offset` from a repeating byte pattern.
///
/// `pattern[0]` lines up with the byte holding bit `offset`, `pattern[1]`
/// with the byte after it, and so on, wrapping around the pattern. Pattern
/// bits that fall outside the range are not written.
pub fn fill_pattern(buf: &mut [u8], offset: usize, count: usize, pattern: &[u8]) {
    if count == 0 || pattern.is_empty() {
        return;
    }
    let span = Span::new(offset, count);
    for (k, b) in buf[span.first..=span.last].iter_mut().enumerate() {
        let mut mask = 0xFF;
        if k == 0 {
            mask &= span.first_mask;
        }
        if span.first + k == span.last {
            mask &= span.last_mask;
        }
        let p = pattern[k % pattern.len()];
        *b = (*b & !mask) | (p & mask);
    }
}

/// Bits moved per pass by `copy_bits_between`. The scratch window holds one
/// pass plus up to 7 bits of misalignment at each end.
const WINDOW_BITS: usize = 1024;

/// Copies `count` bits from bit `src_offset` of `src` to bit `dst_offset` of
/// `dst`, where the two offsets may have different alignment within a byte.
///
/// Bits are staged through a small scratch window on the stack, shifted into
/// the destination's alignment, and then blended in with `copy_bits`.
pub fn copy_bits_between(
    dst: &mut [u8],
    dst_offset: usize,
    src: &[u8],
    src_offset: usize,
    count: usize,
) {
    let mut window = [0u8; WINDOW_BITS / 8 + 1];
    let mut done = 0;
    while done < count {
        let n = min(WINDOW_BITS, count - done);
        let s = src_offset + done;
        let d = dst_offset + done;
        let (sp, dp) = (s % 8, d % 8);

        let bytes = (sp + n + 7) / 8;
        window[..bytes].copy_from_slice(&src[s / 8..s / 8 + bytes]);
        if sp > dp {
            shift_left(&mut window, dp, n + (sp - dp), sp - dp);
        } else if sp < dp {
            shift_right(&mut window, sp, n + (dp - sp), dp - sp);
        }
        let out_bytes = (dp + n + 7) / 8;
        copy_bits(&mut dst[d / 8..d / 8 + out_bytes], &window[..out_bytes], dp, n);
        done += n;
    }
}
