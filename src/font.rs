//! Bitmap fonts and text layout.
//!
//! A font hands out 1-bit glyph images: rows top to bottom, each row padded
//! to whole bytes, leftmost pixel in the most significant bit. Layout is done
//! by `layout`, which both `Font::measure_text` and `draw::text` use, so a
//! measured string always occupies exactly the space drawing it covers.

use core::convert::TryFrom;

use math::{SRect16, SSize16, Size16};
use smart_default::SmartDefault;

use crate::{Error, Result};

/// Options controlling how text is laid out and painted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct TextOptions {
    /// Tab stops fall every `tab_width` average glyph widths.
    #[default(4)]
    pub tab_width: u16,
    /// Leave the pixels behind glyphs alone instead of painting them with
    /// the background color.
    #[default(true)]
    pub transparent_background: bool,
}

/// One character's image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Glyph<'a> {
    pub width: u16,
    /// `height` rows of `(width + 7) / 8` bytes.
    pub data: &'a [u8],
}

impl<'a> Glyph<'a> {
    pub fn stride(&self) -> usize {
        (self.width as usize + 7) / 8
    }

    /// The bytes of row `y`; empty past the end of the data.
    pub fn row(&self, y: u16) -> &'a [u8] {
        let s = self.stride();
        let start = y as usize * s;
        self.data.get(start..start + s).unwrap_or(&[])
    }

    /// True if the pixel at `(x, y)` is set.
    pub fn bit(&self, x: u16, y: u16) -> bool {
        if x >= self.width {
            return false;
        }
        match self.row(y).get(x as usize / 8) {
            Some(b) => b & (0x80 >> (x % 8)) != 0,
            None => false,
        }
    }
}

pub trait Font {
    /// Line height in pixels; every glyph is this tall.
    fn height(&self) -> u16;

    /// Advance of `ch`, or zero if the font lacks it.
    fn width(&self, ch: char) -> u16;

    /// Width used to place tab stops.
    fn average_width(&self) -> u16;

    fn glyph(&self, ch: char) -> Option<Glyph<'_>>;

    /// Size of the area `text` covers when laid out inside a box of `max`.
    /// Text that doesn't fit below the box is dropped, as drawing drops it.
    fn measure_text(&self, max: SSize16, text: &str, options: &TextOptions) -> Result<SSize16> {
        if max.width <= 0 || max.height <= 0 {
            return Ok(SSize16::new(0, 0));
        }
        let area = SRect16::from_xyxy(0, 0, max.width - 1, max.height - 1);
        layout(self, &area, text, options, |_, _| Ok(()))
    }
}

impl<'f, T: Font + ?Sized> Font for &'f T {
    fn height(&self) -> u16 {
        (**self).height()
    }
    fn width(&self, ch: char) -> u16 {
        (**self).width(ch)
    }
    fn average_width(&self) -> u16 {
        (**self).average_width()
    }
    fn glyph(&self, ch: char) -> Option<Glyph<'_>> {
        (**self).glyph(ch)
    }
}

/// A fixed-cell font over a table of glyph images for a contiguous range of
/// characters, such as a ROM text font.
#[derive(Copy, Clone, Debug)]
pub struct FixedFont<'a> {
    first: u32,
    count: u32,
    cell: Size16,
    data: &'a [u8],
}

impl<'a> FixedFont<'a> {
    /// `data` holds `count` glyphs of `cell` size back to back, starting with
    /// the glyph for `first`.
    pub fn new(first: char, count: u32, cell: Size16, data: &'a [u8]) -> Result<Self> {
        if cell.is_empty() {
            return Err(Error::InvalidArgument);
        }
        let font = FixedFont {
            first: first as u32,
            count,
            cell,
            data,
        };
        if data.len() < font.glyph_bytes() * count as usize {
            return Err(Error::InvalidArgument);
        }
        Ok(font)
    }

    pub fn cell(&self) -> Size16 {
        self.cell
    }

    fn glyph_bytes(&self) -> usize {
        (self.cell.width as usize + 7) / 8 * self.cell.height as usize
    }

    fn slot(&self, ch: char) -> Option<usize> {
        let c = ch as u32;
        if c >= self.first && c - self.first < self.count {
            Some((c - self.first) as usize)
        } else {
            None
        }
    }
}

impl<'a> Font for FixedFont<'a> {
    fn height(&self) -> u16 {
        self.cell.height
    }

    fn width(&self, ch: char) -> u16 {
        self.slot(ch).map_or(0, |_| self.cell.width)
    }

    fn average_width(&self) -> u16 {
        self.cell.width
    }

    fn glyph(&self, ch: char) -> Option<Glyph<'_>> {
        let n = self.glyph_bytes();
        let start = self.slot(ch)? * n;
        Some(Glyph {
            width: self.cell.width,
            data: self.data.get(start..start + n)?,
        })
    }
}

/// Walks `text` through `area`, calling `place` with each glyph and the
/// cell it occupies. Returns the size of the area touched.
///
/// - `\r` returns to the left edge; `\n` also starts a new line.
/// - `\t` moves to the next tab stop, wrapping if that is past the right
///   edge.
/// - A glyph that would cross the right edge starts a new line, unless the
///   line is empty.
/// - Layout stops at the first line whose bottom is below the area.
///
/// Characters the font lacks are skipped.
pub(crate) fn layout<F, P>(
    font: &F,
    area: &SRect16,
    text: &str,
    options: &TextOptions,
    mut place: P,
) -> Result<SSize16>
where
    F: Font + ?Sized,
    P: FnMut(Glyph<'_>, SRect16) -> Result<()>,
{
    let area = area.normalize();
    let (left, right) = (area.left() as i32, area.right() as i32);
    let (top, bottom) = (area.top() as i32, area.bottom() as i32);
    let h = font.height() as i32;
    if text.is_empty() || h == 0 {
        return Ok(SSize16::new(0, 0));
    }

    let (mut x, mut y) = (left, top);
    let mut widest = 0;
    let fits = |y: i32| y + h - 1 <= bottom;

    if !fits(y) {
        return Ok(SSize16::new(0, 0));
    }

    for ch in text.chars() {
        match ch {
            '\r' => x = left,
            '\n' => {
                x = left;
                y += h;
            }
            '\t' => {
                let stop = (font.average_width() as i32 * options.tab_width as i32).max(1);
                x = left + ((x - left) / stop + 1) * stop;
                if x > right + 1 {
                    x = left;
                    y += h;
                }
            }
            _ => {
                let glyph = match font.glyph(ch) {
                    Some(g) => g,
                    None => continue,
                };
                let w = glyph.width as i32;
                if x + w - 1 > right && x != left {
                    x = left;
                    y += h;
                }
                if !fits(y) {
                    log::trace!("text stopped at {:?}: no room below", ch);
                    y -= h;
                    break;
                }
                let corners = (
                    i16::try_from(x),
                    i16::try_from(y),
                    i16::try_from(x + w - 1),
                    i16::try_from(y + h - 1),
                );
                let cell = match corners {
                    (Ok(x1), Ok(y1), Ok(x2), Ok(y2)) => SRect16::from_xyxy(x1, y1, x2, y2),
                    _ => {
                        log::trace!("text stopped at {:?}: cell leaves the coordinate range", ch);
                        break;
                    }
                };
                place(glyph, cell)?;
                x += w;
            }
        }
        widest = widest.max(x - left);
        if !fits(y) {
            log::trace!("text stopped: no room below line at {}", y);
            y -= h;
            break;
        }
    }

    Ok(SSize16::new(
        widest.min(i16::max_value() as i32) as i16,
        (y - top + h).min(i16::max_value() as i32) as i16,
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 4x2 cells for 'A'..='C': 'A' is a full block, 'B' the left column,
    /// 'C' is blank.
    pub(crate) static TINY: [u8; 6] = [0xF0, 0xF0, 0x80, 0x80, 0x00, 0x00];

    pub(crate) fn tiny() -> FixedFont<'static> {
        FixedFont::new('A', 3, Size16::new(4, 2), &TINY).unwrap()
    }

    fn cells(text: &str, area: SRect16) -> std::vec::Vec<SRect16> {
        let mut out = std::vec::Vec::new();
        layout(&tiny(), &area, text, &TextOptions::default(), |_, r| {
            out.push(r);
            Ok(())
        })
        .unwrap();
        out
    }

    #[test]
    fn defaults() {
        let o = TextOptions::default();
        assert_eq!(o.tab_width, 4);
        assert!(o.transparent_background);
    }

    #[test]
    fn table_size_is_checked() {
        assert!(FixedFont::new('A', 4, Size16::new(4, 2), &TINY).is_err());
        assert!(FixedFont::new('A', 1, Size16::new(0, 2), &TINY).is_err());
    }

    #[test]
    fn glyph_lookup() {
        let f = tiny();
        assert_eq!(f.width('A'), 4);
        assert_eq!(f.width('Z'), 0);
        assert!(f.glyph('@').is_none());
        let b = f.glyph('B').unwrap();
        assert!(b.bit(0, 0) && b.bit(0, 1));
        assert!(!b.bit(1, 0));
        assert!(!b.bit(7, 0));
    }

    #[test]
    fn wraps_at_right_edge() {
        // Room for two cells per line.
        let r = cells("AAA", SRect16::from_xyxy(10, 0, 17, 99));
        assert_eq!(
            r,
            [
                SRect16::from_xyxy(10, 0, 13, 1),
                SRect16::from_xyxy(14, 0, 17, 1),
                SRect16::from_xyxy(10, 2, 13, 3),
            ]
        );
    }

    #[test]
    fn control_characters() {
        let area = SRect16::from_xyxy(0, 0, 99, 99);
        let r = cells("A\tB\nC\rA", area);
        assert_eq!(r[0].left(), 0);
        // Stops every 16 pixels.
        assert_eq!(r[1].left(), 16);
        assert_eq!((r[2].left(), r[2].top()), (0, 2));
        assert_eq!((r[3].left(), r[3].top()), (0, 2));
    }

    #[test]
    fn stops_at_coordinate_limit() {
        let max = i16::max_value();
        let r = cells("AA", SRect16::from_xyxy(max - 7, 0, max, 9));
        assert_eq!(r, [SRect16::from_xyxy(max - 7, 0, max - 4, 1), SRect16::from_xyxy(max - 3, 0, max, 1)]);
        // Wider than the room left before the largest coordinate.
        assert!(cells("AA", SRect16::from_xyxy(max - 1, 0, max, 9)).is_empty());
    }

    #[test]
    fn stops_at_bottom() {
        let r = cells("A\nA\nA", SRect16::from_xyxy(0, 0, 9, 4));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn measure_agrees_with_layout() {
        let f = tiny();
        let o = TextOptions::default();
        assert_eq!(
            f.measure_text(SSize16::new(8, 100), "AAA", &o).unwrap(),
            SSize16::new(8, 4)
        );
        assert_eq!(
            f.measure_text(SSize16::new(100, 100), "AB\nA", &o).unwrap(),
            SSize16::new(8, 4)
        );
        assert_eq!(
            f.measure_text(SSize16::new(100, 100), "", &o).unwrap(),
            SSize16::new(0, 0)
        );
        // Only the first line fits.
        assert_eq!(
            f.measure_text(SSize16::new(100, 3), "A\nA", &o).unwrap(),
            SSize16::new(4, 2)
        );
    }
}
