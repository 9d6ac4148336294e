//! Text rendering on top of `font::layout`.

use math::{Point16, Rect16, SRect16};

use super::helpers::{Batch, Ink, Pen};
use super::rect::filled_rectangle;
use crate::font::{layout, Font, Glyph, TextOptions};
use crate::target::Destination;
use crate::Result;

/// Draws `text` inside `rect` with `fg`, painting the unset pixels of each
/// glyph cell with `bg` unless the background is transparent.
pub(crate) fn text<D, Fo>(
    dst: &mut D,
    fg: &Pen<D::Format>,
    bg: Ink<D::Format>,
    rect: &SRect16,
    text: &str,
    font: &Fo,
    options: &TextOptions,
) -> Result<()>
where
    D: Destination,
    Fo: Font + ?Sized,
{
    let area = match fg.area {
        Some(a) => a,
        None => return Ok(()),
    };
    let bg = if options.transparent_background {
        None
    } else {
        Some(fg.with_ink(bg))
    };
    // Whole cells go out as one batch when every pixel has a solid color.
    let batch_inks = match (fg.ink, bg.map(|p| p.ink)) {
        (Ink::Solid(f), Some(Ink::Solid(b))) if D::CAPS.batch => Some((f, b)),
        _ => None,
    };

    layout(font, rect, text, options, |glyph, cell| {
        if glyph.width == 0 || !cell.intersects(&area) {
            return Ok(());
        }
        match batch_inks {
            Some((f, b)) if area.contains_rect(&cell) => {
                let bounds = Rect16::from_xyxy(cell.x1 as u16, cell.y1 as u16, cell.x2 as u16, cell.y2 as u16);
                let mut batch = Batch::begin(dst, &bounds, fg.async_)?;
                for j in 0..glyph_rows(&cell) {
                    for i in 0..glyph.width {
                        let px = if glyph.bit(i, j) { f } else { b };
                        batch.write(Point16::new(bounds.x1 + i, bounds.y1 + j), px)?;
                    }
                }
                batch.commit()
            }
            _ => glyph_runs(dst, fg, bg.as_ref(), &glyph, &cell),
        }
    })?;
    Ok(())
}

fn glyph_rows(cell: &SRect16) -> u16 {
    cell.height() as u16
}

/// Paints a glyph as horizontal runs of set and unset pixels.
fn glyph_runs<D: Destination>(
    dst: &mut D,
    fg: &Pen<D::Format>,
    bg: Option<&Pen<D::Format>>,
    glyph: &Glyph<'_>,
    cell: &SRect16,
) -> Result<()> {
    for j in 0..glyph_rows(cell) {
        let y = cell.y1 + j as i16;
        let mut start = 0;
        while start < glyph.width {
            let set = glyph.bit(start, j);
            let mut end = start + 1;
            while end < glyph.width && glyph.bit(end, j) == set {
                end += 1;
            }
            let pen = if set { Some(fg) } else { bg };
            if let Some(pen) = pen {
                let run = SRect16::from_xyxy(cell.x1 + start as i16, y, cell.x1 + end as i16 - 1, y);
                filled_rectangle(dst, pen, &run)?;
            }
            start = end;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::draw;
    use crate::font::tests::tiny;
    use crate::font::TextOptions;
    use crate::pixel::{Gsc8, Index4, Pixel, Rgba8888};
    use crate::testing::{Batching, Op, Plain, Recorder};
    use crate::Error;
    use math::{Rect16, SRect16};

    fn gray(v: u8) -> Pixel<Gsc8> {
        Pixel::from_channels(&[v as u64])
    }

    #[test]
    fn glyphs_and_background() {
        let mut r = Recorder::<Gsc8, Plain>::new(10, 4);
        let area = SRect16::from_xyxy(0, 0, 9, 3);
        draw::text(&mut r, &area, "AB", &tiny(), gray(255), gray(0x80), &TextOptions::default(), None)
            .unwrap();
        assert_eq!(r.picture(), ["#####.....", "#####.....", "..........", ".........."]);

        let opaque = TextOptions {
            transparent_background: false,
            ..TextOptions::default()
        };
        let mut r = Recorder::<Gsc8, Plain>::new(10, 4);
        draw::text(&mut r, &area, "AB", &tiny(), gray(255), gray(0x80), &opaque, None).unwrap();
        assert_eq!(r.at(4, 0), 255);
        assert_eq!(r.at(5, 1), 0x80);
        assert_eq!(r.at(7, 1), 0x80);
        assert_eq!(r.at(8, 0), 0);
    }

    #[test]
    fn unused_background_is_not_resolved() {
        // An indexed destination with no palette can't take the red
        // background, but nothing asks it to unless the background shows.
        let clear = Pixel::<Rgba8888>::from_channels(&[0, 0, 0, 0]);
        let red = Pixel::<Rgba8888>::from_channels(&[255, 0, 0, 255]);
        let area = SRect16::from_xyxy(0, 0, 9, 3);
        let mut r = Recorder::<Index4, Plain>::new(10, 4);
        draw::text(&mut r, &area, "AB", &tiny(), clear, red, &TextOptions::default(), None).unwrap();
        assert!(r.ops.is_empty());

        let opaque = TextOptions {
            transparent_background: false,
            ..TextOptions::default()
        };
        let out = draw::text(&mut r, &area, "AB", &tiny(), clear, red, &opaque, None);
        assert_eq!(out, Err(Error::NoPalette));
    }

    #[test]
    fn wraps_and_tabs() {
        let mut r = Recorder::<Gsc8, Plain>::new(8, 4);
        let area = SRect16::from_xyxy(0, 0, 7, 3);
        draw::text(&mut r, &area, "AAA", &tiny(), gray(255), gray(0), &TextOptions::default(), None)
            .unwrap();
        assert_eq!(r.picture(), ["########", "########", "####....", "####...."]);

        // One tab stop is 4 * 4 pixels, past the right edge: next line.
        let mut r = Recorder::<Gsc8, Plain>::new(8, 4);
        draw::text(&mut r, &area, "\tB", &tiny(), gray(255), gray(0), &TextOptions::default(), None)
            .unwrap();
        assert_eq!(r.picture(), ["........", "........", "#.......", "#......."]);
    }

    #[test]
    fn solid_cells_are_batched() {
        let opaque = TextOptions {
            transparent_background: false,
            ..TextOptions::default()
        };
        let mut r = Recorder::<Gsc8, Batching>::new(10, 2);
        let area = SRect16::from_xyxy(0, 0, 9, 1);
        draw::text(&mut r, &area, "BA", &tiny(), gray(255), gray(0x80), &opaque, None).unwrap();
        assert_eq!(r.ops[0], Op::Begin(Rect16::from_xyxy(0, 0, 3, 1)));
        assert_eq!(r.ops.iter().filter(|op| **op == Op::Commit).count(), 2);
        assert_eq!(r.at(0, 0), 255);
        assert_eq!(r.at(1, 0), 0x80);
        assert_eq!(r.at(4, 1), 255);

        // A clipped cell falls back to runs.
        let mut r = Recorder::<Gsc8, Batching>::new(10, 2);
        let clip = SRect16::from_xyxy(0, 0, 5, 1);
        draw::text(&mut r, &area, "BA", &tiny(), gray(255), gray(0x80), &opaque, Some(&clip)).unwrap();
        assert_eq!(r.ops.iter().filter(|op| **op == Op::Commit).count(), 1);
        assert_eq!(r.at(5, 0), 255);
        assert_eq!(r.at(6, 0), 0);
    }
}
