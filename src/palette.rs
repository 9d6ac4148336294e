//! Palettes map indexed pixels to real colors and back.
//!
//! Every target has a palette type. Non-indexed formats use `NoPalette`,
//! which is the identity mapping; indexed formats use a `TablePalette` over
//! storage the caller owns, or the computed `EgaPalette`.

use core::marker::PhantomData;

use crate::pixel::{composite, index_of, ChannelName, Format, Index4, Pixel, Rgb888};
use crate::{Error, Result};

/// Mapping between pixels of format `F` and pixels of a non-indexed format.
pub trait Palette<F: Format> {
    /// The format indices resolve to.
    type Mapped: Format;

    /// Number of entries; zero for identity palettes.
    fn size(&self) -> usize;

    fn writable(&self) -> bool {
        false
    }

    /// Resolves an indexed pixel to its color.
    fn map(&self, pixel: Pixel<F>) -> Result<Pixel<Self::Mapped>>;

    /// Replaces the color stored for an index.
    fn set_map(&mut self, _pixel: Pixel<F>, _mapped: Pixel<Self::Mapped>) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// The pixel whose color is closest to `mapped`.
    fn nearest(&self, mapped: Pixel<Self::Mapped>) -> Result<Pixel<F>>;
}

impl<'a, F: Format, P: Palette<F>> Palette<F> for &'a P {
    type Mapped = P::Mapped;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn map(&self, pixel: Pixel<F>) -> Result<Pixel<Self::Mapped>> {
        (**self).map(pixel)
    }

    fn nearest(&self, mapped: Pixel<Self::Mapped>) -> Result<Pixel<F>> {
        (**self).nearest(mapped)
    }
}

/// Identity palette for non-indexed formats.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NoPalette<F>(PhantomData<F>);

impl<F> NoPalette<F> {
    pub const fn new() -> Self {
        NoPalette(PhantomData)
    }
}

impl<F: Format> Palette<F> for NoPalette<F> {
    type Mapped = F;

    fn size(&self) -> usize {
        0
    }

    fn map(&self, pixel: Pixel<F>) -> Result<Pixel<F>> {
        Ok(pixel)
    }

    fn nearest(&self, mapped: Pixel<F>) -> Result<Pixel<F>> {
        Ok(mapped)
    }
}

/// Storage for palette entries.
///
/// Implemented for arrays and mutable slices, which make writable palettes,
/// and for shared slices, which make read-only ones.
pub trait Entries<M> {
    const WRITABLE: bool;

    fn entries(&self) -> &[Pixel<M>];

    fn entries_mut(&mut self) -> Option<&mut [Pixel<M>]> {
        None
    }
}

impl<M, const N: usize> Entries<M> for [Pixel<M>; N] {
    const WRITABLE: bool = true;

    fn entries(&self) -> &[Pixel<M>] {
        self
    }

    fn entries_mut(&mut self) -> Option<&mut [Pixel<M>]> {
        Some(self)
    }
}

impl<'a, M> Entries<M> for &'a [Pixel<M>] {
    const WRITABLE: bool = false;

    fn entries(&self) -> &[Pixel<M>] {
        self
    }
}

impl<'a, M> Entries<M> for &'a mut [Pixel<M>] {
    const WRITABLE: bool = true;

    fn entries(&self) -> &[Pixel<M>] {
        self
    }

    fn entries_mut(&mut self) -> Option<&mut [Pixel<M>]> {
        Some(self)
    }
}

#[cfg(feature = "alloc")]
impl<M> Entries<M> for alloc::vec::Vec<Pixel<M>> {
    const WRITABLE: bool = true;

    fn entries(&self) -> &[Pixel<M>] {
        self
    }

    fn entries_mut(&mut self) -> Option<&mut [Pixel<M>]> {
        Some(self)
    }
}

/// A lookup table with one entry per value of `F`'s index channel.
#[derive(Clone, Debug)]
pub struct TablePalette<F, M, B> {
    entries: B,
    _formats: PhantomData<(F, M)>,
}

impl<F: Format, M: Format, B: Entries<M>> TablePalette<F, M, B> {
    /// Wraps a table.
    ///
    /// Fails with `InvalidArgument` if `F` has no index channel, if `M` is
    /// itself indexed, or if the table doesn't have exactly one entry per
    /// index value.
    pub fn new(entries: B) -> Result<Self> {
        let slot = index_of(F::CHANNELS, ChannelName::Index).ok_or(Error::InvalidArgument)?;
        if Pixel::<M>::INDEXED {
            return Err(Error::InvalidArgument);
        }
        let c = &F::CHANNELS[slot];
        let expected = (c.max - c.min).saturating_add(1);
        if entries.entries().len() as u64 != expected {
            return Err(Error::InvalidArgument);
        }
        Ok(TablePalette {
            entries,
            _formats: PhantomData,
        })
    }

    pub fn entries(&self) -> &[Pixel<M>] {
        self.entries.entries()
    }

    pub fn into_inner(self) -> B {
        self.entries
    }

    fn slot(pixel: Pixel<F>) -> Result<usize> {
        let i = index_of(F::CHANNELS, ChannelName::Index).ok_or(Error::InvalidArgument)?;
        Ok((pixel.channel(i) - F::CHANNELS[i].min) as usize)
    }

    fn pixel_for(slot: usize) -> Pixel<F> {
        let mut px = Pixel::from_native(0);
        if let Some(i) = index_of(F::CHANNELS, ChannelName::Index) {
            px.set_channel(i, slot as u64 + F::CHANNELS[i].min);
        }
        px
    }
}

impl<F: Format, M: Format, B: Entries<M>> Palette<F> for TablePalette<F, M, B> {
    type Mapped = M;

    fn size(&self) -> usize {
        self.entries.entries().len()
    }

    fn writable(&self) -> bool {
        B::WRITABLE
    }

    fn map(&self, pixel: Pixel<F>) -> Result<Pixel<M>> {
        let slot = Self::slot(pixel)?;
        self.entries
            .entries()
            .get(slot)
            .cloned()
            .ok_or(Error::InvalidArgument)
    }

    fn set_map(&mut self, pixel: Pixel<F>, mapped: Pixel<M>) -> Result<()> {
        let slot = Self::slot(pixel)?;
        let entries = self.entries.entries_mut().ok_or(Error::NotSupported)?;
        let e = entries.get_mut(slot).ok_or(Error::InvalidArgument)?;
        *e = mapped;
        Ok(())
    }

    fn nearest(&self, mapped: Pixel<M>) -> Result<Pixel<F>> {
        let slot = nearest_slot(self.entries.entries().iter().cloned(), mapped)?;
        Ok(Self::pixel_for(slot))
    }
}

/// Linear scan for the entry closest to `target`.
///
/// Ties go to the lowest index; an exact match stops the scan.
fn nearest_slot<M: Format>(
    mut entries: impl Iterator<Item = Pixel<M>>,
    target: Pixel<M>,
) -> Result<usize> {
    let first = entries.next().ok_or(Error::InvalidArgument)?;
    let mut least = first.difference(target);
    let mut best = 0;
    if least == 0.0 {
        return Ok(best);
    }
    for (i, entry) in entries.enumerate() {
        let d = entry.difference(target);
        if d == 0.0 {
            return Ok(i + 1);
        }
        if d < least {
            least = d;
            best = i + 1;
        }
    }
    Ok(best)
}

/// The 16-color EGA palette, computed from the index bits.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EgaPalette<M = Rgb888>(PhantomData<M>);

impl<M> EgaPalette<M> {
    pub const fn new() -> Self {
        EgaPalette(PhantomData)
    }
}

fn ega_color(idx: u64) -> Pixel<Rgb888> {
    let red = 85 * (((idx >> 1) & 2) | ((idx >> 5) & 1));
    let green = 85 * ((idx & 2) | ((idx >> 4) & 1));
    let blue = 85 * (((idx << 1) & 2) | ((idx >> 3) & 1));
    Pixel::from_channels(&[red, green, blue])
}

impl<M: Format> Palette<Index4> for EgaPalette<M> {
    type Mapped = M;

    fn size(&self) -> usize {
        16
    }

    fn map(&self, pixel: Pixel<Index4>) -> Result<Pixel<M>> {
        ega_color(pixel.channel(0)).convert()
    }

    fn nearest(&self, mapped: Pixel<M>) -> Result<Pixel<Index4>> {
        let mut colors = [Pixel::<M>::from_native(0); 16];
        for (i, c) in colors.iter_mut().enumerate() {
            *c = ega_color(i as u64).convert()?;
        }
        let slot = nearest_slot(colors.iter().cloned(), mapped)?;
        Ok(Pixel::from_channels(&[slot as u64]))
    }
}

/// Resolves `pixel` to its palette's color space.
pub fn to_mapped<F: Format, P: Palette<F>>(
    pixel: Pixel<F>,
    palette: Option<&P>,
) -> Result<Pixel<P::Mapped>> {
    if Pixel::<F>::INDEXED {
        palette.ok_or(Error::NoPalette)?.map(pixel)
    } else {
        pixel.convert()
    }
}

/// The pixel of format `F` closest to `mapped`.
pub fn from_mapped<F: Format, P: Palette<F>>(
    mapped: Pixel<P::Mapped>,
    palette: Option<&P>,
) -> Result<Pixel<F>> {
    if Pixel::<F>::INDEXED {
        palette.ok_or(Error::NoPalette)?.nearest(mapped)
    } else {
        mapped.convert()
    }
}

/// Converts a pixel between two possibly indexed formats.
///
/// Indexed sources are resolved through `src_palette` and indexed
/// destinations through `dst_palette`; either one missing when needed is
/// `NoPalette`. If `background` is given and the source carries alpha, the
/// color is composited onto it.
pub fn convert_between<S, SP, D, DP>(
    pixel: Pixel<S>,
    src_palette: Option<&SP>,
    dst_palette: Option<&DP>,
    background: Option<Pixel<D>>,
) -> Result<Pixel<D>>
where
    S: Format,
    D: Format,
    SP: Palette<S>,
    DP: Palette<D>,
{
    if Pixel::<S>::INDEXED {
        let mapped = src_palette.ok_or(Error::NoPalette)?.map(pixel)?;
        return convert_between::<SP::Mapped, NoPalette<SP::Mapped>, D, DP>(
            mapped,
            None,
            dst_palette,
            background,
        );
    }
    if Pixel::<D>::INDEXED {
        let pal = dst_palette.ok_or(Error::NoPalette)?;
        let background = match background {
            Some(b) => Some(pal.map(b)?),
            None => None,
        };
        let color = over::<S, DP::Mapped>(pixel, background)?;
        return pal.nearest(color);
    }
    over(pixel, background)
}

fn over<S: Format, D: Format>(pixel: Pixel<S>, background: Option<Pixel<D>>) -> Result<Pixel<D>> {
    match background {
        Some(bg) if Pixel::<S>::HAS_ALPHA => composite(pixel, bg),
        _ => pixel.convert(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{Gsc8, Index2, Rgba8888};

    fn gray_ramp() -> [Pixel<Gsc8>; 4] {
        [
            Pixel::from_channels(&[0]),
            Pixel::from_channels(&[85]),
            Pixel::from_channels(&[170]),
            Pixel::from_channels(&[255]),
        ]
    }

    #[test]
    fn table_size_is_checked() {
        let short = [Pixel::<Gsc8>::from_native(0); 3];
        assert_eq!(
            TablePalette::<Index2, Gsc8, _>::new(short).err(),
            Some(Error::InvalidArgument)
        );
        assert!(TablePalette::<Gsc8, Gsc8, _>::new([Pixel::<Gsc8>::from_native(0); 256]).is_err());
    }

    #[test]
    fn map_and_set_map() {
        let mut pal = TablePalette::<Index2, Gsc8, _>::new(gray_ramp()).unwrap();
        let two = Pixel::<Index2>::from_channels(&[2]);
        assert_eq!(pal.map(two).unwrap().channel(0), 170);
        assert!(pal.writable());
        pal.set_map(two, Pixel::from_channels(&[9])).unwrap();
        assert_eq!(pal.map(two).unwrap().channel(0), 9);

        let ramp = gray_ramp();
        let mut ro = TablePalette::<Index2, Gsc8, &[Pixel<Gsc8>]>::new(&ramp[..]).unwrap();
        assert!(!ro.writable());
        assert_eq!(ro.set_map(two, Pixel::from_native(0)), Err(Error::NotSupported));
    }

    #[test]
    fn nearest_ties_favor_lowest_index() {
        let entries = [
            Pixel::<Gsc8>::from_channels(&[10]),
            Pixel::from_channels(&[30]),
            Pixel::from_channels(&[30]),
            Pixel::from_channels(&[200]),
        ];
        let pal = TablePalette::<Index2, Gsc8, _>::new(entries).unwrap();
        // Entries 1 and 2 are equally close: the first one wins.
        assert_eq!(pal.nearest(Pixel::from_channels(&[29])).unwrap().channel(0), 1);
        assert_eq!(pal.nearest(Pixel::from_channels(&[5])).unwrap().channel(0), 0);
        // Exact duplicates resolve to the first copy.
        assert_eq!(pal.nearest(Pixel::from_channels(&[30])).unwrap().channel(0), 1);
        assert_eq!(pal.nearest(Pixel::from_channels(&[250])).unwrap().channel(0), 3);
    }

    #[test]
    fn ega_colors() {
        let pal = EgaPalette::<Rgb888>::new();
        let c = |i| pal.map(Pixel::from_channels(&[i])).unwrap();
        assert_eq!(c(0), Pixel::from_channels(&[0, 0, 0]));
        assert_eq!(c(4), Pixel::from_channels(&[170, 0, 0]));
        assert_eq!(c(2), Pixel::from_channels(&[0, 170, 0]));
        assert_eq!(c(1), Pixel::from_channels(&[0, 0, 170]));
        assert_eq!(c(15), Pixel::from_channels(&[170, 170, 255]));
        for i in 0..16 {
            assert_eq!(pal.nearest(c(i)).unwrap().channel(0), i);
        }
    }

    #[test]
    fn conversion_through_palettes() {
        let pal = TablePalette::<Index2, Gsc8, _>::new(gray_ramp()).unwrap();
        let idx = Pixel::<Index2>::from_channels(&[3]);
        let rgb: Pixel<Rgb888> =
            convert_between::<_, _, _, NoPalette<Rgb888>>(idx, Some(&pal), None, None).unwrap();
        assert_eq!(rgb, Pixel::from_channels(&[255, 255, 255]));

        let back: Pixel<Index2> =
            convert_between::<_, NoPalette<Rgb888>, _, _>(rgb, None, Some(&pal), None).unwrap();
        assert_eq!(back, idx);

        let missing = convert_between::<_, NoPalette<Rgb888>, Index2, TablePalette<Index2, Gsc8, [Pixel<Gsc8>; 4]>>(
            rgb, None, None, None,
        );
        assert_eq!(missing, Err(Error::NoPalette));
    }

    #[test]
    fn background_composite_into_indexed() {
        let pal = TablePalette::<Index2, Gsc8, _>::new(gray_ramp()).unwrap();
        let clear = Pixel::<Rgba8888>::from_channels(&[255, 255, 255, 0]);
        let bg = Pixel::<Index2>::from_channels(&[1]);
        let out = convert_between::<_, NoPalette<Rgba8888>, _, _>(clear, None, Some(&pal), Some(bg))
            .unwrap();
        assert_eq!(out, bg);
    }
}
