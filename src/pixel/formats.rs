//! Predefined pixel formats.

use super::channel::{Channel, ChannelName::*};

crate::pixel_format! {
    /// 16-bit color common on small TFT panels.
    pub struct Rgb565 [Channel::new(R, 5), Channel::new(G, 6), Channel::new(B, 5)];
}
crate::pixel_format! {
    pub struct Rgb888 [Channel::new(R, 8), Channel::new(G, 8), Channel::new(B, 8)];
}
crate::pixel_format! {
    /// 32-bit RGBA. Conversions without a direct rule pass through this
    /// format.
    pub struct Rgba8888 [
        Channel::new(R, 8),
        Channel::new(G, 8),
        Channel::new(B, 8),
        Channel::new(A, 8),
    ];
}
crate::pixel_format! {
    /// 18-bit color, as used by several LCD controllers.
    pub struct Rgb666 [Channel::new(R, 6), Channel::new(G, 6), Channel::new(B, 6)];
}
crate::pixel_format! {
    pub struct Rgb332 [Channel::new(R, 3), Channel::new(G, 3), Channel::new(B, 2)];
}
crate::pixel_format! {
    /// Monochrome.
    pub struct Gsc1 [Channel::new(L, 1)];
}
crate::pixel_format! {
    pub struct Gsc2 [Channel::new(L, 2)];
}
crate::pixel_format! {
    pub struct Gsc4 [Channel::new(L, 4)];
}
crate::pixel_format! {
    pub struct Gsc8 [Channel::new(L, 8)];
}
crate::pixel_format! {
    /// Coverage only, for masks.
    pub struct Alpha8 [Channel::new(A, 8)];
}
crate::pixel_format! {
    pub struct Yuv888 [Channel::new(Y, 8), Channel::new(U, 8), Channel::new(V, 8)];
}
crate::pixel_format! {
    pub struct Yuva8888 [
        Channel::new(Y, 8),
        Channel::new(U, 8),
        Channel::new(V, 8),
        Channel::new(A, 8),
    ];
}
crate::pixel_format! {
    /// JPEG-style full-range YCbCr.
    pub struct YCbCr888 [Channel::new(Y, 8), Channel::new(Cb, 8), Channel::new(Cr, 8)];
}
crate::pixel_format! {
    pub struct YCbCra8888 [
        Channel::new(Y, 8),
        Channel::new(Cb, 8),
        Channel::new(Cr, 8),
        Channel::new(A, 8),
    ];
}
crate::pixel_format! {
    /// Palette index, 2 colors.
    pub struct Index1 [Channel::new(Index, 1)];
}
crate::pixel_format! {
    pub struct Index2 [Channel::new(Index, 2)];
}
crate::pixel_format! {
    /// Palette index, 16 colors. Pairs with `EgaPalette`.
    pub struct Index4 [Channel::new(Index, 4)];
}
crate::pixel_format! {
    pub struct Index8 [Channel::new(Index, 8)];
}
