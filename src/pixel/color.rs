//! The X11 named colors.
//!
//! Colors are stored as 8-bit RGB and converted to any format on demand:
//!
//! ```ignore
//! let px: Pixel<Rgb565> = color::named(color::CORNFLOWER_BLUE)?;
//! ```

use super::{Format, Pixel, Rgb888};
use crate::Result;

/// An opaque RGB color with 8 bits per channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NamedColor(pub u8, pub u8, pub u8);

impl NamedColor {
    pub fn to_pixel(self) -> Pixel<Rgb888> {
        Pixel::from_channels(&[self.0 as u64, self.1 as u64, self.2 as u64])
    }
}

/// `color` in format `F`.
pub fn named<F: Format>(color: NamedColor) -> Result<Pixel<F>> {
    color.to_pixel().convert()
}

pub const ALICE_BLUE: NamedColor = NamedColor(240, 248, 255);
pub const ANTIQUE_WHITE: NamedColor = NamedColor(250, 235, 215);
pub const AQUA: NamedColor = NamedColor(0, 255, 255);
pub const AQUAMARINE: NamedColor = NamedColor(127, 255, 212);
pub const AZURE: NamedColor = NamedColor(240, 255, 255);
pub const BEIGE: NamedColor = NamedColor(245, 245, 220);
pub const BISQUE: NamedColor = NamedColor(255, 228, 196);
pub const BLACK: NamedColor = NamedColor(0, 0, 0);
pub const BLANCHED_ALMOND: NamedColor = NamedColor(255, 235, 205);
pub const BLUE: NamedColor = NamedColor(0, 0, 255);
pub const BLUE_VIOLET: NamedColor = NamedColor(138, 43, 226);
pub const BROWN: NamedColor = NamedColor(165, 42, 42);
pub const BURLY_WOOD: NamedColor = NamedColor(222, 184, 135);
pub const CADET_BLUE: NamedColor = NamedColor(95, 158, 160);
pub const CHARTREUSE: NamedColor = NamedColor(127, 255, 0);
pub const CHOCOLATE: NamedColor = NamedColor(210, 105, 30);
pub const CORAL: NamedColor = NamedColor(255, 127, 80);
pub const CORNFLOWER_BLUE: NamedColor = NamedColor(100, 149, 237);
pub const CORNSILK: NamedColor = NamedColor(255, 248, 220);
pub const CRIMSON: NamedColor = NamedColor(220, 20, 60);
pub const CYAN: NamedColor = NamedColor(0, 255, 255);
pub const DARK_BLUE: NamedColor = NamedColor(0, 0, 139);
pub const DARK_CYAN: NamedColor = NamedColor(0, 139, 139);
pub const DARK_GOLDENROD: NamedColor = NamedColor(184, 134, 11);
pub const DARK_GRAY: NamedColor = NamedColor(169, 169, 169);
pub const DARK_GREEN: NamedColor = NamedColor(0, 100, 0);
pub const DARK_KHAKI: NamedColor = NamedColor(189, 183, 107);
pub const DARK_MAGENTA: NamedColor = NamedColor(139, 0, 139);
pub const DARK_OLIVE_GREEN: NamedColor = NamedColor(85, 107, 47);
pub const DARK_ORANGE: NamedColor = NamedColor(255, 140, 0);
pub const DARK_ORCHID: NamedColor = NamedColor(153, 50, 204);
pub const DARK_RED: NamedColor = NamedColor(139, 0, 0);
pub const DARK_SALMON: NamedColor = NamedColor(233, 150, 122);
pub const DARK_SEA_GREEN: NamedColor = NamedColor(143, 188, 139);
pub const DARK_STEEL_BLUE: NamedColor = NamedColor(72, 61, 139);
pub const DARK_SLATE_GRAY: NamedColor = NamedColor(47, 79, 79);
pub const DARK_TURQUOISE: NamedColor = NamedColor(0, 206, 209);
pub const DARK_VIOLET: NamedColor = NamedColor(148, 0, 211);
pub const DEEP_PINK: NamedColor = NamedColor(255, 20, 147);
pub const DEEP_SKY_BLUE: NamedColor = NamedColor(0, 191, 255);
pub const DIM_GRAY: NamedColor = NamedColor(105, 105, 105);
pub const DODGER_BLUE: NamedColor = NamedColor(30, 144, 255);
pub const FIREBRICK: NamedColor = NamedColor(178, 34, 34);
pub const FLORAL_WHITE: NamedColor = NamedColor(255, 250, 240);
pub const FOREST_GREEN: NamedColor = NamedColor(34, 139, 34);
pub const FUCHSIA: NamedColor = NamedColor(255, 0, 255);
pub const GAINSBORO: NamedColor = NamedColor(220, 220, 220);
pub const GHOST_WHITE: NamedColor = NamedColor(248, 248, 255);
pub const GOLD: NamedColor = NamedColor(255, 215, 0);
pub const GOLDENROD: NamedColor = NamedColor(218, 165, 32);
pub const GRAY: NamedColor = NamedColor(128, 128, 128);
pub const GREEN: NamedColor = NamedColor(0, 128, 0);
pub const GREEN_YELLOW: NamedColor = NamedColor(173, 255, 47);
pub const HONEYDEW: NamedColor = NamedColor(240, 255, 240);
pub const HOT_PINK: NamedColor = NamedColor(255, 105, 180);
pub const INDIAN_RED: NamedColor = NamedColor(205, 92, 92);
pub const INDIGO: NamedColor = NamedColor(75, 0, 130);
pub const IVORY: NamedColor = NamedColor(255, 255, 240);
pub const KHAKI: NamedColor = NamedColor(240, 230, 140);
pub const LAVENDER: NamedColor = NamedColor(230, 230, 250);
pub const LAVENDER_BLUSH: NamedColor = NamedColor(255, 240, 245);
pub const LAWN_GREEN: NamedColor = NamedColor(124, 252, 0);
pub const LEMON_CHIFFON: NamedColor = NamedColor(255, 250, 205);
pub const LIGHT_BLUE: NamedColor = NamedColor(173, 216, 230);
pub const LIGHT_CORAL: NamedColor = NamedColor(240, 128, 128);
pub const LIGHT_CYAN: NamedColor = NamedColor(224, 255, 255);
pub const LIGHT_GOLDENROD_YELLOW: NamedColor = NamedColor(250, 250, 210);
pub const LIGHT_GREEN: NamedColor = NamedColor(144, 238, 144);
pub const LIGHT_GRAY: NamedColor = NamedColor(211, 211, 211);
pub const LIGHT_PINK: NamedColor = NamedColor(255, 182, 193);
pub const LIGHT_SALMON: NamedColor = NamedColor(255, 160, 122);
pub const LIGHT_SEA_GREEN: NamedColor = NamedColor(32, 178, 170);
pub const LIGHT_SKY_BLUE: NamedColor = NamedColor(135, 206, 250);
pub const LIGHT_SLATE_GRAY: NamedColor = NamedColor(119, 136, 153);
pub const LIGHT_STEEL_BLUE: NamedColor = NamedColor(176, 196, 222);
pub const LIGHT_YELLOW: NamedColor = NamedColor(255, 255, 224);
pub const LIME: NamedColor = NamedColor(0, 255, 0);
pub const LIME_GREEN: NamedColor = NamedColor(50, 205, 50);
pub const LINEN: NamedColor = NamedColor(250, 240, 230);
pub const MAGENTA: NamedColor = NamedColor(255, 0, 255);
pub const MAROON: NamedColor = NamedColor(128, 0, 0);
pub const MEDIUM_AQUAMARINE: NamedColor = NamedColor(102, 205, 170);
pub const MEDIUM_BLUE: NamedColor = NamedColor(0, 0, 205);
pub const MEDIUM_ORCHID: NamedColor = NamedColor(186, 85, 211);
pub const MEDIUM_PURPLE: NamedColor = NamedColor(147, 112, 219);
pub const MEDIUM_SEA_GREEN: NamedColor = NamedColor(60, 179, 113);
pub const MEDIUM_STEEL_BLUE: NamedColor = NamedColor(123, 104, 238);
pub const MEDIUM_SPRING_GREEN: NamedColor = NamedColor(0, 250, 154);
pub const MEDIUM_TURQUOISE: NamedColor = NamedColor(72, 209, 204);
pub const MEDIUM_VIOLET_RED: NamedColor = NamedColor(199, 21, 133);
pub const MIDNIGHT_BLUE: NamedColor = NamedColor(25, 25, 112);
pub const MINT_CREAM: NamedColor = NamedColor(245, 255, 250);
pub const MISTY_ROSE: NamedColor = NamedColor(255, 228, 225);
pub const MOCCASIN: NamedColor = NamedColor(255, 228, 181);
pub const NAVAJO_WHITE: NamedColor = NamedColor(255, 222, 173);
pub const NAVY: NamedColor = NamedColor(0, 0, 128);
pub const OLD_LACE: NamedColor = NamedColor(253, 245, 230);
pub const OLIVE: NamedColor = NamedColor(128, 128, 0);
pub const OLIVE_DRAB: NamedColor = NamedColor(107, 142, 35);
pub const ORANGE: NamedColor = NamedColor(255, 165, 0);
pub const ORANGE_RED: NamedColor = NamedColor(255, 69, 0);
pub const ORCHID: NamedColor = NamedColor(218, 112, 214);
pub const PALE_GOLDENROD: NamedColor = NamedColor(238, 232, 170);
pub const PALE_GREEN: NamedColor = NamedColor(152, 251, 152);
pub const PALE_TURQUOISE: NamedColor = NamedColor(175, 238, 238);
pub const PALE_VIOLET_RED: NamedColor = NamedColor(219, 112, 147);
pub const PAPAYA_WHIP: NamedColor = NamedColor(255, 239, 213);
pub const PEACH_PUFF: NamedColor = NamedColor(255, 218, 185);
pub const PERU: NamedColor = NamedColor(205, 133, 63);
pub const PINK: NamedColor = NamedColor(255, 192, 203);
pub const PLUM: NamedColor = NamedColor(221, 160, 221);
pub const POWDER_BLUE: NamedColor = NamedColor(176, 224, 230);
pub const PURPLE: NamedColor = NamedColor(128, 0, 128);
pub const RED: NamedColor = NamedColor(255, 0, 0);
pub const ROSY_BROWN: NamedColor = NamedColor(188, 143, 143);
pub const ROYAL_BLUE: NamedColor = NamedColor(65, 105, 225);
pub const SADDLE_BROWN: NamedColor = NamedColor(139, 69, 19);
pub const SALMON: NamedColor = NamedColor(250, 128, 114);
pub const SANDY_BROWN: NamedColor = NamedColor(244, 164, 96);
pub const SEA_GREEN: NamedColor = NamedColor(46, 139, 87);
pub const SEA_SHELL: NamedColor = NamedColor(255, 245, 238);
pub const SIENNA: NamedColor = NamedColor(160, 82, 45);
pub const SILVER: NamedColor = NamedColor(192, 192, 192);
pub const SKY_BLUE: NamedColor = NamedColor(135, 206, 235);
pub const SLATE_BLUE: NamedColor = NamedColor(106, 90, 205);
pub const SLATE_GRAY: NamedColor = NamedColor(112, 128, 144);
pub const SNOW: NamedColor = NamedColor(255, 250, 250);
pub const SPRING_GREEN: NamedColor = NamedColor(0, 255, 127);
pub const STEEL_BLUE: NamedColor = NamedColor(70, 130, 180);
pub const TAN: NamedColor = NamedColor(210, 180, 140);
pub const TEAL: NamedColor = NamedColor(0, 128, 128);
pub const THISTLE: NamedColor = NamedColor(216, 191, 216);
pub const TOMATO: NamedColor = NamedColor(255, 99, 71);
pub const TURQUOISE: NamedColor = NamedColor(64, 224, 208);
pub const VIOLET: NamedColor = NamedColor(238, 130, 238);
pub const WHEAT: NamedColor = NamedColor(245, 222, 179);
pub const WHITE: NamedColor = NamedColor(255, 255, 255);
pub const WHITE_SMOKE: NamedColor = NamedColor(245, 245, 245);
pub const YELLOW: NamedColor = NamedColor(255, 255, 0);
pub const YELLOW_GREEN: NamedColor = NamedColor(154, 205, 50);
