//! Packed 24-bit RGB colors.
//!
//! Colors are stored the way they are usually written in firmware sources,
//! `0xRRGGBB`, and all arithmetic is done per 8-bit channel. Conversion to
//! `palette::Srgb<u8>` happens at the LED boundary.

use palette::Srgb;

/// A packed `0xRRGGBB` color. No alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(u32);

impl Color {
    /// Creates a color from a packed `0xRRGGBB` value. Bits above 23 are discarded.
    #[inline]
    pub const fn new(rgb: u32) -> Self {
        Color(rgb & 0x00FF_FFFF)
    }

    /// Creates a color from individual channels.
    #[inline]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Color(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Returns the red channel.
    #[inline]
    pub const fn red(self) -> u8 {
        ((self.0 & 0xFF_0000) >> 16) as u8
    }

    /// Returns the green channel.
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 & 0x00_FF00) >> 8) as u8
    }

    /// Returns the blue channel.
    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 & 0x00_00FF) as u8
    }

    /// Returns the packed `0xRRGGBB` value.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Color::new(rgb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<Color> for Srgb<u8> {
    fn from(color: Color) -> Self {
        Srgb::new(color.red(), color.green(), color.blue())
    }
}

impl From<Srgb<u8>> for Color {
    fn from(color: Srgb<u8>) -> Self {
        Color::from_rgb(color.red, color.green, color.blue)
    }
}

pub const BLACK: Color = Color::new(0x000000);
pub const WHITE: Color = Color::new(0xFFFFFF);
pub const RED: Color = Color::new(0xFF0000);
pub const GREEN: Color = Color::new(0x00FF00);
pub const BLUE: Color = Color::new(0x0000FF);
