//! OME metadata record types

use crate::image_utils::common::pixel::PixelType;

/// Dimension order written for every generated image.
pub const DIMENSION_ORDER: &str = "XYZCT";

/// Channel display color, stored as RGBA.
///
/// OME-XML encodes colors as the signed 32-bit reading of the RGBA word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const LIME: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::rgba(r, g, b, 255)
    }

    pub fn as_rgba(self) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = self.0.to_be_bytes();
        (r, g, b, a)
    }

    /// Value of the OME `Channel/@Color` attribute.
    pub fn to_ome_int(self) -> i32 {
        self.0 as i32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OmeChannel {
    pub id: String,
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OmePixels {
    pub id: String,
    pub pixel_type: PixelType,
    pub dimension_order: &'static str,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub big_endian: bool,
    /// The record describes pixels stored elsewhere and carries no BinData.
    pub metadata_only: bool,
    pub channels: Vec<OmeChannel>,
    /// Physical pixel size along X, in micrometers
    pub physical_size_x: f64,
    /// Physical pixel size along Y, in micrometers
    pub physical_size_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OmeImage {
    pub id: String,
    pub name: String,
    pub pixels: OmePixels,
}

/// Root of an OME metadata document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OmeMetadata {
    pub images: Vec<OmeImage>,
}
