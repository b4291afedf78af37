use ndarray::ArrayView3;
use tracing::{debug, instrument};

use crate::image_utils::common::error::{ProcessingError, Result};
use crate::image_utils::common::pixel::{Pixel, PixelBuffer, PixelType};
use crate::image_utils::ome::types::{
    Color, OmeChannel, OmeImage, OmeMetadata, OmePixels, DIMENSION_ORDER,
};

/// Channel colors: the first entry is reserved for channel 0, the other six
/// cycle over channels 1 and up.
pub const DEFAULT_PALETTE: [Color; 7] = [
    Color::WHITE,
    Color::RED,
    Color::LIME,
    Color::BLUE,
    Color::MAGENTA,
    Color::CYAN,
    Color::YELLOW,
];

/// Channel-last multi-band image ready to be written as OME-TIFF.
#[derive(Debug, Clone, PartialEq)]
pub struct MultibandImage {
    pub width: usize,
    pub height: usize,
    pub bands: usize,
    /// Height of one page when the bands are written as a page stack
    pub page_height: usize,
    /// Serialized OME-XML stored in the TIFF ImageDescription tag
    pub image_description: String,
    /// Interleaved samples `[b0, b1, .., b0, b1, ..]` in row-major order
    pub data: PixelBuffer,
}

impl MultibandImage {
    pub fn pixel_type(&self) -> PixelType {
        self.data.pixel_type()
    }
}

fn channel_colors(c: usize) -> Vec<Color> {
    let cycle = DEFAULT_PALETTE.len() - 1;

    (0..c)
        .map(|i| match i {
            0 => Color::WHITE,
            _ => DEFAULT_PALETTE[1 + (i - 1) % cycle],
        })
        .collect()
}

/// Builds the OME record for a single-resolution `c`-channel image.
///
/// Channel 0 is always white. The other channels cycle through red, lime,
/// blue, magenta, cyan and yellow from [`DEFAULT_PALETTE`]. `colors` is
/// accepted for call-site compatibility and does not change the assignment.
pub fn generate_ome(
    c: usize,
    w: usize,
    h: usize,
    names: &[&str],
    pixel_type: PixelType,
    _colors: &[Color],
    pixel_physical_size: f64,
) -> Result<OmeMetadata> {
    if names.len() < c {
        return Err(ProcessingError::MissingChannelName {
            index: names.len(),
            available: names.len(),
        });
    }

    let channels = channel_colors(c)
        .into_iter()
        .enumerate()
        .map(|(i, color)| OmeChannel {
            id: format!("Channel:0:{i}"),
            name: names[i].to_string(),
            color,
        })
        .collect();

    let image = OmeImage {
        id: "Image:0".to_string(),
        name: "resolution_1".to_string(),
        pixels: OmePixels {
            id: "Pixels:0".to_string(),
            pixel_type,
            dimension_order: DIMENSION_ORDER,
            size_x: w,
            size_y: h,
            size_z: 1,
            size_c: c,
            size_t: 1,
            big_endian: true,
            metadata_only: true,
            channels,
            physical_size_x: pixel_physical_size,
            physical_size_y: pixel_physical_size,
        },
    };

    Ok(OmeMetadata { images: vec![image] })
}

/// Packs a channel-first `(C, H, W)` stack into a channel-last multi-band image
/// with an embedded OME-XML description.
#[instrument(skip(images, names, colors), fields(shape = ?images.dim()))]
pub fn generate_multiband_image<T: Pixel>(
    images: ArrayView3<T>,
    names: &[&str],
    colors: &[Color],
    pixel_physical_size: f64,
) -> Result<MultibandImage> {
    let (c, h, w) = images.dim();
    if c == 0 || h == 0 || w == 0 {
        return Err(ProcessingError::InvalidDimensions(w, h));
    }

    let ome = generate_ome(c, w, h, names, T::PIXEL_TYPE, colors, pixel_physical_size)?;

    let interleaved: Vec<T> = images.permuted_axes([1, 2, 0]).iter().copied().collect();
    debug!("Packed {} bands of {}x{} {}", c, w, h, T::PIXEL_TYPE.ome_name());

    Ok(MultibandImage {
        width: w,
        height: h,
        bands: c,
        page_height: h,
        image_description: ome.to_xml(),
        data: T::into_buffer(interleaved),
    })
}
