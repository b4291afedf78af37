use std::io::{Cursor, Seek, Write};
use tiff::encoder::colortype::{self, ColorType};
use tiff::encoder::{TiffEncoder, TiffValue};
use tiff::tags::Tag;
use tracing::debug;
use crate::image_utils::common::error::{ProcessingError, Result};
use crate::image_utils::common::pixel::PixelBuffer;
use crate::image_utils::ome::config::{OmeTiffConfig, TiffCompression};
use crate::image_utils::ome::generate::MultibandImage;
use crate::image_utils::ome::writer::OmeTiffWriter;

/// Writes one TIFF page per band, the first page carrying the OME-XML.
pub struct StandardOmeTiffWriter;

fn encode_error(e: tiff::TiffError) -> ProcessingError {
    ProcessingError::EncodeError(e.to_string())
}

fn write_pages<W, C>(
    encoder: &mut TiffEncoder<W>,
    image: &MultibandImage,
    samples: &[C::Inner],
    embed_ome_xml: bool,
) -> Result<()>
where
    W: Write + Seek,
    C: ColorType,
    C::Inner: Copy,
    [C::Inner]: TiffValue,
{
    for band in 0..image.bands {
        let page: Vec<C::Inner> = samples.iter().skip(band).step_by(image.bands).copied().collect();

        let mut page_encoder = encoder
            .new_image::<C>(image.width as u32, image.page_height as u32)
            .map_err(encode_error)?;
        if band == 0 && embed_ome_xml {
            page_encoder
                .encoder()
                .write_tag(Tag::ImageDescription, image.image_description.as_str())
                .map_err(encode_error)?;
        }
        page_encoder.write_data(&page).map_err(encode_error)?;
        debug!("Wrote page {}/{}", band + 1, image.bands);
    }
    Ok(())
}

impl OmeTiffWriter for StandardOmeTiffWriter {
    fn write_ome_tiff(&self, image: &MultibandImage, output: &mut dyn Write, config: &OmeTiffConfig) -> Result<()> {
        debug!(
            "Encoding OME-TIFF: {}x{} with {} bands of {}",
            image.width,
            image.height,
            image.bands,
            image.pixel_type().ome_name()
        );

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(encode_error)?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        let embed = config.embed_ome_xml;
        match &image.data {
            PixelBuffer::U8(v) => write_pages::<_, colortype::Gray8>(&mut encoder, image, v, embed)?,
            PixelBuffer::I8(v) => write_pages::<_, colortype::GrayI8>(&mut encoder, image, v, embed)?,
            PixelBuffer::U16(v) => write_pages::<_, colortype::Gray16>(&mut encoder, image, v, embed)?,
            PixelBuffer::I16(v) => write_pages::<_, colortype::GrayI16>(&mut encoder, image, v, embed)?,
            PixelBuffer::U32(v) => write_pages::<_, colortype::Gray32>(&mut encoder, image, v, embed)?,
            PixelBuffer::I32(v) => write_pages::<_, colortype::GrayI32>(&mut encoder, image, v, embed)?,
            PixelBuffer::F32(v) => write_pages::<_, colortype::Gray32Float>(&mut encoder, image, v, embed)?,
            PixelBuffer::F64(v) => write_pages::<_, colortype::Gray64Float>(&mut encoder, image, v, embed)?,
        }
        drop(encoder);

        output.write_all(&buffer)?;

        debug!("OME-TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
