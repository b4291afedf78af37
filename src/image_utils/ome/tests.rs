use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use ndarray::Array3;

use crate::image_utils::common::error::{ProcessingError, Result};
use crate::image_utils::common::pixel::PixelBuffer;
use crate::image_utils::ome::{
    generate_multiband_image, Color, MultibandImage, OmeTiffConfig, OmeTiffPipeline, OmeTiffWriter,
    TiffCompression, DEFAULT_PALETTE,
};

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<MultibandImage>>>,
}

impl OmeTiffWriter for MockWriter {
    fn write_ome_tiff(&self, image: &MultibandImage, _output: &mut dyn Write, _config: &OmeTiffConfig) -> Result<()> {
        if self.should_fail {
            return Err(ProcessingError::EncodeError("Mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        Ok(())
    }
}

fn sample_image() -> MultibandImage {
    let images = Array3::from_shape_fn((2, 8, 10), |(c, y, x)| (c * 1000 + y * 10 + x) as u16);
    generate_multiband_image(images.view(), &["DAPI", "CD45"], &DEFAULT_PALETTE, 0.5).unwrap()
}

#[test]
fn test_config_builder() {
    let config = OmeTiffConfig::builder()
        .compression(TiffCompression::DeflateBest)
        .predictor(Some(2))
        .validate_dimensions(false)
        .embed_ome_xml(false)
        .build();

    assert_eq!(config.compression, TiffCompression::DeflateBest);
    assert_eq!(config.predictor, Some(2));
    assert!(!config.validate_dimensions);
    assert!(!config.embed_ome_xml);
}

#[test]
fn test_config_defaults_embed_ome_xml() {
    let config = OmeTiffConfig::builder().compression(TiffCompression::Lzw).build();
    assert!(config.embed_ome_xml);
    assert!(config.validate_dimensions);
    assert_eq!(config.predictor, None);
}

#[test]
fn test_ome_xml_can_be_left_out() {
    let image = sample_image();
    let export = |embed: bool| {
        let config = OmeTiffConfig::builder().embed_ome_xml(embed).build();
        let mut output = Cursor::new(Vec::new());
        OmeTiffPipeline::new(config).write(&image, &mut output).unwrap();
        output.into_inner()
    };

    let marker = b"<OME ";
    let contains = |bytes: &[u8]| bytes.windows(marker.len()).any(|w| w == marker);
    assert!(contains(&export(true)));
    assert!(!contains(&export(false)));
}

#[test]
fn test_successful_write() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter { should_fail: false, written_data: written.clone() };
    let pipeline = OmeTiffPipeline::with_custom(writer, OmeTiffConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.write(&sample_image(), &mut output);

    assert!(result.is_ok());
    assert_eq!(written.lock().unwrap().len(), 1);
}

#[test]
fn test_writer_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter { should_fail: true, written_data: written };
    let pipeline = OmeTiffPipeline::with_custom(writer, OmeTiffConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.write(&sample_image(), &mut output);

    assert!(matches!(result.unwrap_err(), ProcessingError::EncodeError(_)));
}

#[test]
fn test_dimension_validation_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter { should_fail: false, written_data: written.clone() };
    let pipeline = OmeTiffPipeline::with_custom(writer, OmeTiffConfig::default());

    let mut image = sample_image();
    image.data = PixelBuffer::U16(vec![0; 10]);

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.write(&image, &mut output);

    assert!(matches!(result.unwrap_err(), ProcessingError::InvalidDimensions(10, 8)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_dimension_validation_disabled() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter { should_fail: false, written_data: written.clone() };
    let config = OmeTiffConfig::builder().validate_dimensions(false).build();
    let pipeline = OmeTiffPipeline::with_custom(writer, config);

    let mut image = sample_image();
    image.data = PixelBuffer::U16(vec![0; 10]);

    let mut output = Cursor::new(Vec::new());
    assert!(pipeline.write(&image, &mut output).is_ok());
    assert_eq!(written.lock().unwrap().len(), 1);
}

#[test]
fn test_standard_writer_produces_tiff() {
    let pipeline = OmeTiffPipeline::new(OmeTiffConfig::default());

    let mut output = Cursor::new(Vec::new());
    pipeline.write(&sample_image(), &mut output).unwrap();

    let bytes = output.into_inner();
    assert!(bytes.starts_with(b"II") || bytes.starts_with(b"MM"));
    assert!(bytes.len() > 2 * 8 * 10 * 2);
}

#[test]
fn test_band_count_matches_channels() {
    let images = Array3::<f32>::zeros((5, 3, 3));
    let names = ["a", "b", "c", "d", "e"];
    let palette = [Color::CYAN, Color::MAGENTA];

    let image = generate_multiband_image(images.view(), &names, &palette, 1.0).unwrap();

    assert_eq!(image.bands, 5);
    assert_eq!(image.data.len(), 5 * 3 * 3);
    assert!(image.image_description.contains(r#"ID="Channel:0:0" Name="a" Color="-1""#));
    // the fixed palette wins over the caller's colors
    assert!(image.image_description.contains(r#"ID="Channel:0:1" Name="b" Color="-16776961""#));
}
