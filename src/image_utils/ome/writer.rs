use std::io::Write;
use crate::image_utils::common::error::Result;
use crate::image_utils::ome::config::OmeTiffConfig;
use crate::image_utils::ome::generate::MultibandImage;

pub trait OmeTiffWriter {
    fn write_ome_tiff(&self, image: &MultibandImage, output: &mut dyn Write, config: &OmeTiffConfig) -> Result<()>;
}
