//! OME metadata and OME-TIFF export
//!
//! This module builds OME-XML records for channel-first image stacks, packs the
//! stacks into multi-band images and writes them as multi-page OME-TIFF files.

pub mod types;
mod xml;
mod generate;
pub mod config;
mod writer;
mod standard_tiff_writer;
mod pipeline;

#[cfg(test)]
mod tests;

pub use types::{Color, OmeMetadata, OmeImage, OmePixels, OmeChannel, DIMENSION_ORDER};
pub use generate::{MultibandImage, generate_ome, generate_multiband_image, DEFAULT_PALETTE};
pub use config::{TiffCompression, OmeTiffConfig, OmeTiffConfigBuilder};
pub use writer::OmeTiffWriter;
pub use standard_tiff_writer::StandardOmeTiffWriter;
pub use pipeline::OmeTiffPipeline;
