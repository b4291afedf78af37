//! Scientific image utilities
//!
//! Standalone transforms over in-memory images: focus stacking, OME metadata
//! and OME-TIFF export, 8-bit compression, path rewriting and conversion
//! between label images and GeoJSON polygons.

pub mod common;
pub mod edof;
pub mod ome;
pub mod compress;
pub mod paths;
pub mod vector;

pub use common::{
    ProcessingError,
    Result,
    Pixel,
    PixelType,
    PixelBuffer,
};

pub use edof::{edof, sobel_response};

pub use ome::{
    Color,
    OmeMetadata,
    OmeImage,
    OmePixels,
    OmeChannel,
    MultibandImage,
    generate_ome,
    generate_multiband_image,
    TiffCompression,
    OmeTiffConfig,
    OmeTiffConfigBuilder,
    OmeTiffWriter,
    StandardOmeTiffWriter,
    OmeTiffPipeline,
    DEFAULT_PALETTE,
};

pub use compress::{compress_to_8bit, DEFAULT_QUANTILE};

pub use paths::convert_win_path_to_linux;

pub use vector::{
    Affine,
    Classification,
    Connectivity,
    Feature,
    FeatureCollection,
    FeatureOptions,
    FeatureOptionsBuilder,
    FeatureProperties,
    Geometry,
    Label,
    LabelImage,
    Measurement,
    labels_to_features,
    geojson_to_tiff,
    geojson_to_label_image,
};
