//! Raster / vector conversion
//!
//! Traces the regions of a label image into GeoJSON polygon features in the
//! layout QuPath reads, and rasterizes polygon features back into a label image.

pub mod types;
pub mod options;
mod label;
mod trace;
mod rasterize;

#[cfg(test)]
mod tests;

pub use types::{
    Affine,
    Classification,
    Connectivity,
    Feature,
    FeatureCollection,
    FeatureProperties,
    Geometry,
    Measurement,
    Position,
};
pub use options::{FeatureOptions, FeatureOptionsBuilder};
pub use label::Label;
pub use trace::labels_to_features;
pub use rasterize::{geojson_to_tiff, geojson_to_label_image, LabelImage};
