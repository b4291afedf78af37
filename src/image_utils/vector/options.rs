//! Options for tracing label images into features

use ndarray::Array2;

use crate::image_utils::vector::types::{Affine, Classification, Connectivity};

/// Configuration for `labels_to_features`
#[derive(Debug, Clone)]
pub struct FeatureOptions {
    /// QuPath object type written to every feature
    pub object_type: String,
    pub connectivity: Connectivity,
    /// Pixel-to-output transform; derived from `downsample` when unset
    pub transform: Option<Affine>,
    /// Extra mask combined with `label > 0`
    pub mask: Option<Array2<bool>>,
    pub downsample: f64,
    /// Whether to store the region's label value as a `Label` measurement
    pub include_labels: bool,
    pub classification: Option<Classification>,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            object_type: "annotation".to_string(),
            connectivity: Connectivity::Four,
            transform: None,
            mask: None,
            downsample: 1.0,
            include_labels: false,
            classification: None,
        }
    }
}

impl FeatureOptions {
    pub fn builder() -> FeatureOptionsBuilder {
        FeatureOptionsBuilder::default()
    }

    pub fn effective_transform(&self) -> Affine {
        self.transform.unwrap_or_else(|| Affine::scale(self.downsample))
    }
}

/// Builder for FeatureOptions
#[derive(Default)]
pub struct FeatureOptionsBuilder {
    object_type: Option<String>,
    connectivity: Option<Connectivity>,
    transform: Option<Affine>,
    mask: Option<Array2<bool>>,
    downsample: Option<f64>,
    include_labels: Option<bool>,
    classification: Option<Classification>,
}

impl FeatureOptionsBuilder {
    pub fn object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self
    }

    pub fn connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    pub fn transform(mut self, transform: Affine) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn mask(mut self, mask: Array2<bool>) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn downsample(mut self, downsample: f64) -> Self {
        self.downsample = Some(downsample);
        self
    }

    pub fn include_labels(mut self, include: bool) -> Self {
        self.include_labels = Some(include);
        self
    }

    pub fn classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn build(self) -> FeatureOptions {
        let default = FeatureOptions::default();
        FeatureOptions {
            object_type: self.object_type.unwrap_or(default.object_type),
            connectivity: self.connectivity.unwrap_or(default.connectivity),
            transform: self.transform,
            mask: self.mask,
            downsample: self.downsample.unwrap_or(default.downsample),
            include_labels: self.include_labels.unwrap_or(default.include_labels),
            classification: self.classification,
        }
    }
}
