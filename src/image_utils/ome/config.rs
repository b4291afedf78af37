//! OME-TIFF export settings

/// Codec applied to every band page of the export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// Pages stored raw
    None,
    Lzw,
    /// Deflate at its fastest level
    DeflateFast,
    /// Deflate at its smallest output
    DeflateBest,
    DeflateBalanced,
}

/// How a [`MultibandImage`](super::MultibandImage) is laid down as OME-TIFF.
#[derive(Debug, Clone)]
pub struct OmeTiffConfig {
    pub compression: TiffCompression,
    /// TIFF predictor tag value; `Some(2)` selects horizontal differencing
    pub predictor: Option<u16>,
    /// Reject images whose sample count disagrees with `width * height * bands`
    pub validate_dimensions: bool,
    /// Store the OME-XML in the ImageDescription tag of the first page. Without
    /// it the file is a plain multi-page TIFF with one page per band.
    pub embed_ome_xml: bool,
}

impl Default for OmeTiffConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            embed_ome_xml: true,
        }
    }
}

impl OmeTiffConfig {
    pub fn builder() -> OmeTiffConfigBuilder {
        OmeTiffConfigBuilder::default()
    }
}

/// Builder for [`OmeTiffConfig`]; unset fields keep their defaults.
#[derive(Default)]
pub struct OmeTiffConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    embed_ome_xml: Option<bool>,
}

impl OmeTiffConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn embed_ome_xml(mut self, embed: bool) -> Self {
        self.embed_ome_xml = Some(embed);
        self
    }

    pub fn build(self) -> OmeTiffConfig {
        let default = OmeTiffConfig::default();
        OmeTiffConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            embed_ome_xml: self.embed_ome_xml.unwrap_or(default.embed_ome_xml),
        }
    }
}
