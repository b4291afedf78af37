use tracing::{info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_utils::{
    common::error::{ProcessingError, Result},
    ome::{
        config::OmeTiffConfig,
        generate::MultibandImage,
        standard_tiff_writer::StandardOmeTiffWriter,
        writer::OmeTiffWriter,
    },
};

pub struct OmeTiffPipeline<W: OmeTiffWriter> {
    writer: W,
    config: OmeTiffConfig,
}

impl OmeTiffPipeline<StandardOmeTiffWriter> {
    pub fn new(config: OmeTiffConfig) -> Self {
        Self {
            writer: StandardOmeTiffWriter,
            config,
        }
    }
}

impl<W: OmeTiffWriter> OmeTiffPipeline<W> {
    pub fn with_custom(writer: W, config: OmeTiffConfig) -> Self {
        Self { writer, config }
    }

    fn validate_dimensions(&self, image: &MultibandImage) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if image.width == 0 || image.height == 0 || image.bands == 0 {
            return Err(ProcessingError::InvalidDimensions(image.width, image.height));
        }

        if image.data.len() != image.width * image.height * image.bands {
            return Err(ProcessingError::InvalidDimensions(image.width, image.height));
        }

        Ok(())
    }

    #[instrument(skip(self, image, output), fields(bands = image.bands))]
    pub fn write(&self, image: &MultibandImage, output: &mut dyn Write) -> Result<()> {
        info!("Starting OME-TIFF export");

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = image.width,
                height = image.height
            ).entered();
            self.validate_dimensions(image)?;
        }

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_ome_tiff(image, output, &self.config)?;
        }

        info!(
            width = image.width,
            height = image.height,
            bands = image.bands,
            "Export complete"
        );
        Ok(())
    }

    #[instrument(skip(self, image, output_path))]
    pub fn write_file<P: AsRef<Path>>(&self, image: &MultibandImage, output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();

        info!(output = %output_path.display(), "Writing file");

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ProcessingError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.write(image, &mut output_file)?;

        Ok(())
    }

    pub fn config(&self) -> &OmeTiffConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: OmeTiffConfig) {
        self.config = config;
    }
}
