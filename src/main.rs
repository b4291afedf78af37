use ndarray::Array3;
use sciimg_utils::image_utils::{
    compress_to_8bit, edof, generate_multiband_image, OmeTiffConfig, OmeTiffPipeline,
    TiffCompression, DEFAULT_PALETTE, DEFAULT_QUANTILE,
};
use sciimg_utils::logger;

use tracing::{error, info};

const WIDTH: usize = 256;
const HEIGHT: usize = 256;
const DEPTH: usize = 5;

/// Synthetic focal stack: the pattern is sharp in the slice matching its
/// quadrant and flattened everywhere else.
fn synthetic_stack(channel: usize) -> Array3<u16> {
    Array3::from_shape_fn((DEPTH, HEIGHT, WIDTH), |(z, y, x)| {
        let pattern = ((x / 4 + y / 4 + channel) % 2) as u16 * 3000 + 500;
        let quadrant = (2 * (y * 2 / HEIGHT) + x * 2 / WIDTH) % DEPTH;
        if z == quadrant { pattern } else { 2000 }
    })
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting EDOF to OME-TIFF demo...");

    let names = ["DAPI", "FITC"];
    let mut channels = Array3::<u16>::zeros((names.len(), HEIGHT, WIDTH));
    for (c, mut plane) in channels.outer_iter_mut().enumerate() {
        let fused = edof(synthetic_stack(c).view())?;
        plane.assign(&fused);
    }
    info!("Fused {} channels from {} focal planes", names.len(), DEPTH);

    let compressed = compress_to_8bit(channels.view(), DEFAULT_QUANTILE)?;
    let image = generate_multiband_image(compressed.view(), &names, &DEFAULT_PALETTE, 0.65)?;

    let config = OmeTiffConfig::builder()
        .compression(TiffCompression::DeflateBalanced)
        .build();
    let pipeline = OmeTiffPipeline::new(config);
    info!("Compression: {:?}", pipeline.config().compression);

    match pipeline.write_file(&image, "edof_demo.ome.tiff") {
        Ok(_) => info!("Export successful!"),
        Err(e) => error!("Export failed: {}", e),
    }

    Ok(())
}
