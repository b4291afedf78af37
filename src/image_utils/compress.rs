//! Dynamic range compression to 8 bit

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::image_utils::common::error::{ProcessingError, Result};
use crate::image_utils::common::pixel::Pixel;

pub const DEFAULT_QUANTILE: f64 = 0.999;

/// q-quantile of sorted values with linear interpolation between neighbours.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

fn compress_image<T: Pixel>(img: ArrayView2<T>, q: f64) -> Array2<u8> {
    let mut values: Vec<f64> = img.iter().map(|v| v.to_f64()).filter(|v| !v.is_nan()).collect();
    if values.is_empty() {
        return Array2::zeros(img.dim());
    }
    values.sort_unstable_by(f64::total_cmp);

    let qval = quantile_sorted(&values, q);
    let min = values[0];
    let range = qval - min;
    if range <= 0.0 {
        debug!("Constant image after clipping at {}, writing zeros", qval);
        return Array2::zeros(img.dim());
    }

    img.mapv(|v| {
        let v = v.to_f64();
        if v.is_nan() {
            return 0;
        }
        let normalized = (v.min(qval) - min) / range;
        (normalized * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
    })
}

/// Compresses every image of a `(n, height, width)` stack to 8 bit.
///
/// Each image is clipped from above at its own `q`-quantile, rescaled to
/// `[0, 1]` between its minimum and that quantile, then scaled to `0..=255`.
/// Images that are constant after clipping map to all zeros. NaN pixels are
/// left out of the statistics and map to 0.
#[instrument(skip(images), fields(shape = ?images.dim()))]
pub fn compress_to_8bit<T: Pixel>(images: ArrayView3<T>, q: f64) -> Result<Array3<u8>> {
    if !(0.0..=1.0).contains(&q) {
        return Err(ProcessingError::InvalidQuantile(q));
    }

    let planes: Vec<ArrayView2<T>> = images.axis_iter(Axis(0)).collect();
    let compressed: Vec<Array2<u8>> = planes
        .into_par_iter()
        .map(|plane| compress_image(plane, q))
        .collect();

    let mut out = Array3::<u8>::zeros(images.dim());
    for (mut dst, src) in out.axis_iter_mut(Axis(0)).zip(compressed.iter()) {
        dst.assign(src);
    }
    Ok(out)
}
