//! Extended depth of focus
//!
//! Fuses a focal stack into one image by picking, for every pixel, the slice
//! with the strongest Sobel response.

use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView2, ArrayView3, Axis};
use tracing::{debug, instrument};

use crate::image_utils::common::error::{ProcessingError, Result};
use crate::image_utils::common::pixel::Pixel;

/// Squared Sobel gradient magnitude of one slice.
///
/// The slice is first rescaled to `[0, 1]` by its own minimum and range, so
/// slices of different exposure compete on edge contrast alone. A constant
/// slice has no response. The 3x3 window replicates edge pixels at the border,
/// which for this window size is the same as mirror padding. No smoothing or
/// thresholding is applied.
pub fn sobel_response<T: Pixel>(slice: ArrayView2<T>) -> Array2<f64> {
    let (height, width) = slice.dim();
    let mut out = Array2::<f64>::zeros((height, width));
    if height == 0 || width == 0 {
        return out;
    }

    let (min, max) = slice.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        let v = v.to_f64();
        (lo.min(v), hi.max(v))
    });
    let range = max - min;
    if !(range.is_finite() && range > 0.0) {
        return out;
    }

    let at = |r: isize, c: isize| -> f64 {
        let r = r.clamp(0, height as isize - 1) as usize;
        let c = c.clamp(0, width as isize - 1) as usize;
        (slice[[r, c]].to_f64() - min) / range
    };

    for ((r, c), value) in out.indexed_iter_mut() {
        let (r, c) = (r as isize, c as isize);
        let gx = (at(r - 1, c + 1) + 2.0 * at(r, c + 1) + at(r + 1, c + 1))
            - (at(r - 1, c - 1) + 2.0 * at(r, c - 1) + at(r + 1, c - 1));
        let gy = (at(r + 1, c - 1) + 2.0 * at(r + 1, c) + at(r + 1, c + 1))
            - (at(r - 1, c - 1) + 2.0 * at(r - 1, c) + at(r - 1, c + 1));
        *value = gx * gx + gy * gy;
    }
    out
}

/// Performs extended depth of focus on a `(z, height, width)` stack.
///
/// Each output pixel is copied from the slice whose focus response is highest
/// at that location; ties go to the lowest z. Ordering of NaN responses is
/// undefined.
#[instrument(skip(imgs), fields(shape = ?imgs.dim()))]
pub fn edof<T: Pixel>(imgs: ArrayView3<T>) -> Result<Array2<T>> {
    let (depth, height, width) = imgs.dim();
    if depth == 0 {
        return Err(ProcessingError::EmptyStack);
    }
    if depth == 1 {
        return Ok(imgs.index_axis(Axis(0), 0).to_owned());
    }

    let focus: Vec<Array2<f64>> = imgs
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(sobel_response::<T>)
        .collect();
    debug!("Computed focus response for {} slices", focus.len());

    let mut best = Array2::<usize>::zeros((height, width));
    let mut best_focus = focus[0].clone();
    for (z, response) in focus.iter().enumerate().skip(1) {
        ndarray::Zip::from(&mut best)
            .and(&mut best_focus)
            .and(response)
            .for_each(|index, current, &candidate| {
                if candidate > *current {
                    *current = candidate;
                    *index = z;
                }
            });
    }

    let fused = Array2::from_shape_fn((height, width), |(r, c)| imgs[[best[[r, c]], r, c]]);
    Ok(fused)
}
