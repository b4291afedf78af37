//! Polygon features to label image

use ndarray::Array2;
use tracing::{debug, instrument};

use crate::image_utils::common::error::{ProcessingError, Result};
use crate::image_utils::common::pixel::{Pixel, PixelType};
use crate::image_utils::vector::types::{Geometry, Position};

/// Label image of a runtime-selected pixel type.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelImage {
    U8(Array2<u8>),
    I8(Array2<i8>),
    U16(Array2<u16>),
    I16(Array2<i16>),
    U32(Array2<u32>),
    I32(Array2<i32>),
    F32(Array2<f32>),
    F64(Array2<f64>),
}

impl LabelImage {
    pub fn pixel_type(&self) -> PixelType {
        match self {
            LabelImage::U8(_) => PixelType::Uint8,
            LabelImage::I8(_) => PixelType::Int8,
            LabelImage::U16(_) => PixelType::Uint16,
            LabelImage::I16(_) => PixelType::Int16,
            LabelImage::U32(_) => PixelType::Uint32,
            LabelImage::I32(_) => PixelType::Int32,
            LabelImage::F32(_) => PixelType::Float,
            LabelImage::F64(_) => PixelType::Double,
        }
    }
}

const EPSILON: f64 = 1e-9;

fn on_segment(p: Position, a: Position, b: Position) -> bool {
    let cross = (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]);
    if cross.abs() > EPSILON {
        return false;
    }
    p[0] >= a[0].min(b[0]) - EPSILON
        && p[0] <= a[0].max(b[0]) + EPSILON
        && p[1] >= a[1].min(b[1]) - EPSILON
        && p[1] <= a[1].max(b[1]) + EPSILON
}

/// Even-odd test that also accepts points lying on the ring.
fn covers(ring: &[Position], p: Position) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if on_segment(p, a, b) {
            return true;
        }
        if (a[1] > p[1]) != (b[1] > p[1]) {
            let x_cross = a[0] + (p[1] - a[1]) * (b[0] - a[0]) / (b[1] - a[1]);
            if p[0] < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

fn fill_ring<T: Pixel>(out: &mut Array2<T>, ring: &[Position], value: T) {
    let (height, width) = out.dim();
    if ring.len() < 3 || height == 0 || width == 0 {
        return;
    }

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in ring {
        min_x = min_x.min(p[0]);
        max_x = max_x.max(p[0]);
        min_y = min_y.min(p[1]);
        max_y = max_y.max(p[1]);
    }
    if max_x < 0.0 || max_y < 0.0 || min_x > (width - 1) as f64 || min_y > (height - 1) as f64 {
        return;
    }

    let row_start = min_y.ceil().max(0.0) as usize;
    let row_end = (max_y.floor() as usize).min(height - 1);
    let col_start = min_x.ceil().max(0.0) as usize;
    let col_end = (max_x.floor() as usize).min(width - 1);

    for r in row_start..=row_end {
        for c in col_start..=col_end {
            if covers(ring, [c as f64, r as f64]) {
                out[[r, c]] = value;
            }
        }
    }
}

/// Rasterizes polygons into a zero-initialized `(height, width)` label image.
///
/// Polygon `i` writes label `i + 1` to every pixel whose center `(x = column,
/// y = row)` is inside or on its exterior ring; holes are ignored and later
/// polygons overwrite earlier ones. Fails before writing anything if a
/// geometry is not a `Polygon`.
#[instrument(skip(geometries), fields(count = geometries.len()))]
pub fn geojson_to_tiff<T: Pixel>(geometries: &[Geometry], shape: (usize, usize)) -> Result<Array2<T>> {
    let mut exteriors = Vec::with_capacity(geometries.len());
    for (index, geometry) in geometries.iter().enumerate() {
        match geometry {
            Geometry::Polygon(rings) => exteriors.push(rings.first().map(Vec::as_slice).unwrap_or(&[])),
            other => {
                return Err(ProcessingError::NonPolygonGeometry { index, kind: other.kind() });
            }
        }
    }

    let mut out = Array2::<T>::default(shape);
    for (i, exterior) in exteriors.into_iter().enumerate() {
        let ring = match exterior.split_last() {
            Some((last, rest)) if !rest.is_empty() && last == &rest[0] => rest,
            _ => exterior,
        };
        fill_ring(&mut out, ring, T::from_label(i + 1));
    }
    debug!("Rasterized {} polygons into {}x{}", geometries.len(), shape.1, shape.0);

    Ok(out)
}

/// [`geojson_to_tiff`] with the output type chosen at runtime.
pub fn geojson_to_label_image(
    geometries: &[Geometry],
    shape: (usize, usize),
    pixel_type: PixelType,
) -> Result<LabelImage> {
    Ok(match pixel_type {
        PixelType::Uint8 => LabelImage::U8(geojson_to_tiff(geometries, shape)?),
        PixelType::Int8 => LabelImage::I8(geojson_to_tiff(geometries, shape)?),
        PixelType::Uint16 => LabelImage::U16(geojson_to_tiff(geometries, shape)?),
        PixelType::Int16 => LabelImage::I16(geojson_to_tiff(geometries, shape)?),
        PixelType::Uint32 => LabelImage::U32(geojson_to_tiff(geometries, shape)?),
        PixelType::Int32 => LabelImage::I32(geojson_to_tiff(geometries, shape)?),
        PixelType::Float => LabelImage::F32(geojson_to_tiff(geometries, shape)?),
        PixelType::Double => LabelImage::F64(geojson_to_tiff(geometries, shape)?),
    })
}
