//! Label image to polygon tracing
//!
//! Regions are grouped with a flood fill, then every region's outline is
//! walked along pixel edges. Pixel `(row, col)` covers the square
//! `[col, col + 1] x [row, row + 1]`, so traced vertices sit on pixel corners.

use std::collections::HashMap;

use ndarray::{Array2, ArrayView2};
use tracing::{debug, instrument};

use crate::image_utils::common::error::{ProcessingError, Result};
use crate::image_utils::vector::label::Label;
use crate::image_utils::vector::options::FeatureOptions;
use crate::image_utils::vector::types::{
    Affine, Connectivity, Feature, FeatureProperties, Geometry, Measurement, Position,
};

type Vertex = (i64, i64);

/// Edge direction in image coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    East,
    South,
    West,
    North,
}

impl Dir {
    fn step(self) -> Vertex {
        match self {
            Dir::East => (1, 0),
            Dir::South => (0, 1),
            Dir::West => (-1, 0),
            Dir::North => (0, -1),
        }
    }

    /// Clockwise on screen.
    fn turn_right(self) -> Dir {
        match self {
            Dir::East => Dir::South,
            Dir::South => Dir::West,
            Dir::West => Dir::North,
            Dir::North => Dir::East,
        }
    }

    fn turn_left(self) -> Dir {
        match self {
            Dir::East => Dir::North,
            Dir::North => Dir::West,
            Dir::West => Dir::South,
            Dir::South => Dir::East,
        }
    }
}

/// Boundary edge with the region on its right-hand side.
#[derive(Debug, Clone, Copy)]
struct Edge {
    from: Vertex,
    dir: Dir,
}

impl Edge {
    fn to(&self) -> Vertex {
        let (dx, dy) = self.dir.step();
        (self.from.0 + dx, self.from.1 + dy)
    }
}

struct Region {
    value: f64,
    edges: Vec<Edge>,
}

/// Assigns a region id (1-based, 0 = none) to every masked pixel. Ids follow
/// the raster order of each region's first pixel.
fn label_regions(values: &Array2<f64>, mask: &Array2<bool>, connectivity: Connectivity) -> (Array2<usize>, Vec<f64>) {
    let (height, width) = values.dim();
    let mut ids = Array2::<usize>::zeros((height, width));
    let mut region_values = Vec::new();
    let mut stack = Vec::new();

    let offsets: &[(isize, isize)] = match connectivity {
        Connectivity::Four => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
        Connectivity::Eight => &[(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)],
    };

    for r in 0..height {
        for c in 0..width {
            if !mask[[r, c]] || ids[[r, c]] != 0 {
                continue;
            }
            let value = values[[r, c]];
            region_values.push(value);
            let id = region_values.len();
            ids[[r, c]] = id;
            stack.push((r, c));

            while let Some((pr, pc)) = stack.pop() {
                for &(dr, dc) in offsets {
                    let nr = pr as isize + dr;
                    let nc = pc as isize + dc;
                    if nr < 0 || nc < 0 || nr >= height as isize || nc >= width as isize {
                        continue;
                    }
                    let (nr, nc) = (nr as usize, nc as usize);
                    if mask[[nr, nc]] && ids[[nr, nc]] == 0 && values[[nr, nc]] == value {
                        ids[[nr, nc]] = id;
                        stack.push((nr, nc));
                    }
                }
            }
        }
    }

    (ids, region_values)
}

/// Collects the boundary edges of every region in raster order.
fn collect_edges(ids: &Array2<usize>, region_values: &[f64]) -> Vec<Region> {
    let (height, width) = ids.dim();
    let mut regions: Vec<Region> = region_values
        .iter()
        .map(|&value| Region { value, edges: Vec::new() })
        .collect();

    let id_at = |r: isize, c: isize| -> usize {
        if r < 0 || c < 0 || r >= height as isize || c >= width as isize {
            0
        } else {
            ids[[r as usize, c as usize]]
        }
    };

    for ((r, c), &id) in ids.indexed_iter() {
        if id == 0 {
            continue;
        }
        let (ri, ci) = (r as isize, c as isize);
        let (x, y) = (c as i64, r as i64);
        let edges = &mut regions[id - 1].edges;

        if id_at(ri - 1, ci) != id {
            edges.push(Edge { from: (x, y), dir: Dir::East });
        }
        if id_at(ri, ci + 1) != id {
            edges.push(Edge { from: (x + 1, y), dir: Dir::South });
        }
        if id_at(ri + 1, ci) != id {
            edges.push(Edge { from: (x + 1, y + 1), dir: Dir::West });
        }
        if id_at(ri, ci - 1) != id {
            edges.push(Edge { from: (x, y + 1), dir: Dir::North });
        }
    }

    regions
}

/// Links boundary edges into closed rings. The first ring is the exterior.
///
/// Where two diagonal pixels of a region meet at a corner, 8-connectivity keeps
/// them in one outline (turn left) and 4-connectivity separates them (turn right).
fn link_rings(edges: &[Edge], connectivity: Connectivity) -> Vec<Vec<Vertex>> {
    let mut outgoing: HashMap<Vertex, Vec<usize>> = HashMap::with_capacity(edges.len());
    for (i, edge) in edges.iter().enumerate() {
        outgoing.entry(edge.from).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut rings = Vec::new();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }

        let mut ring: Vec<(Vertex, Dir)> = Vec::new();
        let mut current = start;
        loop {
            used[current] = true;
            let edge = edges[current];
            ring.push((edge.from, edge.dir));

            let candidates = &outgoing[&edge.to()];
            let next = if candidates.len() == 1 {
                candidates[0]
            } else {
                let wanted = match connectivity {
                    Connectivity::Eight => edge.dir.turn_left(),
                    Connectivity::Four => edge.dir.turn_right(),
                };
                candidates
                    .iter()
                    .copied()
                    .find(|&i| edges[i].dir == wanted)
                    .unwrap_or(candidates[0])
            };

            if next == start || used[next] {
                break;
            }
            current = next;
        }

        rings.push(simplify(&ring));
    }

    rings
}

/// Keeps only the corners of a ring and closes it.
fn simplify(ring: &[(Vertex, Dir)]) -> Vec<Vertex> {
    let n = ring.len();
    let mut corners: Vec<Vertex> = (0..n)
        .filter(|&i| ring[i].1 != ring[(i + n - 1) % n].1)
        .map(|i| ring[i].0)
        .collect();
    if let Some(&first) = corners.first() {
        corners.push(first);
    }
    corners
}

fn to_positions(ring: &[Vertex], transform: &Affine) -> Vec<Position> {
    ring.iter()
        .map(|&(x, y)| transform.apply(x as f64, y as f64))
        .collect()
}

/// Traces every region of a label image into a polygon feature.
///
/// Pixels take part when their value is positive and, if given, the options'
/// mask is set. Connected pixels (per `options.connectivity`) with equal values
/// form one region, which becomes one `Polygon` feature with its holes.
#[instrument(skip(lab, options), fields(shape = ?lab.dim()))]
pub fn labels_to_features<L: Label>(lab: ArrayView2<L>, options: &FeatureOptions) -> Result<Vec<Feature>> {
    let values = lab.mapv(|v| v.label_value());
    let mut mask = values.mapv(|v| v > 0.0);

    if let Some(extra) = &options.mask {
        if extra.dim() != mask.dim() {
            return Err(ProcessingError::ShapeMismatch {
                expected: mask.dim(),
                actual: extra.dim(),
            });
        }
        ndarray::Zip::from(&mut mask).and(extra).for_each(|m, &e| *m = *m && e);
    }

    let transform = options.effective_transform();
    let (ids, region_values) = label_regions(&values, &mask, options.connectivity);
    let regions = collect_edges(&ids, &region_values);
    debug!("Found {} regions", regions.len());

    let features = regions
        .iter()
        .map(|region| {
            let rings = link_rings(&region.edges, options.connectivity)
                .iter()
                .map(|ring| to_positions(ring, &transform))
                .collect();

            let measurements = options.include_labels.then(|| {
                vec![Measurement {
                    name: "Label".to_string(),
                    value: region.value,
                }]
            });

            Feature {
                geometry: Geometry::Polygon(rings),
                properties: FeatureProperties {
                    object_type: options.object_type.clone(),
                    measurements,
                    classification: options.classification.clone(),
                },
            }
        })
        .collect();

    Ok(features)
}
