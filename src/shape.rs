//! Array rank dispatch and radial distance maps

use std::fmt;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ShapeError {
    #[error("expected a 2D or 3D array, found a {0}D array")]
    UnsupportedDimension(usize),
}
type Result<T> = std::result::Result<T, ShapeError>;

/// Array geometry, resolved once from the array dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    D2 { rows: usize, cols: usize },
    D3 { rows: usize, cols: usize, depth: usize },
}
impl Shape {
    /// Resolves the geometry from the array dimensions
    pub fn from_dims(dims: &[usize]) -> Result<Self> {
        match *dims {
            [rows, cols] => Ok(Shape::D2 { rows, cols }),
            [rows, cols, depth] => Ok(Shape::D3 { rows, cols, depth }),
            _ => Err(ShapeError::UnsupportedDimension(dims.len())),
        }
    }
    pub fn rows(&self) -> usize {
        match *self {
            Shape::D2 { rows, .. } | Shape::D3 { rows, .. } => rows,
        }
    }
    pub fn dims(&self) -> Vec<usize> {
        match *self {
            Shape::D2 { rows, cols } => vec![rows, cols],
            Shape::D3 { rows, cols, depth } => vec![rows, cols, depth],
        }
    }
    /// Number of cells
    pub fn len(&self) -> usize {
        self.dims().into_iter().product()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Euclidean distance of every cell to the array center, in row-major order
    ///
    /// The center of an axis of length `n` is at `floor(n/2)`, the DC location
    /// of a shifted spectrum.
    pub fn distances(&self) -> Vec<f64> {
        let offsets = |n: usize| -> Vec<f64> { (0..n).map(|i| i as f64 - (n / 2) as f64).collect() };
        match *self {
            Shape::D2 { rows, cols } => {
                let (r, c) = (offsets(rows), offsets(cols));
                r.iter()
                    .flat_map(|ri| c.iter().map(move |ci| (ri * ri + ci * ci).sqrt()))
                    .collect()
            }
            Shape::D3 { rows, cols, depth } => {
                let (r, c, z) = (offsets(rows), offsets(cols), offsets(depth));
                r.iter()
                    .flat_map(|ri| {
                        let z = &z;
                        c.iter().flat_map(move |ci| {
                            z.iter().map(move |zi| (ri * ri + ci * ci + zi * zi).sqrt())
                        })
                    })
                    .collect()
            }
        }
    }
    /// Integer radius of every cell, in row-major order
    ///
    /// 3D radii are shifted by one, so the 3D center belongs to ring 1.
    pub fn radius_map(&self) -> Vec<usize> {
        let shift = match self {
            Shape::D2 { .. } => 0,
            Shape::D3 { .. } => 1,
        };
        self.distances()
            .into_iter()
            .map(|d| d.round() as usize + shift)
            .collect()
    }
    /// Number of rings for a given radius map
    ///
    /// Inscribed rings stop at the edge (`rows/2`), extended rings reach the
    /// largest radius of the map.
    pub fn ring_count(&self, radius_map: &[usize], inscribed: bool) -> usize {
        let max_index = if inscribed {
            self.rows() as f64 / 2f64
        } else {
            radius_map.iter().cloned().max().unwrap_or(0) as f64
        };
        max_index.floor() as usize
    }
}
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::D2 { rows, cols } => write!(f, "{}x{}", rows, cols),
            Shape::D3 { rows, cols, depth } => write!(f, "{}x{}x{}", rows, cols, depth),
        }
    }
}
