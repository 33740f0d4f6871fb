//! Interpolated radial profiles
//!
//! A 2D cell at distance `d` from the center contributes to both rings
//! `floor(d)` and `ceil(d)`, and each ring value is half the sum of its
//! contributions. The straddling reduces the aliasing of nearest-integer
//! binning. 3D arrays are binned on the rounded (and shifted) radius only.

use crate::shape::{Shape, ShapeError};
use ndarray::{ArrayD, ArrayView2};
use rayon::prelude::*;
use rustfft::num_complex::Complex64;

type Result<T> = std::result::Result<T, ShapeError>;

/// Radial profile of a 2D or 3D array
pub fn radial_profile<A>(x: &ArrayD<A>, inscribed: bool) -> Result<Vec<Complex64>>
where
    A: Copy + Into<Complex64> + Sync,
{
    let shape = Shape::from_dims(x.shape())?;
    let values: Vec<Complex64> = x.iter().map(|&v| v.into()).collect();
    Ok(profile(shape, &values, inscribed))
}

/// Radial profile of a 2D array
pub fn radial_profile_2d<A>(x: ArrayView2<A>, inscribed: bool) -> Vec<Complex64>
where
    A: Copy + Into<Complex64> + Sync,
{
    let (rows, cols) = x.dim();
    let values: Vec<Complex64> = x.iter().map(|&v| v.into()).collect();
    profile(Shape::D2 { rows, cols }, &values, inscribed)
}

/// Ring bins of every cell: `(floor, ceil)` in 2D, the rounded radius twice in 3D
fn bins(shape: Shape) -> Vec<(usize, usize)> {
    match shape {
        Shape::D2 { .. } => shape
            .distances()
            .into_iter()
            .map(|d| (d.floor() as usize, d.ceil() as usize))
            .collect(),
        Shape::D3 { .. } => shape.radius_map().into_iter().map(|r| (r, r)).collect(),
    }
}

fn profile(shape: Shape, values: &[Complex64], inscribed: bool) -> Vec<Complex64> {
    let n_ring = shape.ring_count(&shape.radius_map(), inscribed);
    let bins = bins(shape);
    let zero = Complex64::new(0f64, 0f64);
    let sums = values
        .par_iter()
        .zip(bins.par_iter())
        .fold(
            || vec![zero; n_ring],
            |mut acc, (&v, &(f, c))| {
                if f < n_ring {
                    acc[f] += v;
                }
                if c < n_ring {
                    acc[c] += v;
                }
                acc
            },
        )
        .reduce(
            || vec![zero; n_ring],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(a, b)| *a += b);
                a
            },
        );
    sums.into_iter().map(|s| s * 0.5).collect()
}
