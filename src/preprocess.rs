//! Image preparation before the FRC
//!
//! * [diagonal_split]: one image into two half-sampled image pairs
//! * [crop_square]: centered square window
//! * [apply_hanning_2d]: Hanning apodization

use ndarray::{s, Array1, Array2, Axis};
use std::f64::consts::PI;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PreprocessError {
    #[error("image dimensions ({rows}x{cols}) must be divisible by 4")]
    InvalidShape { rows: usize, cols: usize },
    #[error("image must be square, found {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("crop window [{start},{end}) is outside the {rows}x{cols} image")]
    CropOutOfBounds {
        start: isize,
        end: isize,
        rows: usize,
        cols: usize,
    },
    #[error("diagonal split sub-images must share the same shape")]
    SubImageMismatch,
}
type Result<T> = std::result::Result<T, PreprocessError>;

/// Splits an image into 4 sub-images sampled on every other row and column
///
/// The sub-images are returned in the order:
/// `[even rows/even cols, odd rows/odd cols, odd rows/even cols, even rows/odd cols]`,
/// the first two and the last two forming the two diagonal image pairs.
pub fn diagonal_split(img: &Array2<f64>) -> Result<[Array2<f64>; 4]> {
    let (rows, cols) = img.dim();
    if rows % 4 != 0 || cols % 4 != 0 {
        return Err(PreprocessError::InvalidShape { rows, cols });
    }
    let sub = |r0: usize, c0: usize| img.slice(s![r0..;2, c0..;2]).to_owned();
    Ok([sub(0, 0), sub(1, 1), sub(1, 0), sub(0, 1)])
}

/// Re-interleaves the 4 sub-images of [diagonal_split] into the original image
pub fn interleave(parts: &[Array2<f64>; 4]) -> Result<Array2<f64>> {
    let (rows, cols) = parts[0].dim();
    if parts.iter().any(|p| p.dim() != (rows, cols)) {
        return Err(PreprocessError::SubImageMismatch);
    }
    let mut img = Array2::zeros((2 * rows, 2 * cols));
    for (part, (r0, c0)) in parts.iter().zip([(0, 0), (1, 1), (1, 0), (0, 1)]) {
        img.slice_mut(s![r0..;2, c0..;2]).assign(part);
    }
    Ok(img)
}

/// Extracts a `side`x`side` window centered on the image
///
/// The window center is `round(min(rows, cols)/2)` along both axes, moved by
/// `center_offset` pixels.
pub fn crop_square(img: &Array2<f64>, side: usize, center_offset: Option<isize>) -> Result<Array2<f64>> {
    let (rows, cols) = img.dim();
    let center = (rows.min(cols) as f64 / 2f64).round_ties_even() as isize + center_offset.unwrap_or(0);
    let end = center + (side as f64 / 2f64).round_ties_even() as isize;
    let start = end - side as isize;
    if start < 0 || end as usize > rows.min(cols) {
        return Err(PreprocessError::CropOutOfBounds {
            start,
            end,
            rows,
            cols,
        });
    }
    let (start, end) = (start as usize, end as usize);
    Ok(img.slice(s![start..end, start..end]).to_owned())
}

/// Hanning window, identical to `numpy.hanning`
pub fn hanning(n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::ones(1),
        _ => Array1::from_shape_fn(n, |i| 0.5 - 0.5 * (2f64 * PI * i as f64 / (n - 1) as f64).cos()),
    }
}

/// Hanning apodization
///
/// Each row `i` is first weighted by `w[i]`, then the weighted image `h` is
/// combined with its transpose: `out[i,j] = h[i,j] * h[j,i]`.
pub fn apply_hanning_2d(img: &Array2<f64>) -> Result<Array2<f64>> {
    let (rows, cols) = img.dim();
    if rows != cols {
        return Err(PreprocessError::NotSquare { rows, cols });
    }
    let window = hanning(rows).insert_axis(Axis(1));
    let weighted = img * &window;
    Ok(&weighted * &weighted.t())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(rows: usize, cols: usize) -> Array2<f64> {
        Array2::from_shape_fn((rows, cols), |(i, j)| (i * cols + j) as f64)
    }

    #[test]
    fn split_shapes_and_sampling() {
        let img = ramp(8, 12);
        let [a1, a2, b1, b2] = diagonal_split(&img).unwrap();
        for part in [&a1, &a2, &b1, &b2] {
            assert_eq!(part.dim(), (4, 6));
        }
        assert_eq!(a1[[1, 1]], img[[2, 2]]);
        assert_eq!(a2[[1, 1]], img[[3, 3]]);
        assert_eq!(b1[[1, 1]], img[[3, 2]]);
        assert_eq!(b2[[1, 1]], img[[2, 3]]);
    }

    #[test]
    fn split_then_interleave_is_identity() {
        let img = ramp(16, 16);
        let parts = diagonal_split(&img).unwrap();
        assert_eq!(interleave(&parts).unwrap(), img);
    }

    #[test]
    fn split_rejects_non_multiple_of_4() {
        assert_eq!(
            diagonal_split(&ramp(10, 8)).unwrap_err(),
            PreprocessError::InvalidShape { rows: 10, cols: 8 }
        );
    }

    #[test]
    fn centered_crop() {
        let img = ramp(10, 10);
        let crop = crop_square(&img, 4, None).unwrap();
        assert_eq!(crop.dim(), (4, 4));
        // center 5, end 7, start 3
        assert_eq!(crop[[0, 0]], img[[3, 3]]);
        let shifted = crop_square(&img, 4, Some(-2)).unwrap();
        assert_eq!(shifted[[0, 0]], img[[1, 1]]);
    }

    #[test]
    fn crop_rounds_half_to_even() {
        // center round(2.5) = 2, end 2 + round(1.5) = 4
        let img = ramp(5, 7);
        let crop = crop_square(&img, 3, None).unwrap();
        assert_eq!(crop[[0, 0]], img[[1, 1]]);
    }

    #[test]
    fn crop_out_of_bounds() {
        let img = ramp(8, 8);
        assert!(matches!(
            crop_square(&img, 6, Some(3)),
            Err(PreprocessError::CropOutOfBounds { .. })
        ));
    }

    #[test]
    fn hanning_window() {
        let w = hanning(5);
        let expected = [0f64, 0.5, 1.0, 0.5, 0.0];
        for (a, b) in w.iter().zip(expected) {
            assert!((a - b).abs() < 1e-12);
        }
        assert_eq!(hanning(1).to_vec(), vec![1f64]);
        assert!(hanning(0).is_empty());
    }

    #[test]
    fn hanning_apodization() {
        let img = Array2::from_elem((5, 5), 2f64);
        let out = apply_hanning_2d(&img).unwrap();
        let w = hanning(5);
        for ((i, j), v) in out.indexed_iter() {
            assert!((v - 4f64 * w[i] * w[j]).abs() < 1e-12);
        }
        // edges vanish
        assert_eq!(out.row(0).sum(), 0f64);
        assert_eq!(img[[0, 0]], 2f64);
        assert!(matches!(
            apply_hanning_2d(&ramp(4, 6)),
            Err(PreprocessError::NotSquare { rows: 4, cols: 6 })
        ));
    }
}
