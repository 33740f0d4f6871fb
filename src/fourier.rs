//! 2D discrete Fourier transform
//!
//! Same convention as `numpy.fft`: the forward transform is not normalized and
//! [fftshift] moves the zero frequency to `(rows/2, cols/2)`.

use ndarray::{Array2, Axis};
use rustfft::{num_complex::Complex64, FftPlanner};

/// Forward 2D FFT of a real array
pub fn fft2(input: &Array2<f64>) -> Array2<Complex64> {
    let (rows, cols) = input.dim();
    let mut planner = FftPlanner::<f64>::new();
    let fft_rows = planner.plan_fft_forward(cols);
    let fft_cols = planner.plan_fft_forward(rows);

    let mut data = input
        .mapv(|v| Complex64::new(v, 0f64))
        .as_standard_layout()
        .to_owned();
    data.axis_iter_mut(Axis(0)).for_each(|mut row| {
        if let Some(row) = row.as_slice_mut() {
            fft_rows.process(row);
        }
    });
    // columns are transformed as the rows of the contiguous transpose
    let mut transposed = data.t().as_standard_layout().to_owned();
    transposed.axis_iter_mut(Axis(0)).for_each(|mut col| {
        if let Some(col) = col.as_slice_mut() {
            fft_cols.process(col);
        }
    });
    transposed.t().as_standard_layout().to_owned()
}

/// Moves the zero-frequency component to the center of the array
pub fn fftshift<T: Copy>(input: &Array2<T>) -> Array2<T> {
    let (rows, cols) = input.dim();
    let (dr, dc) = (rows.div_ceil(2), cols.div_ceil(2));
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        input[[(i + dr) % rows, (j + dc) % cols]]
    })
}

/// Zero-centered spectrum `fftshift(fft2(input))`
pub fn centered_spectrum(input: &Array2<f64>) -> Array2<Complex64> {
    fftshift(&fft2(input))
}
