/*!
# Fourier Ring Correlation

Resolution estimation of 2D images from the Fourier Ring Correlation (FRC)
between two images of the same scene, or between the two diagonal image pairs
of a single image.

## Key Components

- [`FourierRingCorrelation`] - FRC configuration and computation
- [`FrcCurve`] - FRC curve with its threshold curve(s) and resolution crossing
- [`RingIndexSet`] - concentric rings of a 2D or 3D array
- [`radial_profile`] - floor/ceil interpolated radial profile
- [`preprocess`] - diagonal split, cropping and Hanning apodization

## Usage

```rust,no_run
use ndarray::Array2;

let img = Array2::<f64>::zeros((256, 256));
// single image FRC with the 4 default threshold curves
let frc = sfrc::single_image_frc(&img, "bundle", true, true)?;
println!("{}", frc);
# Ok::<(), sfrc::Error>(())
```
*/

mod error;
pub mod fourier;
pub mod frc;
#[cfg(feature = "plot")]
pub mod plot;
pub mod preprocess;
pub mod radial;
pub mod rings;
pub mod shape;
pub mod threshold;

pub use error::{Error, Result};
pub use frc::{Degeneracy, DegeneratePolicy, FourierRingCorrelation, FrcCurve, FrcError};
pub use radial::{radial_profile, radial_profile_2d};
pub use rings::{NoSink, RingIndexSet, RingsSink};
pub use shape::{Shape, ShapeError};
pub use threshold::{Criterion, NamedCriterion, Threshold};

use ndarray::Array2;

/// FRC between 2 square images of identical dimensions
///
/// * `thresholding`: `"half-bit"`, `"one-bit"`, `"em"`, a number like `"0.75"`,
///   anything else for the 4 curves bundle
/// * `inscribed_rings`: rings up to the image edge, otherwise up to the corner
/// * `analytical_arc_based`: ring sample count from the ring perimeter,
///   otherwise from the ring pixel count
/// * `info_split`: thresholds accounting for the information split of
///   diagonally split image pairs
pub fn frc(
    i1: &Array2<f64>,
    i2: &Array2<f64>,
    thresholding: &str,
    inscribed_rings: bool,
    analytical_arc_based: bool,
    info_split: bool,
) -> Result<FrcCurve> {
    Ok(FourierRingCorrelation::default()
        .threshold(thresholding)
        .inscribed_rings(inscribed_rings)
        .analytical_arc_based(analytical_arc_based)
        .info_split(info_split)
        .compute(i1, i2)?)
}

/// FRC of a single image from its diagonal split
pub fn single_image_frc(
    img: &Array2<f64>,
    thresholding: &str,
    inscribed_rings: bool,
    analytical_arc_based: bool,
) -> Result<FrcCurve> {
    Ok(FourierRingCorrelation::default()
        .threshold(thresholding)
        .inscribed_rings(inscribed_rings)
        .analytical_arc_based(analytical_arc_based)
        .single_image(img)?)
}
