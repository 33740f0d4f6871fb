//! Fourier Ring Correlation
//!
//! The FRC of two images `i1` and `i2` with centered spectra `I1` and `I2` is
//! the ratio of the ring averaged cross power spectrum to the ring averaged
//! power spectra:
//!
//! `FSC[r] = |C[r]| / sqrt(C1[r] C2[r])`
//!
//! with `C = <I1 I2*>_r`, `C1 = <|I1|^2>_r` and `C2 = <|I2|^2>_r`.
//!
//! ```no_run
//! use ndarray::Array2;
//! use sfrc::FourierRingCorrelation;
//!
//! let (i1, i2) = (Array2::<f64>::zeros((64, 64)), Array2::<f64>::zeros((64, 64)));
//! let frc = FourierRingCorrelation::default()
//!     .threshold("one-bit")
//!     .extended_rings()
//!     .compute(&i1, &i2)?;
//! println!("{}", frc);
//! # Ok::<(), sfrc::FrcError>(())
//! ```

use crate::{
    fourier::centered_spectrum,
    preprocess::{apply_hanning_2d, diagonal_split, PreprocessError},
    radial::radial_profile_2d,
    rings::RingIndexSet,
    shape::Shape,
    threshold::{Criterion, Threshold, RADIUS_ZERO_NORMALIZATION},
};
use ndarray::{Array2, Zip};
use std::{f64::consts::PI, time::Instant};
use strum_macros::Display;

mod curve;
pub use curve::FrcCurve;

/// Reason why a ring normalization vanishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Degeneracy {
    #[strum(serialize = "zero auto power spectrum")]
    AutoPower,
    #[strum(serialize = "empty ring")]
    EmptyRing,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FrcError {
    #[error("input images must have the same dimensions: {0:?} vs {1:?}")]
    ShapeMismatch((usize, usize), (usize, usize)),
    #[error("input images must be square, found {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("ring #{radius} cannot be normalized: {cause}")]
    DegenerateRing { radius: usize, cause: Degeneracy },
    #[error("failed to prepare the images")]
    Preprocess(#[from] PreprocessError),
}
type Result<T> = std::result::Result<T, FrcError>;

/// Handling of rings with a vanishing normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fails with [FrcError::DegenerateRing]
    #[default]
    Error,
    /// Sets the ring FRC (or the ring `1/sqrt(n)`) to zero and logs a warning
    Zero,
}

/// FRC configuration
///
/// Defaults to the half-bit threshold on inscribed rings, with the perimeter
/// based sample count and the information split of diagonally split images.
#[derive(Debug, Clone)]
pub struct FourierRingCorrelation {
    criterion: Criterion,
    inscribed_rings: bool,
    analytical_arc_based: bool,
    info_split: bool,
    hanning: bool,
    degenerate: DegeneratePolicy,
}
impl Default for FourierRingCorrelation {
    fn default() -> Self {
        Self {
            criterion: Criterion::default(),
            inscribed_rings: true,
            analytical_arc_based: true,
            info_split: true,
            hanning: false,
            degenerate: DegeneratePolicy::default(),
        }
    }
}
impl FourierRingCorrelation {
    /// Sets the threshold criterion: `"half-bit"`, `"one-bit"`, `"em"`, a
    /// number like `"0.75"`, anything else for the 4 curves bundle
    pub fn threshold<C: Into<Criterion>>(self, criterion: C) -> Self {
        Self {
            criterion: criterion.into(),
            ..self
        }
    }
    pub fn inscribed_rings(self, inscribed_rings: bool) -> Self {
        Self {
            inscribed_rings,
            ..self
        }
    }
    /// Rings up to the corner of the spectrum
    pub fn extended_rings(self) -> Self {
        self.inscribed_rings(false)
    }
    pub fn analytical_arc_based(self, analytical_arc_based: bool) -> Self {
        Self {
            analytical_arc_based,
            ..self
        }
    }
    /// Ring sample count from the number of pixels in each ring
    pub fn pixel_count(self) -> Self {
        self.analytical_arc_based(false)
    }
    pub fn info_split(self, info_split: bool) -> Self {
        Self { info_split, ..self }
    }
    /// Hanning apodization of both images before the transform
    pub fn hanning(self, hanning: bool) -> Self {
        Self { hanning, ..self }
    }
    pub fn degenerate_policy(self, degenerate: DegeneratePolicy) -> Self {
        Self { degenerate, ..self }
    }
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }
    /// Checks that both images are square with identical dimensions
    pub fn validate(i1: &Array2<f64>, i2: &Array2<f64>) -> Result<usize> {
        if i1.dim() != i2.dim() {
            return Err(FrcError::ShapeMismatch(i1.dim(), i2.dim()));
        }
        let (rows, cols) = i1.dim();
        if rows != cols {
            return Err(FrcError::NotSquare { rows, cols });
        }
        Ok(rows)
    }
    /// Computes the FRC between 2 images
    pub fn compute(&self, i1: &Array2<f64>, i2: &Array2<f64>) -> Result<FrcCurve> {
        let side = Self::validate(i1, i2)?;
        let now = Instant::now();
        log::info!(
            "FRC of {side}x{side} images ({} threshold, {} rings)",
            self.criterion,
            if self.inscribed_rings {
                "inscribed"
            } else {
                "extended"
            }
        );

        let (spectrum_1, spectrum_2) = if self.hanning {
            (
                centered_spectrum(&apply_hanning_2d(i1)?),
                centered_spectrum(&apply_hanning_2d(i2)?),
            )
        } else {
            (centered_spectrum(i1), centered_spectrum(i2))
        };

        let cross = Zip::from(&spectrum_1)
            .and(&spectrum_2)
            .map_collect(|a, b| a * b.conj());
        let real_profile = |x: Array2<f64>| -> Vec<f64> {
            radial_profile_2d(x.view(), self.inscribed_rings)
                .into_iter()
                .map(|v| v.re)
                .collect()
        };
        let c: Vec<f64> = radial_profile_2d(cross.view(), self.inscribed_rings)
            .into_iter()
            .map(|v| v.re)
            .collect();
        let c1 = real_profile(spectrum_1.mapv(|v| v.norm_sqr()));
        let c2 = real_profile(spectrum_2.mapv(|v| v.norm_sqr()));

        let fsc = c
            .iter()
            .zip(c1.iter().zip(c2.iter()))
            .enumerate()
            .map(|(radius, (c, (c1, c2)))| {
                let power = c1 * c2;
                if power > 0f64 {
                    Ok(c.abs() / power.sqrt())
                } else {
                    self.degenerate(radius, Degeneracy::AutoPower)
                }
            })
            .collect::<Result<Vec<f64>>>()?;

        let half_side = side as f64 / 2f64;
        let x_fsc: Vec<f64> = (0..fsc.len()).map(|r| r as f64 / half_side).collect();

        let n = self.ring_samples(side, fsc.len());
        let inv_sqrt_n = n
            .into_iter()
            .enumerate()
            .map(|(radius, n)| {
                if n > 0f64 {
                    Ok(1f64 / n.sqrt())
                } else {
                    self.degenerate(radius, Degeneracy::EmptyRing)
                }
            })
            .collect::<Result<Vec<f64>>>()?;
        let threshold = Threshold::new(self.criterion, self.info_split, &inv_sqrt_n);

        log::info!("... computed in {}ms", now.elapsed().as_millis());
        Ok(FrcCurve {
            x_t: x_fsc.clone(),
            x_fsc,
            fsc,
            threshold,
            criterion: self.criterion,
            info_split: self.info_split,
        })
    }
    /// Sample count `n[r]` of each ring
    ///
    /// Either the ring perimeter `2πr` (with the radius-zero ring set to 1) or
    /// the number of pixels in the ring.
    fn ring_samples(&self, side: usize, n_ring: usize) -> Vec<f64> {
        if self.analytical_arc_based {
            (0..n_ring)
                .map(|r| match r {
                    0 => RADIUS_ZERO_NORMALIZATION,
                    r => 2f64 * PI * r as f64,
                })
                .collect()
        } else {
            let rings = RingIndexSet::from_shape(
                Shape::D2 {
                    rows: side,
                    cols: side,
                },
                self.inscribed_rings,
            );
            let mut n: Vec<f64> = rings.ring_sizes().into_iter().map(|n| n as f64).collect();
            n.resize(n_ring, 0f64);
            n
        }
    }
    fn degenerate(&self, radius: usize, cause: Degeneracy) -> Result<f64> {
        match self.degenerate {
            DegeneratePolicy::Error => Err(FrcError::DegenerateRing { radius, cause }),
            DegeneratePolicy::Zero => {
                log::warn!("ring #{radius}: {cause}, set to 0");
                Ok(0f64)
            }
        }
    }
    /// Single image FRC
    ///
    /// The image is diagonally split into 2 image pairs, the FRC is the mean of
    /// the FRC of both pairs, with the thresholds accounting for the
    /// information split.
    pub fn single_image(&self, img: &Array2<f64>) -> Result<FrcCurve> {
        let [a1, a2, b1, b2] = diagonal_split(img)?;
        let this = Self {
            info_split: true,
            ..self.clone()
        };
        let frc_a = this.compute(&a1, &a2)?;
        let frc_b = this.compute(&b1, &b2)?;
        Ok(FrcCurve {
            fsc: frc_a
                .fsc
                .iter()
                .zip(frc_b.fsc.iter())
                .map(|(a, b)| 0.5 * (a + b))
                .collect(),
            ..frc_a
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::NamedCriterion;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_image(side: usize, seed: u64) -> Array2<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        Array2::from_shape_fn((side, side), |_| rng.gen::<f64>())
    }

    #[test]
    fn self_correlation_is_one() {
        let img = random_image(64, 1);
        let frc = FourierRingCorrelation::default()
            .threshold("half-bit")
            .compute(&img, &img)
            .unwrap();
        assert_eq!(frc.x_fsc.len(), 32);
        assert!(frc.fsc.iter().all(|v| (v - 1f64).abs() < 1e-5));
        assert_eq!(frc.x_fsc, frc.x_t);
        assert!((frc.x_fsc[16] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn extended_self_correlation() {
        let img = random_image(32, 2);
        let frc = FourierRingCorrelation::default()
            .extended_rings()
            .pixel_count()
            .compute(&img, &img)
            .unwrap();
        // corner radius round(sqrt(2) * 16) = 23
        assert_eq!(frc.fsc.len(), 23);
        assert!(frc.fsc.iter().all(|v| (v - 1f64).abs() < 1e-9));
        assert_eq!(frc.threshold.curve(0).unwrap().len(), 23);
    }

    #[test]
    fn independent_images_decorrelate() {
        let frc = FourierRingCorrelation::default()
            .compute(&random_image(64, 3), &random_image(64, 4))
            .unwrap();
        let mean = frc.fsc.iter().skip(8).sum::<f64>() / (frc.fsc.len() - 8) as f64;
        assert!(mean < 0.3, "mean FRC: {}", mean);
    }

    #[test]
    fn dc_ring_is_non_negative() {
        let frc = FourierRingCorrelation::default()
            .compute(&random_image(16, 5), &random_image(16, 6).mapv(|v| -v))
            .unwrap();
        assert!(frc.fsc[0] >= 0f64);
    }

    #[test]
    fn preconditions() {
        let frc = FourierRingCorrelation::default();
        assert_eq!(
            frc.compute(&Array2::zeros((8, 8)), &Array2::zeros((8, 6)))
                .unwrap_err(),
            FrcError::ShapeMismatch((8, 8), (8, 6))
        );
        assert_eq!(
            frc.compute(&Array2::zeros((8, 6)), &Array2::zeros((8, 6)))
                .unwrap_err(),
            FrcError::NotSquare { rows: 8, cols: 6 }
        );
    }

    #[test]
    fn degenerate_rings() {
        let img = Array2::<f64>::zeros((16, 16));
        assert_eq!(
            FourierRingCorrelation::default()
                .compute(&img, &img)
                .unwrap_err(),
            FrcError::DegenerateRing {
                radius: 0,
                cause: Degeneracy::AutoPower
            }
        );
        let frc = FourierRingCorrelation::default()
            .degenerate_policy(DegeneratePolicy::Zero)
            .compute(&img, &img)
            .unwrap();
        assert_eq!(frc.fsc.len(), 8);
        assert!(frc.fsc.iter().all(|&v| v == 0f64));
    }

    #[test]
    fn thresholds_share_the_frc_grid() {
        let img = random_image(32, 7);
        for criterion in ["half-bit", "one-bit", "em", "0.143", "bogus"] {
            for info_split in [true, false] {
                for analytical in [true, false] {
                    let frc = FourierRingCorrelation::default()
                        .threshold(criterion)
                        .info_split(info_split)
                        .analytical_arc_based(analytical)
                        .compute(&img, &img)
                        .unwrap();
                    assert_eq!(frc.x_fsc, frc.x_t);
                    assert!(frc.threshold.curves().all(|t| t.len() == frc.x_t.len()));
                }
            }
        }
    }

    #[test]
    fn pixel_count_and_perimeter_normalizations() {
        let img = random_image(32, 8);
        let analytical = FourierRingCorrelation::default()
            .threshold(Criterion::Named(NamedCriterion::OneBit))
            .info_split(false)
            .compute(&img, &img)
            .unwrap();
        let pixels = FourierRingCorrelation::default()
            .threshold(Criterion::Named(NamedCriterion::OneBit))
            .info_split(false)
            .pixel_count()
            .compute(&img, &img)
            .unwrap();
        // both rings #0 hold a single sample: (1+3)/(2+2)
        let (t_a, t_p) = (
            analytical.threshold.curve(0).unwrap(),
            pixels.threshold.curve(0).unwrap(),
        );
        assert!((t_a[0] - 1f64).abs() < 1e-12);
        assert!((t_p[0] - 1f64).abs() < 1e-12);
        // ring #1 holds 8 pixels vs a 2π perimeter
        assert!((t_p[1] - crate::threshold::one_bit(1f64 / 8f64.sqrt())).abs() < 1e-12);
        assert!((t_a[1] - crate::threshold::one_bit(1f64 / (2f64 * PI).sqrt())).abs() < 1e-12);
    }

    #[test]
    fn hanning_keeps_self_correlation() {
        let img = random_image(32, 9);
        let frc = FourierRingCorrelation::default()
            .hanning(true)
            .compute(&img, &img)
            .unwrap();
        assert!(frc.fsc.iter().all(|v| (v - 1f64).abs() < 1e-9));
    }

    #[test]
    fn single_image_of_a_smooth_image() {
        let img = Array2::from_shape_fn((64, 64), |(i, j)| {
            let (x, y) = (i as f64 / 64f64, j as f64 / 64f64);
            (2f64 * PI * x).sin() * (2f64 * PI * y).cos() + 1f64
        });
        let frc = FourierRingCorrelation::default()
            .info_split(false)
            .degenerate_policy(DegeneratePolicy::Zero)
            .single_image(&img)
            .unwrap();
        assert_eq!(frc.fsc.len(), 16);
        assert!(frc.info_split);
        assert!(frc.fsc[0] > 0.99);
        assert!(frc.fsc[1] > 0.9);
    }

    #[test]
    fn single_image_needs_multiple_of_4() {
        assert_eq!(
            FourierRingCorrelation::default()
                .single_image(&Array2::zeros((30, 30)))
                .unwrap_err(),
            FrcError::Preprocess(PreprocessError::InvalidShape { rows: 30, cols: 30 })
        );
    }
}
