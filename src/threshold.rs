//! FRC resolution thresholds
//!
//! The threshold curves depend on the number of independent samples `n[r]` in
//! each ring through `s = 1/sqrt(n[r])`.

use std::{convert::Infallible, fmt, str::FromStr};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Threshold of the `em` criterion
pub const EM_THRESHOLD: f64 = 1f64 / 7f64;
/// Constant member of the default threshold bundle
pub const BUNDLE_FIXED_THRESHOLD: f64 = 0.5;
/// Normalization of the radius-zero ring
///
/// The perimeter `2πr` vanishes at `r=0`, the DC ring is given unit weight instead.
pub const RADIUS_ZERO_NORMALIZATION: f64 = 1f64;

/// Named threshold criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum NamedCriterion {
    OneBit,
    HalfBit,
    Em,
}

/// Threshold criterion
///
/// Parsing never fails: strings that are neither a named criterion nor a
/// decimal number select the 4 curves [Criterion::Bundle].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    Named(NamedCriterion),
    Fixed(f64),
    Bundle,
}
impl Default for Criterion {
    fn default() -> Self {
        Criterion::Named(NamedCriterion::HalfBit)
    }
}
/// Decimal literal made of digits and at most one dot
fn parse_decimal(s: &str) -> Option<f64> {
    let digits = s.replace('.', "");
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok()
}
impl FromStr for Criterion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if let Ok(named) = s.parse::<NamedCriterion>() {
            Criterion::Named(named)
        } else if let Some(value) = parse_decimal(s) {
            Criterion::Fixed(value)
        } else {
            log::debug!("unknown threshold {:?}, using the threshold bundle", s);
            Criterion::Bundle
        })
    }
}
impl From<&str> for Criterion {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(criterion) => criterion,
            Err(never) => match never {},
        }
    }
}
impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Named(named) => write!(f, "{}", named),
            Criterion::Fixed(value) => write!(f, "{}", value),
            Criterion::Bundle => write!(f, "bundle"),
        }
    }
}

/// Threshold curve(s) sampled on the FRC radius grid
#[derive(Debug, Clone, PartialEq)]
pub enum Threshold {
    Single(Vec<f64>),
    Bundle([Vec<f64>; 4]),
}
impl Threshold {
    /// Builds the threshold from `inv_sqrt_n = 1/sqrt(n)`
    ///
    /// `info_split` accounts for the information split of the diagonally split
    /// image pairs.
    pub fn new(criterion: Criterion, info_split: bool, inv_sqrt_n: &[f64]) -> Self {
        let curve = |f: fn(f64) -> f64| -> Vec<f64> { inv_sqrt_n.iter().map(|&s| f(s)).collect() };
        let constant = |value: f64| vec![value; inv_sqrt_n.len()];
        let one_bit = if info_split { one_bit_split } else { one_bit };
        match criterion {
            Criterion::Named(NamedCriterion::OneBit) => Threshold::Single(curve(one_bit)),
            Criterion::Named(NamedCriterion::HalfBit) => Threshold::Single(curve(half_bit)),
            Criterion::Named(NamedCriterion::Em) => Threshold::Single(constant(EM_THRESHOLD)),
            Criterion::Fixed(value) => Threshold::Single(constant(value)),
            Criterion::Bundle => Threshold::Bundle([
                curve(one_bit),
                curve(if info_split { twice_split } else { half_bit }),
                constant(EM_THRESHOLD),
                constant(BUNDLE_FIXED_THRESHOLD),
            ]),
        }
    }
    /// Number of curves
    pub fn len(&self) -> usize {
        match self {
            Threshold::Single(_) => 1,
            Threshold::Bundle(_) => 4,
        }
    }
    pub fn is_empty(&self) -> bool {
        false
    }
    /// Curve #`i`
    pub fn curve(&self, i: usize) -> Option<&[f64]> {
        match (self, i) {
            (Threshold::Single(t), 0) => Some(t.as_slice()),
            (Threshold::Bundle(ts), i) => ts.get(i).map(|t| t.as_slice()),
            _ => None,
        }
    }
    pub fn curves(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.len()).filter_map(move |i| self.curve(i))
    }
    /// Legend of each curve
    pub fn labels(criterion: Criterion, info_split: bool) -> Vec<String> {
        match criterion {
            Criterion::Bundle => vec![
                NamedCriterion::OneBit.to_string(),
                if info_split {
                    "half-bit (twice split)".to_string()
                } else {
                    NamedCriterion::HalfBit.to_string()
                },
                NamedCriterion::Em.to_string(),
                BUNDLE_FIXED_THRESHOLD.to_string(),
            ],
            criterion => vec![criterion.to_string()],
        }
    }
}

/// One-bit threshold for independent pixels
pub fn one_bit(s: f64) -> f64 {
    (1f64 + 3f64 * s) / (2f64 + 2f64 * s)
}
/// One-bit threshold with the information split between the half datasets
pub fn one_bit_split(s: f64) -> f64 {
    (0.5 + 2.4142 * s) / (1.5 + 1.4142 * s)
}
/// Half-bit threshold, identical with or without information split
pub fn half_bit(s: f64) -> f64 {
    (0.4142 + 2.287 * s) / (1.4142 + 1.287 * s)
}
/// Half-bit threshold with the information split twice
pub fn twice_split(s: f64) -> f64 {
    (0.2071 + 1.9102 * s) / (1.2071 + 0.9102 * s)
}
