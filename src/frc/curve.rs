use crate::threshold::{Criterion, Threshold};
use std::{fmt, path::Path};

/// FRC and threshold curves
///
/// Both curves are sampled on the same normalized spatial frequency grid
/// `x[r] = r/(L/2)`, `L` being the image size.
#[derive(Debug, Clone)]
pub struct FrcCurve {
    /// FRC spatial frequencies
    pub x_fsc: Vec<f64>,
    /// FRC values
    pub fsc: Vec<f64>,
    /// threshold spatial frequencies, identical to `x_fsc`
    pub x_t: Vec<f64>,
    pub threshold: Threshold,
    pub criterion: Criterion,
    pub info_split: bool,
}
impl FrcCurve {
    pub fn len(&self) -> usize {
        self.fsc.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fsc.is_empty()
    }
    /// Legend of each threshold curve
    pub fn labels(&self) -> Vec<String> {
        Threshold::labels(self.criterion, self.info_split)
    }
    /// First spatial frequency where the FRC drops below the threshold curve #`i`
    ///
    /// The DC ring is skipped, the crossing is linearly interpolated between
    /// the bracketing samples.
    pub fn crossing(&self, i: usize) -> Option<f64> {
        let t = self.threshold.curve(i)?;
        let diff: Vec<f64> = self.fsc.iter().zip(t).map(|(f, t)| f - t).collect();
        let r = (1..diff.len()).find(|&r| diff[r] < 0f64)?;
        if r == 1 {
            return Some(self.x_fsc[1]);
        }
        let (d0, d1) = (diff[r - 1], diff[r]);
        let (x0, x1) = (self.x_fsc[r - 1], self.x_fsc[r]);
        Some(x0 + (x1 - x0) * d0 / (d0 - d1))
    }
    /// Writes the curves to a CSV file
    ///
    /// The columns are the spatial frequency, the FRC and the threshold curve(s).
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_path(path)?;
        let mut header = vec!["x".to_string(), "FRC".to_string()];
        header.extend(self.labels().into_iter().map(|l| format!("T {}", l)));
        wtr.write_record(&header)?;
        for (r, (x, fsc)) in self.x_fsc.iter().zip(self.fsc.iter()).enumerate() {
            let mut record = vec![x.to_string(), fsc.to_string()];
            record.extend(self.threshold.curves().map(|t| t[r].to_string()));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
impl fmt::Display for FrcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FRC:")?;
        writeln!(f, " - # of rings: {}", self.len())?;
        writeln!(
            f,
            " - threshold: {}{}",
            self.criterion,
            if self.info_split { " (info. split)" } else { "" }
        )?;
        for (i, label) in self.labels().iter().enumerate() {
            match self.crossing(i) {
                Some(x) => writeln!(f, "  - {:24}: crossing at {:.4} (1/{:.2} px)", label, x, 2f64 / x)?,
                None => writeln!(f, "  - {:24}: no crossing", label)?,
            }
        }
        Ok(())
    }
}
