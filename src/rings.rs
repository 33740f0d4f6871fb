//! Concentric ring indexing
//!
//! Groups the cells of a 2D or 3D array by their integer distance to the
//! array center. The ring sizes give the empirical sample count of each
//! spatial frequency used by the pixel-count threshold normalization.

use crate::shape::{Shape, ShapeError};
use itertools::Itertools;
use ndarray::Array2;

/// Ring spacing of the diagnostic mask
pub const DIAGNOSTIC_RING_SPACING: usize = 20;

/// Visualization collaborator for the ring diagnostic mask
pub trait RingsSink {
    fn render(&self, mask: &Array2<bool>, title: &str);
}
/// Sink that discards the diagnostic mask
pub struct NoSink;
impl RingsSink for NoSink {
    fn render(&self, _mask: &Array2<bool>, _title: &str) {}
}

/// Cells of an array grouped by integer radius
///
/// Ring `r` holds the row-major flat indices of all the cells at radius `r`.
#[derive(Debug, Clone)]
pub struct RingIndexSet {
    shape: Shape,
    inscribed: bool,
    rings: Vec<Vec<usize>>,
}
impl RingIndexSet {
    /// Builds the rings for an array of the given dimensions
    pub fn new(dims: &[usize], inscribed: bool) -> Result<Self, ShapeError> {
        Ok(Self::from_shape(Shape::from_dims(dims)?, inscribed))
    }
    /// Builds the rings for the given shape
    pub fn from_shape(shape: Shape, inscribed: bool) -> Self {
        let radius = shape.radius_map();
        let n_ring = shape.ring_count(&radius, inscribed);
        let mut groups = radius
            .into_iter()
            .enumerate()
            .filter(|&(_, r)| r < n_ring)
            .map(|(idx, r)| (r, idx))
            .into_group_map();
        let rings: Vec<_> = (0..n_ring)
            .map(|r| groups.remove(&r).unwrap_or_default())
            .collect();
        log::debug!(
            "{} rings for a {} array ({})",
            rings.len(),
            shape,
            if inscribed { "inscribed" } else { "extended" }
        );
        Self {
            shape,
            inscribed,
            rings,
        }
    }
    /// Builds the rings and hands the diagnostic mask to `sink`
    pub fn with_sink(
        dims: &[usize],
        inscribed: bool,
        sink: &dyn RingsSink,
    ) -> Result<Self, ShapeError> {
        let this = Self::new(dims, inscribed)?;
        this.render(sink);
        Ok(this)
    }
    pub fn shape(&self) -> Shape {
        self.shape
    }
    pub fn len(&self) -> usize {
        self.rings.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
    /// Flat indices of ring `r`
    pub fn ring(&self, r: usize) -> Option<&[usize]> {
        self.rings.get(r).map(|ring| ring.as_slice())
    }
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.rings.iter().map(|ring| ring.as_slice())
    }
    /// Number of cells in each ring
    pub fn ring_sizes(&self) -> Vec<usize> {
        self.rings.iter().map(|ring| ring.len()).collect()
    }
    /// Mask lighting every `spacing`-th ring of the first 2D plane
    ///
    /// For a 3D array, the mask is the `(rows, cols)` slice at depth 0.
    pub fn mask(&self, spacing: usize) -> Array2<bool> {
        let dims = self.shape.dims();
        let (rows, cols) = (dims[0], dims[1]);
        let plane: usize = dims.iter().skip(2).product();
        let mut mask = Array2::from_elem((rows, cols), false);
        for ring in self.rings.iter().step_by(spacing.max(1)) {
            for &idx in ring.iter().filter(|&&idx| idx % plane == 0) {
                let cell = idx / plane;
                mask[[cell / cols, cell % cols]] = true;
            }
        }
        mask
    }
    /// Sends the diagnostic mask to the visualization sink
    pub fn render(&self, sink: &dyn RingsSink) {
        let title = if self.inscribed {
            "FRC rings with the max radius as that of the inscribed circle in the image \
             (spacing of 20 [px] between rings)"
        } else {
            "FRC rings extending beyond the radius of the inscribed circle in the image \
             (spacing of 20 [px] between rings)"
        };
        sink.render(&self.mask(DIAGNOSTIC_RING_SPACING), title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn inscribed_rings_partition_the_inscribed_disk() {
        let rings = RingIndexSet::new(&[32, 32], true).unwrap();
        assert_eq!(rings.len(), 16);
        let radius = rings.shape().radius_map();
        let mut seen = vec![0usize; 32 * 32];
        for (r, ring) in rings.iter().enumerate() {
            for &idx in ring {
                assert_eq!(radius[idx], r);
                seen[idx] += 1;
            }
        }
        for (idx, count) in seen.into_iter().enumerate() {
            let expected = if radius[idx] < 16 { 1 } else { 0 };
            assert_eq!(count, expected, "cell {}", idx);
        }
    }

    #[test]
    fn extended_rings_reach_the_corner() {
        let rings = RingIndexSet::new(&[8, 8], false).unwrap();
        assert_eq!(rings.len(), 6);
        assert_eq!(rings.ring_sizes()[0], 1);
        assert_eq!(rings.ring_sizes()[1], 8);
        // the corner cell sits at radius 6, beyond the last ring
        let total: usize = rings.ring_sizes().iter().sum();
        assert_eq!(total, 64 - 1);
    }

    #[test]
    fn three_dimensional_first_ring_is_empty() {
        let rings = RingIndexSet::new(&[6, 6, 6], true).unwrap();
        assert_eq!(rings.len(), 3);
        assert_eq!(rings.ring_sizes()[0], 0);
        assert_eq!(rings.ring_sizes()[1], 1);
    }

    #[test]
    fn unsupported_rank() {
        assert_eq!(
            RingIndexSet::new(&[10], true).unwrap_err(),
            ShapeError::UnsupportedDimension(1)
        );
    }

    struct Recorder(RefCell<Vec<(usize, String)>>);
    impl RingsSink for Recorder {
        fn render(&self, mask: &Array2<bool>, title: &str) {
            let lit = mask.iter().filter(|&&x| x).count();
            self.0.borrow_mut().push((lit, title.to_string()));
        }
    }

    #[test]
    fn diagnostic_mask_lights_every_twentieth_ring() {
        let recorder = Recorder(RefCell::new(vec![]));
        let rings = RingIndexSet::with_sink(&[64, 64], true, &recorder).unwrap();
        let sizes = rings.ring_sizes();
        let calls = recorder.0.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, sizes[0] + sizes[20]);
        assert!(calls[0].1.contains("inscribed"));
        let quiet = RingIndexSet::with_sink(&[64, 64], true, &NoSink).unwrap();
        assert_eq!(quiet.ring_sizes(), sizes);
    }
}
