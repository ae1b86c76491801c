//! Occupancy classification of a single board cell.
//!
//! The corner pixels of the inner crop always belong to the cell's
//! background. Flood-filling from them with a trial tone and checking for a
//! single-tone result tells which tone the background is, and the piece
//! color follows by elimination.

use crate::{ClassifierParams, FillTone};
use boardsight_core::{corner_seeds, flood_fill, threshold_binary, GrayImage, Occupancy, RgbImageView};
use log::trace;

#[cfg(feature = "tracing")]
use tracing::instrument;

pub struct CellClassifier {
    params: ClassifierParams,
}

impl CellClassifier {
    pub fn new(params: ClassifierParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    /// Classify one cell image. Always returns one of the three states.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, cell), fields(width = cell.width, height = cell.height))
    )]
    pub fn classify(&self, cell: &RgbImageView<'_>) -> Occupancy {
        let binary = self.binarize(cell);
        if self.is_uniform(&binary) {
            return Occupancy::Empty;
        }

        let seeds = corner_seeds(binary.width, binary.height);
        for tone in self.params.trial_order {
            // each trial starts from the untouched binary image
            let mut trial = binary.clone();
            flood_fill(&mut trial, &seeds, tone.value());
            if self.is_uniform(&trial) {
                return tone.occupancy();
            }
        }

        trace!(
            "two-tone residue after both fills (foreground {:.3}), assuming dark",
            binary.nonzero_fraction()
        );
        Occupancy::Dark
    }

    /// Inner crop, converted to gray and binarized.
    fn binarize(&self, cell: &RgbImageView<'_>) -> GrayImage {
        let inset = self.params.inset_frac;
        let (w, h) = (cell.width as f64, cell.height as f64);
        let x0 = (w * inset) as usize;
        let x1 = (w * (1.0 - inset)) as usize;
        let y0 = (h * inset) as usize;
        let y1 = (h * (1.0 - inset)) as usize;

        let inner = cell.crop(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0));
        threshold_binary(&inner.view().to_gray(), self.params.binary_threshold)
    }

    fn is_uniform(&self, binary: &GrayImage) -> bool {
        let fraction = binary.nonzero_fraction();
        fraction < self.params.uniform_low || fraction > self.params.uniform_high
    }
}
