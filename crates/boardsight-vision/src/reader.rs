use crate::{BoardCells, BoardLocalizer, CellClassifier, CornerSet, ReadError, VisionParams};
use boardsight_core::{Occupancy, OccupancyGrid, RgbImageView};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Result of reading one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardReading {
    pub corners: CornerSet,
    pub grid: OccupancyGrid,
}

/// Frame-to-grid pipeline: locate, rectify, split, classify each cell.
pub struct BoardReader {
    localizer: BoardLocalizer,
    classifier: CellClassifier,
}

impl BoardReader {
    pub fn new(params: VisionParams) -> Self {
        Self {
            localizer: BoardLocalizer::new(params.locator),
            classifier: CellClassifier::new(params.classifier),
        }
    }

    #[inline]
    pub fn localizer(&self) -> &BoardLocalizer {
        &self.localizer
    }

    #[inline]
    pub fn classifier(&self) -> &CellClassifier {
        &self.classifier
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn read(&self, frame: &RgbImageView<'_>) -> Result<BoardReading, ReadError> {
        let corners = self.localizer.locate(frame)?;
        let canonical = self.localizer.rectify(frame, &corners)?;
        let cells = self.localizer.split(&canonical);
        let grid = self.classify_cells(&cells);
        debug!(
            "read board: {} light, {} dark",
            grid.count(Occupancy::Light),
            grid.count(Occupancy::Dark)
        );
        Ok(BoardReading { corners, grid })
    }

    pub fn classify_cells(&self, cells: &BoardCells) -> OccupancyGrid {
        OccupancyGrid::from_fn(|p| self.classifier.classify(&cells.get(p).view()))
    }
}
