use crate::MarkerColor;

/// Errors returned by board localization.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// A corner marker could not be isolated in this frame. Expected and
    /// frequent; callers retry on the next frame.
    #[error("board not found: no {marker} corner marker in frame")]
    BoardNotFound { marker: MarkerColor },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RectifyError {
    #[error("board corners are degenerate; no perspective transform exists")]
    DegenerateCorners,
}

/// Errors from the full frame-to-grid pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error(transparent)]
    Rectify(#[from] RectifyError),
}

impl ReadError {
    pub fn is_board_not_found(&self) -> bool {
        matches!(self, ReadError::Locate(LocateError::BoardNotFound { .. }))
    }
}
