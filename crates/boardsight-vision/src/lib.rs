//! Board recognition from a single camera frame.
//!
//! Pipeline:
//! 1. [`BoardLocalizer::locate`] finds the four colored corner markers and
//!    nudges them onto the board edge.
//! 2. [`BoardLocalizer::rectify`] warps the board onto a fixed canonical
//!    rectangle.
//! 3. [`BoardLocalizer::split`] cuts the rectangle into 64 cells.
//! 4. [`CellClassifier::classify`] labels each cell empty, light or dark.
//!
//! [`BoardReader`] runs all four steps and returns an `OccupancyGrid`.
//! All tuning constants live in [`VisionParams`].

mod classify;
mod error;
mod locate;
mod params;
mod reader;
mod types;

pub use classify::CellClassifier;
pub use error::{LocateError, ReadError, RectifyError};
pub use locate::{BoardCells, BoardLocalizer};
pub use params::{
    CanonicalSize, ClassifierParams, CornerAdjust, FillTone, LocatorParams, MarkerParams,
    VisionParams,
};
pub use reader::{BoardReader, BoardReading};
pub use types::{CornerSet, MarkerColor, Point};
