use crate::core::RgbImageView;
use crate::moves::{infer_move, MoveCandidate};
use crate::vision::{BoardReader, BoardReading, ReadError};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the image-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("failed to load image {path}: {source}")]
    Load {
        path: String,
        source: ::image::ImageError,
    },

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Infer(#[from] crate::moves::InferError),
}

/// Borrow an `image::RgbImage` as the lightweight `boardsight-core` view type.
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Decode any supported image file into 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<::image::RgbImage, DetectError> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|source| DetectError::Load {
        path: path.display().to_string(),
        source,
    })?;
    Ok(img.to_rgb8())
}

#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(reader, img), fields(width = img.width(), height = img.height()))
)]
pub fn read_board(reader: &BoardReader, img: &::image::RgbImage) -> Result<BoardReading, DetectError> {
    Ok(reader.read(&rgb_view(img))?)
}

/// Read two frames and infer the geometric move between them.
pub fn infer_from_images(
    reader: &BoardReader,
    before: &::image::RgbImage,
    after: &::image::RgbImage,
) -> Result<MoveCandidate, DetectError> {
    let old = read_board(reader, before)?;
    let new = read_board(reader, after)?;
    Ok(infer_move(&old.grid, &new.grid)?)
}
