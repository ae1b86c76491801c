//! Core types and image utilities for physical chessboard recognition.
//!
//! This crate is intentionally small. It owns the pixel buffers, the color
//! and mask primitives used by the board localizer and cell classifier, the
//! perspective geometry, and the occupancy data model shared with move
//! inference. It does not depend on any image decoding crate.

mod color;
mod filter;
mod flood;
mod homography;
mod image;
mod logger;
mod occupancy;
mod regions;

pub use color::{hsv_mask, rgb_to_hsv, Hsv, HsvRange};
pub use filter::{box_blur, threshold_binary};
pub use flood::{corner_seeds, flood_fill};
pub use homography::{homography_from_4pt, warp_perspective_rgb, Homography};
pub use image::{luma, sample_bilinear_rgb, GrayImage, RgbImage, RgbImageView};
pub use occupancy::{
    render_grid, OffBoardSquare, Occupancy, OccupancyGrid, SquarePosition, BOARD_SIZE,
};
pub use regions::{connected_regions, largest_region, Region};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
