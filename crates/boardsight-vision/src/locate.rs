//! Board localization from four colored corner markers.
//!
//! 1. Convert the frame to HSV and build one binary mask per marker hue.
//! 2. Box-blur and re-threshold each mask to drop speckle.
//! 3. Take the bounding-box center of the largest connected region as the
//!    raw marker position. A marker without any region fails the frame.
//! 4. Nudge each raw point toward the board edge by per-corner fractions.
//!
//! [`BoardLocalizer::rectify`] then warps the quadrilateral onto the
//! canonical rectangle and [`BoardLocalizer::split`] cuts it into 64 cells.

use crate::{CanonicalSize, CornerSet, LocateError, LocatorParams, MarkerParams, Point, RectifyError};
use boardsight_core::{
    box_blur, homography_from_4pt, hsv_mask, largest_region, threshold_binary,
    warp_perspective_rgb, RgbImage, RgbImageView, SquarePosition, BOARD_SIZE,
};
use log::debug;
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// The 64 cell images of a rectified board, row-major.
#[derive(Clone, Debug)]
pub struct BoardCells {
    cells: Vec<RgbImage>,
}

impl BoardCells {
    pub fn get(&self, p: SquarePosition) -> &RgbImage {
        &self.cells[p.row * BOARD_SIZE + p.col]
    }

    /// Cells paired with their square, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (SquarePosition, &RgbImage)> {
        SquarePosition::all().zip(self.cells.iter())
    }
}

pub struct BoardLocalizer {
    params: LocatorParams,
}

impl BoardLocalizer {
    pub fn new(params: LocatorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &LocatorParams {
        &self.params
    }

    /// Find the four board corners, or fail on the first missing marker.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn locate(&self, image: &RgbImageView<'_>) -> Result<CornerSet, LocateError> {
        let mut raw = [Point::new(0, 0); 4];
        for (slot, marker) in raw.iter_mut().zip(self.params.markers()) {
            *slot = self
                .find_marker(image, marker)
                .ok_or(LocateError::BoardNotFound {
                    marker: marker.color,
                })?;
        }
        debug!("raw marker centers: {raw:?}");

        let corners = adjust_corners(&raw, &self.params);
        debug!("board corners: {corners:?}");
        Ok(corners)
    }

    fn find_marker(&self, image: &RgbImageView<'_>, marker: &MarkerParams) -> Option<Point> {
        let mask = hsv_mask(image, &marker.hsv_ranges);
        let cleaned = threshold_binary(
            &box_blur(&mask, self.params.blur_kernel),
            self.params.mask_threshold,
        );
        let region = largest_region(&cleaned)?;
        let (x, y) = region.center();
        Some(Point::new(x as i32, y as i32))
    }

    /// Warp the board quadrilateral onto the canonical rectangle.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, image)))]
    pub fn rectify(
        &self,
        image: &RgbImageView<'_>,
        corners: &CornerSet,
    ) -> Result<RgbImage, RectifyError> {
        let CanonicalSize { width, height } = self.params.canonical;
        let (w, h) = (width as f32, height as f32);
        let rect = [
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(0.0, h),
            Point2::new(w, h),
        ];
        let img = corners
            .to_array()
            .map(|p| Point2::new(p.x as f32, p.y as f32));

        let h_img_from_rect =
            homography_from_4pt(&rect, &img).ok_or(RectifyError::DegenerateCorners)?;
        Ok(warp_perspective_rgb(image, h_img_from_rect, width, height))
    }

    /// Cut the canonical image into 8x8 equal cells; row = vertical eighth.
    pub fn split(&self, canonical: &RgbImage) -> BoardCells {
        let cw = self.params.canonical.cell_width();
        let ch = self.params.canonical.cell_height();
        let view = canonical.view();
        let cells = SquarePosition::all()
            .map(|p| view.crop(p.col * cw, p.row * ch, cw, ch))
            .collect();
        BoardCells { cells }
    }
}

fn nudge(p: Point, horizontal: Point, vertical: Point, params: &MarkerParams) -> Point {
    let a = params.adjust;
    let shift = |c: i32, ch: i32, cv: i32| {
        let c = c as f64;
        (c + (c - ch as f64) * a.along_row - (c - cv as f64) * a.along_column) as i32
    };
    Point::new(
        shift(p.x, horizontal.x, vertical.x),
        shift(p.y, horizontal.y, vertical.y),
    )
}

/// Move raw marker centers (UL, UR, LL, LR) onto the board edge.
pub(crate) fn adjust_corners(raw: &[Point; 4], params: &LocatorParams) -> CornerSet {
    let [ul, ur, ll, lr] = *raw;
    CornerSet {
        upper_left: nudge(ul, ur, ll, &params.upper_left),
        upper_right: nudge(ur, ul, lr, &params.upper_right),
        lower_left: nudge(ll, lr, ul, &params.lower_left),
        lower_right: nudge(lr, ll, ur, &params.lower_right),
    }
}
