use crate::MarkerColor;
use boardsight_core::{HsvRange, Occupancy, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// Fractional nudge applied to a raw marker centroid.
///
/// With `h` the horizontally adjacent marker and `v` the vertically adjacent
/// one, the corner becomes `p + (p - h) * along_row - (p - v) * along_column`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornerAdjust {
    pub along_row: f64,
    pub along_column: f64,
}

/// One corner marker: its hue, the HSV boxes that select it, and its nudge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerParams {
    pub color: MarkerColor,
    /// Union of inclusive HSV boxes. Red needs two because its hue wraps.
    pub hsv_ranges: Vec<HsvRange>,
    pub adjust: CornerAdjust,
}

/// Size of the rectified top-down board image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSize {
    pub width: usize,
    pub height: usize,
}

impl CanonicalSize {
    pub fn cell_width(&self) -> usize {
        self.width / BOARD_SIZE
    }

    pub fn cell_height(&self) -> usize {
        self.height / BOARD_SIZE
    }
}

impl Default for CanonicalSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Board localizer configuration. Calibrated for one marker set and one
/// lighting setup; treat the defaults as a starting point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorParams {
    pub upper_left: MarkerParams,
    pub upper_right: MarkerParams,
    pub lower_left: MarkerParams,
    pub lower_right: MarkerParams,
    /// Side of the box filter applied to each hue mask.
    pub blur_kernel: usize,
    /// Blurred mask values above this survive.
    pub mask_threshold: u8,
    pub canonical: CanonicalSize,
}

impl LocatorParams {
    /// Markers in corner order: upper-left, upper-right, lower-left, lower-right.
    pub fn markers(&self) -> [&MarkerParams; 4] {
        [
            &self.upper_left,
            &self.upper_right,
            &self.lower_left,
            &self.lower_right,
        ]
    }
}

impl Default for LocatorParams {
    fn default() -> Self {
        Self {
            upper_left: MarkerParams {
                color: MarkerColor::Red,
                hsv_ranges: vec![
                    HsvRange::new([160, 60, 100], [180, 255, 255]),
                    HsvRange::new([0, 60, 100], [10, 255, 255]),
                ],
                adjust: CornerAdjust {
                    along_row: 0.0,
                    along_column: 0.05,
                },
            },
            upper_right: MarkerParams {
                color: MarkerColor::Green,
                hsv_ranges: vec![HsvRange::new([60, 60, 100], [90, 255, 255])],
                adjust: CornerAdjust {
                    along_row: 0.08,
                    along_column: 0.05,
                },
            },
            lower_left: MarkerParams {
                color: MarkerColor::Blue,
                hsv_ranges: vec![HsvRange::new([90, 100, 100], [120, 255, 255])],
                adjust: CornerAdjust {
                    along_row: 0.02,
                    along_column: 0.05,
                },
            },
            lower_right: MarkerParams {
                color: MarkerColor::Pink,
                hsv_ranges: vec![HsvRange::new([130, 30, 100], [160, 255, 255])],
                adjust: CornerAdjust {
                    along_row: 0.08,
                    along_column: 0.05,
                },
            },
            blur_kernel: 10,
            mask_threshold: 200,
            canonical: CanonicalSize::default(),
        }
    }
}

/// Trial background color used when flood-filling a cell from its corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillTone {
    Dark,
    Light,
}

impl FillTone {
    pub(crate) fn value(self) -> u8 {
        match self {
            FillTone::Dark => 0,
            FillTone::Light => 255,
        }
    }

    /// Occupancy implied when this fill leaves the cell uniform.
    pub(crate) fn occupancy(self) -> Occupancy {
        match self {
            FillTone::Dark => Occupancy::Dark,
            FillTone::Light => Occupancy::Light,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Fraction of the cell discarded on each side before classifying.
    pub inset_frac: f64,
    /// Gray values above this are foreground.
    pub binary_threshold: u8,
    /// Foreground fractions below `uniform_low` or above `uniform_high`
    /// count as a single-tone cell.
    pub uniform_low: f32,
    pub uniform_high: f32,
    pub trial_order: [FillTone; 2],
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            inset_frac: 0.15,
            binary_threshold: 125,
            uniform_low: 0.05,
            uniform_high: 0.95,
            trial_order: [FillTone::Dark, FillTone::Light],
        }
    }
}

/// Everything the vision pipeline needs, passed in at construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionParams {
    pub locator: LocatorParams,
    pub classifier: ClassifierParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_cells_tile_the_default_rectangle() {
        let c = CanonicalSize::default();
        assert_eq!((c.cell_width(), c.cell_height()), (80, 60));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: VisionParams =
            serde_json::from_str(r#"{ "classifier": { "binary_threshold": 110 } }"#)
                .expect("parse");
        assert_eq!(params.classifier.binary_threshold, 110);
        assert_eq!(params.classifier.inset_frac, 0.15);
        assert_eq!(params.locator, LocatorParams::default());
    }

    #[test]
    fn markers_come_in_corner_order() {
        let p = LocatorParams::default();
        let colors: Vec<MarkerColor> = p.markers().iter().map(|m| m.color).collect();
        assert_eq!(
            colors,
            vec![
                MarkerColor::Red,
                MarkerColor::Green,
                MarkerColor::Blue,
                MarkerColor::Pink
            ]
        );
    }
}
