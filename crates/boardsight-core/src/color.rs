//! HSV conversion and hue-range masks.
//!
//! Values use the 8-bit convention: hue is degrees / 2 in `0..=180`,
//! saturation and value span `0..=255`.

use crate::{GrayImage, RgbImageView};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> Hsv {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let mut h = if delta <= 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    Hsv {
        h: (h / 2.0).round().clamp(0.0, 180.0) as u8,
        s: s.round().clamp(0.0, 255.0) as u8,
        v: max as u8,
    }
}

/// Inclusive box in HSV space, bounds given as `[h, s, v]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower[0]..=self.upper[0]).contains(&hsv.h)
            && (self.lower[1]..=self.upper[1]).contains(&hsv.s)
            && (self.lower[2]..=self.upper[2]).contains(&hsv.v)
    }
}

/// Binary mask (255 inside) of pixels falling into any of `ranges`.
///
/// Hues that wrap around 0 are expressed as two ranges.
pub fn hsv_mask(src: &RgbImageView<'_>, ranges: &[HsvRange]) -> GrayImage {
    let data = src
        .data
        .chunks_exact(3)
        .map(|px| {
            let hsv = rgb_to_hsv([px[0], px[1], px[2]]);
            if ranges.iter().any(|r| r.contains(hsv)) {
                255
            } else {
                0
            }
        })
        .collect();
    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}
