//! Connected foreground regions of binary masks.

use crate::GrayImage;
use serde::{Deserialize, Serialize};

/// One 8-connected foreground component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Number of pixels in the component.
    pub area: usize,
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl Region {
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    /// Center of the bounding box, rounded down.
    pub fn center(&self) -> (usize, usize) {
        (
            self.min_x + self.width() / 2,
            self.min_y + self.height() / 2,
        )
    }
}

/// Label all 8-connected components of non-zero pixels.
///
/// Regions are returned in scan order of their first pixel.
pub fn connected_regions(mask: &GrayImage) -> Vec<Region> {
    let (w, h) = (mask.width, mask.height);
    let mut seen = vec![false; w * h];
    let mut stack = Vec::new();
    let mut out = Vec::new();

    for start in 0..w * h {
        if seen[start] || mask.data[start] == 0 {
            continue;
        }
        seen[start] = true;
        stack.push(start);

        let mut region = Region {
            area: 0,
            min_x: start % w,
            min_y: start / w,
            max_x: start % w,
            max_y: start / w,
        };

        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % w, idx / w);
            region.area += 1;
            region.min_x = region.min_x.min(x);
            region.max_x = region.max_x.max(x);
            region.min_y = region.min_y.min(y);
            region.max_y = region.max_y.max(y);

            for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    let n = ny * w + nx;
                    if !seen[n] && mask.data[n] != 0 {
                        seen[n] = true;
                        stack.push(n);
                    }
                }
            }
        }
        out.push(region);
    }

    out
}

/// Largest component by pixel count; ties keep the one found first.
pub fn largest_region(mask: &GrayImage) -> Option<Region> {
    connected_regions(mask)
        .into_iter()
        .fold(None, |best: Option<Region>, r| match best {
            Some(b) if b.area >= r.area => Some(b),
            _ => Some(r),
        })
}
