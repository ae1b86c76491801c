//! Box blur and global thresholding for 8-bit masks.

use crate::GrayImage;

/// Normalized `k x k` box blur.
///
/// The window spans `[x - k/2, x + k - k/2)`. Samples outside the image are
/// mirrored without repeating the edge pixel (`dcb|abcd|cba`), so a marker
/// cut by the frame edge keeps the same mask density it would have inside.
pub fn box_blur(src: &GrayImage, k: usize) -> GrayImage {
    if k <= 1 || src.is_empty() {
        return src.clone();
    }
    let (w, h) = (src.width, src.height);
    let before = k / 2;

    // horizontal window sums
    let mut rows = vec![0u32; w * h];
    for y in 0..h {
        for x in 0..w {
            rows[y * w + x] = (0..k)
                .map(|i| src.get(reflect_101(x + i, before, w), y) as u32)
                .sum();
        }
    }

    let count = (k * k) as u32;
    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let sum: u32 = (0..k)
                .map(|i| rows[reflect_101(y + i, before, h) * w + x])
                .sum();
            out.set(x, y, ((sum + count / 2) / count) as u8);
        }
    }
    out
}

/// Index `shifted - before` mirrored into `0..n` around the edge pixels.
fn reflect_101(shifted: usize, before: usize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1) as isize;
    let m = (shifted as isize - before as isize).rem_euclid(period) as usize;
    if m >= n {
        period as usize - m
    } else {
        m
    }
}

/// Binary threshold: pixels strictly above `thresh` become 255, the rest 0.
pub fn threshold_binary(src: &GrayImage, thresh: u8) -> GrayImage {
    GrayImage {
        width: src.width,
        height: src.height,
        data: src
            .data
            .iter()
            .map(|&v| if v > thresh { 255 } else { 0 })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_preserves_uniform_images() {
        let img = GrayImage::filled(7, 5, 180);
        assert_eq!(box_blur(&img, 4), img);
    }

    #[test]
    fn blur_removes_isolated_specks_after_threshold() {
        let mut img = GrayImage::new(20, 20);
        img.set(10, 10, 255);
        let cleaned = threshold_binary(&box_blur(&img, 10), 200);
        assert_eq!(cleaned.count_nonzero(), 0);
    }

    #[test]
    fn blur_keeps_the_core_of_a_large_blob() {
        let mut img = GrayImage::new(40, 40);
        for y in 10..30 {
            for x in 10..30 {
                img.set(x, y, 255);
            }
        }
        let cleaned = threshold_binary(&box_blur(&img, 10), 200);
        assert_eq!(cleaned.get(20, 20), 255);
        assert_eq!(cleaned.get(10, 10), 0);
    }

    #[test]
    fn border_samples_are_mirrored() {
        assert_eq!(reflect_101(0, 1, 5), 1);
        assert_eq!(reflect_101(1, 1, 5), 0);
        assert_eq!(reflect_101(6, 1, 5), 3);

        // x = 0 averages [0, 100, 0] (mirrored left neighbour) rather than the
        // clipped [100, 0]
        let img = GrayImage {
            width: 5,
            height: 1,
            data: vec![100, 0, 0, 0, 0],
        };
        let blurred = box_blur(&img, 3);
        assert_eq!(blurred.data, vec![33, 33, 0, 0, 0]);
    }

    #[test]
    fn threshold_is_strict() {
        let img = GrayImage {
            width: 3,
            height: 1,
            data: vec![125, 126, 0],
        };
        assert_eq!(threshold_binary(&img, 125).data, vec![0, 255, 0]);
    }
}
