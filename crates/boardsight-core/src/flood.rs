use crate::GrayImage;

/// Flood-fill the 4-connected same-valued region around each seed with `value`.
///
/// Pixels painted by an earlier seed are not revisited, so seeds that share a
/// region fill it once. Out-of-bounds seeds are ignored.
pub fn flood_fill(img: &mut GrayImage, seeds: &[(usize, usize)], value: u8) {
    let (w, h) = (img.width, img.height);
    let mut filled = vec![false; w * h];
    let mut stack = Vec::new();

    for &(sx, sy) in seeds {
        if sx >= w || sy >= h || filled[sy * w + sx] {
            continue;
        }
        let target = img.get(sx, sy);
        filled[sy * w + sx] = true;
        stack.push((sx, sy));

        while let Some((x, y)) = stack.pop() {
            img.set(x, y, value);

            let mut visit = |nx: usize, ny: usize, stack: &mut Vec<(usize, usize)>| {
                let n = ny * w + nx;
                if !filled[n] && img.data[n] == target {
                    filled[n] = true;
                    stack.push((nx, ny));
                }
            };
            if x > 0 {
                visit(x - 1, y, &mut stack);
            }
            if x + 1 < w {
                visit(x + 1, y, &mut stack);
            }
            if y > 0 {
                visit(x, y - 1, &mut stack);
            }
            if y + 1 < h {
                visit(x, y + 1, &mut stack);
            }
        }
    }
}

/// The four corner pixels of an image, the usual seeds for background fills.
pub fn corner_seeds(width: usize, height: usize) -> [(usize, usize); 4] {
    let (xr, yb) = (width.saturating_sub(1), height.saturating_sub(1));
    [(0, 0), (xr, 0), (0, yb), (xr, yb)]
}
