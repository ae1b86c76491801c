//! Lightweight owned buffers and borrowed views for 8-bit images.
//!
//! Gray images hold one byte per pixel, RGB images three bytes per pixel in
//! `R, G, B` order. Both are row-major with no padding.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Fraction of non-zero pixels, `0.0` for an image without pixels.
    pub fn nonzero_fraction(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.count_nonzero() as f32 / self.data.len() as f32
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major RGB triplets, len = w*h*3
}

impl RgbImageView<'_> {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Copy out the sub-rectangle `[x0, x0 + w) x [y0, y0 + h)`, clamped to the image.
    pub fn crop(&self, x0: usize, y0: usize, w: usize, h: usize) -> RgbImage {
        let x0 = x0.min(self.width);
        let y0 = y0.min(self.height);
        let w = w.min(self.width - x0);
        let h = h.min(self.height - y0);

        let mut data = Vec::with_capacity(w * h * 3);
        for y in y0..y0 + h {
            let start = (y * self.width + x0) * 3;
            data.extend_from_slice(&self.data[start..start + w * 3]);
        }
        RgbImage {
            width: w,
            height: h,
            data,
        }
    }

    /// Luma conversion with the ITU-R BT.601 weights.
    pub fn to_gray(&self) -> GrayImage {
        let data = self
            .data
            .chunks_exact(3)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect();
        GrayImage {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, [0, 0, 0])
    }

    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.view().pixel(x, y)
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Paint an axis-aligned rectangle, clamped to the image.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, rgb: [u8; 3]) {
        let x1 = (x0 + w).min(self.width);
        let y1 = (y0 + h).min(self.height);
        for y in y0.min(y1)..y1 {
            for x in x0.min(x1)..x1 {
                self.put_pixel(x, y, rgb);
            }
        }
    }
}

#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn get_rgb(src: &RgbImageView<'_>, x: i32, y: i32) -> [f32; 3] {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return [0.0; 3];
    }
    let [r, g, b] = src.pixel(x as usize, y as usize);
    [r as f32, g as f32, b as f32]
}

/// Bilinear RGB sample; pixel centers sit on integer coordinates and
/// everything outside the image reads as black.
#[inline]
pub fn sample_bilinear_rgb(src: &RgbImageView<'_>, x: f32, y: f32) -> [u8; 3] {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_rgb(src, x0, y0);
    let p10 = get_rgb(src, x0 + 1, y0);
    let p01 = get_rgb(src, x0, y0 + 1);
    let p11 = get_rgb(src, x0 + 1, y0 + 1);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let a = p00[c] + fx * (p10[c] - p00[c]);
        let b = p01[c] + fx * (p11[c] - p01[c]);
        out[c] = (a + fy * (b - a)).round().clamp(0.0, 255.0) as u8;
    }
    out
}
