#![allow(dead_code)]

use boardsight::core::{homography_from_4pt, Occupancy, OccupancyGrid, SquarePosition};
use boardsight::vision::{BoardLocalizer, LocatorParams};
use image::{Rgb, RgbImage};
use nalgebra::Point2;

pub const BACKGROUND: Rgb<u8> = Rgb([90, 90, 90]);
const LIGHT_SQUARE: Rgb<u8> = Rgb([200, 200, 200]);
const DARK_SQUARE: Rgb<u8> = Rgb([60, 60, 60]);
const PIECE_DARK: Rgb<u8> = Rgb([30, 30, 30]);
const PIECE_LIGHT: Rgb<u8> = Rgb([235, 235, 235]);

pub fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in y0..(y0 + h).min(img.height()) {
        for x in x0..(x0 + w).min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn canonical_board(grid: &OccupancyGrid) -> RgbImage {
    let mut img = RgbImage::new(640, 480);
    for p in SquarePosition::all() {
        let (x0, y0) = (p.col as u32 * 80, p.row as u32 * 60);
        let square = if (p.row + p.col) % 2 == 0 {
            LIGHT_SQUARE
        } else {
            DARK_SQUARE
        };
        fill_rect(&mut img, x0, y0, 80, 60, square);

        let (token, center) = match grid[p] {
            Occupancy::Empty => continue,
            Occupancy::Light => (PIECE_DARK, PIECE_LIGHT),
            Occupancy::Dark => (PIECE_LIGHT, PIECE_DARK),
        };
        fill_rect(&mut img, x0 + 4, y0 + 4, 72, 52, token);
        fill_rect(&mut img, x0 + 25, y0 + 18, 30, 24, center);
    }
    img
}

/// 640x480 camera frame: four corner markers and the board seen in perspective.
pub fn scene(grid: &OccupancyGrid) -> RgbImage {
    let mut img = RgbImage::from_pixel(640, 480, BACKGROUND);
    let markers = [
        ((100, 100), Rgb([255, 0, 0])),
        ((540, 100), Rgb([0, 255, 0])),
        ((100, 400), Rgb([0, 0, 255])),
        ((540, 400), Rgb([255, 0, 255])),
    ];
    for ((cx, cy), color) in markers {
        fill_rect(&mut img, cx - 12, cy - 12, 24, 24, color);
    }

    let corners = BoardLocalizer::new(LocatorParams::default())
        .locate(&boardsight::detect::rgb_view(&img))
        .expect("markers");
    let img_pts = corners
        .to_array()
        .map(|p| Point2::new(p.x as f32, p.y as f32));
    let rect_pts = [
        Point2::new(0.0_f32, 0.0),
        Point2::new(640.0, 0.0),
        Point2::new(0.0, 480.0),
        Point2::new(640.0, 480.0),
    ];
    let h = homography_from_4pt(&img_pts, &rect_pts).expect("homography");

    let board = canonical_board(grid);
    for y in 0..img.height() {
        for x in 0..img.width() {
            let q = h.apply(Point2::new(x as f32 + 0.5, y as f32 + 0.5));
            if q.x >= 0.0 && q.y >= 0.0 && q.x < 640.0 && q.y < 480.0 {
                img.put_pixel(x, y, *board.get_pixel(q.x as u32, q.y as u32));
            }
        }
    }
    img
}
