use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::SRegion;

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

pub fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();

    GrayImage::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);
        Luma([luma(pixel)])
    })
}

// 0.299 R + 0.587 G + 0.114 B in 14-bit fixed point, rounded half up.
// The weights sum to 1 << 14 so gray inputs map to themselves.
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    let sum = LUMA_R * pixel[0] as u32 + LUMA_G * pixel[1] as u32 + LUMA_B * pixel[2] as u32;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

pub fn abs_diff(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    let (width, height) = a.dimensions();

    GrayImage::from_fn(width, height, |x, y| {
        Luma([a.get_pixel(x, y)[0].abs_diff(b.get_pixel(x, y)[0])])
    })
}

pub fn threshold_binary(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut result = image.clone();

    for pixel in result.pixels_mut() {
        pixel[0] = if pixel[0] > threshold { 255 } else { 0 };
    }

    result
}

pub fn invert(image: &GrayImage) -> GrayImage {
    let mut result = image.clone();

    for pixel in result.pixels_mut() {
        pixel[0] = !pixel[0];
    }

    result
}

pub fn gray_to_rgb(image: &GrayImage) -> RgbImage {
    let (width, height) = image.dimensions();

    RgbImage::from_fn(width, height, |x, y| {
        let v = image.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

pub fn bitwise_and(image: &RgbImage, mask: &RgbImage) -> RgbImage {
    debug_assert_eq!(image.dimensions(), mask.dimensions());
    let mut result = image.clone();

    for (pixel, m) in result.pixels_mut().zip(mask.pixels()) {
        pixel[0] &= m[0];
        pixel[1] &= m[1];
        pixel[2] &= m[2];
    }

    result
}

pub fn count_nonzero(image: &GrayImage) -> u64 {
    image.pixels().filter(|p| p[0] != 0).count() as u64
}

pub fn bounding_box(image: &GrayImage) -> Option<SRegion> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        found = true;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    found.then(|| SRegion {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

pub fn calculate_histogram(image: &GrayImage) -> [u32; 256] {
    let mut histogram = [0u32; 256];

    for pixel in image.pixels() {
        histogram[pixel[0] as usize] += 1;
    }

    histogram
}
