use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png fixture");
    buf
}

pub fn solid_png(rgb: [u8; 3]) -> Vec<u8> {
    png_bytes(&RgbImage::from_pixel(8, 8, Rgb(rgb)))
}

/// Big enough that decoding and scanning take well over a millisecond.
pub fn large_skin_png() -> Vec<u8> {
    png_bytes(&RgbImage::from_pixel(2000, 2000, Rgb([220, 180, 140])))
}
