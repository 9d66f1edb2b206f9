use image::RgbImage;

use super::hsv::{Hsv, HsvRange};

/// Per-pixel selection of an image, row-major, same dimensions as the
/// image it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinMask {
    width: u32,
    height: u32,
    selected: Vec<bool>,
}

impl SkinMask {
    pub fn from_image(image: &RgbImage, range: &HsvRange) -> Self {
        let selected = image
            .pixels()
            .map(|px| range.contains(Hsv::from_rgb(px)))
            .collect();

        Self {
            width: image.width(),
            height: image.height(),
            selected,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_selected(&self, x: u32, y: u32) -> bool {
        self.selected[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.selected.iter().any(|&s| s)
    }
}

/// Mean colour of the masked pixels, channels in R, G, B order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl AverageColor {
    /// Returns `None` when the mask selects nothing.
    pub fn from_masked(image: &RgbImage, mask: &SkinMask) -> Option<Self> {
        let mut sums = [0u64; 3];
        let mut count = 0u64;

        for (px, &selected) in image.pixels().zip(mask.selected.iter()) {
            if selected {
                for (sum, channel) in sums.iter_mut().zip(px.0) {
                    *sum += u64::from(channel);
                }
                count += 1;
            }
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(Self {
            r: sums[0] as f64 / n,
            g: sums[1] as f64 / n,
            b: sums[2] as f64 / n,
        })
    }

    /// Rec. 601 luma.
    pub fn luminance(&self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Channels truncated toward zero.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [self.r as u8, self.g as u8, self.b as u8]
    }
}
