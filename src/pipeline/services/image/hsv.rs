use image::Rgb;

/// A colour in the 8-bit half-circle HSV encoding used by most vision
/// toolkits: hue in 0..=179 (degrees / 2), saturation and value in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub fn from_rgb(px: &Rgb<u8>) -> Self {
        let [r, g, b] = px.0.map(i32::from);

        let v = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = v - min;

        let s = if v == 0 {
            0
        } else {
            (255.0 * diff as f64 / v as f64).round() as i32
        };

        let h = if diff == 0 {
            0
        } else {
            // Sector offsets of 0, 2 and 4 put red, green and blue at 0°,
            // 120° and 240°. 30 = 180 / 6 scales a sector onto the half circle.
            let sector = if v == r {
                g - b
            } else if v == g {
                b - r + 2 * diff
            } else {
                r - g + 4 * diff
            };
            let h = (30.0 * sector as f64 / diff as f64 + 0.5).floor() as i32;
            if h < 0 {
                h + 180
            } else {
                h
            }
        };

        Self {
            h: h as u8,
            s: s as u8,
            v: v as u8,
        }
    }
}

/// Inclusive HSV box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self {
            lower: Hsv {
                h: lower[0],
                s: lower[1],
                v: lower[2],
            },
            upper: Hsv {
                h: upper[0],
                s: upper[1],
                v: upper[2],
            },
        }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        hsv.h >= self.lower.h
            && hsv.h <= self.upper.h
            && hsv.s >= self.lower.s
            && hsv.s <= self.upper.s
            && hsv.v >= self.lower.v
            && hsv.v <= self.upper.v
    }
}

/// Skin band. Tuned for a single reference lighting and skin hue; dim,
/// tinted or very pale photos fall outside it and are reported as having
/// no skin rather than being corrected.
pub const SKIN_RANGE: HsvRange = HsvRange::new([0, 20, 70], [20, 255, 255]);

#[cfg(test)]
mod tests {
    use super::*;

    fn hsv(r: u8, g: u8, b: u8) -> Hsv {
        Hsv::from_rgb(&Rgb([r, g, b]))
    }

    #[test]
    fn converts_primaries() {
        assert_eq!(hsv(255, 0, 0), Hsv { h: 0, s: 255, v: 255 });
        assert_eq!(hsv(0, 255, 0), Hsv { h: 60, s: 255, v: 255 });
        assert_eq!(hsv(0, 0, 255), Hsv { h: 120, s: 255, v: 255 });
    }

    #[test]
    fn greys_have_no_hue_or_saturation() {
        assert_eq!(hsv(0, 0, 0), Hsv { h: 0, s: 0, v: 0 });
        assert_eq!(hsv(128, 128, 128), Hsv { h: 0, s: 0, v: 128 });
    }

    #[test]
    fn converts_skin_like_colour() {
        assert_eq!(hsv(220, 180, 140), Hsv { h: 15, s: 93, v: 220 });
    }

    #[test]
    fn magenta_side_of_red_wraps_around() {
        // g < b with red as max gives a negative sector.
        assert_eq!(hsv(255, 0, 128).h, 165);
    }

    #[test]
    fn skin_range_is_inclusive() {
        assert!(SKIN_RANGE.contains(Hsv { h: 0, s: 20, v: 70 }));
        assert!(SKIN_RANGE.contains(Hsv { h: 20, s: 255, v: 255 }));
        assert!(!SKIN_RANGE.contains(Hsv { h: 21, s: 100, v: 100 }));
        assert!(!SKIN_RANGE.contains(Hsv { h: 10, s: 19, v: 100 }));
        assert!(!SKIN_RANGE.contains(Hsv { h: 10, s: 100, v: 69 }));
    }

    #[test]
    fn reference_colours_against_skin_range() {
        assert!(SKIN_RANGE.contains(hsv(220, 180, 140)));
        assert!(!SKIN_RANGE.contains(hsv(0, 0, 255)));
        assert!(!SKIN_RANGE.contains(hsv(80, 70, 130)));
    }
}
