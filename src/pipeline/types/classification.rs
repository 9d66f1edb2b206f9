use serde::{Deserialize, Serialize};
use std::fmt;

/// Tone boundaries on the Rec. 601 luma scale. Each bound is exclusive.
const FAIR_LUMINANCE: f64 = 180.0;
const MEDIUM_LUMINANCE: f64 = 140.0;
const OLIVE_LUMINANCE: f64 = 90.0;

/// How far red and blue must differ before an undertone leaves Neutral.
const UNDERTONE_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinTone {
    Fair,
    Medium,
    Olive,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Undertone {
    Warm,
    Cool,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl SkinTone {
    pub const ALL: [SkinTone; 4] = [
        SkinTone::Fair,
        SkinTone::Medium,
        SkinTone::Olive,
        SkinTone::Deep,
    ];

    pub fn from_luminance(luminance: f64) -> Self {
        if luminance > FAIR_LUMINANCE {
            SkinTone::Fair
        } else if luminance > MEDIUM_LUMINANCE {
            SkinTone::Medium
        } else if luminance > OLIVE_LUMINANCE {
            SkinTone::Olive
        } else {
            SkinTone::Deep
        }
    }

    fn is_light(self) -> bool {
        matches!(self, SkinTone::Fair | SkinTone::Medium)
    }
}

impl Undertone {
    pub const ALL: [Undertone; 3] = [Undertone::Warm, Undertone::Cool, Undertone::Neutral];

    pub fn from_red_blue(red: f64, blue: f64) -> Self {
        if red > blue + UNDERTONE_MARGIN {
            Undertone::Warm
        } else if blue > red + UNDERTONE_MARGIN {
            Undertone::Cool
        } else {
            Undertone::Neutral
        }
    }
}

impl Season {
    /// Seasonal palette for a tone/undertone pair.
    ///
    /// Neutral undertones split the same way as Warm ones: light tones are
    /// Spring, Olive and Deep are Autumn.
    pub fn from_tone(tone: SkinTone, undertone: Undertone) -> Self {
        match (undertone, tone.is_light()) {
            (Undertone::Warm, true) => Season::Spring,
            (Undertone::Warm, false) => Season::Autumn,
            (Undertone::Cool, true) => Season::Summer,
            (Undertone::Cool, false) => Season::Winter,
            (Undertone::Neutral, true) => Season::Spring,
            (Undertone::Neutral, false) => Season::Autumn,
        }
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Undertone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Outcome of a single photo analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub skin_tone: SkinTone,
    pub undertone: Undertone,
    pub season: Season,
    pub avg_rgb: [u8; 3],
    pub hex: String,
}

impl ClassificationResult {
    pub fn new(skin_tone: SkinTone, undertone: Undertone, avg_rgb: [u8; 3]) -> Self {
        let [r, g, b] = avg_rgb;
        Self {
            skin_tone,
            undertone,
            season: Season::from_tone(skin_tone, undertone),
            avg_rgb,
            hex: format!("#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_boundaries_are_exclusive_above() {
        assert_eq!(SkinTone::from_luminance(180.0), SkinTone::Medium);
        assert_eq!(SkinTone::from_luminance(180.0001), SkinTone::Fair);
        assert_eq!(SkinTone::from_luminance(140.0), SkinTone::Olive);
        assert_eq!(SkinTone::from_luminance(140.5), SkinTone::Medium);
        assert_eq!(SkinTone::from_luminance(90.0), SkinTone::Deep);
        assert_eq!(SkinTone::from_luminance(90.01), SkinTone::Olive);
        assert_eq!(SkinTone::from_luminance(0.0), SkinTone::Deep);
    }

    #[test]
    fn undertone_needs_more_than_ten_levels() {
        assert_eq!(Undertone::from_red_blue(220.0, 140.0), Undertone::Warm);
        assert_eq!(Undertone::from_red_blue(150.0, 140.0), Undertone::Neutral);
        assert_eq!(Undertone::from_red_blue(150.5, 140.0), Undertone::Warm);
        assert_eq!(Undertone::from_red_blue(140.0, 150.0), Undertone::Neutral);
        assert_eq!(Undertone::from_red_blue(80.0, 130.0), Undertone::Cool);
    }

    #[test]
    fn season_table_covers_every_combination() {
        use Season::*;
        use SkinTone::*;
        use Undertone::*;

        let expected = [
            ((Fair, Warm), Spring),
            ((Medium, Warm), Spring),
            ((Olive, Warm), Autumn),
            ((Deep, Warm), Autumn),
            ((Fair, Cool), Summer),
            ((Medium, Cool), Summer),
            ((Olive, Cool), Winter),
            ((Deep, Cool), Winter),
            ((Fair, Neutral), Spring),
            ((Medium, Neutral), Spring),
            ((Olive, Neutral), Autumn),
            ((Deep, Neutral), Autumn),
        ];

        let mut checked = 0;
        for tone in SkinTone::ALL {
            for undertone in Undertone::ALL {
                let (_, season) = expected
                    .iter()
                    .find(|((t, u), _)| *t == tone && *u == undertone)
                    .unwrap();
                assert_eq!(Season::from_tone(tone, undertone), *season);
                checked += 1;
            }
        }
        assert_eq!(checked, 12);
    }

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        let result = ClassificationResult::new(SkinTone::Deep, Undertone::Cool, [5, 10, 171]);
        assert_eq!(result.hex, "#050aab");
        assert_eq!(result.season, Season::Winter);
    }

    #[test]
    fn serializes_with_flat_string_labels() {
        let result = ClassificationResult::new(SkinTone::Fair, Undertone::Warm, [220, 180, 140]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "skin_tone": "Fair",
                "undertone": "Warm",
                "season": "Spring",
                "avg_rgb": [220, 180, 140],
                "hex": "#dcb48c",
            })
        );
    }
}
