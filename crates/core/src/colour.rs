//! Colour module - evenly spaced piece colours
//!
//! Colours are picked by splitting the HSV hue circle into equal steps at a fixed
//! saturation and value, which keeps neighbouring pieces as distinct as possible.

use crate::error::{EngineError, Result};
use crate::types::{Colour, COLOUR_SATURATION, COLOUR_VALUE};

/// Convert an HSV triple (hue in degrees, saturation and value in 0-1) to RGB.
/// Components are truncated, so a value of 0.78 maps to 198.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Colour {
    let sector = hue / 60.0;
    let hi = (sector.floor() as i64).rem_euclid(6);
    let f = sector - sector.floor();
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - f * saturation);
    let t = value * (1.0 - (1.0 - f) * saturation);

    let (r, g, b) = match hi {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };

    Colour::new(channel(r), channel(g), channel(b))
}

#[inline]
fn channel(component: f64) -> u8 {
    (component * 255.0).clamp(0.0, 255.0) as u8
}

/// Generate `n` colours with equally spaced hues starting at red
///
/// ```
/// use polyominohs_core::generate_colours;
///
/// let colours = generate_colours(3).unwrap();
/// assert_eq!(colours.len(), 3);
/// assert_eq!(colours[0].rgb(), (198, 0, 0));
/// assert!(generate_colours(0).is_err());
/// ```
pub fn generate_colours(n: usize) -> Result<Vec<Colour>> {
    if n == 0 {
        return Err(EngineError::NoColours);
    }
    let step = 360.0 / n as f64;
    Ok((0..n)
        .map(|i| hsv_to_rgb(step * i as f64, COLOUR_SATURATION, COLOUR_VALUE))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Colour::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Colour::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Colour::new(0, 0, 255));
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        let grey = hsv_to_rgb(200.0, 0.0, 0.5);
        assert_eq!(grey.r, grey.g);
        assert_eq!(grey.g, grey.b);
    }

    #[test]
    fn test_generate_colours_distinct() {
        let colours = generate_colours(7).unwrap();
        assert_eq!(colours.len(), 7);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_generate_colours_value_caps_brightness() {
        for colour in generate_colours(12).unwrap() {
            let (r, g, b) = colour.rgb();
            assert!(r.max(g).max(b) <= 198);
        }
    }

    #[test]
    fn test_generate_zero_colours_is_invalid() {
        assert_eq!(generate_colours(0), Err(EngineError::NoColours));
    }
}
