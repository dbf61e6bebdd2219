//! Mapping out-of-range RGB back into the displayable cube.

use super::LinearRgb;

/// Axis values at or below this collapse to black.
const BLACK_LEVEL: f64 = 0.0001;

/// Axis values at or above this saturate to white.
const WHITE_LEVEL: f64 = 0.9999;

/// How out-of-gamut linear RGB is brought into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamutMapping {
    /// Shift toward the neutral grey axis, preserving hue.
    ///
    /// The grey level is the channel average. Only the offset from that
    /// level is shrunk, by the smallest factor that lands every offending
    /// channel on 0.0001 or 0.9999.
    #[default]
    Desaturate,
    /// Clamp each channel independently.
    Clamp,
    /// Zero negative channels, then scale all channels so the largest is 1.
    Scale,
}

impl GamutMapping {
    /// Map `rgb` into gamut. In-gamut input is returned unchanged.
    pub fn apply(self, rgb: LinearRgb) -> LinearRgb {
        if rgb.in_gamut() {
            return rgb;
        }
        match self {
            GamutMapping::Desaturate => desaturate(rgb),
            GamutMapping::Clamp => LinearRgb::new(
                rgb.r.clamp(0.0, 1.0),
                rgb.g.clamp(0.0, 1.0),
                rgb.b.clamp(0.0, 1.0),
            ),
            GamutMapping::Scale => scale(rgb),
        }
    }
}

fn desaturate(rgb: LinearRgb) -> LinearRgb {
    let axis = (rgb.r + rgb.g + rgb.b) / 3.0;
    if axis <= BLACK_LEVEL {
        return LinearRgb::new(0.0, 0.0, 0.0);
    }
    if axis >= WHITE_LEVEL {
        return LinearRgb::new(1.0, 1.0, 1.0);
    }

    let diff = [rgb.r - axis, rgb.g - axis, rgb.b - axis];
    let channels = [rgb.r, rgb.g, rgb.b];
    let mut mult: f64 = 1.0;
    for (&c, &d) in channels.iter().zip(&diff) {
        if c > 1.0 {
            mult = mult.min((WHITE_LEVEL - axis) / d);
        } else if c < 0.0 {
            mult = mult.min((BLACK_LEVEL - axis) / d);
        }
    }

    LinearRgb::new(
        axis + diff[0] * mult,
        axis + diff[1] * mult,
        axis + diff[2] * mult,
    )
}

fn scale(rgb: LinearRgb) -> LinearRgb {
    let r = rgb.r.max(0.0);
    let g = rgb.g.max(0.0);
    let b = rgb.b.max(0.0);
    let peak = r.max(g).max(b);
    if peak > 1.0 {
        LinearRgb::new(r / peak, g / peak, b / peak)
    } else {
        LinearRgb::new(r, g, b)
    }
}
