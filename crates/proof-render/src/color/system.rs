use std::io::BufRead;

use super::cie::{matching_at, TABLE_MAX_WL, TABLE_MIN_WL};
use super::{
    ColorError, GamutMapping, Lab, LinearRgb, Mat3, Rgb8, SpectralCurve, WavelengthRange, Xyz,
};
use crate::description::{is_numeric_line, DescriptionError, LineSource, Tokens};

/// A CIE xy chromaticity coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticity {
    pub x: f64,
    pub y: f64,
}

impl Chromaticity {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The implied z coordinate, `1 - x - y`.
    #[inline]
    pub fn z(&self) -> f64 {
        1.0 - self.x - self.y
    }
}

/// Chromaticities of the three RGB primaries and the white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    pub red: Chromaticity,
    pub green: Chromaticity,
    pub blue: Chromaticity,
    pub white: Chromaticity,
}

impl Primaries {
    /// NTSC primaries with illuminant C white.
    pub const NTSC: Primaries = Primaries {
        red: Chromaticity::new(0.670, 0.330),
        green: Chromaticity::new(0.210, 0.710),
        blue: Chromaticity::new(0.140, 0.080),
        white: Chromaticity::new(0.313, 0.329),
    };

    /// ITU-R BT.709 / sRGB primaries with D65 white.
    pub const REC709: Primaries = Primaries {
        red: Chromaticity::new(0.640, 0.330),
        green: Chromaticity::new(0.300, 0.600),
        blue: Chromaticity::new(0.150, 0.060),
        white: Chromaticity::new(0.3127, 0.3290),
    };

    /// Matrix taking linear RGB in these primaries to XYZ, with the
    /// white point normalized to `Y = 1`.
    ///
    /// The per-primary luminance scales come from solving
    /// `[x_i; y_i; z_i] · s = white_XYZ` by Gaussian elimination.
    pub fn rgb_to_xyz(&self) -> Result<Mat3, ColorError> {
        let white = self.white;
        if white.y <= 0.0 {
            return Err(ColorError::InvalidWhitePoint { y: white.y });
        }
        let white_xyz = [white.x / white.y, 1.0, white.z() / white.y];

        let p = [self.red, self.green, self.blue];
        let chroma = Mat3([
            [p[0].x, p[1].x, p[2].x],
            [p[0].y, p[1].y, p[2].y],
            [p[0].z(), p[1].z(), p[2].z()],
        ]);
        let scale = chroma.solve(white_xyz)?;

        let mut m = chroma.0;
        for row in m.iter_mut() {
            for (cell, s) in row.iter_mut().zip(scale) {
                *cell *= s;
            }
        }
        Ok(Mat3(m))
    }
}

impl Default for Primaries {
    fn default() -> Self {
        Self::NTSC
    }
}

/// Spectral-to-RGB conversion context.
///
/// Holds the RGB↔XYZ transforms for one set of primaries, the colour
/// matching functions resampled to 1 nm over the working range, and the
/// normalization that gives an all-ones curve `Y = 1`.
///
/// Read-only after construction, so a single instance can be shared by
/// every render thread.
///
/// # Example
///
/// ```
/// use proof_render::color::{ColorSystem, Primaries};
///
/// let colors = ColorSystem::new(Primaries::NTSC).unwrap();
/// let curve = colors.new_curve();
/// let xyz = colors.to_xyz(&curve);
/// assert!((xyz.y - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ColorSystem {
    range: WavelengthRange,
    primaries: Primaries,
    rgb_to_xyz: Mat3,
    xyz_to_rgb: Mat3,
    matching: [SpectralCurve; 3],
    scale: f64,
    gamut: GamutMapping,
}

impl ColorSystem {
    /// Build a colour system over the visible range.
    pub fn new(primaries: Primaries) -> Result<Self, ColorError> {
        Self::with_range(primaries, WavelengthRange::VISIBLE)
    }

    /// Build a colour system over a custom range inside 380–780 nm.
    pub fn with_range(primaries: Primaries, range: WavelengthRange) -> Result<Self, ColorError> {
        if range.min() < TABLE_MIN_WL || range.max() > TABLE_MAX_WL {
            return Err(ColorError::UnsupportedRange {
                min: range.min(),
                max: range.max(),
            });
        }

        let rgb_to_xyz = primaries.rgb_to_xyz()?;
        let xyz_to_rgb = rgb_to_xyz.inverse()?;

        let mut matching = [
            SpectralCurve::filled(range, 0.0),
            SpectralCurve::filled(range, 0.0),
            SpectralCurve::filled(range, 0.0),
        ];
        for (i, wavelength) in range.wavelengths().enumerate() {
            let bar = matching_at(wavelength);
            for (curve, value) in matching.iter_mut().zip(bar) {
                curve[i] = value;
            }
        }

        let y_area = matching[1].area();
        if y_area <= 0.0 {
            return Err(ColorError::UnsupportedRange {
                min: range.min(),
                max: range.max(),
            });
        }

        tracing::debug!(
            min_wl = range.min(),
            max_wl = range.max(),
            "Initialized color system"
        );

        Ok(Self {
            range,
            primaries,
            rgb_to_xyz,
            xyz_to_rgb,
            matching,
            scale: 1.0 / y_area,
            gamut: GamutMapping::default(),
        })
    }

    /// Replace the gamut mapping used by [`to_rgb`](Self::to_rgb).
    pub fn with_gamut(mut self, gamut: GamutMapping) -> Self {
        self.gamut = gamut;
        self
    }

    #[inline]
    pub fn range(&self) -> WavelengthRange {
        self.range
    }

    #[inline]
    pub fn primaries(&self) -> &Primaries {
        &self.primaries
    }

    #[inline]
    pub fn gamut(&self) -> GamutMapping {
        self.gamut
    }

    #[inline]
    pub fn rgb_to_xyz_matrix(&self) -> &Mat3 {
        &self.rgb_to_xyz
    }

    #[inline]
    pub fn xyz_to_rgb_matrix(&self) -> &Mat3 {
        &self.xyz_to_rgb
    }

    /// A fresh curve over this system's range, filled with 0.5.
    pub fn new_curve(&self) -> SpectralCurve {
        SpectralCurve::neutral(self.range)
    }

    /// Consume consecutive `wavelength value` lines from `src`.
    ///
    /// Stops at the first line that is not numeric and leaves that line
    /// unread. A numeric line missing either field is an error.
    pub fn read_curve<R: BufRead>(
        &self,
        src: &mut LineSource<R>,
    ) -> Result<SpectralCurve, DescriptionError> {
        let mut points = Vec::new();
        while let Some(line) = src.peek()? {
            if !is_numeric_line(line) {
                break;
            }
            let Some((line_no, text)) = src.next_line()? else {
                break;
            };
            let mut tokens = Tokens::new(&text);
            let wavelength = tokens
                .next_int()
                .ok_or_else(|| DescriptionError::missing_value(line_no, "curve wavelength"))?;
            let value = tokens
                .next_number()
                .ok_or_else(|| DescriptionError::missing_value(line_no, "curve value"))?;
            points.push((wavelength, value));
        }
        Ok(SpectralCurve::from_points(self.range, &points))
    }

    /// Integrate a curve against the matching functions.
    pub fn to_xyz(&self, curve: &SpectralCurve) -> Xyz {
        let values = curve.values();
        let dot = |bar: &SpectralCurve| -> f64 {
            values.iter().zip(bar.values()).map(|(a, b)| a * b).sum()
        };
        Xyz::new(
            self.scale * dot(&self.matching[0]),
            self.scale * dot(&self.matching[1]),
            self.scale * dot(&self.matching[2]),
        )
    }

    /// XYZ to linear RGB in the active primaries, without gamut mapping.
    pub fn xyz_to_linear(&self, xyz: Xyz) -> LinearRgb {
        let [r, g, b] = self.xyz_to_rgb.mul_vec(xyz.to_array());
        LinearRgb::new(r, g, b)
    }

    /// Spectral curve to gamut-mapped, 8-bit RGB.
    pub fn to_rgb(&self, curve: &SpectralCurve) -> Rgb8 {
        let linear = self.xyz_to_linear(self.to_xyz(curve));
        self.gamut.apply(linear).quantize()
    }

    /// CIE 1976 L*a*b* relative to this system's white point.
    pub fn xyz_to_lab(&self, xyz: Xyz) -> Lab {
        let white = self.primaries.white;
        let wx = white.x / white.y;
        let wz = white.z() / white.y;

        let fx = lab_f(xyz.x / wx);
        let fy = lab_f(xyz.y);
        let fz = lab_f(xyz.z / wz);
        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}
