//! A point light with direct and ambient spectral intensities.

use std::fmt;
use std::io::BufRead;

use crate::color::{ColorSystem, SpectralCurve};
use crate::description::{record_tag, required_number, DescriptionError, LineSource, Tokens};
use crate::vector::{Point3, Vec3};

const DEFAULT_POSITION: f64 = 1000.0;
const DEFAULT_INTENSITY: f64 = 255.0;
const DEFAULT_AMBIENT_INTENSITY: f64 = 0.0;

/// Error type for light queries.
#[derive(Debug, Clone, PartialEq)]
pub enum LightError {
    /// The queried point coincides with the light position
    ZeroDirection { point: Point3 },
}

impl fmt::Display for LightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightError::ZeroDirection { point } => write!(
                f,
                "light direction undefined at ({}, {}, {}): point is the light position",
                point.x, point.y, point.z
            ),
        }
    }
}

impl std::error::Error for LightError {}

/// One header line of a light description.
#[derive(Debug, Clone, PartialEq)]
enum LightRecord {
    X(f64),
    Y(f64),
    Z(f64),
    /// `c intensity` followed by curve lines
    Direct { intensity: f64 },
    /// `a intensity` followed by curve lines
    Ambient { intensity: f64 },
    Ignored,
}

impl LightRecord {
    fn classify(line_no: usize, text: &str) -> Result<Self, DescriptionError> {
        let mut tokens = Tokens::new(text);
        let record = match record_tag(text) {
            Some('X') => LightRecord::X(required_number(&mut tokens, line_no, "light x")?),
            Some('Y') => LightRecord::Y(required_number(&mut tokens, line_no, "light y")?),
            Some('Z') => LightRecord::Z(required_number(&mut tokens, line_no, "light z")?),
            Some('c') => LightRecord::Direct {
                intensity: required_number(&mut tokens, line_no, "light intensity")?,
            },
            Some('a') => LightRecord::Ambient {
                intensity: required_number(&mut tokens, line_no, "ambient intensity")?,
            },
            _ => LightRecord::Ignored,
        };
        Ok(record)
    }
}

/// A point light source.
///
/// Both curves are multiplied by their intensity when read.
#[derive(Debug, Clone)]
pub struct LightSource {
    position: Point3,
    intensity: f64,
    ambient_intensity: f64,
    direct: SpectralCurve,
    ambient: SpectralCurve,
}

impl LightSource {
    pub fn from_reader<R: BufRead>(
        reader: R,
        color: &ColorSystem,
    ) -> Result<Self, DescriptionError> {
        let mut src = LineSource::new(reader);
        let mut position = Point3::new(DEFAULT_POSITION, DEFAULT_POSITION, DEFAULT_POSITION);
        let mut intensity = DEFAULT_INTENSITY;
        let mut ambient_intensity = DEFAULT_AMBIENT_INTENSITY;
        let mut direct = color.new_curve();
        let mut ambient = color.new_curve();

        while let Some((line_no, text)) = src.next_line()? {
            match LightRecord::classify(line_no, &text)? {
                LightRecord::X(v) => position.x = v,
                LightRecord::Y(v) => position.y = v,
                LightRecord::Z(v) => position.z = v,
                LightRecord::Direct { intensity: v } => {
                    intensity = v;
                    direct = color.read_curve(&mut src)?.scaled(v);
                }
                LightRecord::Ambient { intensity: v } => {
                    ambient_intensity = v;
                    ambient = color.read_curve(&mut src)?.scaled(v);
                }
                LightRecord::Ignored => {}
            }
        }

        tracing::debug!(
            x = position.x,
            y = position.y,
            z = position.z,
            intensity,
            ambient_intensity,
            "Light source loaded"
        );
        Ok(Self {
            position,
            intensity,
            ambient_intensity,
            direct,
            ambient,
        })
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }

    #[inline]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    #[inline]
    pub fn ambient_intensity(&self) -> f64 {
        self.ambient_intensity
    }

    /// Direct (specular and diffuse) illumination spectrum.
    pub fn direct(&self) -> &SpectralCurve {
        &self.direct
    }

    pub fn ambient(&self) -> &SpectralCurve {
        &self.ambient
    }

    /// Unit vector from `p` toward the light.
    pub fn direction_to(&self, p: Point3) -> Result<Vec3, LightError> {
        (self.position - p)
            .normalize()
            .ok_or(LightError::ZeroDirection { point: p })
    }
}
