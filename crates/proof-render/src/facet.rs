//! Microfacet distributions.
//!
//! Every family is described by the half-width angle `beta` (radians): the
//! angle between the normal and the half vector at which the distribution
//! falls to half its peak. [`Facet::shape_from_half_angle`] turns `beta`
//! into the family's own shape parameter once per material, and
//! [`Facet::evaluate`] uses that parameter per pixel.
//!
//! `beta <= 0` means a perfect mirror. For the cosine-power families a
//! `beta` at or past the domain bound gives exponent 0, a uniform
//! distribution.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, LN_2, PI, SQRT_2};

use crate::vector::{half_vector, Vec3};

/// `N·H` this close to 1 counts as the mirror direction.
const MIRROR_EPSILON: f64 = 1e-9;

/// A microfacet distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facet {
    /// `(R·L)^n`, with `R` the view mirrored about the normal
    Phong,
    /// `(N·H)^n`
    #[default]
    Blinn,
    /// `exp(-(c·angle(N, H))²)`
    Gaussian,
    /// Trowbridge-Reitz ellipsoids of revolution
    TrowbridgeReitz,
    /// Beckmann distribution as used by Cook and Torrance
    Cook,
}

impl Facet {
    /// Shape parameter for half-width angle `beta`.
    pub fn shape_from_half_angle(self, beta: f64) -> f64 {
        match self {
            Facet::Phong => cosine_power(beta, FRAC_PI_4, |b| (2.0 * b).cos()),
            Facet::Blinn => cosine_power(beta, FRAC_PI_2, f64::cos),
            Facet::Gaussian => {
                if beta <= 0.0 {
                    f64::MAX
                } else {
                    LN_2.sqrt() / beta
                }
            }
            Facet::TrowbridgeReitz => {
                if beta <= 0.0 {
                    0.0
                } else {
                    let cos_sq = beta.cos().powi(2);
                    (cos_sq - 1.0) / (cos_sq - SQRT_2)
                }
            }
            Facet::Cook => {
                if beta <= 0.0 {
                    0.0
                } else if beta >= FRAC_PI_2 {
                    f64::MAX
                } else {
                    -beta.tan().powi(2) / (beta.cos().powi(4) / 2.0).ln()
                }
            }
        }
    }

    /// Distribution value for unit normal `n`, light direction `l` and
    /// view direction `e`, all pointing away from the surface.
    pub fn evaluate(self, n: Vec3, l: Vec3, e: Vec3, shape: f64) -> f64 {
        let Some(h) = half_vector(e, l) else {
            return 0.0;
        };
        let nh = n.dot(h).min(1.0);
        if nh <= 0.0 {
            return 0.0;
        }

        match self {
            Facet::Phong => {
                let r_dot_l = e.reflect(n).dot(l);
                if r_dot_l > 0.0 {
                    r_dot_l.min(1.0).powf(shape)
                } else {
                    0.0
                }
            }
            Facet::Blinn => nh.powf(shape),
            Facet::Gaussian => {
                let angle = nh.acos();
                if angle == 0.0 {
                    1.0
                } else {
                    (-(angle * shape).powi(2)).exp()
                }
            }
            Facet::TrowbridgeReitz => {
                if shape == 0.0 {
                    return mirror(nh);
                }
                (shape / (nh * nh * (shape - 1.0) + 1.0)).powi(2)
            }
            Facet::Cook => {
                if shape == 0.0 {
                    return mirror(nh);
                }
                let nh_sq = nh * nh;
                (-(1.0 - nh_sq) / (nh_sq * shape)).exp() / (4.0 * PI * shape * nh_sq * nh_sq)
            }
        }
    }
}

/// Exponent `n` such that `cos_at(beta)^n = 1/2`.
fn cosine_power(beta: f64, bound: f64, cos_at: impl Fn(f64) -> f64) -> f64 {
    if beta <= 0.0 {
        f64::MAX
    } else if beta >= bound {
        0.0
    } else {
        -LN_2 / cos_at(beta).ln()
    }
}

fn mirror(nh: f64) -> f64 {
    if 1.0 - nh < MIRROR_EPSILON {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Facet; 5] = [
        Facet::Phong,
        Facet::Blinn,
        Facet::Gaussian,
        Facet::TrowbridgeReitz,
        Facet::Cook,
    ];

    /// Light tilted so the half vector makes angle `angle` with the normal,
    /// viewed from straight above.
    fn light_at_half_angle(angle: f64) -> Vec3 {
        Vec3::new((2.0 * angle).sin(), 0.0, (2.0 * angle).cos())
    }

    #[test]
    fn test_half_width_is_half_peak() {
        let beta = 0.3;
        for facet in ALL {
            let shape = facet.shape_from_half_angle(beta);
            let peak = facet.evaluate(Vec3::UP, Vec3::UP, Vec3::UP, shape);
            let half = facet.evaluate(Vec3::UP, light_at_half_angle(beta), Vec3::UP, shape);
            assert!(
                (half / peak - 0.5).abs() < 1e-9,
                "{facet:?}: peak {peak}, at beta {half}"
            );
        }
    }

    #[test]
    fn test_cosine_power_bounds() {
        assert_eq!(Facet::Phong.shape_from_half_angle(0.0), f64::MAX);
        assert_eq!(Facet::Phong.shape_from_half_angle(FRAC_PI_4), 0.0);
        assert_eq!(Facet::Blinn.shape_from_half_angle(-1.0), f64::MAX);
        assert_eq!(Facet::Blinn.shape_from_half_angle(FRAC_PI_2), 0.0);
        assert!(Facet::Blinn.shape_from_half_angle(1.0) > 0.0);
    }

    #[test]
    fn test_mirror_parameters() {
        for facet in ALL {
            let shape = facet.shape_from_half_angle(0.0);
            let on = facet.evaluate(Vec3::UP, Vec3::UP, Vec3::UP, shape);
            let off = facet.evaluate(Vec3::UP, light_at_half_angle(0.05), Vec3::UP, shape);
            assert_eq!(on, 1.0, "{facet:?}");
            assert_eq!(off, 0.0, "{facet:?}");
        }
    }

    #[test]
    fn test_uniform_exponent() {
        let shape = Facet::Blinn.shape_from_half_angle(2.0);
        let d = Facet::Blinn.evaluate(Vec3::UP, light_at_half_angle(0.7), Vec3::UP, shape);
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_half_vector_below_surface_is_zero() {
        let below = Vec3::new(0.0, 0.0, -1.0);
        let l = Vec3::new(1.0, 0.0, -1.0).normalize().unwrap();
        for facet in ALL {
            assert_eq!(facet.evaluate(Vec3::UP, l, below, 1.0), 0.0, "{facet:?}");
        }
    }
}
