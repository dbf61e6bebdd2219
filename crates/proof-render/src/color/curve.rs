//! Wavelength-sampled spectral curves.

use std::ops::{Index, IndexMut};

/// Value a fresh curve is filled with: a neutral 50% reflector.
pub const NEUTRAL_VALUE: f64 = 0.5;

/// Closed wavelength interval sampled at 1 nm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavelengthRange {
    min: u32,
    max: u32,
}

impl WavelengthRange {
    /// The visible range covered by the observer tables, 380–780 nm.
    pub const VISIBLE: WavelengthRange = WavelengthRange { min: 380, max: 780 };

    /// Create a range; returns `None` when `min > max`.
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of 1 nm bins, `max - min + 1`.
    #[inline]
    pub fn len(&self) -> usize {
        (self.max - self.min + 1) as usize
    }

    /// A range always has at least one bin.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, wavelength: i64) -> bool {
        wavelength >= self.min as i64 && wavelength <= self.max as i64
    }

    /// Wavelengths in bin order.
    pub fn wavelengths(&self) -> impl Iterator<Item = u32> {
        self.min..=self.max
    }
}

impl Default for WavelengthRange {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// One value per 1 nm bin; index 0 is the range's lower bound.
///
/// The number of values always equals `range.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralCurve {
    range: WavelengthRange,
    values: Vec<f64>,
}

impl SpectralCurve {
    /// A curve with every bin set to `value`.
    pub fn filled(range: WavelengthRange, value: f64) -> Self {
        Self {
            range,
            values: vec![value; range.len()],
        }
    }

    /// A curve filled with [`NEUTRAL_VALUE`].
    pub fn neutral(range: WavelengthRange) -> Self {
        Self::filled(range, NEUTRAL_VALUE)
    }

    /// Build a curve from `(wavelength, value)` sample points.
    ///
    /// Points must come in ascending wavelength order; a point that does not
    /// advance past the previous one is skipped, as are points outside the
    /// range. Bins between two points are interpolated linearly. Bins before
    /// the first point repeat its value and bins after the last point are 0.
    pub fn from_points(range: WavelengthRange, points: &[(i64, f64)]) -> Self {
        let mut values = vec![0.0; range.len()];
        let mut prev: Option<(usize, f64)> = None;

        for &(wavelength, value) in points {
            if !range.contains(wavelength) {
                continue;
            }
            let idx = (wavelength - range.min() as i64) as usize;
            match prev {
                None => values[..=idx].fill(value),
                Some((prev_idx, prev_value)) if idx > prev_idx => {
                    let span = (idx - prev_idx) as f64;
                    for (step, bin) in values[prev_idx + 1..=idx].iter_mut().enumerate() {
                        let t = (step + 1) as f64 / span;
                        *bin = prev_value + (value - prev_value) * t;
                    }
                }
                Some(_) => {
                    tracing::debug!(wavelength, "Skipping out-of-order curve point");
                    continue;
                }
            }
            prev = Some((idx, value));
        }

        Self { range, values }
    }

    #[inline]
    pub fn range(&self) -> WavelengthRange {
        self.range
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Value at an integer wavelength, if it lies in range.
    pub fn at(&self, wavelength: u32) -> Option<f64> {
        wavelength
            .checked_sub(self.range.min())
            .and_then(|i| self.values.get(i as usize))
            .copied()
    }

    /// Sum of all bins.
    pub fn area(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Average bin value.
    pub fn mean(&self) -> f64 {
        self.area() / self.values.len() as f64
    }

    /// Multiply every bin by `factor` in place.
    pub fn scale(&mut self, factor: f64) {
        self.values.iter_mut().for_each(|v| *v *= factor);
    }

    /// Copy of this curve with every bin multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.clone();
        out.scale(factor);
        out
    }

    /// Per-bin sum.
    ///
    /// # Panics
    ///
    /// Panics if the curves cover different ranges.
    pub fn add(&self, other: &SpectralCurve) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Per-bin product.
    ///
    /// # Panics
    ///
    /// Panics if the curves cover different ranges.
    pub fn multiply(&self, other: &SpectralCurve) -> Self {
        self.zip_with(other, |a, b| a * b)
    }

    fn zip_with(&self, other: &SpectralCurve, f: impl Fn(f64, f64) -> f64) -> Self {
        assert_eq!(self.range, other.range, "spectral curves cover different ranges");
        Self {
            range: self.range,
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

impl Index<usize> for SpectralCurve {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl IndexMut<usize> for SpectralCurve {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_curve_length_and_fill() {
        let curve = SpectralCurve::neutral(WavelengthRange::VISIBLE);
        assert_eq!(curve.len(), 401);
        assert!(curve.values().iter().all(|&v| v == NEUTRAL_VALUE));
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(WavelengthRange::new(500, 400).is_none());
        assert_eq!(WavelengthRange::new(500, 500).unwrap().len(), 1);
    }

    #[test]
    fn test_from_points_two_endpoints_is_exact_ramp() {
        let range = WavelengthRange::VISIBLE;
        let curve = SpectralCurve::from_points(range, &[(380, 0.2), (780, 1.0)]);
        for i in 0..curve.len() {
            let expected = 0.2 + (1.0 - 0.2) * i as f64 / 400.0;
            assert!((curve[i] - expected).abs() < 1e-12, "bin {i}");
        }
    }

    #[test]
    fn test_from_points_fills_before_first_and_zeroes_after_last() {
        let range = WavelengthRange::VISIBLE;
        let curve = SpectralCurve::from_points(range, &[(400, 0.8), (410, 0.3)]);
        assert_eq!(curve.at(380), Some(0.8));
        assert_eq!(curve.at(400), Some(0.8));
        assert!((curve.at(405).unwrap() - 0.55).abs() < 1e-12);
        assert!((curve.at(410).unwrap() - 0.3).abs() < 1e-12);
        assert_eq!(curve.at(411), Some(0.0));
        assert_eq!(curve.at(780), Some(0.0));
    }

    #[test]
    fn test_from_points_ignores_out_of_range_and_backwards_points() {
        let range = WavelengthRange::VISIBLE;
        let curve = SpectralCurve::from_points(
            range,
            &[(300, 9.0), (380, 1.0), (390, 1.0), (385, 7.0), (900, 9.0)],
        );
        assert_eq!(curve.at(385), Some(1.0));
        assert_eq!(curve.at(391), Some(0.0));
    }

    #[test]
    fn test_arithmetic_helpers() {
        let range = WavelengthRange::new(400, 402).unwrap();
        let a = SpectralCurve::filled(range, 2.0);
        let b = SpectralCurve::filled(range, 3.0);
        assert_eq!(a.add(&b).values(), &[5.0, 5.0, 5.0]);
        assert_eq!(a.multiply(&b).values(), &[6.0, 6.0, 6.0]);
        assert_eq!(a.scaled(0.5).values(), &[1.0, 1.0, 1.0]);
        assert_eq!(a.area(), 6.0);
        assert_eq!(b.mean(), 3.0);
    }
}
