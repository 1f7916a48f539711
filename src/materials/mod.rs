/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Refractive-index providers
//!
//! The solver never hardcodes a material model; it queries a
//! [`RefractiveIndexProvider`] per wavelength. This module supplies the
//! built-in providers: a constant index, a three-term Sellmeier equation,
//! a table with linear interpolation, and a closure wrapper for custom
//! dispersion models.

pub mod errors;

use num_complex::Complex64;

pub use errors::{MaterialError, Result};

/// Provides the complex refractive index n + ik of a material as a function
/// of vacuum wavelength.
///
/// Implementations must be thread safe; spectrum assembly queries them from
/// worker threads.
pub trait RefractiveIndexProvider: Send + Sync {
    /// Human-readable name of this material
    fn name(&self) -> &str;

    /// Complex refractive index at `wavelength` (meters)
    fn refractive_index(&self, wavelength: f64) -> Result<Complex64>;
}

/// A wavelength-independent refractive index
#[derive(Debug, Clone, Copy)]
pub struct ConstantIndex {
    index: Complex64,
}

impl ConstantIndex {
    pub fn new(index: Complex64) -> Self {
        Self { index }
    }
}

impl RefractiveIndexProvider for ConstantIndex {
    fn name(&self) -> &str {
        "constant"
    }

    fn refractive_index(&self, _wavelength: f64) -> Result<Complex64> {
        Ok(self.index)
    }
}

/// Three-term Sellmeier dispersion, n^2 = 1 + sum b_i lambda^2 / (lambda^2 - c_i)
#[derive(Debug, Clone)]
pub struct SellmeierIndex {
    name: String,
    b: [f64; 3],
    /// Resonance terms c_i in m^2
    c: [f64; 3],
    range: (f64, f64),
}

impl SellmeierIndex {
    /// Create a Sellmeier model.
    ///
    /// # Arguments
    ///
    /// * `name` - Material name
    /// * `b` - Oscillator strengths
    /// * `c` - Resonance wavelengths squared, in m^2
    /// * `range` - Validity range (min, max) in meters
    pub fn new(
        name: impl Into<String>,
        b: [f64; 3],
        c: [f64; 3],
        range: (f64, f64),
    ) -> Result<Self> {
        if !b.iter().chain(c.iter()).all(|v| v.is_finite()) {
            return Err(MaterialError::Invalid(
                "Sellmeier coefficients must be finite".to_string(),
            ));
        }
        if !(range.0.is_finite() && range.1.is_finite() && 0.0 < range.0 && range.0 < range.1) {
            return Err(MaterialError::Invalid(format!(
                "invalid Sellmeier validity range [{:e}, {:e}]",
                range.0, range.1
            )));
        }
        Ok(Self {
            name: name.into(),
            b,
            c,
            range,
        })
    }

    /// Fused silica after Malitson (1965), valid from 210 nm to 6.7 um
    pub fn fused_silica() -> Self {
        Self {
            name: "fused silica (Malitson)".to_string(),
            b: [0.6961663, 0.4079426, 0.8974794],
            c: [4.67914825849e-15, 1.351206307396e-14, 9.79340025379e-11],
            range: (210e-9, 6.7e-6),
        }
    }
}

impl RefractiveIndexProvider for SellmeierIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn refractive_index(&self, wavelength: f64) -> Result<Complex64> {
        let (min, max) = self.range;
        if !(min..=max).contains(&wavelength) {
            return Err(MaterialError::OutOfRange {
                wavelength,
                min,
                max,
            });
        }
        let lambda_sq = wavelength * wavelength;
        let mut n_sq = 1.0;
        for (b, c) in self.b.iter().zip(&self.c) {
            n_sq += b * lambda_sq / (lambda_sq - c);
        }
        if n_sq <= 0.0 {
            return Err(MaterialError::Invalid(format!(
                "Sellmeier evaluation gave n^2 = {n_sq} at {wavelength:e} m"
            )));
        }
        Ok(Complex64::new(n_sq.sqrt(), 0.0))
    }
}

/// Tabulated optical constants with linear interpolation between samples
#[derive(Debug, Clone)]
pub struct TabulatedIndex {
    name: String,
    wavelengths: Vec<f64>,
    n: Vec<f64>,
    k: Vec<f64>,
}

impl TabulatedIndex {
    /// Create a table of (wavelength, n, k) samples.
    ///
    /// # Arguments
    ///
    /// * `name` - Material name
    /// * `wavelengths` - Sample wavelengths in meters, strictly increasing,
    ///   at least two
    /// * `n` - Real index at each sample
    /// * `k` - Extinction coefficient at each sample, all >= 0
    pub fn new(
        name: impl Into<String>,
        wavelengths: Vec<f64>,
        n: Vec<f64>,
        k: Vec<f64>,
    ) -> Result<Self> {
        if wavelengths.len() < 2 {
            return Err(MaterialError::Invalid(
                "a tabulated index needs at least two samples".to_string(),
            ));
        }
        if n.len() != wavelengths.len() || k.len() != wavelengths.len() {
            return Err(MaterialError::Invalid(format!(
                "sample count mismatch: {} wavelengths, {} n, {} k",
                wavelengths.len(),
                n.len(),
                k.len()
            )));
        }
        if wavelengths.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(MaterialError::Invalid(
                "sample wavelengths must be strictly increasing".to_string(),
            ));
        }
        if wavelengths.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(MaterialError::Invalid(
                "sample wavelengths must be finite and positive".to_string(),
            ));
        }
        if n.iter().chain(k.iter()).any(|v| !v.is_finite()) {
            return Err(MaterialError::Invalid(
                "optical constants must be finite".to_string(),
            ));
        }
        if k.iter().any(|v| *v < 0.0) {
            return Err(MaterialError::Invalid(
                "extinction coefficients must be non-negative".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            wavelengths,
            n,
            k,
        })
    }
}

impl RefractiveIndexProvider for TabulatedIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn refractive_index(&self, wavelength: f64) -> Result<Complex64> {
        let min = self.wavelengths[0];
        let max = self.wavelengths[self.wavelengths.len() - 1];
        if !(min..=max).contains(&wavelength) {
            return Err(MaterialError::OutOfRange {
                wavelength,
                min,
                max,
            });
        }
        let upper = self
            .wavelengths
            .partition_point(|&w| w < wavelength)
            .clamp(1, self.wavelengths.len() - 1);
        let lower = upper - 1;
        let span = self.wavelengths[upper] - self.wavelengths[lower];
        let fraction = (wavelength - self.wavelengths[lower]) / span;
        let n = self.n[lower] + fraction * (self.n[upper] - self.n[lower]);
        let k = self.k[lower] + fraction * (self.k[upper] - self.k[lower]);
        Ok(Complex64::new(n, k))
    }
}

/// Wraps an arbitrary dispersion function as a provider
pub struct FunctionIndex<F> {
    name: String,
    function: F,
}

impl<F> FunctionIndex<F>
where
    F: Fn(f64) -> Complex64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, function: F) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }
}

impl<F> RefractiveIndexProvider for FunctionIndex<F>
where
    F: Fn(f64) -> Complex64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn refractive_index(&self, wavelength: f64) -> Result<Complex64> {
        Ok((self.function)(wavelength))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_index_ignores_wavelength() {
        let provider = ConstantIndex::new(Complex64::new(1.5, 0.01));
        let a = provider.refractive_index(400e-9).unwrap();
        let b = provider.refractive_index(800e-9).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Complex64::new(1.5, 0.01));
    }

    #[test]
    fn test_fused_silica_visible_index() {
        let silica = SellmeierIndex::fused_silica();
        let index = silica.refractive_index(600e-9).unwrap();
        // Malitson reports ~1.458 in the visible
        assert!(index.re > 1.45 && index.re < 1.47, "n = {}", index.re);
        assert_eq!(index.im, 0.0);
    }

    #[test]
    fn test_fused_silica_normal_dispersion() {
        let silica = SellmeierIndex::fused_silica();
        let blue = silica.refractive_index(450e-9).unwrap().re;
        let red = silica.refractive_index(700e-9).unwrap().re;
        assert!(blue > red);
    }

    #[test]
    fn test_sellmeier_out_of_range() {
        let silica = SellmeierIndex::fused_silica();
        let err = silica.refractive_index(100e-9).unwrap_err();
        assert!(matches!(err, MaterialError::OutOfRange { .. }));
    }

    #[test]
    fn test_tabulated_interpolates_linearly() {
        let table = TabulatedIndex::new(
            "test",
            vec![400e-9, 600e-9, 800e-9],
            vec![1.40, 1.50, 1.60],
            vec![0.0, 0.10, 0.20],
        )
        .unwrap();
        let mid = table.refractive_index(500e-9).unwrap();
        assert_relative_eq!(mid.re, 1.45, max_relative = 1e-12);
        assert_relative_eq!(mid.im, 0.05, max_relative = 1e-12);
        // Exact samples come back unchanged
        let sample = table.refractive_index(600e-9).unwrap();
        assert_relative_eq!(sample.re, 1.50, max_relative = 1e-12);
    }

    #[test]
    fn test_tabulated_rejects_inconsistent_data() {
        assert!(TabulatedIndex::new("t", vec![400e-9], vec![1.5], vec![0.0]).is_err());
        assert!(TabulatedIndex::new(
            "t",
            vec![500e-9, 400e-9],
            vec![1.5, 1.5],
            vec![0.0, 0.0]
        )
        .is_err());
        assert!(TabulatedIndex::new("t", vec![400e-9, 500e-9], vec![1.5], vec![0.0, 0.0]).is_err());
        assert!(TabulatedIndex::new(
            "t",
            vec![400e-9, 500e-9],
            vec![1.5, 1.5],
            vec![0.0, -0.1]
        )
        .is_err());
    }

    #[test]
    fn test_tabulated_out_of_range() {
        let table = TabulatedIndex::new(
            "test",
            vec![400e-9, 800e-9],
            vec![1.5, 1.5],
            vec![0.0, 0.0],
        )
        .unwrap();
        assert!(matches!(
            table.refractive_index(900e-9),
            Err(MaterialError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_function_index_passthrough() {
        let provider = FunctionIndex::new("cauchy", |wavelength: f64| {
            let micro = wavelength * 1e6;
            Complex64::new(1.45 + 0.004 / (micro * micro), 0.0)
        });
        let index = provider.refractive_index(500e-9).unwrap();
        assert_relative_eq!(index.re, 1.45 + 0.004 / 0.25, max_relative = 1e-12);
    }
}
