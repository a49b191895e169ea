//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to chart positions. The bar charts use a
//! [`BandScale`] for categories and a [`LinearScale`] for prices; the carat
//! scatter uses two linear scales.

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max or either bound is not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain bounds must be finite".to_string()));
        }
        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale from data extent.
    ///
    /// A single distinct value is widened by one unit on each side so a
    /// one-point series still has a usable domain.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f64, f64)) -> Option<Self> {
        let (min, max) = extent(data)?;
        if (max - min).abs() < f64::EPSILON {
            return Self::new((min - 1.0, max + 1.0), range).ok();
        }
        Self::new((min, max), range).ok()
    }

    /// Create a scale anchored at zero, for bar heights.
    #[must_use]
    pub fn from_zero(data: &[f64], range: (f64, f64)) -> Option<Self> {
        let (_, max) = extent(data)?;
        let max = if max > 0.0 { max } else { 1.0 };
        Self::new((0.0, max), range).ok()
    }

    /// Extend the domain outward to round tick boundaries.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let step = tick_step(self.domain_min, self.domain_max, count);
        if step <= 0.0 || !step.is_finite() {
            return self;
        }
        Self {
            domain_min: (self.domain_min / step).floor() * step,
            domain_max: (self.domain_max / step).ceil() * step,
            ..self
        }
    }

    /// Approximately `count` evenly spaced, round tick values inside the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain_min <= self.domain_max {
            (self.domain_min, self.domain_max)
        } else {
            (self.domain_max, self.domain_min)
        };
        let step = tick_step(lo, hi, count);
        if step <= 0.0 || !step.is_finite() {
            return vec![lo];
        }

        let first = (lo / step).ceil() as i64;
        let last = (hi / step + 1e-9).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Band scale for categorical positions: splits the range into equal
/// bands, one per category, with fractional padding between them.
#[derive(Debug, Clone, Copy)]
pub struct BandScale {
    count: usize,
    range_min: f64,
    range_max: f64,
    padding: f64,
}

impl BandScale {
    /// Create a band scale over `count` categories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when there are no categories.
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Result<Self> {
        if count == 0 {
            return Err(Error::EmptyData);
        }
        Ok(Self {
            count,
            range_min: range.0,
            range_max: range.1,
            padding: padding.clamp(0.0, 0.9),
        })
    }

    fn step(&self) -> f64 {
        (self.range_max - self.range_min) / self.count as f64
    }

    /// Width of one band, excluding padding.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Center of the band at `index`.
    #[must_use]
    pub fn center(&self, index: usize) -> f64 {
        self.scale(index) + self.bandwidth() / 2.0
    }
}

impl Scale<usize, f64> for BandScale {
    /// Left edge of the band at `index`.
    fn scale(&self, index: usize) -> f64 {
        let step = self.step();
        self.range_min + step * index as f64 + step * self.padding / 2.0
    }

    fn domain(&self) -> (usize, usize) {
        (0, self.count - 1)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

fn extent(data: &[f64]) -> Option<(f64, f64)> {
    let mut finite = data.iter().copied().filter(|v| v.is_finite()).peekable();
    finite.peek()?;
    Some(finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Tick step rounded to 1, 2, 5 or 10 times a power of ten.
fn tick_step(min: f64, max: f64, count: usize) -> f64 {
    let raw = (max - min).abs() / count.max(1) as f64;
    if raw <= 0.0 {
        return 0.0;
    }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}
