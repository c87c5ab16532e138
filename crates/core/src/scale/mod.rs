//! Conversions between domain values and grid pixels.
//!
//! A [`LinearScale`] only has to describe the unscaled ("factor 1")
//! mapping of its value type to pixels and back; zooming by a [`Factor`]
//! is layered on top by the default methods.

pub mod config;
pub mod date_time;
pub mod index;

pub use config::ScaleConfig;
pub use date_time::{DateTimeScale, TimeUnit};
pub use index::IndexScale;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("scale factor must not be zero")]
    ZeroFactor,
    #[error("scale factor must be positive, got {0}")]
    NegativeFactor(i64),
    #[error("{pixels} grid pixels at factor {factor} overflows i64")]
    Overflow { pixels: i64, factor: i64 },
    #[error("scale end must not be negative, got {0}")]
    NegativeEnd(i64),
    #[error("scale ends ({end}) before it starts ({start})")]
    InvertedRange { start: String, end: String },
}

/// Bidirectional mapping between scale units `T` and grid pixels.
///
/// Implementers provide the factor-1 primitives, which must be inverses
/// of each other, plus the configured end bound and factor. The factor
/// must be non-zero; every scale in this module enforces that through
/// [`Factor`].
pub trait LinearScale<T> {
    /// Scale units to grid pixels. Integer division, truncating toward zero.
    ///
    /// Panics with a division by zero if `factor()` returns 0.
    fn to_grid_pixels(&self, value: &T) -> i64 {
        self.to_grid_pixels_with_factor1(value) / self.factor()
    }

    /// Grid pixels to scale units. The intermediate `pixels * factor()`
    /// saturates at the `i64` range instead of wrapping.
    fn to_scale_units(&self, pixels: i64) -> T {
        self.to_scale_units_with_factor1(pixels.saturating_mul(self.factor()))
    }

    fn to_grid_pixels_with_factor1(&self, value: &T) -> i64;

    fn to_scale_units_with_factor1(&self, pixels: i64) -> T;

    fn end_in_scale_units(&self) -> T;

    /// How many scale units correspond to one grid pixel.
    fn factor(&self) -> i64;

    fn checked_to_grid_pixels(&self, value: &T) -> Result<i64, ScaleError> {
        let factor = self.factor();
        if factor == 0 {
            return Err(ScaleError::ZeroFactor);
        }
        Ok(self.to_grid_pixels_with_factor1(value) / factor)
    }

    fn checked_to_scale_units(&self, pixels: i64) -> Result<T, ScaleError> {
        let factor = self.factor();
        let factor1 = pixels
            .checked_mul(factor)
            .ok_or(ScaleError::Overflow { pixels, factor })?;
        Ok(self.to_scale_units_with_factor1(factor1))
    }

    /// Pixel extent of the whole scale, i.e. the position of its end bound.
    fn end_in_grid_pixels(&self) -> i64 {
        self.to_grid_pixels(&self.end_in_scale_units())
    }
}

/// A strictly positive scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Factor(i64);

impl Factor {
    pub const ONE: Factor = Factor(1);

    pub fn new(value: i64) -> Result<Self, ScaleError> {
        match value {
            0 => Err(ScaleError::ZeroFactor),
            v if v < 0 => Err(ScaleError::NegativeFactor(v)),
            v => Ok(Self(v)),
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Half as many units per pixel, never below one.
    pub fn zoom_in(self) -> Self {
        Self((self.0 / 2).max(1))
    }

    /// Twice as many units per pixel, saturating.
    pub fn zoom_out(self) -> Self {
        Self(self.0.saturating_mul(2))
    }
}

impl TryFrom<i64> for Factor {
    type Error = ScaleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Factor> for i64 {
    fn from(factor: Factor) -> Self {
        factor.0
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
