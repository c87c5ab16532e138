use chrono::{NaiveDateTime, TimeDelta};
use log::warn;
use serde::{Deserialize, Serialize};

use super::{Factor, LinearScale, ScaleError};

/// Granularity of one factor-1 pixel on a [`DateTimeScale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    #[default]
    Minutes,
    Hours,
}

impl TimeUnit {
    pub fn seconds(self) -> i64 {
        match self {
            Self::Seconds => 1,
            Self::Minutes => 60,
            Self::Hours => 3_600,
        }
    }

    /// Whole units in `delta`, truncated toward zero.
    pub fn count(self, delta: TimeDelta) -> i64 {
        delta.num_seconds() / self.seconds()
    }

    /// `n` units as a duration, or `None` if it does not fit.
    pub fn delta(self, n: i64) -> Option<TimeDelta> {
        n.checked_mul(self.seconds()).and_then(TimeDelta::try_seconds)
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seconds => write!(f, "s"),
            Self::Minutes => write!(f, "min"),
            Self::Hours => write!(f, "h"),
        }
    }
}

/// Time scale of the roster timeline.
///
/// Factor-1 pixel `n` is `start + n * unit`; the scale covers
/// `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeScale {
    start: NaiveDateTime,
    end: NaiveDateTime,
    unit: TimeUnit,
    factor: Factor,
}

impl DateTimeScale {
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        unit: TimeUnit,
        factor: Factor,
    ) -> Result<Self, ScaleError> {
        if end < start {
            return Err(ScaleError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            unit,
            factor,
        })
    }

    pub fn with_factor(self, factor: Factor) -> Self {
        Self { factor, ..self }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn scale_factor(&self) -> Factor {
        self.factor
    }

    pub fn contains(&self, t: &NaiveDateTime) -> bool {
        (self.start..=self.end).contains(t)
    }
}

impl LinearScale<NaiveDateTime> for DateTimeScale {
    fn to_grid_pixels_with_factor1(&self, value: &NaiveDateTime) -> i64 {
        self.unit.count(value.signed_duration_since(self.start))
    }

    fn to_scale_units_with_factor1(&self, pixels: i64) -> NaiveDateTime {
        self.unit
            .delta(pixels)
            .and_then(|delta| self.start.checked_add_signed(delta))
            .unwrap_or_else(|| {
                warn!("{pixels} {} from {} is out of range, clamping", self.unit, self.start);
                if pixels >= 0 {
                    NaiveDateTime::MAX
                } else {
                    NaiveDateTime::MIN
                }
            })
    }

    fn end_in_scale_units(&self) -> NaiveDateTime {
        self.end
    }

    fn factor(&self) -> i64 {
        self.factor.get()
    }
}
