use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{DateTimeScale, Factor, ScaleError, TimeUnit};

const DEFAULT_FACTOR: i64 = 15;

fn default_factor() -> Factor {
    Factor(DEFAULT_FACTOR)
}

/// Serialized form of a [`DateTimeScale`], as found in the `view` block
/// of a roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleConfig {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub unit: TimeUnit,
    #[serde(default = "default_factor")]
    pub factor: Factor,
}

impl ScaleConfig {
    /// Config covering `start..=end` with the default unit and factor.
    pub fn spanning(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            unit: TimeUnit::default(),
            factor: default_factor(),
        }
    }

    pub fn build(&self) -> Result<DateTimeScale, ScaleError> {
        DateTimeScale::new(self.start, self.end, self.unit, self.factor)
    }
}
