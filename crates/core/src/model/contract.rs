use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::Shift;

/// Calendar window a contract limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl ContractPeriod {
    pub const ALL: [ContractPeriod; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// First day of the period containing `date`. Weeks start on Monday.
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => {
                let back = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(back)).unwrap_or(date)
            }
            Self::Month => date.with_day(1).unwrap_or(date),
            Self::Year => date.with_ordinal(1).unwrap_or(date),
        }
    }
}

impl std::fmt::Display for ContractPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

/// Working-time limits an employee is hired under. Absent limits are
/// unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub maximum_minutes_per_day: Option<u32>,
    #[serde(default)]
    pub maximum_minutes_per_week: Option<u32>,
    #[serde(default)]
    pub maximum_minutes_per_month: Option<u32>,
    #[serde(default)]
    pub maximum_minutes_per_year: Option<u32>,
}

impl Contract {
    pub fn limit(&self, period: ContractPeriod) -> Option<u32> {
        match period {
            ContractPeriod::Day => self.maximum_minutes_per_day,
            ContractPeriod::Week => self.maximum_minutes_per_week,
            ContractPeriod::Month => self.maximum_minutes_per_month,
            ContractPeriod::Year => self.maximum_minutes_per_year,
        }
    }
}

/// An employee as named on shifts, bound to a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub contract_id: u64,
}

/// Assigned minutes exceeding a contract limit within one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractViolation {
    pub employee: String,
    pub contract_id: u64,
    pub period: ContractPeriod,
    pub period_start: NaiveDate,
    pub minutes: i64,
    pub limit: u32,
}

impl std::fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} works {} min in the {} of {}, contract {} allows {}",
            self.employee, self.minutes, self.period, self.period_start, self.contract_id, self.limit
        )
    }
}

/// Minutes per period, keyed by the first day of each period.
///
/// A shift counts in full toward the period in which it starts.
pub fn minutes_per_period<'a>(
    shifts: impl IntoIterator<Item = &'a Shift>,
    period: ContractPeriod,
) -> BTreeMap<NaiveDate, i64> {
    let mut totals = BTreeMap::new();
    for shift in shifts {
        let key = period.period_start(shift.start.date());
        *totals.entry(key).or_insert(0) += shift.duration().num_minutes();
    }
    totals
}

/// Check one employee's shifts against every limit of `contract`.
pub fn check_contract<'a>(
    employee: &str,
    contract: &Contract,
    shifts: impl IntoIterator<Item = &'a Shift> + Clone,
) -> Vec<ContractViolation> {
    let mut violations = Vec::new();
    for period in ContractPeriod::ALL {
        let Some(limit) = contract.limit(period) else {
            continue;
        };
        for (period_start, minutes) in minutes_per_period(shifts.clone(), period) {
            if minutes > i64::from(limit) {
                violations.push(ContractViolation {
                    employee: employee.to_string(),
                    contract_id: contract.id,
                    period,
                    period_start,
                    minutes,
                    limit,
                });
            }
        }
    }
    violations
}
