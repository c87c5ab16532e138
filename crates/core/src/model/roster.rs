use chrono::{NaiveDateTime, TimeDelta};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::contract::{self, Contract, ContractViolation, Employee};
use crate::scale::ScaleConfig;

/// A place that needs staffing. Each spot is one lane on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    pub id: u64,
    pub name: String,
}

/// A block of work at a spot, optionally assigned to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: u64,
    pub spot_id: u64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub employee: Option<String>,
}

impl Shift {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn is_assigned(&self) -> bool {
        self.employee.is_some()
    }

    /// Half-open: a shift ending at `t` does not cover `t`.
    pub fn covers(&self, t: &NaiveDateTime) -> bool {
        (self.start..self.end).contains(t)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub name: Option<String>,
    pub spots: Vec<Spot>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Explicit timeline window; derived from the shifts when absent.
    #[serde(default)]
    pub view: Option<ScaleConfig>,
}

impl Roster {
    pub fn spot(&self, id: u64) -> Option<&Spot> {
        self.spots.iter().find(|s| s.id == id)
    }

    pub fn shift(&self, id: u64) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    pub fn contract(&self, id: u64) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    pub fn employee(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.name == name)
    }

    /// Shifts assigned to the named employee, ordered by start time.
    pub fn shifts_for_employee(&self, name: &str) -> Vec<&Shift> {
        let mut shifts: Vec<&Shift> = self
            .shifts
            .iter()
            .filter(|s| s.employee.as_deref() == Some(name))
            .collect();
        shifts.sort_by_key(|s| (s.start, s.id));
        shifts
    }

    /// Every contract limit exceeded by assigned shifts, in employee order.
    /// Employees without a listed contract are unconstrained.
    pub fn contract_violations(&self) -> Vec<ContractViolation> {
        self.employees
            .iter()
            .filter_map(|e| Some((e, self.contract(e.contract_id)?)))
            .flat_map(|(e, c)| {
                let shifts = self.shifts_for_employee(&e.name);
                contract::check_contract(&e.name, c, shifts.iter().copied())
            })
            .collect()
    }

    /// Shifts at the given spot, ordered by start time.
    pub fn shifts_for_spot(&self, spot_id: u64) -> Vec<&Shift> {
        let mut shifts: Vec<&Shift> = self
            .shifts
            .iter()
            .filter(|s| s.spot_id == spot_id)
            .collect();
        shifts.sort_by_key(|s| (s.start, s.id));
        shifts
    }

    /// Earliest shift start and latest shift end.
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.shifts.iter().map(|s| s.start).min()?;
        let end = self.shifts.iter().map(|s| s.end).max()?;
        Some((start, end))
    }

    /// The timeline window to display: the explicit `view` block if present,
    /// otherwise one spanning every shift.
    pub fn scale_config(&self) -> Option<ScaleConfig> {
        if let Some(view) = &self.view {
            return Some(view.clone());
        }
        let (start, end) = self.time_range()?;
        debug!("no view window, deriving scale from shifts: {start} to {end}");
        Some(ScaleConfig::spanning(start, end))
    }

    pub fn assigned_count(&self) -> usize {
        self.shifts.iter().filter(|s| s.is_assigned()).count()
    }
}
