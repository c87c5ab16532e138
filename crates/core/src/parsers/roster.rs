use std::collections::HashSet;

use log::debug;
use thiserror::Error;

use crate::model::Roster;

#[derive(Debug, Error)]
pub enum RosterParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate spot id {0}")]
    DuplicateSpot(u64),
    #[error("duplicate shift id {0}")]
    DuplicateShift(u64),
    #[error("shift {shift} references unknown spot {spot}")]
    UnknownSpot { shift: u64, spot: u64 },
    #[error("shift {0} does not end after it starts")]
    EmptyShift(u64),
    #[error("duplicate contract id {0}")]
    DuplicateContract(u64),
    #[error("contract {0} has an empty name")]
    EmptyContractName(u64),
    #[error("employee {0:?} is listed twice")]
    DuplicateEmployee(String),
    #[error("employee {employee:?} references unknown contract {contract}")]
    UnknownContract { employee: String, contract: u64 },
}

/// Parse a roster from its JSON form.
///
/// ```json
/// {
///   "name": "Week 1",
///   "spots":  [{ "id": 1, "name": "Reception" }],
///   "shifts": [{ "id": 10, "spot_id": 1,
///                "start": "2018-01-01T08:00:00", "end": "2018-01-01T16:00:00",
///                "employee": "Ann" }],
///   "view":   { "start": "2018-01-01T00:00:00", "end": "2018-01-08T00:00:00",
///               "unit": "minutes", "factor": 15 },
///   "contracts": [{ "id": 1, "name": "Part time", "maximum_minutes_per_day": 360 }],
///   "employees": [{ "name": "Ann", "contract_id": 1 }]
/// }
/// ```
///
/// `name`, `employee`, `view`, `contracts` and `employees` are optional, as
/// is each `maximum_minutes_per_*` limit. Limits are whole, non-negative
/// minute counts; anything else is a JSON error.
pub fn parse_roster(data: &[u8]) -> Result<Roster, RosterParseError> {
    let roster: Roster = serde_json::from_slice(data)?;

    let mut spot_ids = HashSet::with_capacity(roster.spots.len());
    for spot in &roster.spots {
        if !spot_ids.insert(spot.id) {
            return Err(RosterParseError::DuplicateSpot(spot.id));
        }
    }

    let mut shift_ids = HashSet::with_capacity(roster.shifts.len());
    for shift in &roster.shifts {
        if !shift_ids.insert(shift.id) {
            return Err(RosterParseError::DuplicateShift(shift.id));
        }
        if !spot_ids.contains(&shift.spot_id) {
            return Err(RosterParseError::UnknownSpot {
                shift: shift.id,
                spot: shift.spot_id,
            });
        }
        if shift.end <= shift.start {
            return Err(RosterParseError::EmptyShift(shift.id));
        }
    }

    let mut contract_ids = HashSet::with_capacity(roster.contracts.len());
    for contract in &roster.contracts {
        if !contract_ids.insert(contract.id) {
            return Err(RosterParseError::DuplicateContract(contract.id));
        }
        if contract.name.trim().is_empty() {
            return Err(RosterParseError::EmptyContractName(contract.id));
        }
    }

    let mut employee_names = HashSet::with_capacity(roster.employees.len());
    for employee in &roster.employees {
        if !employee_names.insert(employee.name.as_str()) {
            return Err(RosterParseError::DuplicateEmployee(employee.name.clone()));
        }
        if !contract_ids.contains(&employee.contract_id) {
            return Err(RosterParseError::UnknownContract {
                employee: employee.name.clone(),
                contract: employee.contract_id,
            });
        }
    }

    debug!(
        "parsed roster {:?}: {} spots, {} shifts, {} contracts",
        roster.name,
        roster.spots.len(),
        roster.shifts.len(),
        roster.contracts.len()
    );
    Ok(roster)
}
