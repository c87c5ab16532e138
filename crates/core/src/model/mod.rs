pub mod contract;
pub mod roster;

pub use contract::{Contract, ContractPeriod, ContractViolation, Employee};
pub use roster::{Roster, Shift, Spot};
