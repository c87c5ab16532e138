pub mod roster;

pub use roster::{RosterParseError, parse_roster};
