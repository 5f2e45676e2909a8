//! Tournament engine: schedule generation, standings, qualification, phase transitions.

mod phase;
mod qualification;
mod schedule;
mod standings;

pub use phase::{advance_phase, assign_roster, record_final_result, record_result};
pub use qualification::evaluate_qualification;
pub use schedule::generate_schedule;
pub use standings::compute_standings;
