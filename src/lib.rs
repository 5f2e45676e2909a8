//! Badminton tournament web app: library with models and the scheduling engine.

pub mod logic;
pub mod models;

pub use logic::{
    advance_phase, assign_roster, compute_standings, evaluate_qualification, generate_schedule,
    record_final_result, record_result,
};
pub use models::{
    DecisionPolicy, Fixture, MatchResult, OperatorChoice, Phase, Qualification, Round,
    StandingsRow, Team, TeamId, Tournament, TournamentError, TournamentId,
};
