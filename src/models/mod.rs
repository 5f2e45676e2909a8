//! Data structures for the badminton tournament: teams, fixtures, standings, tournament state.

mod fixture;
mod standings;
mod team;
mod tournament;

pub use fixture::{Fixture, MatchResult, Round};
pub use standings::{Qualification, StandingsRow};
pub use team::{color_for_index, team_id_for_index, Team, TeamId};
pub use tournament::{
    DecisionPolicy, OperatorChoice, Phase, Tournament, TournamentError, TournamentId,
};
