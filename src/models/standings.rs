//! Standings rows and the qualification signal (for API / display).

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// One line of the points table. A win is worth 2 points; a draw or loss
/// awards nothing to either side. Run rate is the summed signed score
/// differential across the team's recorded matches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: TeamId,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    pub run_rate: i64,
}

/// Outcome of the qualification check: whether the top two places are already
/// mathematically settled, and if so which teams hold them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Qualification {
    pub certified: bool,
    /// The two qualified teams, in standings order. Only set when certified.
    pub top_two: Option<(TeamId, TeamId)>,
}
