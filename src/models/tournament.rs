//! Tournament state: phase, roster, schedule, result ledger.

use crate::logic::{compute_standings, evaluate_qualification};
use crate::models::fixture::{ledger_serde, Fixture, MatchResult, Round};
use crate::models::standings::{Qualification, StandingsRow};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than two teams, or player pools that do not match the roster size.
    InvalidInput,
    /// The submitted pair is not part of the generated schedule.
    InvalidFixture(Fixture),
    /// The operation is not legal in the current phase.
    InvalidPhase(Phase),
    /// Roster size must be an even number of at least two teams.
    InvalidSize(usize),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidInput => {
                write!(f, "Need at least 2 teams and matching player pools")
            }
            TournamentError::InvalidFixture(fixture) => {
                write!(f, "{} is not in the schedule", fixture)
            }
            TournamentError::InvalidPhase(_) => {
                write!(f, "Action not allowed in the current phase")
            }
            TournamentError::InvalidSize(size) => {
                write!(f, "Roster size must be even and at least 2 (got {})", size)
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Roster size fixed, player names not yet assigned.
    #[default]
    Setup,
    /// Round-robin fixtures open for score recording.
    League,
    /// A decision gate fired; waiting for the operator to continue or finalize.
    DecisionPending,
    /// Single final between the two qualified teams.
    Final,
    /// Final result recorded with a strict winner.
    Complete,
}

/// When the league phase pauses (or ends) before all fixtures are played.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPolicy {
    /// Ask the operator as soon as the top two are mathematically settled.
    /// A declined gate re-arms on the next recorded result.
    #[default]
    AskWhenCertified,
    /// Skip the question: move to the final as soon as the top two are settled.
    AutoAdvance,
    /// Ask once every fixture of rounds 1..=n is complete (e.g. the
    /// penultimate round). Declining this fixed checkpoint does not re-ask.
    AskAfterRound(u32),
}

/// Operator's answer at a decision gate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorChoice {
    /// Keep playing the remaining league fixtures.
    Continue,
    /// End the league now and move to the final.
    Final,
}

/// Full tournament state: roster, schedule, result ledger, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// Roster, in generation order. Ids and size are fixed until a reset.
    pub teams: Vec<Team>,
    /// Cached round-robin schedule; empty until the roster is assigned.
    pub rounds: Vec<Round>,
    /// Authoritative results, keyed by fixture. A fixture is "completed"
    /// exactly when it has an entry here.
    #[serde(with = "ledger_serde")]
    pub ledger: HashMap<Fixture, MatchResult>,
    pub phase: Phase,
    pub policy: DecisionPolicy,
    /// The operator declined a decision gate; see `DecisionPolicy` for when
    /// this re-arms.
    pub gate_declined: bool,
    /// The two finalists, in standings order at the time the league ended.
    pub finalists: Option<(TeamId, TeamId)>,
    /// Score of the final, once recorded. A drawn score is kept here while
    /// the phase stays `Final` (no champion is declared for a draw).
    pub final_result: Option<MatchResult>,
}

impl Tournament {
    /// Create a tournament in Setup with an unnamed roster of `team_count` teams.
    pub fn new(team_count: usize) -> Result<Self, TournamentError> {
        if team_count < 2 || team_count % 2 != 0 {
            return Err(TournamentError::InvalidSize(team_count));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            teams: (0..team_count).map(Team::new).collect(),
            rounds: Vec::new(),
            ledger: HashMap::new(),
            phase: Phase::Setup,
            policy: DecisionPolicy::default(),
            gate_declined: false,
            finalists: None,
            final_result: None,
        })
    }

    /// Discard everything and re-enter Setup with a fresh roster of `new_size`
    /// teams. The id and decision policy survive the reset.
    pub fn reset_roster(&mut self, new_size: usize) -> Result<(), TournamentError> {
        let mut fresh = Self::new(new_size)?;
        fresh.id = self.id;
        fresh.policy = self.policy;
        *self = fresh;
        Ok(())
    }

    /// Set the decision policy (Setup only).
    pub fn set_policy(&mut self, policy: DecisionPolicy) -> Result<(), TournamentError> {
        if self.phase != Phase::Setup {
            return Err(TournamentError::InvalidPhase(self.phase));
        }
        self.policy = policy;
        Ok(())
    }

    /// The full fixture list, in schedule order.
    pub fn fixtures(&self) -> Vec<Fixture> {
        self.rounds
            .iter()
            .flat_map(|r| r.fixtures.iter().cloned())
            .collect()
    }

    /// Whether `fixture` is part of the generated schedule.
    pub fn has_fixture(&self, fixture: &Fixture) -> bool {
        self.rounds
            .iter()
            .any(|r| r.fixtures.iter().any(|f| f == fixture))
    }

    /// Current points table, recomputed from the ledger.
    pub fn standings(&self) -> Vec<StandingsRow> {
        compute_standings(&self.teams, &self.ledger)
    }

    /// Current qualification signal, recomputed from the ledger.
    pub fn qualification(&self) -> Qualification {
        evaluate_qualification(&self.standings(), &self.fixtures(), &self.ledger)
    }

    /// The champion, once the final has a strict winner. A drawn final (or no
    /// final result yet) has no champion.
    pub fn champion(&self) -> Option<&TeamId> {
        let (home, away) = self.finalists.as_ref()?;
        let result = self.final_result.as_ref()?;
        match result.home_score.cmp(&result.away_score) {
            Ordering::Greater => Some(home),
            Ordering::Less => Some(away),
            Ordering::Equal => None,
        }
    }
}
