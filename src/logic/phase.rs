//! Phase transitions: roster assignment, score recording, decision gates, the final.

use crate::logic::schedule::generate_schedule;
use crate::models::{
    DecisionPolicy, Fixture, MatchResult, OperatorChoice, Phase, Tournament, TournamentError,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Assign players to teams and open the league (Setup only).
///
/// `pool_one` and `pool_two` must each hold exactly one name per team. Each
/// pool is shuffled independently and zipped by position, so a team gets one
/// player from each pool. The RNG is injected so callers can seed it for a
/// reproducible draw. Generates and caches the round-robin schedule.
pub fn assign_roster(
    tournament: &mut Tournament,
    pool_one: &[String],
    pool_two: &[String],
    rng: &mut impl Rng,
) -> Result<(), TournamentError> {
    if tournament.phase != Phase::Setup {
        return Err(TournamentError::InvalidPhase(tournament.phase));
    }
    let team_count = tournament.teams.len();
    if pool_one.len() != team_count || pool_two.len() != team_count {
        return Err(TournamentError::InvalidInput);
    }

    let ids: Vec<_> = tournament.teams.iter().map(|t| t.id.clone()).collect();
    let rounds = generate_schedule(&ids)?;

    let mut firsts: Vec<&String> = pool_one.iter().collect();
    let mut seconds: Vec<&String> = pool_two.iter().collect();
    firsts.shuffle(rng);
    seconds.shuffle(rng);

    for (team, (p1, p2)) in tournament
        .teams
        .iter_mut()
        .zip(firsts.into_iter().zip(seconds))
    {
        team.players = [p1.clone(), p2.clone()];
    }

    tournament.rounds = rounds;
    tournament.ledger.clear();
    tournament.gate_declined = false;
    tournament.phase = Phase::League;
    Ok(())
}

/// Record (or correct) a league score (League only).
///
/// The fixture must come from the generated schedule. Overwriting an
/// existing entry is allowed and does not change completion membership.
/// After the insert the decision gate runs per the configured policy.
pub fn record_result(
    tournament: &mut Tournament,
    fixture: &Fixture,
    home_score: u32,
    away_score: u32,
) -> Result<(), TournamentError> {
    if tournament.phase != Phase::League {
        return Err(TournamentError::InvalidPhase(tournament.phase));
    }
    if !tournament.has_fixture(fixture) {
        return Err(TournamentError::InvalidFixture(fixture.clone()));
    }

    tournament.ledger.insert(
        fixture.clone(),
        MatchResult {
            home_score,
            away_score,
        },
    );

    // A fresh result is a new checkpoint for the mathematical gate; the
    // fixed-round checkpoint stays answered once declined.
    if tournament.policy == DecisionPolicy::AskWhenCertified {
        tournament.gate_declined = false;
    }
    run_decision_gate(tournament);
    Ok(())
}

/// Apply the operator's choice at a decision gate (DecisionPending only).
pub fn advance_phase(
    tournament: &mut Tournament,
    choice: OperatorChoice,
) -> Result<(), TournamentError> {
    if tournament.phase != Phase::DecisionPending {
        return Err(TournamentError::InvalidPhase(tournament.phase));
    }
    match choice {
        OperatorChoice::Continue => {
            tournament.gate_declined = true;
            tournament.phase = Phase::League;
        }
        OperatorChoice::Final => enter_final(tournament),
    }
    Ok(())
}

/// Record the score of the final (Final only).
///
/// A strict winner completes the tournament. A drawn score is kept and
/// reported but declares no champion: the phase stays Final so the replayed
/// match can be recorded over it.
pub fn record_final_result(
    tournament: &mut Tournament,
    home_score: u32,
    away_score: u32,
) -> Result<(), TournamentError> {
    if tournament.phase != Phase::Final {
        return Err(TournamentError::InvalidPhase(tournament.phase));
    }
    tournament.final_result = Some(MatchResult {
        home_score,
        away_score,
    });
    if home_score != away_score {
        tournament.phase = Phase::Complete;
    }
    Ok(())
}

/// After a recorded result: end the league when every fixture is complete,
/// otherwise pause or advance per the configured policy.
fn run_decision_gate(tournament: &mut Tournament) {
    let total = tournament
        .rounds
        .iter()
        .map(|r| r.fixtures.len())
        .sum::<usize>();
    if tournament.ledger.len() == total {
        enter_final(tournament);
        return;
    }

    match tournament.policy {
        DecisionPolicy::AutoAdvance => {
            if tournament.qualification().certified {
                enter_final(tournament);
            }
        }
        DecisionPolicy::AskWhenCertified => {
            if !tournament.gate_declined && tournament.qualification().certified {
                tournament.phase = Phase::DecisionPending;
            }
        }
        DecisionPolicy::AskAfterRound(checkpoint) => {
            if !tournament.gate_declined && rounds_complete(tournament, checkpoint) {
                tournament.phase = Phase::DecisionPending;
            }
        }
    }
}

/// Whether every fixture of rounds 1..=`upto` has a recorded result.
fn rounds_complete(tournament: &Tournament, upto: u32) -> bool {
    tournament
        .rounds
        .iter()
        .filter(|r| r.number <= upto)
        .flat_map(|r| r.fixtures.iter())
        .all(|f| tournament.ledger.contains_key(f))
}

/// Move to the final with the current top two as finalists.
fn enter_final(tournament: &mut Tournament) {
    let standings = tournament.standings();
    if let [first, second, ..] = standings.as_slice() {
        tournament.finalists = Some((first.team.clone(), second.team.clone()));
        tournament.phase = Phase::Final;
    }
}
