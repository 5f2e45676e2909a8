//! Integration tests for the tournament state machine: roster, league, gates, final.

use badminton_tournament_web::{
    advance_phase, assign_roster, record_final_result, record_result, DecisionPolicy, Fixture,
    OperatorChoice, Phase, Tournament, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn names(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

fn league_tournament(team_count: usize, policy: DecisionPolicy) -> Tournament {
    let mut t = Tournament::new(team_count).unwrap();
    t.set_policy(policy).unwrap();
    let pool_one = names("P", team_count);
    let pool_two = names("Q", team_count);
    assign_roster(&mut t, &pool_one, &pool_two, &mut StdRng::seed_from_u64(7)).unwrap();
    t
}

fn record(t: &mut Tournament, home: &str, away: &str, hs: u32, aws: u32) {
    record_result(t, &Fixture::new(home, away), hs, aws).unwrap();
}

/// Drive a 4-team league to the certified gate: A wins its three fixtures,
/// B wins its other two, leaving only C vs D with both chasers out of reach.
fn record_until_certified(t: &mut Tournament) {
    record(t, "Team A", "Team D", 21, 10);
    record(t, "Team B", "Team C", 21, 15);
    record(t, "Team A", "Team C", 21, 12);
    record(t, "Team A", "Team B", 21, 18);
    assert_eq!(t.phase, Phase::League);
    record(t, "Team D", "Team B", 14, 21);
}

#[test]
fn roster_size_must_be_even_and_at_least_two() {
    assert!(matches!(
        Tournament::new(0),
        Err(TournamentError::InvalidSize(0))
    ));
    assert!(matches!(
        Tournament::new(3),
        Err(TournamentError::InvalidSize(3))
    ));
    assert!(Tournament::new(2).is_ok());
}

#[test]
fn roster_assignment_requires_matching_pools() {
    let mut t = Tournament::new(4).unwrap();
    let short = names("P", 3);
    let full = names("Q", 4);
    assert!(matches!(
        assign_roster(&mut t, &short, &full, &mut StdRng::seed_from_u64(1)),
        Err(TournamentError::InvalidInput)
    ));
    assert_eq!(t.phase, Phase::Setup);
    assert!(t.rounds.is_empty());
}

#[test]
fn roster_assignment_is_deterministic_for_a_seed() {
    let build = || {
        let mut t = Tournament::new(4).unwrap();
        let pool_one = names("P", 4);
        let pool_two = names("Q", 4);
        assign_roster(&mut t, &pool_one, &pool_two, &mut StdRng::seed_from_u64(42)).unwrap();
        t
    };
    let a = build();
    let b = build();
    assert_eq!(a.teams, b.teams);
    // Each team has one player from each pool.
    for team in &a.teams {
        assert!(team.players[0].starts_with('P'));
        assert!(team.players[1].starts_with('Q'));
    }
}

#[test]
fn two_team_league_runs_straight_to_the_final() {
    let mut t = league_tournament(2, DecisionPolicy::default());
    assert_eq!(t.phase, Phase::League);
    assert_eq!(t.fixtures().len(), 1);

    record(&mut t, "Team A", "Team B", 21, 16);
    assert_eq!(t.phase, Phase::Final);
    assert_eq!(
        t.finalists,
        Some(("Team A".to_string(), "Team B".to_string()))
    );

    record_final_result(&mut t, 21, 18).unwrap();
    assert_eq!(t.phase, Phase::Complete);
    assert_eq!(t.champion().map(String::as_str), Some("Team A"));
}

#[test]
fn unknown_fixture_is_rejected_and_ledger_untouched() {
    let mut t = league_tournament(4, DecisionPolicy::default());
    let bogus = Fixture::new("Team A", "Team Z");
    let err = record_result(&mut t, &bogus, 21, 7).unwrap_err();
    assert!(matches!(err, TournamentError::InvalidFixture(f) if f == bogus));
    assert!(t.ledger.is_empty());
    assert_eq!(t.phase, Phase::League);
}

#[test]
fn recording_outside_the_league_phase_is_rejected() {
    let mut t = Tournament::new(4).unwrap();
    let err = record_result(&mut t, &Fixture::new("Team A", "Team D"), 21, 7).unwrap_err();
    assert!(matches!(err, TournamentError::InvalidPhase(Phase::Setup)));
}

#[test]
fn score_correction_overwrites_without_new_completion() {
    let mut t = league_tournament(4, DecisionPolicy::default());
    record(&mut t, "Team A", "Team D", 21, 10);
    assert_eq!(t.ledger.len(), 1);

    record(&mut t, "Team A", "Team D", 10, 21);
    assert_eq!(t.ledger.len(), 1);
    let rows = t.standings();
    let d = rows.iter().find(|r| r.team == "Team D").unwrap();
    assert_eq!(d.points, 2);
    assert_eq!(d.run_rate, 11);
}

#[test]
fn certified_gate_pauses_then_continue_resumes_the_league() {
    let mut t = league_tournament(4, DecisionPolicy::AskWhenCertified);
    record_until_certified(&mut t);
    assert_eq!(t.phase, Phase::DecisionPending);
    let q = t.qualification();
    assert!(q.certified);
    assert_eq!(
        q.top_two,
        Some(("Team A".to_string(), "Team B".to_string()))
    );

    advance_phase(&mut t, OperatorChoice::Continue).unwrap();
    assert_eq!(t.phase, Phase::League);

    // Last fixture completes the league regardless of the declined gate.
    record(&mut t, "Team C", "Team D", 21, 13);
    assert_eq!(t.phase, Phase::Final);
    assert_eq!(
        t.finalists,
        Some(("Team A".to_string(), "Team B".to_string()))
    );
}

#[test]
fn certified_gate_final_choice_ends_the_league_early() {
    let mut t = league_tournament(4, DecisionPolicy::AskWhenCertified);
    record_until_certified(&mut t);
    assert_eq!(t.phase, Phase::DecisionPending);

    advance_phase(&mut t, OperatorChoice::Final).unwrap();
    assert_eq!(t.phase, Phase::Final);
    assert_eq!(
        t.finalists,
        Some(("Team A".to_string(), "Team B".to_string()))
    );
    // One league fixture was never played.
    assert_eq!(t.ledger.len(), 5);
}

#[test]
fn auto_advance_policy_skips_the_question() {
    let mut t = league_tournament(4, DecisionPolicy::AutoAdvance);
    record_until_certified(&mut t);
    assert_eq!(t.phase, Phase::Final);
    assert_eq!(
        t.finalists,
        Some(("Team A".to_string(), "Team B".to_string()))
    );
}

#[test]
fn fixed_round_gate_asks_once_and_stays_declined() {
    let mut t = league_tournament(4, DecisionPolicy::AskAfterRound(2));
    record(&mut t, "Team A", "Team D", 21, 10);
    record(&mut t, "Team B", "Team C", 21, 15);
    record(&mut t, "Team A", "Team C", 21, 12);
    assert_eq!(t.phase, Phase::League);

    // Rounds 1 and 2 now complete: the checkpoint fires.
    record(&mut t, "Team D", "Team B", 14, 21);
    assert_eq!(t.phase, Phase::DecisionPending);

    advance_phase(&mut t, OperatorChoice::Continue).unwrap();
    record(&mut t, "Team A", "Team B", 21, 18);
    // The answered checkpoint does not re-ask.
    assert_eq!(t.phase, Phase::League);

    record(&mut t, "Team C", "Team D", 21, 13);
    assert_eq!(t.phase, Phase::Final);
}

#[test]
fn advance_is_only_valid_at_a_decision_gate() {
    let mut t = league_tournament(4, DecisionPolicy::default());
    assert!(matches!(
        advance_phase(&mut t, OperatorChoice::Final),
        Err(TournamentError::InvalidPhase(Phase::League))
    ));
}

#[test]
fn drawn_final_declares_no_champion_and_allows_a_replay() {
    let mut t = league_tournament(2, DecisionPolicy::default());
    record(&mut t, "Team A", "Team B", 21, 16);
    assert_eq!(t.phase, Phase::Final);

    record_final_result(&mut t, 21, 21).unwrap();
    assert_eq!(t.phase, Phase::Final);
    assert!(t.final_result.is_some());
    assert_eq!(t.champion(), None);

    record_final_result(&mut t, 20, 22).unwrap();
    assert_eq!(t.phase, Phase::Complete);
    assert_eq!(t.champion().map(String::as_str), Some("Team B"));
}

#[test]
fn reset_discards_results_and_returns_to_setup() {
    let mut t = league_tournament(4, DecisionPolicy::AskAfterRound(2));
    record(&mut t, "Team A", "Team D", 21, 10);
    let id = t.id;

    t.reset_roster(6).unwrap();
    assert_eq!(t.phase, Phase::Setup);
    assert_eq!(t.teams.len(), 6);
    assert!(t.ledger.is_empty());
    assert!(t.rounds.is_empty());
    assert_eq!(t.id, id);
    assert_eq!(t.policy, DecisionPolicy::AskAfterRound(2));
}

#[test]
fn reset_to_an_invalid_size_changes_nothing() {
    let mut t = league_tournament(4, DecisionPolicy::default());
    record(&mut t, "Team A", "Team D", 21, 10);

    assert!(matches!(
        t.reset_roster(5),
        Err(TournamentError::InvalidSize(5))
    ));
    assert_eq!(t.phase, Phase::League);
    assert_eq!(t.teams.len(), 4);
    assert_eq!(t.ledger.len(), 1);
}

#[test]
fn policy_is_locked_once_the_league_starts() {
    let mut t = league_tournament(4, DecisionPolicy::default());
    assert!(matches!(
        t.set_policy(DecisionPolicy::AutoAdvance),
        Err(TournamentError::InvalidPhase(Phase::League))
    ));
}

#[test]
fn tournament_round_trips_through_json() {
    let mut t = league_tournament(4, DecisionPolicy::AskWhenCertified);
    record(&mut t, "Team A", "Team D", 21, 10);
    record(&mut t, "Team B", "Team C", 18, 21);

    let json = serde_json::to_string(&t).unwrap();
    let back: Tournament = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, t.id);
    assert_eq!(back.teams, t.teams);
    assert_eq!(back.rounds, t.rounds);
    assert_eq!(back.ledger, t.ledger);
    assert_eq!(back.phase, t.phase);
    assert_eq!(back.policy, t.policy);
}
