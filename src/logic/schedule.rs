//! Round-robin schedule generation (circle method).

use crate::models::{Fixture, Round, TeamId, TournamentError};

/// Generate the round-robin schedule for the given teams, in input order.
///
/// Circle method: the first slot stays fixed while the rest rotate one
/// position after each round; slot i is paired with slot n-1-i. An odd team
/// count gets a placeholder slot, and pairs involving it are skipped, so one
/// team sits out each round. Every unordered pair of teams meets exactly
/// once, and no team appears twice within a round.
///
/// Even N produces N-1 rounds, odd N produces N. Pure and deterministic.
pub fn generate_schedule(team_ids: &[TeamId]) -> Result<Vec<Round>, TournamentError> {
    if team_ids.len() < 2 {
        return Err(TournamentError::InvalidInput);
    }

    // None is the bye slot for odd team counts.
    let mut slots: Vec<Option<&TeamId>> = team_ids.iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();

    let mut rounds = Vec::with_capacity(n - 1);
    for number in 1..n as u32 {
        let mut fixtures = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            if let (Some(home), Some(away)) = (slots[i], slots[n - 1 - i]) {
                fixtures.push(Fixture::new(home.clone(), away.clone()));
            }
        }
        rounds.push(Round { number, fixtures });

        // Rotate clockwise: the last slot moves next to the fixed first slot.
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    Ok(rounds)
}
