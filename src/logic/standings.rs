//! Standings: recompute the points table from the result ledger.

use crate::models::{Fixture, MatchResult, StandingsRow, Team};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Compute one standings row per team from the recorded results.
///
/// Pure function over the ledger: the ledger is authoritative and the table
/// is rebuilt from scratch on every call. A strict winner gets a win and 2
/// points, the loser a loss; equal scores count as played for both sides but
/// award nothing to either. Run rate accumulates the signed score
/// differential of every recorded match.
///
/// Rows are sorted by points, then run rate, both descending; remaining ties
/// keep roster order (stable sort).
pub fn compute_standings(
    roster: &[Team],
    ledger: &HashMap<Fixture, MatchResult>,
) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = roster
        .iter()
        .map(|team| StandingsRow {
            team: team.id.clone(),
            ..StandingsRow::default()
        })
        .collect();
    let index: HashMap<&str, usize> = roster
        .iter()
        .enumerate()
        .map(|(i, team)| (team.id.as_str(), i))
        .collect();

    for (fixture, result) in ledger {
        let diff = i64::from(result.home_score) - i64::from(result.away_score);
        if let Some(&i) = index.get(fixture.home.as_str()) {
            let row = &mut rows[i];
            row.played += 1;
            row.run_rate += diff;
            match result.home_score.cmp(&result.away_score) {
                Ordering::Greater => {
                    row.wins += 1;
                    row.points += 2;
                }
                Ordering::Less => row.losses += 1,
                Ordering::Equal => {}
            }
        }
        if let Some(&i) = index.get(fixture.away.as_str()) {
            let row = &mut rows[i];
            row.played += 1;
            row.run_rate -= diff;
            match result.away_score.cmp(&result.home_score) {
                Ordering::Greater => {
                    row.wins += 1;
                    row.points += 2;
                }
                Ordering::Less => row.losses += 1,
                Ordering::Equal => {}
            }
        }
    }

    rows.sort_by(|a, b| (b.points, b.run_rate).cmp(&(a.points, a.run_rate)));
    rows
}
