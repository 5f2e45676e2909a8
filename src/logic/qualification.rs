//! Qualification: are the top two places already mathematically settled?

use crate::models::{Fixture, MatchResult, Qualification, StandingsRow};
use std::collections::HashMap;

/// Check whether no team outside the current top two can still unseat the
/// current #2 under the points rule.
///
/// A team is still alive when its current points plus 2 per remaining
/// fixture reach the current second place's points. Certification holds when
/// at most two teams are alive; the qualified pair is then the current top
/// two in standings order.
///
/// The check is conservative: it treats every remaining fixture of a team as
/// winnable independently and never looks at how remaining fixtures interact,
/// so it can only under-certify, never wrongly certify. Run rate is not part
/// of the bound; a challenger that can merely tie #2 on points stays alive.
pub fn evaluate_qualification(
    standings: &[StandingsRow],
    fixtures: &[Fixture],
    ledger: &HashMap<Fixture, MatchResult>,
) -> Qualification {
    let [first, second, ..] = standings else {
        return Qualification {
            certified: false,
            top_two: None,
        };
    };

    let threshold = second.points;
    let alive = standings
        .iter()
        .filter(|row| max_possible_points(row, fixtures, ledger) >= threshold)
        .count();

    let certified = alive <= 2;
    Qualification {
        certified,
        top_two: certified.then(|| (first.team.clone(), second.team.clone())),
    }
}

/// Points the team would hold after winning every one of its remaining fixtures.
fn max_possible_points(
    row: &StandingsRow,
    fixtures: &[Fixture],
    ledger: &HashMap<Fixture, MatchResult>,
) -> u32 {
    let remaining = fixtures
        .iter()
        .filter(|f| f.involves(&row.team) && !ledger.contains_key(*f))
        .count() as u32;
    row.points + 2 * remaining
}
