//! Fixtures, rounds, and recorded match results.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scheduled match between two teams. Identity is the pair itself;
/// home/away is only the order the pairing algorithm produced.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Fixture {
    pub home: TeamId,
    pub away: TeamId,
}

impl Fixture {
    pub fn new(home: impl Into<TeamId>, away: impl Into<TeamId>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }

    /// Whether the given team plays in this fixture.
    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.home, self.away)
    }
}

/// One round of the round-robin: fixtures played "simultaneously" in schedule order.
/// Rounds are numbered 1..=N-1 for even N, 1..=N for odd N (the bye is not a fixture).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub fixtures: Vec<Fixture>,
}

/// A recorded score for a fixture. Re-recording overwrites (score correction).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_score: u32,
    pub away_score: u32,
}

/// Serialize the ledger as a list of `{fixture, result}` entries, sorted by
/// fixture: JSON object keys must be strings, so the map form is not usable.
pub mod ledger_serde {
    use super::{Fixture, MatchResult};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    #[derive(Serialize, Deserialize)]
    struct Entry {
        fixture: Fixture,
        result: MatchResult,
    }

    pub fn serialize<S: Serializer>(
        ledger: &HashMap<Fixture, MatchResult>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<Entry> = ledger
            .iter()
            .map(|(fixture, result)| Entry {
                fixture: fixture.clone(),
                result: *result,
            })
            .collect();
        entries.sort_by(|a, b| a.fixture.cmp(&b.fixture));
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<Fixture, MatchResult>, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|e| (e.fixture, e.result))
            .collect())
    }
}
