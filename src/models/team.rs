//! Team data: stable ids generated from the roster index, player pair, display color.

use serde::{Deserialize, Serialize};

/// Identifier for a team ("Team A", "Team B", ...). Stable for the life of a roster.
pub type TeamId = String;

/// Display colors cycled by roster index. Presentation only, never used by the engine.
const TEAM_COLORS: [&str; 8] = [
    "#0E4C92", "#C0392B", "#1E8449", "#7D3C98", "#B7950B", "#117A65", "#A04000", "#2E4053",
];

/// Id for the team at `index`: letters for the first 26, numbered beyond that.
pub fn team_id_for_index(index: usize) -> TeamId {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    match ALPHABET.get(index) {
        Some(&letter) => format!("Team {}", letter as char),
        None => format!("Team {}", index + 1),
    }
}

/// Display color for the team at `index`.
pub fn color_for_index(index: usize) -> &'static str {
    TEAM_COLORS[index % TEAM_COLORS.len()]
}

/// A doubles team: two players under a stable id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Player names, empty strings until the roster is assigned.
    pub players: [String; 2],
    /// Display color (hex), assigned from a fixed palette by index.
    pub color: String,
}

impl Team {
    /// Create an unnamed team shell for the given roster index.
    pub fn new(index: usize) -> Self {
        Self {
            id: team_id_for_index(index),
            players: [String::new(), String::new()],
            color: color_for_index(index).to_string(),
        }
    }
}
