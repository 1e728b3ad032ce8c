use serde::{Deserialize, Serialize};

/// Polarity of a vote.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    /// Counts +1 towards the tally.
    Up,
    /// Counts -1 towards the tally.
    Down,
}

impl VoteDirection {
    /// Parses a direction from its route segment.
    ///
    /// Only the literal `"up"` is an upvote; every other value is a downvote.
    pub fn from_param(value: &str) -> Self {
        if value == "up" {
            VoteDirection::Up
        } else {
            VoteDirection::Down
        }
    }

    /// Contribution of a single vote in this direction to the tally.
    pub fn weight(self) -> i64 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}
